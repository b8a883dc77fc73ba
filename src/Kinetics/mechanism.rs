use crate::Kinetics::stoichiometry_analyzer::StoichAnalyzer;
use crate::error::PyroError;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::info;
use prettytable::{Cell, Row, Table, row};
use std::collections::HashMap;
use std::path::Path;

/// universal gas constant, J/(mol*K)
pub const R: f64 = 8.314;

/// Phase assignment of a lumped species, used to aggregate trajectories into
/// reportable yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Solid,
    Gas,
    Liquid,
    Metaplastic,
}

impl Phase {
    pub fn from_keyword(kw: &str) -> Result<Self, PyroError> {
        match kw {
            "solid" => Ok(Phase::Solid),
            "gas" => Ok(Phase::Gas),
            "liquid" => Ok(Phase::Liquid),
            "metaplastic" => Ok(Phase::Metaplastic),
            _ => Err(PyroError::Config(format!("unknown phase keyword '{}'", kw))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Solid => "solid",
            Phase::Gas => "gas",
            Phase::Liquid => "liquid",
            Phase::Metaplastic => "metaplastic",
        }
    }
}

/// One reaction of the scheme with its modified Arrhenius parameters
/// A (1/s), n (dimensionless), E (J/mol).
#[derive(Debug, Clone)]
pub struct ReactionEntry {
    pub equation: String,
    pub A: f64,
    pub n: f64,
    pub E: f64,
}

impl ReactionEntry {
    /// rate constant at a fixed temperature, k = A*T^n*exp(-E/(R*T))
    pub fn k_const(&self, T: f64) -> f64 {
        self.A * T.powf(self.n) * (-self.E / (R * T)).exp()
    }

    /// rate constant as a symbolic expression of a temperature expression
    pub fn k_expr(&self, T: Expr) -> Expr {
        let A = Expr::Const(self.A);
        let n = Expr::Const(self.n);
        let E = Expr::Const(self.E);
        let Rsym = Expr::Const(R);
        A * T.clone().pow(n) * Expr::Exp(Box::new(-E / (Rsym * T)))
    }
}

/// A reduced pyrolysis scheme: reactions, lumped species, phase assignment
/// and the stoichiometric data derived from the equations.
#[derive(Debug, Clone)]
pub struct Mechanism {
    /// scheme name, taken from the file stem
    pub name: String,
    pub description: String,
    pub reactions: Vec<ReactionEntry>,
    /// species in order of first appearance in the equations
    pub species: Vec<String>,
    pub phase_map: HashMap<String, Phase>,
    pub stoich: StoichAnalyzer,
}

impl Mechanism {
    /// Parse a mechanism file. The file is made of blank-line separated
    /// sections headed by DESCRIPTION, PHASES or REACTIONS; a REACTIONS line
    /// is `equation A n E` with whitespace-separated fields.
    pub fn from_file(file_path: &str) -> Result<Self, PyroError> {
        let content = std::fs::read_to_string(file_path)?;
        let name = Path::new(file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mechanism")
            .to_string();
        let mut mech = Self::from_str_named(&content, name)?;
        mech.validate()?;
        info!(
            "loaded mechanism '{}': {} reactions, {} species",
            mech.name,
            mech.reactions.len(),
            mech.species.len()
        );
        Ok(mech)
    }

    pub fn from_str_named(content: &str, name: String) -> Result<Self, PyroError> {
        let mut description = String::new();
        let mut reactions: Vec<ReactionEntry> = Vec::new();
        let mut phase_map: HashMap<String, Phase> = HashMap::new();

        let sections: Vec<&str> = content.split("\n\n").collect();
        for section in sections {
            let lines: Vec<&str> = section.lines().collect();
            if lines.is_empty() {
                continue;
            }
            match lines[0].trim() {
                "DESCRIPTION" => {
                    description = lines[1..].join("\n");
                }
                "PHASES" => {
                    for line in &lines[1..] {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let (kw, names) = line.split_once(':').ok_or_else(|| {
                            PyroError::Config(format!("bad PHASES line '{}'", line))
                        })?;
                        let phase = Phase::from_keyword(kw.trim())?;
                        for sp in names.split_whitespace() {
                            if phase_map.insert(sp.to_string(), phase).is_some() {
                                return Err(PyroError::Config(format!(
                                    "species '{}' listed in more than one phase",
                                    sp
                                )));
                            }
                        }
                    }
                }
                "REACTIONS" => {
                    for line in &lines[1..] {
                        if line.trim().is_empty() {
                            continue;
                        }
                        // line format: equation A n E
                        let parts: Vec<&str> = line.split_whitespace().collect();
                        if parts.len() != 4 {
                            return Err(PyroError::Config(format!(
                                "reaction line '{}' has {} fields, expected 4 (equation A n E)",
                                line.trim(),
                                parts.len()
                            )));
                        }
                        let equation = parts[0].to_string();
                        let A: f64 = parts[1].parse().map_err(|_| {
                            PyroError::Config(format!("bad A in line '{}'", line))
                        })?;
                        let n: f64 = parts[2].parse().map_err(|_| {
                            PyroError::Config(format!("bad n in line '{}'", line))
                        })?;
                        let E: f64 = parts[3].parse().map_err(|_| {
                            PyroError::Config(format!("bad E in line '{}'", line))
                        })?;
                        reactions.push(ReactionEntry { equation, A, n, E });
                    }
                }
                _ => continue,
            }
        }

        if reactions.is_empty() {
            return Err(PyroError::Config(
                "mechanism file contains no REACTIONS section".to_string(),
            ));
        }

        let mut stoich = StoichAnalyzer::new();
        stoich.reactions = reactions.iter().map(|r| r.equation.clone()).collect();
        stoich.search_substances()?;
        stoich.analyse_reactions()?;
        let species = stoich.substances.clone();

        Ok(Mechanism {
            name,
            description,
            reactions,
            species,
            phase_map,
            stoich,
        })
    }

    /// Consistency checks: every species has a phase, every phase-listed
    /// species occurs in the equations, all reactions conserve mass.
    pub fn validate(&self) -> Result<(), PyroError> {
        for sp in &self.species {
            if !self.phase_map.contains_key(sp) {
                return Err(PyroError::Config(format!(
                    "species '{}' has no phase assignment",
                    sp
                )));
            }
        }
        for sp in self.phase_map.keys() {
            if !self.species.contains(sp) {
                return Err(PyroError::Config(format!(
                    "phase-listed species '{}' does not occur in any reaction",
                    sp
                )));
            }
        }
        self.stoich.check_mass_conservation()?;
        Ok(())
    }

    /// Species of a given phase, in mechanism order.
    pub fn species_of_phase(&self, phase: Phase) -> Vec<String> {
        self.species
            .iter()
            .filter(|sp| self.phase_map.get(*sp) == Some(&phase))
            .cloned()
            .collect()
    }

    pub fn index_of(&self, species: &str) -> Result<usize, PyroError> {
        self.species
            .iter()
            .position(|s| s == species)
            .ok_or_else(|| PyroError::Config(format!("unknown species '{}'", species)))
    }

    /// print the scheme as a table of reactions and Arrhenius parameters
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["#", "reaction", "A, 1/s", "n", "E, J/mol"]);
        for (j, r) in self.reactions.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&j.to_string()),
                Cell::new(&r.equation),
                Cell::new(&format!("{:.3e}", r.A)),
                Cell::new(&format!("{}", r.n)),
                Cell::new(&format!("{:.1}", r.E)),
            ]));
        }
        table.printstd();
    }
}
