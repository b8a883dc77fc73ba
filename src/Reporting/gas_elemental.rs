use crate::Kinetics::mechanism::{Mechanism, Phase};
use crate::ReactorsIVP::simulation_result::SimulationResult;
use crate::error::PyroError;
use prettytable::{Cell, Row, Table, row};
use regex::Regex;

// standard atomic weights, g/mol
const MW_C: f64 = 12.011;
const MW_H: f64 = 1.008;
const MW_O: f64 = 15.999;

/// Mass fractions of carbon, hydrogen and oxygen in one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoFractions {
    pub yc: f64,
    pub yh: f64,
    pub yo: f64,
}

impl ChoFractions {
    pub fn total(&self) -> f64 {
        self.yc + self.yh + self.yo
    }
}

/// Parse a species name as a C/H/O molecular formula and return the atom
/// counts. Names with any other element, or with stray characters, are
/// rejected.
pub fn parse_cho_formula(formula: &str) -> Result<(u32, u32, u32), PyroError> {
    let re = Regex::new(r"([CHO])(\d*)").unwrap();
    let (mut c, mut h, mut o) = (0u32, 0u32, 0u32);
    let mut covered = 0usize;
    for cap in re.captures_iter(formula) {
        let m = cap.get(0).unwrap();
        if m.start() != covered {
            return Err(PyroError::Config(format!(
                "'{}' is not a C/H/O formula",
                formula
            )));
        }
        covered = m.end();
        let count: u32 = if cap[2].is_empty() {
            1
        } else {
            cap[2].parse().map_err(|_| {
                PyroError::Config(format!("bad atom count in formula '{}'", formula))
            })?
        };
        match &cap[1] {
            "C" => c += count,
            "H" => h += count,
            _ => o += count,
        }
    }
    if covered != formula.len() || formula.is_empty() {
        return Err(PyroError::Config(format!(
            "'{}' is not a C/H/O formula",
            formula
        )));
    }
    Ok((c, h, o))
}

/// Elemental mass fractions of a species from its formula-style name.
pub fn cho_fractions(formula: &str) -> Result<ChoFractions, PyroError> {
    let (c, h, o) = parse_cho_formula(formula)?;
    let mw = c as f64 * MW_C + h as f64 * MW_H + o as f64 * MW_O;
    Ok(ChoFractions {
        yc: c as f64 * MW_C / mw,
        yh: h as f64 * MW_H / mw,
        yo: o as f64 * MW_O / mw,
    })
}

/// Elemental carbon, hydrogen and oxygen carried by the gas-phase products
/// at the end of a simulation, in wt. % of the inlet mass.
#[derive(Debug, Clone, Copy)]
pub struct GasElementalYields {
    pub carbon: f64,
    pub hydrogen: f64,
    pub oxygen: f64,
}

impl GasElementalYields {
    /// Weight the final mass fraction of every gas-phase species by its
    /// elemental composition. Gas species must be named by their molecular
    /// formula.
    pub fn from_result(
        result: &SimulationResult,
        mech: &Mechanism,
    ) -> Result<Self, PyroError> {
        let fractions = result.final_mass_fractions();
        let (mut carbon, mut hydrogen, mut oxygen) = (0.0, 0.0, 0.0);
        for sp in mech.species_of_phase(Phase::Gas) {
            let y = fractions
                .get(&sp)
                .ok_or_else(|| PyroError::Config(format!("species '{}' not in result", sp)))?;
            let cho = cho_fractions(&sp)?;
            carbon += y * cho.yc;
            hydrogen += y * cho.yh;
            oxygen += y * cho.yo;
        }
        Ok(GasElementalYields {
            carbon: carbon * 100.0,
            hydrogen: hydrogen * 100.0,
            oxygen: oxygen * 100.0,
        })
    }

    /// sum over the elements; equals the gas-phase yield
    pub fn total(&self) -> f64 {
        self.carbon + self.hydrogen + self.oxygen
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["element", "gas yield, wt. %"]);
        for (element, value) in [
            ("C", self.carbon),
            ("H", self.hydrogen),
            ("O", self.oxygen),
        ] {
            table.add_row(Row::new(vec![
                Cell::new(element),
                Cell::new(&format!("{:.2}", value)),
            ]));
        }
        table.add_row(Row::new(vec![
            Cell::new("total"),
            Cell::new(&format!("{:.2}", self.total())),
        ]));
        table.printstd();
    }
}
