use crate::error::PyroError;
use regex::Regex;

/// Tolerance for the per-reaction mass balance of the lumped coefficients
pub const MASS_BALANCE_TOL: f64 = 1e-3;

/// Parses reaction equations of a lumped (mass-based) pyrolysis scheme and
/// builds the stoichiometric data structures used to assemble the rate
/// equations.
///
/// Equations are written without spaces, e.g.
/// `CELLA=>0.45LVG+0.18HAA+0.09CHAR`. Coefficients are mass-yield fractions;
/// a missing coefficient means 1. The degrees of concentration in the kinetic
/// function coincide with the reactant coefficients.
#[derive(Debug, Clone, Default)]
pub struct StoichAnalyzer {
    /// reaction equations as given by the mechanism file
    pub reactions: Vec<String>,
    /// substance names in order of first appearance
    pub substances: Vec<String>,
    /// matrix of stoichiometric coefficients, one row per reaction, one
    /// column per substance; products positive, reactants negative
    pub stoich_matrix: Vec<Vec<f64>>,
    /// matrix of concentration orders of the reactants in each reaction
    pub reagent_orders: Vec<Vec<f64>>,
}

impl StoichAnalyzer {
    pub fn new() -> Self {
        Self {
            reactions: Vec::new(),
            substances: Vec::new(),
            stoich_matrix: Vec::new(),
            reagent_orders: Vec::new(),
        }
    }

    /// Parse all equations to find the substance names.
    ///
    /// Substances are collected in order of first appearance so that the
    /// column order of the matrices is deterministic.
    pub fn search_substances(&mut self) -> Result<(), PyroError> {
        let mut substances: Vec<String> = Vec::new();
        for eq in &self.reactions {
            let (reagents, products) = split_equation(eq)?;
            for (_, name) in reagents.iter().chain(products.iter()) {
                if !substances.contains(name) {
                    substances.push(name.clone());
                }
            }
        }
        self.substances = substances;
        Ok(())
    }

    /// Build the stoichiometric matrix and the matrix of reactant orders.
    ///
    /// `search_substances` must have been called first.
    pub fn analyse_reactions(&mut self) -> Result<(), PyroError> {
        let n = self.substances.len();
        if n == 0 {
            return Err(PyroError::Config(
                "no substances found; call search_substances first".to_string(),
            ));
        }
        let mut stoich_matrix: Vec<Vec<f64>> = Vec::new();
        let mut reagent_orders: Vec<Vec<f64>> = Vec::new();

        for eq in &self.reactions {
            let (reagents, products) = split_equation(eq)?;
            let mut row = vec![0.0; n];
            let mut orders = vec![0.0; n];
            for (coeff, name) in &reagents {
                let i = self.index_of(name)?;
                row[i] -= coeff;
                orders[i] += coeff;
            }
            for (coeff, name) in &products {
                let i = self.index_of(name)?;
                row[i] += coeff;
            }
            stoich_matrix.push(row);
            reagent_orders.push(orders);
        }
        self.stoich_matrix = stoich_matrix;
        self.reagent_orders = reagent_orders;
        Ok(())
    }

    /// Mass balance of every reaction: sum of product coefficients must equal
    /// the sum of reactant coefficients within `MASS_BALANCE_TOL`.
    pub fn check_mass_conservation(&self) -> Result<(), PyroError> {
        for (j, eq) in self.reactions.iter().enumerate() {
            let (reagents, products) = split_equation(eq)?;
            let lhs: f64 = reagents.iter().map(|(c, _)| c).sum();
            let rhs: f64 = products.iter().map(|(c, _)| c).sum();
            if (lhs - rhs).abs() > MASS_BALANCE_TOL {
                return Err(PyroError::Config(format!(
                    "reaction {} '{}' does not conserve mass: reactants {:.4}, products {:.4}",
                    j, eq, lhs, rhs
                )));
            }
        }
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<usize, PyroError> {
        self.substances
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| PyroError::Config(format!("unknown substance '{}'", name)))
    }
}

/// Split an equation into (reagents, products) term lists of (coefficient, name).
pub fn split_equation(eq: &str) -> Result<(Vec<(f64, String)>, Vec<(f64, String)>), PyroError> {
    let sides: Vec<&str> = eq.split("=>").collect();
    if sides.len() != 2 {
        return Err(PyroError::Config(format!(
            "equation '{}' must contain exactly one '=>'",
            eq
        )));
    }
    let reagents = parse_side(sides[0], eq)?;
    let products = parse_side(sides[1], eq)?;
    if reagents.is_empty() || products.is_empty() {
        return Err(PyroError::Config(format!(
            "equation '{}' has an empty side",
            eq
        )));
    }
    Ok((reagents, products))
}

fn parse_side(side: &str, eq: &str) -> Result<Vec<(f64, String)>, PyroError> {
    // coefficient (optional decimal, optionally exponent) followed by a substance name
    let re = Regex::new(r"^(\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)?([A-Za-z][A-Za-z0-9]*)$").unwrap();
    let mut terms = Vec::new();
    for raw in side.split('+') {
        let term = raw.trim();
        if term.is_empty() {
            continue;
        }
        let caps = re.captures(term).ok_or_else(|| {
            PyroError::Config(format!("cannot parse term '{}' in equation '{}'", term, eq))
        })?;
        let coeff = match caps.get(1) {
            Some(c) => c.as_str().parse::<f64>().map_err(|e| {
                PyroError::Config(format!("bad coefficient '{}' in '{}': {}", c.as_str(), eq, e))
            })?,
            None => 1.0,
        };
        let name = caps[2].to_string();
        terms.push((coeff, name));
    }
    Ok(terms)
}
