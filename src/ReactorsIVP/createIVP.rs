use crate::Kinetics::mechanism::Mechanism;
use crate::error::PyroError;
use RustedSciThe::symbolic::symbolic_engine::Expr;

/// Symbolic reaction rates R_j = k_j * prod_i y_i^nu_ji where the species
/// mass fractions are the variables and nu_ji are the reactant coefficients.
pub fn rate_expressions(mech: &Mechanism, k_exprs: &[Expr]) -> Result<Vec<Expr>, PyroError> {
    if k_exprs.len() != mech.reactions.len() {
        return Err(PyroError::Config(format!(
            "got {} rate constants for {} reactions",
            k_exprs.len(),
            mech.reactions.len()
        )));
    }
    let n = mech.species.len();
    let mut rates = Vec::with_capacity(k_exprs.len());
    for (j, k_j) in k_exprs.iter().enumerate() {
        let mut rate = k_j.clone();
        for i in 0..n {
            let order = mech.stoich.reagent_orders[j][i];
            if order == 0.0 {
                continue;
            }
            let y_i = Expr::Var(mech.species[i].clone());
            if order == 1.0 {
                rate = rate * y_i;
            } else {
                rate = rate * y_i.pow(Expr::Const(order));
            }
        }
        rates.push(rate.simplify_());
    }
    Ok(rates)
}

/// Right-hand side of the batch rate equations, dy_i/dt = sum_j s_ij * R_j,
/// one expression per species in mechanism order.
pub fn species_rhs(mech: &Mechanism, k_exprs: &[Expr]) -> Result<Vec<Expr>, PyroError> {
    let rates = rate_expressions(mech, k_exprs)?;
    let n = mech.species.len();
    let mut rhs = Vec::with_capacity(n);
    for i in 0..n {
        let mut dyi = Expr::Const(0.0);
        for (j, rate) in rates.iter().enumerate() {
            let s_ij = mech.stoich.stoich_matrix[j][i];
            if s_ij == 0.0 {
                continue;
            }
            dyi = dyi + Expr::Const(s_ij) * rate.clone();
        }
        rhs.push(dyi.simplify_());
    }
    Ok(rhs)
}
