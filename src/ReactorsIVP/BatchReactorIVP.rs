use crate::Kinetics::mechanism::Mechanism;
use crate::ReactorsIVP::createIVP::species_rhs;
use crate::ReactorsIVP::reactor_config::{HeatingProfile, ReactorConfig};
use crate::ReactorsIVP::simulation_result::{SimulationResult, resample_trajectory};
use crate::error::PyroError;
use RustedSciThe::numerical::ODE_api2::{SolverParam, SolverType, UniversalODESolver};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::info;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

const INLET_SUM_TOL: f64 = 1e-6;

pub fn default_solver_params() -> HashMap<String, SolverParam> {
    HashMap::from([
        ("step_size".to_owned(), SolverParam::Float(1e-3)),
        ("tolerance".to_owned(), SolverParam::Float(1e-3)),
        ("max_iterations".to_owned(), SolverParam::Int(100000)),
        ("rtol".to_owned(), SolverParam::Float(1e-6)),
        ("atol".to_owned(), SolverParam::Float(1e-8)),
        ("max_step".to_owned(), SolverParam::Float(0.1)),
        ("first_step".to_owned(), SolverParam::OptionalFloat(None)),
        ("vectorized".to_owned(), SolverParam::Bool(false)),
        ("jac_sparsity".to_owned(), SolverParam::OptionalMatrix(None)),
        ("parallel".to_owned(), SolverParam::Bool(false)),
    ])
}

/// Well-mixed closed reactor: the rate equations dy/dt = S(y) are integrated
/// from the inlet composition over the residence time with a stiff solver.
pub struct BatchReactor {
    pub config: ReactorConfig,
    pub solver_type: SolverType,
    pub solver_params: HashMap<String, SolverParam>,
}

impl BatchReactor {
    pub fn new(config: ReactorConfig) -> Self {
        BatchReactor {
            config,
            solver_type: SolverType::BDF,
            solver_params: default_solver_params(),
        }
    }

    pub fn set_solver(&mut self, solver_type: SolverType) {
        self.solver_type = solver_type;
    }

    pub fn set_solver_params(&mut self, params: HashMap<String, SolverParam>) {
        self.solver_params.extend(params);
    }

    /// rate constants for all reactions: plain constants when isothermal,
    /// expressions of "t" under a temperature ramp
    pub fn rate_constants(&self, mech: &Mechanism) -> Vec<Expr> {
        match self.config.heating_profile {
            HeatingProfile::Isothermal => {
                let t0 = self.config.initial_temperature;
                mech.reactions
                    .iter()
                    .map(|r| Expr::Const(r.k_const(t0)))
                    .collect()
            }
            HeatingProfile::LinearRamp { .. } => {
                let t_expr = self.config.temperature_expr();
                mech.reactions
                    .iter()
                    .map(|r| r.k_expr(t_expr.clone()))
                    .collect()
            }
        }
    }

    /// Integrate the rate equations for one feedstock.
    ///
    /// The inlet maps species names to mass fractions; species of the scheme
    /// that are absent start at zero. The fractions must sum to one.
    pub fn simulate(
        &self,
        mech: &Mechanism,
        feedstock: &str,
        inlet: &HashMap<String, f64>,
    ) -> Result<SimulationResult, PyroError> {
        let y0 = inlet_vector(mech, feedstock, inlet)?;
        let k_exprs = self.rate_constants(mech);
        let eq_system = species_rhs(mech, &k_exprs)?;
        info!(
            "batch run '{}': {} equations, T0 = {} K, residence time {} s",
            feedstock,
            eq_system.len(),
            self.config.initial_temperature,
            self.config.residence_time
        );

        let mut ode = UniversalODESolver::new(
            eq_system,
            mech.species.clone(),
            "t".to_owned(),
            self.solver_type.clone(),
            0.0,
            y0,
            self.config.residence_time,
        );
        ode.set_parameters(self.solver_params.clone());
        ode.initialize();
        ode.solve();

        let (t, y) = ode.get_result();
        let (t, y) = check_solution(t, y, feedstock)?;
        let (time, trajectory) = resample_trajectory(&t, &y, self.config.n_report)?;
        Ok(SimulationResult {
            feedstock: feedstock.to_string(),
            time,
            species: mech.species.clone(),
            trajectory,
        })
    }
}

/// Order the inlet map into a state vector following the mechanism species,
/// rejecting unknown species and compositions that do not sum to one.
pub fn inlet_vector(
    mech: &Mechanism,
    feedstock: &str,
    inlet: &HashMap<String, f64>,
) -> Result<DVector<f64>, PyroError> {
    for sp in inlet.keys() {
        if !mech.species.contains(sp) {
            return Err(PyroError::Config(format!(
                "inlet species '{}' is not part of scheme '{}'",
                sp, mech.name
            )));
        }
    }
    let total: f64 = inlet.values().sum();
    if (total - 1.0).abs() > INLET_SUM_TOL {
        return Err(PyroError::Config(format!(
            "inlet composition of '{}' sums to {:.8}, expected 1",
            feedstock, total
        )));
    }
    let y0 = DVector::from_iterator(
        mech.species.len(),
        mech.species
            .iter()
            .map(|sp| inlet.get(sp).copied().unwrap_or(0.0)),
    );
    Ok(y0)
}

/// Validate the raw solver output: present, at least two mesh points and
/// every value finite.
pub fn check_solution(
    t: Option<DVector<f64>>,
    y: Option<DMatrix<f64>>,
    feedstock: &str,
) -> Result<(DVector<f64>, DMatrix<f64>), PyroError> {
    let t = t.ok_or_else(|| {
        PyroError::Integration(format!("solver returned no time mesh for '{}'", feedstock))
    })?;
    let y = y.ok_or_else(|| {
        PyroError::Integration(format!("solver returned no solution for '{}'", feedstock))
    })?;
    if t.len() < 2 {
        return Err(PyroError::Integration(format!(
            "solver produced only {} mesh point(s) for '{}'",
            t.len(),
            feedstock
        )));
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(PyroError::Integration(format!(
            "solution for '{}' contains non-finite values",
            feedstock
        )));
    }
    Ok((t, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReactorsIVP::reactor_config::HeatingProfile;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn two_step_mech() -> Mechanism {
        // k chosen so both steps act on the 1 s time scale
        let content = "PHASES\nsolid: A B\nliquid: C\n\nREACTIONS\nA=>B 2.0 0 0\nB=>C 1.0 0 0\n";
        Mechanism::from_str_named(content, "twostep".to_string()).unwrap()
    }

    fn reactor(residence_time: f64) -> BatchReactor {
        let config = ReactorConfig::new(
            773.15,
            101_325.0,
            HeatingProfile::Isothermal,
            residence_time,
            50,
        )
        .unwrap();
        BatchReactor::new(config)
    }

    #[test]
    fn test_first_order_decay_matches_analytic() {
        let mech = two_step_mech();
        let reactor = reactor(1.0);
        let inlet = HashMap::from([("A".to_string(), 1.0)]);
        let result = reactor.simulate(&mech, "toy", &inlet).unwrap();
        // y_A(t) = exp(-2t)
        let fins = result.final_mass_fractions();
        assert_relative_eq!(fins["A"], (-2.0f64).exp(), max_relative = 5e-3);
        // mass closure holds along the whole trajectory
        for i in 0..result.trajectory.nrows() {
            assert_abs_diff_eq!(result.trajectory.row(i).sum(), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_deterministic_runs() {
        let mech = two_step_mech();
        let reactor = reactor(1.0);
        let inlet = HashMap::from([("A".to_string(), 1.0)]);
        let a = reactor.simulate(&mech, "toy", &inlet).unwrap();
        let b = reactor.simulate(&mech, "toy", &inlet).unwrap();
        assert_eq!(a.trajectory, b.trajectory);
    }

    #[test]
    fn test_report_grid_independent_of_solver_mesh() {
        let mech = two_step_mech();
        let mut r1 = reactor(1.0);
        let mut r2 = reactor(1.0);
        r1.set_solver_params(HashMap::from([(
            "max_step".to_owned(),
            SolverParam::Float(0.05),
        )]));
        r2.set_solver_params(HashMap::from([(
            "max_step".to_owned(),
            SolverParam::Float(0.01),
        )]));
        let inlet = HashMap::from([("A".to_string(), 1.0)]);
        let a = r1.simulate(&mech, "toy", &inlet).unwrap();
        let b = r2.simulate(&mech, "toy", &inlet).unwrap();
        assert_eq!(a.time.len(), b.time.len());
        for i in 0..a.time.len() {
            assert_abs_diff_eq!(a.time[i], b.time[i], epsilon = 1e-12);
            assert_abs_diff_eq!(
                a.trajectory[(i, 0)],
                b.trajectory[(i, 0)],
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn test_inlet_must_sum_to_one() {
        let mech = two_step_mech();
        let inlet = HashMap::from([("A".to_string(), 0.9)]);
        assert!(inlet_vector(&mech, "toy", &inlet).is_err());
    }

    #[test]
    fn test_unknown_inlet_species_rejected() {
        let mech = two_step_mech();
        let inlet = HashMap::from([("X".to_string(), 1.0)]);
        let err = inlet_vector(&mech, "toy", &inlet).unwrap_err();
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_inlet_vector_ordering() {
        let mech = two_step_mech();
        let inlet = HashMap::from([("B".to_string(), 0.25), ("A".to_string(), 0.75)]);
        let y0 = inlet_vector(&mech, "toy", &inlet).unwrap();
        assert_abs_diff_eq!(y0[0], 0.75);
        assert_abs_diff_eq!(y0[1], 0.25);
        assert_abs_diff_eq!(y0[2], 0.0);
    }

    #[test]
    fn test_check_solution_failures() {
        assert!(check_solution(None, None, "toy").is_err());
        let t = DVector::from_vec(vec![0.0, 1.0]);
        let y = DMatrix::from_row_slice(2, 1, &[1.0, f64::NAN]);
        assert!(check_solution(Some(t), Some(y), "toy").is_err());
    }
}
