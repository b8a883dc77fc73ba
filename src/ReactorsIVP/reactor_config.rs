use crate::error::PyroError;
use RustedSciThe::symbolic::symbolic_engine::Expr;

/// Temperature program of the reactor over the residence time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatingProfile {
    /// constant temperature equal to the initial temperature
    Isothermal,
    /// T(t) = T0 + rate*t, rate in K/s
    LinearRamp { rate: f64 },
}

/// Operating conditions shared by the reactor drivers.
#[derive(Debug, Clone)]
pub struct ReactorConfig {
    /// initial temperature, K
    pub initial_temperature: f64,
    /// operating pressure, Pa
    pub pressure: f64,
    pub heating_profile: HeatingProfile,
    /// residence time, s
    pub residence_time: f64,
    /// number of uniformly spaced points in the reported trajectory
    pub n_report: usize,
}

impl ReactorConfig {
    pub fn new(
        initial_temperature: f64,
        pressure: f64,
        heating_profile: HeatingProfile,
        residence_time: f64,
        n_report: usize,
    ) -> Result<Self, PyroError> {
        let config = ReactorConfig {
            initial_temperature,
            pressure,
            heating_profile,
            residence_time,
            n_report,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PyroError> {
        if self.initial_temperature <= 0.0 {
            return Err(PyroError::Config(format!(
                "initial temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if self.pressure <= 0.0 {
            return Err(PyroError::Config(format!(
                "pressure must be positive, got {}",
                self.pressure
            )));
        }
        if self.residence_time <= 0.0 {
            return Err(PyroError::Config(format!(
                "residence time must be positive, got {}",
                self.residence_time
            )));
        }
        if self.n_report < 2 {
            return Err(PyroError::Config(format!(
                "n_report must be at least 2, got {}",
                self.n_report
            )));
        }
        // the temperature must stay positive over the whole program
        if self.temperature_at(self.residence_time) <= 0.0 {
            return Err(PyroError::Config(
                "temperature program drops below zero within the residence time".to_string(),
            ));
        }
        Ok(())
    }

    /// temperature at time t according to the heating profile
    pub fn temperature_at(&self, t: f64) -> f64 {
        match self.heating_profile {
            HeatingProfile::Isothermal => self.initial_temperature,
            HeatingProfile::LinearRamp { rate } => self.initial_temperature + rate * t,
        }
    }

    /// temperature as a symbolic expression of the time variable "t"
    pub fn temperature_expr(&self) -> Expr {
        match self.heating_profile {
            HeatingProfile::Isothermal => Expr::Const(self.initial_temperature),
            HeatingProfile::LinearRamp { rate } => {
                Expr::Const(self.initial_temperature)
                    + Expr::Const(rate) * Expr::Var("t".to_string())
            }
        }
    }
}
