use crate::Kinetics::mechanism::{Mechanism, Phase};
use crate::error::PyroError;
use RustedSciThe::Utils::logger::{save_matrix_to_csv, save_matrix_to_file};
use RustedSciThe::Utils::plots::{plots, plots_gnulot, plots_terminal};
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// Trajectory of one reactor simulation, resampled to a uniform time grid.
/// Rows of `trajectory` are time points, columns are species in mechanism
/// order.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub feedstock: String,
    pub time: DVector<f64>,
    pub species: Vec<String>,
    pub trajectory: DMatrix<f64>,
}

impl SimulationResult {
    /// mass fractions at the final time point
    pub fn final_mass_fractions(&self) -> HashMap<String, f64> {
        let last = self.trajectory.nrows() - 1;
        self.species
            .iter()
            .enumerate()
            .map(|(i, sp)| (sp.clone(), self.trajectory[(last, i)]))
            .collect()
    }

    /// sum of the final mass fractions; should stay near one
    pub fn mass_closure(&self) -> f64 {
        let last = self.trajectory.nrows() - 1;
        self.trajectory.row(last).sum()
    }

    /// final yield of a phase in wt. %
    pub fn phase_yield(&self, mech: &Mechanism, phase: Phase) -> Result<f64, PyroError> {
        let last = self.trajectory.nrows() - 1;
        let mut total = 0.0;
        for sp in mech.species_of_phase(phase) {
            let i = self
                .species
                .iter()
                .position(|s| *s == sp)
                .ok_or_else(|| PyroError::Config(format!("species '{}' not in result", sp)))?;
            total += self.trajectory[(last, i)];
        }
        Ok(total * 100.0)
    }

    ////////////////////////////////////////////////I/O/////////////////////////////////////////////////////
    pub fn plot(&self) {
        plots(
            "t".to_owned(),
            self.species.clone(),
            self.time.clone(),
            self.trajectory.clone(),
        );
    }

    pub fn gnuplot(&self) {
        plots_gnulot(
            "t".to_owned(),
            self.species.clone(),
            self.time.clone(),
            self.trajectory.clone(),
        );
    }

    pub fn plot_in_terminal(&self) {
        plots_terminal(
            "t".to_owned(),
            self.species.clone(),
            self.time.clone(),
            self.trajectory.clone(),
        );
    }

    pub fn save_to_file(&self, filename: Option<String>) {
        let name = if let Some(name) = filename {
            format!("{}.txt", name)
        } else {
            format!("{}_result.txt", self.feedstock.replace(' ', "_"))
        };
        let _ = save_matrix_to_file(
            &self.trajectory,
            &self.species,
            &name,
            &self.time,
            &"t".to_string(),
        );
    }

    pub fn save_to_csv(&self, filename: Option<String>) {
        let name = if let Some(name) = filename {
            name
        } else {
            format!("{}_result", self.feedstock.replace(' ', "_"))
        };
        let _ = save_matrix_to_csv(
            &self.trajectory,
            &self.species,
            &name,
            &self.time,
            &"t".to_string(),
        );
    }
}

/// Resample a solver trajectory onto a uniform grid of `n_report` points by
/// linear interpolation. The solver mesh must be strictly increasing.
pub fn resample_trajectory(
    t: &DVector<f64>,
    y: &DMatrix<f64>,
    n_report: usize,
) -> Result<(DVector<f64>, DMatrix<f64>), PyroError> {
    if n_report < 2 {
        return Err(PyroError::Integration(format!(
            "report grid needs at least 2 points, got {}",
            n_report
        )));
    }
    let n_pts = t.len();
    if n_pts < 2 || y.nrows() != n_pts {
        return Err(PyroError::Integration(format!(
            "trajectory has {} mesh points and {} rows",
            n_pts,
            y.nrows()
        )));
    }
    let (t0, t_end) = (t[0], t[n_pts - 1]);
    if t_end <= t0 {
        return Err(PyroError::Integration(
            "solver mesh is not increasing".to_string(),
        ));
    }
    let n_cols = y.ncols();
    let mut t_out = DVector::zeros(n_report);
    let mut y_out = DMatrix::zeros(n_report, n_cols);
    let mut k = 0usize;
    for i in 0..n_report {
        let ti = t0 + (t_end - t0) * i as f64 / (n_report - 1) as f64;
        t_out[i] = ti;
        while k + 2 < n_pts && t[k + 1] < ti {
            k += 1;
        }
        let (ta, tb) = (t[k], t[k + 1]);
        let w = if tb > ta { (ti - ta) / (tb - ta) } else { 0.0 };
        let w = w.clamp(0.0, 1.0);
        for j in 0..n_cols {
            y_out[(i, j)] = y[(k, j)] * (1.0 - w) + y[(k + 1, j)] * w;
        }
    }
    Ok((t_out, y_out))
}
