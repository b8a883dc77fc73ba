use crate::Feedstocks::feedstock::Feedstock;
use crate::Kinetics::mechanism::{Mechanism, Phase};
use crate::ReactorsIVP::simulation_result::SimulationResult;
use crate::error::PyroError;
use log::warn;
use prettytable::{Cell, Row, Table, row};

/// mass closure beyond this deviation from 100 wt. % triggers a warning
const CLOSURE_WARN_TOL: f64 = 0.5;

/// Final phase yields of a simulation in wt. % of the inlet mass.
#[derive(Debug, Clone, Copy)]
pub struct PhaseYields {
    pub gases: f64,
    pub liquids: f64,
    pub solids: f64,
    pub metaplastics: f64,
}

impl PhaseYields {
    pub fn from_result(result: &SimulationResult, mech: &Mechanism) -> Result<Self, PyroError> {
        let yields = PhaseYields {
            gases: result.phase_yield(mech, Phase::Gas)?,
            liquids: result.phase_yield(mech, Phase::Liquid)?,
            solids: result.phase_yield(mech, Phase::Solid)?,
            metaplastics: result.phase_yield(mech, Phase::Metaplastic)?,
        };
        if (yields.total() - 100.0).abs() > CLOSURE_WARN_TOL {
            warn!(
                "'{}': phase yields sum to {:.2} wt. %",
                result.feedstock,
                yields.total()
            );
        }
        Ok(yields)
    }

    pub fn total(&self) -> f64 {
        self.gases + self.liquids + self.solids + self.metaplastics
    }

    /// lumped [gases, liquids, solids] with the metaplastics counted as part
    /// of the solid residue, matching the experimental lumping
    pub fn lumped(&self) -> [f64; 3] {
        [self.gases, self.liquids, self.solids + self.metaplastics]
    }
}

/// Side-by-side comparison of the simulated phase yields with the lumped
/// experimental yields of one feedstock.
#[derive(Debug, Clone)]
pub struct YieldComparison {
    pub feedstock: String,
    pub model: PhaseYields,
    /// experimental lumped yields [gases, liquids, solids], wt. %
    pub experimental: [f64; 3],
}

impl YieldComparison {
    pub fn new(feedstock: &Feedstock, model: PhaseYields) -> Self {
        YieldComparison {
            feedstock: feedstock.name.clone(),
            model,
            experimental: feedstock.lump_yield(),
        }
    }

    /// model minus experiment per lump, wt. %
    pub fn deviations(&self) -> [f64; 3] {
        let lumped = self.model.lumped();
        [
            lumped[0] - self.experimental[0],
            lumped[1] - self.experimental[1],
            lumped[2] - self.experimental[2],
        ]
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row![
            "lump",
            "model, wt. %",
            "experiment, wt. %",
            "deviation, wt. %"
        ]);
        let lumped = self.model.lumped();
        let dev = self.deviations();
        for (i, lump) in ["gases", "liquids", "solids"].iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(lump),
                Cell::new(&format!("{:.2}", lumped[i])),
                Cell::new(&format!("{:.2}", self.experimental[i])),
                Cell::new(&format!("{:+.2}", dev[i])),
            ]));
        }
        println!("feedstock: {}", self.feedstock);
        table.printstd();
    }
}

/// Summary table over a set of feedstock comparisons, one row per feedstock.
pub fn print_comparison_table(comparisons: &[YieldComparison]) {
    let mut table = Table::new();
    table.add_row(row![
        "feedstock",
        "gases model/exp",
        "liquids model/exp",
        "solids model/exp",
        "closure, wt. %"
    ]);
    for c in comparisons {
        let lumped = c.model.lumped();
        table.add_row(Row::new(vec![
            Cell::new(&c.feedstock),
            Cell::new(&format!("{:.1} / {:.1}", lumped[0], c.experimental[0])),
            Cell::new(&format!("{:.1} / {:.1}", lumped[1], c.experimental[1])),
            Cell::new(&format!("{:.1} / {:.1}", lumped[2], c.experimental[2])),
            Cell::new(&format!("{:.1}", c.model.total())),
        ]));
    }
    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector};

    fn toy_mech() -> Mechanism {
        let content = "PHASES\nsolid: A CHAR\ngas: CO\nliquid: TAR\nmetaplastic: GCO\n\nREACTIONS\nA=>0.3CO+0.3TAR+0.2CHAR+0.2GCO 1.0 0 0\n";
        Mechanism::from_str_named(content, "toy".to_string()).unwrap()
    }

    fn toy_result() -> SimulationResult {
        SimulationResult {
            feedstock: "Stem wood".to_string(),
            time: DVector::from_vec(vec![0.0, 1.0]),
            species: vec![
                "A".to_string(),
                "CO".to_string(),
                "TAR".to_string(),
                "CHAR".to_string(),
                "GCO".to_string(),
            ],
            trajectory: DMatrix::from_row_slice(
                2,
                5,
                &[
                    1.0, 0.0, 0.0, 0.0, 0.0, //
                    0.1, 0.27, 0.27, 0.18, 0.18,
                ],
            ),
        }
    }

    #[test]
    fn test_phase_yields_from_result() {
        let yields = PhaseYields::from_result(&toy_result(), &toy_mech()).unwrap();
        assert_abs_diff_eq!(yields.gases, 27.0, epsilon = 1e-9);
        assert_abs_diff_eq!(yields.liquids, 27.0, epsilon = 1e-9);
        // unreacted feed counts towards the solids
        assert_abs_diff_eq!(yields.solids, 28.0, epsilon = 1e-9);
        assert_abs_diff_eq!(yields.metaplastics, 18.0, epsilon = 1e-9);
        assert_abs_diff_eq!(yields.total(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lumped_folds_metaplastics_into_solids() {
        let yields = PhaseYields {
            gases: 20.0,
            liquids: 50.0,
            solids: 20.0,
            metaplastics: 10.0,
        };
        assert_eq!(yields.lumped(), [20.0, 50.0, 30.0]);
    }

    #[test]
    fn test_deviations() {
        let fs = Feedstock {
            name: "Stem wood".to_string(),
            cycle: 1,
            proximate: vec![16.92, 76.40, 0.64, 6.04],
            ultimate: vec![47.69, 6.35, 38.92, 0.31, 0.05, 0.64, 6.04],
            chemical: vec![0.0, 0.0, 2.5, 1.2, 0.8, 28.4, 41.2, 8.9, 2.3, 1.1, 10.2, 1.3],
            exp_yield: vec![53.9, 4.5, 14.6, 10.8, 12.6],
            residence_time: None,
            splits: None,
        };
        let model = PhaseYields {
            gases: 15.0,
            liquids: 68.0,
            solids: 12.0,
            metaplastics: 5.0,
        };
        let cmp = YieldComparison::new(&fs, model);
        let dev = cmp.deviations();
        // exp lumps: gases 14.6, liquids 69.2, solids 12.6
        assert_abs_diff_eq!(dev[0], 15.0 - 14.6, epsilon = 1e-9);
        assert_abs_diff_eq!(dev[1], 68.0 - 69.2, epsilon = 1e-9);
        assert_abs_diff_eq!(dev[2], 17.0 - 12.6, epsilon = 1e-9);
    }
}
