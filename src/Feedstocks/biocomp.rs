use crate::error::PyroError;
use log::warn;
use nalgebra::{Matrix3, Vector3};
use std::collections::HashMap;

// carbon and hydrogen mass fractions of the reference species
const CELL_C: f64 = 0.44446; // C6H10O5
const CELL_H: f64 = 0.06217;
const HCE_C: f64 = 0.45457; // C5H8O4
const HCE_H: f64 = 0.06104;
const LIGC_C: f64 = 0.69758; // C15H14O4
const LIGC_H: f64 = 0.05464;
const LIGH_C: f64 = 0.60542; // C22H28O9
const LIGH_H: f64 = 0.06467;
const LIGO_C: f64 = 0.56871; // C20H22O10
const LIGO_H: f64 = 0.05250;
const TANN_C: f64 = 0.59216; // C15H12O7
const TANN_H: f64 = 0.03976;
const TGL_C: f64 = 0.76288; // C57H100O7
const TGL_H: f64 = 0.11232;

const NEG_TOL: f64 = 1e-6;

/// Splitting parameters [alpha, beta, gamma, delta, epsilon] that distribute
/// the reference mixtures among the structural lumps. All must lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiocompSplits {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    pub epsilon: f64,
}

impl Default for BiocompSplits {
    fn default() -> Self {
        BiocompSplits {
            alpha: 0.6,
            beta: 0.8,
            gamma: 0.8,
            delta: 1.0,
            epsilon: 1.0,
        }
    }
}

impl BiocompSplits {
    pub fn from_array(a: [f64; 5]) -> Self {
        BiocompSplits {
            alpha: a[0],
            beta: a[1],
            gamma: a[2],
            delta: a[3],
            epsilon: a[4],
        }
    }

    pub fn validate(&self) -> Result<(), PyroError> {
        for (name, v) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("delta", self.delta),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(PyroError::Config(format!(
                    "splitting parameter {} = {} outside [0, 1]",
                    name, v
                )));
            }
        }
        Ok(())
    }
}

/// Mass fractions of the structural lumps on a dry ash-free basis.
/// They sum to one by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomassComposition {
    pub cell: f64,
    pub hemi: f64,
    pub ligc: f64,
    pub ligh: f64,
    pub ligo: f64,
    pub tann: f64,
    pub tgl: f64,
}

impl BiomassComposition {
    /// composition keyed by the lumped species names of the pyrolysis scheme
    pub fn as_map(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("CELL".to_string(), self.cell),
            ("GMSW".to_string(), self.hemi),
            ("LIGC".to_string(), self.ligc),
            ("LIGH".to_string(), self.ligh),
            ("LIGO".to_string(), self.ligo),
            ("TANN".to_string(), self.tann),
            ("TGL".to_string(), self.tgl),
        ])
    }

    pub fn sum(&self) -> f64 {
        self.cell + self.hemi + self.ligc + self.ligh + self.ligo + self.tann + self.tgl
    }
}

/// Determine the biomass composition from the C and H mass fractions of the
/// dry ash-free feedstock.
///
/// Three reference mixtures are built from the reference species:
/// RM1 = alpha CELL + (1 - alpha) HCE, RM2 = beta LIGO + (1 - beta)
/// (delta LIGC + (1 - delta) TANN), RM3 = gamma LIGH + (1 - gamma)
/// (epsilon CELL + (1 - epsilon) TGL). Their mass fractions x1, x2, x3 solve
/// the linear system that matches yc, yh and closes the mass balance; the
/// lump fractions follow from the splitting parameters.
pub fn biocomp(yc: f64, yh: f64, splits: &BiocompSplits) -> Result<BiomassComposition, PyroError> {
    splits.validate()?;
    if !(0.0..1.0).contains(&yc) || !(0.0..1.0).contains(&yh) {
        return Err(PyroError::Config(format!(
            "C and H mass fractions must lie in (0, 1), got yc = {}, yh = {}",
            yc, yh
        )));
    }
    let BiocompSplits {
        alpha,
        beta,
        gamma,
        delta,
        epsilon,
    } = *splits;

    // C and H content of the reference mixtures
    let yc1 = alpha * CELL_C + (1.0 - alpha) * HCE_C;
    let yh1 = alpha * CELL_H + (1.0 - alpha) * HCE_H;
    let yc2 = beta * LIGO_C + (1.0 - beta) * (delta * LIGC_C + (1.0 - delta) * TANN_C);
    let yh2 = beta * LIGO_H + (1.0 - beta) * (delta * LIGC_H + (1.0 - delta) * TANN_H);
    let yc3 = gamma * LIGH_C + (1.0 - gamma) * (epsilon * CELL_C + (1.0 - epsilon) * TGL_C);
    let yh3 = gamma * LIGH_H + (1.0 - gamma) * (epsilon * CELL_H + (1.0 - epsilon) * TGL_H);

    let a = Matrix3::new(yc1, yc2, yc3, yh1, yh2, yh3, 1.0, 1.0, 1.0);
    let b = Vector3::new(yc, yh, 1.0);
    let x = a.lu().solve(&b).ok_or_else(|| {
        PyroError::Config(
            "reference mixture system is singular for the given splitting parameters".to_string(),
        )
    })?;

    let raw = [
        ("cellulose", x[0] * alpha + x[2] * (1.0 - gamma) * epsilon),
        ("hemicellulose", x[0] * (1.0 - alpha)),
        ("lig-o", x[1] * beta),
        ("lig-c", x[1] * (1.0 - beta) * delta),
        ("tannins", x[1] * (1.0 - beta) * (1.0 - delta)),
        ("lig-h", x[2] * gamma),
        ("triglycerides", x[2] * (1.0 - gamma) * (1.0 - epsilon)),
    ];
    let mut y = [0.0; 7];
    for (i, (name, v)) in raw.iter().enumerate() {
        if *v < 0.0 {
            if *v > -NEG_TOL {
                warn!("clamping slightly negative {} fraction {:.3e} to zero", name, v);
                y[i] = 0.0;
            } else {
                return Err(PyroError::Config(format!(
                    "biomass characterization gives negative {} fraction {:.4}; \
                     adjust the splitting parameters",
                    name, v
                )));
            }
        } else {
            y[i] = *v;
        }
    }

    Ok(BiomassComposition {
        cell: y[0],
        hemi: y[1],
        ligo: y[2],
        ligc: y[3],
        tann: y[4],
        ligh: y[5],
        tgl: y[6],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sum_is_one() {
        let bc = biocomp(0.513, 0.0610, &BiocompSplits::default()).unwrap();
        assert_abs_diff_eq!(bc.sum(), 1.0, epsilon = 1e-9);
        assert!(bc.cell > 0.0 && bc.hemi > 0.0 && bc.ligh > 0.0);
    }

    #[test]
    fn test_ch_balance_preserved() {
        let (yc, yh) = (0.513, 0.0610);
        let bc = biocomp(yc, yh, &BiocompSplits::default()).unwrap();
        let c = bc.cell * CELL_C
            + bc.hemi * HCE_C
            + bc.ligc * LIGC_C
            + bc.ligh * LIGH_C
            + bc.ligo * LIGO_C
            + bc.tann * TANN_C
            + bc.tgl * TGL_C;
        let h = bc.cell * CELL_H
            + bc.hemi * HCE_H
            + bc.ligc * LIGC_H
            + bc.ligh * LIGH_H
            + bc.ligo * LIGO_H
            + bc.tann * TANN_H
            + bc.tgl * TGL_H;
        assert_abs_diff_eq!(c, yc, epsilon = 1e-9);
        assert_abs_diff_eq!(h, yh, epsilon = 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let splits = BiocompSplits::default();
        let a = biocomp(0.48, 0.060, &splits).unwrap();
        let b = biocomp(0.48, 0.060, &splits).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_splits_suppress_tann_tgl() {
        // delta = epsilon = 1 routes nothing into tannins or triglycerides
        let bc = biocomp(0.513, 0.0610, &BiocompSplits::default()).unwrap();
        assert_abs_diff_eq!(bc.tann, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bc.tgl, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_splits_rejected() {
        let mut splits = BiocompSplits::default();
        splits.alpha = 1.5;
        assert!(biocomp(0.5, 0.06, &splits).is_err());
    }

    #[test]
    fn test_unrepresentable_composition_rejected() {
        // a carbon content far above any reference mixture has no solution
        // with nonnegative fractions
        assert!(biocomp(0.95, 0.02, &BiocompSplits::default()).is_err());
    }
}
