use crate::Feedstocks::biocomp::BiomassComposition;
use crate::error::PyroError;
use serde::Deserialize;
use std::collections::HashMap;

/// air-dry loss assumed when converting as-determined to as-received, wt. %
pub const ADL: f64 = 22.0;

// mass fractions of H and O in water
const H_IN_H2O: f64 = 0.1119;
const O_IN_H2O: f64 = 0.8881;

/// A single feedstock record as stored in the JSON feedstock table.
///
/// All analysis data are reported on an as-determined basis (ad) in weight
/// percent. Proximate values are [FC, VM, ash, moisture]; ultimate values are
/// [C, H, O, N, S, ash, moisture] where H and O exclude the contribution of
/// moisture; chemical analysis values (dry basis) are [structural organics,
/// non-structural organics, water extractables, ethanol extractives, acetone
/// extractives, lignin, glucan, xylan, galactan, arabinan, mannan, acetyl].
/// Experimental yields (wet basis) are [oil, condensables, light gas, water
/// vapor, char].
#[derive(Debug, Clone, Deserialize)]
pub struct Feedstock {
    pub name: String,
    pub cycle: u32,
    pub proximate: Vec<f64>,
    pub ultimate: Vec<f64>,
    pub chemical: Vec<f64>,
    #[serde(rename = "yield")]
    pub exp_yield: Vec<f64>,
    #[serde(rename = "residenceTime")]
    pub residence_time: Option<f64>,
    /// per-feedstock override of the splitting parameters
    /// [alpha, beta, gamma, delta, epsilon]
    pub splits: Option<[f64; 5]>,
}

impl Feedstock {
    /// proximate analysis as-received, [FC, VM, ash, moisture]
    pub fn prox_ar(&self) -> [f64; 4] {
        let [fc, vm, ash, m] = [
            self.proximate[0],
            self.proximate[1],
            self.proximate[2],
            self.proximate[3],
        ];
        let m_ar = m * (100.0 - ADL) / 100.0 + ADL;
        let f = (100.0 - m_ar) / (100.0 - m);
        [fc * f, vm * f, ash * f, m_ar]
    }

    /// proximate analysis dry basis, [FC, VM, ash]
    pub fn prox_d(&self) -> [f64; 3] {
        let m = self.proximate[3];
        let f = 100.0 / (100.0 - m);
        [
            self.proximate[0] * f,
            self.proximate[1] * f,
            self.proximate[2] * f,
        ]
    }

    /// proximate analysis dry ash-free, [FC, VM]
    pub fn prox_daf(&self) -> [f64; 2] {
        let m = self.proximate[3];
        let ash = self.proximate[2];
        let f = 100.0 / (100.0 - m - ash);
        [self.proximate[0] * f, self.proximate[1] * f]
    }

    /// ultimate analysis as-received, [C, H, O, N, S, ash, moisture].
    /// H and O include the contribution of moisture.
    pub fn ult_ar(&self) -> [f64; 7] {
        let u = &self.ultimate;
        let m = u[6];
        let m_ar = m * (100.0 - ADL) / 100.0 + ADL;
        let f = (100.0 - m_ar) / (100.0 - m);
        [
            u[0] * f,
            (u[1] - H_IN_H2O * m) * f,
            (u[2] - O_IN_H2O * m) * f,
            u[3] * f,
            u[4] * f,
            u[5] * f,
            m_ar,
        ]
    }

    /// ultimate analysis dry basis, [C, H, O, N, S, ash]
    pub fn ult_d(&self) -> [f64; 6] {
        let u = &self.ultimate;
        let m = u[6];
        let f = 100.0 / (100.0 - m);
        [
            u[0] * f,
            (u[1] - H_IN_H2O * m) * f,
            (u[2] - O_IN_H2O * m) * f,
            u[3] * f,
            u[4] * f,
            u[5] * f,
        ]
    }

    /// ultimate analysis dry ash-free, [C, H, O, N, S]
    pub fn ult_daf(&self) -> [f64; 5] {
        let u = &self.ultimate;
        let m = u[6];
        let ash = u[5];
        let f = 100.0 / (100.0 - m - ash);
        [
            u[0] * f,
            (u[1] - H_IN_H2O * m) * f,
            (u[2] - O_IN_H2O * m) * f,
            u[3] * f,
            u[4] * f,
        ]
    }

    /// ultimate analysis on a CHO basis, [C, H, O]
    pub fn ult_cho(&self) -> [f64; 3] {
        let daf = self.ult_daf();
        let f = 100.0 / (100.0 - daf[3] - daf[4]);
        [daf[0] * f, daf[1] * f, daf[2] * f]
    }

    /// chemical analysis dry ash-free basis; the first two entries
    /// (structural and non-structural organics) are zeroed
    pub fn chem_daf(&self) -> Vec<f64> {
        let total: f64 = self.chemical.iter().sum();
        let denom = total - self.chemical[0] - self.chemical[1];
        let mut daf: Vec<f64> = self.chemical.iter().map(|c| c * 100.0 / denom).collect();
        daf[0] = 0.0;
        daf[1] = 0.0;
        daf
    }

    /// biomass composition from the chemical analysis (daf),
    /// [cellulose, hemicellulose, lignin] where cellulose = glucan and
    /// hemicellulose = xylan + galactan + arabinan + mannan + acetyl
    pub fn chem_bc(&self) -> [f64; 3] {
        let daf = self.chem_daf();
        let cell = daf[6];
        let hemi = daf[7] + daf[8] + daf[9] + daf[10] + daf[11];
        let lig = daf[5];
        [cell, hemi, lig]
    }

    /// experimental yields normalized to sum to 100
    pub fn normexp_yield(&self) -> Vec<f64> {
        let total: f64 = self.exp_yield.iter().sum();
        self.exp_yield.iter().map(|y| y * 100.0 / total).collect()
    }

    /// lumped yields [gases, liquids, solids] with
    /// gases = light gas, liquids = oil + condensables + water vapor,
    /// solids = char
    pub fn lump_yield(&self) -> [f64; 3] {
        let y = &self.exp_yield;
        [y[2], y[0] + y[1] + y[3], y[4]]
    }

    /// alternative lumping [gases, liquids, solids] with
    /// gases = light gas + condensables + water vapor, liquids = oil,
    /// solids = char
    pub fn lump2_yield(&self) -> [f64; 3] {
        let y = &self.exp_yield;
        [y[2] + y[1] + y[3], y[0], y[4]]
    }

    /// lumped yields computed from the normalized experimental yields
    pub fn normlump_yield(&self) -> [f64; 3] {
        let y = self.normexp_yield();
        [y[2], y[0] + y[1] + y[3], y[4]]
    }

    /// moisture mass fraction on the as-determined basis
    pub fn moisture_frac(&self) -> f64 {
        self.proximate[3] / 100.0
    }

    /// Initial mass fractions for the reactor: the dry structural lumps are
    /// scaled by (1 - ym) and the moisture enters as ACQUA with fraction ym,
    /// so the composition sums to one exactly.
    pub fn inlet_composition(
        &self,
        bc: &BiomassComposition,
    ) -> Result<HashMap<String, f64>, PyroError> {
        let ym = self.moisture_frac();
        if !(0.0..1.0).contains(&ym) {
            return Err(PyroError::Config(format!(
                "feedstock '{}': moisture fraction {} out of range",
                self.name, ym
            )));
        }
        let mut y0: HashMap<String, f64> = bc
            .as_map()
            .into_iter()
            .map(|(sp, y)| (sp, y * (1.0 - ym)))
            .collect();
        y0.insert("ACQUA".to_string(), ym);
        Ok(y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feedstocks::biocomp::{BiocompSplits, biocomp};
    use approx::assert_abs_diff_eq;

    fn stem_wood() -> Feedstock {
        Feedstock {
            name: "Stem wood".to_string(),
            cycle: 1,
            proximate: vec![16.92, 76.40, 0.64, 6.04],
            ultimate: vec![47.69, 6.35, 38.92, 0.31, 0.05, 0.64, 6.04],
            chemical: vec![
                0.0, 0.0, 2.5, 1.2, 0.8, 28.4, 41.2, 8.9, 2.3, 1.1, 10.2, 1.3,
            ],
            exp_yield: vec![53.9, 4.5, 14.6, 10.8, 12.6],
            residence_time: Some(20.0),
            splits: None,
        }
    }

    #[test]
    fn test_prox_bases_sum() {
        let fs = stem_wood();
        assert_abs_diff_eq!(fs.prox_ar().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fs.prox_d().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fs.prox_daf().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
    }

    #[test]
    fn test_ult_bases_sum() {
        let fs = stem_wood();
        assert_abs_diff_eq!(fs.ult_ar().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fs.ult_d().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fs.ult_daf().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fs.ult_cho().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
    }

    #[test]
    fn test_moisture_ar_with_adl() {
        let fs = stem_wood();
        // M_ar = M_ad*(100-ADL)/100 + ADL
        let m_ar = 6.04 * 0.78 + 22.0;
        assert_abs_diff_eq!(fs.prox_ar()[3], m_ar, epsilon = 1e-10);
        assert_abs_diff_eq!(fs.ult_ar()[6], m_ar, epsilon = 1e-10);
    }

    #[test]
    fn test_chem_bases() {
        let fs = stem_wood();
        let daf = fs.chem_daf();
        assert_eq!(daf[0], 0.0);
        assert_eq!(daf[1], 0.0);
        assert_abs_diff_eq!(daf.iter().sum::<f64>(), 100.0, epsilon = 1e-8);
        let bc = fs.chem_bc();
        // cellulose = glucan
        assert_abs_diff_eq!(bc[0], daf[6], epsilon = 1e-12);
        // hemicellulose lumps the minor sugars and acetyl
        assert_abs_diff_eq!(
            bc[1],
            daf[7] + daf[8] + daf[9] + daf[10] + daf[11],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_lump_yields() {
        let fs = stem_wood();
        let lump = fs.lump_yield();
        assert_abs_diff_eq!(lump[0], 14.6, epsilon = 1e-12);
        assert_abs_diff_eq!(lump[1], 53.9 + 4.5 + 10.8, epsilon = 1e-12);
        assert_abs_diff_eq!(lump[2], 12.6, epsilon = 1e-12);
        let lump2 = fs.lump2_yield();
        assert_abs_diff_eq!(lump2[1], 53.9, epsilon = 1e-12);
        // both lumpings conserve the total
        assert_abs_diff_eq!(
            lump.iter().sum::<f64>(),
            lump2.iter().sum::<f64>(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(fs.normlump_yield().iter().sum::<f64>(), 100.0, epsilon = 1e-8);
    }

    #[test]
    fn test_inlet_composition_sums_to_one() {
        let fs = stem_wood();
        let cho = fs.ult_cho();
        let bc = biocomp(cho[0] / 100.0, cho[1] / 100.0, &BiocompSplits::default()).unwrap();
        let y0 = fs.inlet_composition(&bc).unwrap();
        let total: f64 = y0.values().sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y0["ACQUA"], 0.0604, epsilon = 1e-12);
    }
}
