use crate::Feedstocks::feedstock::Feedstock;
use crate::error::PyroError;
use log::info;
use prettytable::{Cell, Row, Table, row};

const SUM_TOL: f64 = 1.0;

/// Table of feedstocks loaded from a JSON file: an array of records with
/// keys name, cycle, proximate, ultimate, chemical, yield and the optional
/// residenceTime and splits.
#[derive(Debug, Clone)]
pub struct FeedstockLibrary {
    pub feedstocks: Vec<Feedstock>,
}

impl FeedstockLibrary {
    pub fn from_json_file(file_path: &str) -> Result<Self, PyroError> {
        let content = std::fs::read_to_string(file_path)?;
        let lib = Self::from_json_str(&content)?;
        info!("loaded {} feedstocks from {}", lib.feedstocks.len(), file_path);
        Ok(lib)
    }

    pub fn from_json_str(content: &str) -> Result<Self, PyroError> {
        let feedstocks: Vec<Feedstock> = serde_json::from_str(content)?;
        let lib = FeedstockLibrary { feedstocks };
        lib.validate()?;
        Ok(lib)
    }

    /// Check vector lengths and that the proximate and ultimate analyses sum
    /// to 100 wt. % within a tolerance of 1. The chemical analysis is left to
    /// the daf conversion, which normalizes it.
    pub fn validate(&self) -> Result<(), PyroError> {
        if self.feedstocks.is_empty() {
            return Err(PyroError::Config("feedstock table is empty".to_string()));
        }
        for fs in &self.feedstocks {
            let checks = [
                ("proximate", fs.proximate.len(), 4),
                ("ultimate", fs.ultimate.len(), 7),
                ("chemical", fs.chemical.len(), 12),
                ("yield", fs.exp_yield.len(), 5),
            ];
            for (what, got, want) in checks {
                if got != want {
                    return Err(PyroError::Config(format!(
                        "feedstock '{}': {} analysis must have {} entries, got {}",
                        fs.name, what, want, got
                    )));
                }
            }
            let prox_sum: f64 = fs.proximate.iter().sum();
            if (prox_sum - 100.0).abs() > SUM_TOL {
                return Err(PyroError::Config(format!(
                    "feedstock '{}': proximate analysis sums to {:.2}, expected 100",
                    fs.name, prox_sum
                )));
            }
            let ult_sum: f64 = fs.ultimate.iter().sum();
            if (ult_sum - 100.0).abs() > SUM_TOL {
                return Err(PyroError::Config(format!(
                    "feedstock '{}': ultimate analysis sums to {:.2}, expected 100",
                    fs.name, ult_sum
                )));
            }
            if let Some(rt) = fs.residence_time {
                if rt <= 0.0 {
                    return Err(PyroError::Config(format!(
                        "feedstock '{}': residence time must be positive, got {}",
                        fs.name, rt
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Feedstock, PyroError> {
        self.feedstocks
            .iter()
            .find(|fs| fs.name == name)
            .ok_or_else(|| PyroError::FeedstockNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.feedstocks.iter().map(|fs| fs.name.clone()).collect()
    }

    /// print a summary table of the library
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row![
            "feedstock",
            "cycle",
            "moisture, wt. %",
            "ash, wt. %",
            "residence time, s"
        ]);
        for fs in &self.feedstocks {
            let rt = fs
                .residence_time
                .map(|t| format!("{}", t))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(Row::new(vec![
                Cell::new(&fs.name),
                Cell::new(&fs.cycle.to_string()),
                Cell::new(&format!("{:.2}", fs.proximate[3])),
                Cell::new(&format!("{:.2}", fs.proximate[2])),
                Cell::new(&rt),
            ]));
        }
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TABLE: &str = r#"[
        {
            "name": "Stem wood",
            "cycle": 1,
            "proximate": [16.92, 76.40, 0.64, 6.04],
            "ultimate": [47.69, 6.35, 38.92, 0.31, 0.05, 0.64, 6.04],
            "chemical": [0, 0, 2.5, 1.2, 0.8, 28.4, 41.2, 8.9, 2.3, 1.1, 10.2, 1.3],
            "yield": [53.9, 4.5, 14.6, 10.8, 12.6],
            "residenceTime": 20.0
        },
        {
            "name": "Bark",
            "cycle": 5,
            "proximate": [22.06, 68.17, 1.55, 8.22],
            "ultimate": [50.70, 5.85, 32.62, 0.96, 0.10, 1.55, 8.22],
            "chemical": [0, 0, 6.3, 3.9, 2.7, 37.8, 26.4, 6.1, 2.5, 1.9, 7.2, 0.9],
            "yield": [41.5, 7.9, 17.8, 13.4, 16.9],
            "splits": [0.6, 0.8, 0.8, 0.93, 0.94]
        }
    ]"#;

    #[test]
    fn test_load_and_lookup() {
        let lib = FeedstockLibrary::from_json_str(TABLE).unwrap();
        assert_eq!(lib.names(), vec!["Stem wood", "Bark"]);
        let fs = lib.get("Bark").unwrap();
        assert_eq!(fs.cycle, 5);
        assert_eq!(fs.splits, Some([0.6, 0.8, 0.8, 0.93, 0.94]));
        assert_eq!(lib.get("Stem wood").unwrap().residence_time, Some(20.0));
    }

    #[test]
    fn test_unknown_feedstock() {
        let lib = FeedstockLibrary::from_json_str(TABLE).unwrap();
        let err = lib.get("Switchgrass").unwrap_err();
        assert!(matches!(err, PyroError::FeedstockNotFound(_)));
        assert!(err.to_string().contains("Switchgrass"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let lib = FeedstockLibrary::from_json_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(lib.feedstocks.len(), 2);
    }

    #[test]
    fn test_bad_lengths_rejected() {
        let bad = r#"[{
            "name": "Broken", "cycle": 1,
            "proximate": [16.92, 76.40, 0.64],
            "ultimate": [47.69, 6.35, 38.92, 0.31, 0.05, 0.64, 6.04],
            "chemical": [0, 0, 2.5, 1.2, 0.8, 28.4, 41.2, 8.9, 2.3, 1.1, 10.2, 1.3],
            "yield": [53.9, 4.5, 14.6, 10.8, 12.6]
        }]"#;
        assert!(FeedstockLibrary::from_json_str(bad).is_err());
    }

    #[test]
    fn test_bad_sum_rejected() {
        let bad = r#"[{
            "name": "Broken", "cycle": 1,
            "proximate": [16.92, 60.40, 0.64, 6.04],
            "ultimate": [47.69, 6.35, 38.92, 0.31, 0.05, 0.64, 6.04],
            "chemical": [0, 0, 2.5, 1.2, 0.8, 28.4, 41.2, 8.9, 2.3, 1.1, 10.2, 1.3],
            "yield": [53.9, 4.5, 14.6, 10.8, 12.6]
        }]"#;
        let err = FeedstockLibrary::from_json_str(bad).unwrap_err();
        assert!(err.to_string().contains("proximate"));
    }
}
