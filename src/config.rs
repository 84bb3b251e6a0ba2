//! Run configuration, read from a JSON file.
//!
//! Every field has a default, so `{}` is a valid file and the defaults
//! reproduce the SN-1,2,3 three-panel figure and the V1/V2 metric report.

use crate::cluster::{DistanceSort, Linkage};
use crate::{Error, Result, datasets};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dendrogram: DendrogramConfig,
    pub metrics: MetricsConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DendrogramConfig {
    /// One of [`datasets::NAMES`].
    pub dataset: String,
    /// One panel per linkage, left to right.
    pub linkages: Vec<Linkage>,
    pub distance_sort: DistanceSort,
    pub y_label: String,
    pub output: PathBuf,
}

impl Default for DendrogramConfig {
    fn default() -> Self {
        Self {
            dataset: "sn123".to_string(),
            linkages: vec![Linkage::Single, Linkage::Complete, Linkage::Average],
            distance_sort: DistanceSort::Descending,
            y_label: "Hellinger Distance".to_string(),
            output: PathBuf::from("dendrogram.svg"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub minkowski_p: f64,
    /// Decimal places in the printed report.
    pub precision: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            minkowski_p: 3.0,
            precision: 8,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !datasets::NAMES.contains(&self.dendrogram.dataset.as_str()) {
            return Err(Error::UnknownDataset(self.dendrogram.dataset.clone()));
        }
        if self.dendrogram.linkages.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one linkage is required".to_string(),
            ));
        }
        if self.metrics.minkowski_p.is_nan() || self.metrics.minkowski_p < 1.0 {
            return Err(Error::InvalidParameter(format!(
                "minkowski_p must be >= 1, got {}",
                self.metrics.minkowski_p
            )));
        }
        Ok(())
    }
}
