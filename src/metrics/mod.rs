//! Distance, divergence and correlation metrics between two vectors.
//!
//! This module provides:
//! - point and series distances on raw vectors (`euclidean`, `manhattan`,
//!   `cosine`, `bray_curtis`, `ruzicka`, `chebyshev`, `minkowski`, `canberra`,
//!   `sorensen_dice`, `overlap`)
//! - probability metrics on vectors normalized to sum to 1 (`kullback_leibler`,
//!   `jensen_shannon_divergence`, `hellinger`, `bhattacharyya`, `wasserstein_1d`)
//! - correlation distances (`pearson_distance`, `spearman_distance`)
//! - `Metric`, one named distance for building distance matrices
//! - `MetricReport`, the whole battery computed at once
//!
//! # Examples
//!
//! ```rust
//! use compdist::metrics::{self, Metric};
//! use ndarray::array;
//!
//! let a = array![0.0, 0.0];
//! let b = array![3.0, 4.0];
//! assert!((metrics::euclidean(&a, &b).unwrap() - 5.0).abs() < 1e-12);
//!
//! let p = array![0.5, 0.5];
//! let q = array![0.5, 0.5];
//! assert!(Metric::Hellinger.distance(&p, &q).unwrap().abs() < 1e-12);
//! ```

mod correlation;
mod distance;
mod probability;
mod report;

pub use correlation::{pearson, pearson_distance, rank, spearman, spearman_distance};
pub use distance::{
    bray_curtis, canberra, chebyshev, cosine, euclidean, manhattan, minkowski, overlap, ruzicka,
    sorensen_dice,
};
pub use probability::{
    bhattacharyya, hellinger, jensen_shannon_distance, jensen_shannon_divergence,
    kullback_leibler, normalize, wasserstein_1d,
};
pub use report::MetricReport;

use crate::{Error, Result, Vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;
use std::fmt;

/// A named distance between two vectors, used to build distance matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    // Distance between two points
    Euclidean,
    Manhattan,
    Chebyshev,
    // Distance between two series
    Cosine,
    BrayCurtis,
    Ruzicka,
    Canberra,
    SorensenDice,
    Overlap,
    // Distance between two discrete probability distributions
    Hellinger,
    /// Square root of the base-2 Jensen–Shannon divergence, in `[0, 1]`.
    JensenShannon,
    Bhattacharyya,
    Wasserstein,
    // Correlation distances; constant input is an error
    PearsonCorrelation,
    SpearmanRankCorrelation,
}

impl Metric {
    /// Distance between `a` and `b`. Probability metrics normalize both inputs first.
    pub fn distance(self, a: &Vector, b: &Vector) -> Result<f64> {
        match self {
            Metric::Euclidean => euclidean(a, b),
            Metric::Manhattan => manhattan(a, b),
            Metric::Chebyshev => chebyshev(a, b),
            Metric::Cosine => cosine(a, b),
            Metric::BrayCurtis => bray_curtis(a, b),
            Metric::Ruzicka => ruzicka(a, b),
            Metric::Canberra => canberra(a, b),
            Metric::SorensenDice => sorensen_dice(a, b),
            Metric::Overlap => overlap(a, b),
            Metric::Hellinger => hellinger(&normalize(a), &normalize(b)),
            Metric::JensenShannon => Ok(jensen_shannon_distance(a, b)? / LN_2.sqrt()),
            Metric::Bhattacharyya => bhattacharyya(&normalize(a), &normalize(b)),
            Metric::Wasserstein => {
                let positions = Vector::from_iter((0..a.len()).map(|i| i as f64));
                wasserstein_1d(&positions, &normalize(a), &normalize(b))
            }
            Metric::PearsonCorrelation => {
                pearson_distance(a, b)?.ok_or(Error::UndefinedCorrelation)
            }
            Metric::SpearmanRankCorrelation => {
                spearman_distance(a, b)?.ok_or(Error::UndefinedCorrelation)
            }
        }
    }

    /// Axis caption used when plotting distances of this kind.
    pub fn caption(self) -> &'static str {
        match self {
            Metric::Euclidean => "Euclidean Distance",
            Metric::Manhattan => "Manhattan Distance",
            Metric::Chebyshev => "Chebyshev Distance",
            Metric::Cosine => "Cosine Distance",
            Metric::BrayCurtis => "Bray-Curtis Distance",
            Metric::Ruzicka => "Ruzicka Distance",
            Metric::Canberra => "Canberra Distance",
            Metric::SorensenDice => "Sorensen-Dice Distance",
            Metric::Overlap => "Overlap Distance",
            Metric::Hellinger => "Hellinger Distance",
            Metric::JensenShannon => "Jensen-Shannon Distance",
            Metric::Bhattacharyya => "Bhattacharyya Distance",
            Metric::Wasserstein => "Wasserstein Distance",
            Metric::PearsonCorrelation => "Pearson Distance",
            Metric::SpearmanRankCorrelation => "Spearman Distance",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

/// Checks that two vectors are non-empty and of equal length.
pub(crate) fn check_pair(a: &Vector, b: &Vector) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}
