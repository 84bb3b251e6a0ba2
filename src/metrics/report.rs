use super::{
    bhattacharyya, bray_curtis, canberra, chebyshev, cosine, euclidean, hellinger,
    jensen_shannon_divergence, kullback_leibler, manhattan, minkowski, normalize, overlap,
    pearson_distance, ruzicka, sorensen_dice, spearman_distance, wasserstein_1d,
};
use crate::{Result, Vector};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

const DEFAULT_PRECISION: usize = 8;

/// Every metric of the comparison battery between two vectors `v1` and `v2`.
///
/// Point and series metrics use the raw vectors; probability metrics use
/// `P` and `Q`, the vectors normalized to sum to 1.
#[derive(Clone, Debug, Serialize)]
pub struct MetricReport {
    pub euclidean: f64,
    pub manhattan: f64,
    pub cosine: f64,
    pub bray_curtis: f64,
    pub ruzicka: f64,
    pub jensen_shannon_divergence: f64,
    pub jensen_shannon_distance: f64,
    pub kullback_leibler_pq: f64,
    pub kullback_leibler_qp: f64,
    pub pearson_distance: Option<f64>,
    pub spearman_distance: Option<f64>,
    pub chebyshev: f64,
    pub minkowski_p: f64,
    pub minkowski: f64,
    pub hellinger: f64,
    pub canberra: f64,
    pub wasserstein: f64,
    pub sorensen_dice: f64,
    pub bhattacharyya: f64,
    pub overlap: f64,
}

impl MetricReport {
    pub fn compute(v1: &Vector, v2: &Vector) -> Result<Self> {
        Self::compute_with(v1, v2, 3.0)
    }

    #[instrument(skip(v1, v2), fields(len = v1.len()), err)]
    pub fn compute_with(v1: &Vector, v2: &Vector, minkowski_p: f64) -> Result<Self> {
        let p = normalize(v1);
        let q = normalize(v2);
        let positions = Vector::from_iter((0..p.len()).map(|i| i as f64));

        let jensen_shannon_divergence = jensen_shannon_divergence(&p, &q)?;

        let report = Self {
            euclidean: euclidean(v1, v2)?,
            manhattan: manhattan(v1, v2)?,
            cosine: cosine(v1, v2)?,
            bray_curtis: bray_curtis(v1, v2)?,
            ruzicka: ruzicka(v1, v2)?,
            jensen_shannon_divergence,
            jensen_shannon_distance: jensen_shannon_divergence.sqrt(),
            kullback_leibler_pq: kullback_leibler(&p, &q)?,
            kullback_leibler_qp: kullback_leibler(&q, &p)?,
            pearson_distance: pearson_distance(v1, v2)?,
            spearman_distance: spearman_distance(v1, v2)?,
            chebyshev: chebyshev(v1, v2)?,
            minkowski_p,
            minkowski: minkowski(v1, v2, minkowski_p)?,
            hellinger: hellinger(&p, &q)?,
            canberra: canberra(v1, v2)?,
            wasserstein: if p.sum() == 0.0 || q.sum() == 0.0 {
                f64::NAN
            } else {
                wasserstein_1d(&positions, &p, &q)?
            },
            sorensen_dice: sorensen_dice(v1, v2)?,
            bhattacharyya: bhattacharyya(&p, &q)?,
            overlap: overlap(v1, v2)?,
        };

        debug!(
            hellinger = report.hellinger,
            jensen_shannon = report.jensen_shannon_distance,
            "metric report computed"
        );
        Ok(report)
    }
}

fn undefined_as_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

impl fmt::Display for MetricReport {
    /// Console layout of the battery. The formatter precision sets the number
    /// of decimals, eight by default.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = f.precision().unwrap_or(DEFAULT_PRECISION);

        writeln!(f, "--- Common metrics ---")?;
        writeln!(f, "1. Euclidean distance: {:.n$}", self.euclidean)?;
        writeln!(f, "2. Manhattan distance: {:.n$}", self.manhattan)?;
        writeln!(f, "3. Cosine distance: {:.n$}", self.cosine)?;
        writeln!(f, "4. Bray-Curtis distance: {:.n$}", self.bray_curtis)?;
        writeln!(
            f,
            "5. Ruzicka distance (quantitative Jaccard): {:.n$}",
            self.ruzicka
        )?;
        writeln!(
            f,
            "6. Jensen-Shannon divergence (JSD): {:.n$}",
            self.jensen_shannon_divergence
        )?;
        writeln!(
            f,
            "   Jensen-Shannon distance (sqrt(JSD)): {:.n$}",
            self.jensen_shannon_distance
        )?;
        writeln!(
            f,
            "7. KL divergence KL(P || Q): {:.n$}",
            self.kullback_leibler_pq
        )?;
        writeln!(
            f,
            "   KL divergence KL(Q || P): {:.n$}",
            self.kullback_leibler_qp
        )?;

        writeln!(f)?;
        writeln!(f, "--- Additional metrics ---")?;
        writeln!(
            f,
            "8. Pearson distance (1 - r): {:.n$}",
            undefined_as_nan(self.pearson_distance)
        )?;
        writeln!(
            f,
            "9. Spearman distance (1 - rho): {:.n$}",
            undefined_as_nan(self.spearman_distance)
        )?;
        writeln!(f, "10. Chebyshev distance: {:.n$}", self.chebyshev)?;
        writeln!(
            f,
            "11. Minkowski distance (p={}): {:.n$}",
            self.minkowski_p, self.minkowski
        )?;
        writeln!(f, "12. Hellinger distance (P, Q): {:.n$}", self.hellinger)?;
        writeln!(f, "13. Canberra distance: {:.n$}", self.canberra)?;
        writeln!(
            f,
            "14. Wasserstein distance (1D, P, Q): {:.n$}",
            self.wasserstein
        )?;
        writeln!(
            f,
            "15. Sorensen-Dice distance (quantitative): {:.n$}",
            self.sorensen_dice
        )?;
        writeln!(
            f,
            "   (Check: Sorensen-Dice distance equals Bray-Curtis: {:.n$})",
            self.bray_curtis
        )?;
        writeln!(
            f,
            "16. Bhattacharyya distance (P, Q): {:.n$}",
            self.bhattacharyya
        )?;
        write!(f, "17. Overlap distance: {:.n$}", self.overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use ndarray::array;

    #[test]
    fn test_report_on_simple_profiles() {
        let v1 = array![1.0, 0.0];
        let v2 = array![0.0, 1.0];
        let report = MetricReport::compute(&v1, &v2).unwrap();

        assert!((report.euclidean - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((report.manhattan - 2.0).abs() < 1e-12);
        assert!((report.cosine - 1.0).abs() < 1e-12);
        assert!((report.hellinger - 1.0).abs() < 1e-12);
        assert!((report.wasserstein - 1.0).abs() < 1e-12);
        assert_eq!(report.kullback_leibler_pq, f64::INFINITY);
        assert!((report.pearson_distance.unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_on_fixed_vectors() {
        let report = MetricReport::compute(&datasets::v1(), &datasets::v2()).unwrap();

        assert!((report.sorensen_dice - report.bray_curtis).abs() < 1e-12);
        assert!(
            (report.jensen_shannon_distance.powi(2) - report.jensen_shannon_divergence).abs()
                < 1e-12
        );
        // V2 has zeros where V1 does not, so KL(P || Q) diverges but KL(Q || P) stays finite.
        assert_eq!(report.kullback_leibler_pq, f64::INFINITY);
        assert!(report.kullback_leibler_qp.is_finite());
        assert!(report.kullback_leibler_qp > 0.0);
        assert!((0.0..=1.0).contains(&report.hellinger));
        assert!(report.chebyshev <= report.minkowski + 1e-12);
        assert!(report.minkowski <= report.euclidean + 1e-12);
        assert!(report.euclidean <= report.manhattan + 1e-12);
        assert!(report.pearson_distance.is_some());
        assert!(report.spearman_distance.is_some());
        assert_eq!(report.minkowski_p, 3.0);
    }

    #[test]
    fn test_report_values_on_fixed_vectors() {
        let report = MetricReport::compute(&datasets::v1(), &datasets::v2()).unwrap();

        let close = |actual: f64, expected: f64| (actual - expected).abs() < 1e-8;
        assert!(close(report.euclidean, 0.14332873), "{}", report.euclidean);
        assert!(close(report.canberra, 6.30526612), "{}", report.canberra);
        assert!(
            close(report.spearman_distance.unwrap(), 0.78329518),
            "{:?}",
            report.spearman_distance
        );
        assert!(close(report.wasserstein, 1.55185860), "{}", report.wasserstein);
        assert!(
            close(report.kullback_leibler_qp, 0.62222880),
            "{}",
            report.kullback_leibler_qp
        );
        assert!(close(report.hellinger, 0.45007059), "{}", report.hellinger);
    }

    #[test]
    fn test_report_constant_vector() {
        let v1 = array![2.0, 2.0, 2.0];
        let v2 = array![1.0, 2.0, 3.0];
        let report = MetricReport::compute(&v1, &v2).unwrap();
        assert_eq!(report.pearson_distance, None);
        assert_eq!(report.spearman_distance, None);

        let text = report.to_string();
        assert!(text.contains("8. Pearson distance (1 - r): NaN"));
        assert!(text.contains("9. Spearman distance (1 - rho): NaN"));
    }

    #[test]
    fn test_report_all_zero_vector() {
        let v1 = array![0.0, 0.0, 0.0];
        let v2 = array![1.0, 2.0, 3.0];
        let report = MetricReport::compute(&v1, &v2).unwrap();
        assert_eq!(report.pearson_distance, None);
        assert!(report.wasserstein.is_nan());
        assert!((report.ruzicka - 1.0).abs() < 1e-12);
        assert!((report.sorensen_dice - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_display_layout() {
        let report = MetricReport::compute(&datasets::v1(), &datasets::v2()).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "--- Common metrics ---");
        assert!(lines[1].starts_with("1. Euclidean distance: "));
        assert!(text.contains("11. Minkowski distance (p=3): "));
        assert!(text.contains("   (Check: Sorensen-Dice distance equals Bray-Curtis: "));
        assert!(lines.last().unwrap().starts_with("17. Overlap distance: "));

        // Eight decimals by default.
        let value = lines[1].rsplit(' ').next().unwrap();
        assert_eq!(value.split('.').nth(1).unwrap().len(), 8);

        let short = format!("{:.3}", report);
        let value = short.lines().nth(1).unwrap().rsplit(' ').next().unwrap();
        assert_eq!(value.split('.').nth(1).unwrap().len(), 3);
    }

    #[test]
    fn test_report_dimension_mismatch() {
        let v1 = array![1.0, 2.0];
        let v2 = array![1.0, 2.0, 3.0];
        assert!(MetricReport::compute(&v1, &v2).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let report = MetricReport::compute(&datasets::v1(), &datasets::v2()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["hellinger"].is_number());
        // Non-finite values have no JSON representation.
        assert!(json["kullback_leibler_pq"].is_null());
    }
}
