use super::check_pair;
use crate::{Result, Vector};
use std::cmp::Ordering;

/// Pearson correlation coefficient.
///
/// Returns `None` when either vector holds a single distinct value, since the
/// correlation is undefined there.
pub fn pearson(a: &Vector, b: &Vector) -> Result<Option<f64>> {
    check_pair(a, b)?;
    if is_constant(a) || is_constant(b) {
        return Ok(None);
    }

    let mean_a = a.sum() / a.len() as f64;
    let mean_b = b.sum() / b.len() as f64;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    let r = covariance / (variance_a * variance_b).sqrt();
    Ok(Some(r.clamp(-1.0, 1.0)))
}

/// Spearman rank correlation: Pearson correlation of the average-tie ranks.
pub fn spearman(a: &Vector, b: &Vector) -> Result<Option<f64>> {
    check_pair(a, b)?;
    pearson(&rank(a), &rank(b))
}

/// `1 - r`, undefined for constant input.
pub fn pearson_distance(a: &Vector, b: &Vector) -> Result<Option<f64>> {
    Ok(pearson(a, b)?.map(|r| 1.0 - r))
}

/// `1 - rho`, undefined for constant input.
pub fn spearman_distance(a: &Vector, b: &Vector) -> Result<Option<f64>> {
    Ok(spearman(a, b)?.map(|rho| 1.0 - rho))
}

/// One-based ranks; tied values share the average of the ranks they span.
pub fn rank(v: &Vector) -> Vector {
    let mut order: Vec<usize> = (0..v.len()).collect();
    order.sort_by(|&i, &j| v[i].partial_cmp(&v[j]).unwrap_or(Ordering::Equal));

    let mut ranks = Vector::zeros(v.len());
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && v[order[end]] == v[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end.
        let average = (start + 1 + end) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = average;
        }
        start = end;
    }

    ranks
}

fn is_constant(v: &Vector) -> bool {
    v.iter().all(|&x| x == v[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pearson_perfect() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![2.0, 4.0, 6.0];
        let c = array![3.0, 2.0, 1.0];
        assert!((pearson(&a, &b).unwrap().unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &c).unwrap().unwrap() + 1.0).abs() < 1e-12);
        assert!((pearson_distance(&a, &c).unwrap().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_vector_is_undefined() {
        let a = array![0.0, 0.0, 0.0];
        let b = array![1.0, 2.0, 3.0];
        assert_eq!(pearson(&a, &b).unwrap(), None);
        assert_eq!(pearson_distance(&b, &a).unwrap(), None);
        assert_eq!(spearman_distance(&a, &b).unwrap(), None);
    }

    #[test]
    fn test_rank_with_ties() {
        let v = array![10.0, 20.0, 20.0, 30.0];
        assert_eq!(rank(&v), array![1.0, 2.5, 2.5, 4.0]);

        let v = array![3.0, 1.0, 2.0];
        assert_eq!(rank(&v), array![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_spearman_monotonic() {
        let a = array![1.0, 2.0, 3.0, 4.0];
        let b = array![1.0, 4.0, 9.0, 16.0];
        assert!((spearman(&a, &b).unwrap().unwrap() - 1.0).abs() < 1e-12);
        assert!(spearman_distance(&a, &b).unwrap().unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_spearman_with_ties() {
        let a = array![1.0, 2.0, 2.0, 3.0];
        let b = array![1.0, 2.0, 3.0, 4.0];
        let expected = 3.0 / 10.0_f64.sqrt();
        assert!((spearman(&a, &b).unwrap().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = array![1.0, 2.0];
        let b = array![1.0, 2.0, 3.0];
        assert!(pearson(&a, &b).is_err());
        assert!(spearman(&a, &b).is_err());
    }
}
