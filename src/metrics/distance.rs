use super::check_pair;
use crate::{Error, Result, Vector};

pub fn euclidean(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

/// City block distance.
pub fn manhattan(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum())
}

pub fn chebyshev(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max))
}

/// Minkowski distance of order `p`. Orders below 1 are not metrics and are rejected.
pub fn minkowski(a: &Vector, b: &Vector, p: f64) -> Result<f64> {
    check_pair(a, b)?;
    if !(p >= 1.0) {
        return Err(Error::InvalidParameter(format!(
            "Minkowski order must be >= 1, got {}",
            p
        )));
    }
    if p.is_infinite() {
        return chebyshev(a, b);
    }

    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum();
    Ok(sum.powf(1.0 / p))
}

/// One minus the cosine of the angle between `a` and `b`.
///
/// Lies in `[0, 2]`. Undefined for a zero vector, in which case the result is NaN.
pub fn cosine(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    let dot = a.dot(b);
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    Ok((1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0))
}

pub fn bray_curtis(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    let numerator: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
    let denominator: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x + y).abs()).sum();
    Ok(numerator / denominator)
}

/// Sum over `|a - b| / (|a| + |b|)`. Terms where both coordinates are zero contribute nothing.
pub fn canberra(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let denominator = x.abs() + y.abs();
            if denominator == 0.0 {
                0.0
            } else {
                (x - y).abs() / denominator
            }
        })
        .sum())
}

/// Ruzicka distance, the quantitative Jaccard distance: `1 - Σmin / Σmax`.
pub fn ruzicka(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    let (sum_min, sum_max) = a
        .iter()
        .zip(b.iter())
        .fold((0.0, 0.0), |(min, max), (x, y)| (min + x.min(*y), max + x.max(*y)));
    Ok(1.0 - similarity(sum_min, sum_max))
}

/// Quantitative Sørensen–Dice distance: `1 - 2Σmin / (Σa + Σb)`.
///
/// On non-negative input this equals the Bray–Curtis distance, since
/// `Σ|a - b| = Σ(a + b) - 2Σmin(a, b)`.
pub fn sorensen_dice(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    let sum_min: f64 = a.iter().zip(b.iter()).map(|(x, y)| x.min(*y)).sum();
    Ok(1.0 - similarity(2.0 * sum_min, a.sum() + b.sum()))
}

/// Overlap (Szymkiewicz–Simpson) distance: `1 - Σmin / min(Σa, Σb)`.
pub fn overlap(a: &Vector, b: &Vector) -> Result<f64> {
    check_pair(a, b)?;
    let sum_min: f64 = a.iter().zip(b.iter()).map(|(x, y)| x.min(*y)).sum();
    Ok(1.0 - similarity(sum_min, a.sum().min(b.sum())))
}

// Two empty profiles are identical; an empty one against a non-empty one shares nothing.
fn similarity(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 { 1.0 } else { 0.0 }
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_euclidean() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert!((euclidean(&a, &b).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_manhattan_and_chebyshev() {
        let a = array![1.0, -2.0, 3.0];
        let b = array![4.0, 0.0, 3.5];
        assert!((manhattan(&a, &b).unwrap() - 5.5).abs() < 1e-12);
        assert!((chebyshev(&a, &b).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_minkowski_orders() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert!((minkowski(&a, &b, 1.0).unwrap() - 7.0).abs() < 1e-12);
        assert!((minkowski(&a, &b, 2.0).unwrap() - 5.0).abs() < 1e-12);
        let expected = (27.0_f64 + 64.0).powf(1.0 / 3.0);
        assert!((minkowski(&a, &b, 3.0).unwrap() - expected).abs() < 1e-12);
        assert!((minkowski(&a, &b, f64::INFINITY).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_minkowski_invalid_order() {
        let a = array![1.0];
        assert!(matches!(
            minkowski(&a, &a, 0.5),
            Err(Error::InvalidParameter(_))
        ));
        assert!(minkowski(&a, &a, f64::NAN).is_err());
    }

    #[test]
    fn test_cosine() {
        let a = array![1.0, 0.0];
        let b = array![0.0, 1.0];
        assert!((cosine(&a, &b).unwrap() - 1.0).abs() < 1e-12);
        assert!(cosine(&a, &a).unwrap().abs() < 1e-12);

        let c = array![-1.0, 0.0];
        assert!((cosine(&a, &c).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_stays_in_range() {
        let a = array![0.1198, 0.0727, 0.0499, 0.0444, 0.0269, 0.0185];
        for scale in [1.0, 3.0, 1e-3, 7.7] {
            let d = cosine(&a, &(&a * scale)).unwrap();
            assert!((0.0..1e-12).contains(&d), "{d}");
            let d = cosine(&a, &(&a * -scale)).unwrap();
            assert!(d <= 2.0 && d > 2.0 - 1e-12, "{d}");
        }
    }

    #[test]
    fn test_cosine_zero_vector_is_nan() {
        let a = array![0.0, 0.0];
        let b = array![1.0, 2.0];
        assert!(cosine(&a, &b).unwrap().is_nan());
    }

    #[test]
    fn test_bray_curtis() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![3.0, 2.0, 1.0];
        // |−2| + 0 + |2| over 4 + 4 + 4
        assert!((bray_curtis(&a, &b).unwrap() - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_canberra_skips_double_zero() {
        let a = array![0.0, 1.0, 2.0];
        let b = array![0.0, 3.0, 2.0];
        // 0 + 2/4 + 0
        assert!((canberra(&a, &b).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ruzicka() {
        let a = array![1.0, 2.0, 0.0];
        let b = array![2.0, 1.0, 1.0];
        // Σmin = 2, Σmax = 5
        assert!((ruzicka(&a, &b).unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_profiles_fallback() {
        let zeros = array![0.0, 0.0];
        let ones = array![1.0, 1.0];
        assert_eq!(ruzicka(&zeros, &zeros).unwrap(), 0.0);
        assert_eq!(sorensen_dice(&zeros, &zeros).unwrap(), 0.0);
        assert_eq!(ruzicka(&zeros, &ones).unwrap(), 1.0);
        assert_eq!(sorensen_dice(&zeros, &ones).unwrap(), 1.0);
        assert_eq!(overlap(&zeros, &ones).unwrap(), 0.0);
    }

    #[test]
    fn test_sorensen_dice_equals_bray_curtis() {
        let a = array![0.12, 0.07, 0.05, 0.0, 0.3];
        let b = array![0.01, 0.0, 0.2, 0.03, 0.3];
        let dice = sorensen_dice(&a, &b).unwrap();
        let bray = bray_curtis(&a, &b).unwrap();
        assert!((dice - bray).abs() < 1e-12);
    }

    #[test]
    fn test_overlap_subset_is_zero() {
        let a = array![0.2, 0.1, 0.0];
        let b = array![0.4, 0.3, 0.3];
        assert!(overlap(&a, &b).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = array![1.0, 2.0];
        let b = array![1.0, 2.0, 3.0];
        assert!(euclidean(&a, &b).is_err());
        assert!(canberra(&a, &b).is_err());
        assert!(sorensen_dice(&a, &b).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Non-negative profile values, the kind of data these metrics are used on.
    fn profile_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..24).prop_flat_map(|len| {
            (
                prop::collection::vec(0.0_f64..100.0, len),
                prop::collection::vec(0.0_f64..100.0, len),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn distances_are_symmetric((a, b) in profile_pair()) {
            let (a, b) = (Vector::from(a), Vector::from(b));
            let pairs = [
                (euclidean(&a, &b).unwrap(), euclidean(&b, &a).unwrap()),
                (manhattan(&a, &b).unwrap(), manhattan(&b, &a).unwrap()),
                (chebyshev(&a, &b).unwrap(), chebyshev(&b, &a).unwrap()),
                (canberra(&a, &b).unwrap(), canberra(&b, &a).unwrap()),
                (ruzicka(&a, &b).unwrap(), ruzicka(&b, &a).unwrap()),
            ];
            for (ab, ba) in pairs {
                prop_assert!((ab - ba).abs() <= 1e-9 * ab.abs().max(1.0), "{ab} != {ba}");
            }
        }

        #[test]
        fn distances_are_non_negative((a, b) in profile_pair()) {
            let (a, b) = (Vector::from(a), Vector::from(b));
            prop_assert!(euclidean(&a, &b).unwrap() >= 0.0);
            prop_assert!(manhattan(&a, &b).unwrap() >= 0.0);
            prop_assert!(minkowski(&a, &b, 3.0).unwrap() >= 0.0);
            prop_assert!(canberra(&a, &b).unwrap() >= 0.0);
            prop_assert!(ruzicka(&a, &b).unwrap() >= -1e-12);
        }

        #[test]
        fn sorensen_dice_matches_bray_curtis((a, b) in profile_pair()) {
            let (a, b) = (Vector::from(a), Vector::from(b));
            prop_assume!(a.sum() + b.sum() > 0.0);
            let dice = sorensen_dice(&a, &b).unwrap();
            let bray = bray_curtis(&a, &b).unwrap();
            prop_assert!((dice - bray).abs() < 1e-9, "dice={dice}, bray={bray}");
        }

        #[test]
        fn minkowski_is_bounded_by_its_neighbours((a, b) in profile_pair()) {
            let (a, b) = (Vector::from(a), Vector::from(b));
            let l1 = manhattan(&a, &b).unwrap();
            let l3 = minkowski(&a, &b, 3.0).unwrap();
            let linf = chebyshev(&a, &b).unwrap();
            prop_assert!(l3 <= l1 + 1e-9);
            prop_assert!(linf <= l3 + 1e-9);
        }
    }
}
