//! Metrics between discrete probability distributions.
//!
//! `kullback_leibler` and `jensen_shannon_divergence` normalize their inputs
//! to sum to 1 and use the natural log. `hellinger` and `bhattacharyya` take
//! distributions as given, so callers normalize first.

use super::check_pair;
use crate::{Error, Result, Vector};
use std::f64::consts::FRAC_1_SQRT_2;

/// Scales `v` to sum to 1. A vector summing to zero maps to all zeros.
pub fn normalize(v: &Vector) -> Vector {
    let sum = v.sum();
    if sum != 0.0 {
        v / sum
    } else {
        Vector::zeros(v.len())
    }
}

/// Elementwise relative entropy `p ln(p / q)`.
fn relative_entropy(p: f64, q: f64) -> f64 {
    if p > 0.0 && q > 0.0 {
        p * (p / q).ln()
    } else if p == 0.0 && q >= 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

/// Kullback–Leibler divergence `KL(p || q)` in nats.
///
/// Infinite when `q` is zero somewhere `p` is not.
pub fn kullback_leibler(p: &Vector, q: &Vector) -> Result<f64> {
    check_pair(p, q)?;
    let (p, q) = (normalize(p), normalize(q));
    Ok(p.iter()
        .zip(q.iter())
        .map(|(&pi, &qi)| relative_entropy(pi, qi))
        .sum())
}

/// Jensen–Shannon divergence in nats, bounded by `ln 2`.
pub fn jensen_shannon_divergence(p: &Vector, q: &Vector) -> Result<f64> {
    check_pair(p, q)?;
    let (p, q) = (normalize(p), normalize(q));
    let m = (&p + &q) / 2.0;
    let left: f64 = p
        .iter()
        .zip(m.iter())
        .map(|(&pi, &mi)| relative_entropy(pi, mi))
        .sum();
    let right: f64 = q
        .iter()
        .zip(m.iter())
        .map(|(&qi, &mi)| relative_entropy(qi, mi))
        .sum();
    // Rounding can leave a tiny negative on identical inputs.
    Ok(((left + right) / 2.0).max(0.0))
}

/// Square root of the Jensen–Shannon divergence.
pub fn jensen_shannon_distance(p: &Vector, q: &Vector) -> Result<f64> {
    Ok(jensen_shannon_divergence(p, q)?.sqrt())
}

pub fn hellinger(p: &Vector, q: &Vector) -> Result<f64> {
    check_pair(p, q)?;
    let sum: f64 = p
        .iter()
        .zip(q.iter())
        .map(|(pi, qi)| (pi.sqrt() - qi.sqrt()).powi(2))
        .sum();
    Ok(FRAC_1_SQRT_2 * sum.sqrt())
}

/// Bhattacharyya distance `-ln Σ√(pq)`. Infinite for disjoint supports.
pub fn bhattacharyya(p: &Vector, q: &Vector) -> Result<f64> {
    check_pair(p, q)?;
    let coefficient: f64 = p.iter().zip(q.iter()).map(|(pi, qi)| (pi * qi).sqrt()).sum();
    Ok((-coefficient.ln()).max(0.0))
}

/// First Wasserstein (earth mover's) distance between two weighted
/// distributions placed on the same `positions`.
///
/// Weights are normalized; they must be non-negative with a positive sum.
pub fn wasserstein_1d(positions: &Vector, u_weights: &Vector, v_weights: &Vector) -> Result<f64> {
    check_pair(positions, u_weights)?;
    check_pair(positions, v_weights)?;

    let u_total = checked_total(u_weights)?;
    let v_total = checked_total(v_weights)?;

    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|&i, &j| positions[i].total_cmp(&positions[j]));

    let mut u_cdf = 0.0;
    let mut v_cdf = 0.0;
    let mut distance = 0.0;
    for window in order.windows(2) {
        let (current, next) = (window[0], window[1]);
        u_cdf += u_weights[current] / u_total;
        v_cdf += v_weights[current] / v_total;
        distance += (u_cdf - v_cdf).abs() * (positions[next] - positions[current]);
    }

    Ok(distance)
}

fn checked_total(weights: &Vector) -> Result<f64> {
    if let Some(negative) = weights.iter().find(|w| !(**w >= 0.0) || !w.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "weights must be finite and non-negative, got {}",
            negative
        )));
    }
    let total = weights.sum();
    if total <= 0.0 {
        return Err(Error::InvalidParameter(
            "weights must have a positive sum".to_string(),
        ));
    }
    Ok(total)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::LN_2;

    fn distribution_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (2usize..16).prop_flat_map(|len| {
            (
                prop::collection::vec(0.001_f64..1.0, len),
                prop::collection::vec(0.001_f64..1.0, len),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn jensen_shannon_is_bounded_and_symmetric((p, q) in distribution_pair()) {
            let (p, q) = (Vector::from(p), Vector::from(q));
            let pq = jensen_shannon_divergence(&p, &q).unwrap();
            let qp = jensen_shannon_divergence(&q, &p).unwrap();
            prop_assert!(pq >= 0.0 && pq <= LN_2 + 1e-12);
            prop_assert!((pq - qp).abs() < 1e-12);
        }

        #[test]
        fn hellinger_is_bounded((p, q) in distribution_pair()) {
            let (p, q) = (normalize(&Vector::from(p)), normalize(&Vector::from(q)));
            let h = hellinger(&p, &q).unwrap();
            prop_assert!((0.0..=1.0 + 1e-12).contains(&h), "hellinger = {h}");
        }

        #[test]
        fn kullback_leibler_is_non_negative((p, q) in distribution_pair()) {
            let (p, q) = (Vector::from(p), Vector::from(q));
            prop_assert!(kullback_leibler(&p, &q).unwrap() >= -1e-12);
        }
    }
}
