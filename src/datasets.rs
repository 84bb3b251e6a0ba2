//! Hardcoded inputs: Hellinger distance matrices between lipid composition
//! profiles, and the two 12-element vectors compared by the metric battery.

use crate::{DistanceMatrix, Error, Matrix, Result, Vector};
use ndarray::{Axis, array};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const SN123_LABELS: [&str; 5] = [
    "C-108(-N)",
    "C-1210(-N)",
    "C-1540(-N)",
    "H-626(-N)",
    "P-519(-N)",
];

pub const CULTIVAR_LABELS: [&str; 6] = [
    "Commodity",
    "High linoleic",
    "High oleic",
    "High palmitic, high linoleic",
    "High palmitic, high oleic",
    "High stearic, high oleic",
];

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 3] = ["sn123", "sn2", "cultivar"];

/// Hellinger distances over all three stereospecific positions (SN-1,2,3).
pub fn sn123_hellinger() -> Result<DistanceMatrix> {
    DistanceMatrix::new(
        labels(&SN123_LABELS),
        array![
            [0.00, 0.23, 0.76, 0.09, 0.63],
            [0.23, 0.00, 0.76, 0.21, 0.54],
            [0.76, 0.76, 0.00, 0.76, 0.45],
            [0.09, 0.21, 0.76, 0.00, 0.62],
            [0.63, 0.54, 0.45, 0.62, 0.00]
        ],
    )
}

/// Hellinger distances over the SN-2 position of the same samples.
pub fn sn2_hellinger() -> Result<DistanceMatrix> {
    DistanceMatrix::new(
        labels(&SN123_LABELS),
        array![
            [0.00, 0.19, 0.67, 0.18, 0.55],
            [0.19, 0.00, 0.65, 0.28, 0.56],
            [0.67, 0.65, 0.00, 0.68, 0.47],
            [0.18, 0.28, 0.68, 0.00, 0.64],
            [0.55, 0.56, 0.47, 0.64, 0.00]
        ],
    )
}

/// Hellinger distances between six oil cultivar types.
pub fn cultivar_hellinger() -> Result<DistanceMatrix> {
    DistanceMatrix::new(
        labels(&CULTIVAR_LABELS),
        array![
            [0.00, 0.11, 0.57, 0.10, 0.54, 0.60],
            [0.11, 0.00, 0.66, 0.08, 0.63, 0.69],
            [0.57, 0.66, 0.00, 0.61, 0.08, 0.05],
            [0.10, 0.08, 0.61, 0.00, 0.57, 0.64],
            [0.54, 0.63, 0.08, 0.57, 0.00, 0.12],
            [0.60, 0.69, 0.05, 0.64, 0.12, 0.00]
        ],
    )
}

/// Looks a built-in matrix up by one of [`NAMES`].
pub fn by_name(name: &str) -> Result<DistanceMatrix> {
    match name {
        "sn123" => sn123_hellinger(),
        "sn2" => sn2_hellinger(),
        "cultivar" => cultivar_hellinger(),
        _ => Err(Error::UnknownDataset(name.to_string())),
    }
}

pub fn v1() -> Vector {
    array![
        0.1198055983238628,
        0.0727300729892217,
        0.0499022428173454,
        0.0443879566965991,
        0.0443879566965991,
        0.0269464814295164,
        0.0269464814295163,
        0.0247729944722792,
        0.0206206059665666,
        0.0184887736819416,
        0.0184887736819416,
        0.0170646753664717,
    ]
}

pub fn v2() -> Vector {
    array![
        0.0093656129768072,
        0.0081983602624436,
        0.0,
        0.0326341345095416,
        0.0326341345095416,
        0.0285668852882148,
        0.0285668852882148,
        0.0,
        0.0,
        0.0055251720624557,
        0.0055251720624557,
        0.0111501098330910,
    ]
}

/// `n_samples` random composition profiles over `n_features` components,
/// each row summing to 1. The same seed always yields the same profiles.
pub fn random_profiles(n_samples: usize, n_features: usize, seed: u64) -> Result<Matrix> {
    if n_samples == 0 || n_features == 0 {
        return Err(Error::EmptyInput);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut profiles = Matrix::random_using(
        (n_samples, n_features),
        Uniform::new(0.01, 1.0),
        &mut rng,
    );
    for mut row in profiles.axis_iter_mut(Axis(0)) {
        let sum = row.sum();
        row /= sum;
    }
    Ok(profiles)
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matrices_are_valid() {
        assert_eq!(sn123_hellinger().unwrap().len(), 5);
        assert_eq!(sn2_hellinger().unwrap().len(), 5);
        assert_eq!(cultivar_hellinger().unwrap().len(), 6);
    }

    #[test]
    fn test_by_name() {
        for name in NAMES {
            assert!(by_name(name).is_ok());
        }
        assert!(matches!(by_name("nope"), Err(Error::UnknownDataset(_))));
    }

    #[test]
    fn test_vectors() {
        assert_eq!(v1().len(), 12);
        assert_eq!(v2().len(), 12);
        assert!(v1().iter().all(|&x| x > 0.0));
        assert_eq!(v2().iter().filter(|&&x| x == 0.0).count(), 3);
    }

    #[test]
    fn test_random_profiles() {
        let profiles = random_profiles(4, 7, 42).unwrap();
        assert_eq!(profiles.shape(), &[4, 7]);
        for row in profiles.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
            assert!(row.iter().all(|&x| x > 0.0));
        }

        let again = random_profiles(4, 7, 42).unwrap();
        assert_eq!(profiles, again);
    }

    #[test]
    fn test_random_profiles_empty() {
        assert!(random_profiles(0, 3, 1).is_err());
        assert!(random_profiles(3, 0, 1).is_err());
    }
}
