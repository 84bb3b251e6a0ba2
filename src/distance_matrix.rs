use crate::metrics::Metric;
use crate::{Error, Matrix, Result, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A labeled, symmetric matrix of pairwise distances with a zero diagonal.
///
/// Serialized as `{"labels": [...], "distances": [[...], ...]}`; deserializing
/// runs the same validation as [`DistanceMatrix::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDistanceMatrix", into = "RawDistanceMatrix")]
pub struct DistanceMatrix {
    labels: Vec<String>,
    distances: Matrix,
}

#[derive(Serialize, Deserialize)]
struct RawDistanceMatrix {
    labels: Vec<String>,
    distances: Vec<Vec<f64>>,
}

impl TryFrom<RawDistanceMatrix> for DistanceMatrix {
    type Error = Error;

    fn try_from(raw: RawDistanceMatrix) -> Result<Self> {
        let rows = raw.distances.len();
        let cols = raw.distances.first().map_or(0, Vec::len);
        if let Some(row) = raw.distances.iter().find(|row| row.len() != cols) {
            return Err(Error::NotSquare {
                rows,
                cols: row.len(),
            });
        }
        let flat: Vec<f64> = raw.distances.into_iter().flatten().collect();
        let distances = Matrix::from_shape_vec((rows, cols), flat)
            .map_err(|e| Error::InvalidParameter(e.to_string()))?;
        Self::new(raw.labels, distances)
    }
}

impl From<DistanceMatrix> for RawDistanceMatrix {
    fn from(matrix: DistanceMatrix) -> Self {
        Self {
            labels: matrix.labels,
            distances: matrix.distances.rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

impl DistanceMatrix {
    pub fn new(labels: Vec<String>, distances: Matrix) -> Result<Self> {
        let (rows, cols) = distances.dim();
        if rows == 0 {
            return Err(Error::EmptyInput);
        }
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        if labels.len() != rows {
            return Err(Error::LabelCount {
                expected: rows,
                actual: labels.len(),
            });
        }

        for ((row, col), &value) in distances.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidDistance { row, col, value });
            }
        }
        for index in 0..rows {
            let value = distances[[index, index]];
            if value != 0.0 {
                return Err(Error::NonZeroDiagonal { index, value });
            }
        }
        for row in 0..rows {
            for col in (row + 1)..rows {
                let upper = distances[[row, col]];
                let lower = distances[[col, row]];
                if (upper - lower).abs() > SYMMETRY_TOLERANCE {
                    return Err(Error::NotSymmetric {
                        row,
                        col,
                        upper,
                        lower,
                    });
                }
            }
        }

        Ok(Self { labels, distances })
    }

    /// Rebuilds a matrix from its condensed upper triangle.
    pub fn from_condensed(labels: Vec<String>, condensed: &Vector) -> Result<Self> {
        let n = size_from_condensed(condensed.len())?;
        let mut distances = Matrix::zeros((n, n));
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                distances[[i, j]] = condensed[k];
                distances[[j, i]] = condensed[k];
                k += 1;
            }
        }
        Self::new(labels, distances)
    }

    /// Distances between every pair of rows of `samples` under `metric`.
    pub fn pairwise(labels: Vec<String>, samples: &Matrix, metric: Metric) -> Result<Self> {
        let n = samples.nrows();
        if labels.len() != n {
            return Err(Error::LabelCount {
                expected: n,
                actual: labels.len(),
            });
        }

        let mut distances = Matrix::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let d = metric.distance(&samples.row(i).to_owned(), &samples.row(j).to_owned())?;
                distances[[i, j]] = d;
                distances[[j, i]] = d;
            }
        }
        debug!(samples = n, %metric, "pairwise distances computed");

        Self::new(labels, distances)
    }

    /// Upper triangle, row by row: the condensed form clustering consumes.
    pub fn condensed(&self) -> Vector {
        let n = self.len();
        let mut condensed = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                condensed.push(self.distances[[i, j]]);
            }
        }
        Vector::from(condensed)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.distances
    }
}

fn size_from_condensed(len: usize) -> Result<usize> {
    // n(n - 1)/2 = len
    let n = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    if n * (n - 1) / 2 != len {
        return Err(Error::InvalidCondensedLength { len });
    }
    Ok(n)
}
