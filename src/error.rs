use thiserror::Error;

/// Errors from metric computation, distance matrix validation and clustering.
#[derive(Debug, Error)]
pub enum Error {
    /// Two inputs that must line up have different lengths.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty input provided")]
    EmptyInput,

    #[error("Distance matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Distance matrix is not symmetric at ({row}, {col}): {upper} != {lower}")]
    NotSymmetric {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    #[error("Distance matrix diagonal must be zero, got {value} at index {index}")]
    NonZeroDiagonal { index: usize, value: f64 },

    /// Negative, NaN or infinite entry.
    #[error("Invalid distance {value} at ({row}, {col})")]
    InvalidDistance { row: usize, col: usize, value: f64 },

    #[error("Expected {expected} labels, got {actual}")]
    LabelCount { expected: usize, actual: usize },

    #[error("Condensed distance vector of length {len} does not describe a square matrix")]
    InvalidCondensedLength { len: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// A correlation distance was requested for a constant vector.
    #[error("Correlation is undefined for a constant vector")]
    UndefinedCorrelation,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::DimensionMismatch {
            expected: 12,
            actual: 11,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 12, got 11");

        let err = Error::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "Distance matrix must be square, got 2x3");
    }

    #[test]
    fn test_io_error_converts() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }

        assert!(matches!(read_missing(), Err(Error::Io(_))));
    }
}
