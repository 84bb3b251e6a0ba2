pub use ndarray::{Array1, Array2};

pub mod cluster;
pub mod config;
pub mod datasets;
pub mod distance_matrix;
pub mod error;
pub mod metrics;

pub use cluster::{
    AgglomerativeClustering, Dendrogram, DistanceSort, Figure, Linkage, LinkageMatrix, Merge,
    Panel,
};
pub use config::Config;
pub use distance_matrix::DistanceMatrix;
pub use error::{Error, Result};
pub use metrics::{Metric, MetricReport};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
