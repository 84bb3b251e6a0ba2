use crate::metrics::pearson;
use crate::{DistanceMatrix, Error, Matrix, Result, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// How the distance between a merged cluster and every other cluster is
/// derived from the distances of its two parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Nearest neighbour.
    Single,
    /// Farthest neighbour.
    Complete,
    /// UPGMA: mean over all cross-cluster pairs.
    Average,
    /// WPGMA: mean of the two parts' distances.
    Weighted,
    /// Minimum variance. Assumes Euclidean input distances.
    Ward,
}

impl Linkage {
    pub fn name(self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::Weighted => "weighted",
            Linkage::Ward => "ward",
        }
    }

    /// Lance–Williams update: distance from `a ∪ b` to `k`.
    fn update(self, d_ak: f64, d_bk: f64, d_ab: f64, n_a: usize, n_b: usize, n_k: usize) -> f64 {
        let (n_a, n_b, n_k) = (n_a as f64, n_b as f64, n_k as f64);
        match self {
            Linkage::Single => d_ak.min(d_bk),
            Linkage::Complete => d_ak.max(d_bk),
            Linkage::Average => (n_a * d_ak + n_b * d_bk) / (n_a + n_b),
            Linkage::Weighted => (d_ak + d_bk) / 2.0,
            Linkage::Ward => {
                let squared = (n_a + n_k) * d_ak * d_ak + (n_b + n_k) * d_bk * d_bk
                    - n_k * d_ab * d_ab;
                (squared / (n_a + n_b + n_k)).max(0.0).sqrt()
            }
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One agglomeration step. Leaves are ids `0..n`; the merge in row `i`
/// creates cluster `n + i`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

/// The full merge history of a clustering, in order of non-decreasing distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkageMatrix {
    n_leaves: usize,
    merges: Vec<Merge>,
}

impl LinkageMatrix {
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Merge that created cluster `id`, or `None` for a leaf.
    pub fn merge(&self, id: usize) -> Option<&Merge> {
        id.checked_sub(self.n_leaves)
            .and_then(|row| self.merges.get(row))
    }

    /// Height of cluster `id` in the tree; leaves sit at zero.
    pub fn height(&self, id: usize) -> f64 {
        self.merge(id).map_or(0.0, |merge| merge.distance)
    }

    /// Id of the root cluster.
    pub fn root(&self) -> usize {
        self.n_leaves + self.merges.len() - 1
    }

    /// `(n - 1) x 4` matrix of `[left, right, distance, size]` rows.
    pub fn to_matrix(&self) -> Matrix {
        let mut matrix = Matrix::zeros((self.merges.len(), 4));
        for (i, merge) in self.merges.iter().enumerate() {
            matrix[[i, 0]] = merge.left as f64;
            matrix[[i, 1]] = merge.right as f64;
            matrix[[i, 2]] = merge.distance;
            matrix[[i, 3]] = merge.size as f64;
        }
        matrix
    }

    /// Flat clustering into exactly `n_clusters` groups by undoing the last merges.
    ///
    /// Labels are numbered from 0 in order of each group's first leaf.
    pub fn cut_clusters(&self, n_clusters: usize) -> Result<Vec<usize>> {
        if n_clusters == 0 || n_clusters > self.n_leaves {
            return Err(Error::InvalidParameter(format!(
                "n_clusters must be between 1 and {}, got {}",
                self.n_leaves, n_clusters
            )));
        }
        Ok(self.flat_labels(self.n_leaves - n_clusters))
    }

    /// Flat clustering keeping every merge at or below `threshold`.
    pub fn cut_distance(&self, threshold: f64) -> Vec<usize> {
        let applied = self
            .merges
            .iter()
            .take_while(|merge| merge.distance <= threshold)
            .count();
        self.flat_labels(applied)
    }

    fn flat_labels(&self, applied: usize) -> Vec<usize> {
        let mut owner: Vec<usize> = (0..self.n_leaves + self.merges.len()).collect();
        for (row, merge) in self.merges.iter().take(applied).enumerate() {
            let id = self.n_leaves + row;
            owner[merge.left] = id;
            owner[merge.right] = id;
        }

        let find = |mut id: usize| {
            while owner[id] != id {
                id = owner[id];
            }
            id
        };

        let mut roots: Vec<usize> = Vec::new();
        (0..self.n_leaves)
            .map(|leaf| {
                let root = find(leaf);
                match roots.iter().position(|&r| r == root) {
                    Some(label) => label,
                    None => {
                        roots.push(root);
                        roots.len() - 1
                    }
                }
            })
            .collect()
    }

    /// Leaves under cluster `id`.
    pub fn members(&self, id: usize) -> Vec<usize> {
        let mut members = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match self.merge(id) {
                Some(merge) => {
                    stack.push(merge.right);
                    stack.push(merge.left);
                }
                None => members.push(id),
            }
        }
        members
    }

    /// Cophenetic distances: the height at which each pair of leaves first joins.
    pub fn cophenetic(&self) -> Matrix {
        let n = self.n_leaves;
        let mut cophenetic = Matrix::zeros((n, n));
        for merge in &self.merges {
            let left = self.members(merge.left);
            let right = self.members(merge.right);
            for &i in &left {
                for &j in &right {
                    cophenetic[[i, j]] = merge.distance;
                    cophenetic[[j, i]] = merge.distance;
                }
            }
        }
        cophenetic
    }

    /// Pearson correlation between the input distances and the cophenetic
    /// distances, a measure of how faithfully the tree preserves them.
    ///
    /// `None` when the correlation is undefined, including a single-leaf tree.
    pub fn cophenetic_correlation(&self, distances: &DistanceMatrix) -> Result<Option<f64>> {
        if distances.len() != self.n_leaves {
            return Err(Error::DimensionMismatch {
                expected: self.n_leaves,
                actual: distances.len(),
            });
        }
        if self.n_leaves < 2 {
            return Ok(None);
        }
        let cophenetic = self.cophenetic();
        let n = self.n_leaves;
        let condensed: Vector = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| cophenetic[[i, j]])
            .collect();
        pearson(&distances.condensed(), &condensed)
    }
}

impl fmt::Display for LinkageMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        writeln!(f, "{:>5} {:>5} {:>10} {:>5}", "left", "right", "distance", "size")?;
        for merge in &self.merges {
            writeln!(
                f,
                "{:>5} {:>5} {:>10.precision$} {:>5}",
                merge.left, merge.right, merge.distance, merge.size
            )?;
        }
        Ok(())
    }
}

/// Agglomerative hierarchical clustering over a precomputed distance matrix.
#[derive(Clone, Debug)]
pub struct AgglomerativeClustering {
    pub linkage_matrix: Option<LinkageMatrix>,
    pub labels: Option<Vec<usize>>,
    linkage: Linkage,
    n_clusters: usize,
}

impl AgglomerativeClustering {
    pub fn new(linkage: Linkage) -> Self {
        Self {
            linkage_matrix: None,
            labels: None,
            linkage,
            n_clusters: 2,
        }
    }

    /// Number of flat clusters reported in `labels` after fitting.
    pub fn n_clusters(mut self, n_clusters: usize) -> Self {
        if n_clusters == 0 {
            panic!("n_clusters must be > 0, got {}", n_clusters);
        }
        self.n_clusters = n_clusters;
        self
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    #[instrument(skip(self, distances), fields(linkage = %self.linkage, n = distances.len()), err)]
    pub fn fit(&mut self, distances: &DistanceMatrix) -> Result<()> {
        let n = distances.len();
        if n < self.n_clusters {
            return Err(Error::InvalidParameter(format!(
                "n_samples={} should be >= n_clusters={}",
                n, self.n_clusters
            )));
        }

        let mut d = distances.as_matrix().clone();
        let mut active = vec![true; n];
        let mut ids: Vec<usize> = (0..n).collect();
        let mut sizes = vec![1usize; n];
        let mut merges = Vec::with_capacity(n.saturating_sub(1));

        for step in 0..n.saturating_sub(1) {
            // Closest active pair; the first one in row-major order wins ties.
            let mut best = (0, 0, f64::INFINITY);
            for i in (0..n).filter(|&i| active[i]) {
                for j in ((i + 1)..n).filter(|&j| active[j]) {
                    if d[[i, j]] < best.2 {
                        best = (i, j, d[[i, j]]);
                    }
                }
            }
            let (a, b, distance) = best;

            let merge = Merge {
                left: ids[a].min(ids[b]),
                right: ids[a].max(ids[b]),
                distance,
                size: sizes[a] + sizes[b],
            };
            debug!(
                step,
                left = merge.left,
                right = merge.right,
                distance,
                size = merge.size,
                "merged clusters"
            );
            merges.push(merge);

            for k in (0..n).filter(|&k| active[k] && k != a && k != b) {
                let updated =
                    self.linkage
                        .update(d[[a, k]], d[[b, k]], distance, sizes[a], sizes[b], sizes[k]);
                d[[a, k]] = updated;
                d[[k, a]] = updated;
            }

            active[b] = false;
            sizes[a] += sizes[b];
            ids[a] = n + step;
        }

        let linkage_matrix = LinkageMatrix {
            n_leaves: n,
            merges,
        };
        self.labels = Some(linkage_matrix.cut_clusters(self.n_clusters)?);
        self.linkage_matrix = Some(linkage_matrix);

        Ok(())
    }

    pub fn fit_predict(&mut self, distances: &DistanceMatrix) -> Result<Vec<usize>> {
        self.fit(distances)?;
        Ok(self.labels.clone().unwrap_or_default())
    }
}
