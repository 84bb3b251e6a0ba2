use super::LinkageMatrix;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Distance from the first leaf to the axis, and between neighbouring leaves.
const LEAF_OFFSET: f64 = 5.0;
const LEAF_SPACING: f64 = 10.0;

/// Share of the tallest merge under which subtrees get their own colour.
const COLOR_THRESHOLD_RATIO: f64 = 0.7;

/// Which child of each merge is drawn first (leftmost).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSort {
    /// Keep the order of the linkage matrix.
    None,
    /// The child with the lower merge height goes first.
    Ascending,
    /// The child with the greater merge height goes first.
    #[default]
    Descending,
}

/// One U-shaped link joining two children at their parent's height.
///
/// `xs` and `ys` trace left child top, left corner, right corner, right child top.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Link {
    pub xs: [f64; 4],
    pub ys: [f64; 4],
    /// Palette index for links inside a subtree below the colour threshold.
    pub color: Option<usize>,
}

impl Link {
    pub fn height(&self) -> f64 {
        self.ys[1]
    }
}

/// Plot layout of a linkage matrix.
#[derive(Clone, Debug, Serialize)]
pub struct Dendrogram {
    /// Leaf ids in drawing order.
    pub leaves: Vec<usize>,
    /// Leaf labels in drawing order.
    pub labels: Vec<String>,
    /// Links in post-order: both children before their parent.
    pub links: Vec<Link>,
    pub max_height: f64,
    pub color_threshold: f64,
}

impl Dendrogram {
    pub fn new(linkage: &LinkageMatrix, labels: &[String], sort: DistanceSort) -> Result<Self> {
        let max_height = linkage
            .merges()
            .iter()
            .map(|merge| merge.distance)
            .fold(0.0, f64::max);
        Self::with_color_threshold(linkage, labels, sort, COLOR_THRESHOLD_RATIO * max_height)
    }

    pub fn with_color_threshold(
        linkage: &LinkageMatrix,
        labels: &[String],
        sort: DistanceSort,
        color_threshold: f64,
    ) -> Result<Self> {
        if labels.len() != linkage.n_leaves() {
            return Err(Error::LabelCount {
                expected: linkage.n_leaves(),
                actual: labels.len(),
            });
        }
        if linkage.n_leaves() == 0 {
            return Err(Error::EmptyInput);
        }

        let mut layout = Layout {
            linkage,
            sort,
            color_threshold,
            leaves: Vec::with_capacity(linkage.n_leaves()),
            links: Vec::with_capacity(linkage.merges().len()),
            next_color: 0,
        };
        layout.place(linkage.root(), None);

        let max_height = layout.links.iter().map(Link::height).fold(0.0, f64::max);
        let ordered_labels = layout.leaves.iter().map(|&leaf| labels[leaf].clone()).collect();

        Ok(Self {
            leaves: layout.leaves,
            labels: ordered_labels,
            links: layout.links,
            max_height,
            color_threshold,
        })
    }

    /// Horizontal position of the `k`-th leaf in drawing order.
    pub fn leaf_position(k: usize) -> f64 {
        LEAF_OFFSET + LEAF_SPACING * k as f64
    }

    /// Right edge of the drawing area.
    pub fn width(&self) -> f64 {
        LEAF_SPACING * self.leaves.len() as f64
    }
}

struct Layout<'a> {
    linkage: &'a LinkageMatrix,
    sort: DistanceSort,
    color_threshold: f64,
    leaves: Vec<usize>,
    links: Vec<Link>,
    next_color: usize,
}

impl Layout<'_> {
    /// Lays out the subtree under `id`, returning its attachment point.
    fn place(&mut self, id: usize, color: Option<usize>) -> (f64, f64) {
        let Some(&merge) = self.linkage.merge(id) else {
            let x = Dendrogram::leaf_position(self.leaves.len());
            self.leaves.push(id);
            return (x, 0.0);
        };

        let left_height = self.linkage.height(merge.left);
        let right_height = self.linkage.height(merge.right);
        let (first, second) = match self.sort {
            DistanceSort::None => (merge.left, merge.right),
            DistanceSort::Ascending if left_height > right_height => (merge.right, merge.left),
            DistanceSort::Ascending => (merge.left, merge.right),
            DistanceSort::Descending if left_height > right_height => (merge.left, merge.right),
            DistanceSort::Descending => (merge.right, merge.left),
        };

        let color = if merge.distance >= self.color_threshold {
            None
        } else {
            color.or_else(|| {
                self.next_color += 1;
                Some(self.next_color - 1)
            })
        };

        let (x1, y1) = self.place(first, color);
        let (x2, y2) = self.place(second, color);
        let height = merge.distance;
        self.links.push(Link {
            xs: [x1, x1, x2, x2],
            ys: [y1, height, height, y2],
            color,
        });

        ((x1 + x2) / 2.0, height)
    }
}
