//! Hierarchical clustering over precomputed distance matrices.
//!
//! This module provides:
//! - `AgglomerativeClustering`: bottom-up merging with single, complete,
//!   average, weighted or Ward linkage
//! - `LinkageMatrix`: the merge history, flat cuts and cophenetic distances
//! - `Dendrogram`: leaf order and link coordinates for plotting
//! - `Figure` / `Panel`: SVG rendering of one or more dendrograms
//!
//! # Examples
//!
//! ## Single linkage
//! ```rust
//! use compdist::{AgglomerativeClustering, Linkage, datasets};
//!
//! let distances = datasets::sn123_hellinger().unwrap();
//! let mut model = AgglomerativeClustering::new(Linkage::Single);
//! let labels = model.fit_predict(&distances).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 0, 1]);
//!
//! let linkage = model.linkage_matrix.as_ref().unwrap();
//! println!("{}", linkage);
//! ```
//!
//! ## Dendrogram figure
//! ```rust
//! use compdist::{AgglomerativeClustering, Dendrogram, DistanceSort, Figure, Linkage, Panel, datasets};
//!
//! let distances = datasets::cultivar_hellinger().unwrap();
//! let mut figure = Figure::new();
//! for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
//!     let mut model = AgglomerativeClustering::new(linkage);
//!     model.fit(&distances).unwrap();
//!     let dendrogram = Dendrogram::new(
//!         model.linkage_matrix.as_ref().unwrap(),
//!         distances.labels(),
//!         DistanceSort::Descending,
//!     )
//!     .unwrap();
//!     println!("{}", dendrogram.to_text());
//!     figure.push(Panel::for_linkage(linkage, "Hellinger Distance", dendrogram));
//! }
//! let svg = figure.to_svg();
//! assert!(svg.contains("Dendrogram (Linkage = average)"));
//! ```

mod dendrogram;
mod hierarchical;
mod render;

pub use dendrogram::{Dendrogram, DistanceSort, Link};
pub use hierarchical::{AgglomerativeClustering, Linkage, LinkageMatrix, Merge};
pub use render::{Figure, Panel};
