//! Agglomerative clustering over an arbitrary similarity measure.
//!
//! Points are compared pairwise with a [`SimilarityMeasure`] returning values
//! in `[0, 1]`, converted to distances `1 - similarity`, and merged bottom-up
//! by [`HierarchicalClusterer`]. The resulting merge tree is cut into flat
//! clusters with [`cut`].
pub mod analysis;
pub mod distance_matrix;
pub mod hierarchical;
pub mod similarity;

pub use crate::clustering::analysis::{connected_nodes, cut, newick_tree};
pub use crate::clustering::distance_matrix::DistanceMatrix;
pub use crate::clustering::hierarchical::{
    BinaryTreeNode, HierarchicalClusterer, Linkage, DISCONNECTED,
};
pub use crate::clustering::similarity::{PrecursorPoint, PrecursorSimilarity};

use thiserror::Error;

/// A measure of how alike two items are, `1.0` for identical and `0.0` for
/// items that must never be grouped together.
pub trait SimilarityMeasure<T> {
    fn similarity(&self, first: &T, second: &T) -> f64;
}

impl<T, F> SimilarityMeasure<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    fn similarity(&self, first: &T, second: &T) -> f64 {
        (self)(first, second)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusteringError {
    #[error("Invalid clustering input: {0}")]
    InvalidInput(String),
}
