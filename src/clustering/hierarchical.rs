use log::debug;

use crate::clustering::distance_matrix::DistanceMatrix;
use crate::clustering::{ClusteringError, SimilarityMeasure};

/// The distance recorded for merges performed after no pair of clusters was
/// closer than the threshold any more
pub const DISCONNECTED: f32 = -1.0;

/// How the distance from a newly merged cluster to every other cluster is
/// derived from the distances of its two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linkage {
    /// The minimum pairwise distance
    #[default]
    Single,
    /// The maximum pairwise distance
    Complete,
}

impl Linkage {
    #[inline]
    pub fn update(&self, d_left: f32, d_right: f32) -> f32 {
        match self {
            Self::Single => d_left.min(d_right),
            Self::Complete => d_left.max(d_right),
        }
    }
}

/// One merge step. `left` and `right` are the smallest original point index
/// of each merged cluster, with `left < right`; the merged cluster is
/// afterwards represented by `left`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryTreeNode {
    pub left: usize,
    pub right: usize,
    pub distance: f32,
}

impl BinaryTreeNode {
    pub fn new(left: usize, right: usize, distance: f32) -> Self {
        Self {
            left,
            right,
            distance,
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.distance != DISCONNECTED
    }
}

/// Bottom-up clustering of `n` points into a binary merge tree of `n - 1`
/// nodes.
///
/// At each step the pair of clusters at the smallest distance is merged,
/// choosing the lexicographically smallest pair on ties. Once that smallest
/// distance reaches `threshold` all further merges are recorded with the
/// [`DISCONNECTED`] distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchicalClusterer {
    pub linkage: Linkage,
    pub threshold: f32,
}

impl Default for HierarchicalClusterer {
    fn default() -> Self {
        Self {
            linkage: Linkage::Single,
            threshold: 1.0,
        }
    }
}

impl HierarchicalClusterer {
    pub fn new(linkage: Linkage) -> Self {
        Self {
            linkage,
            ..Default::default()
        }
    }

    pub fn cluster<T, S: SimilarityMeasure<T>>(
        &self,
        data: &[T],
        measure: &S,
    ) -> Result<Vec<BinaryTreeNode>, ClusteringError> {
        if data.is_empty() {
            return Err(ClusteringError::InvalidInput(
                "cannot cluster an empty set of points".to_string(),
            ));
        }
        let matrix = DistanceMatrix::from_similarity(data, measure);
        self.cluster_matrix(matrix)
    }

    /// Cluster directly from a distance matrix, which is consumed as the
    /// working copy of inter-cluster distances.
    pub fn cluster_matrix(
        &self,
        mut matrix: DistanceMatrix,
    ) -> Result<Vec<BinaryTreeNode>, ClusteringError> {
        let n = matrix.dimension();
        if n == 0 {
            return Err(ClusteringError::InvalidInput(
                "cannot cluster an empty set of points".to_string(),
            ));
        }

        let mut active = vec![true; n];
        // The closest active cluster with a larger index, smallest index on ties
        let mut nearest: Vec<Option<(usize, f32)>> = (0..n)
            .map(|i| nearest_after(&matrix, &active, i))
            .collect();

        let mut tree = Vec::with_capacity(n - 1);
        let mut disconnected = false;

        for _ in 1..n {
            let mut best: Option<(usize, usize, f32)> = None;
            for (i, cand) in nearest.iter().enumerate() {
                if !active[i] {
                    continue;
                }
                if let Some((j, d)) = *cand {
                    match best {
                        Some((_, _, best_d)) if best_d <= d => {}
                        _ => best = Some((i, j, d)),
                    }
                }
            }
            let Some((a, b, d)) = best else {
                break;
            };

            if !disconnected && d >= self.threshold {
                debug!(
                    "Smallest remaining distance {d} reached threshold {} after {} merges",
                    self.threshold,
                    tree.len()
                );
                disconnected = true;
            }
            tree.push(BinaryTreeNode::new(
                a,
                b,
                if disconnected { DISCONNECTED } else { d },
            ));

            active[b] = false;
            nearest[b] = None;
            for k in 0..n {
                if k == a || !active[k] {
                    continue;
                }
                let merged = self.linkage.update(matrix.get(a, k), matrix.get(b, k));
                matrix.set(a, k, merged);
            }

            for i in 0..n {
                if !active[i] {
                    continue;
                }
                if i == a {
                    nearest[i] = nearest_after(&matrix, &active, i);
                } else if i > a {
                    if matches!(nearest[i], Some((j, _)) if j == b) {
                        nearest[i] = nearest_after(&matrix, &active, i);
                    }
                } else {
                    match nearest[i] {
                        Some((j, _)) if j == a || j == b => {
                            nearest[i] = nearest_after(&matrix, &active, i);
                        }
                        Some((j, d_j)) => {
                            let d_a = matrix.get(i, a);
                            if d_a < d_j || (d_a == d_j && a < j) {
                                nearest[i] = Some((a, d_a));
                            }
                        }
                        None => {
                            nearest[i] = nearest_after(&matrix, &active, i);
                        }
                    }
                }
            }
        }

        Ok(tree)
    }
}

fn nearest_after(matrix: &DistanceMatrix, active: &[bool], i: usize) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for j in (i + 1)..matrix.dimension() {
        if !active[j] {
            continue;
        }
        let d = matrix.get(i, j);
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((j, d)),
        }
    }
    best
}
