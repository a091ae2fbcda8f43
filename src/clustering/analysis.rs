use crate::clustering::hierarchical::BinaryTreeNode;
use crate::clustering::ClusteringError;

/// The number of merges in `tree` that joined clusters within the threshold
pub fn connected_nodes(tree: &[BinaryTreeNode]) -> usize {
    tree.iter().filter(|node| node.is_connected()).count()
}

/// Cut a merge tree over `n` points into `cluster_count` flat clusters by
/// replaying its first `n - cluster_count` merges.
///
/// Each cluster lists its original point indices in ascending order, and
/// clusters are ordered by their first member.
pub fn cut(
    n: usize,
    cluster_count: usize,
    tree: &[BinaryTreeNode],
) -> Result<Vec<Vec<usize>>, ClusteringError> {
    if cluster_count == 0 || cluster_count > n {
        return Err(ClusteringError::InvalidInput(format!(
            "cannot cut {n} points into {cluster_count} clusters"
        )));
    }
    let merges = n - cluster_count;
    if merges > tree.len() {
        return Err(ClusteringError::InvalidInput(format!(
            "{cluster_count} clusters require {merges} merges but the tree only has {}",
            tree.len()
        )));
    }

    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut owner: Vec<usize> = (0..n).collect();

    for node in tree.iter().take(merges) {
        if node.left >= n || node.right >= n {
            return Err(ClusteringError::InvalidInput(format!(
                "tree node ({}, {}) refers to a point outside of 0..{n}",
                node.left, node.right
            )));
        }
        let keep = owner[node.left];
        let absorb = owner[node.right];
        if keep == absorb {
            continue;
        }
        let moved = std::mem::take(&mut members[absorb]);
        for &i in moved.iter() {
            owner[i] = keep;
        }
        members[keep].extend(moved);
    }

    let mut clusters: Vec<Vec<usize>> = members
        .into_iter()
        .filter(|m| !m.is_empty())
        .map(|mut m| {
            m.sort_unstable();
            m
        })
        .collect();
    clusters.sort_by_key(|m| m[0]);
    Ok(clusters)
}

/// Render a merge tree over `n` points in Newick format. Subtrees that were
/// never joined are listed side by side under a common root.
pub fn newick_tree(n: usize, tree: &[BinaryTreeNode], include_distance: bool) -> String {
    let mut labels: Vec<Option<String>> = (0..n).map(|i| Some(i.to_string())).collect();
    for node in tree.iter() {
        if node.left >= n
            || node.right >= n
            || labels[node.left].is_none()
            || labels[node.right].is_none()
        {
            continue;
        }
        let left = labels[node.left].take().unwrap_or_default();
        let right = labels[node.right].take().unwrap_or_default();
        let joined = if include_distance {
            format!("({left}:{d}, {right}:{d})", d = node.distance)
        } else {
            format!("({left}, {right})")
        };
        labels[node.left] = Some(joined);
    }
    let roots: Vec<String> = labels.into_iter().flatten().collect();
    if roots.len() == 1 {
        roots.into_iter().next().unwrap_or_default()
    } else {
        format!("({})", roots.join(", "))
    }
}
