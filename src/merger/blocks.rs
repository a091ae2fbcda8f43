use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Groups of spectra to be merged, keyed by the position of each group's
/// master spectrum in the experiment. The members are positions as well,
/// listed in the order they were added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeBlocks {
    blocks: BTreeMap<usize, Vec<usize>>,
}

impl MergeBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block for `master`. A master without members still forms a
    /// block of one spectrum.
    pub fn insert_master(&mut self, master: usize) {
        self.blocks.entry(master).or_default();
    }

    pub fn push_member(&mut self, master: usize, member: usize) {
        self.blocks.entry(master).or_default().push(member);
    }

    pub fn get(&self, master: usize) -> Option<&[usize]> {
        self.blocks.get(&master).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, usize, Vec<usize>> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every position mentioned by any block, master or member
    pub fn indices(&self) -> BTreeSet<usize> {
        self.blocks
            .iter()
            .flat_map(|(master, members)| std::iter::once(*master).chain(members.iter().copied()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a MergeBlocks {
    type Item = (&'a usize, &'a Vec<usize>);
    type IntoIter = btree_map::Iter<'a, usize, Vec<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// A summary of what a merge did to an experiment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// How many blocks there were of each size, counting the master
    pub cluster_sizes: BTreeMap<usize, usize>,
    /// The number of consensus spectra added
    pub consensus_count: usize,
    /// The number of input spectra replaced
    pub merged_count: usize,
    /// Blocks with no peaks at all, which produced no consensus
    pub skipped_blocks: usize,
}

impl MergeStats {
    pub(crate) fn record_block(&mut self, size: usize) {
        *self.cluster_sizes.entry(size).or_default() += 1;
        self.merged_count += size;
    }

    /// Add the counts of `other` to this summary
    pub fn absorb(&mut self, other: MergeStats) {
        for (size, count) in other.cluster_sizes {
            *self.cluster_sizes.entry(size).or_default() += count;
        }
        self.consensus_count += other.consensus_count;
        self.merged_count += other.merged_count;
        self.skipped_blocks += other.skipped_blocks;
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cluster sizes:")?;
        for (size, count) in self.cluster_sizes.iter() {
            writeln!(f, "  size {size}: {count}x")?;
        }
        write!(
            f,
            "{} spectra merged into {} consensus spectra",
            self.merged_count, self.consensus_count
        )
    }
}
