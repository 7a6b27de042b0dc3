//! Anchor clustering
//!
//! Reduces an unordered collection of anchors to the minimal set of sorted,
//! pairwise non-overlapping anchors per chromosome covering the same
//! positions. Uses the standard sort-then-sweep interval merge:
//! 1. Partition anchors by chromosome
//! 2. Sort each partition by (start, end)
//! 3. Sweep left to right, merging each anchor into the running cluster
//!    while it overlaps (or lies within the adjacency tolerance)
//!
//! Chromosome partitions are independent and are merged in parallel with
//! rayon for large inputs.

use crate::core::anchor::Anchor;
use log::debug;
use rayon::prelude::*;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Minimum number of anchors before chromosome groups are merged in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Clustering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Largest gap between neighbouring anchors that still merges them.
    /// 0 merges only anchors sharing at least one position.
    pub adjacency_tolerance: u64,
    /// Allow merging chromosome groups on the rayon pool
    pub parallel: bool,
    /// Input size at which parallel merging kicks in
    pub parallel_threshold: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            adjacency_tolerance: 0,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ClusterConfig {
    /// Set the adjacency tolerance
    pub fn with_tolerance(mut self, tolerance: u64) -> Self {
        self.adjacency_tolerance = tolerance;
        self
    }

    /// Enable or disable parallel merging
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    fn use_parallel(&self, total: usize) -> bool {
        self.parallel && total >= self.parallel_threshold
    }
}

/// Anchors grouped by chromosome
///
/// Chromosomes iterate in lexicographic order. Within a chromosome, starts
/// and ends are non-decreasing. Sets produced by [`cluster`] are canonical:
/// each anchor is also strictly left of the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorSet {
    groups: BTreeMap<String, Vec<Anchor>>,
}

impl AnchorSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_groups(groups: BTreeMap<String, Vec<Anchor>>) -> Self {
        Self { groups }
    }

    /// Total number of anchors
    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    /// Check if the set holds no anchors
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|g| g.is_empty())
    }

    /// Chromosome names in iteration order
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|s| s.as_str())
    }

    /// Anchors of one chromosome
    pub fn get(&self, chrom: &str) -> Option<&[Anchor]> {
        self.groups.get(chrom).map(|g| g.as_slice())
    }

    /// All anchors, ordered by chromosome then position
    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.groups.values().flatten()
    }

    /// Per-chromosome groups
    pub fn groups(&self) -> btree_map::Iter<'_, String, Vec<Anchor>> {
        self.groups.iter()
    }

    /// Consume the set into a flat vector in iteration order
    pub fn into_anchors(self) -> Vec<Anchor> {
        self.groups.into_values().flatten().collect()
    }

    /// Sum of anchor widths
    pub fn total_width(&self) -> u128 {
        self.iter().map(|a| a.width() as u128).sum()
    }

    /// Check the canonical invariant: sorted and pairwise non-overlapping
    pub fn is_canonical(&self) -> bool {
        self.groups.values().all(|group| {
            group
                .windows(2)
                .all(|pair| pair[0].is_strictly_left_of(&pair[1]))
        })
    }

    /// Anchors overlapping `query`
    ///
    /// Binary searches the query's chromosome. The set must come from
    /// [`cluster`] / [`cluster_with`] or from [`expand_all`] applied to such a
    /// set: both keep starts and ends non-decreasing within a chromosome.
    ///
    /// [`expand_all`]: crate::core::expand_all
    pub fn find_overlapping(&self, query: &Anchor) -> &[Anchor] {
        let Some(group) = self.groups.get(query.chrom()) else {
            return &[];
        };
        let first = group.partition_point(|a| a.end() < query.start());
        let last = group.partition_point(|a| a.start() <= query.end());
        if first >= last {
            return &[];
        }
        &group[first..last]
    }

    /// Cluster this set again, e.g. after widening
    pub fn recluster(self, config: &ClusterConfig) -> AnchorSet {
        cluster_with(self.into_anchors(), config)
    }
}

impl IntoIterator for AnchorSet {
    type Item = Anchor;
    type IntoIter = std::vec::IntoIter<Anchor>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_anchors().into_iter()
    }
}

impl FromIterator<Anchor> for AnchorSet {
    /// Clusters with the default configuration
    fn from_iter<T: IntoIterator<Item = Anchor>>(iter: T) -> Self {
        cluster(iter)
    }
}

/// Cluster anchors with the default configuration
///
/// # Examples
/// ```
/// use hic_anchors::core::{cluster, Anchor};
/// let set = cluster(vec![
///     Anchor::new("1", 0, 10).unwrap(),
///     Anchor::new("1", 5, 15).unwrap(),
///     Anchor::new("1", 20, 25).unwrap(),
/// ]);
/// let merged: Vec<(i64, i64)> = set.iter().map(|a| (a.start(), a.end())).collect();
/// assert_eq!(merged, vec![(0, 15), (20, 25)]);
/// ```
pub fn cluster<I>(anchors: I) -> AnchorSet
where
    I: IntoIterator<Item = Anchor>,
{
    cluster_with(anchors, &ClusterConfig::default())
}

/// Cluster anchors into a canonical [`AnchorSet`]
///
/// Empty input yields an empty set.
pub fn cluster_with<I>(anchors: I, config: &ClusterConfig) -> AnchorSet
where
    I: IntoIterator<Item = Anchor>,
{
    let mut partitions: BTreeMap<String, Vec<Anchor>> = BTreeMap::new();
    let mut total = 0usize;

    for anchor in anchors {
        total += 1;
        // Look up by &str first; the key is only allocated for a new chromosome
        match partitions.get_mut(anchor.chrom()) {
            Some(group) => group.push(anchor),
            None => {
                partitions.insert(anchor.chrom().to_string(), vec![anchor]);
            }
        }
    }

    let tolerance = config.adjacency_tolerance;
    let groups: BTreeMap<String, Vec<Anchor>> = if config.use_parallel(total) {
        debug!(
            "Merging {} anchors across {} chromosomes in parallel",
            total,
            partitions.len()
        );
        partitions
            .into_par_iter()
            .map(|(chrom, group)| (chrom, merge_group(group, tolerance)))
            .collect()
    } else {
        partitions
            .into_iter()
            .map(|(chrom, group)| (chrom, merge_group(group, tolerance)))
            .collect()
    };

    let set = AnchorSet::from_groups(groups);
    debug!("Clustered {} anchors into {}", total, set.len());
    set
}

/// Sort one chromosome's anchors and sweep-merge them
fn merge_group(mut group: Vec<Anchor>, tolerance: u64) -> Vec<Anchor> {
    group.sort_unstable();

    let mut merged = Vec::with_capacity(group.len());
    let mut anchors = group.into_iter();
    let Some(mut current) = anchors.next() else {
        return merged;
    };

    for next in anchors {
        if should_merge(&current, &next, tolerance) {
            current = current.span_union(&next);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

/// `next` must not start before `current` (guaranteed by the sort)
fn should_merge(current: &Anchor, next: &Anchor, tolerance: u64) -> bool {
    if current.overlaps(next) {
        return true;
    }
    let gap = (next.start() as i128) - (current.end() as i128);
    gap <= tolerance as i128
}
