//! Margin expansion
//!
//! Widens clustered anchors into search windows, e.g. for motif scanning
//! around loop anchors.

use crate::core::anchor::Anchor;
use crate::core::cluster::{AnchorSet, ClusterConfig};
use crate::core::error::AnchorResult;
use log::debug;
use std::collections::BTreeMap;

/// Widen every anchor of `set` by `width`, keeping per-chromosome order
///
/// The result is NOT guaranteed to be canonical: neighbours closer than
/// `width` start to overlap once widened. Use [`expand_and_recluster`] (or
/// [`AnchorSet::recluster`]) when a non-overlapping result is required.
///
/// Fails on the first anchor that cannot be widened.
pub fn expand_all(set: &AnchorSet, width: i64) -> AnchorResult<AnchorSet> {
    let mut groups = BTreeMap::new();
    for (chrom, anchors) in set.groups() {
        let widened = anchors
            .iter()
            .map(|a| a.widen_margins(width))
            .collect::<AnchorResult<Vec<Anchor>>>()?;
        groups.insert(chrom.clone(), widened);
    }

    let expanded = AnchorSet::from_groups(groups);
    if !expanded.is_canonical() {
        debug!("Widening by {} produced overlapping anchors", width);
    }
    Ok(expanded)
}

/// Widen every anchor and cluster the result again
pub fn expand_and_recluster(
    set: &AnchorSet,
    width: i64,
    config: &ClusterConfig,
) -> AnchorResult<AnchorSet> {
    Ok(expand_all(set, width)?.recluster(config))
}
