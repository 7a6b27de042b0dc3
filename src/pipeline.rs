//! File-to-file anchor processing
//!
//! Glue used by the command line: read an anchor list, cluster and/or
//! widen it, then write the result to a file or stdout.

use crate::core::{cluster_with, expand_all, AnchorSet, ClusterConfig, Result};
use crate::formats::bed::{read_anchor_file, write_anchor_file, write_anchors, RecordPolicy};
use crate::Anchor;
use log::info;
use std::path::Path;

/// Options shared by the merge and widen pipelines
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub policy: RecordPolicy,
    pub cluster: ClusterConfig,
    /// Re-cluster after widening so the output is non-overlapping
    pub canonical: bool,
}

/// Pipeline statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub records: usize,
    pub skipped: usize,
    pub written: usize,
}

/// Read, cluster, optionally widen, and write an anchor list
pub fn merge_anchor_list(
    input: &Path,
    output: Option<&Path>,
    widen: Option<i64>,
    options: &PipelineOptions,
) -> Result<PipelineStats> {
    let (anchors, read_stats) = read_anchor_file(input, options.policy)?;
    let mut set = cluster_with(anchors, &options.cluster);
    info!("Merged {} records into {} anchors", read_stats.parsed, set.len());

    if let Some(width) = widen {
        set = widen_set(&set, width, options)?;
    }

    let written = write_set(output, &set)?;
    Ok(PipelineStats {
        records: read_stats.total,
        skipped: read_stats.skipped,
        written,
    })
}

/// Read, widen each record as given, optionally cluster, and write
pub fn widen_anchor_list(
    input: &Path,
    output: Option<&Path>,
    width: i64,
    options: &PipelineOptions,
) -> Result<PipelineStats> {
    let (anchors, read_stats) = read_anchor_file(input, options.policy)?;
    let widened = anchors
        .iter()
        .map(|a| a.widen_margins(width))
        .collect::<std::result::Result<Vec<Anchor>, _>>()?;

    let written = if options.canonical {
        let set = cluster_with(widened, &options.cluster);
        write_set(output, &set)?
    } else {
        write_list(output, &widened)?
    };

    Ok(PipelineStats {
        records: read_stats.total,
        skipped: read_stats.skipped,
        written,
    })
}

fn widen_set(set: &AnchorSet, width: i64, options: &PipelineOptions) -> Result<AnchorSet> {
    let expanded = expand_all(set, width)?;
    if options.canonical {
        Ok(expanded.recluster(&options.cluster))
    } else {
        Ok(expanded)
    }
}

fn write_set(output: Option<&Path>, set: &AnchorSet) -> Result<usize> {
    match output {
        Some(path) => Ok(write_anchor_file(path, set.iter())?),
        None => Ok(write_anchors(std::io::stdout().lock(), set.iter())?),
    }
}

fn write_list(output: Option<&Path>, anchors: &[Anchor]) -> Result<usize> {
    match output {
        Some(path) => Ok(write_anchor_file(path, anchors)?),
        None => Ok(write_anchors(std::io::stdout().lock(), anchors)?),
    }
}
