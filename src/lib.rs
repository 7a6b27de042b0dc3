//! hic-anchors - genomic anchor normalization and clustering
//!
//! Anchors are closed intervals on a named chromosome, such as Hi-C loop
//! anchors read from a feature list. This crate validates them, orders them,
//! merges overlapping anchors into a canonical per-chromosome set and widens
//! them into search windows.
//!
//! # Features
//!
//! - Fallible construction: inverted intervals are rejected, never patched
//! - Pure merge and widen operations returning new anchors
//! - Sort-and-sweep clustering, parallel across chromosomes with rayon
//! - BED-like anchor list reading (plain, gzip, bzip2) and writing
//!
//! # Example
//!
//! ```
//! use hic_anchors::{cluster, expand_and_recluster, Anchor, ClusterConfig};
//!
//! let set = cluster(vec![
//!     Anchor::new("1", 0, 10)?,
//!     Anchor::new("1", 30, 40)?,
//! ]);
//! assert_eq!(set.len(), 2);
//!
//! let windows = expand_and_recluster(&set, 40, &ClusterConfig::default())?;
//! let spans: Vec<(i64, i64)> = windows.iter().map(|a| (a.start(), a.end())).collect();
//! assert_eq!(spans, vec![(-20, 60)]);
//! # Ok::<(), hic_anchors::AnchorError>(())
//! ```

pub mod core;
pub mod formats;
pub mod pipeline;

// Re-export commonly used types
pub use core::{
    cluster, cluster_with, expand_all, expand_and_recluster, Anchor, AnchorError, AnchorResult,
    AnchorSet, ClusterConfig, HicAnchorsError, Result,
};
pub use formats::bed;
