//! Anchor normalization and clustering
//!
//! This module contains the anchor value type, the clustering engine
//! and margin expansion.

mod anchor;
mod cluster;
mod error;
mod expand;
pub mod io;

pub use anchor::Anchor;
pub use cluster::{cluster, cluster_with, AnchorSet, ClusterConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{AnchorError, AnchorResult, HicAnchorsError, Result};
pub use expand::{expand_all, expand_and_recluster};
