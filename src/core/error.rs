//! Error types for hic-anchors
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for hic-anchors operations
#[derive(Debug, Error)]
pub enum HicAnchorsError {
    /// Anchor construction, merge or widening errors
    #[error("Anchor error: {0}")]
    Anchor(#[from] AnchorError),

    /// Anchor list parsing errors
    #[error("Anchor list error: {0}")]
    AnchorList(#[from] crate::formats::bed::AnchorListError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the interval model
///
/// Every variant is returned by the operation that detects it; no anchor is
/// produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    /// Construction requested with start > end
    #[error("Invalid interval {chrom}:{start}-{end}: start > end")]
    InvalidInterval { chrom: String, start: i64, end: i64 },

    /// Merge requested between anchors on different chromosomes
    #[error("Attempted to merge anchors on different chromosomes: {left} & {right}")]
    CrossChromosomeMerge { left: String, right: String },

    /// Widening would invert the interval
    #[error("Widening {start}-{end} by {width} would invert the interval")]
    InvalidWidenWidth { width: i64, start: i64, end: i64 },

    /// Coordinate arithmetic left the i64 range
    #[error("Coordinate overflow while adjusting {chrom}:{start}-{end}")]
    CoordinateOverflow { chrom: String, start: i64, end: i64 },
}

/// Result type alias for hic-anchors operations
pub type Result<T> = std::result::Result<T, HicAnchorsError>;

/// Result type alias for interval model operations
pub type AnchorResult<T> = std::result::Result<T, AnchorError>;
