//! File format adapters
//!
//! Anchor lists are read and written as BED-like tab-separated text.

pub mod bed;

pub use bed::{
    read_anchor_file, read_anchors, write_anchor_file, write_anchors, AnchorListError,
    AnchorRecordView, ReadStats, RecordPolicy,
};
