//! Genomic anchor value type
//!
//! An anchor is a closed interval `[start, end]` on a named chromosome,
//! typically a loop anchor read from a feature list. Anchors are immutable:
//! merging and widening return new values.

use crate::core::error::{AnchorError, AnchorResult};
use std::fmt;

/// A closed genomic interval on one chromosome
///
/// Ordering is by chromosome name (lexicographic), then start, then end.
/// The derived `Ord` relies on the field declaration order below.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Anchor {
    chrom: String,
    start: i64,
    end: i64,
}

impl Anchor {
    /// Create an anchor, rejecting `start > end`
    ///
    /// # Examples
    /// ```
    /// use hic_anchors::core::Anchor;
    /// let anchor = Anchor::new("1", 100, 110).unwrap();
    /// assert_eq!(anchor.width(), 10);
    /// assert!(Anchor::new("1", 110, 100).is_err());
    /// ```
    pub fn new(chrom: impl Into<String>, start: i64, end: i64) -> AnchorResult<Self> {
        let chrom = chrom.into();
        if start > end {
            return Err(AnchorError::InvalidInterval { chrom, start, end });
        }
        Ok(Self { chrom, start, end })
    }

    /// Chromosome name
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Start position (inclusive)
    pub fn start(&self) -> i64 {
        self.start
    }

    /// End position (inclusive)
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Width of this anchor (`end - start`)
    ///
    /// Unsigned so that spans across the whole i64 range fit.
    pub fn width(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Check whether a position lies within the anchor bounds
    pub fn contains(&self, pos: i64) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Check whether two anchors share at least one position
    ///
    /// Symmetric, and true when either anchor is nested inside the other.
    /// Anchors on different chromosomes never overlap.
    pub fn overlaps(&self, other: &Anchor) -> bool {
        self.chrom == other.chrom && self.start <= other.end && other.start <= self.end
    }

    /// True if this anchor ends before `other` starts on the same chromosome
    pub fn is_strictly_left_of(&self, other: &Anchor) -> bool {
        self.chrom == other.chrom && self.end < other.start
    }

    /// True if this anchor starts after `other` ends on the same chromosome
    pub fn is_strictly_right_of(&self, other: &Anchor) -> bool {
        self.chrom == other.chrom && other.end < self.start
    }

    /// Bounding interval of two anchors on the same chromosome
    ///
    /// Neither input is modified. The anchors do not need to overlap.
    pub fn merge_with(&self, other: &Anchor) -> AnchorResult<Anchor> {
        if self.chrom != other.chrom {
            return Err(AnchorError::CrossChromosomeMerge {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        Ok(self.span_union(other))
    }

    /// Bounding interval without the chromosome check
    ///
    /// Callers must guarantee both anchors are on the same chromosome.
    pub(crate) fn span_union(&self, other: &Anchor) -> Anchor {
        Anchor {
            chrom: self.chrom.clone(),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Expand the anchor symmetrically by `width`
    ///
    /// Each side moves by `width / 2` (integer division), so an odd width
    /// loses one unit overall. The start may become negative; no clamping to
    /// chromosome bounds is done here. A negative width shrinks the anchor
    /// and fails if the result would have `start > end`.
    ///
    /// # Examples
    /// ```
    /// use hic_anchors::core::Anchor;
    /// let anchor = Anchor::new("1", 100, 110).unwrap();
    /// let widened = anchor.widen_margins(20).unwrap();
    /// assert_eq!((widened.start(), widened.end()), (90, 120));
    /// ```
    pub fn widen_margins(&self, width: i64) -> AnchorResult<Anchor> {
        let half = width / 2;
        let overflow = || AnchorError::CoordinateOverflow {
            chrom: self.chrom.clone(),
            start: self.start,
            end: self.end,
        };
        let start = self.start.checked_sub(half).ok_or_else(overflow)?;
        let end = self.end.checked_add(half).ok_or_else(overflow)?;

        if start > end {
            return Err(AnchorError::InvalidWidenWidth {
                width,
                start: self.start,
                end: self.end,
            });
        }

        Ok(Anchor {
            chrom: self.chrom.clone(),
            start,
            end,
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)
    }
}
