//! BED-like anchor lists
//!
//! Reads `chrom\tstart\tend` records (extra columns ignored) into anchors
//! and writes anchors back out in the same layout. Blank lines and
//! `#`/`track`/`browser` lines are skipped.

use crate::core::io::{open_reader, ByteLineIterator};
use crate::core::{Anchor, AnchorError};
use log::{debug, warn};
use memchr::memchr;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Anchor list parsing error
#[derive(Debug, thiserror::Error)]
pub enum AnchorListError {
    #[error("Too few fields at line {line}: expected at least {expected}, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid UTF-8 in field {field} at line {line}")]
    InvalidUtf8 { line: usize, field: &'static str },

    #[error("Invalid number in field {field} at line {line}: {value}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Invalid anchor at line {line}: {source}")]
    InvalidAnchor {
        line: usize,
        #[source]
        source: AnchorError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do with a record that fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordPolicy {
    /// Log the record, count it and continue
    #[default]
    Skip,
    /// Stop at the first invalid record
    Abort,
}

/// Read statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadStats {
    /// Data lines seen (headers and blank lines excluded)
    pub total: usize,
    pub parsed: usize,
    pub skipped: usize,
}

/// Zero-copy view of the first three fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRecordView<'a> {
    pub chrom: &'a str,
    pub start: i64,
    pub end: i64,
    field_count: usize,
}

impl<'a> AnchorRecordView<'a> {
    /// Parse a record line; `line_no` is only used for error reporting
    pub fn parse(line: &'a [u8], line_no: usize) -> Result<Self, AnchorListError> {
        let mut bounds: [(usize, usize); 3] = [(0, 0); 3];
        let mut found = 0;
        let mut field_count = 0;
        let mut pos = 0;

        loop {
            let end = memchr(b'\t', &line[pos..]).map_or(line.len(), |i| pos + i);
            if found < 3 {
                bounds[found] = (pos, end);
                found += 1;
            }
            field_count += 1;
            if end == line.len() {
                break;
            }
            pos = end + 1;
        }

        if found < 3 {
            return Err(AnchorListError::TooFewFields {
                line: line_no,
                expected: 3,
                found,
            });
        }

        let field = move |idx: usize, name: &'static str| {
            let (s, e) = bounds[idx];
            std::str::from_utf8(&line[s..e]).map_err(|_| AnchorListError::InvalidUtf8 {
                line: line_no,
                field: name,
            })
        };
        let number = |idx: usize, name: &'static str| -> Result<i64, AnchorListError> {
            let text = field(idx, name)?;
            text.trim().parse().map_err(|_| AnchorListError::InvalidNumber {
                line: line_no,
                field: name,
                value: text.to_string(),
            })
        };

        Ok(Self {
            chrom: field(0, "chrom")?,
            start: number(1, "start")?,
            end: number(2, "end")?,
            field_count,
        })
    }

    /// Number of tab-separated fields on the line
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Build a validated anchor from this record
    pub fn to_anchor(&self, line_no: usize) -> Result<Anchor, AnchorListError> {
        Anchor::new(self.chrom, self.start, self.end)
            .map_err(|source| AnchorListError::InvalidAnchor { line: line_no, source })
    }
}

/// Check for lines that carry no record
pub fn is_skippable_line(line: &str) -> bool {
    is_skippable_bytes(line.as_bytes())
}

fn is_skippable_bytes(line: &[u8]) -> bool {
    let trimmed = match line.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(first) => &line[first..],
        None => return true,
    };
    trimmed.starts_with(b"#")
        || trimmed.starts_with(b"track")
        || trimmed.starts_with(b"browser")
}

/// Parse a single record line into an anchor
pub fn parse_anchor_line(line: &str, line_no: usize) -> Result<Anchor, AnchorListError> {
    AnchorRecordView::parse(line.as_bytes(), line_no)?.to_anchor(line_no)
}

/// Read anchors from a reader
pub fn read_anchors<R: BufRead>(
    reader: R,
    policy: RecordPolicy,
) -> Result<(Vec<Anchor>, ReadStats), AnchorListError> {
    let mut lines = ByteLineIterator::new(reader);
    let mut anchors = Vec::new();
    let mut stats = ReadStats::default();
    let mut line_no = 0;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_no += 1;
        if is_skippable_bytes(line) {
            continue;
        }
        stats.total += 1;

        match AnchorRecordView::parse(line, line_no).and_then(|view| view.to_anchor(line_no)) {
            Ok(anchor) => {
                anchors.push(anchor);
                stats.parsed += 1;
            }
            Err(e) => match policy {
                RecordPolicy::Abort => return Err(e),
                RecordPolicy::Skip => {
                    warn!("Skipping record: {}", e);
                    stats.skipped += 1;
                }
            },
        }
    }

    debug!(
        "Read {} anchors ({} skipped) from {} lines",
        stats.parsed, stats.skipped, line_no
    );
    Ok((anchors, stats))
}

/// Read anchors from a plain or compressed file
pub fn read_anchor_file<P: AsRef<Path>>(
    path: P,
    policy: RecordPolicy,
) -> Result<(Vec<Anchor>, ReadStats), AnchorListError> {
    let reader = open_reader(path.as_ref())?;
    read_anchors(reader, policy)
}

/// Write anchors as `chrom\tstart\tend` lines, returning the count written
pub fn write_anchors<'a, W, I>(writer: W, anchors: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Anchor>,
{
    let mut writer = BufWriter::new(writer);
    let mut written = 0;
    for anchor in anchors {
        writeln!(writer, "{}", anchor)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Write anchors to a file
pub fn write_anchor_file<'a, P, I>(path: P, anchors: I) -> io::Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Anchor>,
{
    let file = File::create(path.as_ref())?;
    write_anchors(file, anchors)
}
