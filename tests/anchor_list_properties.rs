//! Anchor list property tests
//!
//! Parsing and writing of BED-like anchor lists, plus command line runs.

use hic_anchors::bed::{
    parse_anchor_line, read_anchor_file, read_anchors, write_anchors, AnchorListError,
    AnchorRecordView, RecordPolicy,
};
use hic_anchors::cluster;
use proptest::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

// ============================================================================
// Generators
// ============================================================================

fn arb_chrom_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| format!("chr{}", n)),
        Just("chrX".to_string()),
        Just("chrY".to_string()),
    ]
}

fn arb_anchor_line() -> impl Strategy<Value = String> {
    (arb_chrom_name(), 0i64..100_000_000, 0i64..50_000)
        .prop_map(|(chrom, start, len)| format!("{}\t{}\t{}", chrom, start, start + len))
}

fn arb_extended_line() -> impl Strategy<Value = String> {
    (arb_anchor_line(), "[a-z_]{1,8}", 0u32..1000)
        .prop_map(|(base, name, score)| format!("{}\t{}\t{}\t+", base, name, score))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: parsing preserves the coordinate fields
    #[test]
    fn prop_parse_preserves_coords(line in arb_anchor_line()) {
        let fields: Vec<&str> = line.split('\t').collect();
        let view = AnchorRecordView::parse(line.as_bytes(), 1).unwrap();

        prop_assert_eq!(view.chrom, fields[0]);
        prop_assert_eq!(view.start, fields[1].parse::<i64>().unwrap());
        prop_assert_eq!(view.end, fields[2].parse::<i64>().unwrap());
        prop_assert_eq!(view.field_count(), 3);
    }

    /// Property: trailing columns do not change the anchor
    #[test]
    fn prop_extra_columns_ignored(line in arb_extended_line()) {
        let base: Vec<&str> = line.splitn(4, '\t').take(3).collect();
        let anchor = parse_anchor_line(&line, 1).unwrap();
        prop_assert_eq!(anchor.to_string(), base.join("\t"));
    }

    /// Property: writing then reading gives back the same anchors
    #[test]
    fn prop_write_read_lines(lines in prop::collection::vec(arb_anchor_line(), 0..50)) {
        let text = lines.iter().map(|l| format!("{}\n", l)).collect::<String>();
        let (anchors, stats) = read_anchors(text.as_bytes(), RecordPolicy::Abort).unwrap();
        prop_assert_eq!(stats.parsed, lines.len());

        let mut out = Vec::new();
        write_anchors(&mut out, &anchors).unwrap();
        prop_assert_eq!(String::from_utf8(out).unwrap(), text);
    }

    /// Property: inverted records are skipped under Skip and fatal under Abort
    #[test]
    fn prop_inverted_records(chrom in arb_chrom_name(), end in 0i64..1_000_000, gap in 1i64..1000) {
        let text = format!("{}\t{}\t{}\n{}\t0\t1\n", chrom, end + gap, end, chrom);

        let (anchors, stats) = read_anchors(text.as_bytes(), RecordPolicy::Skip).unwrap();
        prop_assert_eq!(anchors.len(), 1);
        prop_assert_eq!(stats.skipped, 1);

        let err = read_anchors(text.as_bytes(), RecordPolicy::Abort).unwrap_err();
        let is_invalid = matches!(err, AnchorListError::InvalidAnchor { line: 1, .. });
        prop_assert!(is_invalid);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_read_gzip_file() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let dir = tempdir().unwrap();
    let path = dir.path().join("anchors.bed.gz");
    let file = fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(b"track name=loops\nchr1\t0\t10\nchr1\t5\t15\n").unwrap();
    encoder.finish().unwrap();

    let (anchors, stats) = read_anchor_file(&path, RecordPolicy::Abort).unwrap();
    assert_eq!(stats.total, 2);
    let set = cluster(anchors);
    assert_eq!(set.iter().map(|a| a.to_string()).collect::<Vec<_>>(), vec!["chr1\t0\t15"]);
}

#[test]
fn test_read_file_with_invalid_utf8_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("anchors.bed");
    fs::write(&path, b"chr1\t0\t10\n\xff\xfe\t1\t2\nchr2\t3\t4\n").unwrap();

    let (anchors, stats) = read_anchor_file(&path, RecordPolicy::Skip).unwrap();
    assert_eq!(anchors.len(), 2);
    assert_eq!((stats.total, stats.parsed, stats.skipped), (3, 2, 1));

    let err = read_anchor_file(&path, RecordPolicy::Abort).unwrap_err();
    assert!(matches!(err, AnchorListError::InvalidUtf8 { line: 2, .. }));
}

#[test]
fn test_read_missing_file() {
    let err = read_anchor_file("/nonexistent/anchors.bed", RecordPolicy::Skip).unwrap_err();
    assert!(matches!(err, AnchorListError::Io(_)));
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_cli_merge() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("anchors.bed");
    let output = dir.path().join("merged.bed");
    fs::write(&input, "1\t0\t10\n1\t5\t15\n1\t20\t25\n2\t0\t5\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_hic-anchors"))
        .arg("merge")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "1\t0\t15\n1\t20\t25\n2\t0\t5\n"
    );
}

#[test]
fn test_cli_widen_canonical() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("anchors.bed");
    let output = dir.path().join("windows.bed");
    fs::write(&input, "1\t0\t10\n1\t30\t40\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_hic-anchors"))
        .args(["widen", "--width", "40", "--canonical"])
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "1\t-20\t60\n");
}

#[test]
fn test_cli_abort_on_invalid() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("anchors.bed");
    fs::write(&input, "1\t10\t0\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_hic-anchors"))
        .args(["--on-invalid", "abort", "merge"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(!status.success());
}
