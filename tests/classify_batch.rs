use std::fs;
use std::path::Path;

use rust_htslib::bam::header::{Header, HeaderRecord};
use rust_htslib::bam::record::{Cigar, CigarString};
use rust_htslib::bam::{self, Format};

use crispr_outcome_tools::merge;
use crispr_outcome_tools::outcome::{self, ClassifyOptions, SUMMARY_SUFFIX};

fn chr11_header() -> Header {
    let mut header = Header::new();
    let mut sq = HeaderRecord::new(b"SQ");
    sq.push_tag(b"SN", "chr11");
    sq.push_tag(b"LN", 135_086_622);
    header.push_record(&sq);
    header
}

fn aligned_record(qname: &[u8], pos: i64, mapq: u8, cigar: Vec<Cigar>) -> bam::Record {
    let query_len: usize = cigar
        .iter()
        .map(|op| match op {
            Cigar::Match(len) | Cigar::Equal(len) | Cigar::Diff(len) | Cigar::Ins(len)
            | Cigar::SoftClip(len) => *len as usize,
            _ => 0,
        })
        .sum();
    let seq = vec![b'A'; query_len];
    let qual = vec![30u8; query_len];

    let mut record = bam::Record::new();
    record.set(qname, Some(&CigarString(cigar)), &seq, &qual);
    record.set_tid(0);
    record.set_pos(pos);
    record.set_mapq(mapq);
    // `Record::new()` initializes the record as unmapped; clear that flag so
    // this builder produces the aligned primary read its name and callers
    // assume (the classifier ignores unmapped reads).
    record.unset_unmapped();
    record
}

fn write_indexed_bam(path: &Path, header: &Header, records: &[bam::Record]) {
    {
        let mut writer = bam::Writer::from_path(path, header, Format::Bam).unwrap();
        for record in records {
            writer.write(record).unwrap();
        }
    }
    bam::index::build(path, None, bam::index::Type::Bai, 1).unwrap();
}

#[test]
fn batch_classifies_samples_and_merge_combines_them() {
    let dir = tempfile::tempdir().unwrap();
    let sample_dir = dir.path().join("barcode01");
    fs::create_dir_all(&sample_dir).unwrap();
    let bam_path = sample_dir.join("barcode01.sorted.bam");

    let records = vec![
        // Wild-type span.
        aligned_record(b"wt", 5_245_000, 60, vec![Cigar::Match(7_000)]),
        // Expected excision product.
        aligned_record(
            b"del",
            5_245_000,
            60,
            vec![Cigar::Match(5_097), Cigar::Del(4_928), Cigar::Match(1_000)],
        ),
        // Below the mapping-quality floor; excluded from every count.
        aligned_record(b"lowq", 5_245_000, 5, vec![Cigar::Match(7_000)]),
        // Sub-wild-type span.
        aligned_record(b"trunc", 5_245_000, 60, vec![Cigar::Match(3_000)]),
    ];
    write_indexed_bam(&bam_path, &chr11_header(), &records);

    outcome::run(
        dir.path().to_string_lossy().into_owned(),
        ClassifyOptions::default(),
    )
    .unwrap();

    let summary_path = sample_dir.join(format!("barcode01{}", SUMMARY_SUFFIX));
    let summary = fs::read_to_string(&summary_path).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            "sample,total_reads,WT,truncated_reads,small_indels,del_5kb,Artifact,Unclassified_reads",
            "barcode01,3,1,1,0,1,0,0",
        ]
    );

    merge::run(dir.path().to_string_lossy().into_owned()).unwrap();
    let combined = fs::read_to_string(dir.path().join(SUMMARY_SUFFIX)).unwrap();
    let lines: Vec<&str> = combined.lines().collect();
    assert_eq!(
        lines,
        vec![
            "sample,total_reads,WT,small_indels,del_5kb",
            "barcode01,3,1,0,1",
        ]
    );
}

#[test]
fn sample_missing_the_target_chromosome_is_skipped() {
    let dir = tempfile::tempdir().unwrap();

    let good_dir = dir.path().join("barcode01");
    fs::create_dir_all(&good_dir).unwrap();
    write_indexed_bam(
        &good_dir.join("barcode01.sorted.bam"),
        &chr11_header(),
        &[aligned_record(b"wt", 5_245_000, 60, vec![Cigar::Match(7_000)])],
    );

    // A BAM aligned to a reference without chr11.
    let bad_dir = dir.path().join("barcode02");
    fs::create_dir_all(&bad_dir).unwrap();
    let mut other_header = Header::new();
    let mut sq = HeaderRecord::new(b"SQ");
    sq.push_tag(b"SN", "chr1");
    sq.push_tag(b"LN", 248_956_422);
    other_header.push_record(&sq);
    write_indexed_bam(
        &bad_dir.join("barcode02.sorted.bam"),
        &other_header,
        &[aligned_record(b"stray", 5_245_000, 60, vec![Cigar::Match(7_000)])],
    );

    outcome::run(
        dir.path().to_string_lossy().into_owned(),
        ClassifyOptions::default(),
    )
    .unwrap();

    assert!(good_dir
        .join(format!("barcode01{}", SUMMARY_SUFFIX))
        .exists());
    assert!(!bad_dir
        .join(format!("barcode02{}", SUMMARY_SUFFIX))
        .exists());
}

#[test]
fn unreadable_bam_is_skipped_without_aborting_the_batch() {
    let dir = tempfile::tempdir().unwrap();

    let good_dir = dir.path().join("barcode01");
    fs::create_dir_all(&good_dir).unwrap();
    write_indexed_bam(
        &good_dir.join("barcode01.sorted.bam"),
        &chr11_header(),
        &[aligned_record(b"wt", 5_245_000, 60, vec![Cigar::Match(7_000)])],
    );

    // Not a BAM at all, and no index either.
    let bad_dir = dir.path().join("barcode02");
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("barcode02.sorted.bam"), b"not a bam").unwrap();

    outcome::run(
        dir.path().to_string_lossy().into_owned(),
        ClassifyOptions::default(),
    )
    .unwrap();

    assert!(good_dir
        .join(format!("barcode01{}", SUMMARY_SUFFIX))
        .exists());
    assert!(!bad_dir
        .join(format!("barcode02{}", SUMMARY_SUFFIX))
        .exists());
}

#[test]
fn secondary_alignments_are_excluded_from_the_tally() {
    let dir = tempfile::tempdir().unwrap();
    let sample_dir = dir.path().join("barcode03");
    fs::create_dir_all(&sample_dir).unwrap();

    let mut secondary = aligned_record(b"sec", 5_245_000, 60, vec![Cigar::Match(7_000)]);
    secondary.set_secondary();

    write_indexed_bam(
        &sample_dir.join("barcode03.sorted.bam"),
        &chr11_header(),
        &[
            aligned_record(b"wt", 5_245_000, 60, vec![Cigar::Match(7_000)]),
            secondary,
        ],
    );

    let counts = outcome::process_sample(
        &sample_dir.join("barcode03.sorted.bam"),
        &ClassifyOptions::default(),
    )
    .unwrap();
    assert_eq!(counts.total(), 1);
    assert_eq!(counts.wt, 1);
}
