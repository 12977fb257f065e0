use std::fmt;

use rust_htslib::bam::record::Cigar;
use rust_htslib::bam::{HeaderView, Record};

/// Editing outcome assigned to a single read. `Ignored` marks reads that
/// failed the exclusion filter; they never contribute to any count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ignored,
    Artifact,
    Del5kb,
    SmallIndels,
    Wt,
    Truncated,
    Unclassified,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Ignored => "ignored",
            Outcome::Artifact => "Artifact",
            Outcome::Del5kb => "del_5kb",
            Outcome::SmallIndels => "small_indels",
            Outcome::Wt => "WT",
            Outcome::Truncated => "truncated_reads",
            Outcome::Unclassified => "Unclassified_reads",
        };
        f.write_str(label)
    }
}

/// Expected breakpoint pair of an engineered deletion, matched with a
/// symmetric tolerance on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionWindow {
    pub start: i64,
    pub end: i64,
    pub tolerance: i64,
}

impl DeletionWindow {
    pub fn new(start: i64, end: i64, tolerance: i64) -> Self {
        Self {
            start,
            end,
            tolerance,
        }
    }

    pub fn matches(&self, observed_start: i64, observed_end: i64) -> bool {
        (observed_start - self.start).abs() <= self.tolerance
            && (observed_end - self.end).abs() <= self.tolerance
    }
}

/// The fields of one alignment the classifier looks at, extracted once from
/// a BAM record. Positions are 0-based; `ref_end` is start plus the aligned
/// reference span.
#[derive(Debug, Clone)]
pub struct ReadAlignment {
    pub chrom: String,
    pub ref_start: i64,
    pub ref_end: i64,
    pub query_len: i64,
    pub mapq: u8,
    pub is_unmapped: bool,
    pub is_secondary: bool,
    pub cigar: Vec<Cigar>,
}

impl ReadAlignment {
    pub fn from_record(record: &Record, header: &HeaderView) -> Self {
        let chrom = if record.tid() >= 0 {
            String::from_utf8_lossy(header.tid2name(record.tid() as u32)).into_owned()
        } else {
            String::new()
        };
        let cigar = record.cigar();

        Self {
            chrom,
            ref_start: record.pos(),
            ref_end: cigar.end_pos(),
            query_len: record.seq_len() as i64,
            mapq: record.mapq(),
            is_unmapped: record.is_unmapped(),
            is_secondary: record.is_secondary(),
            cigar: cigar.iter().cloned().collect(),
        }
    }

    pub fn align_len(&self) -> i64 {
        self.ref_end - self.ref_start
    }
}

/// Per-sample tally over the non-ignored outcome categories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub wt: u64,
    pub truncated_reads: u64,
    pub small_indels: u64,
    pub del_5kb: u64,
    pub artifact: u64,
    pub unclassified_reads: u64,
}

impl OutcomeCounts {
    /// Ignored reads touch neither a category nor the total.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Ignored => {}
            Outcome::Artifact => self.artifact += 1,
            Outcome::Del5kb => self.del_5kb += 1,
            Outcome::SmallIndels => self.small_indels += 1,
            Outcome::Wt => self.wt += 1,
            Outcome::Truncated => self.truncated_reads += 1,
            Outcome::Unclassified => self.unclassified_reads += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.wt
            + self.truncated_reads
            + self.small_indels
            + self.del_5kb
            + self.artifact
            + self.unclassified_reads
    }
}
