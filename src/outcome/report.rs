use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::outcome::types::OutcomeCounts;

/// Suffix shared by the per-sample summaries and the combined report.
pub const SUMMARY_SUFFIX: &str = "_resumed_outcomes_CRISPR.csv";

/// One CSV row per sample. Field order fixes the column order; renames pin
/// the published header names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub sample: String,
    pub total_reads: u64,
    #[serde(rename = "WT")]
    pub wt: u64,
    pub truncated_reads: u64,
    pub small_indels: u64,
    pub del_5kb: u64,
    #[serde(rename = "Artifact")]
    pub artifact: u64,
    #[serde(rename = "Unclassified_reads")]
    pub unclassified_reads: u64,
}

impl SummaryRow {
    pub fn new(sample: &str, counts: &OutcomeCounts) -> Self {
        Self {
            sample: sample.to_string(),
            total_reads: counts.total(),
            wt: counts.wt,
            truncated_reads: counts.truncated_reads,
            small_indels: counts.small_indels,
            del_5kb: counts.del_5kb,
            artifact: counts.artifact,
            unclassified_reads: counts.unclassified_reads,
        }
    }
}

pub fn write_summary(path: &Path, row: &SummaryRow) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    writer.serialize(row)?;
    writer
        .flush()
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}
