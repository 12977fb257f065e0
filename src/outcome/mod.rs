mod classifier;
mod options;
mod report;
mod types;

pub use classifier::classify;
pub use options::ClassifyOptions;
pub use report::{write_summary, SummaryRow, SUMMARY_SUFFIX};
pub use types::{DeletionWindow, Outcome, OutcomeCounts, ReadAlignment};

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rust_htslib::bam::Read;

use crate::utils::bam_reader::BamReaderFactory;

/// Alignment files are discovered by this suffix; the enclosing directory
/// names the sample.
pub const BAM_SUFFIX: &str = ".sorted.bam";

/// Walks the root for sorted BAMs, classifies every read on the target
/// chromosome, and writes one summary CSV next to each BAM. A sample that
/// cannot be read is reported and skipped; the batch continues.
pub fn run(root: String, options: ClassifyOptions) -> Result<(), Box<dyn Error>> {
    let bam_paths = discover_bams(Path::new(&root))?;
    if bam_paths.is_empty() {
        println!("No {} files found under {}", BAM_SUFFIX, root);
        return Ok(());
    }

    let progress = ProgressBar::new(bam_paths.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    for bam_path in &bam_paths {
        let sample = sample_name(bam_path);
        progress.set_message(format!("Processing {}", sample));

        match process_sample(bam_path, &options) {
            Ok(counts) => {
                let row = SummaryRow::new(&sample, &counts);
                let out_path = bam_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(format!("{}{}", sample, SUMMARY_SUFFIX));
                report::write_summary(&out_path, &row)?;
                progress.println(format!("Summary for {} exported to {}", sample, out_path.display()));
            }
            Err(e) => {
                progress.println(format!("Warning: skipping {}: {:#}", bam_path.display(), e));
            }
        }
        progress.inc(1);
    }

    progress.finish_with_message("Classification complete");
    Ok(())
}

/// Classifies every read of one sample and tallies the outcomes. Fails when
/// the BAM cannot be opened or the target chromosome is absent from it.
pub fn process_sample(bam_path: &Path, options: &ClassifyOptions) -> Result<OutcomeCounts> {
    let mut bam = BamReaderFactory::open_indexed(bam_path)?;
    let header = bam.header().clone();

    bam.fetch(options.target_chrom.as_str()).with_context(|| {
        format!(
            "'{}' not found in {}",
            options.target_chrom,
            bam_path.display()
        )
    })?;

    let mut counts = OutcomeCounts::default();
    for result in bam.records() {
        let record = result.with_context(|| format!("malformed record in {}", bam_path.display()))?;
        let read = ReadAlignment::from_record(&record, &header);
        counts.record(classify(&read, options));
    }
    Ok(counts)
}

/// The sample is named after the directory holding its BAM.
pub fn sample_name(bam_path: &Path) -> String {
    bam_path
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Recursively collects `*.sorted.bam` paths. Entries are visited in name
/// order so discovery order is stable across runs.
fn discover_bams(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.ends_with(BAM_SUFFIX))
        {
            found.push(path);
        }
    }
    Ok(())
}
