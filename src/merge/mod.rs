use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::outcome::SUMMARY_SUFFIX;

/// Columns kept in the combined report, in output order.
pub const KEEP_COLUMNS: [&str; 5] = ["sample", "total_reads", "WT", "small_indels", "del_5kb"];

/// Collects the per-sample summaries found in the immediate subdirectories
/// of the root, projects each onto [`KEEP_COLUMNS`], and concatenates them
/// into `<root>/_resumed_outcomes_CRISPR.csv`. Unreadable or malformed
/// inputs are reported and skipped; with no usable input nothing is written.
pub fn run(root: String) -> Result<(), Box<dyn Error>> {
    let root = PathBuf::from(root);
    let summary_paths = discover_summaries(&root)?;
    if summary_paths.is_empty() {
        println!("No {} files found under {}", SUMMARY_SUFFIX, root.display());
        return Ok(());
    }

    let mut rows = Vec::new();
    for path in &summary_paths {
        match project_rows(path, &KEEP_COLUMNS) {
            Ok(mut projected) => {
                println!("Imported {}", path.display());
                rows.append(&mut projected);
            }
            Err(e) => {
                eprintln!("Warning: skipping {}: {:#}", path.display(), e);
            }
        }
    }

    if rows.is_empty() {
        println!("No rows to merge");
        return Ok(());
    }

    let out_path = root.join(SUMMARY_SUFFIX);
    write_combined(&out_path, &KEEP_COLUMNS, &rows)?;
    println!("Combined report exported to {}", out_path.display());
    Ok(())
}

/// Scans the immediate subdirectories of the root, in name order, for
/// per-sample summary files.
fn discover_summaries(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<_> = fs::read_dir(root)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|entry| entry.path().is_dir())
        .collect();
    dirs.sort_by_key(|entry| entry.file_name());

    let mut found = Vec::new();
    for dir in dirs {
        let mut files: Vec<_> = fs::read_dir(dir.path())?.collect::<io::Result<Vec<_>>>()?;
        files.sort_by_key(|entry| entry.file_name());
        for file in files {
            let path = file.path();
            if path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(SUMMARY_SUFFIX))
            {
                found.push(path);
            }
        }
    }
    Ok(found)
}

/// Reads one summary CSV and projects every row onto the kept columns by
/// header lookup. Extra input columns are dropped; a missing kept column
/// makes the whole file malformed.
fn project_rows(path: &Path, keep: &[&str]) -> Result<Vec<StringRecord>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("could not open {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let indices: Vec<usize> = keep
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|header| header == *column)
                .ok_or_else(|| anyhow!("missing column '{}'", column))
        })
        .collect::<Result<_>>()?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let projected: Vec<&str> = indices
            .iter()
            .map(|&index| record.get(index).unwrap_or(""))
            .collect();
        rows.push(StringRecord::from(projected));
    }
    Ok(rows)
}

fn write_combined(path: &Path, keep: &[&str], rows: &[StringRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    writer.write_record(keep)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}
