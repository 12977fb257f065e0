use std::path::Path;

use anyhow::{Context, Result};
use rust_htslib::bam;

pub struct BamReaderFactory;

impl BamReaderFactory {
    /// Opens a coordinate-sorted BAM together with its index.
    pub fn open_indexed(bam_path: &Path) -> Result<bam::IndexedReader> {
        bam::IndexedReader::from_path(bam_path)
            .with_context(|| format!("could not open {}", bam_path.display()))
    }
}
