use crate::outcome::types::DeletionWindow;

/// Genomic thresholds for outcome classification at the HBG1/2 locus.
/// Built once at startup and passed explicitly; the defaults describe the
/// 9.5kb long-range PCR product on chr11 and its expected ~5kb excision.
#[derive(Clone, Debug)]
pub struct ClassifyOptions {
    pub target_chrom: String,
    /// Reads must sit fully inside [locus_start, locus_end].
    pub locus_start: i64,
    pub locus_end: i64,
    /// Alternative breakpoint pairs for the expected excision product.
    pub deletion_windows: Vec<DeletionWindow>,
    /// Deletion lengths considered for the large-deletion rule.
    pub del_min_len: i64,
    pub del_max_len: i64,
    /// Product-size band accepted even when neither breakpoint pair fits.
    pub del_band_min: i64,
    pub del_band_max: i64,
    pub min_mapq: u8,
    /// Queries shorter than this are artifacts.
    pub short_read_len: i64,
    pub wt_min_len: i64,
    pub wt_max_len: i64,
    pub truncated_min_len: i64,
    /// Guide cut positions probed for short indels.
    pub cut_sites: Vec<i64>,
    /// Half-width of the window around each cut site.
    pub indel_window: i64,
    /// Longest indel operation still counted as a small indel.
    pub max_indel_len: i64,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            target_chrom: "chr11".to_string(),
            locus_start: 5_244_000,
            locus_end: 5_259_000,
            deletion_windows: vec![
                DeletionWindow::new(5_250_097, 5_255_025, 60),
                DeletionWindow::new(5_249_028, 5_253_928, 60),
            ],
            del_min_len: 4_600,
            del_max_len: 5_400,
            del_band_min: 4_923,
            del_band_max: 4_933,
            min_mapq: 10,
            short_read_len: 1_800,
            wt_min_len: 6_000,
            wt_max_len: 10_500,
            truncated_min_len: 2_000,
            cut_sites: vec![5_250_100, 5_255_040],
            indel_window: 10,
            max_indel_len: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_hbg_locus() {
        let options = ClassifyOptions::default();
        assert_eq!(options.target_chrom, "chr11");
        assert!(options.locus_start < options.locus_end);
        assert_eq!(options.deletion_windows.len(), 2);
        assert_eq!(options.cut_sites.len(), 2);
        for window in &options.deletion_windows {
            let span = window.end - window.start;
            assert!(span >= options.del_min_len && span <= options.del_max_len);
        }
        // The band is the expected product size plus/minus a few bases.
        assert!(options.del_band_min >= options.del_min_len);
        assert!(options.del_band_max <= options.del_max_len);
    }
}
