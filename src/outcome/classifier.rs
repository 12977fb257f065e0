use rust_htslib::bam::record::Cigar;

use crate::outcome::options::ClassifyOptions;
use crate::outcome::types::{Outcome, ReadAlignment};

/// Assigns one read to exactly one outcome. Total and deterministic; rules
/// are tried in a fixed order and the first hit wins.
pub fn classify(read: &ReadAlignment, options: &ClassifyOptions) -> Outcome {
    if read.is_unmapped || read.is_secondary {
        return Outcome::Ignored;
    }
    if read.mapq < options.min_mapq {
        return Outcome::Ignored;
    }
    if read.chrom != options.target_chrom {
        return Outcome::Ignored;
    }
    // The read must be contained in the amplified locus.
    if read.ref_start < options.locus_start || read.ref_end > options.locus_end {
        return Outcome::Ignored;
    }

    if read.query_len < options.short_read_len {
        return Outcome::Artifact;
    }

    if has_expected_deletion(read, options) {
        return Outcome::Del5kb;
    }

    if has_cut_site_indel(read, options) {
        return Outcome::SmallIndels;
    }

    let align_len = read.align_len();
    if align_len >= options.wt_min_len && align_len <= options.wt_max_len {
        return Outcome::Wt;
    }
    if align_len >= options.truncated_min_len && align_len < options.wt_min_len {
        return Outcome::Truncated;
    }

    Outcome::Unclassified
}

/// Pairs each CIGAR op with the reference position where it begins.
/// Match/equal/mismatch and deletion/skip ops consume reference bases;
/// insertions and clips do not.
fn ref_walk<'a>(
    cigar: &'a [Cigar],
    start: i64,
) -> impl Iterator<Item = (&'a Cigar, i64)> + 'a {
    cigar.iter().scan(start, |cursor, op| {
        let at = *cursor;
        match op {
            Cigar::Match(len)
            | Cigar::Equal(len)
            | Cigar::Diff(len)
            | Cigar::Del(len)
            | Cigar::RefSkip(len) => *cursor += i64::from(*len),
            _ => {}
        }
        Some((op, at))
    })
}

/// Scans for a single deletion or skip consistent with the engineered
/// excision. The first deletion satisfying a breakpoint window or the
/// product-size band decides; non-matching deletions are walked past.
fn has_expected_deletion(read: &ReadAlignment, options: &ClassifyOptions) -> bool {
    for (op, at) in ref_walk(&read.cigar, read.ref_start) {
        let len = match op {
            Cigar::Del(len) | Cigar::RefSkip(len) => i64::from(*len),
            _ => continue,
        };
        if len < options.del_min_len || len > options.del_max_len {
            continue;
        }

        let (del_start, del_end) = (at, at + len);
        if options
            .deletion_windows
            .iter()
            .any(|window| window.matches(del_start, del_end))
        {
            return true;
        }
        // Breakpoints drifted off both windows but the product size fits.
        if len >= options.del_band_min && len <= options.del_band_max {
            return true;
        }
    }
    false
}

/// Looks for a short insertion or deletion at a guide cut site. This walk
/// does not traverse ref-skip ops; deletions still move the cursor, while
/// insertions consume no reference and leave it in place.
fn has_cut_site_indel(read: &ReadAlignment, options: &ClassifyOptions) -> bool {
    let mut cursor = read.ref_start;
    for op in &read.cigar {
        match op {
            Cigar::Match(len) | Cigar::Equal(len) | Cigar::Diff(len) => {
                cursor += i64::from(*len);
            }
            Cigar::Del(len) => {
                if i64::from(*len) <= options.max_indel_len && near_cut_site(cursor, options) {
                    return true;
                }
                cursor += i64::from(*len);
            }
            Cigar::Ins(len) => {
                if i64::from(*len) <= options.max_indel_len && near_cut_site(cursor, options) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

fn near_cut_site(pos: i64, options: &ClassifyOptions) -> bool {
    options
        .cut_sites
        .iter()
        .any(|cut| (pos - cut).abs() <= options.indel_window)
}
