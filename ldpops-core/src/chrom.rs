//! Chromosome label normalization.
//!
//! Spline files tag their chromosomes with whatever label the upstream
//! pipeline used (`chr17`, `17`, `x|y`, `M`, ...); the catalog stores a
//! canonical 1-based ordinal.

/// Canonical chromosome order; the ordinal is the 1-based position here.
pub const CHROMOSOMES: [&str; 26] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "XY", "MT",
];

/// Ordinal recorded for chromosome labels with no canonical match.
pub const UNKNOWN_CHROM: i16 = -1;

/// Map a free-text chromosome label to its canonical ordinal.
///
/// Case-insensitive, tolerates a leading `chr` prefix, and rewrites the
/// aliases `X|Y` and `M`. Returns `None` when the label has no canonical
/// match; this function never fails.
pub fn normalize(label: &str) -> Option<i16> {
    let mut tag = label.to_uppercase();
    if let Some(stripped) = tag.strip_prefix("CHR") {
        tag = stripped.to_string();
    }

    let tag = match tag.as_str() {
        "X|Y" => "XY",
        "M" => "MT",
        other => other,
    };

    CHROMOSOMES
        .iter()
        .position(|c| *c == tag)
        .map(|index| (index + 1) as i16)
}
