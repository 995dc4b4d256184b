use crate::models::{GeneId, SampleId};

pub const LABEL_SEPARATOR: char = '-';

/// Prefix token the sequencing facility puts in front of every gene name.
pub const GENE_MARKER: &str = "SPL";

/// Split a `<gene>-<sample>` label. Everything after the first separator is
/// the sample, so `"g-s1-s2"` gives `("g", "s1-s2")`.
///
/// Returns `None` when the label has no separator or either side is empty.
pub fn parse_label(label: &str) -> Option<(GeneId, SampleId)> {
    let (gene, sample) = label.trim().split_once(LABEL_SEPARATOR)?;
    if gene.is_empty() || sample.is_empty() {
        return None;
    }
    Some((gene.to_string(), sample.to_string()))
}

pub fn abbreviate(gene_id: &str) -> String {
    let mut name = gene_id.replace(GENE_MARKER, "");
    // removing one marker can splice two halves into a new one ("SPSPLL")
    while name.contains(GENE_MARKER) {
        name = name.replace(GENE_MARKER, "");
    }
    name
}
