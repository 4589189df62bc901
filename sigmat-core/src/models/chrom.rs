use crate::consts::{CHROM_ORDER, NCBI_CHROM};
use crate::errors::{Result, SigmatError};

///
/// Get the sort rank of a chromosome label in the fixed emission order.
///
/// Every label a converter emits must have a rank; an unmapped label (for
/// example mitochondrial or unplaced-scaffold names) breaks the total order
/// the catalogue builders depend on and is a fatal input error.
///
/// # Arguments
///
/// - label: normalized chromosome label (`"1"`..`"22"`, `"X"`, `"Y"`)
///
pub fn chrom_rank(label: &str) -> Result<usize> {
    CHROM_ORDER
        .iter()
        .position(|chrom| *chrom == label)
        .ok_or_else(|| SigmatError::InvalidChromosome(label.to_string()))
}

///
/// Normalize a raw chromosome label from an input file.
///
/// RefSeq accessions are mapped to their plain labels and a leading `chr`
/// prefix is stripped.
///
/// # Arguments
///
/// - raw: chromosome label as it appears in the input file
///
pub fn normalize_chrom(raw: &str) -> String {
    let label = raw.trim();

    if let Some((_, mapped)) = NCBI_CHROM.iter().find(|(accession, _)| *accession == label) {
        return mapped.to_string();
    }

    let label = label.strip_prefix("chr").unwrap_or(label);
    label.to_string()
}
