use std::path::Path;

use anyhow::Result;

use sigmat_core::models::{MutationContext, VariantClass, VariantRecord};

use crate::builders::{
    BuildContext, ContextBuilder, SampleMatrix, bump, group_by_chromosome, merge_into,
    read_sorted_records, write_chrom_matrix,
};

/// Event sizes of five bases and above share one bucket.
const SIZE_CAP: usize = 5;

///
/// Catalogue builder for the insertion/deletion context.
///
/// The limited key set classifies events by kind and size
/// (`Del:1` .. `Del:5+`, `Ins:1` .. `Ins:5+`); the extended set further
/// splits single-base events by the affected base (`Del:C:1`).
///
pub struct IndelBuilder {
    extended: bool,
}

impl IndelBuilder {
    pub fn new(extended: bool) -> IndelBuilder {
        IndelBuilder { extended }
    }

    fn key(&self, record: &VariantRecord) -> Option<String> {
        let reference = allele_bases(&record.reference);
        let variant = allele_bases(&record.variant);
        if reference.len() == variant.len() {
            return None;
        }

        let (kind, changed) = if variant.len() > reference.len() {
            ("Ins", strip_common_prefix(variant, reference))
        } else {
            ("Del", strip_common_prefix(reference, variant))
        };

        let size = changed.len();
        let size_label = if size >= SIZE_CAP {
            format!("{}+", SIZE_CAP)
        } else {
            size.to_string()
        };

        if self.extended && size == 1 {
            return Some(format!("{}:{}:{}", kind, changed, size_label));
        }

        Some(format!("{}:{}", kind, size_label))
    }
}

impl ContextBuilder for IndelBuilder {
    fn context(&self) -> MutationContext {
        MutationContext::Indel
    }

    fn build(&self, sorted: &Path, ctx: &BuildContext) -> Result<SampleMatrix> {
        let records = read_sorted_records(sorted)?;

        let mut total = SampleMatrix::new();
        for (chrom, group) in group_by_chromosome(&records) {
            let mut part = SampleMatrix::new();

            for record in group {
                if record.class != VariantClass::Indel {
                    continue;
                }
                if !ctx.includes(&record.chrom, record.position_value()) {
                    continue;
                }
                if let Some(key) = self.key(record) {
                    bump(&mut part, &record.sample, key);
                }
            }

            write_chrom_matrix(MutationContext::Indel, chrom, &part, ctx)?;
            merge_into(&mut total, &part);
        }

        Ok(total)
    }
}

/// Allele text with the annotation-format placeholder for "no bases"
/// removed.
fn allele_bases(allele: &str) -> &str {
    if allele == "-" { "" } else { allele }
}

/// The bases of `longer` left over after removing the leading bases it
/// shares with `shorter`.
fn strip_common_prefix<'a>(longer: &'a str, shorter: &str) -> &'a str {
    let shared = longer
        .bytes()
        .zip(shorter.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    &longer[shared..]
}
