use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use sigmat_core::models::{MutationContext, VariantClass, VariantRecord};

use crate::builders::{
    BuildContext, ContextBuilder, SampleMatrix, bump, group_by_chromosome, merge_into,
    read_sorted_records, write_chrom_matrix,
};

///
/// Catalogue builder for the dinucleotide context.
///
/// Counts pairs of single-base substitutions at adjacent positions of the
/// same sample and chromosome. Each record can belong to at most one pair;
/// a consumed record does not also start the next pair.
///
pub struct DinucBuilder;

impl ContextBuilder for DinucBuilder {
    fn context(&self) -> MutationContext {
        MutationContext::Dinuc
    }

    fn build(&self, sorted: &Path, ctx: &BuildContext) -> Result<SampleMatrix> {
        let records = read_sorted_records(sorted)?;

        let mut total = SampleMatrix::new();
        for (chrom, group) in group_by_chromosome(&records) {
            let mut part = SampleMatrix::new();

            // records interleave samples within a chromosome; pair-scan each
            // sample's run separately
            let mut by_sample: HashMap<&str, Vec<&VariantRecord>> = HashMap::new();
            for record in group {
                if record.class != VariantClass::Snv {
                    continue;
                }
                if record.reference.len() != 1 || record.variant.len() != 1 {
                    continue;
                }
                by_sample.entry(&record.sample).or_default().push(record);
            }

            for (sample, records) in &by_sample {
                let mut previous: Option<&VariantRecord> = None;
                for record in records.iter().copied() {
                    if let Some(first) = previous {
                        let adjacent =
                            record.position_value() == first.position_value() + 1;
                        let included = ctx.includes(chrom, first.position_value())
                            && ctx.includes(chrom, record.position_value());

                        if adjacent && included {
                            let key = format!(
                                "{}{}>{}{}",
                                first.reference,
                                record.reference,
                                first.variant,
                                record.variant
                            );
                            bump(&mut part, sample, key);
                            previous = None;
                            continue;
                        }
                    }
                    previous = Some(record);
                }
            }

            write_chrom_matrix(MutationContext::Dinuc, chrom, &part, ctx)?;
            merge_into(&mut total, &part);
        }

        Ok(total)
    }
}
