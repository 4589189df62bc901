use std::path::Path;

use anyhow::Result;

use sigmat_core::models::{MutationContext, VariantClass, VariantRecord};

use crate::builders::genome::Strand;
use crate::builders::{
    BuildContext, ContextBuilder, SampleMatrix, bump, group_by_chromosome, merge_into,
    read_sorted_records, write_chrom_matrix,
};

///
/// Catalogue builder for the single-base-substitution context schemes.
///
/// The scheme determines the key shape: no flanking bases for 6/12, one for
/// 96/192, two for 1536/3072. Keys of the pyrimidine-normalized schemes are
/// reverse-complemented onto a C/T reference base; the strand-split schemes
/// (192/3072) prefix the key with the transcription-strand annotation and
/// only count transcribed/untranscribed loci.
///
pub struct SubstitutionBuilder {
    context: MutationContext,
}

impl SubstitutionBuilder {
    pub fn new(context: MutationContext) -> SubstitutionBuilder {
        SubstitutionBuilder { context }
    }

    fn key(&self, record: &VariantRecord, ctx: &BuildContext) -> Option<String> {
        let mut reference = single_base(&record.reference)?;
        let mut variant = single_base(&record.variant)?;
        if reference == variant {
            return None;
        }

        let strand_prefix = if self.context.strand_split() {
            match ctx.genome.strand(&record.chrom, record.position_value()) {
                Strand::Transcribed => Some('T'),
                Strand::Untranscribed => Some('U'),
                _ => return None,
            }
        } else {
            None
        };

        let flank = self.context.flank();
        let mut left = String::new();
        let mut right = String::new();

        if flank > 0 {
            let window = ctx
                .genome
                .context(&record.chrom, record.position_value(), flank)?;
            if !window.chars().all(is_base) {
                return None;
            }
            // the record disagrees with the assembly at this locus
            if window.as_bytes()[flank] as char != reference {
                return None;
            }

            left = window[..flank].to_string();
            right = window[flank + 1..].to_string();
        }

        if self.context.pyrimidine_normalized() && matches!(reference, 'A' | 'G') {
            reference = complement(reference);
            variant = complement(variant);
            if flank > 0 {
                let flipped_left = revcomp(&right);
                let flipped_right = revcomp(&left);
                left = flipped_left;
                right = flipped_right;
            }
        }

        let core = if flank == 0 {
            format!("{}>{}", reference, variant)
        } else {
            format!("{}[{}>{}]{}", left, reference, variant, right)
        };

        Some(match strand_prefix {
            Some(prefix) => format!("{}:{}", prefix, core),
            None => core,
        })
    }
}

impl ContextBuilder for SubstitutionBuilder {
    fn context(&self) -> MutationContext {
        self.context
    }

    fn build(&self, sorted: &Path, ctx: &BuildContext) -> Result<SampleMatrix> {
        let records = read_sorted_records(sorted)?;

        let mut total = SampleMatrix::new();
        for (chrom, group) in group_by_chromosome(&records) {
            let mut part = SampleMatrix::new();

            for record in group {
                if record.class != VariantClass::Snv {
                    continue;
                }
                if !ctx.includes(&record.chrom, record.position_value()) {
                    continue;
                }
                if let Some(key) = self.key(record, ctx) {
                    bump(&mut part, &record.sample, key);
                }
            }

            write_chrom_matrix(self.context, chrom, &part, ctx)?;
            merge_into(&mut total, &part);
        }

        Ok(total)
    }
}

fn is_base(base: char) -> bool {
    matches!(base, 'A' | 'C' | 'G' | 'T')
}

fn single_base(allele: &str) -> Option<char> {
    if allele.len() != 1 {
        return None;
    }
    let base = allele.chars().next()?;
    is_base(base).then_some(base)
}

fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'C' => 'G',
        'G' => 'C',
        'T' => 'A',
        other => other,
    }
}

fn revcomp(bases: &str) -> String {
    bases.chars().rev().map(complement).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::genome::InMemoryGenome;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(chrom: &str, position: &str, reference: &str, variant: &str) -> VariantRecord {
        VariantRecord {
            project: "TestA".to_string(),
            sample: "PD1001a".to_string(),
            genome: "GRCh37".to_string(),
            class: VariantClass::Snv,
            chrom: chrom.to_string(),
            position: position.to_string(),
            reference: reference.to_string(),
            variant: variant.to_string(),
        }
    }

    fn context_for<'a>(genome: &'a InMemoryGenome) -> BuildContext<'a> {
        BuildContext {
            project: "TestA",
            genome,
            exome: false,
            bed: None,
            chrom_based: false,
            plot: false,
            output_dir: None,
        }
    }

    #[fixture]
    fn genome() -> InMemoryGenome {
        let mut genome = InMemoryGenome::new();
        //                          123456789
        genome.insert_sequence("1", "TTACGTGAC");
        genome
    }

    #[rstest]
    fn test_trinucleotide_key(genome: InMemoryGenome) {
        let builder = SubstitutionBuilder::new(MutationContext::Sbs96);
        let ctx = context_for(&genome);

        // position 4 is the C in ..ACG..
        let key = builder.key(&record("1", "4", "C", "T"), &ctx);
        assert_eq!(key.as_deref(), Some("A[C>T]G"));
    }

    #[rstest]
    fn test_purine_reference_is_reverse_complemented(genome: InMemoryGenome) {
        let builder = SubstitutionBuilder::new(MutationContext::Sbs96);
        let ctx = context_for(&genome);

        // position 7 is the G in ..TGA..; G>A maps onto the opposite strand
        let key = builder.key(&record("1", "7", "G", "A"), &ctx);
        assert_eq!(key.as_deref(), Some("T[C>T]A"));
    }

    #[rstest]
    fn test_pentanucleotide_key(genome: InMemoryGenome) {
        let builder = SubstitutionBuilder::new(MutationContext::Sbs1536);
        let ctx = context_for(&genome);

        let key = builder.key(&record("1", "4", "C", "A"), &ctx);
        assert_eq!(key.as_deref(), Some("TA[C>A]GT"));
    }

    #[rstest]
    fn test_assembly_mismatch_is_skipped(genome: InMemoryGenome) {
        let builder = SubstitutionBuilder::new(MutationContext::Sbs96);
        let ctx = context_for(&genome);

        let key = builder.key(&record("1", "4", "G", "T"), &ctx);
        assert_eq!(key, None);
    }

    #[rstest]
    fn test_six_key_needs_no_reference(genome: InMemoryGenome) {
        let builder = SubstitutionBuilder::new(MutationContext::Sbs6);
        let ctx = context_for(&genome);

        let key = builder.key(&record("22", "12345", "G", "C"), &ctx);
        assert_eq!(key.as_deref(), Some("C>G"));
    }

    #[rstest]
    fn test_twelve_key_is_unnormalized(genome: InMemoryGenome) {
        let builder = SubstitutionBuilder::new(MutationContext::Sbs12);
        let ctx = context_for(&genome);

        let key = builder.key(&record("22", "12345", "G", "C"), &ctx);
        assert_eq!(key.as_deref(), Some("G>C"));
    }

    #[rstest]
    fn test_strand_split_counts_only_annotated_loci() {
        let mut genome = InMemoryGenome::new();
        genome.insert_sequence("1", "TTACGTGAC");
        genome.annotate_strand("1", 4, Strand::Transcribed);

        let builder = SubstitutionBuilder::new(MutationContext::Sbs192);
        let ctx = context_for(&genome);

        let annotated = builder.key(&record("1", "4", "C", "T"), &ctx);
        assert_eq!(annotated.as_deref(), Some("T:A[C>T]G"));

        // position 8 has no annotation, so the strand-split scheme skips it
        let unannotated = builder.key(&record("1", "8", "A", "G"), &ctx);
        assert_eq!(unannotated, None);
    }
}
