pub mod dinuc;
pub mod genome;
pub mod indel;
pub mod snv;

// re-exports
pub use dinuc::DinucBuilder;
pub use genome::{DirGenome, InMemoryGenome, ReferenceGenome, Strand};
pub use indel::IndelBuilder;
pub use snv::SubstitutionBuilder;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use sigmat_core::models::{BedRanges, MutationContext, VariantRecord};
use sigmat_core::utils::read_lines;

use crate::assemble::CountTable;

/// Per-sample count table for one mutation context:
/// sample -> context-key -> count.
pub type SampleMatrix = BTreeMap<String, BTreeMap<String, u64>>;

///
/// Everything a catalogue builder needs besides the sorted records:
/// reference sequence access, the optional BED inclusion filter, and the
/// run flags it must honor.
///
pub struct BuildContext<'a> {
    pub project: &'a str,
    pub genome: &'a dyn ReferenceGenome,
    pub exome: bool,
    pub bed: Option<&'a BedRanges>,
    pub chrom_based: bool,
    pub plot: bool,
    /// Where per-chromosome matrix files go when `chrom_based` is set.
    pub output_dir: Option<&'a Path>,
}

impl BuildContext<'_> {
    /// The BED inclusion predicate; true when no BED filter was supplied.
    pub fn includes(&self, chrom: &str, position: u64) -> bool {
        self.bed
            .map(|ranges| ranges.contains(chrom, position))
            .unwrap_or(true)
    }
}

///
/// A catalogue builder for one mutation-context scheme. Builders consume
/// the sorted canonical record file one chromosome at a time and return
/// the per-sample count table for their context; the table is never
/// mutated after the builder returns.
///
pub trait ContextBuilder {
    fn context(&self) -> MutationContext;

    fn build(&self, sorted: &Path, ctx: &BuildContext) -> Result<SampleMatrix>;
}

/// Resolve the builder for a context.
pub fn builder_for(context: MutationContext, indel_extended: bool) -> Box<dyn ContextBuilder> {
    match context {
        MutationContext::Dinuc => Box::new(DinucBuilder),
        MutationContext::Indel => Box::new(IndelBuilder::new(indel_extended)),
        _ => Box::new(SubstitutionBuilder::new(context)),
    }
}

/// Parse the whole sorted canonical file.
pub(crate) fn read_sorted_records(path: &Path) -> Result<Vec<VariantRecord>> {
    let file_name = path.display().to_string();
    let lines = read_lines(path)?;

    let mut records = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        records.push(VariantRecord::from_line(line, &file_name, index + 1)?);
    }

    Ok(records)
}

/// Split sorted records into contiguous per-chromosome groups, preserving
/// the emission order of the sorted file.
pub(crate) fn group_by_chromosome(records: &[VariantRecord]) -> Vec<(&str, &[VariantRecord])> {
    let mut groups: Vec<(&str, &[VariantRecord])> = Vec::new();

    let mut start = 0;
    for index in 1..=records.len() {
        let boundary =
            index == records.len() || records[index].chrom != records[start].chrom;
        if boundary {
            groups.push((records[start].chrom.as_str(), &records[start..index]));
            start = index;
        }
    }

    groups
}

pub(crate) fn bump(matrix: &mut SampleMatrix, sample: &str, key: String) {
    *matrix
        .entry(sample.to_string())
        .or_default()
        .entry(key)
        .or_insert(0) += 1;
}

pub(crate) fn merge_into(total: &mut SampleMatrix, part: &SampleMatrix) {
    for (sample, counts) in part {
        let entry = total.entry(sample.clone()).or_default();
        for (key, count) in counts {
            *entry.entry(key.clone()).or_insert(0) += count;
        }
    }
}

/// Write one chromosome's partial table when per-chromosome output was
/// requested.
pub(crate) fn write_chrom_matrix(
    context: MutationContext,
    chrom: &str,
    part: &SampleMatrix,
    ctx: &BuildContext,
) -> Result<()> {
    if !ctx.chrom_based || part.is_empty() {
        return Ok(());
    }

    if let Some(output_dir) = ctx.output_dir {
        let table = CountTable::from_sample_matrix(part);
        let path = output_dir.join(format!(
            "{}.{}.chr{}.tsv",
            ctx.project,
            context.name(),
            chrom
        ));
        table.write_tsv(&path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use sigmat_core::models::VariantClass;

    fn record(chrom: &str, position: &str) -> VariantRecord {
        VariantRecord {
            project: "TestA".to_string(),
            sample: "PD1001a".to_string(),
            genome: "GRCh37".to_string(),
            class: VariantClass::Snv,
            chrom: chrom.to_string(),
            position: position.to_string(),
            reference: "C".to_string(),
            variant: "T".to_string(),
        }
    }

    #[rstest]
    fn test_group_by_chromosome() {
        let records = vec![
            record("X", "5"),
            record("X", "9"),
            record("1", "3"),
            record("2", "1"),
        ];

        let groups = group_by_chromosome(&records);
        let summary: Vec<(&str, usize)> =
            groups.iter().map(|(chrom, slice)| (*chrom, slice.len())).collect();

        assert_eq!(summary, vec![("X", 2), ("1", 1), ("2", 1)]);
    }

    #[rstest]
    fn test_group_by_chromosome_empty() {
        let groups = group_by_chromosome(&[]);
        assert!(groups.is_empty());
    }
}
