use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use sigmat_core::errors::SigmatError;
use sigmat_core::models::chrom::chrom_rank;
use sigmat_core::models::{VariantClass, VariantRecord};
use sigmat_core::utils::read_lines;

///
/// Sort the canonical record file for one variant class, in place.
///
/// The sort key is (chromosome rank, position, allele change). Positions
/// compare as text, not numerically ("100" sorts before "20"): downstream
/// catalogue outputs were produced under this ordering and it is preserved
/// bit-for-bit. Chromosome rank comes from the fixed emission order, so a
/// label without a rank is fatal here.
///
/// Returns the number of records sorted. A missing or empty canonical file
/// means conversion produced nothing, which halts the pipeline rather than
/// silently producing a zero matrix.
///
/// # Arguments
///
/// - path: the canonical record file written by a converter
/// - class: the variant class being sorted, for error reporting
///
pub fn sort_canonical_file(path: &Path, class: VariantClass) -> Result<u64> {
    if !path.is_file() {
        return Err(SigmatError::EmptyInput(class.tag().to_string()).into());
    }

    let file_name = path.display().to_string();
    let lines = read_lines(path)?;

    let mut keyed: Vec<(usize, String, String, String)> = Vec::with_capacity(lines.len());
    for (index, line) in lines.into_iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        let record = VariantRecord::from_line(&line, &file_name, index + 1)?;
        let rank = chrom_rank(&record.chrom)?;

        keyed.push((rank, record.position.clone(), record.allele_change(), line));
    }

    if keyed.is_empty() {
        return Err(SigmatError::EmptyInput(class.tag().to_string()).into());
    }

    keyed.sort();

    let mut writer = BufWriter::new(File::create(path)?);
    for (_, _, _, line) in &keyed {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    Ok(keyed.len() as u64)
}
