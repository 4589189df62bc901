use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use sigmat_core::errors::SigmatError;
use sigmat_core::models::VariantRecord;
use sigmat_core::models::chrom::normalize_chrom;
use sigmat_core::utils::{get_dynamic_reader, list_input_files};

use crate::format::ConvertRequest;

///
/// Convert plain delimited text input (`.genome` / `.txt`) into canonical
/// records.
///
/// The input is already near-canonical: one variant per line with columns
/// `sample  chrom  position  ref  alt`. The converter reformats the columns,
/// normalizes the chromosome label, and stamps each record with the project,
/// genome, and variant-class tag.
///
/// # Arguments
///
/// - request: the conversion job for one variant class
///
pub fn convert_txt(request: &ConvertRequest) -> Result<u64> {
    let files = list_input_files(request.input_dir)?;
    let mut writer = open_canonical_writer(&request.output)?;

    let mut written: u64 = 0;
    for file in &files {
        let reader = get_dynamic_reader(file)?;
        let file_name = file.display().to_string();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 5 {
                return Err(SigmatError::MalformedRecord {
                    file: file_name,
                    line: index + 1,
                    reason: format!("expected 5 columns, found {}", fields.len()),
                }
                .into());
            }

            let position = fields[2].trim();
            if position.parse::<u64>().map(|p| p == 0).unwrap_or(true) {
                return Err(SigmatError::MalformedRecord {
                    file: file_name,
                    line: index + 1,
                    reason: format!("invalid position: {}", position),
                }
                .into());
            }

            let record = VariantRecord {
                project: request.project.to_string(),
                sample: fields[0].trim().to_string(),
                genome: request.genome.to_string(),
                class: request.class,
                chrom: normalize_chrom(fields[1]),
                position: position.to_string(),
                reference: fields[3].trim().to_string(),
                variant: fields[4].trim().to_string(),
            };

            writeln!(writer, "{}", record.as_line())?;
            written += 1;
        }
    }

    writer.flush()?;

    Ok(written)
}

/// Open the canonical record file for writing, creating its parent
/// directories when needed.
pub(crate) fn open_canonical_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create canonical record file: {:?}", path))?;

    Ok(BufWriter::new(file))
}
