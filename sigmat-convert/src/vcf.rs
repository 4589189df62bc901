use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;

use sigmat_core::errors::SigmatError;
use sigmat_core::models::chrom::normalize_chrom;
use sigmat_core::models::{VariantClass, VariantRecord};
use sigmat_core::utils::{get_dynamic_reader, list_input_files};

use crate::format::ConvertRequest;
use crate::txt::open_canonical_writer;

///
/// Convert standard variant-call format input (`.vcf`) into canonical
/// records.
///
/// The sample identifier comes from the file name, one sample per file.
/// Header lines are skipped, multi-allelic ALT entries fan out to one
/// canonical record each, and only records matching the requested variant
/// class are kept: single-base substitutions for SNV, length-changing
/// allele pairs for INDEL.
///
/// # Arguments
///
/// - request: the conversion job for one variant class
///
pub fn convert_vcf(request: &ConvertRequest) -> Result<u64> {
    let files = list_input_files(request.input_dir)?;
    let mut writer = open_canonical_writer(&request.output)?;

    let mut written: u64 = 0;
    for file in &files {
        let reader = get_dynamic_reader(file)?;
        let file_name = file.display().to_string();
        let sample = sample_name(file);

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = |reason: String| SigmatError::MalformedRecord {
                file: file_name.clone(),
                line: index + 1,
                reason,
            };

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 5 {
                return Err(malformed(format!(
                    "expected at least 5 columns, found {}",
                    fields.len()
                ))
                .into());
            }

            let chrom = normalize_chrom(fields[0]);
            let position = fields[1].trim();
            let reference = fields[3].trim();
            let alternates = fields[4].trim();

            if position.parse::<u64>().map(|p| p == 0).unwrap_or(true) {
                return Err(malformed(format!("invalid position: {}", position)).into());
            }
            if reference.is_empty() || alternates.is_empty() {
                return Err(malformed("missing REF or ALT allele".to_string()).into());
            }

            for alternate in alternates.split(',') {
                if !matches_class(request.class, reference, alternate) {
                    continue;
                }

                let record = VariantRecord {
                    project: request.project.to_string(),
                    sample: sample.clone(),
                    genome: request.genome.to_string(),
                    class: request.class,
                    chrom: chrom.clone(),
                    position: position.to_string(),
                    reference: reference.to_string(),
                    variant: alternate.to_string(),
                };

                writeln!(writer, "{}", record.as_line())?;
                written += 1;
            }
        }
    }

    writer.flush()?;

    Ok(written)
}

/// Sample identifier from the file name, with every extension stripped
/// (`PD1001a.vcf.gz` -> `PD1001a`).
fn sample_name(path: &Path) -> String {
    let mut stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    while let Some(dot) = stem.rfind('.') {
        if dot == 0 {
            break;
        }
        stem = &stem[..dot];
    }

    stem.to_string()
}

fn is_base(allele: &str) -> bool {
    allele.len() == 1 && matches!(allele.as_bytes()[0], b'A' | b'C' | b'G' | b'T')
}

fn matches_class(class: VariantClass, reference: &str, alternate: &str) -> bool {
    match class {
        VariantClass::Snv => {
            is_base(reference) && is_base(alternate) && reference != alternate
        }
        VariantClass::Indel => reference.len() != alternate.len(),
    }
}
