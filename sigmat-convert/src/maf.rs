use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::Result;

use sigmat_core::errors::SigmatError;
use sigmat_core::models::chrom::normalize_chrom;
use sigmat_core::models::{VariantClass, VariantRecord};
use sigmat_core::utils::{get_dynamic_reader, list_input_files};

use crate::format::ConvertRequest;
use crate::txt::open_canonical_writer;

const SAMPLE_COLUMN: &str = "Tumor_Sample_Barcode";
const CHROM_COLUMN: &str = "Chromosome";
const POSITION_COLUMN: &str = "Start_Position";
const REFERENCE_COLUMN: &str = "Reference_Allele";
const VARIANT_COLUMN: &str = "Tumor_Seq_Allele2";
const TYPE_COLUMN: &str = "Variant_Type";

const REQUIRED_COLUMNS: &[&str] = &[
    SAMPLE_COLUMN,
    CHROM_COLUMN,
    POSITION_COLUMN,
    REFERENCE_COLUMN,
    VARIANT_COLUMN,
    TYPE_COLUMN,
];

///
/// Convert mutation annotation format input (`.maf`) into canonical records.
///
/// The tab-delimited header row names the columns; rows are selected by
/// `Variant_Type` (`SNP` for the SNV class, `INS`/`DEL` for INDEL). A file
/// whose header is missing a required column fails the whole conversion for
/// that file.
///
/// # Arguments
///
/// - request: the conversion job for one variant class
///
pub fn convert_maf(request: &ConvertRequest) -> Result<u64> {
    let files = list_input_files(request.input_dir)?;
    let mut writer = open_canonical_writer(&request.output)?;

    let mut written: u64 = 0;
    for file in &files {
        let reader = get_dynamic_reader(file)?;
        let file_name = file.display().to_string();

        let mut columns: Option<HashMap<String, usize>> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();

            // the first data line is the header row
            if columns.is_none() {
                let header: HashMap<String, usize> = fields
                    .iter()
                    .enumerate()
                    .map(|(position, name)| (name.trim().to_string(), position))
                    .collect();

                for required in REQUIRED_COLUMNS {
                    if !header.contains_key(*required) {
                        return Err(SigmatError::MalformedRecord {
                            file: file_name,
                            line: index + 1,
                            reason: format!("header is missing the {} column", required),
                        }
                        .into());
                    }
                }

                columns = Some(header);
                continue;
            }

            let header = columns.as_ref().expect("header row was parsed above");

            let variant_type = row_field(header, &fields, TYPE_COLUMN, &file_name, index + 1)?;
            if !matches_class(request.class, variant_type) {
                continue;
            }

            let position = row_field(header, &fields, POSITION_COLUMN, &file_name, index + 1)?;
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
                sample: row_field(header, &fields, SAMPLE_COLUMN, &file_name, index + 1)?
                    .to_string(),
                genome: request.genome.to_string(),
                class: request.class,
                chrom: normalize_chrom(row_field(
                    header,
                    &fields,
                    CHROM_COLUMN,
                    &file_name,
                    index + 1,
                )?),
                position: position.to_string(),
                reference: row_field(header, &fields, REFERENCE_COLUMN, &file_name, index + 1)?
                    .to_string(),
                variant: row_field(header, &fields, VARIANT_COLUMN, &file_name, index + 1)?
                    .to_string(),
            };

            writeln!(writer, "{}", record.as_line())?;
            written += 1;
        }
    }

    writer.flush()?;

    Ok(written)
}

/// Look up one named column in a data row.
fn row_field<'a>(
    header: &HashMap<String, usize>,
    fields: &[&'a str],
    name: &str,
    file: &str,
    line: usize,
) -> Result<&'a str, SigmatError> {
    header
        .get(name)
        .and_then(|position| fields.get(*position))
        .map(|value| value.trim())
        .ok_or_else(|| SigmatError::MalformedRecord {
            file: file.to_string(),
            line,
            reason: format!("row is missing the {} column", name),
        })
}

fn matches_class(class: VariantClass, variant_type: &str) -> bool {
    match class {
        VariantClass::Snv => variant_type == "SNP" || variant_type == "SNV",
        VariantClass::Indel => variant_type == "INS" || variant_type == "DEL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ConvertRequest;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::Path;

    const MAF_BODY: &str = "\
Hugo_Symbol\tChromosome\tStart_Position\tVariant_Type\tReference_Allele\tTumor_Seq_Allele2\tTumor_Sample_Barcode
TP53\t17\t7578406\tSNP\tC\tT\tPD1001a
BRCA2\t13\t32914437\tDEL\tTC\tT\tPD1001a
KRAS\t12\t25398284\tSNP\tG\tA\tPD1202a
";

    fn write_input(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("cohort.maf"), MAF_BODY).unwrap();
    }

    #[rstest]
    fn test_convert_maf_selects_class_rows() {
        let tempdir = tempfile::tempdir().unwrap();
        let input_dir = tempdir.path().join("SNV");
        write_input(&input_dir);

        let output = tempdir.path().join("single").join("TestA.SNV.txt");
        let request = ConvertRequest {
            project: "TestA",
            genome: "GRCh37",
            class: VariantClass::Snv,
            input_dir: &input_dir,
            output: output.clone(),
        };

        let count = convert_maf(&request).unwrap();
        assert_eq!(count, 2);

        let contents = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "TestA\tPD1001a\tGRCh37\tSNV\t17\t7578406\tC\tT");
        assert_eq!(lines[1], "TestA\tPD1202a\tGRCh37\tSNV\t12\t25398284\tG\tA");
    }

    #[rstest]
    fn test_convert_maf_indel_class() {
        let tempdir = tempfile::tempdir().unwrap();
        let input_dir = tempdir.path().join("INDEL");
        write_input(&input_dir);

        let output = tempdir.path().join("single").join("TestA.INDEL.txt");
        let request = ConvertRequest {
            project: "TestA",
            genome: "GRCh37",
            class: VariantClass::Indel,
            input_dir: &input_dir,
            output: output.clone(),
        };

        let count = convert_maf(&request).unwrap();
        assert_eq!(count, 1);

        let contents = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            contents.trim_end(),
            "TestA\tPD1001a\tGRCh37\tINDEL\t13\t32914437\tTC\tT"
        );
    }

    #[rstest]
    fn test_missing_required_column_fails() {
        let tempdir = tempfile::tempdir().unwrap();
        let input_dir = tempdir.path().join("SNV");
        std::fs::create_dir_all(&input_dir).unwrap();
        std::fs::write(
            input_dir.join("cohort.maf"),
            "Hugo_Symbol\tChromosome\tStart_Position\n",
        )
        .unwrap();

        let output = tempdir.path().join("single").join("TestA.SNV.txt");
        let request = ConvertRequest {
            project: "TestA",
            genome: "GRCh37",
            class: VariantClass::Snv,
            input_dir: &input_dir,
            output,
        };

        let error = convert_maf(&request).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SigmatError>(),
            Some(SigmatError::MalformedRecord { .. })
        ));
    }
}
