use std::path::{Path, PathBuf};

use anyhow::Result;

use sigmat_core::models::VariantClass;

use crate::maf::convert_maf;
use crate::txt::convert_txt;
use crate::vcf::convert_vcf;

///
/// The input formats recognized by the converters, identified by file
/// extension.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Vcf,
    Maf,
}

impl InputFormat {
    pub fn from_extension(extension: &str) -> Option<InputFormat> {
        match extension {
            "genome" | "txt" => Some(InputFormat::Text),
            "vcf" => Some(InputFormat::Vcf),
            "maf" => Some(InputFormat::Maf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<InputFormat> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(InputFormat::from_extension)
    }
}

///
/// One conversion job: every input file of one variant class, normalized
/// into a single canonical record file in the scratch area.
///
#[derive(Debug)]
pub struct ConvertRequest<'a> {
    /// Sample-set identifier.
    pub project: &'a str,
    /// Reference assembly name, carried through to the canonical records.
    pub genome: &'a str,
    pub class: VariantClass,
    /// Input directory holding the raw files for this class. Never mutated.
    pub input_dir: &'a Path,
    /// Canonical record file to (re)create in the scratch area.
    pub output: PathBuf,
}

/// A converter: transforms every raw input file of one class into canonical
/// records, returning the number of records written.
pub type ConvertFn = fn(&ConvertRequest) -> Result<u64>;

/// Converter-selection table for one variant class.
pub fn converter_table(class: VariantClass) -> &'static [(InputFormat, ConvertFn)] {
    match class {
        VariantClass::Snv => &[
            (InputFormat::Text, convert_txt),
            (InputFormat::Vcf, convert_vcf),
            (InputFormat::Maf, convert_maf),
        ],
        VariantClass::Indel => &[
            (InputFormat::Text, convert_txt),
            (InputFormat::Vcf, convert_vcf),
            (InputFormat::Maf, convert_maf),
        ],
    }
}

/// Resolve the converter for a class and input format.
pub fn converter(class: VariantClass, format: InputFormat) -> ConvertFn {
    converter_table(class)
        .iter()
        .find(|(table_format, _)| *table_format == format)
        .map(|(_, convert)| *convert)
        .expect("every class table covers every input format")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("sample.genome", Some(InputFormat::Text))]
    #[case("sample.txt", Some(InputFormat::Text))]
    #[case("sample.vcf", Some(InputFormat::Vcf))]
    #[case("sample.maf", Some(InputFormat::Maf))]
    #[case("sample.xyz", None)]
    #[case("sample", None)]
    fn test_format_from_path(#[case] name: &str, #[case] expected: Option<InputFormat>) {
        assert_eq!(InputFormat::from_path(Path::new(name)), expected);
    }

    #[rstest]
    fn test_every_class_resolves_every_format() {
        for class in VariantClass::ALL {
            for format in [InputFormat::Text, InputFormat::Vcf, InputFormat::Maf] {
                let _ = converter(class, format);
            }
        }
    }
}
