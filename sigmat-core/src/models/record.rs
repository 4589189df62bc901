use crate::errors::{Result, SigmatError};
use crate::models::class::VariantClass;

/// Number of TAB-separated columns in a canonical record line.
const CANONICAL_COLUMNS: usize = 8;

///
/// The canonical, format-independent representation of one variant call.
///
/// Records are serialized one per line in the scratch file as
/// `project\tsample\tgenome\tclass\tchrom\tposition\tref\talt`. The position
/// is kept as text: the record sorter orders positions lexically, and the
/// original text must survive a parse/serialize round trip unchanged.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantRecord {
    pub project: String,
    pub sample: String,
    pub genome: String,
    pub class: VariantClass,
    pub chrom: String,
    pub position: String,
    pub reference: String,
    pub variant: String,
}

impl VariantRecord {
    ///
    /// Parse one canonical record line.
    ///
    /// # Arguments
    ///
    /// - line: one TAB-separated line from a canonical record file
    /// - file: name of the file the line came from, for error reporting
    /// - line_number: 1-based line number, for error reporting
    ///
    pub fn from_line(line: &str, file: &str, line_number: usize) -> Result<VariantRecord> {
        let malformed = |reason: &str| SigmatError::MalformedRecord {
            file: file.to_string(),
            line: line_number,
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != CANONICAL_COLUMNS {
            return Err(malformed(&format!(
                "expected {} columns, found {}",
                CANONICAL_COLUMNS,
                fields.len()
            )));
        }

        let class = VariantClass::from_tag(fields[3])
            .ok_or_else(|| malformed(&format!("unknown variant class tag: {}", fields[3])))?;

        let position = fields[5].to_string();
        match position.parse::<u64>() {
            Ok(value) if value > 0 => {}
            _ => return Err(malformed(&format!("invalid position: {}", position))),
        }

        Ok(VariantRecord {
            project: fields[0].to_string(),
            sample: fields[1].to_string(),
            genome: fields[2].to_string(),
            class,
            chrom: fields[4].to_string(),
            position,
            reference: fields[6].to_string(),
            variant: fields[7].to_string(),
        })
    }

    /// Serialize the record back to its canonical line form.
    pub fn as_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.project,
            self.sample,
            self.genome,
            self.class.tag(),
            self.chrom,
            self.position,
            self.reference,
            self.variant,
        )
    }

    /// Numeric genomic position. Validated at parse time.
    pub fn position_value(&self) -> u64 {
        self.position.parse().unwrap_or(0)
    }

    /// The allele-change field used as the final sort key.
    pub fn allele_change(&self) -> String {
        format!("{}>{}", self.reference, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn canonical_line() -> &'static str {
        "TestA\tPD1001a\tGRCh37\tSNV\t1\t100\tC\tT"
    }

    #[rstest]
    fn test_parse_round_trip(canonical_line: &str) {
        let record = VariantRecord::from_line(canonical_line, "single.txt", 1).unwrap();

        assert_eq!(record.sample, "PD1001a");
        assert_eq!(record.class, VariantClass::Snv);
        assert_eq!(record.position_value(), 100);
        assert_eq!(record.allele_change(), "C>T");
        assert_eq!(record.as_line(), canonical_line);
    }

    #[rstest]
    #[case("TestA\tPD1001a\tGRCh37\tSNV\t1\t100\tC")]
    #[case("TestA\tPD1001a\tGRCh37\tSNV\t1\t0\tC\tT")]
    #[case("TestA\tPD1001a\tGRCh37\tSNV\t1\tabc\tC\tT")]
    #[case("TestA\tPD1001a\tGRCh37\tSV\t1\t100\tC\tT")]
    fn test_malformed_lines_are_rejected(#[case] line: &str) {
        let result = VariantRecord::from_line(line, "single.txt", 7);
        assert!(matches!(
            result,
            Err(SigmatError::MalformedRecord { line: 7, .. })
        ));
    }
}
