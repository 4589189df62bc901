use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::errors::{Result, SigmatError};
use crate::models::chrom::normalize_chrom;
use crate::utils::get_dynamic_reader;

///
/// An inclusion filter built from a BED interval list.
///
/// Intervals are 0-based half-open, per the BED convention; variant
/// positions are 1-based. A record is included only if its locus falls
/// inside some interval for its chromosome. Read-only input to catalogue
/// builders for the duration of one run.
///
#[derive(Debug, Clone, Default)]
pub struct BedRanges {
    ranges: HashMap<String, Vec<(u64, u64)>>,
}

impl BedRanges {
    ///
    /// Load BED ranges from a file. Gzipped input is handled transparently,
    /// and `track`/`browser`/comment lines are skipped.
    ///
    /// # Arguments
    ///
    /// - path: path to the BED file
    ///
    pub fn from_file(path: &Path) -> Result<BedRanges> {
        let file_name = path.display().to_string();
        let reader = get_dynamic_reader(path).map_err(|_| {
            SigmatError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Failed to open BED file: {}", file_name),
            ))
        })?;

        let mut ranges: HashMap<String, Vec<(u64, u64)>> = HashMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            let malformed = |reason: String| SigmatError::MalformedRecord {
                file: file_name.clone(),
                line: index + 1,
                reason,
            };

            let mut parts = line.split_whitespace();
            let chrom = parts.next();
            let start = parts.next();
            let end = parts.next();

            let (chrom, start, end) = match (chrom, start, end) {
                (Some(chrom), Some(start), Some(end)) => (chrom, start, end),
                _ => {
                    return Err(malformed(
                        "expected at least three whitespace-separated fields".to_string(),
                    ));
                }
            };

            let start: u64 = start
                .parse()
                .map_err(|_| malformed(format!("invalid interval start: {}", start)))?;
            let end: u64 = end
                .parse()
                .map_err(|_| malformed(format!("invalid interval end: {}", end)))?;

            ranges
                .entry(normalize_chrom(chrom))
                .or_default()
                .push((start, end));
        }

        Ok(BedRanges { ranges })
    }

    /// Whether a 1-based variant position falls inside some interval for the
    /// given chromosome.
    pub fn contains(&self, chrom: &str, position: u64) -> bool {
        if position == 0 {
            return false;
        }
        let locus = position - 1;

        self.ranges
            .get(chrom)
            .map(|intervals| {
                intervals
                    .iter()
                    .any(|(start, end)| locus >= *start && locus < *end)
            })
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn interval_count(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }
}
