use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use sigmat_core::models::MutationContext;

use crate::builders::SampleMatrix;

#[cfg(feature = "dataframe")]
use polars::prelude::*;

///
/// The uniform tabular form of one context's counts: context-key rows by
/// sample columns, absent combinations zero. Immutable once assembled.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountTable {
    samples: Vec<String>,
    keys: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl CountTable {
    ///
    /// Build the dense table from a builder's per-sample counts. Samples
    /// and context-keys are sorted, so the table layout is deterministic.
    ///
    pub fn from_sample_matrix(matrix: &SampleMatrix) -> CountTable {
        let samples: Vec<String> = matrix.keys().cloned().collect();

        let keys: Vec<String> = matrix
            .values()
            .flat_map(|counts| counts.keys().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let counts = keys
            .iter()
            .map(|key| {
                samples
                    .iter()
                    .map(|sample| {
                        matrix
                            .get(sample)
                            .and_then(|counts| counts.get(key))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        CountTable {
            samples,
            keys,
            counts,
        }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Count for one (sample, context-key) cell; absent cells are zero.
    pub fn get(&self, sample: &str, key: &str) -> u64 {
        let column = match self.samples.iter().position(|s| s == sample) {
            Some(column) => column,
            None => return 0,
        };
        let row = match self.keys.iter().position(|k| k == key) {
            Some(row) => row,
            None => return 0,
        };
        self.counts[row][column]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn sample_total(&self, sample: &str) -> u64 {
        let column = match self.samples.iter().position(|s| s == sample) {
            Some(column) => column,
            None => return 0,
        };
        self.counts.iter().map(|row| row[column]).sum()
    }

    /// The nonzero cells as (sample, context-key, count) triples.
    pub fn nonzero(&self) -> Vec<(&str, &str, u64)> {
        let mut cells = Vec::new();
        for (row, key) in self.keys.iter().enumerate() {
            for (column, sample) in self.samples.iter().enumerate() {
                let count = self.counts[row][column];
                if count > 0 {
                    cells.push((sample.as_str(), key.as_str(), count));
                }
            }
        }
        cells
    }

    ///
    /// Write the table as a TSV matrix file: a `MutationType` column
    /// followed by one column per sample.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    ///
    pub fn write_tsv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);

        writeln!(writer, "MutationType\t{}", self.samples.join("\t"))?;
        for (row, key) in self.keys.iter().enumerate() {
            let cells: Vec<String> = self.counts[row].iter().map(u64::to_string).collect();
            writeln!(writer, "{}\t{}", key, cells.join("\t"))?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Convert to a polars dataframe, one row per context-key.
    #[cfg(feature = "dataframe")]
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.samples.len() + 1);
        columns.push(Column::new("MutationType".into(), &self.keys));

        for (column, sample) in self.samples.iter().enumerate() {
            let values: Vec<i64> = self.counts.iter().map(|row| row[column] as i64).collect();
            columns.push(Column::new(sample.as_str().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}

///
/// Merge the per-context tables collected across both variant classes into
/// the final result mapping. Entries are only ever added; a duplicate
/// context name means two classes produced the same context, which the
/// disjoint class context sets make unreachable.
///
pub fn collect(
    parts: Vec<(MutationContext, SampleMatrix)>,
) -> Result<BTreeMap<String, CountTable>> {
    let mut result: BTreeMap<String, CountTable> = BTreeMap::new();

    for (context, matrix) in parts {
        let name = context.name().to_string();
        if result.contains_key(&name) {
            anyhow::bail!("duplicate context table: {}", name);
        }
        result.insert(name, CountTable::from_sample_matrix(&matrix));
    }

    Ok(result)
}
