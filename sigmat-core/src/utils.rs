use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;

    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// List the variant-call files in an input directory, skipping hidden and
/// system files (names beginning with a dot, e.g. `.DS_Store`).
///
/// The returned paths are sorted by file name so that the first file is
/// stable across runs.
///
/// # Arguments
///
/// - dir: path to the input directory for one variant class
///
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {:?}", dir))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let hidden = path
            .file_name()
            .and_then(OsStr::to_str)
            .map(|name| name.starts_with('.'))
            .unwrap_or(true);

        if hidden || !path.is_file() {
            continue;
        }

        files.push(path);
    }

    files.sort();

    Ok(files)
}

///
/// Read all lines of a text file into a vector.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}
