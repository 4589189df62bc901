use std::io;
use thiserror::Error;

/// Error type for sigmat operations.
#[derive(Error, Debug)]
pub enum SigmatError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input file extension is not recognized by any converter.
    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    /// No input files were found for a variant class that must be processed.
    #[error("No input files found for the {0} variant class")]
    EmptyInput(String),

    /// A chromosome label has no rank in the fixed emission order.
    #[error("Chromosome label has no rank in the emission order: {0}")]
    InvalidChromosome(String),

    /// A converter could not extract the required fields from a record.
    #[error("Malformed record in {file} at line {line}: {reason}")]
    MalformedRecord {
        file: String,
        line: usize,
        reason: String,
    },

    /// An underlying context-builder call failed.
    #[error("Builder for the {0} context failed: {1}")]
    BuilderFailure(String, String),
}

/// Result type alias for sigmat operations.
pub type Result<T> = std::result::Result<T, SigmatError>;
