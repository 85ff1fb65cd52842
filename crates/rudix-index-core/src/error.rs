//! Domain-specific errors for index generation

use std::io;

use thiserror::Error;

/// Malformed metadata CSV.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetadataError {
    /// Input contained no records at all
    #[error("Metadata is empty: expected a header row")]
    MissingHeader,

    /// A quoted field ran to end of input without its closing quote
    #[error("Unterminated quoted field in record starting on line {line}")]
    UnterminatedQuote {
        /// Line on which the offending record starts (1-based)
        line: usize,
    },
}

/// Failure while producing the index page.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Reading an input or writing the page failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Metadata table could not be parsed
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
}
