//! Infrastructure errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while loading the seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected '<flight> <seats>', got '{content}'")]
    Malformed { line: usize, content: String },

    #[error("line {line}: invalid seat count '{value}' (allowed 0..={max})")]
    InvalidSeats {
        line: usize,
        value: String,
        max: u32,
    },

    #[error("line {line}: flight '{flight}' listed twice")]
    Duplicate { line: usize, flight: String },
}
