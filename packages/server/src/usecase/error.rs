//! UseCase errors.

use thiserror::Error;

/// A request line that does not form a command.
///
/// The `Display` text is sent back to the client as the reply, except for
/// [`ParseError::Empty`] which gets no reply at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty request")]
    Empty,

    #[error("command not recognized: {0}")]
    Unrecognized(String),

    #[error("cannot process {0}")]
    MissingArgument(&'static str),

    #[error("cannot process {0}")]
    InvalidArgument(&'static str, String),
}
