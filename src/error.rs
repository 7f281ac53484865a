use std::{io, num::ParseIntError};

use thiserror::Error;

use crate::{BuildError, WildcardError};

/// Error is an error which may occur in the application.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to build automaton: {0}")]
    Build(#[from] BuildError),
    #[error(transparent)]
    Wildcard(#[from] WildcardError),
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid number of patterns {value:?}: {source}")]
    InvalidCount { value: String, source: ParseIntError },
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;
