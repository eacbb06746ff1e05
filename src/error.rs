use crate::bind::BindError;
use crate::parse::ParseError;
use crate::policy::PolicyError;
use crate::source::SourceError;
use thiserror::Error;

/// Top-level error type for the docbind library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("bind error: {0}")]
    Bind(#[from] BindError),

    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("loader requires a document source")]
    MissingSource,
}
