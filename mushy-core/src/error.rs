use std::path::PathBuf;

use thiserror::Error;

use crate::dimensions::Dimensions;

/// Errors from dimensional analysis.
///
/// A mismatch always indicates a malformed property set or a programming
/// defect; it is never recoverable and never silently resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("dimension mismatch in `{context}`: {lhs} vs {rhs}")]
    Mismatch {
        context: String,
        lhs: Dimensions,
        rhs: Dimensions,
    },
}

/// Errors from field arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Dimensions(#[from] DimensionError),

    /// The operands are defined over different numbers of control volumes.
    #[error("field size mismatch in `{context}`: {lhs} vs {rhs} cells")]
    SizeMismatch {
        context: String,
        lhs: usize,
        rhs: usize,
    },
}

/// Errors from reading or writing a solver case on disk.
#[derive(Debug, Error)]
pub enum CaseError {
    /// A field marked must-read is absent from the starting state.
    #[error("cannot read field `{name}`: no such file {path}")]
    MissingField { name: String, path: PathBuf },

    #[error("missing configuration file {path}")]
    MissingConfig { path: PathBuf },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
