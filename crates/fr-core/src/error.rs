//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface configuration or lookup failures.

use thiserror::Error;

use crate::{ComplexId, PieceId};

/// The top-level error type for `fr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("complex {0} not found")]
    ComplexNotFound(ComplexId),

    #[error("track piece {0} not found")]
    PieceNotFound(PieceId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fr-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
