//! Network-subsystem error type.

use thiserror::Error;

use fr_core::{ComplexId, Vec3};

/// Errors produced by `fr-net`.
///
/// None of these are fatal: agents translate every search failure into the
/// `Lost` state and retry on the next tick.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no route to {target} after exploring {explored} nodes")]
    NoRoute { target: ComplexId, explored: usize },

    #[error("target {0} has no footprint")]
    UnknownTarget(ComplexId),

    #[error("no network node near {0}")]
    NoEntryNode(Vec3),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
