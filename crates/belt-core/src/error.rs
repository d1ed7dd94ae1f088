//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, which keeps `?` usable across crate boundaries.

use thiserror::Error;

use crate::{BeltId, EndpointId};

/// The top-level error type for `belt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("belt {0} not found")]
    BeltNotFound(BeltId),

    #[error("endpoint {0} not found")]
    EndpointNotFound(EndpointId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `belt-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
