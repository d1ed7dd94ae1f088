//! Path-construction error type.

use thiserror::Error;

/// Errors produced by `belt-path`.
///
/// All of them are configuration errors: a belt that receives one falls back
/// to `Idle` instead of propagating it out of the tick loop.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("a path needs at least 2 anchors, got {0}")]
    TooFewAnchors(usize),

    #[error("path has zero length; the sink coincides with the source")]
    Degenerate,

    #[error("anchor {0} has a non-finite position or tangent")]
    NonFinite(usize),
}

pub type PathResult<T> = Result<T, PathError>;
