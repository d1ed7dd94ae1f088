use belt_core::EndpointId;
use belt_path::PathError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    #[error("belt sources from {expected} but the config names {found}")]
    SourceMismatch { expected: EndpointId, found: EndpointId },

    #[error("endpoint {0} cannot feed itself")]
    SinkIsSource(EndpointId),

    #[error("endpoint {0} not found")]
    EndpointMissing(EndpointId),

    #[error("path error: {0}")]
    Path(#[from] PathError),
}

pub type TransportResult<T> = Result<T, TransportError>;
