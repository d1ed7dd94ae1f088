use belt_core::EndpointId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("endpoint {0} already exists")]
    DuplicateEndpoint(EndpointId),

    #[error("endpoint {0} has an invalid id")]
    InvalidEndpoint(EndpointId),
}

pub type WorldResult<T> = Result<T, WorldError>;
