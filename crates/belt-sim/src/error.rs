use belt_core::{BeltId, CoreError, DVec3, EndpointId};
use belt_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("endpoint {0} already feeds belt {1}")]
    DuplicateSource(EndpointId, BeltId),

    #[error("endpoint {0} is in use")]
    EndpointInUse(EndpointId),

    #[error("no source endpoint has been marked")]
    NoSource,

    #[error("a waypoint at {0} was already added")]
    DuplicateWaypoint(DVec3),
}

pub type SimResult<T> = Result<T, SimError>;
