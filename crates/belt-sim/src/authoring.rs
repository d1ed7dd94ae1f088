//! Two-step belt authoring: mark a source, optionally add waypoints, mark a
//! sink.

use belt_core::{CoreError, EndpointId};
use belt_path::Waypoint;
use belt_transport::{BeltConfig, TransportError};
use belt_world::World;

use crate::{BeltSim, SimError, SimResult};

/// An in-progress authoring session.
///
/// The session holds nothing but ids and waypoints; validation against the
/// simulation happens when an endpoint is marked.  A failed `mark_sink`
/// leaves the session intact so the author can pick another sink.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeltAuthoring {
    source: Option<EndpointId>,
    waypoints: Vec<Waypoint>,
}

impl BeltAuthoring {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn source(&self) -> Option<EndpointId> {
        self.source
    }

    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Start a session at `endpoint`, discarding any earlier one.
    pub fn mark_source<W: World>(&mut self, sim: &BeltSim<W>, endpoint: EndpointId) -> SimResult<()> {
        if sim.world.endpoint(endpoint).is_none() {
            return Err(CoreError::EndpointNotFound(endpoint).into());
        }
        self.source = Some(endpoint);
        self.waypoints.clear();
        Ok(())
    }

    /// Append a waypoint.  A second waypoint at the same position is
    /// rejected.
    pub fn add_waypoint(&mut self, waypoint: Waypoint) -> SimResult<()> {
        if self.source.is_none() {
            return Err(SimError::NoSource);
        }
        if self.waypoints.iter().any(|w| w.position == waypoint.position) {
            return Err(SimError::DuplicateWaypoint(waypoint.position));
        }
        self.waypoints.push(waypoint);
        Ok(())
    }

    /// Finish the session into a config ready for [`BeltSim::link`].
    pub fn mark_sink<W: World>(&mut self, sim: &BeltSim<W>, endpoint: EndpointId) -> SimResult<BeltConfig> {
        let source = self.source.ok_or(SimError::NoSource)?;
        if endpoint == source {
            return Err(TransportError::SinkIsSource(endpoint).into());
        }
        if sim.world.endpoint(endpoint).is_none() {
            return Err(CoreError::EndpointNotFound(endpoint).into());
        }
        for id in [source, endpoint] {
            if sim.is_used(id) {
                return Err(SimError::EndpointInUse(id));
            }
        }

        let waypoints = std::mem::take(&mut self.waypoints);
        self.source = None;
        Ok(BeltConfig {
            source,
            sink: endpoint,
            waypoints,
            filter: None,
        })
    }

    /// Abandon the session.
    pub fn reset(&mut self) {
        self.source = None;
        self.waypoints.clear();
    }
}
