//! Belt link configuration and the delta sent when it changes.

use belt_core::{EndpointId, ItemFilter};
use belt_path::Waypoint;

/// One directed transport link.
///
/// Produced by two-step authoring (mark source, then sink) and installed on
/// the source's [`Belt`][crate::Belt].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeltConfig {
    pub source: EndpointId,
    pub sink: EndpointId,
    /// Waypoints in traversal order.
    pub waypoints: Vec<Waypoint>,
    /// `None` accepts every item.
    pub filter: Option<ItemFilter>,
}

impl BeltConfig {
    /// A direct link with no waypoints and no filter.
    pub fn direct(source: EndpointId, sink: EndpointId) -> Self {
        Self {
            source,
            sink,
            waypoints: Vec::new(),
            filter: None,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_filter(mut self, filter: ItemFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub(crate) fn delta(&self) -> ConfigDelta {
        ConfigDelta {
            own: self.source,
            sink: Some(self.sink),
            waypoints: self.waypoints.clone(),
        }
    }
}

/// Minimal sync payload, emitted once per configuration change.
///
/// `sink = None` announces that the belt was unlinked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigDelta {
    pub own: EndpointId,
    pub sink: Option<EndpointId>,
    pub waypoints: Vec<Waypoint>,
}
