//! The world query collaborator.

use belt_core::{DVec3, EndpointId, Facing, ItemStack, Tick};

use crate::Inventory;

/// A transport endpoint: the block a belt starts or ends at.
///
/// The inventory an endpoint serves sits one unit *behind* it, on the side
/// opposite its facing.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    pub id: EndpointId,
    pub position: DVec3,
    pub facing: Facing,
}

impl Endpoint {
    pub fn new(id: EndpointId, position: DVec3, facing: Facing) -> Self {
        Self { id, position, facing }
    }

    /// Where the attached container lives.
    #[inline]
    pub fn container_position(&self) -> DVec3 {
        self.position - self.facing.vector()
    }
}

/// An item stack dropped into the world instead of being destroyed.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnedItem {
    pub position: DVec3,
    pub stack: ItemStack,
}

/// Everything a belt needs to ask of its surroundings.
///
/// All lookups are by id and re-evaluated on every call; implementations
/// must not assume a belt caches anything between ticks.
pub trait World {
    /// Resolve an endpoint, or `None` if it has been removed.
    fn endpoint(&self, id: EndpointId) -> Option<Endpoint>;

    /// The inventory attached behind `id`.
    ///
    /// `None` is a transient condition (no container placed, chunk not
    /// loaded, ...) and is retried next tick.
    fn inventory(&mut self, id: EndpointId) -> Option<&mut dyn Inventory>;

    /// Drop a stack into the world as a free entity.
    fn spawn_item(&mut self, position: DVec3, stack: ItemStack);

    /// Record that a belt targeted `id` at `now`.  Returns `false` when the
    /// endpoint no longer exists.
    fn mark_targeted(&mut self, id: EndpointId, now: Tick) -> bool;

    /// Last tick some belt targeted `id`.
    fn last_targeted(&self, id: EndpointId) -> Option<Tick>;
}
