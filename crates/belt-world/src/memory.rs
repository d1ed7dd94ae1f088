//! A map-backed `World`.

use std::collections::BTreeMap;

use belt_core::{DVec3, EndpointId, ItemStack, Tick, geo::pack_position};

use crate::{Endpoint, Inventory, SlotInventory, SpawnedItem, World, WorldError, WorldResult};

/// In-memory world: endpoints by id, containers by block position.
///
/// `BTreeMap` keeps iteration order stable so runs are reproducible.
/// Containers are keyed by packed position, so two endpoints mounted on the
/// same container share it.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorld {
    endpoints:  BTreeMap<EndpointId, Endpoint>,
    containers: BTreeMap<i64, SlotInventory>,
    targeted:   BTreeMap<EndpointId, Tick>,
    spawned:    Vec<SpawnedItem>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Endpoints ─────────────────────────────────────────────────────────────

    pub fn add_endpoint(&mut self, endpoint: Endpoint) -> WorldResult<()> {
        if !endpoint.id.is_valid() {
            return Err(WorldError::InvalidEndpoint(endpoint.id));
        }
        if self.endpoints.contains_key(&endpoint.id) {
            return Err(WorldError::DuplicateEndpoint(endpoint.id));
        }
        self.endpoints.insert(endpoint.id, endpoint);
        Ok(())
    }

    /// Remove an endpoint and its liveness stamp.  The container it was
    /// mounted on stays.
    pub fn remove_endpoint(&mut self, id: EndpointId) -> Option<Endpoint> {
        self.targeted.remove(&id);
        self.endpoints.remove(&id)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    // ── Containers ────────────────────────────────────────────────────────────

    /// Place (or replace) the container at `position`.
    pub fn place_container(&mut self, position: DVec3, inventory: SlotInventory) -> Option<SlotInventory> {
        self.containers.insert(pack_position(position), inventory)
    }

    pub fn remove_container(&mut self, position: DVec3) -> Option<SlotInventory> {
        self.containers.remove(&pack_position(position))
    }

    pub fn container(&self, position: DVec3) -> Option<&SlotInventory> {
        self.containers.get(&pack_position(position))
    }

    pub fn container_mut(&mut self, position: DVec3) -> Option<&mut SlotInventory> {
        self.containers.get_mut(&pack_position(position))
    }

    /// The container behind an endpoint, read-only.
    pub fn container_of(&self, id: EndpointId) -> Option<&SlotInventory> {
        let endpoint = self.endpoints.get(&id)?;
        self.container(endpoint.container_position())
    }

    // ── Dropped items ─────────────────────────────────────────────────────────

    pub fn spawned(&self) -> &[SpawnedItem] {
        &self.spawned
    }

    /// Total item count dropped into the world so far.
    pub fn spawned_count(&self) -> u64 {
        self.spawned.iter().map(|s| s.stack.count as u64).sum()
    }

    pub fn take_spawned(&mut self) -> Vec<SpawnedItem> {
        std::mem::take(&mut self.spawned)
    }
}

impl World for MemoryWorld {
    fn endpoint(&self, id: EndpointId) -> Option<Endpoint> {
        self.endpoints.get(&id).copied()
    }

    fn inventory(&mut self, id: EndpointId) -> Option<&mut dyn Inventory> {
        let at = self.endpoints.get(&id)?.container_position();
        self.containers
            .get_mut(&pack_position(at))
            .map(|inv| inv as &mut dyn Inventory)
    }

    fn spawn_item(&mut self, position: DVec3, stack: ItemStack) {
        if stack.is_empty() {
            return;
        }
        log::trace!("spawned {stack} at {position}");
        self.spawned.push(SpawnedItem { position, stack });
    }

    fn mark_targeted(&mut self, id: EndpointId, now: Tick) -> bool {
        if !self.endpoints.contains_key(&id) {
            return false;
        }
        self.targeted.insert(id, now);
        true
    }

    fn last_targeted(&self, id: EndpointId) -> Option<Tick> {
        self.targeted.get(&id).copied()
    }
}
