//! The `BeltSim` struct and its tick loop.

use belt_core::{BeltId, CoreError, EndpointId, SimClock, SimConfig, Tick};
use belt_transport::{Belt, BeltConfig, BeltRecord, BeltState, ConfigDelta};
use belt_world::World;

use crate::{Ledger, SimError, SimObserver, SimResult, TickSummary};

#[cfg(feature = "fx-hash")]
pub(crate) type SourceIndex = rustc_hash::FxHashMap<EndpointId, BeltId>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type SourceIndex = std::collections::HashMap<EndpointId, BeltId>;

/// The main simulation runner.
///
/// Owns the world collaborator and one [`Belt`] per source endpoint.  Belts
/// are kept sorted by id so every loop over them is deterministic; the
/// source index is only used for lookups, never iterated.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct BeltSim<W: World> {
    /// Global configuration (timing, speeds, total ticks, seed, ...).
    pub config: SimConfig,

    /// Simulation clock: current tick and its mapping to seconds.
    pub clock: SimClock,

    /// Endpoints, inventories and dropped items.
    pub world: W,

    pub(crate) belts: Vec<Belt>,
    pub(crate) by_source: SourceIndex,
    pub(crate) next_id: u32,
    pub(crate) ledger: Ledger,
    /// Deltas of belts removed between ticks, forwarded on the next tick.
    pub(crate) retired: Vec<(BeltId, ConfigDelta)>,
}

impl<W: World> BeltSim<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick, &self.ledger);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    // ── Belts ─────────────────────────────────────────────────────────────

    /// Create an idle belt for `source`.
    pub fn add_belt(&mut self, source: EndpointId) -> SimResult<BeltId> {
        if let Some(&existing) = self.by_source.get(&source) {
            return Err(SimError::DuplicateSource(source, existing));
        }
        if self.world.endpoint(source).is_none() {
            return Err(CoreError::EndpointNotFound(source).into());
        }
        let id = BeltId(self.next_id);
        self.next_id += 1;
        self.belts.push(Belt::new(id, source, self.config.seed));
        self.by_source.insert(source, id);
        log::debug!("added {id} for source {source}");
        Ok(id)
    }

    /// Install `config` on the belt sourcing from `config.source`, creating
    /// that belt if needed.
    pub fn link(&mut self, config: BeltConfig) -> SimResult<BeltId> {
        if self.world.endpoint(config.sink).is_none() {
            return Err(CoreError::EndpointNotFound(config.sink).into());
        }
        let id = match self.by_source.get(&config.source) {
            Some(&id) => id,
            None => self.add_belt(config.source)?,
        };
        self.belt_mut(id)
            .ok_or(CoreError::BeltNotFound(id))?
            .configure(config)?;
        Ok(id)
    }

    /// Drop the link of the belt sourcing from `source`.  Items in flight are
    /// returned to the world; the count is returned.
    pub fn unlink(&mut self, source: EndpointId) -> SimResult<u64> {
        let id = *self
            .by_source
            .get(&source)
            .ok_or(CoreError::EndpointNotFound(source))?;
        let Ok(index) = self.index_of(id) else {
            return Err(CoreError::BeltNotFound(id).into());
        };
        let dropped = self.belts[index].unlink(&mut self.world);
        self.ledger.dropped += dropped;
        Ok(dropped)
    }

    /// Tear down every belt touching `endpoint`.
    ///
    /// The belt sourcing from it is removed entirely; belts sinking into it
    /// are unlinked and stay as idle belts.  Call this before removing the
    /// endpoint from the world so drained items land at the right spot.
    /// Every resulting unlink reaches [`SimObserver::on_config_delta`] on the
    /// next tick.  Returns the number of items returned to the world.
    pub fn remove_endpoint(&mut self, endpoint: EndpointId) -> u64 {
        let mut dropped = 0;
        for belt in self.belts.iter_mut().filter(|b| b.sink() == Some(endpoint)) {
            dropped += belt.unlink(&mut self.world);
        }
        if let Some(id) = self.by_source.remove(&endpoint) {
            if let Ok(index) = self.index_of(id) {
                let mut belt = self.belts.remove(index);
                dropped += belt.unlink(&mut self.world);
                if let Some(delta) = belt.take_delta() {
                    self.retired.push((id, delta));
                }
            }
        }
        if dropped > 0 {
            log::info!("removing {endpoint} returned {dropped} items to the world");
        }
        self.ledger.dropped += dropped;
        dropped
    }

    pub fn belt(&self, id: BeltId) -> Option<&Belt> {
        self.index_of(id).ok().map(|i| &self.belts[i])
    }

    pub fn belt_mut(&mut self, id: BeltId) -> Option<&mut Belt> {
        self.index_of(id).ok().map(|i| &mut self.belts[i])
    }

    /// The belt sourcing from `source`.
    pub fn belt_for(&self, source: EndpointId) -> Option<&Belt> {
        self.by_source.get(&source).and_then(|&id| self.belt(id))
    }

    /// All belts in ascending id order.
    #[inline]
    pub fn belts(&self) -> &[Belt] {
        &self.belts
    }

    #[inline]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Item count on all belts right now.
    pub fn items_in_transit(&self) -> u64 {
        self.belts.iter().map(|b| b.queue().item_count()).sum()
    }

    /// `true` if `endpoint` sources a linked belt or some belt targeted it
    /// less than `liveness_window_ticks` ago.  Authoring refuses endpoints
    /// in use.
    pub fn is_used(&self, endpoint: EndpointId) -> bool {
        if self.belt_for(endpoint).is_some_and(Belt::is_linked) {
            return true;
        }
        let now = self.clock.current_tick;
        self.world
            .last_targeted(endpoint)
            .is_some_and(|t| now.since(t) < self.config.liveness_window_ticks)
    }

    /// Persisted form of every belt, in id order.
    pub fn records(&self) -> Vec<BeltRecord> {
        self.belts.iter().map(Belt::to_record).collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer);
        observer.on_tick_end(now, &summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.belts);
        }
        self.clock.advance();
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> TickSummary {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        for (id, delta) in self.retired.drain(..) {
            observer.on_config_delta(id, &delta);
        }

        // Explicit field borrows so the borrow checker sees disjoint access.
        let world  = &mut self.world;
        let config = &self.config;
        let ledger = &mut self.ledger;

        for belt in self.belts.iter_mut() {
            let report = belt.tick(world, now, config);
            ledger.record(&report);

            summary.extracted += report.extracted as u64;
            summary.inserted += report.inserted as u64;
            summary.dropped += report.dropped;
            match report.state {
                BeltState::Idle => {}
                BeltState::Active => summary.active_belts += 1,
                BeltState::Blocked => {
                    summary.active_belts += 1;
                    summary.blocked_belts += 1;
                }
            }
            if belt.take_dirty() {
                summary.dirty_belts += 1;
            }
            if let Some(delta) = belt.take_delta() {
                observer.on_config_delta(belt.id(), &delta);
            }
            summary.items_in_transit += belt.queue().item_count();
        }
        summary
    }

    #[inline]
    fn index_of(&self, id: BeltId) -> Result<usize, usize> {
        self.belts.binary_search_by_key(&id, Belt::id)
    }
}
