//! The per-belt state machine.

use belt_core::{BeltId, BeltRng, DVec3, EndpointId, ItemFilter, SimConfig, Tick, geo::pack_position};
use belt_path::{Anchor, Path, position_at};
use belt_world::World;

use crate::{BeltConfig, ConfigDelta, TransitItem, TransitQueue, TransportError, TransportResult};

// ── BeltState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeltState {
    /// No sink, or no valid path to it.
    #[default]
    Idle,
    /// A path exists and items can move.
    Active,
    /// Held items fill the whole path; loading is suspended until the sink
    /// accepts something.
    Blocked,
}

impl BeltState {
    pub fn as_str(self) -> &'static str {
        match self {
            BeltState::Idle    => "idle",
            BeltState::Active  => "active",
            BeltState::Blocked => "blocked",
        }
    }
}

// ── TickReport ────────────────────────────────────────────────────────────────

/// What one call to [`Belt::tick`] moved.  All counts are item counts, not
/// stacks.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickReport {
    /// Pulled from the source inventory.
    pub extracted: u32,
    /// Committed into the sink inventory.
    pub inserted: u32,
    /// Turned into world items.
    pub dropped: u64,
    /// Items held at the blocked boundary after the advance phase.
    pub queued: u32,
    pub state: BeltState,
}

// ── Belt ──────────────────────────────────────────────────────────────────────

/// One source endpoint and everything in flight from it.
///
/// A belt exists as soon as its source does and stays `Idle` until a
/// [`BeltConfig`] is installed.  The path is derived state: it is rebuilt
/// from the world on the first tick after a config change and on every
/// refresh cadence, never patched incrementally.
pub struct Belt {
    pub(crate) id: BeltId,
    pub(crate) source: EndpointId,
    pub(crate) link: Option<BeltConfig>,
    pub(crate) path: Option<Path>,
    pub(crate) queue: TransitQueue,
    pub(crate) state: BeltState,
    pub(crate) rng: BeltRng,
    /// Last resolved source position; drained items land here.
    pub(crate) origin: Option<DVec3>,
    /// Cadence offset spreading extraction across belts.
    pub(crate) load_offset: i64,
    pub(crate) needs_refresh: bool,
    pub(crate) path_error: Option<TransportError>,
    pub(crate) dirty: bool,
    pub(crate) delta: Option<ConfigDelta>,
}

impl Belt {
    pub fn new(id: BeltId, source: EndpointId, seed: u64) -> Self {
        Self {
            id,
            source,
            link: None,
            path: None,
            queue: TransitQueue::new(),
            state: BeltState::Idle,
            rng: BeltRng::new(seed, source),
            origin: None,
            load_offset: 0,
            needs_refresh: false,
            path_error: None,
            dirty: false,
            delta: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> BeltId {
        self.id
    }

    #[inline]
    pub fn source(&self) -> EndpointId {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> Option<EndpointId> {
        self.link.as_ref().map(|l| l.sink)
    }

    #[inline]
    pub fn config(&self) -> Option<&BeltConfig> {
        self.link.as_ref()
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    #[inline]
    pub fn queue(&self) -> &TransitQueue {
        &self.queue
    }

    #[inline]
    pub fn state(&self) -> BeltState {
        self.state
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.link.is_some()
    }

    /// The reason the last path rebuild failed, if it did.
    pub fn path_error(&self) -> Option<&TransportError> {
        self.path_error.as_ref()
    }

    /// Every item with its world position.  Empty while no path exists.
    pub fn positions(&self) -> impl Iterator<Item = (&TransitItem, DVec3)> + '_ {
        self.path.iter().flat_map(move |path| {
            self.queue
                .iter()
                .map(move |item| (item, position_at(path, item.progress as f64)))
        })
    }

    // ── Sync flags ────────────────────────────────────────────────────────────

    /// `true` if anything observable changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The pending configuration delta, if the link changed.
    pub fn take_delta(&mut self) -> Option<ConfigDelta> {
        self.delta.take()
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    /// Install a new link.  Items already in flight keep their progress and
    /// follow the new path once it is built on the next tick.
    pub fn configure(&mut self, config: BeltConfig) -> TransportResult<()> {
        if config.source != self.source {
            return Err(TransportError::SourceMismatch {
                expected: self.source,
                found:    config.source,
            });
        }
        if config.sink == config.source {
            return Err(TransportError::SinkIsSource(config.sink));
        }
        log::debug!("belt {} linked {} -> {}", self.id, config.source, config.sink);
        self.delta = Some(config.delta());
        self.link = Some(config);
        self.path = None;
        self.path_error = None;
        self.needs_refresh = true;
        self.dirty = true;
        Ok(())
    }

    /// Replace or clear the item filter.  Returns `false` on an unlinked belt.
    pub fn set_filter(&mut self, filter: Option<ItemFilter>) -> bool {
        match self.link.as_mut() {
            Some(link) => {
                link.filter = filter;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Drop the link, returning every item in flight to the world.
    pub fn unlink<W: World + ?Sized>(&mut self, world: &mut W) -> u64 {
        let dropped = self.drain(world);
        if self.link.take().is_some() {
            self.delta = Some(ConfigDelta {
                own:       self.source,
                sink:      None,
                waypoints: Vec::new(),
            });
        }
        self.path = None;
        self.path_error = None;
        self.set_state(BeltState::Idle);
        self.dirty = true;
        dropped
    }

    /// Convert every item in flight into a world item at the source.
    ///
    /// Returns the number of items dropped.
    pub fn drain<W: World + ?Sized>(&mut self, world: &mut W) -> u64 {
        if self.queue.is_empty() {
            return 0;
        }
        let at = world
            .endpoint(self.source)
            .map(|e| e.position)
            .or(self.origin)
            .or_else(|| self.path.as_ref().map(|p| p.start().position))
            .unwrap_or(DVec3::ZERO);

        let mut dropped = 0;
        for item in self.queue.take_all() {
            dropped += item.payload.count as u64;
            world.spawn_item(at, item.payload);
        }
        log::debug!("belt {} drained {dropped} items at {at}", self.id);
        self.dirty = true;
        dropped
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Advance the belt by one fixed step.
    pub fn tick<W: World + ?Sized>(&mut self, world: &mut W, now: Tick, cfg: &SimConfig) -> TickReport {
        let mut report = TickReport::default();

        if self.needs_refresh || (self.link.is_some() && now.is_cadence(cfg.refresh_interval_ticks, 0)) {
            report.dropped += self.refresh(world, now);
        }

        let Some(total) = self.path.as_ref().map(Path::total_length) else {
            if !self.queue.is_empty() {
                report.dropped += self.drain(world);
            }
            self.set_state(BeltState::Idle);
            report.state = self.state;
            return report;
        };

        let step = cfg.progress_per_tick(total);
        let squash = cfg.squash_factor / total;

        // ── Advance + hand-off ────────────────────────────────────────────────
        let mut queued: u32 = 0;
        let mut unloaded = false;
        let mut ahead = 1.0_f64;
        let mut i = 0;
        while let Some(item) = self.queue.get(i).copied() {
            let queue_start = 1.0 - queued as f64 * squash;
            let next = item.progress as f64 + step;

            if next >= queue_start {
                queued += 1;
                if queued == 1 {
                    if unloaded {
                        log::warn!(
                            "belt {}: item {} reached the sink after a hand-off this tick; holding it",
                            self.id,
                            item.id
                        );
                    } else if let Some((inserted, spilled)) = self.hand_off(world, &item) {
                        self.queue.remove(i);
                        report.inserted += inserted;
                        report.dropped += spilled as u64;
                        unloaded = true;
                        queued = 0;
                        self.dirty = true;
                        continue;
                    }
                }
                ahead = item.progress as f64;
            } else {
                // Never overtake the item in front, even at extreme speeds.
                let moved = next.min(ahead) as f32;
                if moved != item.progress {
                    if let Some(slot) = self.queue.get_mut(i) {
                        slot.progress = moved;
                    }
                    self.dirty = true;
                }
                ahead = moved as f64;
            }
            i += 1;
        }
        report.queued = queued;

        // ── Load ──────────────────────────────────────────────────────────────
        let queue_start = 1.0 - queued as f64 * squash;
        if queue_start >= 0.0 && now.is_cadence(cfg.extraction_interval(), self.load_offset) {
            if let Some(extracted) = self.load(world, cfg) {
                report.extracted += extracted;
                self.dirty = true;
            }
        }

        self.set_state(if queue_start < 0.0 { BeltState::Blocked } else { BeltState::Active });
        report.state = self.state;
        report
    }

    // ── Phases ────────────────────────────────────────────────────────────────

    /// Re-resolve endpoints, rebuild the path and stamp the sink.
    fn refresh<W: World + ?Sized>(&mut self, world: &mut W, now: Tick) -> u64 {
        self.needs_refresh = false;
        let Some(sink) = self.sink() else {
            return 0;
        };

        if let Some(source) = world.endpoint(self.source) {
            self.origin = Some(source.position);
            self.load_offset = pack_position(source.position);
        }

        if !world.mark_targeted(sink, now) {
            log::info!("belt {} lost its sink {sink}; returning items to the world", self.id);
            return self.unlink(world);
        }

        match self.build_path(world) {
            Ok(path) => {
                if self.path.as_ref() != Some(&path) {
                    self.path = Some(path);
                    self.dirty = true;
                }
                self.path_error = None;
            }
            Err(e) => {
                if self.path_error.as_ref() != Some(&e) {
                    log::info!("belt {} has no usable path: {e}", self.id);
                }
                self.path = None;
                self.path_error = Some(e);
            }
        }
        0
    }

    fn build_path<W: World + ?Sized>(&self, world: &W) -> TransportResult<Path> {
        let link = self
            .link
            .as_ref()
            .ok_or(TransportError::EndpointMissing(EndpointId::INVALID))?;
        let source = world
            .endpoint(link.source)
            .ok_or(TransportError::EndpointMissing(link.source))?;
        let sink = world
            .endpoint(link.sink)
            .ok_or(TransportError::EndpointMissing(link.sink))?;

        // Items leave along the source's facing and arrive into the sink.
        let start = Anchor::facing(source.position, source.facing);
        let end = Anchor::facing(sink.position, sink.facing.opposite());
        Ok(Path::through(start, &link.waypoints, end)?)
    }

    /// Try to move `item` into the sink.  `Some((inserted, spilled))` once
    /// the item has left the belt, `None` if it must stay.
    fn hand_off<W: World + ?Sized>(&self, world: &mut W, item: &TransitItem) -> Option<(u32, u32)> {
        let sink = self.sink()?;
        let payload = item.payload;
        let inventory = world.inventory(sink)?;

        if inventory.insert(&payload, true) != payload.count {
            return None;
        }
        let inserted = inventory.insert(&payload, false);
        log::debug!("belt {} handed {payload} ({}) to {sink}", self.id, item.id);

        let spilled = payload.count.saturating_sub(inserted);
        if spilled > 0 {
            log::warn!(
                "belt {}: sink {sink} took {inserted} of {} after accepting a simulated insert",
                self.id,
                payload.count
            );
            let at = world
                .endpoint(sink)
                .map(|e| e.position)
                .or(self.origin)
                .unwrap_or(DVec3::ZERO);
            world.spawn_item(at, payload.with_count(spilled));
        }
        Some((inserted, spilled))
    }

    /// Pull the first matching stack from the source.
    fn load<W: World + ?Sized>(&mut self, world: &mut W, cfg: &SimConfig) -> Option<u32> {
        let filter = self.link.as_ref()?.filter.as_ref();
        let inventory = world.inventory(self.source)?;

        for slot in 0..inventory.slot_count() {
            let stack = inventory.stack_in_slot(slot);
            if stack.is_empty() || !ItemFilter::accepts(filter, &stack) {
                continue;
            }
            let want = stack.with_count(stack.count.min(cfg.max_extract));
            let available = inventory.extract(&want, true);
            if available == 0 {
                continue;
            }
            let taken = inventory.extract(&want.with_count(available), false);
            if taken == 0 {
                continue;
            }
            let item = TransitItem::new(self.rng.next_transit_id(), want.with_count(taken));
            log::debug!("belt {} loaded {} ({})", self.id, item.payload, item.id);
            self.queue.push_back(item);
            return Some(taken);
        }
        None
    }

    fn set_state(&mut self, state: BeltState) {
        if self.state != state {
            log::debug!("belt {} {} -> {}", self.id, self.state.as_str(), state.as_str());
            self.state = state;
            self.dirty = true;
        }
    }
}
