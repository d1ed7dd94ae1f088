//! Unit tests for belt-transport.

use belt_core::{BeltId, DVec3, EndpointId, Facing, ItemKind, ItemStack, SimConfig, Tick, TransitId};
use belt_world::{Endpoint, MemoryWorld, SlotInventory, World};

use crate::{Belt, BeltConfig, BeltState, TickReport, TransitItem, TransitQueue};

// ── Helpers ───────────────────────────────────────────────────────────────────

const STONE: ItemKind = ItemKind(1);
const DIRT: ItemKind = ItemKind(2);

const SOURCE: EndpointId = EndpointId(0);
const SINK: EndpointId = EndpointId(1);

fn stone(n: u32) -> ItemStack {
    ItemStack::new(STONE, n)
}

fn cfg() -> SimConfig {
    SimConfig::default()
}

fn source_chest() -> DVec3 {
    DVec3::new(-1.0, 0.0, 0.0)
}

fn sink_chest() -> DVec3 {
    DVec3::new(11.0, 0.0, 0.0)
}

/// Source at the origin facing +X, sink at x = 10 facing -X: a straight
/// 10-unit belt.  Chests sit behind both endpoints.
fn line_world(source: SlotInventory, sink: SlotInventory) -> MemoryWorld {
    let mut w = MemoryWorld::new();
    w.add_endpoint(Endpoint::new(SOURCE, DVec3::ZERO, Facing::East)).unwrap();
    w.add_endpoint(Endpoint::new(SINK, DVec3::new(10.0, 0.0, 0.0), Facing::West)).unwrap();
    w.place_container(source_chest(), source);
    w.place_container(sink_chest(), sink);
    w
}

/// `n` single items, one per slot.
fn singles(n: usize) -> SlotInventory {
    SlotInventory::from_stacks(vec![stone(1); n])
}

fn linked_belt() -> Belt {
    let mut belt = Belt::new(BeltId(0), SOURCE, 7);
    belt.configure(BeltConfig::direct(SOURCE, SINK)).unwrap();
    belt
}

/// Tick `belt` over `[from, to)` and collect the reports.
fn run<W: World>(belt: &mut Belt, world: &mut W, from: u64, to: u64) -> Vec<TickReport> {
    let cfg = cfg();
    (from..to).map(|t| belt.tick(world, Tick(t), &cfg)).collect()
}

fn totals(reports: &[TickReport]) -> (u64, u64, u64) {
    reports.iter().fold((0, 0, 0), |(e, i, d), r| {
        (e + r.extracted as u64, i + r.inserted as u64, d + r.dropped)
    })
}

// ── TransitQueue ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    fn item(progress: f32) -> TransitItem {
        TransitItem { id: TransitId(0), progress, payload: stone(1) }
    }

    #[test]
    fn from_unsorted_orders_front_to_back() {
        let q = TransitQueue::from_unsorted([item(0.2), item(0.9), item(f32::NAN), item(1.7)]);
        let progress: Vec<f32> = q.iter().map(|i| i.progress).collect();
        assert_eq!(progress, vec![1.0, 0.9, 0.2, 0.0]);
        assert!(q.is_ordered());
        assert_eq!(q.item_count(), 4);
    }

    #[test]
    fn front_is_nearest_sink() {
        let mut q = TransitQueue::new();
        assert!(q.is_empty());
        q.push_back(item(0.5));
        q.push_back(item(0.0));
        assert_eq!(q.front().unwrap().progress, 0.5);
        assert_eq!(q.back().unwrap().progress, 0.0);
        assert_eq!(q.take_all().len(), 2);
        assert!(q.is_empty());
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod configure {
    use super::*;
    use crate::TransportError;

    #[test]
    fn new_belt_is_idle() {
        let mut world = line_world(singles(1), SlotInventory::new(1));
        let mut belt = Belt::new(BeltId(0), SOURCE, 0);
        let reports = run(&mut belt, &mut world, 0, 30);
        assert!(reports.iter().all(|r| r.state == BeltState::Idle && r.extracted == 0));
        assert!(belt.path().is_none());
    }

    #[test]
    fn rejects_foreign_source_and_self_loop() {
        let mut belt = Belt::new(BeltId(0), SOURCE, 0);
        assert_eq!(
            belt.configure(BeltConfig::direct(SINK, SOURCE)),
            Err(TransportError::SourceMismatch { expected: SOURCE, found: SINK })
        );
        assert_eq!(
            belt.configure(BeltConfig::direct(SOURCE, SOURCE)),
            Err(TransportError::SinkIsSource(SOURCE))
        );
        assert!(!belt.is_linked());
    }

    #[test]
    fn delta_is_emitted_once_per_change() {
        let mut world = line_world(singles(0), SlotInventory::new(1));
        let mut belt = linked_belt();
        let delta = belt.take_delta().expect("delta after configure");
        assert_eq!(delta.own, SOURCE);
        assert_eq!(delta.sink, Some(SINK));
        assert!(delta.waypoints.is_empty());

        run(&mut belt, &mut world, 0, 40);
        assert!(belt.take_delta().is_none());

        belt.unlink(&mut world);
        assert_eq!(belt.take_delta().unwrap().sink, None);
    }

    #[test]
    fn path_is_built_on_first_tick() {
        let mut world = line_world(singles(0), SlotInventory::new(1));
        let mut belt = linked_belt();
        assert!(belt.path().is_none());
        let r = belt.tick(&mut world, Tick(5), &cfg());
        assert_eq!(r.state, BeltState::Active);
        approx::assert_relative_eq!(belt.path().unwrap().total_length(), 10.0);
        assert_eq!(world.last_targeted(SINK), Some(Tick(5)));
    }

    #[test]
    fn filter_changes_mark_dirty() {
        let mut belt = Belt::new(BeltId(0), SOURCE, 0);
        assert!(!belt.set_filter(None));
        belt.configure(BeltConfig::direct(SOURCE, SINK)).unwrap();
        belt.take_dirty();
        assert!(belt.set_filter(Some(belt_core::ItemFilter::Kind(DIRT))));
        assert!(belt.take_dirty());
        assert!(!belt.take_dirty());
    }

    #[test]
    fn degenerate_path_leaves_belt_idle() {
        let mut world = MemoryWorld::new();
        world.add_endpoint(Endpoint::new(SOURCE, DVec3::ZERO, Facing::East)).unwrap();
        world.add_endpoint(Endpoint::new(SINK, DVec3::ZERO, Facing::West)).unwrap();
        let mut belt = linked_belt();
        let r = belt.tick(&mut world, Tick(0), &cfg());
        assert_eq!(r.state, BeltState::Idle);
        assert!(belt.is_linked());
        assert!(matches!(
            belt.path_error(),
            Some(TransportError::Path(belt_path::PathError::Degenerate))
        ));
    }
}

// ── Transport ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod transport {
    use super::*;

    #[test]
    fn straight_belt_delivers_after_ten_seconds() {
        let mut world = line_world(singles(1), SlotInventory::new(1));
        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 400);

        let loaded = reports.iter().position(|r| r.extracted > 0).unwrap();
        let delivered = reports.iter().position(|r| r.inserted > 0).unwrap();
        assert_eq!(loaded, 0);
        // 1 unit/s over 10 units at 20 Hz.
        assert!((199..=202).contains(&(delivered - loaded)), "took {} ticks", delivered - loaded);
        assert_eq!(world.container(sink_chest()).unwrap().count_of(STONE), 1);
        assert!(belt.queue().is_empty());
    }

    #[test]
    fn items_report_positions_along_the_path() {
        let mut world = line_world(singles(1), SlotInventory::new(1));
        let mut belt = linked_belt();
        run(&mut belt, &mut world, 0, 101);
        let (item, pos) = belt.positions().next().unwrap();
        approx::assert_relative_eq!(item.progress, 0.5, epsilon = 1e-4);
        // Speed is only near-constant; the midpoint itself is exact.
        approx::assert_abs_diff_eq!(pos.x, 5.0, epsilon = 1e-2);
        assert!(pos.y.abs() < 1e-9 && pos.z.abs() < 1e-9);
    }

    #[test]
    fn every_matching_item_arrives() {
        let mut world = line_world(singles(20), SlotInventory::new(1));
        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 1_000);
        let (extracted, inserted, dropped) = totals(&reports);
        assert_eq!(extracted, 20);
        assert_eq!(inserted, 20);
        assert_eq!(dropped, 0);
        assert_eq!(world.container(sink_chest()).unwrap().count_of(STONE), 20);
    }

    #[test]
    fn one_extraction_per_interval() {
        let mut world = line_world(singles(10), SlotInventory::new(1));
        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 100);
        let ticks: Vec<usize> = reports
            .iter()
            .enumerate()
            .filter(|(_, r)| r.extracted > 0)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(ticks, vec![0, 26, 52, 78]);
        assert!(reports.iter().all(|r| r.extracted <= 1));
    }

    #[test]
    fn extraction_is_capped_per_stack() {
        let source = SlotInventory::from_stacks([stone(64), stone(64)]);
        let mut world = line_world(source, SlotInventory::new(4));
        let mut belt = linked_belt();
        let r = belt.tick(&mut world, Tick(0), &SimConfig { max_extract: 16, ..cfg() });
        assert_eq!(r.extracted, 16);
        assert_eq!(belt.queue().front().unwrap().payload, stone(16));
    }

    #[test]
    fn load_cadence_follows_source_position() {
        let mut world = MemoryWorld::new();
        let at = DVec3::new(3.0, 0.0, 0.0);
        world.add_endpoint(Endpoint::new(SOURCE, at, Facing::East)).unwrap();
        world.add_endpoint(Endpoint::new(SINK, DVec3::new(13.0, 0.0, 0.0), Facing::West)).unwrap();
        world.place_container(DVec3::new(2.0, 0.0, 0.0), singles(5));

        let offset = belt_core::geo::pack_position(at);
        let expected = (0..26).find(|&t| Tick(t).is_cadence(26, offset)).unwrap();

        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 26);
        let first = reports.iter().position(|r| r.extracted > 0).unwrap();
        assert_eq!(first as u64, expected);
    }

    #[test]
    fn filter_selects_first_matching_slot() {
        let source = SlotInventory::from_stacks([ItemStack::new(DIRT, 3), stone(2)]);
        let mut world = line_world(source, SlotInventory::new(4));
        let mut belt = Belt::new(BeltId(0), SOURCE, 0);
        belt.configure(BeltConfig::direct(SOURCE, SINK).with_filter(belt_core::ItemFilter::Kind(STONE)))
            .unwrap();

        run(&mut belt, &mut world, 0, 1);
        assert_eq!(belt.queue().back().unwrap().payload, stone(2));

        belt.set_filter(None);
        run(&mut belt, &mut world, 1, 27);
        assert_eq!(belt.queue().back().unwrap().payload, ItemStack::new(DIRT, 3));
    }

    #[test]
    fn rejected_filter_leaves_source_untouched() {
        let mut world = line_world(singles(3), SlotInventory::new(1));
        let mut belt = Belt::new(BeltId(0), SOURCE, 0);
        belt.configure(BeltConfig::direct(SOURCE, SINK).with_filter(belt_core::ItemFilter::NoneOf(vec![STONE])))
            .unwrap();
        let reports = run(&mut belt, &mut world, 0, 100);
        assert_eq!(totals(&reports).0, 0);
        assert_eq!(world.container(source_chest()).unwrap().total_count(), 3);
    }

    #[test]
    fn same_seed_same_tags() {
        let tags = |seed| {
            let mut world = line_world(singles(5), SlotInventory::new(1));
            let mut belt = Belt::new(BeltId(0), SOURCE, seed);
            belt.configure(BeltConfig::direct(SOURCE, SINK)).unwrap();
            run(&mut belt, &mut world, 0, 120);
            belt.queue().iter().map(|i| i.id).collect::<Vec<_>>()
        };
        assert_eq!(tags(11), tags(11));
        assert_eq!(tags(11).len(), 5);
    }
}

// ── Backpressure ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod backpressure {
    use super::*;

    #[test]
    fn full_sink_queue_is_bounded() {
        // A zero-slot sink rejects everything.
        let mut world = line_world(singles(60), SlotInventory::new(0));
        let mut belt = linked_belt();
        let cfg = cfg();
        let bound = (10.0 / cfg.squash_factor).ceil() as usize + 1;

        let mut longest = 0;
        for t in 0..5_000 {
            let r = belt.tick(&mut world, Tick(t), &cfg);
            assert_eq!(r.inserted, 0);
            longest = longest.max(belt.queue().len());
            assert!(belt.queue().is_ordered());
        }
        assert!(longest <= bound, "queue grew to {longest}, bound {bound}");
        assert_eq!(belt.state(), BeltState::Blocked);
        // Once saturated, nothing more is loaded.
        let reports = run(&mut belt, &mut world, 5_000, 5_200);
        assert_eq!(totals(&reports).0, 0);
    }

    #[test]
    fn held_items_never_pass_queue_start() {
        let mut world = line_world(singles(60), SlotInventory::new(0));
        let mut belt = linked_belt();
        let squash = cfg().squash_factor / 10.0;
        run(&mut belt, &mut world, 0, 3_000);

        for (k, item) in belt.queue().iter().enumerate() {
            let queue_start = 1.0 - k as f64 * squash;
            assert!((item.progress as f64) < queue_start, "item {k} at {}", item.progress);
        }
        assert!(belt.queue().front().unwrap().progress < 1.0);
    }

    #[test]
    fn partial_insert_is_rejected_not_split() {
        // The sink has room for 10 but each item carries 16.
        let source = SlotInventory::from_stacks([stone(16)]);
        let sink = SlotInventory::with_slot_limit(1, 10);
        let mut world = line_world(source, sink);
        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 400);
        assert_eq!(totals(&reports).1, 0);
        assert!(world.container(sink_chest()).unwrap().is_empty());
        assert_eq!(belt.queue().front().unwrap().payload, stone(16));
    }

    #[test]
    fn absent_sink_inventory_is_transient() {
        let mut world = line_world(singles(1), SlotInventory::new(1));
        let chest = world.remove_container(sink_chest()).unwrap();
        let mut belt = linked_belt();

        let reports = run(&mut belt, &mut world, 0, 400);
        assert_eq!(totals(&reports), (1, 0, 0));
        assert_eq!(belt.state(), BeltState::Active);
        assert_eq!(belt.queue().len(), 1);

        world.place_container(sink_chest(), chest);
        let reports = run(&mut belt, &mut world, 400, 402);
        assert_eq!(totals(&reports).1, 1);
    }

    #[test]
    fn absent_source_inventory_loads_nothing() {
        let mut world = line_world(singles(1), SlotInventory::new(1));
        world.remove_container(source_chest());
        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 100);
        assert_eq!(totals(&reports), (0, 0, 0));
        assert_eq!(belt.state(), BeltState::Active);
    }
}

// ── Hand-off contract ─────────────────────────────────────────────────────────

#[cfg(test)]
mod hand_off {
    use belt_world::Inventory;

    use super::*;

    /// Records every insert call made against it.
    struct RecordingInventory {
        inner: SlotInventory,
        inserts: Vec<(bool, ItemStack)>,
    }

    impl Inventory for RecordingInventory {
        fn insert(&mut self, stack: &ItemStack, simulate: bool) -> u32 {
            self.inserts.push((simulate, *stack));
            self.inner.insert(stack, simulate)
        }
        fn extract(&mut self, stack: &ItemStack, simulate: bool) -> u32 {
            self.inner.extract(stack, simulate)
        }
        fn slot_count(&self) -> usize {
            self.inner.slot_count()
        }
        fn stack_in_slot(&self, slot: usize) -> ItemStack {
            self.inner.stack_in_slot(slot)
        }
    }

    /// Two endpoints, two inventories, no maps.
    struct RecordingWorld {
        source: Endpoint,
        sink: Endpoint,
        source_inv: SlotInventory,
        sink_inv: RecordingInventory,
    }

    impl World for RecordingWorld {
        fn endpoint(&self, id: EndpointId) -> Option<Endpoint> {
            [self.source, self.sink].into_iter().find(|e| e.id == id)
        }
        fn inventory(&mut self, id: EndpointId) -> Option<&mut dyn Inventory> {
            if id == self.source.id {
                Some(&mut self.source_inv as &mut dyn Inventory)
            } else if id == self.sink.id {
                Some(&mut self.sink_inv as &mut dyn Inventory)
            } else {
                None
            }
        }
        fn spawn_item(&mut self, _position: DVec3, _stack: ItemStack) {}
        fn mark_targeted(&mut self, id: EndpointId, _now: Tick) -> bool {
            id == self.sink.id
        }
        fn last_targeted(&self, _id: EndpointId) -> Option<Tick> {
            None
        }
    }

    fn recording_world(sink: SlotInventory) -> RecordingWorld {
        RecordingWorld {
            source: Endpoint::new(SOURCE, DVec3::ZERO, Facing::East),
            sink: Endpoint::new(SINK, DVec3::new(10.0, 0.0, 0.0), Facing::West),
            source_inv: singles(3),
            sink_inv: RecordingInventory { inner: sink, inserts: Vec::new() },
        }
    }

    #[test]
    fn every_commit_follows_a_simulation() {
        let mut world = recording_world(SlotInventory::new(1));
        let mut belt = linked_belt();
        run(&mut belt, &mut world, 0, 400);

        let calls = &world.sink_inv.inserts;
        let commits: Vec<usize> = (0..calls.len()).filter(|&i| !calls[i].0).collect();
        assert_eq!(commits.len(), 3);
        for i in commits {
            assert!(i > 0);
            assert_eq!(calls[i - 1], (true, calls[i].1));
        }
        assert_eq!(world.sink_inv.inner.count_of(STONE), 3);
    }

    #[test]
    fn repeated_simulation_never_mutates_the_sink() {
        let mut world = recording_world(SlotInventory::new(0));
        let mut belt = linked_belt();
        run(&mut belt, &mut world, 0, 400);

        let calls = &world.sink_inv.inserts;
        assert!(calls.len() > 100, "retried every tick");
        assert!(calls.iter().all(|(simulate, _)| *simulate));
        assert!(world.sink_inv.inner.is_empty());
    }
}

// ── Teardown & conservation ───────────────────────────────────────────────────

#[cfg(test)]
mod teardown {
    use super::*;

    #[test]
    fn destroyed_sink_drains_on_refresh() {
        let mut world = line_world(singles(3), SlotInventory::new(1));
        let mut belt = linked_belt();
        belt.take_delta();
        run(&mut belt, &mut world, 0, 100);
        let in_flight = belt.queue().item_count();
        assert!(in_flight > 0);

        world.remove_endpoint(SINK);
        // Next refresh is at tick 114.
        let reports = run(&mut belt, &mut world, 100, 115);
        assert_eq!(totals(&reports).2, in_flight);
        assert_eq!(belt.state(), BeltState::Idle);
        assert!(!belt.is_linked());
        assert!(belt.queue().is_empty());
        assert_eq!(belt.take_delta().unwrap().sink, None);

        // Everything lands at the source endpoint.
        assert_eq!(world.spawned_count(), in_flight);
        assert!(world.spawned().iter().all(|s| s.position == DVec3::ZERO));
    }

    #[test]
    fn unlink_drains_everything() {
        let mut world = line_world(singles(5), SlotInventory::new(1));
        let mut belt = linked_belt();
        run(&mut belt, &mut world, 0, 80);
        let in_flight = belt.queue().item_count();
        assert_eq!(belt.unlink(&mut world), in_flight);
        assert_eq!(world.spawned_count(), in_flight);
        assert_eq!(belt.state(), BeltState::Idle);
    }

    #[test]
    fn items_are_conserved() {
        // Sink takes 5, the rest back up and are drained at the end.
        let mut world = line_world(singles(30), SlotInventory::with_slot_limit(1, 5));
        let mut belt = linked_belt();
        let reports = run(&mut belt, &mut world, 0, 3_000);
        let (extracted, inserted, dropped) = totals(&reports);
        let queued = belt.queue().item_count();
        assert_eq!(inserted, 5);
        assert_eq!(extracted, inserted + queued + dropped);

        let drained = belt.unlink(&mut world);
        assert_eq!(extracted, inserted + dropped + drained);
        assert_eq!(world.container(sink_chest()).unwrap().total_count(), inserted);
        assert_eq!(world.container(source_chest()).unwrap().total_count() + extracted, 30);
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod record {
    use super::*;
    use crate::{BeltRecord, RecordedItem};

    #[test]
    fn record_captures_link_and_items() {
        let mut world = line_world(singles(3), SlotInventory::new(1));
        let mut belt = linked_belt();
        run(&mut belt, &mut world, 0, 60);

        let record = belt.to_record();
        assert_eq!(record.source, SOURCE);
        assert_eq!(record.sink, Some(SINK));
        assert_eq!(record.items.len(), belt.queue().len());

        let restored = Belt::from_record(BeltId(0), record, 7);
        assert_eq!(restored.queue(), belt.queue());
        assert_eq!(restored.sink(), Some(SINK));
    }

    #[test]
    fn restored_items_are_resorted_and_resume() {
        let record = BeltRecord {
            source: SOURCE,
            sink: Some(SINK),
            waypoints: Vec::new(),
            filter: None,
            items: vec![
                RecordedItem { progress: 0.1, payload: stone(1), id: TransitId(1) },
                RecordedItem { progress: 0.99, payload: stone(1), id: TransitId(2) },
                RecordedItem { progress: 0.5, payload: ItemStack::EMPTY, id: TransitId(3) },
            ],
        };
        let mut belt = Belt::from_record(BeltId(0), record, 0);
        assert!(belt.queue().is_ordered());
        assert_eq!(belt.queue().len(), 2);
        assert_eq!(belt.queue().front().unwrap().id, TransitId(2));
        assert_eq!(belt.take_delta().unwrap().sink, Some(SINK));

        let mut world = line_world(singles(0), SlotInventory::new(1));
        let reports = run(&mut belt, &mut world, 1, 5);
        assert_eq!(totals(&reports).1, 1);
    }

    #[test]
    fn one_hand_off_per_tick() {
        let record = BeltRecord {
            source: SOURCE,
            sink: Some(SINK),
            waypoints: Vec::new(),
            filter: None,
            items: vec![
                RecordedItem { progress: 0.999, payload: stone(1), id: TransitId(1) },
                RecordedItem { progress: 0.998, payload: stone(1), id: TransitId(2) },
            ],
        };
        let mut belt = Belt::from_record(BeltId(0), record, 0);
        let mut world = line_world(singles(0), SlotInventory::new(2));

        let first = belt.tick(&mut world, Tick(1), &cfg());
        assert_eq!(first.inserted, 1);
        assert_eq!(first.queued, 1);
        assert_eq!(belt.queue().len(), 1);
        assert_eq!(belt.queue().front().unwrap().id, TransitId(2));

        let second = belt.tick(&mut world, Tick(2), &cfg());
        assert_eq!(second.inserted, 1);
        assert!(belt.queue().is_empty());
        assert_eq!(world.spawned_count(), 0);
        assert_eq!(world.container(sink_chest()).unwrap().total_count(), 2);
    }

    #[test]
    fn idle_record_returns_items_to_world() {
        let record = BeltRecord {
            source: SOURCE,
            sink: None,
            waypoints: Vec::new(),
            filter: None,
            items: vec![RecordedItem { progress: 0.3, payload: stone(4), id: TransitId(0) }],
        };
        let mut belt = Belt::from_record(BeltId(0), record, 0);
        let mut world = line_world(singles(0), SlotInventory::new(1));
        let r = belt.tick(&mut world, Tick(1), &cfg());
        assert_eq!(r.dropped, 4);
        assert_eq!(r.state, BeltState::Idle);
        assert_eq!(world.spawned_count(), 4);
    }
}
