//! chest_line — smallest runnable belt world.
//!
//! Two chests: one stocked with three item kinds, one empty, some way off
//! and up.  A belt is authored between them through one support, the run is
//! written to CSV, and the belts are saved as JSON.
//!
//! ```text
//! cargo run -p chest_line -- [config.json]
//! RUST_LOG=debug cargo run -p chest_line
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use belt_core::{DVec3, EndpointId, Facing, ItemKind, ItemStack, SimConfig, Tick};
use belt_output::writer::OutputWriter;
use belt_output::{CsvWriter, SimOutputObserver, persist};
use belt_path::{Waypoint, sampled_length};
use belt_sim::{BeltAuthoring, Ledger, SimBuilder, SimObserver, TickSummary};
use belt_transport::Belt;
use belt_world::{Endpoint, MemoryWorld, SlotInventory};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TOTAL_TICKS:           u64 = 20 * 120; // two simulated minutes
const OUTPUT_INTERVAL_TICKS: u64 = 20;       // one snapshot per second
const OUT_DIR:               &str = "output/chest_line";

const SOURCE: EndpointId = EndpointId(0);
const SINK:   EndpointId = EndpointId(1);

const STONE: ItemKind = ItemKind(1);
const COAL:  ItemKind = ItemKind(2);
const IRON:  ItemKind = ItemKind(3);

// ── World ─────────────────────────────────────────────────────────────────────

fn build_world() -> Result<MemoryWorld> {
    let mut world = MemoryWorld::new();

    // Chutes face away from their chest.
    world.add_endpoint(Endpoint::new(SOURCE, DVec3::ZERO, Facing::East))?;
    world.add_endpoint(Endpoint::new(SINK, DVec3::new(12.0, 3.0, 6.0), Facing::West))?;

    world.place_container(
        DVec3::new(-1.0, 0.0, 0.0),
        SlotInventory::from_stacks([
            ItemStack::new(STONE, 8),
            ItemStack::new(COAL, 12),
            ItemStack::new(STONE, 5),
            ItemStack::new(IRON, 3),
        ]),
    );
    world.place_container(DVec3::new(13.0, 3.0, 6.0), SlotInventory::new(27));
    Ok(world)
}

fn load_config(arg: Option<String>) -> Result<SimConfig> {
    let Some(path) = arg else {
        return Ok(SimConfig {
            total_ticks: TOTAL_TICKS,
            seed: SEED,
            output_interval_ticks: OUTPUT_INTERVAL_TICKS,
            max_extract: 4,
            ..SimConfig::default()
        });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, belts: &[Belt]) {
        self.snapshot_rows += belts.iter().map(|b| b.queue().len()).sum::<usize>();
        self.inner.on_snapshot(tick, belts);
    }

    fn on_sim_end(&mut self, final_tick: Tick, ledger: &Ledger) {
        self.inner.on_sim_end(final_tick, ledger);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config(std::env::args().nth(1))?;
    println!("=== chest_line ===");
    println!(
        "Ticks: {}  |  Seed: {}  |  Speed: {} units/s",
        config.total_ticks, config.seed, config.belt_speed
    );

    // 1. World and an empty simulation over it.
    let mut sim = SimBuilder::new(config, build_world()?).build()?;

    // 2. Author the belt: source, one support, sink.
    let mut authoring = BeltAuthoring::new();
    authoring.mark_source(&sim, SOURCE)?;
    authoring.add_waypoint(Waypoint::support(DVec3::new(6.0, 1.5, 2.0), Facing::East))?;
    let link = authoring.mark_sink(&sim, SINK)?;
    let belt = sim.link(link)?;

    // 3. Output.
    let out_dir = Path::new(OUT_DIR);
    std::fs::create_dir_all(out_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(CsvWriter::new(out_dir)?));

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  item_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    if let Some(path) = sim.belt(belt).and_then(Belt::path) {
        println!("  belt length        : {:.2} units", sampled_length(path, 1.0, 64));
    }

    let ledger = *sim.ledger();
    let in_transit = sim.items_in_transit();
    println!(
        "  extracted {}  inserted {}  dropped {}  on belt {}",
        ledger.extracted, ledger.inserted, ledger.dropped, in_transit
    );
    if !ledger.balances(in_transit) {
        log::warn!("item ledger does not balance");
    }
    println!();

    println!("{:<8} {:>8} {:>8}", "Kind", "Source", "Sink");
    println!("{}", "-".repeat(26));
    for kind in [STONE, COAL, IRON] {
        let left = sim.world.container_of(SOURCE).map_or(0, |c| c.count_of(kind));
        let arrived = sim.world.container_of(SINK).map_or(0, |c| c.count_of(kind));
        println!("{:<8} {:>8} {:>8}", kind.0, left, arrived);
    }

    // 6. Persist belts for a later run.
    let saved = out_dir.join("belts.json");
    persist::save_belts(&saved, &sim.records())?;
    println!();
    println!("Belts saved to {}", saved.display());

    Ok(())
}
