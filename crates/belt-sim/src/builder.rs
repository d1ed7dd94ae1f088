//! Fluent builder for constructing a [`BeltSim`].

use belt_core::{BeltId, CoreError, SimConfig};
use belt_transport::{Belt, BeltConfig, BeltRecord};
use belt_world::World;

use crate::{BeltSim, Ledger, SimError, SimResult, sim::SourceIndex};

/// Fluent builder for [`BeltSim<W>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: timing, speeds, total ticks, seed, ...
/// - `W: World`: endpoints and inventories
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.records(v)`   | No restored belts                |
/// | `.links(v)`     | No links                         |
///
/// Records are restored first, then links are installed on top, so a link
/// may re-target a restored belt.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, world)
///     .records(persist::load_belts(&path)?)
///     .links(vec![BeltConfig::direct(a, b)])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<W: World> {
    config:  SimConfig,
    world:   W,
    records: Vec<BeltRecord>,
    links:   Vec<BeltConfig>,
}

impl<W: World> SimBuilder<W> {
    pub fn new(config: SimConfig, world: W) -> Self {
        Self {
            config,
            world,
            records: Vec::new(),
            links:   Vec::new(),
        }
    }

    /// Belts to restore from persisted records.
    pub fn records(mut self, records: Vec<BeltRecord>) -> Self {
        self.records = records;
        self
    }

    /// Links to install after restoring.
    pub fn links(mut self, links: Vec<BeltConfig>) -> Self {
        self.links = links;
        self
    }

    /// Validate the config, restore records, install links, and return a
    /// ready-to-run [`BeltSim`].
    pub fn build(self) -> SimResult<BeltSim<W>> {
        self.config.validate()?;

        let mut sim = BeltSim {
            clock:     self.config.make_clock(),
            config:    self.config,
            world:     self.world,
            belts:     Vec::new(),
            by_source: SourceIndex::default(),
            next_id:   0,
            ledger:    Ledger::default(),
            retired:   Vec::new(),
        };

        // ── Restore persisted belts ───────────────────────────────────────
        for record in self.records {
            if let Some(&existing) = sim.by_source.get(&record.source) {
                return Err(SimError::DuplicateSource(record.source, existing));
            }
            if sim.world.endpoint(record.source).is_none() {
                return Err(CoreError::EndpointNotFound(record.source).into());
            }
            let id = BeltId(sim.next_id);
            sim.next_id += 1;
            sim.by_source.insert(record.source, id);
            sim.belts.push(Belt::from_record(id, record, sim.config.seed));
        }

        // ── Install links ─────────────────────────────────────────────────
        for link in self.links {
            sim.link(link)?;
        }

        Ok(sim)
    }
}
