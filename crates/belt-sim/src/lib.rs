//! `belt-sim` — the tick loop over every belt in a world.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Belts     — Belt::tick for each belt in ascending BeltId order
//!                 (refresh, advance, hand-off, load).
//!   ② Ledger    — fold the per-belt reports into running totals.
//!   ③ Deltas    — forward each pending ConfigDelta to the observer.
//!   ④ Snapshot  — every output_interval_ticks, hand the observer all belts.
//! ```
//!
//! Belts never see each other.  Two belts feeding one container interleave
//! in id order, and the container's own capacity is the only arbiter.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash for the endpoint → belt index.                    |
//! | `serde`   | Propagates serde derives to every `belt-*` data type.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use belt_core::SimConfig;
//! use belt_sim::{BeltAuthoring, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), world).build()?;
//! let mut authoring = BeltAuthoring::new();
//! authoring.mark_source(&sim, source)?;
//! let config = authoring.mark_sink(&sim, sink)?;
//! sim.link(config)?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod authoring;
pub mod builder;
pub mod error;
pub mod ledger;
pub mod observer;
pub mod sim;


pub use authoring::BeltAuthoring;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use ledger::{Ledger, TickSummary};
pub use observer::{NoopObserver, SimObserver};
pub use sim::BeltSim;
