//! Simulation observer trait for progress reporting and data collection.

use belt_core::{BeltId, Tick};
use belt_transport::{Belt, ConfigDelta};

use crate::{Ledger, TickSummary};

/// Callbacks invoked by [`BeltSim::run`][crate::BeltSim::run] at key points
/// in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} items in transit", summary.items_in_transit);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any belt moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every belt has ticked.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called when a belt's link changed.  This is the network sync hook:
    /// it fires once per change, not once per tick.
    fn on_config_delta(&mut self, _belt: BeltId, _delta: &ConfigDelta) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to all belts, in ascending id order.
    fn on_snapshot(&mut self, _tick: Tick, _belts: &[Belt]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _ledger: &Ledger) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
