//! Running item totals and per-tick summaries.

use belt_core::Tick;
use belt_transport::TickReport;

/// Item counts accumulated over a whole run.
///
/// Every item that ever left a source inventory is in exactly one of
/// `inserted`, `dropped`, or still on a belt:
///
///   extracted = inserted + dropped + in_transit
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Ledger {
    pub extracted: u64,
    pub inserted: u64,
    pub dropped: u64,
}

impl Ledger {
    pub(crate) fn record(&mut self, report: &TickReport) {
        self.extracted += report.extracted as u64;
        self.inserted += report.inserted as u64;
        self.dropped += report.dropped;
    }

    /// `true` when the books close against `in_transit`.
    #[inline]
    pub fn balances(&self, in_transit: u64) -> bool {
        self.extracted == self.inserted + self.dropped + in_transit
    }
}

/// What happened across all belts in one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickSummary {
    pub tick: Tick,
    /// Belts not `Idle`.
    pub active_belts: usize,
    pub blocked_belts: usize,
    /// Belts whose synchronised state changed this tick.
    pub dirty_belts: usize,
    /// Item count on all belts after the tick.
    pub items_in_transit: u64,
    pub extracted: u64,
    pub inserted: u64,
    pub dropped: u64,
}
