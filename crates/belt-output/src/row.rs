//! Plain row types written by output backends.

use belt_sim::TickSummary;

/// One item on one belt at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSnapshotRow {
    pub tick:     u64,
    pub belt:     u32,
    /// Transit tag; not unique.
    pub item_id:  i16,
    pub progress: f32,
    pub x:        f64,
    pub y:        f64,
    pub z:        f64,
}

/// Belt-wide counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub active_belts:     u64,
    pub items_in_transit: u64,
    pub extracted:        u64,
    pub inserted:         u64,
    pub dropped:          u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:             s.tick.0,
            active_belts:     s.active_belts as u64,
            items_in_transit: s.items_in_transit,
            extracted:        s.extracted,
            inserted:         s.inserted,
            dropped:          s.dropped,
        }
    }
}
