//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use belt_core::Tick;
use belt_sim::{Ledger, SimObserver, TickSummary};
use belt_transport::Belt;

use crate::row::{ItemSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes item snapshots and tick summaries to any
/// [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first write error is stored and later
/// ones are dropped.  Check [`take_error`][Self::take_error] after the run.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       Vec<ItemSnapshotRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows:       Vec::new(),
            last_error: None,
        }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                log::warn!("output writer failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, belts: &[Belt]) {
        // Reuse one buffer across snapshots.
        let mut rows = std::mem::take(&mut self.rows);
        rows.clear();
        for belt in belts {
            rows.extend(belt.positions().map(|(item, at)| ItemSnapshotRow {
                tick:     tick.0,
                belt:     belt.id().0,
                item_id:  item.id.0,
                progress: item.progress,
                x:        at.x,
                y:        at.y,
                z:        at.z,
            }));
        }
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
        self.rows = rows;
    }

    fn on_sim_end(&mut self, final_tick: Tick, ledger: &Ledger) {
        log::info!(
            "run ended at {final_tick}: extracted {}, inserted {}, dropped {}",
            ledger.extracted,
            ledger.inserted,
            ledger.dropped
        );
        let result = self.writer.finish();
        self.store_err(result);
    }
}
