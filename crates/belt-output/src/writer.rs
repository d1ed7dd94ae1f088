//! The `OutputWriter` trait implemented by every backend.

use crate::{ItemSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for snapshot and summary rows.
///
/// The observer calls these from infallible hooks, so it keeps the first
/// error and hands it out via
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write every item of one snapshot.
    fn write_snapshots(&mut self, rows: &[ItemSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush everything.  Calling it twice is harmless.
    fn finish(&mut self) -> OutputResult<()>;
}
