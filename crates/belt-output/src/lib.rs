//! `belt-output` — what leaves the simulation: snapshot writers and belt
//! persistence.
//!
//! Two snapshot backends are provided:
//!
//! | Feature   | Backend | Files created                                |
//! |-----------|---------|----------------------------------------------|
//! | *(none)*  | CSV     | `item_snapshots.csv`, `tick_summaries.csv`   |
//! | `sqlite`  | SQLite  | `output.db`                                  |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `belt_sim::SimObserver`.
//!
//! [`persist`] saves and loads belt records as JSON so a run can be resumed
//! with `SimBuilder::records`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use belt_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! belt_output::persist::save_belts(&dir.join("belts.json"), &sim.records())?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod persist;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ItemSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
