//! `belt-transport` — items moving along one belt.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`item`]   | `TransitItem` — one stack in flight                             |
//! | [`queue`]  | `TransitQueue` — items ordered from sink (front) to source      |
//! | [`config`] | `BeltConfig`, `ConfigDelta`                                     |
//! | [`belt`]   | `Belt` state machine, `BeltState`, `TickReport`                 |
//! | [`record`] | `BeltRecord`, `RecordedItem` — persisted form of a belt         |
//! | [`error`]  | `TransportError`, `TransportResult<T>`                          |
//!
//! # Per-tick model
//!
//! `Belt::tick` runs four phases in order:
//!
//! 1. **Refresh** (every `refresh_interval_ticks`, or after a config
//!    change): resolve both endpoints through the [`World`][belt_world::World],
//!    rebuild the path, stamp the sink as targeted.  A vanished sink drains
//!    the belt and drops it to `Idle`.
//! 2. **Advance**: walk items front to back.  An item whose next progress
//!    would reach `queue_start = 1 - queued * squash / length` is held and
//!    counted as queued; everything else moves.
//! 3. **Hand-off**: the first held item tries the sink inventory.  The
//!    insert is simulated and only committed if the whole stack fits.
//! 4. **Load**: on the extraction cadence, and only while `queue_start`
//!    is non-negative, one matching stack is pulled from the source.
//!
//! Items are never deleted: a belt that loses its config or path converts
//! everything in flight into world items via [`Belt::drain`].

pub mod belt;
pub mod config;
pub mod error;
pub mod item;
pub mod queue;
pub mod record;

#[cfg(test)]
mod tests;

pub use belt::{Belt, BeltState, TickReport};
pub use config::{BeltConfig, ConfigDelta};
pub use error::{TransportError, TransportResult};
pub use item::TransitItem;
pub use queue::TransitQueue;
pub use record::{BeltRecord, RecordedItem};
