//! `belt-core` — foundational types for the belt transport simulator.
//!
//! This crate is a dependency of every other `belt-*` crate.  It intentionally
//! has no `belt-*` dependencies and minimal external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BeltId`, `EndpointId`, `ItemKind`, `TransitId`       |
//! | [`geo`]         | `Facing`, `DVec3` re-export, vector helpers           |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig` — every simulation tunable                |
//! | [`rng`]         | `BeltRng`, one per belt                               |
//! | [`item`]        | `ItemStack`, `ItemFilter`                             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; needed |
//! |         | by belt persistence in `belt-output`.                      |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod item;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{DVec3, Facing};
pub use ids::{BeltId, EndpointId, ItemKind, TransitId};
pub use item::{ItemFilter, ItemStack, MAX_STACK};
pub use rng::BeltRng;
pub use time::{SimClock, Tick};
