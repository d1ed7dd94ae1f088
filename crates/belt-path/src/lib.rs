//! `belt-path` — the curve a belt's items travel along.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`anchor`]  | `Anchor`, `Waypoint`, `Orientation`                              |
//! | [`orient`]  | sign selection for bidirectional waypoints                       |
//! | [`hermite`] | cubic Hermite basis, point and derivative                        |
//! | [`path`]    | `Path` (anchors + chord lengths), `build`, `ArcLengthTable`      |
//! | [`sampler`] | `position_at`, `tangent_at`, `sampled_length`, `sample_points`   |
//! | [`error`]   | `PathError`, `PathResult<T>`                                     |
//!
//! # Two-pass model
//!
//! Building a path is the coarse pass: every consecutive pair of anchors
//! becomes one segment whose length is the straight chord between them.
//! Sampling is the fine pass: a global progress `t` is turned into a target
//! distance, the segment containing it is found, and the Hermite basis is
//! evaluated there with tangents scaled by that segment's length.  Advancing
//! `t` by a fixed step therefore moves an item a near-constant distance.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on anchors and waypoints.  |

pub mod anchor;
pub mod error;
pub mod hermite;
pub mod orient;
pub mod path;
pub mod sampler;


pub use anchor::{Anchor, Orientation, Waypoint};
pub use error::{PathError, PathResult};
pub use orient::{WAYPOINT_HANDLE, handle_cost, orient_waypoints};
pub use path::{ArcLengthTable, Path, TANGENT_STRENGTH, build};
pub use sampler::{position_at, sample_points, sampled_length, tangent_at};
