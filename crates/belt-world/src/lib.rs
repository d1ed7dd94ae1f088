//! `belt-world` — the collaborators a belt talks to but never owns.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`inventory`] | `Inventory` capability trait, `SlotInventory`                 |
//! | [`world`]     | `Endpoint`, `World` query trait, `SpawnedItem`                |
//! | [`memory`]    | `MemoryWorld` — map-backed `World` for tests and demos        |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                                |
//!
//! # Design notes
//!
//! Belts hold endpoint *ids*, not references.  Every tick they ask the
//! [`World`] for the endpoint and for the inventory attached behind it, so
//! an endpoint or container that disappears is observed as `None` on the
//! next lookup.  There is no back-pointer from an endpoint to its belt.
//!
//! Inventories follow a simulate-then-commit contract: a call with
//! `simulate = true` reports what *would* happen and must not mutate.  The
//! transport layer always simulates immediately before committing, so an
//! inventory shared by many belts needs no locking of its own.

pub mod error;
pub mod inventory;
pub mod memory;
pub mod world;


pub use error::{WorldError, WorldResult};
pub use inventory::{Inventory, SlotInventory};
pub use memory::MemoryWorld;
pub use world::{Endpoint, SpawnedItem, World};
