//! `fr-core` — foundational types for the `freight` logistics engine.
//!
//! This crate is a dependency of every other `fr-*` crate.  It intentionally
//! has no `fr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `AgentId`, `ComplexId`, `ItemId`, `PieceId`              |
//! | [`geo`]       | `Vec3` world positions, `TilePos` grid coordinates       |
//! | [`time`]      | `Tick`, `SimClock`                                       |
//! | [`rng`]       | `JitterRng` (per-network, deterministic)                 |
//! | [`kind`]      | `AgentKind` enum (carriage / train / boat)               |
//! | [`config`]    | `FleetConfig`                                            |
//! | [`world`]     | `Terrain`, `Storage`, `World` collaborator traits        |
//! | [`sandbox`]   | `SandboxWorld`, an in-memory `World` for demos and tests |
//! | [`error`]     | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod sandbox;
pub mod time;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FleetConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{TilePos, Vec3};
pub use ids::{AgentId, ComplexId, ItemId, PieceId};
pub use kind::AgentKind;
pub use rng::JitterRng;
pub use sandbox::SandboxWorld;
pub use time::{SimClock, Tick};
pub use world::{Bridge, Storage, Terrain, TrackPiece, World};
