//! `fr-net` — network topologies, path search, and path geometry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `Network` trait every topology implements                    |
//! | [`search`]  | `find_path`: closed-set A* generic over `Network`           |
//! | [`path`]    | `Path`, `Section`, `PathPos`: polyline consumed by distance |
//! | [`tile`]    | `TileNetwork<P>` with `RoadTiles` / `WaterTiles` passability |
//! | [`track`]   | `TrackNetwork`: graph discovered from track endpoints       |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Propagates `Serialize`/`Deserialize` to `fr-core` types.     |

pub mod error;
pub mod network;
pub mod path;
pub mod search;
pub mod tile;
pub mod track;


pub use error::{NetworkError, NetworkResult};
pub use network::Network;
pub use path::{Path, PathPos, Section};
pub use search::find_path;
pub use tile::{Passability, RoadNetwork, RoadTiles, TileNetwork, WaterNetwork, WaterTiles};
pub use track::{TrackNetwork, TrackNode};
