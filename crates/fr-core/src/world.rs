//! Narrow interfaces to the surrounding world.
//!
//! Terrain storage, building placement, and the production economy are owned
//! by the game; the logistics engine only reads terrain and track state and
//! moves goods in and out of complexes.  Networks take `&dyn World`, agents
//! take `&mut dyn World` for the duration of a stop transaction.

use crate::{ComplexId, ItemId, PieceId, TilePos, Vec3};

// ── Value types ───────────────────────────────────────────────────────────────

/// A bridge spanning a tile.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bridge {
    /// Whether the bridge design leaves a navigable channel underneath.
    pub boat_passable: bool,
    /// Elevation of the underside of the deck.
    pub deck_height: f32,
}

/// A single placed piece of rail track.
///
/// `points` is the traversable polyline in the piece's local space; the
/// first and last points are its two connectable endpoints.  The placement
/// transform is a yaw rotation followed by a translation to `position`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPiece {
    pub id: PieceId,
    pub position: Vec3,
    pub yaw: f32,
    pub points: Vec<Vec3>,
}

impl TrackPiece {
    /// The local polyline transformed into world space.
    pub fn world_points(&self) -> Vec<Vec3> {
        self.points
            .iter()
            .map(|&p| p.rotate_y(self.yaw) + self.position)
            .collect()
    }

    /// The two connectable endpoints in world space, or `None` for a piece
    /// with fewer than two points.
    pub fn world_endpoints(&self) -> Option<[Vec3; 2]> {
        if self.points.len() < 2 {
            return None;
        }
        let first = *self.points.first()?;
        let last = *self.points.last()?;
        Some([
            first.rotate_y(self.yaw) + self.position,
            last.rotate_y(self.yaw) + self.position,
        ])
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Read-only terrain, building, and track queries.
pub trait Terrain {
    /// World units spanned by one tile edge.
    fn units_per_tile(&self) -> f32;

    /// Tiles spanned by one chunk edge.
    fn tiles_per_chunk(&self) -> i32;

    /// Map size in tiles `(width, depth)`.
    fn size_in_tiles(&self) -> (i32, i32);

    /// Height of the terrain vertex at grid corner `(x, z)`; `None` outside
    /// the map.  Tile `(x, z)` spans corners `x..=x+1`, `z..=z+1`.
    fn vertex_elevation(&self, x: i32, z: i32) -> Option<f32>;

    /// Current water surface height.
    fn water_level(&self) -> f32;

    /// `true` if the tile carries a path (road surface).
    fn is_path(&self, tile: TilePos) -> bool;

    /// `true` if a building occupies the tile.
    fn has_building(&self, tile: TilePos) -> bool;

    /// The bridge spanning the tile, if any.
    fn bridge_at(&self, tile: TilePos) -> Option<Bridge>;

    /// Track pieces whose origin lies inside chunk `(chunk_x, chunk_z)`.
    fn track_pieces_in_chunk(&self, chunk_x: i32, chunk_z: i32) -> &[TrackPiece];

    /// Map size in chunks, rounding partial chunks up.
    fn size_in_chunks(&self) -> (i32, i32) {
        let (w, d) = self.size_in_tiles();
        let c = self.tiles_per_chunk().max(1);
        ((w + c - 1) / c, (d + c - 1) / c)
    }

    /// `true` if `tile` lies inside the map.
    fn contains_tile(&self, tile: TilePos) -> bool {
        let (w, d) = self.size_in_tiles();
        tile.x >= 0 && tile.z >= 0 && tile.x < w && tile.z < d
    }

    /// Bilinearly interpolated ground height at world position `(x, z)`.
    /// Positions outside the map clamp to the nearest edge vertex.
    fn elevation_at(&self, x: f32, z: f32) -> f32 {
        let upt = self.units_per_tile();
        let (w, d) = self.size_in_tiles();
        let gx = (x / upt).clamp(0.0, w as f32);
        let gz = (z / upt).clamp(0.0, d as f32);
        let x0 = gx.floor() as i32;
        let z0 = gz.floor() as i32;
        let fx = gx - x0 as f32;
        let fz = gz - z0 as f32;
        let h = |vx: i32, vz: i32| {
            self.vertex_elevation(vx.min(w), vz.min(d)).unwrap_or(0.0)
        };
        let top = h(x0, z0) * (1.0 - fx) + h(x0 + 1, z0) * fx;
        let bottom = h(x0, z0 + 1) * (1.0 - fx) + h(x0 + 1, z0 + 1) * fx;
        top * (1.0 - fz) + bottom * fz
    }
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// Goods held by complexes.
///
/// Implementations clamp every transfer and report how much actually moved;
/// the engine never assumes a request was honoured in full.
pub trait Storage {
    /// Tiles covered by the complex.  Empty if the complex does not exist.
    fn footprint(&self, complex: ComplexId) -> &[TilePos];

    /// Units of `item` currently stored.
    fn stored_count(&self, complex: ComplexId, item: ItemId) -> u32;

    /// Store up to `amount` units; returns the amount accepted.
    fn add_stored(&mut self, complex: ComplexId, item: ItemId, amount: u32) -> u32;

    /// Take up to `amount` units; returns the amount removed.
    fn remove_stored(&mut self, complex: ComplexId, item: ItemId, amount: u32) -> u32;
}

/// Everything the engine needs from the world.
pub trait World: Terrain + Storage {}

impl<T: Terrain + Storage> World for T {}
