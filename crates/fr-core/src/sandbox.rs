//! `SandboxWorld` — a small in-memory [`World`] for demos and tests.
//!
//! Holds a flat height field, path/building/bridge sets, chunk-bucketed track
//! pieces, and complexes with a single shared capacity each.  It implements
//! the same clamping contract a real world does, so transactions and
//! pathfinding behave identically against it.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    Bridge, ComplexId, CoreError, CoreResult, ItemId, PieceId, Storage, Terrain, TilePos,
    TrackPiece, Vec3,
};

/// A complex inside the sandbox.
#[derive(Clone, Debug, Default)]
pub struct SandboxComplex {
    pub footprint: Vec<TilePos>,
    pub stock: BTreeMap<ItemId, u32>,
    /// Total units across all items.  `u32::MAX` for unbounded storage.
    pub capacity: u32,
}

impl SandboxComplex {
    pub fn total_stored(&self) -> u32 {
        self.stock.values().sum()
    }
}

/// In-memory world.
#[derive(Clone, Debug)]
pub struct SandboxWorld {
    width: i32,
    depth: i32,
    units_per_tile: f32,
    tiles_per_chunk: i32,
    /// `(width + 1) * (depth + 1)` corner heights, row-major by `z`.
    heights: Vec<f32>,
    water_level: f32,
    paths: HashSet<TilePos>,
    buildings: HashSet<TilePos>,
    bridges: HashMap<TilePos, Bridge>,
    tracks: HashMap<(i32, i32), Vec<TrackPiece>>,
    next_piece: PieceId,
    complexes: BTreeMap<ComplexId, SandboxComplex>,
    next_complex: ComplexId,
}

impl SandboxWorld {
    /// A flat map of `width × depth` tiles at elevation `1.0` with the water
    /// level at `0.0`.
    pub fn new(width: i32, depth: i32, units_per_tile: f32, tiles_per_chunk: i32) -> Self {
        let width = width.max(1);
        let depth = depth.max(1);
        let corners = ((width + 1) * (depth + 1)) as usize;
        Self {
            width,
            depth,
            units_per_tile,
            tiles_per_chunk: tiles_per_chunk.max(1),
            heights: vec![1.0; corners],
            water_level: 0.0,
            paths: HashSet::new(),
            buildings: HashSet::new(),
            bridges: HashMap::new(),
            tracks: HashMap::new(),
            next_piece: PieceId(0),
            complexes: BTreeMap::new(),
            next_complex: ComplexId(0),
        }
    }

    // ── Terrain editing ───────────────────────────────────────────────────

    fn corner_index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x > self.width || z > self.depth {
            return None;
        }
        Some((z * (self.width + 1) + x) as usize)
    }

    pub fn set_vertex_elevation(&mut self, x: i32, z: i32, height: f32) {
        if let Some(i) = self.corner_index(x, z) {
            self.heights[i] = height;
        }
    }

    /// Set all four corners of `tile` to `height`.
    pub fn set_tile_elevation(&mut self, tile: TilePos, height: f32) {
        for (dx, dz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            self.set_vertex_elevation(tile.x + dx, tile.z + dz, height);
        }
    }

    /// Lower every corner of the rectangle `[min, max]` (inclusive tiles) to
    /// `depth_below` under the water level.
    pub fn dig_water(&mut self, min: TilePos, max: TilePos, depth_below: f32) {
        let h = self.water_level - depth_below;
        for z in min.z..=max.z + 1 {
            for x in min.x..=max.x + 1 {
                self.set_vertex_elevation(x, z, h);
            }
        }
    }

    pub fn set_water_level(&mut self, level: f32) {
        self.water_level = level;
    }

    pub fn set_path(&mut self, tile: TilePos, path: bool) {
        if path {
            self.paths.insert(tile);
        } else {
            self.paths.remove(&tile);
        }
    }

    /// Mark every tile of the rectangle `[min, max]` (inclusive) as path.
    pub fn paint_paths(&mut self, min: TilePos, max: TilePos) {
        for z in min.z..=max.z {
            for x in min.x..=max.x {
                self.paths.insert(TilePos::new(x, z));
            }
        }
    }

    pub fn set_building(&mut self, tile: TilePos, building: bool) {
        if building {
            self.buildings.insert(tile);
        } else {
            self.buildings.remove(&tile);
        }
    }

    pub fn set_bridge(&mut self, tile: TilePos, bridge: Option<Bridge>) {
        match bridge {
            Some(b) => {
                self.bridges.insert(tile, b);
            }
            None => {
                self.bridges.remove(&tile);
            }
        }
    }

    // ── Track editing ─────────────────────────────────────────────────────

    /// Place a track piece whose local polyline is `points`; returns its id.
    /// The piece is bucketed into the chunk containing `position`.
    pub fn place_track(&mut self, position: Vec3, yaw: f32, points: Vec<Vec3>) -> PieceId {
        let id = self.next_piece;
        self.next_piece = id.next();
        let chunk = TilePos::from_world(position, self.units_per_tile).chunk(self.tiles_per_chunk);
        self.tracks.entry(chunk).or_default().push(TrackPiece { id, position, yaw, points });
        id
    }

    /// A straight piece one tile long, centred on `tile` and running along
    /// `x` (`yaw = 0`) or `z` (`yaw = π/2`).
    pub fn place_straight_track(&mut self, tile: TilePos, yaw: f32) -> PieceId {
        let half = self.units_per_tile * 0.5;
        let centre = tile.center(self.units_per_tile);
        let points = vec![
            Vec3::new(-half, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(half, 0.0, 0.0),
        ];
        self.place_track(centre, yaw, points)
    }

    pub fn remove_track(&mut self, id: PieceId) -> CoreResult<TrackPiece> {
        for pieces in self.tracks.values_mut() {
            if let Some(i) = pieces.iter().position(|p| p.id == id) {
                return Ok(pieces.remove(i));
            }
        }
        Err(CoreError::PieceNotFound(id))
    }

    // ── Complexes ─────────────────────────────────────────────────────────

    /// Register a complex covering `footprint`; its tiles become buildings.
    pub fn add_complex(&mut self, footprint: Vec<TilePos>, capacity: u32) -> ComplexId {
        let id = self.next_complex;
        self.next_complex = id.next();
        for &tile in &footprint {
            self.buildings.insert(tile);
        }
        self.complexes.insert(id, SandboxComplex { footprint, stock: BTreeMap::new(), capacity });
        id
    }

    /// Demolish a complex, freeing its tiles.
    pub fn remove_complex(&mut self, id: ComplexId) -> CoreResult<SandboxComplex> {
        let complex = self.complexes.remove(&id).ok_or(CoreError::ComplexNotFound(id))?;
        for tile in &complex.footprint {
            self.buildings.remove(tile);
        }
        Ok(complex)
    }

    /// Overwrite the stock of `item`, ignoring capacity.
    pub fn set_stock(&mut self, id: ComplexId, item: ItemId, amount: u32) -> CoreResult<()> {
        let complex = self.complexes.get_mut(&id).ok_or(CoreError::ComplexNotFound(id))?;
        complex.stock.insert(item, amount);
        Ok(())
    }

    pub fn complex(&self, id: ComplexId) -> Option<&SandboxComplex> {
        self.complexes.get(&id)
    }
}

impl Terrain for SandboxWorld {
    fn units_per_tile(&self) -> f32 {
        self.units_per_tile
    }

    fn tiles_per_chunk(&self) -> i32 {
        self.tiles_per_chunk
    }

    fn size_in_tiles(&self) -> (i32, i32) {
        (self.width, self.depth)
    }

    fn vertex_elevation(&self, x: i32, z: i32) -> Option<f32> {
        self.corner_index(x, z).map(|i| self.heights[i])
    }

    fn water_level(&self) -> f32 {
        self.water_level
    }

    fn is_path(&self, tile: TilePos) -> bool {
        self.paths.contains(&tile)
    }

    fn has_building(&self, tile: TilePos) -> bool {
        self.buildings.contains(&tile)
    }

    fn bridge_at(&self, tile: TilePos) -> Option<Bridge> {
        self.bridges.get(&tile).copied()
    }

    fn track_pieces_in_chunk(&self, chunk_x: i32, chunk_z: i32) -> &[TrackPiece] {
        self.tracks.get(&(chunk_x, chunk_z)).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Storage for SandboxWorld {
    fn footprint(&self, complex: ComplexId) -> &[TilePos] {
        self.complexes.get(&complex).map(|c| c.footprint.as_slice()).unwrap_or(&[])
    }

    fn stored_count(&self, complex: ComplexId, item: ItemId) -> u32 {
        self.complexes
            .get(&complex)
            .and_then(|c| c.stock.get(&item).copied())
            .unwrap_or(0)
    }

    fn add_stored(&mut self, complex: ComplexId, item: ItemId, amount: u32) -> u32 {
        let Some(c) = self.complexes.get_mut(&complex) else {
            return 0;
        };
        let free = c.capacity.saturating_sub(c.total_stored());
        let accepted = amount.min(free);
        *c.stock.entry(item).or_insert(0) += accepted;
        accepted
    }

    fn remove_stored(&mut self, complex: ComplexId, item: ItemId, amount: u32) -> u32 {
        let Some(c) = self.complexes.get_mut(&complex) else {
            return 0;
        };
        let Some(held) = c.stock.get_mut(&item) else {
            return 0;
        };
        let removed = amount.min(*held);
        *held -= removed;
        removed
    }
}
