//! 8-connected tile grid used by carriages (road) and boats (water).
//!
//! The grid is never cached: neighbours are computed on demand from live
//! terrain state, so `reload` has nothing to do and edits to paths, water,
//! or buildings take effect on the very next search.
//!
//! The two modes differ only in their [`Passability`] predicate and in the
//! height at which waypoints are placed.

use fr_core::geo::DIAGONAL_COST;
use fr_core::{AgentKind, ComplexId, FleetConfig, JitterRng, TilePos, Vec3, World};

use crate::Network;

// ── Passability ───────────────────────────────────────────────────────────────

/// Which tiles an agent kind may enter.
pub trait Passability {
    fn kind(&self) -> AgentKind;

    fn is_passable(&self, world: &dyn World, tile: TilePos) -> bool;

    /// Height of the travelled surface at world `(x, z)`.
    fn surface_height(&self, world: &dyn World, x: f32, z: f32) -> f32 {
        world.elevation_at(x, z)
    }
}

/// Carriages: path tiles not covered by a building.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoadTiles;

impl Passability for RoadTiles {
    fn kind(&self) -> AgentKind {
        AgentKind::Carriage
    }

    fn is_passable(&self, world: &dyn World, tile: TilePos) -> bool {
        world.is_path(tile) && !world.has_building(tile)
    }
}

/// Boats: the 3×3 block of terrain vertices centred on the tile's origin
/// corner lies below the water surface, and any bridge over the tile leaves
/// a channel with enough clearance.
///
/// The block covers the tile's own four corners plus the row and column of
/// vertices behind it, so a boat keeps one vertex of open water between
/// itself and the bank.  Vertices outside the map count as dry.
#[derive(Copy, Clone, Debug)]
pub struct WaterTiles {
    pub min_clearance: f32,
}

impl WaterTiles {
    /// Vertex offsets sampled around the tile's origin corner.
    const SPAN: [i32; 3] = [-1, 0, 1];
}

impl Passability for WaterTiles {
    fn kind(&self) -> AgentKind {
        AgentKind::Boat
    }

    fn is_passable(&self, world: &dyn World, tile: TilePos) -> bool {
        let water = world.water_level();
        let submerged = Self::SPAN.iter().all(|&dz| {
            Self::SPAN.iter().all(|&dx| {
                world
                    .vertex_elevation(tile.x + dx, tile.z + dz)
                    .is_some_and(|h| h < water)
            })
        });
        if !submerged {
            return false;
        }
        match world.bridge_at(tile) {
            None => true,
            Some(bridge) => bridge.boat_passable && bridge.deck_height - water >= self.min_clearance,
        }
    }

    fn surface_height(&self, world: &dyn World, x: f32, z: f32) -> f32 {
        world.elevation_at(x, z).max(world.water_level())
    }
}

// ── TileNetwork ───────────────────────────────────────────────────────────────

/// Grid network over terrain tiles.
#[derive(Debug)]
pub struct TileNetwork<P> {
    passability:      P,
    rng:              JitterRng,
    jitter_fraction:  f32,
    arrival_distance: f32,
}

/// Road network for carriages.
pub type RoadNetwork = TileNetwork<RoadTiles>;

/// Water network for boats.
pub type WaterNetwork = TileNetwork<WaterTiles>;

impl<P: Passability> TileNetwork<P> {
    pub fn new(passability: P, config: &FleetConfig) -> Self {
        let salt = passability.kind() as u64 + 1;
        Self {
            passability,
            rng:              JitterRng::salted(config.seed, salt),
            jitter_fraction:  config.jitter_fraction,
            arrival_distance: config.tile_arrival_distance,
        }
    }

    pub fn passability(&self) -> &P {
        &self.passability
    }

    pub fn is_passable(&self, world: &dyn World, tile: TilePos) -> bool {
        world.contains_tile(tile) && self.passability.is_passable(world, tile)
    }
}

impl RoadNetwork {
    pub fn road(config: &FleetConfig) -> Self {
        Self::new(RoadTiles, config)
    }
}

impl WaterNetwork {
    pub fn water(config: &FleetConfig) -> Self {
        Self::new(WaterTiles { min_clearance: config.boat_min_clearance }, config)
    }
}

impl<P: Passability> Network for TileNetwork<P> {
    type Node = TilePos;

    fn kind(&self) -> AgentKind {
        self.passability.kind()
    }

    fn collect_next_nodes(
        &self,
        world:     &dyn World,
        node:      TilePos,
        _previous: Option<TilePos>,
        out:       &mut Vec<(TilePos, f32)>,
    ) {
        for (dx, dz) in TilePos::NEIGHBOR_OFFSETS {
            let next = node.offset(dx, dz);
            if !self.is_passable(world, next) {
                continue;
            }
            let cost = if node.is_diagonal_to(next) { DIAGONAL_COST } else { 1.0 };
            out.push((next, cost));
        }
    }

    fn node_target_distance(&self, world: &dyn World, node: TilePos, target: ComplexId) -> f32 {
        world
            .footprint(target)
            .iter()
            .map(|&t| node.octile_distance(t))
            .fold(f32::INFINITY, f32::min)
    }

    fn node_at_target(&self, world: &dyn World, node: TilePos, target: ComplexId) -> bool {
        self.node_target_distance(world, node, target) <= self.arrival_distance
    }

    fn collect_node_points(
        &mut self,
        world:     &dyn World,
        _previous: Option<TilePos>,
        node:      TilePos,
        _next:     Option<TilePos>,
        _arrival:  Vec3,
        out:       &mut Vec<Vec3>,
    ) {
        let upt = world.units_per_tile();
        let centre = node.center(upt);
        let (jx, jz) = self.rng.planar_offset(self.jitter_fraction * upt);
        let x = centre.x + jx;
        let z = centre.z + jz;
        out.push(Vec3::new(x, self.passability.surface_height(world, x, z), z));
    }

    fn closest_nodes_to(&self, world: &dyn World, position: Vec3) -> Vec<TilePos> {
        vec![TilePos::from_world(position, world.units_per_tile())]
    }
}
