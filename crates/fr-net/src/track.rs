//! Track graph discovered from the spatial adjacency of placed pieces.
//!
//! # Build
//!
//! [`reload`](Network::reload) discards everything and rebuilds:
//!
//! 1. Collect every piece from the terrain's chunk buckets into an arena;
//!    a node is the piece's index in that arena ([`TrackNode`]).
//! 2. Bulk-load an R-tree with both world-space endpoints of every piece.
//! 3. For each endpoint, query the R-tree for endpoints of *other* pieces
//!    within `track_snap_tolerance`; each hit becomes a link on that end.
//!
//! The query is symmetric, so every link is recorded on both pieces.  Links
//! are stored per endpoint, which lets the search forbid reversing through a
//! junction and lets geometry assembly decide which way to run a piece.
//!
//! Node indices are only valid until the next rebuild; agents never hold
//! them across a rebuild because the manager re-derives every path after
//! calling `reload`.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::info;

use fr_core::{AgentKind, ComplexId, FleetConfig, PieceId, TilePos, Vec3, World};

use crate::Network;

// ── Node identity ─────────────────────────────────────────────────────────────

/// Arena index of a piece within the current graph build.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TrackNode(pub u32);

impl TrackNode {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── R-tree endpoint entry ─────────────────────────────────────────────────────

#[derive(Clone)]
struct EndpointEntry {
    point: [f32; 3],
    node:  TrackNode,
    end:   usize,
}

impl RTreeObject for EndpointEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EndpointEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[inline]
fn as_array(p: Vec3) -> [f32; 3] {
    [p.x, p.y, p.z]
}

// ── Arena entry ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct PlacedPiece {
    id:     PieceId,
    /// World-space polyline, first point is end 0, last point is end 1.
    points: Vec<Vec3>,
    /// Tile under the middle of the piece, used by the heuristic.
    tile:   TilePos,
    /// Pieces connected at end 0 and end 1.
    links:  [Vec<TrackNode>; 2],
}

impl PlacedPiece {
    /// The single end `other` is attached to; `None` if it is attached at
    /// neither end or at both (two pieces closing a loop).
    fn sole_end_linked_to(&self, other: TrackNode) -> Option<usize> {
        match (self.links[0].contains(&other), self.links[1].contains(&other)) {
            (true, false) => Some(0),
            (false, true) => Some(1),
            _ => None,
        }
    }

    /// The end lying closest to `point`.
    fn nearest_end(&self, point: Vec3) -> usize {
        let first = self.points.first().map_or(f32::INFINITY, |p| p.distance_squared(point));
        let last = self.points.last().map_or(f32::INFINITY, |p| p.distance_squared(point));
        usize::from(last < first)
    }

    /// The end an agent enters by, given its neighbours in the path and the
    /// point it arrives from.
    fn entry_end(&self, previous: Option<TrackNode>, next: Option<TrackNode>, arrival: Vec3) -> usize {
        let by_links = match (previous, next) {
            (Some(p), _) => self.sole_end_linked_to(p),
            (None, Some(n)) => self.sole_end_linked_to(n).map(|exit| 1 - exit),
            (None, None) => None,
        };
        by_links.unwrap_or_else(|| self.nearest_end(arrival))
    }
}

// ── TrackNetwork ──────────────────────────────────────────────────────────────

/// Rail network over placed track pieces.
pub struct TrackNetwork {
    pieces:           Vec<PlacedPiece>,
    by_id:            FxHashMap<PieceId, TrackNode>,
    endpoints:        RTree<EndpointEntry>,
    tolerance:        f32,
    arrival_distance: u32,
}

impl TrackNetwork {
    /// An empty network; call [`reload`](Network::reload) to build the graph.
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            pieces:           Vec::new(),
            by_id:            FxHashMap::default(),
            endpoints:        RTree::new(),
            tolerance:        config.track_snap_tolerance,
            arrival_distance: config.track_arrival_distance,
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn link_count(&self) -> usize {
        self.pieces.iter().map(|p| p.links[0].len() + p.links[1].len()).sum::<usize>() / 2
    }

    /// The node of a placed piece in the current build.
    pub fn node_of(&self, piece: PieceId) -> Option<TrackNode> {
        self.by_id.get(&piece).copied()
    }

    pub fn piece_of(&self, node: TrackNode) -> Option<PieceId> {
        self.pieces.get(node.index()).map(|p| p.id)
    }

    /// Every piece linked to `node` at either end.
    pub fn neighbours(&self, node: TrackNode) -> Vec<TrackNode> {
        self.pieces
            .get(node.index())
            .map(|p| p.links.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    fn within_tolerance(&self, point: Vec3) -> impl Iterator<Item = &EndpointEntry> + '_ {
        self.endpoints
            .locate_within_distance(as_array(point), self.tolerance * self.tolerance)
    }
}

impl Network for TrackNetwork {
    type Node = TrackNode;

    fn kind(&self) -> AgentKind {
        AgentKind::Train
    }

    fn collect_next_nodes(
        &self,
        _world:   &dyn World,
        node:     TrackNode,
        previous: Option<TrackNode>,
        out:      &mut Vec<(TrackNode, f32)>,
    ) {
        let Some(piece) = self.pieces.get(node.index()) else {
            return;
        };
        // Leave through the end opposite to the one we entered by.  A
        // predecessor attached at both ends leaves the entry open.
        let exits: &[usize] = match previous.and_then(|p| piece.sole_end_linked_to(p)) {
            Some(0) => &[1],
            Some(_) => &[0],
            None => &[0, 1],
        };
        for &end in exits {
            out.extend(piece.links[end].iter().map(|&n| (n, 1.0)));
        }
    }

    fn node_target_distance(&self, world: &dyn World, node: TrackNode, target: ComplexId) -> f32 {
        let Some(piece) = self.pieces.get(node.index()) else {
            return f32::INFINITY;
        };
        world
            .footprint(target)
            .iter()
            .map(|&t| piece.tile.manhattan_distance(t))
            .min()
            .map_or(f32::INFINITY, |d| d as f32)
    }

    fn node_at_target(&self, world: &dyn World, node: TrackNode, target: ComplexId) -> bool {
        self.node_target_distance(world, node, target) <= self.arrival_distance as f32
    }

    fn collect_node_points(
        &mut self,
        _world:   &dyn World,
        previous: Option<TrackNode>,
        node:     TrackNode,
        next:     Option<TrackNode>,
        arrival:  Vec3,
        out:      &mut Vec<Vec3>,
    ) {
        let Some(piece) = self.pieces.get(node.index()) else {
            return;
        };
        // Stored order runs end 0 → end 1; reverse when entering at end 1.
        if piece.entry_end(previous, next, arrival) == 1 {
            out.extend(piece.points.iter().rev().copied());
        } else {
            out.extend(piece.points.iter().copied());
        }
    }

    /// Every piece attached at the endpoint nearest to `position`, so that a
    /// train parked on a junction may leave along any of its branches.
    fn closest_nodes_to(&self, _world: &dyn World, position: Vec3) -> Vec<TrackNode> {
        let Some(nearest) = self.endpoints.nearest_neighbor(&as_array(position)) else {
            return Vec::new();
        };
        let anchor = Vec3::new(nearest.point[0], nearest.point[1], nearest.point[2]);
        let mut nodes: Vec<TrackNode> = self.within_tolerance(anchor).map(|e| e.node).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    fn reload(&mut self, world: &dyn World) {
        self.pieces.clear();
        self.by_id.clear();

        // ① Arena from chunk buckets.
        let (chunks_x, chunks_z) = world.size_in_chunks();
        let upt = world.units_per_tile();
        for cz in 0..chunks_z {
            for cx in 0..chunks_x {
                for piece in world.track_pieces_in_chunk(cx, cz) {
                    if piece.points.len() < 2 {
                        continue;
                    }
                    let points = piece.world_points();
                    let mid = points[0].lerp(points[points.len() - 1], 0.5);
                    let node = TrackNode(self.pieces.len() as u32);
                    self.by_id.insert(piece.id, node);
                    self.pieces.push(PlacedPiece {
                        id: piece.id,
                        points,
                        tile: TilePos::from_world(mid, upt),
                        links: [Vec::new(), Vec::new()],
                    });
                }
            }
        }

        // ② Endpoint index.
        let entries: Vec<EndpointEntry> = self
            .pieces
            .iter()
            .enumerate()
            .flat_map(|(i, p)| {
                let node = TrackNode(i as u32);
                let ends = [p.points[0], p.points[p.points.len() - 1]];
                ends.into_iter()
                    .enumerate()
                    .map(move |(end, pt)| EndpointEntry { point: as_array(pt), node, end })
            })
            .collect();
        self.endpoints = RTree::bulk_load(entries);

        // ③ Links by proximity.
        let mut links: Vec<[Vec<TrackNode>; 2]> = vec![[Vec::new(), Vec::new()]; self.pieces.len()];
        for entry in self.endpoints.iter() {
            let here = Vec3::new(entry.point[0], entry.point[1], entry.point[2]);
            for other in self.within_tolerance(here) {
                if other.node != entry.node {
                    links[entry.node.index()][entry.end].push(other.node);
                }
            }
        }
        for (piece, mut piece_links) in self.pieces.iter_mut().zip(links) {
            for l in &mut piece_links {
                l.sort_unstable();
                l.dedup();
            }
            piece.links = piece_links;
        }

        info!(pieces = self.pieces.len(), links = self.link_count(), "track graph rebuilt");
    }
}
