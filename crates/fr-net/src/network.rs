//! The contract every topology satisfies.
//!
//! # Pluggability
//!
//! [`find_path`][crate::find_path] and the agent state machine only talk to
//! topologies through this trait, so the same A* and the same agent life
//! cycle drive carriages over road tiles, boats over water tiles, and trains
//! over the track graph.  The node identity is an associated type: tile
//! coordinates for grids, arena indices for the track graph.
//!
//! # World access
//!
//! Networks do not hold a reference to the world.  Every query receives the
//! world explicitly, which keeps networks `'static` and lets the owner of the
//! world mutate it between ticks without fighting the borrow checker.

use std::fmt::Debug;
use std::hash::Hash;

use fr_core::{AgentKind, ComplexId, Vec3, World};

pub trait Network {
    /// Opaque, topology-specific node identity.
    type Node: Copy + Eq + Hash + Debug;

    /// The kind of agent that travels over this network.
    fn kind(&self) -> AgentKind;

    /// Append every traversable neighbour of `node` and the cost of stepping
    /// onto it to `out`.  `previous` is the node the search arrived from and
    /// may restrict which neighbours are reachable.
    fn collect_next_nodes(
        &self,
        world:    &dyn World,
        node:     Self::Node,
        previous: Option<Self::Node>,
        out:      &mut Vec<(Self::Node, f32)>,
    );

    /// Heuristic cost from `node` to the nearest tile of `target`.
    /// Returns `f32::INFINITY` if the target has no footprint.
    fn node_target_distance(&self, world: &dyn World, node: Self::Node, target: ComplexId) -> f32;

    /// Arrival test: `true` once `node` is close enough to `target` to serve it.
    fn node_at_target(&self, world: &dyn World, node: Self::Node, target: ComplexId) -> bool;

    /// Append the polyline an agent follows while at `node` to `out`,
    /// oriented from `previous` towards `next`.  `arrival` is the last point
    /// of the preceding section (or the path start) and settles the
    /// orientation where the node ids alone are ambiguous.
    fn collect_node_points(
        &mut self,
        world:    &dyn World,
        previous: Option<Self::Node>,
        node:     Self::Node,
        next:     Option<Self::Node>,
        arrival:  Vec3,
        out:      &mut Vec<Vec3>,
    );

    /// Entry nodes used to seed a search from an arbitrary world position.
    fn closest_nodes_to(&self, world: &dyn World, position: Vec3) -> Vec<Self::Node>;

    /// Discard and rebuild any cached adjacency.
    fn reload(&mut self, _world: &dyn World) {}

    /// Per-frame hook for networks with time-varying state.
    fn update(&mut self, _world: &dyn World, _delta_secs: f32) {}
}
