//! Closed-set A* over any [`Network`].
//!
//! # Algorithm
//!
//! 1. Seed the frontier with every node from `closest_nodes_to(start)` at
//!    accumulated cost 0.
//! 2. Pop the frontier entry with the lowest `accumulated + heuristic`; ties
//!    go to the entry pushed first.
//! 3. Skip it if already explored, otherwise mark it explored.  If it passes
//!    `node_at_target`, walk parent links back to a seed.
//! 4. Otherwise relax every unexplored neighbour whose accumulated cost
//!    improves and push it.
//!
//! Explored nodes are never re-opened, so no node is expanded twice.  With an
//! inconsistent heuristic the result may not be the cheapest route, but a
//! route is always found if one exists.
//!
//! The node chain is then handed back to the network, which emits one
//! polyline per node oriented by its neighbours in the chain.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::debug;

use fr_core::{ComplexId, Vec3, World};

use crate::{Network, NetworkError, NetworkResult, Path, Section};

// ── Frontier entry ────────────────────────────────────────────────────────────

struct Frontier<T> {
    estimate: f32,
    /// Push order; lower wins ties.
    seq: u64,
    node: T,
}

impl<T> PartialEq for Frontier<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Frontier<T> {}

impl<T> PartialOrd for Frontier<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Frontier<T> {
    /// Reversed so that `BinaryHeap` (a max-heap) pops the lowest estimate.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Book-keeping per discovered node.
struct Visit<T> {
    cost: f32,
    parent: Option<T>,
    explored: bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find a route from `start` to the complex `target` over `network`.
///
/// # Errors
///
/// - [`NetworkError::UnknownTarget`] if `target` has no footprint.
/// - [`NetworkError::NoEntryNode`] if the network has no node near `start`.
/// - [`NetworkError::NoRoute`] if the frontier empties first.
pub fn find_path<N: Network>(
    network: &mut N,
    world:   &dyn World,
    start:   Vec3,
    target:  ComplexId,
) -> NetworkResult<Path<N::Node>> {
    if world.footprint(target).is_empty() {
        return Err(NetworkError::UnknownTarget(target));
    }

    let seeds = network.closest_nodes_to(world, start);
    if seeds.is_empty() {
        return Err(NetworkError::NoEntryNode(start));
    }

    let mut visits: FxHashMap<N::Node, Visit<N::Node>> = FxHashMap::default();
    let mut heap: BinaryHeap<Frontier<N::Node>> = BinaryHeap::new();
    let mut seq = 0u64;

    for node in seeds {
        if visits.contains_key(&node) {
            continue;
        }
        visits.insert(node, Visit { cost: 0.0, parent: None, explored: false });
        let estimate = network.node_target_distance(world, node, target);
        heap.push(Frontier { estimate, seq, node });
        seq += 1;
    }

    let mut neighbours = Vec::new();
    let mut explored = 0usize;

    while let Some(Frontier { node, .. }) = heap.pop() {
        let (cost, parent) = match visits.get_mut(&node) {
            Some(v) if !v.explored => {
                v.explored = true;
                (v.cost, v.parent)
            }
            _ => continue,
        };
        explored += 1;

        if network.node_at_target(world, node, target) {
            let chain = reconstruct(&visits, node);
            debug!(
                kind = %network.kind(),
                %target,
                explored,
                nodes = chain.len(),
                "path found"
            );
            return Ok(assemble(network, world, start, &chain));
        }

        neighbours.clear();
        network.collect_next_nodes(world, node, parent, &mut neighbours);

        for &(next, step) in &neighbours {
            let candidate = cost + step;
            match visits.get_mut(&next) {
                Some(v) if v.explored => continue,
                Some(v) if v.cost <= candidate => continue,
                Some(v) => {
                    v.cost = candidate;
                    v.parent = Some(node);
                }
                None => {
                    visits.insert(next, Visit { cost: candidate, parent: Some(node), explored: false });
                }
            }
            let estimate = candidate + network.node_target_distance(world, next, target);
            heap.push(Frontier { estimate, seq, node: next });
            seq += 1;
        }
    }

    debug!(kind = %network.kind(), %target, explored, "no route");
    Err(NetworkError::NoRoute { target, explored })
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Walk parent links from `goal` back to a seed; returns seed-first order.
fn reconstruct<T: Copy + Eq + std::hash::Hash>(visits: &FxHashMap<T, Visit<T>>, goal: T) -> Vec<T> {
    let mut chain = vec![goal];
    let mut cur = goal;
    while let Some(parent) = visits.get(&cur).and_then(|v| v.parent) {
        chain.push(parent);
        cur = parent;
    }
    chain.reverse();
    chain
}

/// Ask the network for each node's polyline, oriented by its chain neighbours.
fn assemble<N: Network>(
    network: &mut N,
    world:   &dyn World,
    start:   Vec3,
    chain:   &[N::Node],
) -> Path<N::Node> {
    let mut sections = Vec::with_capacity(chain.len());
    let mut arrival = start;
    for (i, &node) in chain.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| chain[p]);
        let next = chain.get(i + 1).copied();
        let mut points = Vec::new();
        network.collect_node_points(world, previous, node, next, arrival, &mut points);
        if let Some(&last) = points.last() {
            arrival = last;
        }
        sections.push(Section { node, points });
    }
    Path::from_sections(start, sections)
}
