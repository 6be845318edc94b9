//! `AgentManager<N>` — one network plus every agent travelling over it.
//!
//! # Topology changes
//!
//! Paths are never patched.  When anything that affects connectivity
//! changes, [`AgentManager::find_paths`] rebuilds the network and re-derives
//! every agent's route from scratch, so no agent keeps node ids from a
//! previous build.

use std::collections::BTreeMap;

use tracing::{debug, info};

use fr_agent::{Agent, AgentEvent, TickContext};
use fr_core::{AgentId, AgentKind, Vec3, World};
use fr_net::Network;

use crate::{FleetError, FleetObserver, FleetResult};

pub struct AgentManager<N: Network> {
    network: N,
    agents:  BTreeMap<AgentId, Agent<N>>,
    next_id: AgentId,
}

impl<N: Network> AgentManager<N> {
    pub fn new(network: N) -> Self {
        Self { network, agents: BTreeMap::new(), next_id: AgentId(0) }
    }

    pub fn kind(&self) -> AgentKind {
        self.network.kind()
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Take ownership of `agent`; returns its id.
    pub fn spawn(&mut self, agent: Agent<N>) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        debug!(kind = %self.kind(), %id, name = agent.name(), "agent spawned");
        self.agents.insert(id, agent);
        id
    }

    /// Spawn an idle agent of this manager's kind at `position`.
    pub fn spawn_at(&mut self, position: Vec3) -> AgentId {
        self.spawn(Agent::new(self.kind(), position))
    }

    pub fn remove(&mut self, id: AgentId) -> FleetResult<Agent<N>> {
        let kind = self.kind();
        self.agents.remove(&id).ok_or(FleetError::AgentNotFound { kind, id })
    }

    pub fn get(&self, id: AgentId) -> FleetResult<&Agent<N>> {
        self.agents.get(&id).ok_or(FleetError::AgentNotFound { kind: self.kind(), id })
    }

    pub fn get_mut(&mut self, id: AgentId) -> FleetResult<&mut Agent<N>> {
        let kind = self.kind();
        self.agents.get_mut(&id).ok_or(FleetError::AgentNotFound { kind, id })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent<N>)> + '_ {
        self.agents.iter().map(|(&id, a)| (id, a))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AgentId, &mut Agent<N>)> + '_ {
        self.agents.iter_mut().map(|(&id, a)| (id, a))
    }

    pub fn lost_count(&self) -> usize {
        self.agents.values().filter(|a| a.is_lost()).count()
    }

    /// Agents whose ground-plane distance from `position` is at most
    /// `radius`.
    pub fn agents_near(&self, position: Vec3, radius: f32) -> impl Iterator<Item = (AgentId, &Agent<N>)> + '_ {
        self.iter().filter(move |(_, a)| a.position().ground_distance(position) <= radius)
    }

    // ── Rebuild ───────────────────────────────────────────────────────────

    /// Rebuild the network and re-derive every agent's route.
    ///
    /// Fires `on_agents_lost` once if any agent went from not-lost to lost.
    /// Returns the number of agents newly lost.
    pub fn find_paths(&mut self, world: &dyn World, observer: &mut dyn FleetObserver) -> usize {
        self.network.reload(world);
        let kind = self.kind();

        let mut newly_lost = 0;
        for (&id, agent) in &mut self.agents {
            match agent.reroute(&mut self.network, world) {
                Some(AgentEvent::Lost) => newly_lost += 1,
                Some(AgentEvent::Found) => observer.on_agent_found(kind, id),
                _ => {}
            }
        }

        info!(%kind, agents = self.agents.len(), newly_lost, "paths rebuilt");
        if newly_lost > 0 {
            observer.on_agents_lost(kind, kind.lost_message_key());
        }
        newly_lost
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Tick the network, then every agent.
    pub fn update(&mut self, world: &mut dyn World, ctx: &TickContext<'_>, observer: &mut dyn FleetObserver) {
        self.network.update(&*world, ctx.delta_secs);
        let kind = self.kind();

        let mut any_lost = false;
        for (&id, agent) in &mut self.agents {
            match agent.update(&mut self.network, world, ctx) {
                Some(AgentEvent::Lost) => any_lost = true,
                Some(AgentEvent::Found) => observer.on_agent_found(kind, id),
                Some(AgentEvent::Served(transfer)) => observer.on_stop_served(kind, id, &transfer),
                None => {}
            }
        }

        if any_lost {
            observer.on_agents_lost(kind, kind.lost_message_key());
        }
    }
}
