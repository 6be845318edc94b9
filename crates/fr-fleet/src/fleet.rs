//! `Fleet` — one manager per agent kind sharing a clock and configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut fleet = Fleet::new(FleetConfig::default())?;
//! let id = fleet.carriages_mut().spawn_at(depot_door);
//! fleet.topology_changed(&world, &mut NoopObserver);
//!
//! loop {
//!     fleet.update(&mut world, 1.0 / 30.0, &mut NoopObserver);
//! }
//! ```
//!
//! Call [`Fleet::topology_changed`] once after the world is set up and again
//! whenever track, path, building, or terrain edits may change connectivity;
//! the track graph is empty until its first rebuild.

use fr_agent::TickContext;
use fr_core::{AgentId, AgentKind, FleetConfig, SimClock, Vec3, World};
use fr_net::{RoadNetwork, TrackNetwork, WaterNetwork};

use crate::{AgentManager, AgentView, AgentViewMut, FleetObserver, FleetResult};

pub struct Fleet {
    config:    FleetConfig,
    clock:     SimClock,
    carriages: AgentManager<RoadNetwork>,
    trains:    AgentManager<TrackNetwork>,
    boats:     AgentManager<WaterNetwork>,
}

impl Fleet {
    /// Validate `config` and build the three networks.
    pub fn new(config: FleetConfig) -> FleetResult<Self> {
        config.validate()?;
        Ok(Self {
            carriages: AgentManager::new(RoadNetwork::road(&config)),
            trains:    AgentManager::new(TrackNetwork::new(&config)),
            boats:     AgentManager::new(WaterNetwork::water(&config)),
            clock:     SimClock::new(),
            config,
        })
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn carriages(&self) -> &AgentManager<RoadNetwork> {
        &self.carriages
    }

    pub fn carriages_mut(&mut self) -> &mut AgentManager<RoadNetwork> {
        &mut self.carriages
    }

    pub fn trains(&self) -> &AgentManager<TrackNetwork> {
        &self.trains
    }

    pub fn trains_mut(&mut self) -> &mut AgentManager<TrackNetwork> {
        &mut self.trains
    }

    pub fn boats(&self) -> &AgentManager<WaterNetwork> {
        &self.boats
    }

    pub fn boats_mut(&mut self) -> &mut AgentManager<WaterNetwork> {
        &mut self.boats
    }

    pub fn len(&self) -> usize {
        self.carriages.len() + self.trains.len() + self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lost_count(&self) -> usize {
        self.carriages.lost_count() + self.trains.lost_count() + self.boats.lost_count()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the clock by `delta_secs` and tick every manager.
    pub fn update(&mut self, world: &mut dyn World, delta_secs: f32, observer: &mut dyn FleetObserver) {
        self.clock.advance(delta_secs);
        let ctx = TickContext { clock: &self.clock, delta_secs, config: &self.config };
        self.carriages.update(world, &ctx, observer);
        self.trains.update(world, &ctx, observer);
        self.boats.update(world, &ctx, observer);
    }

    // ── Rebuild ───────────────────────────────────────────────────────────

    /// Rebuild every network and re-derive every route.  Returns the number
    /// of agents newly lost.
    pub fn topology_changed(&mut self, world: &dyn World, observer: &mut dyn FleetObserver) -> usize {
        let mut newly_lost = 0;
        for kind in AgentKind::ALL {
            newly_lost += self.rebuild(kind, world, observer);
        }
        newly_lost
    }

    /// Rebuild only the network used by `kind`, e.g. after placing track.
    pub fn rebuild(&mut self, kind: AgentKind, world: &dyn World, observer: &mut dyn FleetObserver) -> usize {
        match kind {
            AgentKind::Carriage => self.carriages.find_paths(world, observer),
            AgentKind::Train => self.trains.find_paths(world, observer),
            AgentKind::Boat => self.boats.find_paths(world, observer),
        }
    }

    // ── Views ─────────────────────────────────────────────────────────────

    /// Every agent, carriages first, then trains, then boats.
    pub fn views(&self) -> impl Iterator<Item = (AgentId, AgentView<'_>)> + '_ {
        let carriages = self.carriages.iter().map(|(id, a)| (id, AgentView::from(a)));
        let trains = self.trains.iter().map(|(id, a)| (id, AgentView::from(a)));
        let boats = self.boats.iter().map(|(id, a)| (id, AgentView::from(a)));
        carriages.chain(trains).chain(boats)
    }

    /// Agents within `radius` of `position` on the ground plane.
    pub fn views_near(&self, position: Vec3, radius: f32) -> impl Iterator<Item = (AgentId, AgentView<'_>)> + '_ {
        self.views()
            .filter(move |(_, v)| v.position().ground_distance(position) <= radius)
    }

    pub fn view(&self, kind: AgentKind, id: AgentId) -> FleetResult<AgentView<'_>> {
        Ok(match kind {
            AgentKind::Carriage => AgentView::Carriage(self.carriages.get(id)?),
            AgentKind::Train => AgentView::Train(self.trains.get(id)?),
            AgentKind::Boat => AgentView::Boat(self.boats.get(id)?),
        })
    }

    pub fn view_mut(&mut self, kind: AgentKind, id: AgentId) -> FleetResult<AgentViewMut<'_>> {
        Ok(match kind {
            AgentKind::Carriage => AgentViewMut::Carriage(self.carriages.get_mut(id)?),
            AgentKind::Train => AgentViewMut::Train(self.trains.get_mut(id)?),
            AgentKind::Boat => AgentViewMut::Boat(self.boats.get_mut(id)?),
        })
    }

    /// Remove an agent of any kind.
    pub fn remove(&mut self, kind: AgentKind, id: AgentId) -> FleetResult<()> {
        match kind {
            AgentKind::Carriage => self.carriages.remove(id).map(drop),
            AgentKind::Train => self.trains.remove(id).map(drop),
            AgentKind::Boat => self.boats.remove(id).map(drop),
        }
    }
}
