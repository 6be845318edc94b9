//! `Agent<N>` — one vehicle driving itself over network `N`.
//!
//! # Tick
//!
//! [`Agent::update`] is called once per frame by the owning manager.  It
//! runs at most one state transition and reports it as an [`AgentEvent`]
//! so that the manager can batch user notifications.
//!
//! # Path history
//!
//! The agent keeps the geometry it has already driven.  Each new route is
//! appended onto the end of the existing path with the distance cursor left
//! where it is, and while parked at a stop the consumed head is trimmed to
//! `retained_sections` trailing sections.  [`Agent::reset_path`] drops the
//! history entirely; the manager calls it whenever topology changes because
//! stored node ids may no longer be valid.

use std::collections::BTreeMap;

use tracing::{info, warn};

use fr_core::{AgentKind, FleetConfig, ItemId, SimClock, Vec3, World};
use fr_net::{find_path, Network, NetworkError, Path};

use crate::transaction::{execute, Hold, Transfer};
use crate::{AgentState, AgentStop, Schedule};

// ── Events ────────────────────────────────────────────────────────────────────

/// A transition worth telling the outside world about.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgentEvent {
    /// The agent could not find a route and was not lost before.
    Lost,
    /// A lost agent found a route again.
    Found,
    /// The dwell at a stop ended and its transaction ran.
    Served(Transfer),
}

/// Per-frame inputs shared by every agent of a manager.
#[derive(Copy, Clone, Debug)]
pub struct TickContext<'a> {
    pub clock:      &'a SimClock,
    pub delta_secs: f32,
    pub config:     &'a FleetConfig,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

pub struct Agent<N: Network> {
    kind:          AgentKind,
    name:          String,
    speed:         f32,
    capacity:      u32,
    schedule:      Schedule,
    items:         BTreeMap<ItemId, u32>,
    state:         AgentState,
    position:      Vec3,
    path:          Path<N::Node>,
    /// Distance travelled along `path`.
    distance:      f32,
    /// `true` once a route to the current stop has been appended to `path`.
    has_route:     bool,
    loading_since: f64,
    last_trim:     f64,
}

impl<N: Network> Agent<N> {
    /// A new idle agent at `position` with the kind's default speed and
    /// capacity.
    pub fn new(kind: AgentKind, position: Vec3) -> Self {
        Self {
            kind,
            name:          kind.display_name().to_owned(),
            speed:         kind.default_speed(),
            capacity:      kind.default_capacity(),
            schedule:      Schedule::empty(),
            items:         BTreeMap::new(),
            state:         AgentState::Idle,
            position,
            path:          Path::new(position),
            distance:      0.0,
            has_route:     false,
            loading_since: 0.0,
            last_trim:     0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Edits take effect on the next tick: an emptied schedule idles the
    /// agent, a filled one sets it travelling.
    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    pub fn items(&self) -> &BTreeMap<ItemId, u32> {
        &self.items
    }

    pub fn held(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn total_held(&self) -> u32 {
        self.items.values().sum()
    }

    /// Replace the held amount of `item`, clamped to the free capacity.
    pub fn set_held(&mut self, item: ItemId, amount: u32) {
        let others = self.total_held() - self.held(item);
        let amount = amount.min(self.capacity.saturating_sub(others));
        if amount == 0 {
            self.items.remove(&item);
        } else {
            self.items.insert(item, amount);
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_lost(&self) -> bool {
        self.state.is_lost()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn path(&self) -> &Path<N::Node> {
        &self.path
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The stop being travelled to or served.
    pub fn current_stop(&self) -> Option<&AgentStop> {
        self.schedule.current()
    }

    // ── Path control ──────────────────────────────────────────────────────

    /// Drop the path and its history; a travelling agent searches again on
    /// its next tick.
    pub fn reset_path(&mut self) {
        self.path = Path::new(self.position);
        self.distance = 0.0;
        self.has_route = false;
    }

    /// Reset the path and search again right away.  Used by the manager
    /// after a topology change.
    ///
    /// A travelling or lost agent gets a fresh route.  A parked agent keeps
    /// dwelling if its stop can still be reached from where it stands and
    /// turns `Lost` otherwise, so the change is reported in the same pass.
    pub fn reroute(&mut self, network: &mut N, world: &dyn World) -> Option<AgentEvent> {
        self.reset_path();
        match self.state {
            AgentState::Travelling | AgentState::Lost => self.seek_route(network, world),
            AgentState::Loading => self.confirm_stop(network, world),
            AgentState::Idle => None,
        }
    }

    /// Check that the stop being served is still reachable.
    fn confirm_stop(&mut self, network: &mut N, world: &dyn World) -> Option<AgentEvent> {
        let stop = self.schedule.current().copied()?;
        let err = find_path(network, world, self.position, stop.complex).err()?;
        self.mark_lost(&err)
    }

    fn mark_lost(&mut self, err: &NetworkError) -> Option<AgentEvent> {
        if let NetworkError::UnknownTarget(target) = err {
            warn!(kind = %self.kind, name = %self.name, %target, "schedule points at a missing complex");
        }
        let was_lost = self.state.is_lost();
        self.state = AgentState::Lost;
        if was_lost {
            return None;
        }
        info!(kind = %self.kind, name = %self.name, %err, "agent lost");
        Some(AgentEvent::Lost)
    }

    /// Search for a route to the current stop and append it.  Sets
    /// `Travelling` or `Lost` accordingly.
    fn seek_route(&mut self, network: &mut N, world: &dyn World) -> Option<AgentEvent> {
        let was_lost = self.state.is_lost();
        let Some(stop) = self.schedule.current().copied() else {
            self.state = AgentState::Idle;
            return None;
        };

        match find_path(network, world, self.position, stop.complex) {
            Ok(route) => {
                self.path.append(route);
                self.has_route = true;
                self.state = AgentState::Travelling;
                if was_lost {
                    info!(kind = %self.kind, name = %self.name, target = %stop.complex, "agent found a route");
                    return Some(AgentEvent::Found);
                }
                None
            }
            Err(err) => self.mark_lost(&err),
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the state machine by one frame.
    pub fn update(&mut self, network: &mut N, world: &mut dyn World, ctx: &TickContext<'_>) -> Option<AgentEvent> {
        if self.schedule.is_empty() {
            if self.state != AgentState::Idle {
                self.state = AgentState::Idle;
                self.has_route = false;
            }
            return None;
        }

        match self.state {
            AgentState::Idle | AgentState::Travelling | AgentState::Lost => self.travel(network, world, ctx),
            AgentState::Loading => self.dwell(world, ctx),
        }
    }

    fn travel(&mut self, network: &mut N, world: &dyn World, ctx: &TickContext<'_>) -> Option<AgentEvent> {
        if self.state == AgentState::Idle {
            self.state = AgentState::Travelling;
        }

        let mut event = None;
        if !self.has_route {
            event = self.seek_route(network, world);
            if !self.has_route {
                return event;
            }
        }

        let length = self.path.length();
        self.distance = (self.distance + self.speed * ctx.delta_secs.max(0.0)).min(length);
        self.position = self.path.after(self.distance).position;

        if self.distance >= length {
            let now = ctx.clock.now();
            self.state = AgentState::Loading;
            self.loading_since = now;
            self.last_trim = now;
        }
        event
    }

    fn dwell(&mut self, world: &mut dyn World, ctx: &TickContext<'_>) -> Option<AgentEvent> {
        let clock = ctx.clock;
        let config = ctx.config;

        if clock.since(self.last_trim) >= f64::from(config.trim_interval_secs) {
            let removed = self.path.trim(self.distance, config.retained_sections);
            self.distance = (self.distance - removed).max(0.0);
            self.last_trim = clock.now();
        }

        if clock.since(self.loading_since) < f64::from(config.loading_secs) {
            return None;
        }

        let stop = self.schedule.current().copied()?;
        let mut hold = Hold { items: &mut self.items, capacity: self.capacity };
        let transfer = execute(&stop, &mut hold, world);

        self.schedule.advance();
        self.has_route = false;
        self.state = AgentState::Travelling;
        Some(AgentEvent::Served(transfer))
    }
}
