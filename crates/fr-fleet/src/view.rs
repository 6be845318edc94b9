//! Kind-erased access to agents for presentation code.
//!
//! UI code lists, inspects, and edits carriages, trains, and boats
//! uniformly without naming their network type.  Each view is a borrowed
//! enum over the three concrete agent types; every accessor dispatches with
//! a single `match`.

use std::collections::BTreeMap;

use fr_agent::{Agent, AgentState, AgentStop, Schedule};
use fr_core::{AgentKind, ItemId, Vec3};
use fr_net::{RoadNetwork, TrackNetwork, WaterNetwork};

/// A road vehicle.
pub type Carriage = Agent<RoadNetwork>;
/// A rail vehicle.
pub type Train = Agent<TrackNetwork>;
/// A watercraft.
pub type Boat = Agent<WaterNetwork>;

macro_rules! dispatch {
    ($view:expr, $agent:ident => $body:expr) => {
        match $view {
            Self::Carriage($agent) => $body,
            Self::Train($agent) => $body,
            Self::Boat($agent) => $body,
        }
    };
}

// ── AgentView ─────────────────────────────────────────────────────────────────

/// Read-only view of any agent.
#[derive(Copy, Clone)]
pub enum AgentView<'a> {
    Carriage(&'a Carriage),
    Train(&'a Train),
    Boat(&'a Boat),
}

impl<'a> AgentView<'a> {
    pub fn kind(&self) -> AgentKind {
        dispatch!(self, a => a.kind())
    }

    pub fn state(&self) -> AgentState {
        dispatch!(self, a => a.state())
    }

    pub fn schedule(&self) -> &'a Schedule {
        dispatch!(*self, a => a.schedule())
    }

    pub fn current_stop(&self) -> Option<&'a AgentStop> {
        dispatch!(*self, a => a.current_stop())
    }

    pub fn position(&self) -> Vec3 {
        dispatch!(self, a => a.position())
    }

    pub fn items(&self) -> &'a BTreeMap<ItemId, u32> {
        dispatch!(*self, a => a.items())
    }

    pub fn held(&self, item: ItemId) -> u32 {
        dispatch!(self, a => a.held(item))
    }

    pub fn capacity(&self) -> u32 {
        dispatch!(self, a => a.capacity())
    }

    pub fn name(&self) -> &'a str {
        dispatch!(*self, a => a.name())
    }

    pub fn icon(&self) -> &'static str {
        self.kind().icon()
    }

    pub fn is_lost(&self) -> bool {
        self.state().is_lost()
    }

    /// Every point of the retained path, for drawing trails.
    pub fn path_points(&self) -> Vec<Vec3> {
        dispatch!(self, a => a.path().points().collect())
    }
}

impl<'a> From<&'a Carriage> for AgentView<'a> {
    fn from(a: &'a Carriage) -> Self {
        AgentView::Carriage(a)
    }
}

impl<'a> From<&'a Train> for AgentView<'a> {
    fn from(a: &'a Train) -> Self {
        AgentView::Train(a)
    }
}

impl<'a> From<&'a Boat> for AgentView<'a> {
    fn from(a: &'a Boat) -> Self {
        AgentView::Boat(a)
    }
}

// ── AgentViewMut ──────────────────────────────────────────────────────────────

/// Mutable view of any agent.
pub enum AgentViewMut<'a> {
    Carriage(&'a mut Carriage),
    Train(&'a mut Train),
    Boat(&'a mut Boat),
}

impl AgentViewMut<'_> {
    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> AgentView<'_> {
        match self {
            Self::Carriage(a) => AgentView::Carriage(a),
            Self::Train(a) => AgentView::Train(a),
            Self::Boat(a) => AgentView::Boat(a),
        }
    }

    pub fn schedule_mut(&mut self) -> &mut Schedule {
        dispatch!(self, a => a.schedule_mut())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        dispatch!(self, a => a.set_name(name))
    }

    pub fn set_held(&mut self, item: ItemId, amount: u32) {
        dispatch!(self, a => a.set_held(item, amount))
    }

    /// Drop the path; the agent searches again on its next tick.
    pub fn reset_path(&mut self) {
        dispatch!(self, a => a.reset_path())
    }
}
