//! The load/unload step run once when an agent leaves a stop.
//!
//! Every transfer is clamped twice: once here against the agent's own
//! holdings and free capacity, and once by the [`Storage`] collaborator,
//! whose return value is the amount that actually moved.  The agent's
//! holdings change by exactly that amount, so goods are never created or
//! destroyed.

use std::collections::BTreeMap;

use tracing::debug;

use fr_core::{ComplexId, ItemId, Storage};

use crate::{AgentStop, StopAction};

/// What a transaction moved.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    pub complex:  ComplexId,
    pub item:     ItemId,
    /// Units moved from the complex into the agent.
    pub loaded:   u32,
    /// Units moved from the agent into the complex.
    pub unloaded: u32,
}

impl Transfer {
    fn none(stop: &AgentStop) -> Self {
        Self { complex: stop.complex, item: stop.item, loaded: 0, unloaded: 0 }
    }
}

/// Mutable view of an agent's cargo hold.
pub struct Hold<'a> {
    pub items:    &'a mut BTreeMap<ItemId, u32>,
    pub capacity: u32,
}

impl Hold<'_> {
    pub fn held(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }

    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.total())
    }

    fn add(&mut self, item: ItemId, amount: u32) {
        if amount > 0 {
            *self.items.entry(item).or_insert(0) += amount;
        }
    }

    fn take(&mut self, item: ItemId, amount: u32) {
        if let Some(n) = self.items.get_mut(&item) {
            *n = n.saturating_sub(amount);
            if *n == 0 {
                self.items.remove(&item);
            }
        }
    }
}

/// Run `stop` against `storage`.
pub fn execute<S: Storage + ?Sized>(stop: &AgentStop, hold: &mut Hold<'_>, storage: &mut S) -> Transfer {
    let transfer = match stop.action {
        StopAction::Load => {
            let wanted = stop.amount.resolve(storage.stored_count(stop.complex, stop.item));
            load(stop, wanted, hold, storage)
        }
        StopAction::Unload => {
            let wanted = stop.amount.resolve(hold.held(stop.item));
            unload(stop, wanted, hold, storage)
        }
        StopAction::Maintain => {
            let goal = stop.amount.resolve(hold.capacity);
            let held = hold.held(stop.item);
            if held < goal {
                load(stop, goal - held, hold, storage)
            } else if held > goal {
                unload(stop, held - goal, hold, storage)
            } else {
                Transfer::none(stop)
            }
        }
    };
    debug!(
        complex = %stop.complex,
        item = %stop.item,
        action = %stop.action,
        loaded = transfer.loaded,
        unloaded = transfer.unloaded,
        "stop served"
    );
    transfer
}

fn load<S: Storage + ?Sized>(stop: &AgentStop, wanted: u32, hold: &mut Hold<'_>, storage: &mut S) -> Transfer {
    let request = wanted.min(hold.free());
    let taken = if request > 0 { storage.remove_stored(stop.complex, stop.item, request) } else { 0 };
    hold.add(stop.item, taken);
    Transfer { loaded: taken, ..Transfer::none(stop) }
}

fn unload<S: Storage + ?Sized>(stop: &AgentStop, wanted: u32, hold: &mut Hold<'_>, storage: &mut S) -> Transfer {
    let offer = wanted.min(hold.held(stop.item));
    let accepted = if offer > 0 { storage.add_stored(stop.complex, stop.item, offer) } else { 0 };
    hold.take(stop.item, accepted);
    Transfer { unloaded: accepted, ..Transfer::none(stop) }
}
