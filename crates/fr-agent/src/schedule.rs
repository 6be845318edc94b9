//! Cyclic stop schedule with a "next stop" cursor.
//!
//! # Cursor invariant
//!
//! `current < len()` whenever the schedule is non-empty, and `current == 0`
//! when it is empty.  Every editing operation keeps the cursor on the same
//! stop where that stop survives the edit; otherwise it stays at the same
//! index, wrapping to `0` if it falls off the end.

use crate::AgentStop;

/// The stops an agent serves, in order, forever.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    stops:   Vec<AgentStop>,
    current: usize,
}

impl Schedule {
    pub fn new(stops: Vec<AgentStop>) -> Self {
        Self { stops, current: 0 }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn stops(&self) -> &[AgentStop] {
        &self.stops
    }

    pub fn get(&self, index: usize) -> Option<&AgentStop> {
        self.stops.get(index)
    }

    /// Index of the next stop to serve.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The next stop to serve, or `None` for an empty schedule.
    pub fn current(&self) -> Option<&AgentStop> {
        self.stops.get(self.current)
    }

    // ── Cursor ────────────────────────────────────────────────────────────

    /// Move the cursor to the following stop, wrapping at the end.
    pub fn advance(&mut self) {
        if !self.stops.is_empty() {
            self.current = (self.current + 1) % self.stops.len();
        }
    }

    /// Point the cursor at `index`, wrapped modulo the length.
    pub fn set_current(&mut self, index: usize) {
        self.current = if self.stops.is_empty() { 0 } else { index % self.stops.len() };
    }

    // ── Editing ───────────────────────────────────────────────────────────

    pub fn push(&mut self, stop: AgentStop) {
        self.stops.push(stop);
    }

    /// Insert `stop` before `index` (clamped to the length).
    pub fn insert(&mut self, index: usize, stop: AgentStop) {
        let index = index.min(self.stops.len());
        let was_empty = self.stops.is_empty();
        self.stops.insert(index, stop);
        if !was_empty && index <= self.current {
            self.current += 1;
        }
    }

    /// Remove the stop at `index`.  Removing the current stop makes the one
    /// after it current.
    pub fn remove(&mut self, index: usize) -> Option<AgentStop> {
        if index >= self.stops.len() {
            return None;
        }
        let stop = self.stops.remove(index);
        if index < self.current {
            self.current -= 1;
        }
        if self.current >= self.stops.len() {
            self.current = 0;
        }
        Some(stop)
    }

    /// Move the stop at `from` so that it ends up at `to` (clamped).
    /// Returns `false` if `from` is out of range.
    pub fn move_stop(&mut self, from: usize, to: usize) -> bool {
        if from >= self.stops.len() {
            return false;
        }
        let to = to.min(self.stops.len() - 1);
        let stop = self.stops.remove(from);
        self.stops.insert(to, stop);

        if self.current == from {
            self.current = to;
        } else {
            if from < self.current {
                self.current -= 1;
            }
            if to <= self.current {
                self.current += 1;
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.stops.clear();
        self.current = 0;
    }
}

impl FromIterator<AgentStop> for Schedule {
    fn from_iter<I: IntoIterator<Item = AgentStop>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
