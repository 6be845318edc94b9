//! Stop entries: what an agent does when it reaches a complex.

use std::fmt;

use fr_core::{ComplexId, ItemId};

// ── StopAction ────────────────────────────────────────────────────────────────

/// The transaction run at a stop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopAction {
    /// Move goods from the complex into the agent.
    Load,
    /// Move goods from the agent into the complex.
    Unload,
    /// Load or unload until the agent holds the resolved amount.
    Maintain,
}

impl StopAction {
    pub fn as_str(self) -> &'static str {
        match self {
            StopAction::Load     => "load",
            StopAction::Unload   => "unload",
            StopAction::Maintain => "maintain",
        }
    }
}

impl fmt::Display for StopAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── StopAmount ────────────────────────────────────────────────────────────────

/// How many units a stop asks for.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopAmount {
    /// A literal count.
    Fixed(u32),
    /// A fraction of a reference quantity chosen by the action:
    ///
    /// | Action     | Reference                        |
    /// |------------|----------------------------------|
    /// | `Load`     | units stored at the complex      |
    /// | `Unload`   | units of the item held           |
    /// | `Maintain` | the agent's storage capacity     |
    Fraction(f32),
}

impl StopAmount {
    /// Resolve against `reference`.  Fractions round to the nearest unit;
    /// negative fractions resolve to zero.
    pub fn resolve(self, reference: u32) -> u32 {
        match self {
            StopAmount::Fixed(n) => n,
            StopAmount::Fraction(f) => (f.max(0.0) * reference as f32).round() as u32,
        }
    }
}

impl fmt::Display for StopAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopAmount::Fixed(n) => write!(f, "{n}"),
            StopAmount::Fraction(x) => write!(f, "{}%", x * 100.0),
        }
    }
}

// ── AgentStop ─────────────────────────────────────────────────────────────────

/// One entry of a schedule.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStop {
    pub complex: ComplexId,
    pub action:  StopAction,
    pub amount:  StopAmount,
    pub item:    ItemId,
}

impl AgentStop {
    pub fn new(complex: ComplexId, action: StopAction, amount: StopAmount, item: ItemId) -> Self {
        Self { complex, action, amount, item }
    }

    pub fn load(complex: ComplexId, item: ItemId, amount: StopAmount) -> Self {
        Self::new(complex, StopAction::Load, amount, item)
    }

    pub fn unload(complex: ComplexId, item: ItemId, amount: StopAmount) -> Self {
        Self::new(complex, StopAction::Unload, amount, item)
    }

    pub fn maintain(complex: ComplexId, item: ItemId, amount: StopAmount) -> Self {
        Self::new(complex, StopAction::Maintain, amount, item)
    }
}
