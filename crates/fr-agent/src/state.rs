use std::fmt;

/// Life-cycle state of an agent.
///
/// ```text
///            schedule non-empty
///   Idle ────────────────────────▶ Travelling ◀──────┐
///    ▲                              │    ▲  │         │ dwell over,
///    │ schedule emptied             │    │  │ arrived │ transaction run
///    └───────── (any state)         │    │  ▼         │
///                         no route  │    │  Loading ──┘
///                                   ▼    │ route found
///                                  Lost ─┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Empty schedule.
    #[default]
    Idle,
    /// Consuming a path towards the current stop.
    Travelling,
    /// Parked at a stop, waiting out the dwell timer.
    Loading,
    /// No route to the current stop; retried every tick.
    Lost,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle       => "idle",
            AgentState::Travelling => "travelling",
            AgentState::Loading    => "loading",
            AgentState::Lost       => "lost",
        }
    }

    pub fn is_lost(self) -> bool {
        self == AgentState::Lost
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
