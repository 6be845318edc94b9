//! The three kinds of agent the engine drives.
//!
//! Each kind travels over its own network topology: carriages over road
//! tiles, boats over water tiles, trains over the track graph.  Per-kind
//! presentation keys and gameplay defaults live here so that lower layers do
//! not need to know which concrete agent type they are serving.

/// The kind of a mobile agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    /// Road vehicle travelling over path tiles.
    Carriage,
    /// Rail vehicle travelling over placed track pieces.
    Train,
    /// Watercraft travelling over sufficiently deep water tiles.
    Boat,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Carriage, AgentKind::Train, AgentKind::Boat];

    /// Lower-case label, useful for logs and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Carriage => "carriage",
            AgentKind::Train    => "train",
            AgentKind::Boat     => "boat",
        }
    }

    /// Localisation key of the "an agent of this kind became lost" toast.
    pub fn lost_message_key(self) -> &'static str {
        match self {
            AgentKind::Carriage => "toast_carriage_lost",
            AgentKind::Train    => "toast_train_lost",
            AgentKind::Boat     => "toast_boat_lost",
        }
    }

    /// Asset key of the icon shown next to agents of this kind.
    pub fn icon(self) -> &'static str {
        match self {
            AgentKind::Carriage => "icon_carriage",
            AgentKind::Train    => "icon_train",
            AgentKind::Boat     => "icon_boat",
        }
    }

    /// Default display name for a newly summoned agent.
    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::Carriage => "Carriage",
            AgentKind::Train    => "Train",
            AgentKind::Boat     => "Boat",
        }
    }

    /// Travel speed in world units per second.
    pub fn default_speed(self) -> f32 {
        match self {
            AgentKind::Carriage => 2.0,
            AgentKind::Train    => 4.0,
            AgentKind::Boat     => 1.5,
        }
    }

    /// Total item capacity across all item kinds.
    pub fn default_capacity(self) -> u32 {
        match self {
            AgentKind::Carriage => 20,
            AgentKind::Train    => 120,
            AgentKind::Boat     => 60,
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
