//! Notification hooks fired by managers.

use fr_agent::Transfer;
use fr_core::{AgentId, AgentKind};

/// Callbacks invoked by [`AgentManager`][crate::AgentManager] while
/// rebuilding paths and ticking agents.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: toast printer
///
/// ```rust,ignore
/// struct Toasts;
///
/// impl FleetObserver for Toasts {
///     fn on_agents_lost(&mut self, _kind: AgentKind, message_key: &'static str) {
///         println!("{}", translate(message_key));
///     }
/// }
/// ```
pub trait FleetObserver {
    /// One or more agents of `kind` newly lost their route.  Fired at most
    /// once per rebuild pass or tick, however many agents were affected.
    /// `message_key` is the per-kind localisation key for the user toast.
    fn on_agents_lost(&mut self, _kind: AgentKind, _message_key: &'static str) {}

    /// A lost agent found a route again.
    fn on_agent_found(&mut self, _kind: AgentKind, _id: AgentId) {}

    /// An agent finished its dwell at a stop and ran the transaction.
    fn on_stop_served(&mut self, _kind: AgentKind, _id: AgentId, _transfer: &Transfer) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
