//! `fr-agent` — stop schedules and the per-agent state machine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`stop`]        | `AgentStop`, `StopAction`, `StopAmount`                    |
//! | [`schedule`]    | `Schedule`: cyclic stop list with an edit-safe cursor     |
//! | [`state`]       | `AgentState`                                               |
//! | [`agent`]       | `Agent<N>`: travel, dwell, and transaction per tick       |
//! | [`transaction`] | Load / unload / maintain against a `Storage`               |
//! | [`loader`]      | CSV schedule loading                                       |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to stops, schedules, states.  |

pub mod agent;
pub mod error;
pub mod loader;
pub mod schedule;
pub mod state;
pub mod stop;
pub mod transaction;


pub use agent::{Agent, AgentEvent, TickContext};
pub use error::{AgentError, AgentResult};
pub use loader::{load_schedules_csv, load_schedules_reader};
pub use schedule::Schedule;
pub use state::AgentState;
pub use stop::{AgentStop, StopAction, StopAmount};
pub use transaction::{execute, Hold, Transfer};
