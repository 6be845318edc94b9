//! `fr-fleet` — agent managers and presentation-facing views.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`manager`]  | `AgentManager<N>`: one network plus its agents             |
//! | [`fleet`]    | `Fleet`: carriages, trains, and boats behind one clock     |
//! | [`view`]     | `AgentView` / `AgentViewMut` and the concrete agent aliases |
//! | [`observer`] | `FleetObserver` notification hooks, `NoopObserver`          |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                              |

pub mod error;
pub mod fleet;
pub mod manager;
pub mod observer;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{FleetError, FleetResult};
pub use fleet::Fleet;
pub use manager::AgentManager;
pub use observer::{FleetObserver, NoopObserver};
pub use view::{AgentView, AgentViewMut, Boat, Carriage, Train};
