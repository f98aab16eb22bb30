//! # armpanel-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `Transport` — perform one request against the device API
//!   - `Confirm` — ask the operator a yes/no question
//!   - `Element` — a single view element (text + class), bound once into `ViewBindings`
//! - Define the **use-cases** as service structs:
//!   - `ApiClient` — bounded-wait request wrapper that reports outcomes
//!   - `StatusPoller` — periodic connectivity check with a start/stop lifecycle
//!   - `CommandDispatcher` — one operation per operator action
//!   - `AlertSurface` — transient, self-dismissing messages
//!   - `display::update` — projects payload readings onto the view
//!
//! ## Dependency rule
//! Depends on `armpanel-domain` only (plus `tokio` for timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
