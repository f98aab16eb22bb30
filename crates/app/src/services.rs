//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod alert_surface;
pub mod api_client;
pub mod dispatcher;
pub mod display;
pub mod poller;
