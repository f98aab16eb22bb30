//! # armpanel-adapter-http-reqwest
//!
//! HTTP adapter — implements the [`Transport`](armpanel_app::ports::Transport)
//! port against the arm controller's REST API.
//!
//! ## Responsibilities
//! - Build the `reqwest` client from [`HttpConfig`]
//! - Map an [`ApiRequest`](armpanel_domain::request::ApiRequest) onto a URL under `/api`
//! - Decode every response body as JSON, whatever the HTTP status
//! - Convert `reqwest` failures into [`TransportError`](armpanel_domain::error::TransportError)
//!
//! ## Dependency rule
//! Depends on `armpanel-app` (for the port trait) and `armpanel-domain`.
//! Nothing depends on this crate except the binary.

mod config;
mod error;
mod transport;

pub use config::HttpConfig;
pub use error::HttpError;
pub use transport::ReqwestTransport;
