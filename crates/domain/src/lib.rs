//! # armpanel-domain
//!
//! Pure domain model for the armpanel robotic-arm control client.
//!
//! ## Responsibilities
//! - Describe **requests** sent to the device REST API (method, path, body)
//! - Define **commands** (jog, move, gripper, power, settings, sequences)
//! - Wrap device **payloads** and read the fields the panel cares about
//! - Classify **connectivity** from a status reading
//! - Define **alerts** (transient user-visible messages)
//! - Hold the **step size** value object and its invariants
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod alert;
pub mod command;
pub mod connectivity;
pub mod payload;
pub mod request;
pub mod step;
