//! Confirmation port — an explicit yes/no gate in front of destructive actions.

use std::future::Future;

/// Asks the operator to acknowledge an action.
///
/// The caller waits for the answer; only `true` lets the action proceed.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}
