//! Alert surface — one transient message at a time, hidden again after a delay.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use armpanel_domain::alert::Alert;
use tokio::task::JoinHandle;

use crate::ports::ElementHandle;

/// Class removed from the alert element to hide it.
const VISIBLE_CLASS: &str = "show";

/// Shows alerts in a single element and hides them after `dismiss_after`.
///
/// A new alert overwrites the current one and restarts the countdown; alerts
/// never queue.
pub struct AlertSurface {
    element: ElementHandle,
    dismiss_after: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AlertSurface {
    pub const DEFAULT_DISMISS: Duration = Duration::from_millis(2000);

    #[must_use]
    pub fn new(element: ElementHandle, dismiss_after: Duration) -> Self {
        Self {
            element,
            dismiss_after,
            pending: Mutex::new(None),
        }
    }

    /// Display `alert` now and schedule its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, alert: &Alert) {
        tracing::debug!(severity = %alert.severity, message = %alert.message, "alert");
        self.element.set_text(&alert.message);
        self.element.set_class(&alert.visible_class());

        let element = Arc::clone(&self.element);
        let delay = self.dismiss_after;
        let dismissal = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            element.remove_class(VISIBLE_CLASS);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(dismissal);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for AlertSurface {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}
