//! Status poller — periodic connectivity check that also refreshes the readouts.

use std::sync::Arc;
use std::time::Duration;

use armpanel_domain::connectivity::StatusIndicator;
use armpanel_domain::request::ApiRequest;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::ports::{Transport, ViewBindings};
use crate::services::api_client::send_bounded;
use crate::services::display;

/// Polls the status endpoint on a fixed period.
///
/// Lifecycle:
///
/// 1. [`start`](Self::start): spawn the loop; the first poll runs immediately
/// 2. (every `interval`, a fresh poll task is spawned; slow polls may overlap)
/// 3. [`stop`](Self::stop) or drop: abort the loop and any poll still in flight
///
/// Polls bypass the alert surface: failures only flip the indicator to offline.
pub struct StatusPoller<T> {
    transport: T,
    view: Arc<ViewBindings>,
    interval: Duration,
    timeout: Duration,
    handle: Option<JoinHandle<()>>,
}

impl<T> StatusPoller<T>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

    pub fn new(transport: T, view: Arc<ViewBindings>, interval: Duration, timeout: Duration) -> Self {
        Self {
            transport,
            view,
            interval,
            timeout,
            handle: None,
        }
    }

    /// Start polling. Does nothing if the poller is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let handle = tokio::spawn(poll_loop(
            self.transport.clone(),
            Arc::clone(&self.view),
            self.interval,
            self.timeout,
        ));
        self.handle = Some(handle);
        tracing::info!(
            interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
            "status poller started"
        );
    }

    /// Run a single poll right now, outside the periodic loop.
    pub async fn poll_once(&self) -> StatusIndicator {
        poll(&self.transport, &self.view, self.timeout).await
    }
}

impl<T> StatusPoller<T> {
    /// Stop polling. Polls still in flight are aborted.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::info!("status poller stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for StatusPoller<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn poll_loop<T>(transport: T, view: Arc<ViewBindings>, interval: Duration, timeout: Duration)
where
    T: Transport + Clone + Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Owned here so aborting the loop also aborts in-flight polls.
    let mut in_flight = JoinSet::new();

    loop {
        ticker.tick().await;
        while in_flight.try_join_next().is_some() {}

        let transport = transport.clone();
        let view = Arc::clone(&view);
        in_flight.spawn(async move {
            poll(&transport, &view, timeout).await;
        });
    }
}

async fn poll<T: Transport>(
    transport: &T,
    view: &ViewBindings,
    timeout: Duration,
) -> StatusIndicator {
    match send_bounded(transport, ApiRequest::status(), timeout).await {
        Ok(payload) => {
            let indicator = StatusIndicator::reachable(&payload.status());
            show_indicator(view, indicator);
            display::update(view, &payload);
            indicator
        }
        Err(err) => {
            tracing::warn!(error = %err, "status update failed");
            let indicator = StatusIndicator::unreachable();
            show_indicator(view, indicator);
            indicator
        }
    }
}

fn show_indicator(view: &ViewBindings, indicator: StatusIndicator) {
    view.status_dot
        .set_class(indicator.connectivity.dot_class());
    view.status_text.set_text(indicator.label);
}
