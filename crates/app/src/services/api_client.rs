//! API client — the bounded-wait request wrapper every command goes through.

use std::sync::Arc;
use std::time::Duration;

use armpanel_domain::alert::Alert;
use armpanel_domain::command::Command;
use armpanel_domain::error::TransportError;
use armpanel_domain::payload::Payload;
use armpanel_domain::request::ApiRequest;

use crate::ports::{Transport, ViewBindings};
use crate::services::alert_surface::AlertSurface;
use crate::services::display;

/// Send `request` and give up after `timeout`.
///
/// When the bound expires the in-flight future is dropped, which aborts the
/// underlying request.
///
/// # Errors
///
/// Returns [`TransportError::Timeout`] when the bound expires, or whatever
/// the transport reported.
pub async fn send_bounded<T: Transport>(
    transport: &T,
    request: ApiRequest,
    timeout: Duration,
) -> Result<Payload, TransportError> {
    tokio::time::timeout(timeout, transport.send(request))
        .await
        .unwrap_or_else(|_| Err(TransportError::Timeout { after: timeout }))
}

/// Issues requests on behalf of the operator and reports every outcome.
///
/// Never fails: a call resolves to the parsed payload, or to `None` after the
/// failure has been shown and logged.
pub struct ApiClient<T> {
    transport: T,
    view: Arc<ViewBindings>,
    alerts: Arc<AlertSurface>,
    timeout: Duration,
}

impl<T: Transport> ApiClient<T> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

    pub fn new(
        transport: T,
        view: Arc<ViewBindings>,
        alerts: Arc<AlertSurface>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            view,
            alerts,
            timeout,
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewBindings {
        &self.view
    }

    #[must_use]
    pub fn alerts(&self) -> &AlertSurface {
        &self.alerts
    }

    /// Perform one request.
    ///
    /// On success an explicit `success` flag in the reply becomes a success or
    /// error alert, and the whole payload is forwarded to the display either way.
    #[tracing::instrument(skip_all, fields(request = %request))]
    pub async fn call(&self, request: ApiRequest) -> Option<Payload> {
        match send_bounded(&self.transport, request, self.timeout).await {
            Ok(payload) => {
                self.report_outcome(&payload);
                display::update(&self.view, &payload);
                Some(payload)
            }
            Err(err) => {
                let message = if err.is_timeout() {
                    Alert::TIMEOUT_MESSAGE
                } else {
                    Alert::CONNECTION_MESSAGE
                };
                self.alerts.show(&Alert::error(message));
                tracing::error!(error = %err, source = ?std::error::Error::source(&err), "API error");
                None
            }
        }
    }

    /// Send a command to its endpoint.
    pub async fn send(&self, command: Command) -> Option<Payload> {
        self.call(command.into_request()).await
    }

    fn report_outcome(&self, payload: &Payload) {
        let alert = match payload.success() {
            Some(true) => Alert::success(payload.message().unwrap_or("OK")),
            Some(false) => Alert::error(payload.message().unwrap_or("Request failed")),
            None => return,
        };
        self.alerts.show(&alert);
    }
}
