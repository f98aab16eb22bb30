//! Transport port — one request/response exchange with the device API.

use std::future::Future;

use armpanel_domain::error::TransportError;
use armpanel_domain::payload::Payload;
use armpanel_domain::request::ApiRequest;

/// Performs a single request against the configured device and parses the
/// response body.
///
/// Implementations classify their own failures: a request that exceeds the
/// adapter's wait must surface as [`TransportError::Timeout`], everything
/// else (refused connection, unparsable body, …) as
/// [`TransportError::Connection`]. Callers apply their own bound on top via
/// [`crate::services::api_client::send_bounded`].
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Payload, TransportError>> + Send;
}

impl<T: Transport + Send + Sync> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Payload, TransportError>> + Send {
        (**self).send(request)
    }
}
