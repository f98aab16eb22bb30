//! [`Transport`] implementation over `reqwest`.

use std::time::Duration;

use armpanel_app::ports::Transport;
use armpanel_domain::error::TransportError;
use armpanel_domain::payload::Payload;
use armpanel_domain::request::{ApiRequest, Method};
use serde_json::Value;

use crate::config::HttpConfig;
use crate::error::HttpError;

/// Sends device requests over HTTP.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport for the controller described by `config`.
    ///
    /// The client-level timeout matches the configured bound, so a request
    /// that outlives its caller is still torn down.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend or resolver cannot be
    /// initialised.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(HttpError::Build)?;
        Ok(Self {
            client,
            base_url: config.base_url(),
            timeout,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, request: ApiRequest) -> Result<Payload, HttpError> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(HttpError::Request)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(HttpError::Request)?;
        tracing::debug!(%url, %status, len = bytes.len(), "device replied");

        let value: Value = serde_json::from_slice(&bytes).map_err(HttpError::Decode)?;
        Ok(Payload::new(value))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Payload, TransportError> {
        self.execute(request)
            .await
            .map_err(|err| err.into_transport(self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::json;

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn transport(addr: SocketAddr, timeout_ms: u64) -> ReqwestTransport {
        ReqwestTransport::new(&HttpConfig {
            address: addr.to_string(),
            timeout_ms,
        })
        .unwrap()
    }

    fn stub_device() -> Router {
        Router::new()
            .route(
                "/api/status",
                get(|| async {
                    Json(json!({
                        "connected": true, "powered": false, "base": 90, "yaxis": 90, "zaxis": 90
                    }))
                }),
            )
            .route(
                "/api/jog",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "success": true, "message": "Jogged", "echo": body }))
                }),
            )
            .route(
                "/api/home",
                post(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "success": false, "message": "Not connected to ESP32" })),
                    )
                }),
            )
            .route(
                "/api/calibrate",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({ "success": true }))
                }),
            )
            .route("/api/test_sequence", post(|| async { "<html>oops</html>" }))
    }

    #[tokio::test]
    async fn should_read_status_from_api_root() {
        let addr = serve(stub_device()).await;
        let transport = transport(addr, 3000);

        let payload = transport.send(ApiRequest::status()).await.unwrap();

        let status = payload.status();
        assert!(status.connected);
        assert!(!status.powered);
        assert_eq!(transport.base_url(), format!("http://{addr}/api"));
    }

    #[tokio::test]
    async fn should_send_json_body_verbatim() {
        let addr = serve(stub_device()).await;
        let transport = transport(addr, 3000);

        let request = ApiRequest::post("/jog", Some(json!({ "direction": "z_up" })));
        let payload = transport.send(request).await.unwrap();

        assert_eq!(payload.message(), Some("Jogged"));
        assert_eq!(payload.as_value()["echo"], json!({ "direction": "z_up" }));
    }

    #[tokio::test]
    async fn should_parse_body_of_error_status() {
        let addr = serve(stub_device()).await;
        let transport = transport(addr, 3000);

        let payload = transport
            .send(ApiRequest::post("/home", None))
            .await
            .unwrap();

        assert_eq!(payload.success(), Some(false));
        assert_eq!(payload.message(), Some("Not connected to ESP32"));
    }

    #[tokio::test]
    async fn should_map_slow_reply_to_timeout() {
        let addr = serve(stub_device()).await;
        let transport = transport(addr, 200);

        let err = transport
            .send(ApiRequest::post("/calibrate", None))
            .await
            .unwrap_err();

        match err {
            TransportError::Timeout { after } => assert_eq!(after, Duration::from_millis(200)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_map_non_json_body_to_connection_failure() {
        let addr = serve(stub_device()).await;
        let transport = transport(addr, 3000);

        let err = transport
            .send(ApiRequest::post("/test_sequence", None))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Connection(_)));
    }

    #[tokio::test]
    async fn should_map_refused_connection_to_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let transport = transport(addr, 3000);

        let err = transport.send(ApiRequest::status()).await.unwrap_err();

        assert!(matches!(err, TransportError::Connection(_)));
    }
}
