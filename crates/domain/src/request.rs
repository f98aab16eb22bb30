//! Request description — what to send to the device API, independent of HTTP client.

use serde_json::Value;

/// HTTP method used against the device. The API only needs two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A single request against the device API.
///
/// `path` is relative to the API base (e.g. `/status` under `http://host/api`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Path of the status endpoint.
    pub const STATUS_PATH: &'static str = "/status";

    /// `GET /status`.
    #[must_use]
    pub fn status() -> Self {
        Self::get(Self::STATUS_PATH)
    }

    /// A bodiless `GET`.
    #[must_use]
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            body: None,
        }
    }

    /// A `POST`, with or without a JSON body.
    #[must_use]
    pub fn post(path: &'static str, body: Option<Value>) -> Self {
        Self {
            method: Method::Post,
            path,
            body,
        }
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
