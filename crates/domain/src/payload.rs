//! Device payloads — the parsed body of any API response.
//!
//! The device answers with loosely shaped JSON: status reads carry the
//! connectivity flags and joint readings, command replies add `success` and
//! `message`. The payload is kept as raw JSON and read through lenient
//! accessors; a field with the wrong type reads as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// One of the three joints the panel displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rotational base joint, in degrees.
    Base,
    /// Secondary joint, raw position.
    YAxis,
    /// Tertiary joint, raw position.
    ZAxis,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::Base, Self::YAxis, Self::ZAxis];

    /// Key of this axis in payloads and move bodies.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::YAxis => "yaxis",
            Self::ZAxis => "zaxis",
        }
    }

    /// Text shown for a reading of this axis.
    #[must_use]
    pub fn render(self, reading: &Number) -> String {
        match self {
            Self::Base => format!("{reading}\u{b0}"),
            Self::YAxis | Self::ZAxis => reading.to_string(),
        }
    }
}

/// Parsed JSON body of a device response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Explicit outcome flag carried by command replies.
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.0.get("success").and_then(Value::as_bool)
    }

    /// Human-readable message accompanying the outcome flag.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Numeric reading for `axis`, if present.
    #[must_use]
    pub fn reading(&self, axis: Axis) -> Option<&Number> {
        match self.0.get(axis.field()) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Snapshot of the status fields.
    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        let flag = |key: &str| self.0.get(key).and_then(Value::as_bool).unwrap_or(false);
        DeviceStatus {
            connected: flag("connected"),
            powered: flag("powered"),
            base: self.reading(Axis::Base).cloned(),
            yaxis: self.reading(Axis::YAxis).cloned(),
            zaxis: self.reading(Axis::ZAxis).cloned(),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Device state as reported by the status endpoint.
///
/// Read-only on the client side: it is produced from a payload and never
/// mutated or persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    pub connected: bool,
    pub powered: bool,
    pub base: Option<Number>,
    pub yaxis: Option<Number>,
    pub zaxis: Option<Number>,
}
