//! Commands — one variant per device endpoint, each building its own request body.

use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::ParseError;
use crate::request::ApiRequest;
use crate::step::StepSize;

/// Value substituted for an unparsable joint target.
pub const NEUTRAL_POSITION: i64 = 90;

/// Value substituted for an unparsable force or speed percentage.
pub const NEUTRAL_PERCENT: i64 = 50;

/// Direction of a jog move. Serialized exactly as the device expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JogDirection {
    Up,
    Down,
    Left,
    Right,
    ZUp,
    ZDown,
}

impl JogDirection {
    pub const ALL: [Self; 6] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::ZUp,
        Self::ZDown,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::ZUp => "z_up",
            Self::ZDown => "z_down",
        }
    }
}

impl FromStr for JogDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str() == s)
            .ok_or_else(|| ParseError::UnknownVariant {
                kind: "jog direction",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for JogDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GripperAction {
    Open,
    Close,
}

impl GripperAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
        }
    }
}

impl FromStr for GripperAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            other => Err(ParseError::UnknownVariant {
                kind: "gripper action",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl FromStr for PowerState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(ParseError::UnknownVariant {
                kind: "power state",
                value: other.to_string(),
            }),
        }
    }
}

/// Partial settings update. Only the fields that are set end up in the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub step_size: Option<StepSize>,
    pub gripper_force: Option<i64>,
    pub speed: Option<i64>,
}

impl SettingsUpdate {
    fn to_body(self) -> Value {
        let mut body = Map::new();
        if let Some(step) = self.step_size {
            body.insert("step_size".to_string(), json!(step.degrees()));
        }
        if let Some(force) = self.gripper_force {
            body.insert("gripper_force".to_string(), json!(force));
        }
        if let Some(speed) = self.speed {
            body.insert("speed".to_string(), json!(speed));
        }
        Value::Object(body)
    }
}

/// Absolute joint target for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveTarget {
    pub base: i64,
    pub yaxis: i64,
    pub zaxis: i64,
}

impl MoveTarget {
    /// Build a target from raw text inputs. Each field that does not parse
    /// falls back to [`NEUTRAL_POSITION`] on its own.
    ///
    /// An explicit `0` is a real joint angle and is kept, unlike a
    /// `parseInt(v) || 90` fallback that would turn it into 90. Only text with
    /// no leading digits falls back.
    #[must_use]
    pub fn from_inputs(base: &str, yaxis: &str, zaxis: &str) -> Self {
        let field = |raw: &str| parse_leading_int(raw).unwrap_or(NEUTRAL_POSITION);
        Self {
            base: field(base),
            yaxis: field(yaxis),
            zaxis: field(zaxis),
        }
    }
}

impl Default for MoveTarget {
    fn default() -> Self {
        Self {
            base: NEUTRAL_POSITION,
            yaxis: NEUTRAL_POSITION,
            zaxis: NEUTRAL_POSITION,
        }
    }
}

/// A user action that maps onto exactly one device endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Settings(SettingsUpdate),
    Jog(JogDirection),
    Move(MoveTarget),
    Gripper(GripperAction),
    Power(PowerState),
    Home,
    EmergencyStop,
    PickAndPlace,
    Calibrate,
    TestSequence,
    /// Ask a serial bridge to open its link to the arm.
    Connect { port: Option<String> },
    Disconnect,
}

impl Command {
    /// Endpoint path, relative to the API base.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Settings(_) => "/settings",
            Self::Jog(_) => "/jog",
            Self::Move(_) => "/move",
            Self::Gripper(_) => "/gripper",
            Self::Power(_) => "/power",
            Self::Home => "/home",
            Self::EmergencyStop => "/emergency_stop",
            Self::PickAndPlace => "/pick_and_place",
            Self::Calibrate => "/calibrate",
            Self::TestSequence => "/test_sequence",
            Self::Connect { .. } => "/connect",
            Self::Disconnect => "/disconnect",
        }
    }

    /// JSON body for the endpoint, if it takes one.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Settings(update) => Some(update.to_body()),
            Self::Jog(direction) => Some(json!({ "direction": direction })),
            Self::Move(target) => Some(json!(target)),
            Self::Gripper(action) => Some(json!({ "action": action })),
            Self::Power(state) => Some(json!({ "state": state })),
            Self::Connect { port: Some(port) } => Some(json!({ "port": port })),
            Self::Connect { port: None } => Some(json!({})),
            Self::Home
            | Self::EmergencyStop
            | Self::PickAndPlace
            | Self::Calibrate
            | Self::TestSequence
            | Self::Disconnect => None,
        }
    }

    /// Every command is a `POST` against its endpoint.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        ApiRequest::post(self.path(), self.body())
    }
}

/// Parse the leading integer of `raw` the way browser `parseInt` does:
/// leading whitespace, an optional sign, then decimal digits. Trailing
/// garbage is ignored; no digits at all means no value.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn should_parse_every_jog_direction_from_its_wire_name() {
        for dir in JogDirection::ALL {
            assert_eq!(dir.as_str().parse::<JogDirection>().unwrap(), dir);
        }
    }

    #[test]
    fn should_reject_unknown_jog_direction() {
        let result = "sideways".parse::<JogDirection>();
        assert!(matches!(result, Err(ParseError::UnknownVariant { .. })));
    }

    #[test]
    fn should_serialize_every_jog_direction_like_its_wire_name() {
        for dir in JogDirection::ALL {
            assert_eq!(
                Command::Jog(dir).body(),
                Some(json!({ "direction": dir.as_str() }))
            );
        }
    }

    #[test]
    fn should_send_only_direction_in_jog_body() {
        let req = Command::Jog(JogDirection::Left).into_request();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/jog");
        assert_eq!(req.body, Some(json!({ "direction": "left" })));
    }

    #[test]
    fn should_only_include_set_fields_in_settings_body() {
        let update = SettingsUpdate {
            step_size: Some(StepSize::new(10).unwrap()),
            ..SettingsUpdate::default()
        };
        let req = Command::Settings(update).into_request();
        assert_eq!(req.path, "/settings");
        assert_eq!(req.body, Some(json!({ "step_size": 10 })));
    }

    #[test]
    fn should_build_move_body_with_all_three_axes() {
        let target = MoveTarget {
            base: 45,
            yaxis: 120,
            zaxis: 30,
        };
        let req = Command::Move(target).into_request();
        assert_eq!(
            req.body,
            Some(json!({ "base": 45, "yaxis": 120, "zaxis": 30 }))
        );
    }

    #[test]
    fn should_send_no_body_for_sequence_commands() {
        for cmd in [
            Command::Home,
            Command::EmergencyStop,
            Command::PickAndPlace,
            Command::Calibrate,
            Command::TestSequence,
            Command::Disconnect,
        ] {
            assert!(cmd.body().is_none(), "{cmd:?} should have no body");
        }
    }

    #[test]
    fn should_map_sequence_commands_to_their_endpoints() {
        assert_eq!(Command::EmergencyStop.path(), "/emergency_stop");
        assert_eq!(Command::PickAndPlace.path(), "/pick_and_place");
        assert_eq!(Command::TestSequence.path(), "/test_sequence");
    }

    #[test]
    fn should_build_gripper_and_power_bodies() {
        assert_eq!(
            Command::Gripper(GripperAction::Close).body(),
            Some(json!({ "action": "close" }))
        );
        assert_eq!(
            Command::Power(PowerState::On).body(),
            Some(json!({ "state": "on" }))
        );
    }

    #[test]
    fn should_include_port_in_connect_body_when_given() {
        let cmd = Command::Connect {
            port: Some("/dev/ttyUSB0".to_string()),
        };
        assert_eq!(cmd.body(), Some(json!({ "port": "/dev/ttyUSB0" })));
        assert_eq!(Command::Connect { port: None }.body(), Some(json!({})));
    }

    #[test]
    fn should_default_each_unparsable_move_field_independently() {
        let target = MoveTarget::from_inputs("", "abc", "42");
        assert_eq!(target.base, 90);
        assert_eq!(target.yaxis, 90);
        assert_eq!(target.zaxis, 42);
    }

    #[test]
    fn should_keep_zero_as_a_valid_target() {
        let target = MoveTarget::from_inputs("0", "0", "0");
        assert_eq!(
            target,
            MoveTarget {
                base: 0,
                yaxis: 0,
                zaxis: 0
            }
        );
    }

    #[test]
    fn should_parse_leading_integer_like_parse_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  -7"), Some(-7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("12.9"), Some(12));
        assert_eq!(parse_leading_int("15deg"), Some(15));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("abc"), None);
    }
}
