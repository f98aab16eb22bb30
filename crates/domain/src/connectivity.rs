//! Connectivity — three-way classification of the device's reachability.

use crate::payload::DeviceStatus;

/// Connectivity of the arm, as shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Reachable and powered.
    Online,
    /// Reachable, motors not powered.
    Standby,
    /// Unreachable, or reachable but reporting no link to the arm.
    Offline,
}

impl Connectivity {
    /// Classify a successful status read.
    #[must_use]
    pub fn of(status: &DeviceStatus) -> Self {
        match (status.connected, status.powered) {
            (true, true) => Self::Online,
            (true, false) => Self::Standby,
            (false, _) => Self::Offline,
        }
    }

    /// CSS-style class name of the indicator dot.
    #[must_use]
    pub fn dot_class(self) -> &'static str {
        match self {
            Self::Online => "status-dot online",
            Self::Standby => "status-dot standby",
            Self::Offline => "status-dot offline",
        }
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Standby => f.write_str("standby"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// What the status indicator shows: a connectivity plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    pub connectivity: Connectivity,
    pub label: &'static str,
}

impl StatusIndicator {
    /// Indicator for a status read that reached the device.
    #[must_use]
    pub fn reachable(status: &DeviceStatus) -> Self {
        let connectivity = Connectivity::of(status);
        let label = match connectivity {
            Connectivity::Online => "System Online",
            Connectivity::Standby => "System Standby (Power Off)",
            Connectivity::Offline => "System Offline",
        };
        Self {
            connectivity,
            label,
        }
    }

    /// Indicator for a status read that failed or timed out.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            connectivity: Connectivity::Offline,
            label: "Disconnected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(connected: bool, powered: bool) -> DeviceStatus {
        DeviceStatus {
            connected,
            powered,
            ..DeviceStatus::default()
        }
    }

    #[test]
    fn should_be_online_when_connected_and_powered() {
        assert_eq!(Connectivity::of(&status(true, true)), Connectivity::Online);
    }

    #[test]
    fn should_be_standby_when_connected_but_unpowered() {
        assert_eq!(Connectivity::of(&status(true, false)), Connectivity::Standby);
    }

    #[test]
    fn should_be_offline_when_not_connected_regardless_of_power() {
        assert_eq!(Connectivity::of(&status(false, true)), Connectivity::Offline);
        assert_eq!(Connectivity::of(&status(false, false)), Connectivity::Offline);
    }

    #[test]
    fn should_label_reachable_states() {
        assert_eq!(
            StatusIndicator::reachable(&status(true, true)).label,
            "System Online"
        );
        assert_eq!(
            StatusIndicator::reachable(&status(true, false)).label,
            "System Standby (Power Off)"
        );
        assert_eq!(
            StatusIndicator::reachable(&status(false, false)).label,
            "System Offline"
        );
    }

    #[test]
    fn should_mark_unreachable_as_offline_disconnected() {
        let indicator = StatusIndicator::unreachable();
        assert_eq!(indicator.connectivity, Connectivity::Offline);
        assert_eq!(indicator.label, "Disconnected");
    }

    #[test]
    fn should_use_matching_dot_class() {
        assert_eq!(Connectivity::Standby.dot_class(), "status-dot standby");
    }
}
