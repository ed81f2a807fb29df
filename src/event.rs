//! Lifecycle notification types consumed from EventBridge.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detail payload of an "EC2 Instance State-change Notification" event.
///
/// The EventBridge rule delivers this as the `detail` member of the
/// envelope; field names follow the notification's JSON keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Instance the notification refers to.
    #[serde(rename = "instance-id")]
    pub instance_id: String,

    /// New lifecycle state of the instance.
    pub state: LifecycleState,
}

/// Instance lifecycle states driving the mapping decision.
///
/// The event subscription is filtered to running, stopped and terminated;
/// anything else deserializes to [`LifecycleState::Other`] and is ignored
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Instance is running; its record points at the public IP.
    Running,
    /// Instance is stopped; its record points at loopback.
    Stopped,
    /// Instance is terminated; its record is removed.
    Terminated,
    /// Any state outside the subscription filter.
    #[serde(other)]
    Other,
}

impl LifecycleState {
    /// Stable string form used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_states_parse() {
        let cases = [
            ("running", LifecycleState::Running),
            ("stopped", LifecycleState::Stopped),
            ("terminated", LifecycleState::Terminated),
        ];

        for (raw, expected) in cases {
            let state: LifecycleState = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn test_unknown_states_map_to_other() {
        for raw in ["pending", "shutting-down", "stopping", ""] {
            let state: LifecycleState = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(state, LifecycleState::Other, "state {:?}", raw);
        }
    }

    #[test]
    fn test_event_uses_notification_field_names() {
        let event: LifecycleEvent = serde_json::from_value(json!({
            "instance-id": "i-0123456789abcdef0",
            "state": "running"
        }))
        .unwrap();

        assert_eq!(event.instance_id, "i-0123456789abcdef0");
        assert_eq!(event.state, LifecycleState::Running);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(LifecycleState::Running.to_string(), "running");
        assert_eq!(LifecycleState::Other.to_string(), "other");
    }
}
