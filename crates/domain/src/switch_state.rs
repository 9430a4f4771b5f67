//! Switch state — what the controller believes an external device is set to.

use serde::{Deserialize, Serialize};

/// Belief about an external on/off device or channel.
///
/// Starts as [`Unknown`](Self::Unknown) and falls back to it whenever a
/// delivery fails, so the next matching tick delivers again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    #[default]
    Unknown,
    On,
    Off,
}

impl SwitchState {
    /// Whether the state can be delivered (anything but [`Unknown`](Self::Unknown)).
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unknown() {
        assert_eq!(SwitchState::default(), SwitchState::Unknown);
    }

    #[test]
    fn should_report_known_states() {
        assert!(SwitchState::On.is_known());
        assert!(SwitchState::Off.is_known());
        assert!(!SwitchState::Unknown.is_known());
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(SwitchState::On.to_string(), "on");
        assert_eq!(SwitchState::Off.to_string(), "off");
        assert_eq!(SwitchState::Unknown.to_string(), "unknown");
    }

    #[test]
    fn should_serialize_as_lowercase_string() {
        let json = serde_json::to_string(&SwitchState::Off).unwrap();
        assert_eq!(json, "\"off\"");
    }
}
