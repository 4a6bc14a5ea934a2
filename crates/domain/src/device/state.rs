//! Device state — the lifecycle flag gating which mutations are permitted.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, status};

const INVALID_STATE_REASON: &str = "state must be one of: available, in-use, inactive";

/// Lifecycle state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceState {
    #[default]
    Available,
    InUse,
    Inactive,
}

impl DeviceState {
    /// Canonical lowercase representation, as stored and serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in-use",
            Self::Inactive => "inactive",
        }
    }

    /// Whether the device is currently held, which freezes its name and
    /// brand and prevents deletion.
    #[must_use]
    pub fn is_in_use(self) -> bool {
        matches!(self, Self::InUse)
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for DeviceState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "in-use" => Ok(Self::InUse),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::invalid(
                "state",
                INVALID_STATE_REASON,
                status::BAD_REQUEST,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_available() {
        assert_eq!(DeviceState::default(), DeviceState::Available);
    }

    #[test]
    fn should_parse_case_insensitively() {
        assert_eq!("IN-USE".parse::<DeviceState>().unwrap(), DeviceState::InUse);
        assert_eq!(
            "  Inactive ".parse::<DeviceState>().unwrap(),
            DeviceState::Inactive
        );
        assert_eq!(
            "available".parse::<DeviceState>().unwrap(),
            DeviceState::Available
        );
    }

    #[test]
    fn should_reject_unknown_state_with_invalid_state_code() {
        for raw in ["broken", "", "in use", "inuse", "availablee"] {
            let err = raw.parse::<DeviceState>().unwrap_err();
            assert_eq!(err.code, "invalid_state", "input {raw:?}");
            assert_eq!(err.field, "state");
            assert_eq!(err.status, 400);
        }
    }

    #[test]
    fn should_display_canonical_lowercase() {
        assert_eq!(DeviceState::InUse.to_string(), "in-use");
        assert_eq!(DeviceState::Inactive.to_string(), "inactive");
    }

    #[test]
    fn should_serialize_as_kebab_case() {
        let json = serde_json::to_string(&DeviceState::InUse).unwrap();
        assert_eq!(json, "\"in-use\"");
    }

    #[test]
    fn should_only_report_in_use_for_in_use() {
        assert!(DeviceState::InUse.is_in_use());
        assert!(!DeviceState::Available.is_in_use());
        assert!(!DeviceState::Inactive.is_in_use());
    }
}
