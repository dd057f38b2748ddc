//! Control-surface response models.

use serde::{Deserialize, Serialize};

/// Success acknowledgment for a relayed command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandAck {
    pub ok: bool,
    /// Echoed command name, omitted for bare acks.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Optimistic or fixed result value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl CommandAck {
    /// `{ok: true}` with no echo, used by mute/unmute.
    pub fn bare() -> Self {
        Self {
            ok: true,
            kind: None,
            value: None,
        }
    }

    /// `{ok: true, type, value}` echo.
    pub fn with_value(kind: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            ok: true,
            kind: Some(kind.to_string()),
            value: Some(value.into()),
        }
    }
}

/// Error body returned by the control surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ack_serializes_to_ok_only() {
        let json = serde_json::to_string(&CommandAck::bare()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn value_ack_echoes_type_and_value() {
        let json = serde_json::to_string(&CommandAck::with_value("seek", 30u64)).unwrap();
        assert_eq!(json, r#"{"ok":true,"type":"seek","value":30}"#);
    }
}
