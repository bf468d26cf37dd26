//! Caller-supplied error descriptors and their normalization

use crate::defaults::FALLBACK_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields a caller supplies to describe the error it wants built.
///
/// Every field is optional; the builder hydrates missing ones from the
/// resolved enum entry. A `status` of 0 counts as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorDescriptor {
    pub fn new(error_type: impl Into<String>) -> Self {
        Self {
            error_type: Some(error_type.into()),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = (status != 0).then_some(status);
        self
    }

    /// Normalize arbitrary input into a descriptor.
    ///
    /// Non-object input (including `null`) becomes the payload of a fallback
    /// descriptor. A missing, `null` or non-string `type` is replaced by the
    /// fallback type while the other fields are kept.
    pub fn normalize(input: Value) -> Self {
        let mut fields = match input {
            Value::Object(fields) => fields,
            other => {
                return Self {
                    error_type: Some(FALLBACK_TYPE.to_string()),
                    payload: other,
                    ..Default::default()
                }
            }
        };

        let error_type = match fields.remove("type") {
            Some(Value::String(s)) => Some(s),
            _ => Some(FALLBACK_TYPE.to_string()),
        };
        let message = match fields.remove("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        let status = fields
            .remove("status")
            .and_then(|s| s.as_u64())
            .and_then(|s| u16::try_from(s).ok())
            .filter(|s| *s != 0);
        let payload = fields.remove("payload").unwrap_or(Value::Null);

        Self {
            error_type,
            message,
            payload,
            status,
        }
    }
}

impl From<Value> for ErrorDescriptor {
    fn from(input: Value) -> Self {
        Self::normalize(input)
    }
}
