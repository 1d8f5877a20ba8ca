//! Notification payload types.

use std::collections::BTreeMap;

use crate::DispatchError;

/// Notification content delivered to each device.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    /// Notification title. Mandatory.
    pub title: String,
    /// Notification body. Mandatory.
    pub body: String,
    /// Arbitrary key-value data attached to the notification.
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
}

impl Notification {
    /// Create a notification with no data payload.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: BTreeMap::new(),
        }
    }

    /// Check the caller contract: title and body must be non-empty.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.title.trim().is_empty() {
            return Err(DispatchError::InvalidNotification("title is required"));
        }
        if self.body.trim().is_empty() {
            return Err(DispatchError::InvalidNotification("body is required"));
        }
        Ok(())
    }

    /// Data map with every value coerced to a string.
    ///
    /// The gateway's data channel is string-only: JSON strings pass through
    /// verbatim, everything else is compact-encoded.
    pub fn string_data(&self) -> BTreeMap<String, String> {
        self.data
            .iter()
            .map(|(key, value)| {
                let coerced = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), coerced)
            })
            .collect()
    }
}
