//! Recipient records from the document store.

/// One recipient as read from the store.
///
/// A recipient may own zero device tokens; resolution treats that as an
/// ordinary empty contribution, never an error.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RecipientRecord {
    /// Stable unique key of the recipient.
    pub owner_id: String,
    /// Role label, if assigned.
    pub role: Option<String>,
    /// Device registration tokens owned by this recipient.
    pub device_tokens: Vec<String>,
}
