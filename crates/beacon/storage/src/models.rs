//! Database models.

use diesel::prelude::*;

use crate::schema::recipients;
use beacon_core::RecipientRecord;

/// Recipient record as stored.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = recipients)]
#[diesel(primary_key(owner_id))]
pub struct RecipientRow {
    pub owner_id: String,
    pub role: Option<String>,
    pub device_tokens: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// New recipient for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipients)]
pub struct NewRecipient<'a> {
    pub owner_id: &'a str,
    pub role: Option<&'a str>,
    pub device_tokens: &'a str,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<RecipientRow> for RecipientRecord {
    fn from(row: RecipientRow) -> Self {
        let device_tokens = decode_tokens(&row.device_tokens);
        Self {
            owner_id: row.owner_id,
            role: row.role,
            device_tokens,
        }
    }
}

/// Decode the JSON token column, tolerating malformed values.
///
/// Anything that is not a JSON array of strings contributes zero tokens;
/// a bad record must never abort resolution of the whole audience.
fn decode_tokens(raw: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
        return Vec::new();
    };

    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(token) => Some(token),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
