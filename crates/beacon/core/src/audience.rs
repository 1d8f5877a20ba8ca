//! Audience selectors for push dispatch.

/// Rule describing which device tokens a notification targets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudienceSelector {
    /// Caller-supplied device tokens, sent as-is.
    ExplicitTokens(Vec<String>),
    /// Owner ids to look up in the recipient store.
    OwnerIds(Vec<String>),
    /// Every recipient whose role matches exactly (case-sensitive).
    Role(String),
    /// Every recipient in the store.
    AllUsers,
}

impl AudienceSelector {
    /// Build a selector from the optional fields of an incoming request.
    ///
    /// When more than one field is supplied the first non-empty one wins, in
    /// the order explicit tokens > owner ids > role > all-users. Returns
    /// `None` when no field selects anything.
    pub fn from_parts(
        tokens: Option<Vec<String>>,
        owner_ids: Option<Vec<String>>,
        role: Option<String>,
        all_users: bool,
    ) -> Option<Self> {
        if let Some(tokens) = tokens.filter(|t| !t.is_empty()) {
            return Some(Self::ExplicitTokens(tokens));
        }
        if let Some(ids) = owner_ids.filter(|ids| !ids.is_empty()) {
            return Some(Self::OwnerIds(ids));
        }
        if let Some(role) = role.filter(|r| !r.is_empty()) {
            return Some(Self::Role(role));
        }
        if all_users {
            return Some(Self::AllUsers);
        }
        None
    }
}
