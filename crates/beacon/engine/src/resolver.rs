//! Audience resolution.
//!
//! Turns one audience selector into a flat sequence of device tokens. The
//! sequence may still contain duplicates across records; the dispatcher owns
//! the final dedup so that "same device, once" holds no matter which path
//! produced the set.

use beacon_core::{AudienceSelector, StoreError, dedup_preserving_order};
use beacon_storage::{MAX_LOOKUP_BATCH, RecipientStore};

/// Records fetched per page when resolving the whole store.
pub const ALL_USERS_PAGE_SIZE: usize = 500;

/// Resolves audience selectors against an injected recipient store.
#[derive(Clone)]
pub struct AudienceResolver<S> {
    store: S,
}

impl<S: RecipientStore> AudienceResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve a selector into device tokens.
    ///
    /// Fails fast with [`StoreError`] if the store cannot be reached; partial
    /// resolution is never returned.
    pub fn resolve(&self, selector: &AudienceSelector) -> Result<Vec<String>, StoreError> {
        match selector {
            AudienceSelector::ExplicitTokens(tokens) => Ok(self.resolve_explicit(tokens)),
            AudienceSelector::OwnerIds(owner_ids) => self.resolve_by_owner_ids(owner_ids),
            AudienceSelector::Role(role) => self.resolve_by_role(role),
            AudienceSelector::AllUsers => self.resolve_all(),
        }
    }

    /// Pass the caller's tokens through untouched. This path bypasses the
    /// store, so dedup happens downstream like everywhere else.
    pub fn resolve_explicit(&self, tokens: &[String]) -> Vec<String> {
        tokens.to_vec()
    }

    /// Look up owners in batches no larger than the store's lookup limit and
    /// flatten their token lists. Unknown owner ids contribute nothing.
    pub fn resolve_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<String>, StoreError> {
        let owner_ids = dedup_preserving_order(owner_ids.iter().cloned());
        let mut tokens = Vec::new();

        for batch in owner_ids.chunks(MAX_LOOKUP_BATCH) {
            let refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            for record in self.store.lookup_by_owner_ids(&refs)? {
                tokens.extend(record.device_tokens);
            }
        }

        tracing::debug!(
            owners = owner_ids.len(),
            tokens = tokens.len(),
            "resolved owner-id audience"
        );

        Ok(tokens)
    }

    /// Flatten the token lists of every recipient with the given role.
    pub fn resolve_by_role(&self, role: &str) -> Result<Vec<String>, StoreError> {
        let mut tokens = Vec::new();
        for record in self.store.query_by_role(role)? {
            tokens.extend(record.device_tokens);
        }

        tracing::debug!(role, tokens = tokens.len(), "resolved role audience");

        Ok(tokens)
    }

    /// Page through the entire store, following the last seen owner id as a
    /// keyset cursor until a page comes back empty. An empty store resolves
    /// to an empty sequence.
    pub fn resolve_all(&self) -> Result<Vec<String>, StoreError> {
        let mut tokens = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.store.page_after(cursor.as_deref(), ALL_USERS_PAGE_SIZE)?;
            let Some(last) = page.last() else {
                break;
            };
            cursor = Some(last.owner_id.clone());
            pages += 1;

            for record in page {
                tokens.extend(record.device_tokens);
            }
        }

        tracing::debug!(pages, tokens = tokens.len(), "resolved all-users audience");

        Ok(tokens)
    }
}
