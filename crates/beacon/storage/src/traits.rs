//! Storage traits.

use beacon_core::{RecipientRecord, StoreError};

/// Hard limit of the store's batch-lookup query, in ids per call.
pub const MAX_LOOKUP_BATCH: usize = 10;

/// Read-only recipient lookup used by audience resolution.
///
/// Methods are synchronous; callers run them from async code the same way
/// the rest of the diesel layer is consumed.
pub trait RecipientStore: Send + Sync {
    /// Fetch the recipients matching the given owner ids.
    ///
    /// At most [`MAX_LOOKUP_BATCH`] ids per call; more is a caller bug and
    /// fails with [`StoreError::BatchTooLarge`]. Unknown ids are silently
    /// omitted from the result.
    fn lookup_by_owner_ids(&self, owner_ids: &[&str]) -> Result<Vec<RecipientRecord>, StoreError>;

    /// Fetch every recipient whose role matches exactly (case-sensitive).
    fn query_by_role(&self, role: &str) -> Result<Vec<RecipientRecord>, StoreError>;

    /// Fetch up to `limit` recipients ordered by owner id, starting strictly
    /// after `cursor` when given. An empty result means the end was reached.
    fn page_after(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RecipientRecord>, StoreError>;
}

impl<T: RecipientStore + ?Sized> RecipientStore for &T {
    fn lookup_by_owner_ids(&self, owner_ids: &[&str]) -> Result<Vec<RecipientRecord>, StoreError> {
        (**self).lookup_by_owner_ids(owner_ids)
    }

    fn query_by_role(&self, role: &str) -> Result<Vec<RecipientRecord>, StoreError> {
        (**self).query_by_role(role)
    }

    fn page_after(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RecipientRecord>, StoreError> {
        (**self).page_after(cursor, limit)
    }
}
