//! Error taxonomy for resolution and dispatch.
//!
//! Only two failures abort a call: the store being unreachable during
//! resolution and credential acquisition failing before dispatch. Everything
//! that goes wrong for a single token is absorbed into the failure counter.

/// Errors from the recipient store collaborator. Fatal to resolution.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or the query failed outright.
    #[error("recipient store unavailable: {0}")]
    Unavailable(String),
    /// A batch lookup was handed more ids than the store accepts per call.
    #[error("batch lookup of {0} ids exceeds the store's per-call limit")]
    BatchTooLarge(usize),
}

/// Credential acquisition failure. Fatal to the dispatch call.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to acquire delivery credential: {0}")]
    AcquisitionFailed(String),
}

/// Per-token delivery failure. Recorded, never propagated past dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The gateway answered with a non-success status.
    #[error("gateway rejected delivery with status {status}")]
    Gateway { status: u16 },
    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),
    /// The per-request timeout elapsed.
    #[error("delivery attempt timed out")]
    Timeout,
}

/// Fatal errors a caller of the dispatch surface can observe.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Caller-contract violation, detected before resolution begins.
    #[error("invalid notification: {0}")]
    InvalidNotification(&'static str),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
