//! Dispatch result types.

/// Aggregate result of one dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    /// Number of tokens the gateway accepted.
    pub sent: usize,
    /// Number of tokens that failed for any reason.
    pub failed: usize,
    /// Size of the deduplicated token set that was attempted.
    pub total_tokens: usize,
    /// True when the resolved audience was empty and nothing ran.
    pub skipped: bool,
}

impl DispatchOutcome {
    /// Outcome for an empty audience: no credential fetched, nothing sent.
    pub fn skipped() -> Self {
        Self {
            sent: 0,
            failed: 0,
            total_tokens: 0,
            skipped: true,
        }
    }

    /// Outcome of a dispatch that ran to completion.
    pub fn completed(sent: usize, failed: usize) -> Self {
        Self {
            sent,
            failed,
            total_tokens: sent + failed,
            skipped: false,
        }
    }
}
