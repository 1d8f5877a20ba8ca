//! Batched push dispatch.
//!
//! Delivers one notification per device token with bounded concurrency.
//! A single stale or unreachable token is counted as a failure and never
//! aborts the batch; the only fatal error is failing to acquire the delivery
//! credential before any attempt is made.

use beacon_core::{DispatchError, DispatchOutcome, Notification, dedup_preserving_order};
use beacon_gateway::{CredentialProvider, DeliveryCredential, PushGateway};

/// Tokens attempted concurrently per chunk. Bounds in-flight gateway
/// requests; chunks run one after another.
pub const DISPATCH_CHUNK_SIZE: usize = 200;

/// Dispatches notifications through injected credential and gateway handles.
#[derive(Clone)]
pub struct Dispatcher<C, G> {
    credentials: C,
    gateway: G,
}

impl<C, G> Dispatcher<C, G>
where
    C: CredentialProvider,
    G: PushGateway,
{
    pub fn new(credentials: C, gateway: G) -> Self {
        Self {
            credentials,
            gateway,
        }
    }

    /// Deliver `notification` to every distinct token, once each.
    ///
    /// The token set is deduplicated in first-seen order with empty entries
    /// dropped. An audience that deduplicates to nothing short-circuits
    /// before the credential is acquired. Otherwise the credential is
    /// fetched once, the set is split into chunks of
    /// [`DISPATCH_CHUNK_SIZE`], and each chunk fans out concurrently and
    /// settles fully before the next one starts.
    pub async fn dispatch(
        &self,
        tokens: &[String],
        notification: &Notification,
    ) -> Result<DispatchOutcome, DispatchError> {
        let tokens = dedup_preserving_order(tokens.iter().cloned());
        if tokens.is_empty() {
            tracing::info!("empty audience, skipping dispatch");
            return Ok(DispatchOutcome::skipped());
        }

        let dispatch_id = uuid::Uuid::new_v4();
        let total_tokens = tokens.len();

        let credential = self.credentials.acquire().await?;

        let mut sent = 0usize;
        let mut failed = 0usize;

        for (chunk_index, chunk) in tokens.chunks(DISPATCH_CHUNK_SIZE).enumerate() {
            let attempts = chunk
                .iter()
                .map(|token| self.attempt(&credential, token, notification));

            // Join barrier: the next chunk starts only once this one settled.
            let results = futures::future::join_all(attempts).await;

            let chunk_sent = results.iter().filter(|ok| **ok).count();
            sent += chunk_sent;
            failed += results.len() - chunk_sent;

            tracing::debug!(
                %dispatch_id,
                chunk = chunk_index,
                size = chunk.len(),
                sent = chunk_sent,
                "chunk settled"
            );
        }

        tracing::info!(
            %dispatch_id,
            sent,
            failed,
            total_tokens,
            "dispatch complete"
        );

        Ok(DispatchOutcome {
            sent,
            failed,
            total_tokens,
            skipped: false,
        })
    }

    /// One delivery attempt. Failures are recorded, never propagated.
    async fn attempt(
        &self,
        credential: &DeliveryCredential,
        token: &str,
        notification: &Notification,
    ) -> bool {
        match self.gateway.deliver(credential, token, notification).await {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(token, %error, "delivery attempt failed");
                false
            }
        }
    }
}
