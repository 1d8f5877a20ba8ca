//! Gateway and credential traits.

use beacon_core::{CredentialError, DeliveryError, Notification};

/// Short-lived authorization artifact required by the push gateway.
///
/// Fetched once per dispatch call and shared read-only by every delivery
/// attempt in that call.
#[derive(Clone)]
pub struct DeliveryCredential {
    secret: String,
}

impl DeliveryCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for DeliveryCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryCredential")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Acquires delivery credentials. One call per dispatch invocation.
#[trait_variant::make(Send)]
pub trait CredentialProvider: Send + Sync {
    /// Acquire a credential, or fail the whole dispatch call.
    async fn acquire(&self) -> Result<DeliveryCredential, CredentialError>;
}

/// Single-token push send. The gateway has no batch primitive, which is why
/// the dispatcher fans out chunk by chunk.
#[trait_variant::make(Send)]
pub trait PushGateway: Send + Sync {
    /// Deliver one notification to one device token.
    async fn deliver(
        &self,
        credential: &DeliveryCredential,
        token: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError>;
}

/// Credential provider wrapping a fixed secret, for development and tests.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    secret: String,
}

impl StaticCredentialProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    async fn acquire(&self) -> Result<DeliveryCredential, CredentialError> {
        Ok(DeliveryCredential::new(self.secret.clone()))
    }
}
