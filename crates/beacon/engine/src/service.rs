//! Push service facade.

use beacon_core::{AudienceSelector, DispatchError, DispatchOutcome, Notification};
use beacon_gateway::{CredentialProvider, PushGateway};
use beacon_storage::RecipientStore;

use crate::{AudienceResolver, Dispatcher};

/// Resolves an audience and dispatches a notification to it.
///
/// Thin composition of [`AudienceResolver`] and [`Dispatcher`] for callers
/// that hold a selector rather than a token list. Collaborators are injected
/// at construction; the service keeps no state between calls.
#[derive(Clone)]
pub struct PushService<S, C, G> {
    resolver: AudienceResolver<S>,
    dispatcher: Dispatcher<C, G>,
}

impl<S, C, G> PushService<S, C, G>
where
    S: RecipientStore,
    C: CredentialProvider,
    G: PushGateway,
{
    pub fn new(store: S, credentials: C, gateway: G) -> Self {
        Self {
            resolver: AudienceResolver::new(store),
            dispatcher: Dispatcher::new(credentials, gateway),
        }
    }

    /// Validate, resolve, and dispatch in one call.
    ///
    /// Returns either a complete outcome or a fatal error; partial results
    /// are never produced. Input validation runs before the store is touched.
    pub async fn send(
        &self,
        selector: &AudienceSelector,
        notification: &Notification,
    ) -> Result<DispatchOutcome, DispatchError> {
        notification.validate()?;

        let tokens = self.resolver.resolve(selector)?;
        self.dispatcher.dispatch(&tokens, notification).await
    }

    pub fn resolver(&self) -> &AudienceResolver<S> {
        &self.resolver
    }

    pub fn dispatcher(&self) -> &Dispatcher<C, G> {
        &self.dispatcher
    }
}
