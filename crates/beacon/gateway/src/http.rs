//! HTTP push gateway client.

use std::collections::BTreeMap;
use std::time::Duration;

use color_eyre::eyre::WrapErr as _;

use crate::{DeliveryCredential, PushGateway};
use beacon_core::{DeliveryError, Notification};

/// Per-request timeout. One unresponsive token must not stall its chunk.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Push gateway speaking a single-token HTTP send endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    send_url: String,
}

impl HttpGateway {
    /// Create a new gateway client for the given send endpoint URL.
    pub fn new(send_url: impl Into<String>) -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .wrap_err("failed to build HTTP client")?;

        Ok(Self {
            client,
            send_url: send_url.into(),
        })
    }
}

impl PushGateway for HttpGateway {
    async fn deliver(
        &self,
        credential: &DeliveryCredential,
        token: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        let message = GatewayMessage::build(token, notification);

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(credential.secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Gateway {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

/// Wire message for one delivery attempt.
#[derive(Debug, serde::Serialize)]
struct GatewayMessage {
    to: String,
    /// Fixed delivery policy: high priority on both platforms.
    priority: &'static str,
    notification: GatewayNotification,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    data: BTreeMap<String, String>,
}

#[derive(Debug, serde::Serialize)]
struct GatewayNotification {
    title: String,
    body: String,
    /// Fixed delivery policy: default alert sound on both platforms.
    sound: &'static str,
}

impl GatewayMessage {
    fn build(token: &str, notification: &Notification) -> Self {
        Self {
            to: token.to_owned(),
            priority: "high",
            notification: GatewayNotification {
                title: notification.title.clone(),
                body: notification.body.clone(),
                sound: "default",
            },
            data: notification.string_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_the_fixed_platform_hints() {
        let mut notification = Notification::new("Title", "Body");
        notification
            .data
            .insert("badge".into(), serde_json::json!(3));

        let message = GatewayMessage::build("tok-1", &notification);
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["to"], "tok-1");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["notification"]["sound"], "default");
        assert_eq!(json["data"]["badge"], "3");
    }

    #[test]
    fn empty_data_map_is_omitted_from_the_wire() {
        let message = GatewayMessage::build("tok-1", &Notification::new("t", "b"));
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("data").is_none());
    }
}
