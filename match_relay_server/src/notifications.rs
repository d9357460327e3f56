//! Unwrapping of SNS deliveries.
//!
//! A delivery is JSON text. Payload notifications carry the provider event as a second, separately encoded JSON
//! document in their `Message` field, so reaching the event takes two decode passes:
//!
//! ```text
//! body ──decode──▶ Envelope { Type: "Notification", Message: "<json>" } ──decode──▶ { detail: { type, ... } }
//! ```
//!
//! Handshake messages (`SubscriptionConfirmation`, `UnsubscribeConfirmation`) are recognized and acknowledged without
//! being treated as events.
use log::*;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    SubscriptionConfirmation { topic_arn: Option<String>, subscribe_url: Option<String> },
    Notification { message_id: Option<String>, message: String },
    UnsubscribeConfirmation { topic_arn: Option<String> },
    Other(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEnvelope {
    #[serde(rename = "Type")]
    kind: String,
    message_id: Option<String>,
    topic_arn: Option<String>,
    message: Option<String>,
    #[serde(rename = "SubscribeURL")]
    subscribe_url: Option<String>,
}

impl Envelope {
    /// Decodes the outer envelope. Failure here means the delivery as a whole is malformed.
    pub fn from_body(body: &[u8]) -> Result<Self, ServerError> {
        let value = serde_json::from_slice::<Value>(body).map_err(|e| ServerError::InvalidEnvelope(e.to_string()))?;
        // Some transports wrap the whole envelope in a JSON string
        let value = match value {
            Value::String(s) => {
                serde_json::from_str::<Value>(&s).map_err(|e| ServerError::InvalidEnvelope(e.to_string()))?
            },
            v => v,
        };
        let raw = serde_json::from_value::<RawEnvelope>(value)
            .map_err(|e| ServerError::InvalidEnvelope(e.to_string()))?;
        let envelope = match raw.kind.as_str() {
            "SubscriptionConfirmation" => {
                Self::SubscriptionConfirmation { topic_arn: raw.topic_arn, subscribe_url: raw.subscribe_url }
            },
            "Notification" => {
                let message =
                    raw.message.ok_or_else(|| ServerError::InvalidEnvelope("Notification has no Message".into()))?;
                Self::Notification { message_id: raw.message_id, message }
            },
            "UnsubscribeConfirmation" => Self::UnsubscribeConfirmation { topic_arn: raw.topic_arn },
            other => Self::Other(other.to_string()),
        };
        Ok(envelope)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MessageError {
    #[error("Message is not valid JSON. {0}")]
    InvalidJson(String),
    #[error("Message has no detail object")]
    MissingDetail,
}

/// The second decode pass: extracts the `detail` object from a notification's `Message`.
pub fn message_detail(message: &str) -> Result<Value, MessageError> {
    let mut inner = serde_json::from_str::<Value>(message).map_err(|e| MessageError::InvalidJson(e.to_string()))?;
    match inner.get_mut("detail").map(Value::take) {
        Some(detail @ Value::Object(_)) => Ok(detail),
        _ => Err(MessageError::MissingDetail),
    }
}

/// Answers subscription handshakes.
///
/// When enabled, the `SubscribeURL` is visited in a background task and the delivery is acknowledged straight away.
/// Only `https` URLs on the SNS endpoint of the configured region are visited; anything else is logged and dropped.
/// Failures are only logged; SNS repeats the handshake if the subscription stays pending.
#[derive(Clone)]
pub struct SubscriptionConfirmer {
    enabled: bool,
    sns_host: String,
    client: Client,
}

impl SubscriptionConfirmer {
    pub fn new(enabled: bool, region: &str) -> Self {
        Self { enabled, sns_host: format!("sns.{region}.amazonaws.com"), client: Client::new() }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Parses `subscribe_url` and checks that it points at the regional SNS endpoint.
    pub fn trusted_url(&self, subscribe_url: &str) -> Result<Url, String> {
        let url = Url::parse(subscribe_url).map_err(|e| format!("{subscribe_url} is not a valid URL. {e}"))?;
        if url.scheme() != "https" {
            return Err(format!("{subscribe_url} does not use https"));
        }
        match url.host_str() {
            Some(host) if host.eq_ignore_ascii_case(&self.sns_host) => Ok(url),
            _ => Err(format!("{subscribe_url} is not hosted on {}", self.sns_host)),
        }
    }

    /// Returns true if a confirmation request was dispatched.
    pub fn confirm(&self, topic_arn: Option<&str>, subscribe_url: Option<&str>) -> bool {
        let topic = topic_arn.unwrap_or("(unknown topic)");
        if !self.enabled {
            info!("📨️ Subscription confirmation received for {topic}. Visit its SubscribeURL to activate it.");
            return false;
        }
        let Some(url) = subscribe_url else {
            warn!("📨️ Subscription confirmation for {topic} has no SubscribeURL");
            return false;
        };
        let url = match self.trusted_url(url) {
            Ok(url) => url,
            Err(e) => {
                warn!("📨️ Refusing to confirm the subscription to {topic}. {e}");
                return false;
            },
        };
        let client = self.client.clone();
        let topic = topic.to_string();
        actix_web::rt::spawn(async move {
            match client.get(url).send().await {
                Ok(res) if res.status().is_success() => info!("📨️ Subscribed to {topic}"),
                Ok(res) => warn!("📨️ Subscription confirmation for {topic} was rejected. {}", res.status()),
                Err(e) => warn!("📨️ Could not confirm the subscription to {topic}. {e}"),
            }
        });
        true
    }
}
