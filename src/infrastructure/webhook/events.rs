//! Events API payloads

use serde::Deserialize;

/// Outer envelope of an Events API request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Endpoint handshake; the challenge must be echoed back verbatim
    UrlVerification { challenge: String },
    EventCallback { event: CallbackEvent },
    #[serde(other)]
    Other,
}

/// Event wrapped by an `event_callback`. Only mentions of the bot are acted on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallbackEvent {
    AppMention(AppMention),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppMention {
    pub user: String,
    pub channel: String,
    pub text: String,
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn decode(body: &[u8]) -> Result<Envelope, serde_json::Error> {
    serde_json::from_slice(body)
}
