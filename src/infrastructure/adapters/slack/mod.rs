//! Slack Web API adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::User;
use crate::domain::traits::Bot;

/// Slack Web API base URL
pub const API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    ok: bool,
    error: Option<String>,
    user: Option<SlackUser>,
}

#[derive(Debug, Deserialize)]
struct SlackUser {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    real_name: Option<String>,
    #[serde(default)]
    is_bot: bool,
}

impl From<SlackUser> for User {
    fn from(u: SlackUser) -> Self {
        User {
            id: u.id,
            name: u.name,
            real_name: u.real_name,
            is_bot: u.is_bot,
        }
    }
}

/// Slack bot adapter
pub struct SlackAdapter {
    token: String,
    client: Client,
    api_base: String,
}

impl SlackAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, API_BASE)
    }

    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }
}

#[async_trait]
impl Bot for SlackAdapter {
    async fn send_message(&self, channel: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct PostMessageRequest<'a> {
            channel: &'a str,
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            ok: bool,
            error: Option<String>,
            ts: Option<String>,
        }

        tracing::debug!(channel, text, "Posting message");

        let response = self.client
            .post(self.api_url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&PostMessageRequest { channel, text })
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Slack API error: {}", response.status())));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !data.ok {
            return Err(BotError::Api(data.error.unwrap_or_else(|| "unknown_error".to_string())));
        }

        Ok(data.ts.unwrap_or_default())
    }

    async fn get_user_info(&self, user_id: &str) -> Result<User, BotError> {
        let response = self.client
            .get(self.api_url("users.info"))
            .bearer_auth(&self.token)
            .query(&[("user", user_id)])
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Slack API error: {}", response.status())));
        }

        let data: UserInfoResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !data.ok {
            return Err(BotError::Api(data.error.unwrap_or_else(|| "unknown_error".to_string())));
        }

        data.user
            .map(User::from)
            .ok_or_else(|| BotError::NotFound(format!("user {}", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_message_posts_with_bearer_token() {
        let server = MockServer::start();
        let post = server.mock(|when, then| {
            when.method(POST)
                .path("/chat.postMessage")
                .header("authorization", "Bearer xoxb-test")
                .json_body(json!({"channel": "C1", "text": "```hi```"}));
            then.status(200)
                .json_body(json!({"ok": true, "channel": "C1", "ts": "1700000000.000100"}));
        });

        let adapter = SlackAdapter::with_api_base("xoxb-test", server.base_url());
        let ts = adapter.send_message("C1", "```hi```").await.unwrap();

        post.assert_calls(1);
        assert_eq!(ts, "1700000000.000100");
    }

    #[tokio::test]
    async fn test_send_message_surfaces_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat.postMessage");
            then.status(200).json_body(json!({"ok": false, "error": "channel_not_found"}));
        });

        let adapter = SlackAdapter::with_api_base("xoxb-test", server.base_url());
        let err = adapter.send_message("CX", "hi").await.unwrap_err();
        assert!(matches!(err, BotError::Api(ref e) if e == "channel_not_found"));
    }

    #[tokio::test]
    async fn test_send_message_http_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat.postMessage");
            then.status(500);
        });

        let adapter = SlackAdapter::with_api_base("xoxb-test", server.base_url());
        assert!(matches!(
            adapter.send_message("C1", "hi").await,
            Err(BotError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_info() {
        let server = MockServer::start();
        let lookup = server.mock(|when, then| {
            when.method(GET).path("/users.info").query_param("user", "U123");
            then.status(200).json_body(json!({
                "ok": true,
                "user": {"id": "U123", "name": "robot", "real_name": "Robot", "is_bot": true}
            }));
        });

        let adapter = SlackAdapter::with_api_base("xoxb-test", format!("{}/", server.base_url()));
        let user = adapter.get_user_info("U123").await.unwrap();

        lookup.assert_calls(1);
        assert_eq!(user, User::new("U123").with_name("robot").with_real_name("Robot").bot());
    }

    #[tokio::test]
    async fn test_get_user_info_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users.info");
            then.status(200).json_body(json!({"ok": false, "error": "user_not_found"}));
        });

        let adapter = SlackAdapter::with_api_base("xoxb-test", server.base_url());
        assert!(matches!(
            adapter.get_user_info("UNOPE").await,
            Err(BotError::Api(_))
        ));
    }
}
