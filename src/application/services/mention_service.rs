//! Bot identity resolution and mention stripping

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::application::errors::BotError;
use crate::application::messaging::parser::{mention_ids, strip_mention};
use crate::domain::traits::Bot;

/// Resolves the bot's own user id once and strips its mentions from text.
///
/// The id is discovered from the first message that needs it: every mention
/// in that message is looked up and the first user flagged as a bot wins.
/// A failed resolution stores nothing, so the next message tries again.
pub struct MentionResolver {
    bot: Arc<dyn Bot>,
    bot_id: OnceCell<String>,
}

impl MentionResolver {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            bot_id: OnceCell::new(),
        }
    }

    /// Start with a known bot id; no lookups will be made
    pub fn with_bot_id(bot: Arc<dyn Bot>, bot_id: impl Into<String>) -> Self {
        Self {
            bot,
            bot_id: OnceCell::new_with(Some(bot_id.into())),
        }
    }

    pub fn bot_id(&self) -> Option<&str> {
        self.bot_id.get().map(String::as_str)
    }

    /// The bot's id, resolving it from `text` on first use
    pub async fn resolve(&self, text: &str) -> Result<&str, BotError> {
        self.bot_id
            .get_or_try_init(|| self.find_bot_id(text))
            .await
            .map(String::as_str)
    }

    /// `text` with every mention of the bot removed
    pub async fn strip(&self, text: &str) -> Result<String, BotError> {
        let bot_id = self.resolve(text).await?;
        Ok(strip_mention(text, bot_id))
    }

    async fn find_bot_id(&self, text: &str) -> Result<String, BotError> {
        for id in mention_ids(text) {
            tracing::debug!(id, "Checking mentioned user");
            match self.bot.get_user_info(id).await {
                Ok(user) if user.is_bot => {
                    tracing::info!(bot_id = id, "Resolved bot identity");
                    return Ok(id.to_string());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(id, error = %e, "Failed to look up mentioned user"),
            }
        }
        Err(BotError::NotFound("no bot user among mentions".to_string()))
    }
}
