use std::sync::Arc;

use super::{IdentityCache, MentionResolver};
use crate::application::errors::BotError;
use crate::application::messaging::parser::sanitize;
use crate::application::messaging::CommandQueue;
use crate::domain::entities::Command;
use crate::domain::traits::Bot;

/// Turns app mentions into queued commands
pub struct CommandService {
    bot: Arc<dyn Bot>,
    mentions: MentionResolver,
    users: IdentityCache,
    queue: Arc<CommandQueue>,
}

impl CommandService {
    pub fn new(bot: Arc<dyn Bot>, mentions: MentionResolver, queue: Arc<CommandQueue>) -> Self {
        Self {
            users: IdentityCache::new(bot.clone()),
            bot,
            mentions,
            queue,
        }
    }

    pub fn queue(&self) -> &Arc<CommandQueue> {
        &self.queue
    }

    /// Handle an app mention.
    ///
    /// Returns the queued command, or `None` when nothing is left to run once
    /// the bot's mention is removed. Fails with `BotError::NotFound` when the
    /// bot's own identity cannot be resolved; nothing is queued in that case.
    pub async fn handle_mention(
        &self,
        channel: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Option<Command>, BotError> {
        let message = self.mentions.strip(text).await?;
        tracing::info!(%message, "Mention received");

        let message = sanitize(&message);
        tracing::debug!(%message, "Sanitized");
        if message.is_empty() {
            return Ok(None);
        }

        let user_name = self.users.display_name(user_id).await;
        self.acknowledge(channel, &message, &user_name).await;

        let command = Command::new(channel, user_id, message);
        self.queue.enqueue(command.clone());
        tracing::info!(%command, queued = self.queue.len(), "Command queued");
        Ok(Some(command))
    }

    async fn acknowledge(&self, channel: &str, message: &str, user_name: &str) {
        let text = format!("executing `{}` for {}", message, user_name);
        if let Err(e) = self.bot.send_message(channel, &text).await {
            tracing::error!(channel, error = %e, "Failed to post acknowledgment");
        }
    }
}
