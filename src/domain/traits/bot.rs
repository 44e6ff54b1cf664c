use async_trait::async_trait;
use crate::domain::entities::User;
use crate::application::errors::BotError;

/// Bot trait - abstraction for the messaging platform client
///
/// The dispatch pipeline only ever needs to post text into a conversation
/// and look up who a user id belongs to.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a message to a channel, returning the platform's message id
    async fn send_message(&self, channel: &str, text: &str) -> Result<String, BotError>;

    /// Look up a user by id
    async fn get_user_info(&self, user_id: &str) -> Result<User, BotError>;
}
