//! User id to display name cache

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};

use crate::domain::traits::Bot;

/// Remembers display names for the life of the process.
///
/// Entries are never evicted. Concurrent misses for one id share a single
/// lookup. Failed lookups are not cached.
pub struct IdentityCache {
    bot: Arc<dyn Bot>,
    names: RwLock<HashMap<String, Arc<OnceCell<String>>>>,
}

impl IdentityCache {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            names: RwLock::new(HashMap::new()),
        }
    }

    /// Display name for `user_id`, or an empty string when the lookup fails
    pub async fn display_name(&self, user_id: &str) -> String {
        let slot = self.slot(user_id).await;
        let name = slot
            .get_or_try_init(|| async {
                self.bot
                    .get_user_info(user_id)
                    .await
                    .map(|user| user.display_name())
            })
            .await;

        match name {
            Ok(name) => name.clone(),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to look up user");
                String::new()
            }
        }
    }

    /// Number of resolved names
    pub async fn len(&self) -> usize {
        self.names
            .read()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    async fn slot(&self, user_id: &str) -> Arc<OnceCell<String>> {
        if let Some(slot) = self.names.read().await.get(user_id) {
            return slot.clone();
        }
        self.names
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .clone()
    }
}
