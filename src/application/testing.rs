//! In-memory `Bot` and `Executor` doubles for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::errors::{BotError, ExecError};
use crate::domain::entities::{Invocation, User};
use crate::domain::traits::{Bot, Executor};

#[derive(Default)]
pub struct FakeBot {
    users: HashMap<String, User>,
    pub sent: Mutex<Vec<(String, String)>>,
    pub lookups: Mutex<Vec<String>>,
    pub fail_sends: bool,
    pub lookup_delay: Duration,
}

impl FakeBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn lookup_count(&self, user_id: &str) -> usize {
        self.lookups.lock().unwrap().iter().filter(|id| *id == user_id).count()
    }
}

#[async_trait]
impl Bot for FakeBot {
    async fn send_message(&self, channel: &str, text: &str) -> Result<String, BotError> {
        if self.fail_sends {
            return Err(BotError::Network("channel_not_found".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((channel.to_string(), text.to_string()));
        Ok(format!("{}.0", sent.len()))
    }

    async fn get_user_info(&self, user_id: &str) -> Result<User, BotError> {
        self.lookups.lock().unwrap().push(user_id.to_string());
        if !self.lookup_delay.is_zero() {
            tokio::time::sleep(self.lookup_delay).await;
        }
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| BotError::Api("user_not_found".to_string()))
    }
}

/// Echoes the invocation back, optionally sleeping, and tracks overlap.
#[derive(Default)]
pub struct FakeExecutor {
    pub delay: Duration,
    pub executed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, ExecError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.executed.lock().unwrap().push(invocation.to_string());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("{}\n", invocation.args.join(" ")))
    }
}
