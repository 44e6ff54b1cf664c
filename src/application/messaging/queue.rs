//! Command queue - FIFO shared between webhook handlers and the dispatcher

use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

use crate::domain::entities::Command;

/// Ordered queue of pending commands.
///
/// Any number of producers may `enqueue`; only the dispatcher calls
/// `take_oldest`. Unbounded.
#[derive(Default)]
pub struct CommandQueue {
    commands: Mutex<VecDeque<Command>>,
    notify: Notify,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command to the tail and wake a waiting consumer
    pub fn enqueue(&self, command: Command) {
        let depth = {
            let mut commands = self.commands.lock().unwrap_or_else(|e| e.into_inner());
            commands.push_back(command);
            commands.len()
        };
        tracing::debug!(depth, "Command enqueued");
        self.notify.notify_one();
    }

    /// Remove and return the head, or `None` when nothing is queued
    pub fn take_oldest(&self) -> Option<Command> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves after the next `enqueue` (or immediately if one happened
    /// since the last wait).
    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}
