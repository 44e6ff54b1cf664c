//! Command dispatcher - Serially executes queued commands

use std::sync::Arc;
use std::time::Duration;

use super::format::render_outcome;
use super::queue::CommandQueue;
use crate::application::errors::ExecError;
use crate::domain::entities::{Command, Invocation};
use crate::domain::traits::{Bot, Executor};

/// Default wait between dispatch ticks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Single consumer of the command queue.
///
/// Each tick takes at most one command and runs it to completion before the
/// next wait starts, so no two commands ever execute at the same time.
pub struct CommandDispatcher {
    queue: Arc<CommandQueue>,
    executor: Arc<dyn Executor>,
    bot: Arc<dyn Bot>,
    interval: Duration,
    wake_on_enqueue: bool,
}

impl CommandDispatcher {
    pub fn new(queue: Arc<CommandQueue>, executor: Arc<dyn Executor>, bot: Arc<dyn Bot>) -> Self {
        Self {
            queue,
            executor,
            bot,
            interval: DEFAULT_INTERVAL,
            wake_on_enqueue: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// End a wait early as soon as something is enqueued
    pub fn with_wake_on_enqueue(mut self, wake: bool) -> Self {
        self.wake_on_enqueue = wake;
        self
    }

    /// Run forever
    pub async fn run(self) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            wake_on_enqueue = self.wake_on_enqueue,
            "Dispatcher started"
        );
        loop {
            self.wait().await;
            self.tick().await;
        }
    }

    async fn wait(&self) {
        if self.wake_on_enqueue {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.queue.notified() => {}
            }
        } else {
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One dispatch tick. Returns whether a command was taken.
    pub async fn tick(&self) -> bool {
        match self.queue.take_oldest() {
            Some(command) => {
                self.dispatch(command).await;
                true
            }
            None => false,
        }
    }

    /// Execute a command and post its rendered output to the originating channel
    pub async fn dispatch(&self, command: Command) {
        tracing::info!(
            channel = %command.channel,
            user = %command.user_id,
            message = %command.message,
            "Executing"
        );

        let outcome = match Invocation::parse(&command.message) {
            Some(invocation) => self.executor.execute(&invocation).await,
            None => Err(ExecError::Empty),
        };
        if let Err(e) = &outcome {
            tracing::debug!(error = %e, "Command failed");
        }

        let response = render_outcome(&outcome);
        if let Err(e) = self.bot.send_message(&command.channel, &response).await {
            tracing::error!(channel = %command.channel, error = %e, "Failed to post response");
        }
    }
}
