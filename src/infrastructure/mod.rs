//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Slack)
//! - Executor: Running commands on the host
//! - Webhook: Events API HTTP endpoint

pub mod config;
pub mod adapters;
pub mod executor;
pub mod webhook;
