//! Slack-triggered command runner.
//!
//! Mentions of the bot arrive through the Events API webhook, are verified,
//! stripped down to a command line and queued. A single dispatcher takes the
//! oldest command every few seconds, runs it on the host and posts the output
//! back to the channel it came from.

pub mod domain;
pub mod application;
pub mod infrastructure;
