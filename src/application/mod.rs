//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Bot identity, user lookups, mention handling
//! - Errors: Domain-specific errors
//! - Messaging: Parsing, queueing, dispatching, formatting

pub mod errors;
pub mod services;
pub mod messaging;

#[cfg(test)]
pub(crate) mod testing;
