//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Command, Invocation, User)
//! - Traits: Abstractions for infrastructure (Bot, Executor)

pub mod entities;
pub mod traits;
