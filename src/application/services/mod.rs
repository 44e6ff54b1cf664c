//! Application services - Business logic orchestration

pub mod command_service;
pub mod mention_service;
pub mod user_service;

pub use command_service::CommandService;
pub use mention_service::MentionResolver;
pub use user_service::IdentityCache;
