//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod user;

pub use command::{Command, Invocation};
pub use user::User;
