//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod executor;

pub use bot::Bot;
pub use executor::Executor;
