use async_trait::async_trait;
use crate::domain::entities::Invocation;
use crate::application::errors::ExecError;

/// Executor trait - runs an invocation in the host environment
///
/// On success returns the captured output. Failures that still produced
/// output carry it inside the error.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, invocation: &Invocation) -> Result<String, ExecError>;
}
