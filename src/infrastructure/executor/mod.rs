//! Host command execution

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::application::errors::ExecError;
use crate::domain::entities::Invocation;
use crate::domain::traits::Executor;

/// Runs the program directly on the host, no shell involved.
///
/// Waits for the child to exit with no timeout. Output is stdout followed by
/// stderr.
#[derive(Debug, Default, Clone)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for ShellExecutor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, ExecError> {
        if invocation.program.is_empty() {
            return Err(ExecError::Empty);
        }
        tracing::debug!(%invocation, "Spawning");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ExecError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let combined = combine(&output.stdout, &output.stderr);
        if output.status.success() {
            Ok(combined)
        } else {
            Err(ExecError::Exited {
                program: invocation.program.clone(),
                status: output.status.to_string(),
                output: combined,
            })
        }
    }
}

fn combine(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    if !stderr.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&String::from_utf8_lossy(stderr));
    }
    combined
}

/// Refuses programs that are not on the list before the inner executor sees them.
///
/// An empty list lets everything through.
pub struct AllowListExecutor<E> {
    inner: E,
    allowed: Vec<String>,
}

impl<E: Executor> AllowListExecutor<E> {
    pub fn new(inner: E, allowed: Vec<String>) -> Self {
        Self { inner, allowed }
    }

    pub fn is_allowed(&self, program: &str) -> bool {
        self.allowed.is_empty() || self.allowed.iter().any(|a| a == program)
    }
}

#[async_trait]
impl<E: Executor> Executor for AllowListExecutor<E> {
    async fn execute(&self, invocation: &Invocation) -> Result<String, ExecError> {
        if !self.is_allowed(&invocation.program) {
            tracing::warn!(program = %invocation.program, "Refused command not on allow list");
            return Err(ExecError::NotAllowed(invocation.program.clone()));
        }
        self.inner.execute(invocation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(line: &str) -> Invocation {
        Invocation::parse(line).unwrap()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_echo() {
        let output = ShellExecutor::new().execute(&inv("echo hello")).await.unwrap();
        assert_eq!(output, "hello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_keeps_output() {
        let invocation = Invocation::new(
            "sh",
            vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()],
        );
        let err = ShellExecutor::new().execute(&invocation).await.unwrap_err();
        match &err {
            ExecError::Exited { status, output, .. } => {
                assert!(status.contains('3'), "status: {}", status);
                assert_eq!(output, "out\nerr\n");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.output(), "out\nerr\n");
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_spawn() {
        let err = ShellExecutor::new()
            .execute(&inv("definitely-not-a-real-program-7f3a"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
        assert_eq!(err.output(), "");
    }

    #[tokio::test]
    async fn test_empty_program() {
        let err = ShellExecutor::new()
            .execute(&Invocation::new("", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Empty));
    }

    #[test]
    fn test_combine_separates_streams() {
        assert_eq!(combine(b"a", b"b"), "a\nb");
        assert_eq!(combine(b"", b"b\n"), "b\n");
        assert_eq!(combine(b"a\n", b""), "a\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_allow_list() {
        let executor = AllowListExecutor::new(ShellExecutor::new(), vec!["echo".to_string()]);
        assert_eq!(executor.execute(&inv("echo ok")).await.unwrap(), "ok\n");
        assert!(matches!(
            executor.execute(&inv("rm -rf /tmp/nothing")).await,
            Err(ExecError::NotAllowed(p)) if p == "rm"
        ));
    }

    #[test]
    fn test_empty_allow_list_allows_everything() {
        let executor = AllowListExecutor::new(ShellExecutor::new(), vec![]);
        assert!(executor.is_allowed("anything"));
    }
}
