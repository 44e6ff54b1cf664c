use std::fmt;

/// A command addressed to the bot, waiting to be executed.
///
/// Built from an app mention once the bot's own mention has been stripped and
/// the text sanitized. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub channel: String,
    pub user_id: String,
    pub message: String,
}

impl Command {
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.channel, self.user_id, self.message)
    }
}

/// Program and arguments derived from a command's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split on whitespace: first token is the program, the rest are arguments.
    pub fn parse(message: &str) -> Option<Self> {
        let mut tokens = message.split_whitespace();
        let program = tokens.next()?;
        Some(Self::new(program, tokens.map(str::to_string).collect()))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.args.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_parse_splits_program_and_args() {
        let inv = Invocation::parse("  kubectl get   pods -n prod ").unwrap();
        assert_eq!(inv.program, "kubectl");
        assert_eq!(inv.args, vec!["get", "pods", "-n", "prod"]);
        assert_eq!(inv.to_string(), "kubectl get pods -n prod");
    }

    #[test]
    fn test_invocation_parse_empty_message() {
        assert!(Invocation::parse("").is_none());
        assert!(Invocation::parse("   \t ").is_none());
    }

    #[test]
    fn test_command_display() {
        let cmd = Command::new("C1", "U1", "uptime");
        assert_eq!(cmd.to_string(), "C1 U1 uptime");
    }
}
