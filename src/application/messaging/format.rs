//! Response formatting for chat display

use crate::application::errors::ExecError;

/// Shown when a command produced no output and no error
pub const EMPTY_RESPONSE: &str = "empty response";

const CODE_FENCE: &str = "```";

/// Wrap text in a code block unless it contains a link the platform should preview.
pub fn format_response(text: &str) -> String {
    if text.contains("http://") || text.contains("https://") {
        return text.to_string();
    }
    format!("{CODE_FENCE}{text}{CODE_FENCE}")
}

/// Turn an execution outcome into the text posted back to the channel.
///
/// Captured output wins; when there is none the error's description is
/// used instead, so failures are visible in the conversation.
pub fn render_outcome(outcome: &Result<String, ExecError>) -> String {
    let text = match outcome {
        Ok(output) => output.trim().to_string(),
        Err(err) => match err.output().trim() {
            "" => err.to_string(),
            output => output.to_string(),
        },
    };
    if text.is_empty() {
        return format_response(EMPTY_RESPONSE);
    }
    format_response(&text)
}
