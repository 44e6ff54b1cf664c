//! Message parser - Mention extraction and text sanitization

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// `<@U123>` or `<@U123|label>`
static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<@([^|>\s]+)(?:\|[^>]*)?>$").expect("valid mention pattern"));

/// Ids of every whitespace-delimited token written in mention syntax, in order.
pub fn mention_ids(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter_map(|token| {
        MENTION
            .captures(token)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Remove every `"<@ID> "` occurrence, plus a bare `"<@ID>"` ending the text.
pub fn strip_mention(text: &str, bot_id: &str) -> String {
    let mention = format!("<@{}>", bot_id);
    let stripped = text.replace(&format!("{} ", mention), "");
    match stripped.strip_suffix(&mention) {
        Some(rest) => rest.to_string(),
        None => stripped,
    }
}

/// Collapse rich-text link tokens (`<payload|display>`) into their display text.
///
/// The display text is the segment after the first `|`, up to any further
/// `|`, with its first `>` removed. Tokens are rejoined with single spaces. A
/// link with an empty display part is dropped. Applying this twice yields the
/// same text as applying it once.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|token| {
            if !is_link_token(token) {
                return Some(token.to_string());
            }
            let display = token
                .split('|')
                .nth(1)
                .unwrap_or_default()
                .replacen('>', "", 1);
            (!display.is_empty()).then_some(display)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_link_token(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('<') && token.ends_with('>') && token.contains('|')
}
