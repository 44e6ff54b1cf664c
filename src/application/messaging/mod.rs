//! Message handling - Parsing, queueing, dispatching and formatting

pub mod dispatcher;
pub mod format;
pub mod parser;
pub mod queue;

pub use dispatcher::CommandDispatcher;
pub use format::{format_response, render_outcome};
pub use parser::{mention_ids, sanitize, strip_mention};
pub use queue::CommandQueue;
