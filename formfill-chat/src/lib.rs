//! Policy assistant chat widget.
//!
//! Keeps the transcript, posts questions to the assistant service, and
//! collapses repeated citations into one entry per document.

mod assistant;
mod render;
mod sources;
mod transcript;

pub use assistant::{PendingQuery, PolicyAssistant, QUERY_PATH, REBUILD_PATH, RebuildOutcome};
pub use render::{render_message, render_transcript};
pub use sources::{CitedSource, Source, dedupe_sources};
pub use transcript::{Message, MessageContent, MessageId, Sender, Transcript, WELCOME_MESSAGE};
