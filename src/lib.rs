// Veil: content safety classification for user-submitted text.
//
// This is the library root. The moderation orchestrator is the entry point;
// the other modules are the stages it sequences plus their configuration.

pub mod config;
pub mod lexicon;
pub mod locale;
pub mod moderation;
pub mod output;
pub mod pipeline;
pub mod remote;
pub mod spoiler;

pub use moderation::{ModerationVerdict, Moderator};
