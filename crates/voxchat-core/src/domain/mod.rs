//! Conversation domain types.
//!
//! These types represent the conversation record independent of any
//! transport or presentation concern.

mod log;
mod turn;

pub use log::{ConversationLog, DISPLAY_WINDOW};
pub use turn::{Speaker, Turn};
