#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod providers;

// Re-export commonly used types for convenience
pub use domain::{ConversationLog, DISPLAY_WINDOW, Speaker, Turn};
pub use ports::{ChatError, ChatPort, ChatTurnRequest};
pub use providers::ModelProvider;
