//! Port definitions: trait boundaries to external collaborators.

mod chat;

pub use chat::{ChatError, ChatPort, ChatTurnRequest};
