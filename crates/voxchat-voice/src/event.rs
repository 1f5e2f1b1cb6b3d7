//! Session events published to the presentation layer.
//!
//! The controller pushes these over an unbounded channel; subscribers
//! render them however the surface requires (status line, transcript
//! panel, error banner).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use voxchat_core::Turn;

use crate::session::SessionState;

/// How long an error banner stays visible before it clears itself.
pub const ERROR_BANNER_TTL: Duration = Duration::from_secs(5);

/// Visual flavour of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Neutral,
    Listening,
    Speaking,
}

/// One event emitted by the voice session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The session moved to a new state.
    StateChanged(SessionState),
    /// A human-readable status line.
    Status { text: String, kind: StatusKind },
    /// The visible tail of the conversation log changed.
    LogWindow(Vec<Turn>),
    /// A typed query's reply, rendered to display HTML.
    ResponseRendered { markup: String },
    /// A transient error to show prominently.
    ErrorBanner { message: String },
    /// The error banner's display time is up.
    ErrorBannerCleared,
}
