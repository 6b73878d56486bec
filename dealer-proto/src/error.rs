//! Error types for directive decoding and validation.

use serde_json::error::Category;
use thiserror::Error;

/// A directive that cannot be acted on.
///
/// The dispatcher logs these and drops the directive; none of them stop the
/// gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectiveError {
    /// Payload is not valid JSON.
    #[error("payload is not valid JSON")]
    Syntax,
    /// Payload ended in the middle of a value.
    #[error("payload is truncated")]
    Truncated,
    /// A required field is missing or has an unusable value.
    #[error("missing or invalid field")]
    InvalidField,
    /// Player count was zero.
    #[error("player count must be at least 1")]
    NoPlayers,
    /// Player turn outside `1..=count`.
    #[error("player turn {turn} is outside 1..={count}")]
    TurnOutOfRange { turn: u8, count: u8 },
}

impl From<serde_json::Error> for DirectiveError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Io => DirectiveError::Syntax,
            Category::Eof => DirectiveError::Truncated,
            Category::Data => DirectiveError::InvalidField,
        }
    }
}
