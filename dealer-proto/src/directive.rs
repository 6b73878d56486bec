//! Control directive decoding.

use serde::Deserialize;

use crate::coerce;
use crate::error::DirectiveError;
use crate::request::DealRequest;
use crate::types::{GameCommand, GameType};

/// Maximum directive payload length in bytes (excluding the line terminator).
pub const MAX_DIRECTIVE_LEN: usize = 256;

/// A decoded control directive, discriminated by its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Directive {
    /// Opening deal for a new game.
    #[serde(rename_all = "camelCase")]
    DealInitial {
        #[serde(deserialize_with = "coerce::token")]
        game: Option<GameType>,
        #[serde(deserialize_with = "coerce::count")]
        player_count: u8,
    },
    /// Deal during a player's turn.
    #[serde(rename_all = "camelCase")]
    DealTurn {
        #[serde(deserialize_with = "coerce::token")]
        game: Option<GameType>,
        #[serde(deserialize_with = "coerce::count")]
        player_count: u8,
        #[serde(deserialize_with = "coerce::count")]
        player_turn: u8,
        #[serde(deserialize_with = "coerce::token")]
        game_command: Option<GameCommand>,
    },
    /// Any other `type`. Carries nothing and produces no motion.
    #[serde(other)]
    Unsupported,
}

impl Directive {
    /// Decode a JSON payload.
    ///
    /// A trailing `\r\n` or `\n` is ignored.
    pub fn decode(payload: &[u8]) -> Result<Self, DirectiveError> {
        Ok(serde_json::from_slice(strip_line_ending(payload))?)
    }

    /// Validate the directive into a deal request.
    ///
    /// Returns `Ok(None)` when there is nothing to deal: the `type` is
    /// unsupported or the game token was not recognized.
    pub fn into_request(self) -> Result<Option<DealRequest>, DirectiveError> {
        match self {
            Directive::DealInitial { game, player_count } => {
                let Some(game) = game else {
                    DealRequest::check_count(player_count)?;
                    return Ok(None);
                };
                DealRequest::initial(game, player_count).map(Some)
            }
            Directive::DealTurn {
                game,
                player_count,
                player_turn,
                game_command,
            } => {
                let Some(game) = game else {
                    DealRequest::check_turn(player_count, player_turn)?;
                    return Ok(None);
                };
                DealRequest::on_turn(game, player_count, player_turn, game_command).map(Some)
            }
            Directive::Unsupported => Ok(None),
        }
    }
}

/// Strip trailing CR and/or LF from a line.
#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    &line[..end]
}
