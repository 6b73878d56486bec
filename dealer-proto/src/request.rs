//! Validated deal requests.

use crate::error::DirectiveError;
use crate::types::{GameCommand, GameType};

/// A deal order that satisfies the table invariants.
///
/// `player_count` is at least 1 and `player_turn`, when present, lies in
/// `1..=player_count`. Only the constructors below build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct DealRequest {
    pub game: GameType,
    pub player_count: u8,
    pub player_turn: Option<u8>,
    pub command: Option<GameCommand>,
}

impl DealRequest {
    /// Opening deal for `player_count` players.
    pub fn initial(game: GameType, player_count: u8) -> Result<Self, DirectiveError> {
        Self::check_count(player_count)?;
        Ok(Self {
            game,
            player_count,
            player_turn: None,
            command: None,
        })
    }

    /// In-turn deal. A `None` command is valid and deals nothing.
    pub fn on_turn(
        game: GameType,
        player_count: u8,
        player_turn: u8,
        command: Option<GameCommand>,
    ) -> Result<Self, DirectiveError> {
        Self::check_turn(player_count, player_turn)?;
        Ok(Self {
            game,
            player_count,
            player_turn: Some(player_turn),
            command,
        })
    }

    pub(crate) fn check_count(player_count: u8) -> Result<(), DirectiveError> {
        if player_count == 0 {
            return Err(DirectiveError::NoPlayers);
        }
        Ok(())
    }

    pub(crate) fn check_turn(player_count: u8, player_turn: u8) -> Result<(), DirectiveError> {
        Self::check_count(player_count)?;
        if player_turn == 0 || player_turn > player_count {
            return Err(DirectiveError::TurnOutOfRange {
                turn: player_turn,
                count: player_count,
            });
        }
        Ok(())
    }

    /// Whether this is an opening deal rather than an in-turn one.
    #[inline]
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        self.player_turn.is_none()
    }
}
