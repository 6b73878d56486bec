//! Game and command variants with their canonical wire tokens.

use core::fmt;

/// A closed set of variants, each addressed by one canonical token.
///
/// Lookup is an exact, case-sensitive match against [`Token::TOKENS`].
pub trait Token: Sized + Copy + 'static {
    /// Canonical token table.
    const TOKENS: &'static [(&'static str, Self)];

    /// Resolve a wire token, returning `None` for anything not in the table.
    #[must_use]
    fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|&(_, v)| v)
    }
}

/// Which dealing routine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameType {
    Blackjack,
    Uno,
    ShuffleCards,
}

impl Token for GameType {
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("blackjack", Self::Blackjack),
        ("uno", Self::Uno),
        ("shuffle-cards", Self::ShuffleCards),
    ];
}

impl GameType {
    /// The canonical wire token.
    #[inline]
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Blackjack => "blackjack",
            Self::Uno => "uno",
            Self::ShuffleCards => "shuffle-cards",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// In-turn action requested by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameCommand {
    /// Blackjack: deal one card to the player whose turn it is.
    BlackjackHit,
    /// Uno: draw a random 0-3 cards.
    UnoDealOnce,
    /// Uno: two independent 0-3 draws.
    UnoDealTwice,
}

impl Token for GameCommand {
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("hit", Self::BlackjackHit),
        ("deal once", Self::UnoDealOnce),
        ("deal twice", Self::UnoDealTwice),
    ];
}

impl GameCommand {
    /// The canonical wire token.
    #[inline]
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::BlackjackHit => "hit",
            Self::UnoDealOnce => "deal once",
            Self::UnoDealTwice => "deal twice",
        }
    }
}

impl fmt::Display for GameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
