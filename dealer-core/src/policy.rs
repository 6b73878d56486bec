//! Dealing policy: which seats to visit and how many cards to dispense.
//!
//! Seats are spread over a half circle, `180 / N` degrees apart, with
//! player 1 facing the arm's base position. Moving towards higher seats is a
//! negative rotation.
//!
//! Two addressing modes are used:
//!
//! - **Relative**: a full pass visits players `1..=N` in order, so each move
//!   is a single seat step from the previous player.
//! - **Absolute**: turn deals and the shuffle routine jump straight to a
//!   seat from base.
//!
//! Every routine swings back to base when it is done with a pass or a visit,
//! so the arm has zero net rotation between requests.

use dealer_proto::{DealRequest, GameCommand, GameType};
use rand::Rng;

use crate::motion::Motion;

/// Opening deal passes for blackjack.
pub const BLACKJACK_PASSES: u32 = 2;

/// Opening deal passes for uno.
pub const UNO_PASSES: u32 = 4;

/// Rounds of the two-seat shuffle routine.
pub const SHUFFLE_ROUNDS: u32 = 5;

/// Absolute angle of `player`'s seat from base, in degrees.
///
/// Player 1 is always at 0.
#[must_use]
pub fn seat_angle(player: u8, player_count: u8) -> f32 {
    if player <= 1 {
        return 0.0;
    }
    -seat_step(player_count) * f32::from(player - 1)
}

#[inline]
fn seat_step(player_count: u8) -> f32 {
    180.0 / f32::from(player_count)
}

/// Turn the arm to face `player`.
///
/// With `absolute` the move is computed from base; otherwise it is one seat
/// step from the previous player in a pass. Waits for the arm to settle.
pub fn move_to_player<M: Motion>(
    motion: &mut M,
    player: u8,
    player_count: u8,
    absolute: bool,
) -> Result<(), M::Error> {
    let angle = if player <= 1 {
        0.0
    } else if absolute {
        seat_angle(player, player_count)
    } else {
        -seat_step(player_count)
    };
    debug!("moving to player {} of {}: {} deg", player, player_count, angle);
    motion.rotate_turn_arm(angle)?;
    let settle = motion.config().seat_settle_ms;
    motion.settle(settle);
    Ok(())
}

/// Swing the arm back to base from `player`'s seat.
pub fn move_to_base<M: Motion>(motion: &mut M, player: u8, player_count: u8) -> Result<(), M::Error> {
    let settle = motion.config().base_settle_ms;
    motion.settle(settle);
    let angle = -seat_angle(player, player_count);
    debug!("returning to base: {} deg", angle);
    motion.rotate_turn_arm(angle)
}

fn dispense<M: Motion>(motion: &mut M, cards: u32) -> Result<u32, M::Error> {
    for _ in 0..cards {
        motion.dispense_one_card()?;
    }
    Ok(cards)
}

/// One card to every player in seat order, then back to base.
fn deal_pass<M: Motion>(motion: &mut M, player_count: u8) -> Result<u32, M::Error> {
    for player in 1..=player_count {
        debug!("dealing card to player {}", player);
        move_to_player(motion, player, player_count, false)?;
        motion.dispense_one_card()?;
    }
    move_to_base(motion, player_count, player_count)?;
    Ok(u32::from(player_count))
}

/// Opening deal for a new game. Returns the number of cards dispensed.
///
/// - Blackjack: two passes.
/// - Uno: four passes.
/// - Shuffle: five rounds visiting seats 1 and 2 of a two-seat table,
///   dispensing 1-3 random cards per visit.
pub fn deal_initial<M: Motion, R: Rng>(
    motion: &mut M,
    rng: &mut R,
    game: GameType,
    player_count: u8,
) -> Result<u32, M::Error> {
    info!("dealing {:?} for {} players", game, player_count);
    let mut dealt = 0;
    match game {
        GameType::Blackjack => {
            for _ in 0..BLACKJACK_PASSES {
                dealt += deal_pass(motion, player_count)?;
            }
        }
        GameType::Uno => {
            for _ in 0..UNO_PASSES {
                dealt += deal_pass(motion, player_count)?;
            }
        }
        GameType::ShuffleCards => {
            for _ in 0..SHUFFLE_ROUNDS {
                for player in 1..=2 {
                    move_to_player(motion, player, 2, true)?;
                    dealt += dispense(motion, rng.random_range(1..=3))?;
                    move_to_base(motion, player, 2)?;
                }
            }
        }
    }
    Ok(dealt)
}

/// Deal during `player_turn`'s turn. Returns the number of cards dispensed.
///
/// - Blackjack hit: one card to the player, then back to base.
/// - Uno deal once: 0-3 random cards where the arm already points.
/// - Uno deal twice: two independent 0-3 draws.
///
/// Any other game/command pairing deals nothing.
pub fn deal_on_turn<M: Motion, R: Rng>(
    motion: &mut M,
    rng: &mut R,
    game: GameType,
    player_count: u8,
    player_turn: u8,
    command: Option<GameCommand>,
) -> Result<u32, M::Error> {
    info!(
        "turn deal {:?} {:?} for player {} of {}",
        game, command, player_turn, player_count
    );
    match (game, command) {
        (GameType::Blackjack, Some(GameCommand::BlackjackHit)) => {
            move_to_player(motion, player_turn, player_count, true)?;
            motion.dispense_one_card()?;
            move_to_base(motion, player_turn, player_count)?;
            Ok(1)
        }
        (GameType::Uno, Some(GameCommand::UnoDealOnce)) => dispense(motion, rng.random_range(0..=3)),
        (GameType::Uno, Some(GameCommand::UnoDealTwice)) => {
            let first = dispense(motion, rng.random_range(0..=3))?;
            let second = dispense(motion, rng.random_range(0..=3))?;
            Ok(first + second)
        }
        _ => Ok(0),
    }
}

/// Carry out a validated request.
pub fn deal<M: Motion, R: Rng>(
    motion: &mut M,
    rng: &mut R,
    request: &DealRequest,
) -> Result<u32, M::Error> {
    match request.player_turn {
        None => deal_initial(motion, rng, request.game, request.player_count),
        Some(turn) => deal_on_turn(
            motion,
            rng,
            request.game,
            request.player_count,
            turn,
            request.command,
        ),
    }
}
