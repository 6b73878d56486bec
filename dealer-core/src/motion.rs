//! Motion primitives: the motor trait, the primitive set the dealing policy
//! drives, and the [`Rig`] that owns both actuators.
//!
//! Every call blocks until the actuator has finished moving. The dealer is
//! a physical machine; issuing the next command before the previous motion
//! settles makes the arm overshoot or the wheel double-feed.

use embedded_hal::delay::DelayNs;

use crate::config::{RigConfig, DEFAULT_RIG_CONFIG, DISPENSE_STROKES};

/// Motor speed as a signed percentage of full speed, clamped to `-100..=100`.
///
/// A negative speed runs the motor backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedPercent(i8);

impl SpeedPercent {
    /// Full speed forward.
    pub const MAX: Self = Self(100);

    /// Create a speed, clamping to the valid range.
    #[inline]
    #[must_use]
    pub const fn new(percent: i8) -> Self {
        let clamped = if percent > 100 {
            100
        } else if percent < -100 {
            -100
        } else {
            percent
        };
        Self(clamped)
    }

    /// Get the raw percentage.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }

    /// The same speed in the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self(-self.0)
    }

    /// Whether this speed runs the motor backwards.
    #[inline]
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        self.0 < 0
    }
}

/// A position-controlled motor.
pub trait Motor {
    /// Driver error type.
    type Error;

    /// Rotate by `degrees` at `speed`, blocking until the motion completes.
    ///
    /// The direction is the sign of `degrees` times the sign of `speed`, so a
    /// reverse speed with positive degrees turns backwards.
    fn run_for_degrees(&mut self, speed: SpeedPercent, degrees: f32) -> Result<(), Self::Error>;

    /// Rotate by whole or fractional shaft rotations.
    fn run_for_rotations(&mut self, speed: SpeedPercent, rotations: f32) -> Result<(), Self::Error> {
        self.run_for_degrees(speed, rotations * 360.0)
    }
}

/// The blocking primitives the dealing policy is written against.
pub trait Motion {
    /// Error raised by the underlying actuators.
    type Error;

    /// Rotate the turn arm by a signed angle at the configured turn speed.
    fn rotate_turn_arm(&mut self, degrees: f32) -> Result<(), Self::Error>;

    /// Push one card out of the tray.
    fn dispense_one_card(&mut self) -> Result<(), Self::Error>;

    /// Wait for the mechanism to settle.
    fn settle(&mut self, ms: u32);

    /// Rig configuration (settle delays and speeds).
    fn config(&self) -> &RigConfig;
}

/// Owned actuator context: the turn arm, the dispense wheel and the delay
/// used for settle pauses.
pub struct Rig<M, D> {
    turn: M,
    dispense: M,
    delay: D,
    config: RigConfig,
}

impl<M: Motor, D: DelayNs> Rig<M, D> {
    /// Create a rig with the calibrated default configuration.
    pub fn new(turn: M, dispense: M, delay: D) -> Self {
        Self::with_config(turn, dispense, delay, DEFAULT_RIG_CONFIG)
    }

    /// Create a rig with a custom configuration.
    pub fn with_config(turn: M, dispense: M, delay: D, config: RigConfig) -> Self {
        Self {
            turn,
            dispense,
            delay,
            config,
        }
    }

    /// Release the motors and delay.
    pub fn release(self) -> (M, M, D) {
        (self.turn, self.dispense, self.delay)
    }
}

impl<M: Motor, D: DelayNs> Motion for Rig<M, D> {
    type Error = M::Error;

    fn rotate_turn_arm(&mut self, degrees: f32) -> Result<(), M::Error> {
        trace!("turn arm {} deg", degrees);
        self.turn.run_for_degrees(self.config.turn_speed, degrees)
    }

    fn dispense_one_card(&mut self) -> Result<(), M::Error> {
        let speed = self.config.dispense_speed;
        let [grip, push, eject] = DISPENSE_STROKES;

        // Reverse strokes are expressed as reverse speed, as the motors expect
        self.dispense.run_for_rotations(speed.reversed(), -grip)?;
        self.delay.delay_ms(self.config.stroke_pause_ms);
        self.dispense.run_for_rotations(speed.reversed(), -push)?;
        self.delay.delay_ms(self.config.stroke_pause_ms);
        self.dispense.run_for_rotations(speed, eject)
    }

    fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn config(&self) -> &RigConfig {
        &self.config
    }
}
