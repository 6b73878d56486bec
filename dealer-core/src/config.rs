//! Compile-time configuration for the actuator rig and stepper drive trains.
//!
//! The settle delays and dispense strokes were calibrated on the physical
//! dealer. Changing them changes how cards leave the tray.

use crate::motion::SpeedPercent;

/// Speeds and settle delays used by the rig and the dealing policy.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigConfig {
    /// Turn arm speed.
    pub turn_speed: SpeedPercent,
    /// Dispense wheel speed (magnitude; stroke direction sets the sign).
    pub dispense_speed: SpeedPercent,
    /// Pause after arriving at a seat, before dispensing.
    pub seat_settle_ms: u32,
    /// Pause before swinging back to base.
    pub base_settle_ms: u32,
    /// Pause between dispense strokes.
    pub stroke_pause_ms: u32,
}

/// Rig configuration matching the calibrated dealer.
pub const DEFAULT_RIG_CONFIG: RigConfig = RigConfig {
    turn_speed: SpeedPercent::new(15),
    dispense_speed: SpeedPercent::new(50),
    seat_settle_ms: 250,
    base_settle_ms: 500,
    stroke_pause_ms: 250,
};

/// Dispense strokes in wheel rotations: grip (reverse), push (reverse),
/// eject (forward). Negative is reverse.
pub const DISPENSE_STROKES: [f32; 3] = [-0.5, -0.2, 0.7];

/// Drive train parameters for a step/dir stepper driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperConfig {
    /// Full steps times microstepping, per output shaft revolution
    /// (including any gearing).
    pub steps_per_revolution: u32,
    /// Step rate at 100% speed.
    pub max_steps_per_second: u32,
    /// Swap the meaning of the direction pin.
    pub invert_direction: bool,
    /// Width of the high part of each step pulse.
    pub pulse_width_us: u32,
}

/// 200-step motor at 1/8 microstepping with a 3:1 reduction, as on the turn arm.
pub const TURN_STEPPER: StepperConfig = StepperConfig {
    steps_per_revolution: 200 * 8 * 3,
    max_steps_per_second: 8_000,
    invert_direction: false,
    pulse_width_us: 2,
};

/// 200-step motor at 1/8 microstepping, direct drive, as on the dispense wheel.
pub const DISPENSE_STEPPER: StepperConfig = StepperConfig {
    steps_per_revolution: 200 * 8,
    max_steps_per_second: 4_000,
    invert_direction: false,
    pulse_width_us: 2,
};
