//! Platform-agnostic dealing logic, motion primitives and traits for the
//! card dealer gadget.
//!
//! This crate holds everything that does not depend on a particular chip.
//! It builds for embedded `no_std` targets and on the host for testing.
//!
//! # Overview
//!
//! - [`policy`]: which seats to visit and how many cards to dispense
//!   ([`deal_initial`], [`deal_on_turn`], [`deal`])
//! - [`motion`]: the [`Motor`] and [`Motion`] traits and the [`Rig`] owning
//!   both actuators
//! - [`stepper`]: [`StepperMotor`], a [`Motor`] for step/dir driver boards
//! - [`feedback`]: status LEDs and buzzer cues ([`StatusFeedback`])
//! - [`input`]: the [`EventSource`] trait
//! - [`bridge`]: ties a source, a rig and the feedback together
//!   ([`DealerBridge`])
//! - [`config`]: calibrated speeds, settle delays and drive train constants
//!
//! # Control Flow
//!
//! ```text
//! EventSource ──> DealerBridge ──> Directive::decode ──> policy::deal ──> Rig ──> Motor
//!                       └──────> Feedback (connect / disconnect)
//! ```
//!
//! Each motion blocks until the hardware has finished. A deal runs to
//! completion before the next event is read.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Log through the `log` facade (for host builds)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod bridge;
pub mod config;
pub mod feedback;
pub mod input;
pub mod motion;
pub mod policy;
pub mod stepper;

// Re-export main types at crate root
pub use bridge::{BridgeError, DealerBridge, Handled};
pub use config::{RigConfig, StepperConfig, DEFAULT_RIG_CONFIG, DISPENSE_STEPPER, TURN_STEPPER};
pub use feedback::{Feedback, StatusFeedback};
pub use input::{DirectiveLine, EventSource, GadgetEvent, InputError, LineAssembler};
pub use motion::{Motion, Motor, Rig, SpeedPercent};
pub use policy::{deal, deal_initial, deal_on_turn, seat_angle};
pub use stepper::StepperMotor;

pub use dealer_proto::{
    DealRequest, Directive, DirectiveError, GameCommand, GameType, MAX_DIRECTIVE_LEN,
};
