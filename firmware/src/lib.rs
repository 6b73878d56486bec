//! Card dealer firmware for RP2040.
//!
//! Receives deal directives from a serial Bluetooth module and drives the
//! dealer's turn arm and dispense wheel.
//!
//! # Hardware Configuration
//!
//! | Function          | GPIO | Description |
//! |-------------------|------|-------------|
//! | UART1 TX          | 8    | To Bluetooth module RX |
//! | UART1 RX          | 9    | From Bluetooth module TX (directives) |
//! | LINK              | 10   | Bluetooth module status (high = connected) |
//! | TURN STEP / DIR   | 2 / 3 | Turn arm stepper driver |
//! | FEED STEP / DIR   | 4 / 5 | Dispense wheel stepper driver |
//! | DRIVER ENABLE     | 6    | Shared driver enable (active low) |
//! | LED LEFT / RIGHT  | 14 / 15 | Status indicators |
//! | BUZZER            | 16   | Piezo buzzer |
//!
//! # Architecture
//!
//! A single Embassy task owns the whole gadget through a
//! [`DealerBridge`](dealer_core::DealerBridge). It waits asynchronously for
//! the next line or link change, then carries out the directive with
//! blocking motion. Nothing else runs while the dealer moves.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

pub use dealer_core::{
    DealerBridge, EventSource, GadgetEvent, InputError, Rig, StatusFeedback, StepperMotor,
};

pub mod input;

pub use input::UartEventSource;

/// UART baud rate of the Bluetooth module.
pub const BLUETOOTH_BAUDRATE: u32 = 115_200;

/// Heap reserved for directive decoding.
pub const HEAP_SIZE: usize = 8 * 1024;
