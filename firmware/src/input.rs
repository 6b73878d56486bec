//! UART event source for the serial Bluetooth module.
//!
//! Directives arrive as newline-terminated JSON lines on UART1. The module's
//! status pin goes high while a controller is connected; edges on it become
//! connect/disconnect events.
//!
//! # Pins
//!
//! - GPIO 8: TX
//! - GPIO 9: RX
//! - GPIO 10: LINK

use dealer_core::{EventSource, GadgetEvent, InputError, LineAssembler};
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_rp::uart::{Async, Error as UartError, UartRx};

/// Convert UART errors to [`InputError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `InputError` are defined in external crates).
#[inline]
fn uart_error_to_input_error(e: UartError) -> InputError {
    match e {
        UartError::Framing => InputError::Framing,
        UartError::Overrun => InputError::BufferOverflow,
        _ => InputError::Io,
    }
}

/// Event source reading directives from UART and link state from a pin.
pub struct UartEventSource<'d> {
    rx: UartRx<'d, Async>,
    link: Input<'d>,
    lines: LineAssembler,
    /// Link state last reported to the bridge.
    connected: bool,
}

impl<'d> UartEventSource<'d> {
    /// Create a new source from the UART receiver and the link status pin.
    ///
    /// Starts out disconnected, so a module that is already linked at boot
    /// produces a `Connected` event on the first receive.
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>, link: Input<'d>) -> Self {
        Self {
            rx,
            link,
            lines: LineAssembler::new(),
            connected: false,
        }
    }

    /// Report a link change since the last event, if any.
    fn link_change(&mut self) -> Option<GadgetEvent> {
        let linked = self.link.is_high();
        if linked == self.connected {
            return None;
        }
        self.connected = linked;
        Some(if linked {
            GadgetEvent::Connected
        } else {
            GadgetEvent::Disconnected
        })
    }
}

impl EventSource for UartEventSource<'_> {
    async fn receive(&mut self) -> Result<GadgetEvent, InputError> {
        let mut byte = [0u8; 1];

        loop {
            if let Some(event) = self.link_change() {
                return Ok(event);
            }

            match select(self.rx.read(&mut byte), self.link.wait_for_any_edge()).await {
                Either::First(Ok(())) => {
                    if let Some(line) = self.lines.push(byte[0])? {
                        return Ok(GadgetEvent::Directive(line));
                    }
                }
                Either::First(Err(e)) => {
                    self.lines.reset();
                    return Err(uart_error_to_input_error(e));
                }
                // Re-check the level at the top of the loop
                Either::Second(()) => {}
            }
        }
    }
}
