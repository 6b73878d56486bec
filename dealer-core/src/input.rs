//! Event source trait and error types.

use core::future::Future;
use dealer_proto::MAX_DIRECTIVE_LEN;

/// One raw directive line, without its terminator.
pub type DirectiveLine = heapless::Vec<u8, MAX_DIRECTIVE_LEN>;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// UART framing error.
    Framing,
    /// Line longer than [`MAX_DIRECTIVE_LEN`]; the rest of it was discarded.
    BufferOverflow,
    /// Source closed.
    Disconnected,
}

/// Something the paired controller did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GadgetEvent {
    /// The controller connected.
    Connected,
    /// The controller disconnected.
    Disconnected,
    /// A control directive payload, still encoded.
    Directive(DirectiveLine),
}

/// Splits a byte stream into directive lines.
///
/// A line longer than [`MAX_DIRECTIVE_LEN`] is discarded up to its newline
/// and reported once as [`InputError::BufferOverflow`], so one bad line does
/// not corrupt the next. Blank lines are skipped. A `\r` directly before the
/// newline is part of the terminator and does not count against the limit.
#[derive(Debug, Default)]
pub struct LineAssembler {
    line: DirectiveLine,
    overflow: bool,
    /// A `\r` held back until we know whether `\n` follows.
    pending_cr: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            line: DirectiveLine::new(),
            overflow: false,
            pending_cr: false,
        }
    }

    /// Feed one byte, returning a line once its terminator arrives.
    pub fn push(&mut self, byte: u8) -> Result<Option<DirectiveLine>, InputError> {
        if byte == b'\n' {
            self.pending_cr = false;
            if core::mem::take(&mut self.overflow) {
                self.line.clear();
                return Err(InputError::BufferOverflow);
            }
            let line = core::mem::take(&mut self.line);
            if line.iter().all(|b| b.is_ascii_whitespace()) {
                return Ok(None);
            }
            return Ok(Some(line));
        }

        // A held `\r` not followed by `\n` is payload
        if core::mem::take(&mut self.pending_cr) {
            self.store(b'\r');
        }
        if byte == b'\r' {
            self.pending_cr = true;
        } else {
            self.store(byte);
        }
        Ok(None)
    }

    fn store(&mut self, byte: u8) {
        if !self.overflow && self.line.push(byte).is_err() {
            self.overflow = true;
        }
    }

    /// Drop any partial line, e.g. after a transport error.
    pub fn reset(&mut self) {
        self.line.clear();
        self.overflow = false;
        self.pending_cr = false;
    }
}

/// Async trait for sources of gadget events.
///
/// Abstracts the transport the controller talks over (UART Bluetooth
/// module, USB CDC, test fixtures).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait EventSource {
    /// Wait for and receive the next event.
    fn receive(&mut self) -> impl Future<Output = Result<GadgetEvent, InputError>>;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn feed(assembler: &mut LineAssembler, bytes: &[u8]) -> Vec<Result<DirectiveLine, InputError>> {
        bytes
            .iter()
            .filter_map(|&b| assembler.push(b).transpose())
            .collect()
    }

    #[test]
    fn test_splits_lines() {
        let mut assembler = LineAssembler::new();
        let lines = feed(&mut assembler, b"{\"a\":1}\n{\"b\":2}\n{\"c\"");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_ref().unwrap().as_slice(), b"{\"a\":1}");
        assert_eq!(lines[1].as_ref().unwrap().as_slice(), b"{\"b\":2}");
    }

    #[test]
    fn test_skips_blank_lines() {
        let mut assembler = LineAssembler::new();
        assert!(feed(&mut assembler, b"\n\r\n  \n").is_empty());
    }

    #[test]
    fn test_overflow_discards_rest_of_line() {
        let mut assembler = LineAssembler::new();
        let mut bytes = Vec::new();
        bytes.resize(MAX_DIRECTIVE_LEN + 10, b'x');
        bytes.push(b'\n');
        bytes.extend_from_slice(b"ok\n");

        let lines = feed(&mut assembler, &bytes);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Err(InputError::BufferOverflow));
        assert_eq!(lines[1].as_ref().unwrap().as_slice(), b"ok");
    }

    #[test]
    fn test_line_of_exactly_max_length_fits() {
        let mut assembler = LineAssembler::new();
        let mut bytes = Vec::new();
        bytes.resize(MAX_DIRECTIVE_LEN, b'y');
        bytes.push(b'\n');
        let lines = feed(&mut assembler, &bytes);
        assert_eq!(lines[0].as_ref().unwrap().len(), MAX_DIRECTIVE_LEN);
    }

    #[test]
    fn test_crlf_terminator_does_not_count_against_limit() {
        let mut assembler = LineAssembler::new();
        let mut bytes = Vec::new();
        bytes.resize(MAX_DIRECTIVE_LEN, b'y');
        bytes.extend_from_slice(b"\r\n");
        let lines = feed(&mut assembler, &bytes);
        assert_eq!(lines.len(), 1);
        let line = lines[0].as_ref().unwrap();
        assert_eq!(line.len(), MAX_DIRECTIVE_LEN);
        assert!(line.iter().all(|&b| b == b'y'));
    }

    #[test]
    fn test_crlf_line_is_returned_without_terminator() {
        let mut assembler = LineAssembler::new();
        let lines = feed(&mut assembler, b"{\"a\":1}\r\n");
        assert_eq!(lines[0].as_ref().unwrap().as_slice(), b"{\"a\":1}");
    }

    #[test]
    fn test_stray_carriage_return_is_kept() {
        let mut assembler = LineAssembler::new();
        let lines = feed(&mut assembler, b"a\rb\n");
        assert_eq!(lines[0].as_ref().unwrap().as_slice(), b"a\rb");
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut assembler = LineAssembler::new();
        feed(&mut assembler, b"partial");
        assembler.reset();
        let lines = feed(&mut assembler, b"next\n");
        assert_eq!(lines[0].as_ref().unwrap().as_slice(), b"next");
    }
}
