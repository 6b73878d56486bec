//! Status indicators and audio cues.
//!
//! The dealer has two status LEDs (left and right) and a piezo buzzer.
//! Both LEDs are lit while a controller is connected. Startup and shutdown
//! play short jingles.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// A musical note, as a frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note(pub u16);

impl Note {
    pub const C4: Self = Self(262);
    pub const D4: Self = Self(294);
    pub const E5: Self = Self(659);
}

/// Note length at 120 bpm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Length {
    Quarter,
    Eighth,
}

impl Length {
    /// Duration in milliseconds.
    #[inline]
    #[must_use]
    pub const fn ms(self) -> u32 {
        match self {
            Length::Quarter => 500,
            Length::Eighth => 250,
        }
    }
}

/// Silence between consecutive notes.
pub const NOTE_GAP_MS: u32 = 50;

/// Played once the dealer is ready.
pub const STARTUP_JINGLE: &[(Note, Length)] = &[
    (Note::C4, Length::Eighth),
    (Note::D4, Length::Eighth),
    (Note::E5, Length::Quarter),
];

/// Played when the dealer shuts down.
pub const SHUTDOWN_JINGLE: &[(Note, Length)] = &[(Note::E5, Length::Eighth), (Note::C4, Length::Eighth)];

/// Lifecycle cues the bridge triggers.
pub trait Feedback {
    /// Signal that the dealer has booted.
    fn startup(&mut self);

    /// Signal that the dealer is going down.
    fn shutdown(&mut self);

    /// A controller paired and connected.
    fn connected(&mut self);

    /// The controller went away.
    fn disconnected(&mut self);
}

/// Two LEDs and a buzzer driven from GPIO.
///
/// Tones are square waves bit-banged on the buzzer pin, so playing a jingle
/// blocks for its full length. Pin errors are ignored: a dead LED must not
/// stop the dealer.
pub struct StatusFeedback<P, D> {
    left: P,
    right: P,
    buzzer: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> StatusFeedback<P, D> {
    pub fn new(left: P, right: P, buzzer: P, delay: D) -> Self {
        Self {
            left,
            right,
            buzzer,
            delay,
        }
    }

    /// Set both indicators on or off.
    pub fn set_indicators(&mut self, on: bool) {
        if on {
            let _ = self.left.set_high();
            let _ = self.right.set_high();
        } else {
            let _ = self.left.set_low();
            let _ = self.right.set_low();
        }
    }

    /// Play a sequence of notes, blocking until done.
    pub fn play(&mut self, jingle: &[(Note, Length)]) {
        for (i, &(note, length)) in jingle.iter().enumerate() {
            if i > 0 {
                self.delay.delay_ms(NOTE_GAP_MS);
            }
            self.tone(note, length.ms());
        }
    }

    fn tone(&mut self, note: Note, ms: u32) {
        let hz = u32::from(note.0.max(1));
        let half_period_us = 500_000 / hz;
        let cycles = hz * ms / 1_000;
        for _ in 0..cycles {
            let _ = self.buzzer.set_high();
            self.delay.delay_us(half_period_us);
            let _ = self.buzzer.set_low();
            self.delay.delay_us(half_period_us);
        }
    }

    /// Release the pins and delay.
    pub fn release(self) -> (P, P, P, D) {
        (self.left, self.right, self.buzzer, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> Feedback for StatusFeedback<P, D> {
    fn startup(&mut self) {
        self.set_indicators(false);
        self.play(STARTUP_JINGLE);
        self.set_indicators(true);
    }

    fn shutdown(&mut self) {
        self.play(SHUTDOWN_JINGLE);
        self.set_indicators(false);
    }

    fn connected(&mut self) {
        self.set_indicators(true);
    }

    fn disconnected(&mut self) {
        self.set_indicators(false);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Default)]
    struct Board {
        left: bool,
        right: bool,
        buzzer_edges: u32,
        elapsed_us: u64,
        history: Vec<(bool, bool)>,
    }

    type Shared = Rc<RefCell<Board>>;

    #[derive(Clone, Copy)]
    enum Which {
        Left,
        Right,
        Buzzer,
    }

    struct MockPin {
        which: Which,
        board: Shared,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl MockPin {
        fn set(&mut self, high: bool) {
            let mut board = self.board.borrow_mut();
            match self.which {
                Which::Left => board.left = high,
                Which::Right => {
                    board.right = high;
                    let state = (board.left, board.right);
                    board.history.push(state);
                }
                Which::Buzzer => {
                    if high {
                        board.buzzer_edges += 1;
                    }
                }
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.set(true);
            Ok(())
        }
    }

    struct Clock {
        board: Shared,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.board.borrow_mut().elapsed_us += u64::from(ns / 1_000);
        }

        fn delay_us(&mut self, us: u32) {
            self.board.borrow_mut().elapsed_us += u64::from(us);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.board.borrow_mut().elapsed_us += u64::from(ms) * 1_000;
        }
    }

    fn feedback() -> (StatusFeedback<MockPin, Clock>, Shared) {
        let board: Shared = Rc::new(RefCell::new(Board::default()));
        let pin = |which| MockPin {
            which,
            board: board.clone(),
        };
        let fb = StatusFeedback::new(
            pin(Which::Left),
            pin(Which::Right),
            pin(Which::Buzzer),
            Clock {
                board: board.clone(),
            },
        );
        (fb, board)
    }

    #[test]
    fn test_connect_and_disconnect_toggle_both_indicators() {
        let (mut fb, board) = feedback();
        fb.connected();
        assert!(board.borrow().left && board.borrow().right);
        fb.disconnected();
        assert!(!board.borrow().left && !board.borrow().right);
    }

    #[test]
    fn test_startup_goes_dark_then_lights_up() {
        let (mut fb, board) = feedback();
        fb.startup();
        let board = board.borrow();
        assert_eq!(board.history, [(false, false), (true, true)]);
        assert!(board.buzzer_edges > 0);
    }

    #[test]
    fn test_shutdown_ends_dark() {
        let (mut fb, board) = feedback();
        fb.connected();
        fb.shutdown();
        assert!(!board.borrow().left && !board.borrow().right);
    }

    #[test]
    fn test_release_keeps_indicator_state() {
        let (mut fb, board) = feedback();
        fb.connected();
        let (mut left, _right, _buzzer, _clock) = fb.release();
        left.set_low().unwrap();
        assert!(!board.borrow().left);
        assert!(board.borrow().right);
    }

    #[test]
    fn test_jingle_length() {
        let (mut fb, board) = feedback();
        fb.play(SHUTDOWN_JINGLE);
        let board = board.borrow();
        // E5 for 250ms: 164 cycles, C4 for 250ms: 65 cycles
        assert_eq!(board.buzzer_edges, 164 + 65);
        let expected = 164 * 2 * (500_000 / 659) + 50_000 + 65 * 2 * (500_000 / 262);
        assert_eq!(board.elapsed_us, expected);
    }
}
