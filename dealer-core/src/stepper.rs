//! Step/dir stepper driver (A4988, DRV8825 and similar boards).
//!
//! Generates step pulses by bit-banging the STEP pin with a blocking delay,
//! so a move returns only after the last pulse has been issued.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::StepperConfig;
use crate::motion::{Motor, SpeedPercent};

/// A stepper motor behind a step/dir driver.
pub struct StepperMotor<P, D> {
    step: P,
    dir: P,
    delay: D,
    config: StepperConfig,
}

impl<P: OutputPin, D: DelayNs> StepperMotor<P, D> {
    /// Create a new stepper from its STEP and DIR pins.
    pub fn new(step: P, dir: P, delay: D, config: StepperConfig) -> Self {
        Self {
            step,
            dir,
            delay,
            config,
        }
    }

    /// Number of step pulses for a rotation of `degrees` (sign ignored).
    #[must_use]
    pub fn steps_for(&self, degrees: f32) -> u32 {
        let steps = libm::fabsf(degrees) * self.config.steps_per_revolution as f32 / 360.0;
        libm::roundf(steps) as u32
    }

    /// Full step period at `speed`, in microseconds.
    ///
    /// Zero speed is treated as one step per second rather than stalling
    /// forever.
    #[must_use]
    pub fn step_period_us(&self, speed: SpeedPercent) -> u32 {
        let percent = speed.get().unsigned_abs() as u32;
        let rate = (self.config.max_steps_per_second * percent / 100).max(1);
        1_000_000 / rate
    }

    /// Release the pins and delay.
    pub fn release(self) -> (P, P, D) {
        (self.step, self.dir, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> Motor for StepperMotor<P, D> {
    type Error = P::Error;

    fn run_for_degrees(&mut self, speed: SpeedPercent, degrees: f32) -> Result<(), P::Error> {
        let steps = self.steps_for(degrees);
        if steps == 0 {
            return Ok(());
        }

        let forward = (degrees < 0.0) == speed.is_reverse();
        if forward != self.config.invert_direction {
            self.dir.set_high()?;
        } else {
            self.dir.set_low()?;
        }

        let period = self.step_period_us(speed);
        let high = self.config.pulse_width_us.min(period);
        let low = period - high;

        for _ in 0..steps {
            self.step.set_high()?;
            self.delay.delay_us(high);
            self.step.set_low()?;
            self.delay.delay_us(low);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::{DISPENSE_STEPPER, TURN_STEPPER};
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Default)]
    struct Trace {
        dir: Vec<bool>,
        rising_edges: u32,
        elapsed_us: u64,
    }

    type Shared = Rc<RefCell<Trace>>;

    struct StepPin {
        trace: Shared,
        high: bool,
    }

    impl ErrorType for StepPin {
        type Error = Infallible;
    }

    impl OutputPin for StepPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.high {
                self.trace.borrow_mut().rising_edges += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    struct DirPin {
        trace: Shared,
    }

    impl ErrorType for DirPin {
        type Error = Infallible;
    }

    impl OutputPin for DirPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.trace.borrow_mut().dir.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.trace.borrow_mut().dir.push(true);
            Ok(())
        }
    }

    enum Pin {
        Step(StepPin),
        Dir(DirPin),
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            match self {
                Pin::Step(p) => p.set_low(),
                Pin::Dir(p) => p.set_low(),
            }
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            match self {
                Pin::Step(p) => p.set_high(),
                Pin::Dir(p) => p.set_high(),
            }
        }
    }

    struct Clock {
        trace: Shared,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.trace.borrow_mut().elapsed_us += u64::from(ns / 1_000);
        }

        fn delay_us(&mut self, us: u32) {
            self.trace.borrow_mut().elapsed_us += u64::from(us);
        }
    }

    fn stepper(config: StepperConfig) -> (StepperMotor<Pin, Clock>, Shared) {
        let trace: Shared = Rc::new(RefCell::new(Trace::default()));
        let motor = StepperMotor::new(
            Pin::Step(StepPin {
                trace: trace.clone(),
                high: false,
            }),
            Pin::Dir(DirPin {
                trace: trace.clone(),
            }),
            Clock {
                trace: trace.clone(),
            },
            config,
        );
        (motor, trace)
    }

    #[test]
    fn test_steps_for_rounds_to_nearest() {
        let (motor, _) = stepper(DISPENSE_STEPPER);
        // 1600 steps per revolution
        assert_eq!(motor.steps_for(360.0), 1600);
        assert_eq!(motor.steps_for(-180.0), 800);
        assert_eq!(motor.steps_for(72.0), 320);
        assert_eq!(motor.steps_for(0.1), 0);
        assert_eq!(motor.steps_for(0.2), 1);
    }

    #[test]
    fn test_run_emits_one_pulse_per_step() {
        let (mut motor, trace) = stepper(TURN_STEPPER);
        motor.run_for_degrees(SpeedPercent::new(15), -60.0).unwrap();
        // 4800 steps per revolution -> 800 for 60 degrees
        assert_eq!(trace.borrow().rising_edges, 800);
    }

    #[test]
    fn test_direction_follows_degrees_and_speed_sign() {
        let (mut motor, trace) = stepper(DISPENSE_STEPPER);
        motor.run_for_degrees(SpeedPercent::new(50), 90.0).unwrap();
        motor.run_for_degrees(SpeedPercent::new(50), -90.0).unwrap();
        motor.run_for_degrees(SpeedPercent::new(-50), 90.0).unwrap();
        motor.run_for_degrees(SpeedPercent::new(-50), -90.0).unwrap();
        assert_eq!(trace.borrow().dir, [true, false, false, true]);
    }

    #[test]
    fn test_inverted_direction() {
        let config = StepperConfig {
            invert_direction: true,
            ..DISPENSE_STEPPER
        };
        let (mut motor, trace) = stepper(config);
        motor.run_for_degrees(SpeedPercent::new(50), 90.0).unwrap();
        assert_eq!(trace.borrow().dir, [false]);
    }

    #[test]
    fn test_zero_rotation_touches_no_pins() {
        let (mut motor, trace) = stepper(TURN_STEPPER);
        motor.run_for_degrees(SpeedPercent::new(15), 0.0).unwrap();
        assert!(trace.borrow().dir.is_empty());
        assert_eq!(trace.borrow().rising_edges, 0);
        assert_eq!(trace.borrow().elapsed_us, 0);
    }

    #[test]
    fn test_duration_scales_with_speed() {
        let (mut motor, trace) = stepper(DISPENSE_STEPPER);
        // 50% of 4000 steps/s = 2000 steps/s = 500us per step
        motor.run_for_rotations(SpeedPercent::new(50), 1.0).unwrap();
        assert_eq!(trace.borrow().elapsed_us, 1600 * 500);
    }

    #[test]
    fn test_zero_speed_still_moves() {
        let (motor, _) = stepper(DISPENSE_STEPPER);
        assert_eq!(motor.step_period_us(SpeedPercent::new(0)), 1_000_000);
    }

    #[test]
    fn test_release_returns_step_and_dir_pins() {
        let (motor, _) = stepper(TURN_STEPPER);
        let (step, dir, _clock) = motor.release();
        assert!(matches!(step, Pin::Step(_)));
        assert!(matches!(dir, Pin::Dir(_)));
    }
}
