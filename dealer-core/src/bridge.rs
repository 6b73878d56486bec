//! DealerBridge: connects the controller's event stream to the dealing rig.

use dealer_proto::{Directive, DirectiveError};
use rand::Rng;

use crate::feedback::Feedback;
use crate::input::{EventSource, GadgetEvent, InputError};
use crate::motion::Motion;
use crate::policy;

/// What a processed event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handled {
    /// Indicators updated for a connect or disconnect.
    Lifecycle,
    /// A deal ran and dispensed this many cards.
    Dealt(u32),
    /// A well-formed directive with nothing to do (unknown game or type).
    Ignored,
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError<E> {
    /// Error from the event source.
    Input(InputError),
    /// Malformed directive, dropped.
    Directive(DirectiveError),
    /// Actuator fault. The arm may be left away from base.
    Motion(E),
}

/// Owns the whole gadget: event source, actuators, indicators and the RNG
/// used for random card counts.
///
/// Directives are handled one at a time. A deal runs to completion (with
/// blocking motion) before the next event is read.
pub struct DealerBridge<S, M, F, R> {
    source: S,
    motion: M,
    feedback: F,
    rng: R,
}

impl<S, M, F, R> DealerBridge<S, M, F, R>
where
    S: EventSource,
    M: Motion,
    F: Feedback,
    R: Rng,
{
    /// Create a new bridge.
    pub fn new(source: S, motion: M, feedback: F, rng: R) -> Self {
        Self {
            source,
            motion,
            feedback,
            rng,
        }
    }

    /// Play the startup cue. Indicators are left lit until the source
    /// reports a link change.
    pub fn start(&mut self) {
        self.feedback.startup();
        info!("dealer ready");
    }

    /// Play the shutdown cue.
    pub fn stop(&mut self) {
        info!("dealer shutting down");
        self.feedback.shutdown();
    }

    /// Run the bridge until an actuator fails.
    ///
    /// Input and directive errors are logged and skipped. The motion error
    /// is returned so the caller can treat it as fatal.
    pub async fn run(&mut self) -> M::Error {
        loop {
            match self.process_one().await {
                Ok(_) | Err(BridgeError::Input(_)) | Err(BridgeError::Directive(_)) => {}
                Err(BridgeError::Motion(e)) => return e,
            }
        }
    }

    /// Receive and handle a single event.
    ///
    /// Returns the result of the operation for testing purposes.
    pub async fn process_one(&mut self) -> Result<Handled, BridgeError<M::Error>> {
        match self.source.receive().await {
            Ok(event) => self.handle(event),
            Err(e) => {
                warn!("input error: {:?}", e);
                Err(BridgeError::Input(e))
            }
        }
    }

    /// Handle an already received event.
    pub fn handle(&mut self, event: GadgetEvent) -> Result<Handled, BridgeError<M::Error>> {
        match event {
            GadgetEvent::Connected => {
                info!("controller connected");
                self.feedback.connected();
                Ok(Handled::Lifecycle)
            }
            GadgetEvent::Disconnected => {
                info!("controller disconnected");
                self.feedback.disconnected();
                Ok(Handled::Lifecycle)
            }
            GadgetEvent::Directive(line) => self.handle_payload(&line),
        }
    }

    /// Decode a directive payload and carry it out.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Result<Handled, BridgeError<M::Error>> {
        let request = match Directive::decode(payload).and_then(Directive::into_request) {
            Ok(Some(request)) => request,
            Ok(None) => {
                debug!("directive ignored");
                return Ok(Handled::Ignored);
            }
            Err(e) => {
                warn!("dropping malformed directive: {:?}", e);
                return Err(BridgeError::Directive(e));
            }
        };

        match policy::deal(&mut self.motion, &mut self.rng, &request) {
            Ok(cards) => {
                info!("dealt {} cards", cards);
                Ok(Handled::Dealt(cards))
            }
            Err(e) => {
                error!("actuator fault during deal");
                Err(BridgeError::Motion(e))
            }
        }
    }

    /// Decompose the bridge into its components.
    pub fn into_parts(self) -> (S, M, F, R) {
        (self.source, self.motion, self.feedback, self.rng)
    }
}
