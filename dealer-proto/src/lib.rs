//! Directive types, token mapping and payload decoding for the card dealer.
//!
//! The dealer receives control directives from its paired voice skill as
//! JSON objects. This crate turns those payloads into typed values:
//!
//! - **Types**: [`GameType`] and [`GameCommand`], each mapped from a single
//!   canonical token through the [`Token`] trait
//! - **Decoding**: [`Directive::decode`] parses a payload into a [`Directive`]
//! - **Requests**: [`DealRequest`] is a validated deal order, built with
//!   [`Directive::into_request`]
//!
//! # Payload Format
//!
//! ```text
//! {"type":"deal-initial","game":"blackjack","playerCount":"3"}
//! {"type":"deal-turn","game":"uno","playerCount":"3","playerTurn":"2","gameCommand":"deal once"}
//! ```
//!
//! Counts may be JSON integers or integer strings. Unknown game and command
//! tokens are not errors; they decode to `None` and the dealer ignores them.
//!
//! # Example
//!
//! ```
//! use dealer_proto::{DealRequest, Directive, GameType};
//!
//! let payload = br#"{"type":"deal-initial","game":"uno","playerCount":"4"}"#;
//! let directive = Directive::decode(payload).unwrap();
//! let request = directive.into_request().unwrap().unwrap();
//! assert_eq!(request, DealRequest::initial(GameType::Uno, 4).unwrap());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default but needs `alloc`: `serde_json`
//! buffers internally tagged objects while decoding.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod coerce;
pub mod directive;
pub mod error;
pub mod request;
pub mod types;

pub use directive::{Directive, MAX_DIRECTIVE_LEN};
pub use error::DirectiveError;
pub use request::DealRequest;
pub use types::{GameCommand, GameType, Token};
