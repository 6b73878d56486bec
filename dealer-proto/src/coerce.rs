//! Field adapters for the loosely typed payloads the voice skill sends.
//!
//! Slot values arrive as strings (`"3"`) from some intents and as numbers
//! from others, so counts accept both. Tokens that don't match a known
//! variant decode to `None` instead of failing the whole directive.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Deserializer, Unexpected, Visitor};

use crate::types::Token;

/// Deserialize a `u8` count from a JSON number or an integer string.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CountVisitor)
}

struct CountVisitor;

impl Visitor<'_> for CountVisitor {
    type Value = u8;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a count as an integer or integer string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u8, E> {
        u8::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u8, E> {
        u8::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    /// Floats truncate toward zero, as the skill's own `int()` does.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u8, E> {
        if v.is_finite() && v > -1.0 && v < 256.0 {
            Ok(v as u8)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u8, E> {
        v.trim()
            .parse::<u8>()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// Deserialize a token string, mapping unknown tokens to `None`.
///
/// The field itself is still required: a missing key fails decoding.
pub(crate) fn token<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Token,
{
    deserializer.deserialize_str(TokenVisitor(PhantomData))
}

struct TokenVisitor<T>(PhantomData<T>);

impl<T: Token> Visitor<'_> for TokenVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a token string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<T>, E> {
        Ok(T::from_token(v))
    }
}
