//! Decode targets for response bodies.
//!
//! The executor never decodes on its own initiative: a target is passed for
//! the success body and/or the error body, and a missing target means the
//! body is left alone.

use serde::de::DeserializeOwned;

/// Something a raw response body can be decoded into.
pub trait DecodeTarget {
    /// Parse `bytes` as JSON and overwrite `self` with the result.
    /// On failure `self` is left as it was.
    fn decode_into(&mut self, bytes: &[u8]) -> Result<(), serde_json::Error>;
}

impl<T: DeserializeOwned> DecodeTarget for T {
    fn decode_into(&mut self, bytes: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(bytes)?;
        Ok(())
    }
}
