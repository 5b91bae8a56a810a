//! Fixed-width value framing codec.
//!
//! Frame format: `[4-byte signed integer (little-endian)]`. Partial frames
//! stay buffered until the remaining bytes arrive; a stream that ends with a
//! partial frame buffered is an error.

use crate::error::TransportError;
use blackboard_core::Value;
use blackboard_core::wire::{self, WIRE_WIDTH};
use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Codec turning a byte stream into a stream of [`Value`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueCodec;

impl ValueCodec {
    /// Creates a new value codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ValueCodec {
    type Item = Value;
    type Error = TransportError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < WIRE_WIDTH {
            src.reserve(WIRE_WIDTH - src.len());
            return Ok(None);
        }

        let value = wire::decode(&src[..])?;
        src.advance(WIRE_WIDTH);
        Ok(Some(value))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(value) => Ok(Some(value)),
            None if src.is_empty() => Ok(None),
            None => Err(TransportError::truncated_frame(src.len(), WIRE_WIDTH)),
        }
    }
}

impl Encoder<Value> for ValueCodec {
    type Error = TransportError;

    fn encode(&mut self, item: Value, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&wire::encode(item));
        Ok(())
    }
}
