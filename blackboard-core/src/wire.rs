//! Fixed-width wire format.
//!
//! Every frame on every channel is one signed 32-bit integer in little-endian
//! byte order. There is no length prefix and no header: a frame is complete
//! exactly when [`WIRE_WIDTH`] bytes have arrived.

use crate::error::{Error, Result};

/// The integer type stored in cells and carried in frames.
pub type Value = i32;

/// Size of one frame in bytes.
pub const WIRE_WIDTH: usize = std::mem::size_of::<Value>();

/// Default acknowledgment token returned to a writer after its value is stored.
pub const ACK: Value = 1;

/// Poll value readers send. The arbiter ignores the content.
pub const READ_REQUEST: Value = 999;

/// Encodes a value into its wire representation.
#[inline]
#[must_use]
pub const fn encode(value: Value) -> [u8; WIRE_WIDTH] {
    value.to_le_bytes()
}

/// Decodes a value from the first [`WIRE_WIDTH`] bytes of `buf`.
///
/// # Errors
/// Returns `BufferTooShort` if fewer than [`WIRE_WIDTH`] bytes are available.
#[inline]
pub fn decode(buf: &[u8]) -> Result<Value> {
    let bytes: [u8; WIRE_WIDTH] = buf
        .get(..WIRE_WIDTH)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::BufferTooShort {
            required: WIRE_WIDTH,
            available: buf.len(),
        })?;
    Ok(Value::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_width_is_pinned() {
        assert_eq!(WIRE_WIDTH, 4);
    }

    #[test]
    fn test_encode_is_little_endian() {
        assert_eq!(encode(1), [1, 0, 0, 0]);
        assert_eq!(encode(999), [0xE7, 0x03, 0, 0]);
        assert_eq!(encode(-1), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[7, 0, 0, 0, 9, 9]).unwrap(), 7);
    }

    #[test]
    fn test_decode_short_buffer() {
        let err = decode(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferTooShort {
                required: 4,
                available: 2
            }
        );
    }
}
