//! Binary encoding/decoding.
//!
//! The top-level functions here wrap [`Encoder`] and [`Decoder`] for the
//! common case of one value per buffer. Use the types directly to encode or
//! decode several values back to back.

pub mod decode;
pub mod encode;
pub mod primitives;


pub use decode::{Decode, Decoder, decode_composite, decode_sequence, decode_text, decode_union};
pub use encode::{Encode, Encoder, encode_composite, encode_sequence, encode_text, encode_union};
pub use primitives::{Reader, Writer};

use crate::error::{DecodeError, EncodeError};
use crate::limits::DEFAULT_MAX_DEPTH;

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for encoding.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Initial capacity of the output buffer, in bytes.
    pub capacity: usize,
    /// Maximum nesting of sequences, unions and composites.
    ///
    /// Counted the same way as [`DecodeOptions::max_depth`]; keep the two
    /// equal so every encoded value can be decoded.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            capacity: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Creates default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Presizes the output buffer to `capacity` bytes.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options for decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Byte offset the cursor starts at.
    pub offset: usize,
    /// Maximum nesting of sequences, unions and composites.
    pub max_depth: usize,
    /// Accept input with bytes left after the value.
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_bytes: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts decoding at `offset`.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Accepts (or rejects) bytes left after the value.
    pub fn with_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value into a new buffer.
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    to_bytes_with_options(value, EncodeOptions::default())
}

/// Encodes a value into a new buffer with the given options.
pub fn to_bytes_with_options<T: Encode + ?Sized>(
    value: &T,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(options.capacity);
    encode_with_options(value, &mut buf, &options)?;
    Ok(buf)
}

/// Appends a value's encoding to `buf`, returning the number of bytes written.
///
/// On error `buf` is left as it was.
pub fn encode_into<T: Encode + ?Sized>(value: &T, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
    encode_with_options(value, buf, &EncodeOptions::default())
}

fn encode_with_options<T: Encode + ?Sized>(
    value: &T,
    buf: &mut Vec<u8>,
    options: &EncodeOptions,
) -> Result<usize, EncodeError> {
    let start = buf.len();
    let mut encoder = Encoder::with_options(buf, options);
    if let Err(err) = encoder.encode(value) {
        tracing::debug!(category = ?T::CATEGORY, error = %err, "encode failed");
        return Err(err);
    }
    let written = encoder.len() - start;
    tracing::debug!(category = ?T::CATEGORY, bytes = written, "encoded value");
    Ok(written)
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a value that spans the whole input.
pub fn from_bytes<T: Decode>(data: &[u8]) -> Result<T, DecodeError> {
    from_bytes_with_options(data, &DecodeOptions::default())
}

/// Decodes a value with the given options.
pub fn from_bytes_with_options<T: Decode>(data: &[u8], options: &DecodeOptions) -> Result<T, DecodeError> {
    let mut value = T::default();
    decode_with_options(data, &mut value, options)?;
    Ok(value)
}

/// Decodes a value that spans the whole input into an existing slot.
///
/// On error the slot may be partially overwritten.
pub fn from_bytes_into<T: Decode>(data: &[u8], slot: &mut T) -> Result<(), DecodeError> {
    decode_with_options(data, slot, &DecodeOptions::default())
}

fn decode_with_options<T: Decode>(
    data: &[u8],
    slot: &mut T,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    let result = Decoder::with_options(data, options).and_then(|mut decoder| {
        slot.decode_into(&mut decoder)?;
        if !options.allow_trailing_bytes {
            decoder.finish()?;
        }
        Ok(decoder.position())
    });

    match result {
        Ok(end) => {
            tracing::debug!(
                category = ?T::CATEGORY,
                bytes = end - options.offset,
                "decoded value"
            );
            Ok(())
        }
        Err(err) => {
            tracing::debug!(category = ?T::CATEGORY, error = %err, "decode failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_roundtrip() {
        let value = vec![String::from("alpha"), String::from("beta")];
        let bytes = to_bytes(&value).unwrap();
        let decoded: Vec<String> = from_bytes(&bytes).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn test_capacity_option() {
        let bytes = to_bytes_with_options(&7u64, EncodeOptions::new().with_capacity(64)).unwrap();
        assert_eq!(bytes.len(), 8);
        assert!(bytes.capacity() >= 64);
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = vec![0xFF];
        assert_eq!(encode_into("ab", &mut buf).unwrap(), 3);
        assert_eq!(buf, vec![0xFF, 2, b'a', b'b']);
    }

    #[test]
    fn test_encode_into_error_leaves_buffer() {
        let mut buf = vec![1, 2];
        let long = "y".repeat(256);
        assert!(encode_into(&long, &mut buf).is_err());
        assert_eq!(buf, vec![1, 2]);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = to_bytes(&5u16).unwrap();
        bytes.push(0);
        assert_eq!(
            from_bytes::<u16>(&bytes),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );

        let options = DecodeOptions::new().with_trailing_bytes(true);
        assert_eq!(from_bytes_with_options::<u16>(&bytes, &options).unwrap(), 5);
    }

    #[test]
    fn test_offset_option() {
        let mut bytes = vec![0xAA, 0xBB];
        encode_into(&vec![3u8, 4], &mut bytes).unwrap();
        let options = DecodeOptions::new().with_offset(2);
        let decoded: Vec<u8> = from_bytes_with_options(&bytes, &options).unwrap();
        assert_eq!(decoded, vec![3, 4]);
    }

    #[test]
    fn test_from_bytes_into_slot() {
        let bytes = to_bytes(&Some(String::from("v"))).unwrap();
        let mut slot: Option<String> = None;
        from_bytes_into(&bytes, &mut slot).unwrap();
        assert_eq!(slot.as_deref(), Some("v"));
    }

    #[test]
    fn test_depth_limit_agrees_on_both_sides() {
        // Three levels: outer sequence, inner sequence, option.
        let fits = vec![vec![Some(1u8)]];
        let bytes = to_bytes_with_options(&fits, EncodeOptions::new().with_max_depth(3)).unwrap();
        let options = DecodeOptions::new().with_max_depth(3);
        assert_eq!(from_bytes_with_options::<Vec<Vec<Option<u8>>>>(&bytes, &options).unwrap(), fits);

        let deeper = vec![fits.clone()];
        assert_eq!(
            to_bytes_with_options(&deeper, EncodeOptions::new().with_max_depth(3)),
            Err(EncodeError::DepthExceeded { max: 3 })
        );
        let bytes = to_bytes(&deeper).unwrap();
        assert_eq!(
            from_bytes_with_options::<Vec<Vec<Vec<Option<u8>>>>>(&bytes, &options),
            Err(DecodeError::DepthExceeded { max: 3 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            from_bytes::<u8>(&[]),
            Err(DecodeError::OutOfBounds { needed: 1, remaining: 0, .. })
        ));
    }
}
