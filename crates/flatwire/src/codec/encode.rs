//! Encoder: appends a value's binary form to a byte buffer.
//!
//! Implements the encode rule for each category (wire layout in the crate docs).

use crate::codec::EncodeOptions;
use crate::codec::primitives::Writer;
use crate::dispatch::{Classify, Composite, TaggedUnion, Visitor, Wire};
use crate::error::EncodeError;
use crate::limits::{DEFAULT_MAX_DEPTH, MAX_DISCRIMINANT};

/// A type that can be appended to an [`Encoder`].
pub trait Encode: Classify {
    /// Appends this value's encoding.
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError>;
}

/// Encoding state: the buffer being appended to and the current nesting
/// depth.
///
/// Depth is counted exactly as [`Decoder`](crate::codec::Decoder) counts it,
/// so anything this encoder accepts under a limit decodes under the same
/// limit.
#[derive(Debug)]
pub struct Encoder<'a> {
    writer: Writer<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder appending to `buf` with default limits.
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self {
            writer: Writer::new(buf),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates an encoder appending to `buf` with the given limits.
    pub fn with_options(buf: &'a mut Vec<u8>, options: &EncodeOptions) -> Self {
        Self {
            writer: Writer::new(buf),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Encodes `value` and returns the encoder for chaining.
    ///
    /// On error the buffer is restored to its length before this call.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self, EncodeError> {
        let start = self.writer.len();
        if let Err(err) = value.encode(self) {
            self.writer.truncate(start);
            return Err(err);
        }
        Ok(self)
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    /// Returns true if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    /// Raw byte access for hand-written [`Encode`] impls.
    pub fn writer(&mut self) -> &mut Writer<'a> {
        &mut self.writer
    }

    /// Runs `f` one nesting level deeper.
    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        if self.depth >= self.max_depth {
            return Err(EncodeError::DepthExceeded { max: self.max_depth });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl Visitor for Encoder<'_> {
    type Error = EncodeError;

    #[inline]
    fn field<T: Wire>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.encode(self)
    }
}

// =============================================================================
// CATEGORY RULES
// =============================================================================

/// Text: length prefix, then the raw bytes.
pub fn encode_text(encoder: &mut Encoder<'_>, text: &str) -> Result<(), EncodeError> {
    encoder.writer.write_len_prefix(text.len(), "text")?;
    encoder.writer.write_bytes(text.as_bytes());
    Ok(())
}

/// Sequence: element count, then each element.
pub fn encode_sequence<T: Encode>(encoder: &mut Encoder<'_>, items: &[T]) -> Result<(), EncodeError> {
    encoder.writer.write_len_prefix(items.len(), "sequence")?;
    encoder.nested(|encoder| {
        for item in items {
            item.encode(encoder)?;
        }
        Ok(())
    })
}

/// Tagged union: discriminant byte, then the active payload.
pub fn encode_union<U: TaggedUnion>(encoder: &mut Encoder<'_>, value: &U) -> Result<(), EncodeError> {
    let discriminant = value.discriminant();
    let tag = u8::try_from(discriminant).map_err(|_| EncodeError::DiscriminantExceedsLimit {
        discriminant,
        max: MAX_DISCRIMINANT,
    })?;
    encoder.writer.write_byte(tag);
    encoder.nested(|encoder| value.visit_payload(encoder))
}

/// Composite: each field in hook order, no framing.
pub fn encode_composite<C: Composite>(encoder: &mut Encoder<'_>, value: &C) -> Result<(), EncodeError> {
    encoder.nested(|encoder| value.visit(encoder))
}

// =============================================================================
// BUILT-IN TYPES
// =============================================================================

macro_rules! encode_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
                    encoder.writer.write_bytes(&self.to_ne_bytes());
                    Ok(())
                }
            }
        )*
    };
}

encode_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Encode for bool {
    #[inline]
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encoder.writer.write_byte(u8::from(*self));
        Ok(())
    }
}

impl Encode for str {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_text(encoder, self)
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_text(encoder, self)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_sequence(encoder, self)
    }
}

impl<T: Wire> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_union(encoder, self)
    }
}

impl Encode for () {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        encode_composite(encoder, self)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}
