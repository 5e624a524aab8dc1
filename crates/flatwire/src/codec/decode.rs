//! Decoder: rebuilds values from a cursor over a byte buffer.
//!
//! Every read is bounds-checked. Any failure aborts the whole decode; the slot
//! being decoded into may be partially overwritten and must be discarded.

use crate::codec::DecodeOptions;
use crate::codec::primitives::Reader;
use crate::dispatch::{Classify, Composite, TaggedUnion, VisitorMut, Wire};
use crate::error::DecodeError;
use crate::limits::DEFAULT_MAX_DEPTH;

/// A type that can be decoded into an existing slot.
pub trait Decode: Classify + Default {
    /// Overwrites `self` with the value at the decoder's cursor.
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError>;
}

/// Decoding state: the cursor and the current nesting depth.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    reader: Reader<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder at the start of `data` with default limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a decoder at `options.offset` with the given limits.
    pub fn with_options(data: &'a [u8], options: &DecodeOptions) -> Result<Self, DecodeError> {
        Ok(Self {
            reader: Reader::at(data, options.offset)?,
            depth: 0,
            max_depth: options.max_depth,
        })
    }

    /// Returns the cursor position.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Returns the number of bytes after the cursor.
    pub fn remaining_len(&self) -> usize {
        self.reader.remaining_len()
    }

    /// Returns true if the cursor is at the end of the data.
    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }

    /// Decodes into `slot` and returns the decoder for chaining.
    pub fn decode_into<T: Decode>(&mut self, slot: &mut T) -> Result<&mut Self, DecodeError> {
        slot.decode_into(self)?;
        Ok(self)
    }

    /// Decodes a fresh value, starting from `T::default()`.
    pub fn decode<T: Decode>(&mut self) -> Result<T, DecodeError> {
        let mut value = T::default();
        value.decode_into(self)?;
        Ok(value)
    }

    /// Fails if any bytes remain after the cursor.
    pub fn finish(&self) -> Result<(), DecodeError> {
        match self.reader.remaining_len() {
            0 => Ok(()),
            remaining => Err(DecodeError::TrailingBytes { remaining }),
        }
    }

    /// Raw byte access for hand-written [`Decode`] impls.
    pub fn reader(&mut self) -> &mut Reader<'a> {
        &mut self.reader
    }

    /// Runs `f` one nesting level deeper.
    fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthExceeded { max: self.max_depth });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl VisitorMut for Decoder<'_> {
    type Error = DecodeError;

    #[inline]
    fn field<T: Wire>(&mut self, value: &mut T) -> Result<(), DecodeError> {
        value.decode_into(self)
    }
}

// =============================================================================
// CATEGORY RULES
// =============================================================================

/// Text: length prefix, then that many UTF-8 bytes.
pub fn decode_text(decoder: &mut Decoder<'_>, slot: &mut String) -> Result<(), DecodeError> {
    let len = decoder.reader.read_len_prefix("text length")?;
    let bytes = decoder.reader.read_bytes(len, "text")?;
    let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { context: "text" })?;
    slot.clear();
    slot.push_str(text);
    Ok(())
}

/// Sequence: element count, then each element into its slot.
///
/// The target is resized to the decoded count; existing elements are reused
/// as slots.
pub fn decode_sequence<T: Decode>(decoder: &mut Decoder<'_>, slot: &mut Vec<T>) -> Result<(), DecodeError> {
    let len = decoder.reader.read_len_prefix("sequence length")?;
    decoder.nested(|decoder| {
        slot.resize_with(len, T::default);
        for item in slot.iter_mut() {
            item.decode_into(decoder)?;
        }
        Ok(())
    })
}

/// Tagged union: discriminant byte, then the payload of that alternative.
///
/// The discriminant selects the alternative directly by index.
pub fn decode_union<U: TaggedUnion>(decoder: &mut Decoder<'_>, slot: &mut U) -> Result<(), DecodeError> {
    let tag = decoder.reader.read_byte("union tag")?;
    let index = usize::from(tag);
    if index >= U::ALTERNATIVES {
        return Err(DecodeError::InvalidTag {
            tag,
            alternatives: U::ALTERNATIVES,
        });
    }
    tracing::trace!(tag, alternatives = U::ALTERNATIVES, "resolved union alternative");
    *slot = decoder.nested(|decoder| U::decode_alternative(index, decoder))?;
    Ok(())
}

/// Composite: each field in hook order.
pub fn decode_composite<C: Composite>(decoder: &mut Decoder<'_>, slot: &mut C) -> Result<(), DecodeError> {
    decoder.nested(|decoder| slot.visit_mut(decoder))
}

// =============================================================================
// BUILT-IN TYPES
// =============================================================================

macro_rules! decode_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                #[inline]
                fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
                    let bytes = decoder
                        .reader
                        .read_array::<{ std::mem::size_of::<$ty>() }>(stringify!($ty))?;
                    *self = <$ty>::from_ne_bytes(bytes);
                    Ok(())
                }
            }
        )*
    };
}

decode_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Decode for bool {
    #[inline]
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        *self = match decoder.reader.read_byte("bool")? {
            0 => false,
            1 => true,
            value => return Err(DecodeError::InvalidBool { value }),
        };
        Ok(())
    }
}

impl Decode for String {
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        decode_text(decoder, self)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        decode_sequence(decoder, self)
    }
}

impl<T: Wire> Decode for Option<T> {
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        decode_union(decoder, self)
    }
}

impl Decode for () {
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        decode_composite(decoder, self)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
        (**self).decode_into(decoder)
    }
}
