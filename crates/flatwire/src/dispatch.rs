//! Category classification shared by the encoder, decoder and printer.
//!
//! Every codec type is assigned exactly one [`Category`] when it is defined,
//! through its [`Classify`] impl. The three operations ([`Encode`],
//! [`Decode`], [`DebugPrint`]) each implement one rule per category; a type
//! without those impls is rejected at compile time.
//!
//! User types join through one of two contracts:
//! - [`Composite`]: the type enumerates its fields, in a fixed order, to
//!   whichever operation is active.
//! - [`TaggedUnion`]: the type is one of a fixed, ordered list of alternatives.
//!
//! The [`composite!`](crate::composite) and
//! [`tagged_union!`](crate::tagged_union) macros implement these contracts
//! and wire the type into all three operations.

use crate::codec::decode::{Decode, Decoder};
use crate::codec::encode::Encode;
use crate::error::DecodeError;
use crate::print::DebugPrint;

/// Structural category of a codec type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Fixed-width number, written as its raw native-order bytes.
    Scalar,
    /// String, written as a length prefix and its bytes.
    Text,
    /// Homogeneous list, written as a count prefix and its elements.
    Sequence,
    /// One active alternative out of a fixed list, written as tag and payload.
    TaggedUnion,
    /// Record driving the codec over its own fields.
    Composite,
}

/// Assigns a type its category.
pub trait Classify {
    const CATEGORY: Category;
}

/// A type supported by all three operations.
///
/// Composite fields and union alternatives must be `Wire`.
pub trait Wire: Encode + Decode + DebugPrint {}

impl<T: Encode + Decode + DebugPrint> Wire for T {}

/// Read-only operation driven over composite fields and union payloads.
///
/// Implemented by the encoder and the printer.
pub trait Visitor {
    type Error;

    fn field<T: Wire>(&mut self, value: &T) -> Result<(), Self::Error>;
}

/// Mutating operation driven over composite fields.
///
/// Implemented by the decoder.
pub trait VisitorMut {
    type Error;

    fn field<T: Wire>(&mut self, value: &mut T) -> Result<(), Self::Error>;
}

/// Traversal hook for record types.
///
/// Both methods must visit the same fields in the same order; the wire format
/// carries no field names or counts. Prefer [`composite!`](crate::composite),
/// which generates both from a single field list.
pub trait Composite: Default {
    /// Drives `visitor` once per field, in declared order.
    fn visit<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error>;

    /// Drives `visitor` once per field, in the same order as [`visit`](Composite::visit).
    fn visit_mut<V: VisitorMut>(&mut self, visitor: &mut V) -> Result<(), V::Error>;
}

/// Closed union over a statically ordered list of alternatives.
pub trait TaggedUnion: Default {
    /// Number of alternatives.
    const ALTERNATIVES: usize;

    /// Zero-based index of the active alternative.
    fn discriminant(&self) -> usize;

    /// Drives `visitor` over the active alternative's payload.
    fn visit_payload<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error>;

    /// Decodes the payload of alternative `index` into a fresh value.
    ///
    /// Called with `index < ALTERNATIVES`.
    fn decode_alternative(index: usize, decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}

// =============================================================================
// CLASSIFICATION OF BUILT-IN TYPES
// =============================================================================

macro_rules! classify {
    ($category:ident: $($ty:ty),* $(,)?) => {
        $(
            impl Classify for $ty {
                const CATEGORY: Category = Category::$category;
            }
        )*
    };
}

classify!(Scalar: u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool);
classify!(Text: String, str);
classify!(Composite: ());

impl<T> Classify for Vec<T> {
    const CATEGORY: Category = Category::Sequence;
}

impl<T> Classify for [T] {
    const CATEGORY: Category = Category::Sequence;
}

impl<T> Classify for Option<T> {
    const CATEGORY: Category = Category::TaggedUnion;
}

impl<T: Classify + ?Sized> Classify for Box<T> {
    const CATEGORY: Category = T::CATEGORY;
}

// `()` is the composite with no fields.
impl Composite for () {
    fn visit<V: Visitor>(&self, _visitor: &mut V) -> Result<(), V::Error> {
        Ok(())
    }

    fn visit_mut<V: VisitorMut>(&mut self, _visitor: &mut V) -> Result<(), V::Error> {
        Ok(())
    }
}

impl<T: Wire> TaggedUnion for Option<T> {
    const ALTERNATIVES: usize = 2;

    fn discriminant(&self) -> usize {
        match self {
            None => 0,
            Some(_) => 1,
        }
    }

    fn visit_payload<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            None => visitor.field(&()),
            Some(value) => visitor.field(value),
        }
    }

    fn decode_alternative(index: usize, decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match index {
            0 => {
                decoder.decode::<()>()?;
                Ok(None)
            }
            1 => Ok(Some(decoder.decode::<T>()?)),
            _ => Err(DecodeError::InvalidTag {
                tag: index as u8,
                alternatives: Self::ALTERNATIVES,
            }),
        }
    }
}
