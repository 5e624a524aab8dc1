//! Generic tagged unions over two to four alternatives.
//!
//! `OneOf3<Foo, u8, u16>` is the union `Foo | u8 | u16`: alternative `First`
//! has discriminant 0, `Second` 1, and so on.

use std::fmt;

use crate::codec::decode::{Decode, Decoder, decode_union};
use crate::codec::encode::{Encode, Encoder, encode_union};
use crate::dispatch::{Category, Classify, TaggedUnion, Visitor, Wire};
use crate::error::{DecodeError, EncodeError};
use crate::print::{DebugPrint, Printer, print_union};

macro_rules! one_of {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident($first_param:ident)
            $(, $variant:ident($param:ident) = $tag:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name<$first_param, $($param),*> {
            $first($first_param),
            $($variant($param),)*
        }

        impl<$first_param: Default, $($param),*> Default for $name<$first_param, $($param),*> {
            fn default() -> Self {
                $name::$first($first_param::default())
            }
        }

        impl<$first_param, $($param),*> Classify for $name<$first_param, $($param),*> {
            const CATEGORY: Category = Category::TaggedUnion;
        }

        impl<$first_param: Wire, $($param: Wire),*> TaggedUnion for $name<$first_param, $($param),*> {
            const ALTERNATIVES: usize = [0 $(, $tag)*].len();

            fn discriminant(&self) -> usize {
                match self {
                    $name::$first(_) => 0,
                    $($name::$variant(_) => $tag,)*
                }
            }

            fn visit_payload<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
                match self {
                    $name::$first(value) => visitor.field(value),
                    $($name::$variant(value) => visitor.field(value),)*
                }
            }

            fn decode_alternative(index: usize, decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                match index {
                    0 => Ok($name::$first(decoder.decode()?)),
                    $($tag => Ok($name::$variant(decoder.decode()?)),)*
                    _ => Err(DecodeError::InvalidTag {
                        tag: index as u8,
                        alternatives: Self::ALTERNATIVES,
                    }),
                }
            }
        }

        impl<$first_param: Wire, $($param: Wire),*> Encode for $name<$first_param, $($param),*> {
            fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
                encode_union(encoder, self)
            }
        }

        impl<$first_param: Wire, $($param: Wire),*> Decode for $name<$first_param, $($param),*> {
            fn decode_into(&mut self, decoder: &mut Decoder<'_>) -> Result<(), DecodeError> {
                decode_union(decoder, self)
            }
        }

        impl<$first_param: Wire, $($param: Wire),*> DebugPrint for $name<$first_param, $($param),*> {
            fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
                print_union(printer, self)
            }
        }
    };
}

one_of! {
    /// Union of two alternatives.
    OneOf2 { First(A), Second(B) = 1 }
}

one_of! {
    /// Union of three alternatives.
    OneOf3 { First(A), Second(B) = 1, Third(C) = 2 }
}

one_of! {
    /// Union of four alternatives.
    OneOf4 { First(A), Second(B) = 1, Third(C) = 2, Fourth(D) = 3 }
}
