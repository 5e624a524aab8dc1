//! Macros that register user types with the codec.

/// Implements [`Composite`](crate::dispatch::Composite) for a struct from its
/// field list, and registers it with all three operations.
///
/// Fields are visited in the order listed, which fixes the wire layout. Every
/// field type must be [`Wire`](crate::dispatch::Wire) and the struct must be
/// `Default`. Tuple structs list their indices.
///
/// ```
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     label: String,
/// }
///
/// flatwire::composite!(Point { x, y, label });
///
/// let point = Point { x: 1, y: -2, label: "p".into() };
/// let bytes = flatwire::to_bytes(&point).unwrap();
/// assert_eq!(bytes.len(), 4 + 4 + 2);
/// assert_eq!(flatwire::from_bytes::<Point>(&bytes).unwrap(), point);
/// ```
#[macro_export]
macro_rules! composite {
    ($ty:ty { $($field:tt),* $(,)? }) => {
        impl $crate::dispatch::Composite for $ty {
            #[allow(unused_variables)]
            fn visit<V: $crate::dispatch::Visitor>(
                &self,
                visitor: &mut V,
            ) -> ::core::result::Result<(), V::Error> {
                $( visitor.field(&self.$field)?; )*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn visit_mut<V: $crate::dispatch::VisitorMut>(
                &mut self,
                visitor: &mut V,
            ) -> ::core::result::Result<(), V::Error> {
                $( visitor.field(&mut self.$field)?; )*
                ::core::result::Result::Ok(())
            }
        }

        $crate::wire_composite!($ty);
    };
}

/// Registers a type with a hand-written
/// [`Composite`](crate::dispatch::Composite) impl as a composite in all three
/// operations.
#[macro_export]
macro_rules! wire_composite {
    ($ty:ty) => {
        impl $crate::dispatch::Classify for $ty {
            const CATEGORY: $crate::dispatch::Category = $crate::dispatch::Category::Composite;
        }

        impl $crate::codec::Encode for $ty {
            fn encode(
                &self,
                encoder: &mut $crate::codec::Encoder<'_>,
            ) -> ::core::result::Result<(), $crate::error::EncodeError> {
                $crate::codec::encode_composite(encoder, self)
            }
        }

        impl $crate::codec::Decode for $ty {
            fn decode_into(
                &mut self,
                decoder: &mut $crate::codec::Decoder<'_>,
            ) -> ::core::result::Result<(), $crate::error::DecodeError> {
                $crate::codec::decode_composite(decoder, self)
            }
        }

        impl $crate::print::DebugPrint for $ty {
            fn print<W: ::core::fmt::Write>(
                &self,
                printer: &mut $crate::print::Printer<W>,
            ) -> ::core::fmt::Result {
                $crate::print::print_composite(printer, self)
            }
        }
    };
}

/// Declares an enum as a tagged union.
///
/// Each variant holds exactly one [`Wire`](crate::dispatch::Wire) payload
/// (use `()` for an empty one) and is given its wire tag explicitly. Tags must
/// be `0, 1, 2, ...` in declaration order; anything else fails to compile.
/// The first variant, holding its payload's default, is the enum's default.
///
/// ```
/// flatwire::tagged_union! {
///     #[derive(Debug, PartialEq)]
///     pub enum Shape {
///         Empty(()) = 0,
///         Circle(f32) = 1,
///         Named(String) = 2,
///     }
/// }
///
/// let bytes = flatwire::to_bytes(&Shape::Named("sq".into())).unwrap();
/// assert_eq!(bytes, vec![2, 2, b's', b'q']);
/// assert_eq!(flatwire::from_bytes::<Shape>(&[0]).unwrap(), Shape::Empty(()));
/// assert!(flatwire::from_bytes::<Shape>(&[3]).is_err());
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident($first_ty:ty) = $first_tag:literal
            $(, $variant:ident($variant_ty:ty) = $tag:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $first($first_ty),
            $($variant($variant_ty),)*
        }

        const _: () = {
            let tags: &[usize] = &[$first_tag $(, $tag)*];
            let mut index = 0;
            while index < tags.len() {
                assert!(
                    tags[index] == index,
                    "tagged_union! tags must be 0, 1, 2, ... in declaration order"
                );
                index += 1;
            }
        };

        impl ::core::default::Default for $name {
            fn default() -> Self {
                $name::$first(::core::default::Default::default())
            }
        }

        impl $crate::dispatch::TaggedUnion for $name {
            const ALTERNATIVES: usize = [$first_tag $(, $tag)*].len();

            fn discriminant(&self) -> usize {
                match self {
                    $name::$first(_) => $first_tag,
                    $($name::$variant(_) => $tag,)*
                }
            }

            fn visit_payload<V: $crate::dispatch::Visitor>(
                &self,
                visitor: &mut V,
            ) -> ::core::result::Result<(), V::Error> {
                match self {
                    $name::$first(value) => visitor.field(value),
                    $($name::$variant(value) => visitor.field(value),)*
                }
            }

            fn decode_alternative(
                index: usize,
                decoder: &mut $crate::codec::Decoder<'_>,
            ) -> ::core::result::Result<Self, $crate::error::DecodeError> {
                match index {
                    $first_tag => ::core::result::Result::Ok($name::$first(decoder.decode()?)),
                    $($tag => ::core::result::Result::Ok($name::$variant(decoder.decode()?)),)*
                    _ => ::core::result::Result::Err($crate::error::DecodeError::InvalidTag {
                        tag: index as u8,
                        alternatives: <Self as $crate::dispatch::TaggedUnion>::ALTERNATIVES,
                    }),
                }
            }
        }

        impl $crate::dispatch::Classify for $name {
            const CATEGORY: $crate::dispatch::Category = $crate::dispatch::Category::TaggedUnion;
        }

        impl $crate::codec::Encode for $name {
            fn encode(
                &self,
                encoder: &mut $crate::codec::Encoder<'_>,
            ) -> ::core::result::Result<(), $crate::error::EncodeError> {
                $crate::codec::encode_union(encoder, self)
            }
        }

        impl $crate::codec::Decode for $name {
            fn decode_into(
                &mut self,
                decoder: &mut $crate::codec::Decoder<'_>,
            ) -> ::core::result::Result<(), $crate::error::DecodeError> {
                $crate::codec::decode_union(decoder, self)
            }
        }

        impl $crate::print::DebugPrint for $name {
            fn print<W: ::core::fmt::Write>(
                &self,
                printer: &mut $crate::print::Printer<W>,
            ) -> ::core::fmt::Result {
                $crate::print::print_union(printer, self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::codec::{from_bytes, to_bytes};
    use crate::dispatch::{Category, Classify, TaggedUnion};
    use crate::error::DecodeError;
    use crate::print::to_trace_string;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Triple {
        a: u32,
        b: String,
        c: Vec<u8>,
    }

    crate::composite!(Triple { a, b, c });

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Pair(u16, bool);

    crate::composite!(Pair { 0, 1 });

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Nothing;

    crate::composite!(Nothing {});

    crate::tagged_union! {
        #[derive(Debug, Clone, PartialEq)]
        enum Message {
            Ping(()) = 0,
            Text(String) = 1,
            Point(Pair) = 2,
        }
    }

    #[test]
    fn test_composite_field_order() {
        let value = Triple { a: 42, b: "hi".into(), c: vec![1, 2, 3] };
        let bytes = to_bytes(&value).unwrap();

        let mut expected = 42u32.to_ne_bytes().to_vec();
        expected.extend_from_slice(&[2, b'h', b'i', 3, 1, 2, 3]);
        assert_eq!(bytes, expected);

        assert_eq!(from_bytes::<Triple>(&expected).unwrap(), value);
    }

    #[test]
    fn test_tuple_composite() {
        let value = Pair(0x0102, true);
        let bytes = to_bytes(&value).unwrap();
        assert_eq!(bytes.len(), 3);
        assert_eq!(from_bytes::<Pair>(&bytes).unwrap(), value);
    }

    #[test]
    fn test_empty_composite() {
        assert!(to_bytes(&Nothing).unwrap().is_empty());
        assert_eq!(from_bytes::<Nothing>(&[]).unwrap(), Nothing);
        assert_eq!(to_trace_string(&Nothing), "{ } ");
    }

    #[test]
    fn test_union_tags() {
        assert_eq!(<Message as TaggedUnion>::ALTERNATIVES, 3);
        assert_eq!(<Message as Classify>::CATEGORY, Category::TaggedUnion);
        assert_eq!(<Triple as Classify>::CATEGORY, Category::Composite);

        assert_eq!(to_bytes(&Message::Ping(())).unwrap(), vec![0]);
        assert_eq!(to_bytes(&Message::Text("y".into())).unwrap(), vec![1, 1, b'y']);
        let point = to_bytes(&Message::Point(Pair(1, false))).unwrap();
        assert_eq!(point[0], 2);
        assert_eq!(point.len(), 4);
    }

    #[test]
    fn test_union_roundtrip_every_alternative() {
        for value in [
            Message::Ping(()),
            Message::Text(String::new()),
            Message::Text("hello".into()),
            Message::Point(Pair(9, true)),
        ] {
            let bytes = to_bytes(&value).unwrap();
            assert_eq!(from_bytes::<Message>(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_union_invalid_tag() {
        assert_eq!(
            from_bytes::<Message>(&[3, 0]),
            Err(DecodeError::InvalidTag { tag: 3, alternatives: 3 })
        );
    }

    #[test]
    fn test_union_default_is_first() {
        assert_eq!(Message::default(), Message::Ping(()));
    }

    #[test]
    fn test_printing() {
        let value = Triple { a: 7, b: "x".into(), c: vec![1] };
        assert_eq!(to_trace_string(&value), "{ 7 x [ 1 ] } ");
        assert_eq!(to_trace_string(&Message::Point(Pair(3, true))), "#2 { 3 1 } ");
    }
}
