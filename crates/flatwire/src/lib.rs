//! flatwire: a category-dispatched flat binary codec.
//!
//! Values are encoded to a flat byte sequence, decoded back, and printed as a
//! nested human-readable trace. What each operation does is chosen statically
//! from the value's category:
//!
//! - **Scalar**: fixed-width numbers and `bool`
//! - **Text**: `String`
//! - **Sequence**: `Vec<T>`
//! - **Tagged union**: `Option<T>`, [`OneOf2`]..[`OneOf4`], and enums declared
//!   with [`tagged_union!`]
//! - **Composite**: structs registered with [`composite!`], which drive the
//!   codec over their own fields
//!
//! # Quick Start
//!
//! ```rust
//! use flatwire::{OneOf2, composite, from_bytes, to_bytes};
//! use flatwire::print::to_trace_string;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Foo {
//!     name: String,
//!     id: OneOf2<u8, String>,
//!     values: Vec<u16>,
//! }
//!
//! composite!(Foo { name, id, values });
//!
//! let foo = Foo {
//!     name: "foo".to_string(),
//!     id: OneOf2::First(17),
//!     values: vec![1, 2],
//! };
//!
//! let bytes = to_bytes(&foo).unwrap();
//! let decoded: Foo = from_bytes(&bytes).unwrap();
//! assert_eq!(foo, decoded);
//!
//! assert_eq!(to_trace_string(&foo), "{ foo #0 17 [ 1 2 ] } ");
//! ```
//!
//! # Modules
//!
//! - [`dispatch`]: Categories and the composite/union contracts
//! - [`codec`]: Encoder, decoder and top-level functions
//! - [`print`]: Debug printer
//! - [`model`]: Built-in generic unions
//! - [`error`]: Error types
//! - [`limits`]: Wire-format limits
//!
//! # Wire Format
//!
//! | Category | Layout |
//! |---|---|
//! | Scalar | raw bytes in native byte order |
//! | Text | 1 length byte + UTF-8 bytes |
//! | Sequence | 1 count byte + each element |
//! | Tagged union | 1 discriminant byte + active payload |
//! | Composite | each field in declared order, no framing |
//!
//! There is no magic number, version or checksum, and the bytes can only be
//! decoded by a reader that knows the exact static type. Byte order and the
//! width of `usize`/`isize` follow the host. Counts above 255 are rejected on
//! encode rather than truncated.

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod limits;
mod macros;
pub mod model;
pub mod print;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, EncodeOptions,
    decode::{Decode, Decoder},
    encode::{Encode, Encoder},
    encode_into, from_bytes, from_bytes_into, from_bytes_with_options, to_bytes,
    to_bytes_with_options,
};
pub use dispatch::{Category, Classify, Composite, TaggedUnion, Visitor, VisitorMut, Wire};
pub use error::{DecodeError, EncodeError, ErrorCode};
pub use model::{OneOf2, OneOf3, OneOf4};
pub use print::{DebugPrint, Printer, Trace, to_trace_string};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
