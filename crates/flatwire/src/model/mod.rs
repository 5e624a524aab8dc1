//! Built-in codec types.
//!
//! - Generic tagged unions (`OneOf2` to `OneOf4`)
//!
//! `Option<T>` is also a tagged union (`None` = 0, `Some` = 1); its impls
//! live with the rest of the built-in types in [`dispatch`](crate::dispatch)
//! and [`codec`](crate::codec).

pub mod union;

pub use union::{OneOf2, OneOf3, OneOf4};
