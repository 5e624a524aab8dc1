//! Wire-format limits.
//!
//! Length prefixes and union discriminants are single bytes, so counts and
//! tags above `u8::MAX` cannot be represented and are rejected on encode.

/// Maximum text byte count or sequence element count.
pub const MAX_PREFIXED_LEN: usize = u8::MAX as usize;

/// Maximum union discriminant.
pub const MAX_DISCRIMINANT: usize = u8::MAX as usize;

/// Default maximum nesting of sequences, unions and composites during decode.
pub const DEFAULT_MAX_DEPTH: usize = 128;
