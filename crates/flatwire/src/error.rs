//! Error types for flatwire encoding and decoding.

use thiserror::Error;

/// Stable error codes for decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Union discriminant outside the alternative list
    InvalidTag,
    /// E002: Read past the end of the buffer
    OutOfBounds,
    /// E003: Text payload is not valid UTF-8
    InvalidUtf8,
    /// E004: Malformed scalar or framing
    Malformed,
    /// E005: A decode limit was exceeded
    LimitExceeded,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidTag => "E001",
            ErrorCode::OutOfBounds => "E002",
            ErrorCode::InvalidUtf8 => "E003",
            ErrorCode::Malformed => "E004",
            ErrorCode::LimitExceeded => "E005",
        }
    }
}

/// Error during binary decoding.
///
/// Every variant aborts the whole decode call. The value being decoded into
/// may be partially overwritten and should be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === E001: Invalid tag ===
    #[error("[E001] invalid union tag {tag} (alternatives: {alternatives})")]
    InvalidTag { tag: u8, alternatives: usize },

    // === E002: Out of bounds ===
    #[error("[E002] reading {context} needs {needed} bytes, {remaining} remaining")]
    OutOfBounds {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    // === E003: Invalid UTF-8 ===
    #[error("[E003] invalid UTF-8 in {context}")]
    InvalidUtf8 { context: &'static str },

    // === E004: Malformed ===
    #[error("[E004] invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("[E004] {remaining} trailing bytes after value")]
    TrailingBytes { remaining: usize },

    // === E005: Limits ===
    #[error("[E005] nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidTag { .. } => ErrorCode::InvalidTag,
            DecodeError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            DecodeError::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
            DecodeError::InvalidBool { .. } | DecodeError::TrailingBytes { .. } => {
                ErrorCode::Malformed
            }
            DecodeError::DepthExceeded { .. } => ErrorCode::LimitExceeded,
        }
    }
}

/// Error during binary encoding.
///
/// Raised for values the single-byte wire prefixes cannot represent, and for
/// values nested deeper than the decoder would accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{category} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        category: &'static str,
        len: usize,
        max: usize,
    },

    #[error("union discriminant {discriminant} exceeds maximum {max}")]
    DiscriminantExceedsLimit { discriminant: usize, max: usize },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },
}
