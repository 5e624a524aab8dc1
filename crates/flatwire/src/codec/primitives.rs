//! Byte-level reading and writing.
//!
//! [`Reader`] owns the decode cursor, [`Writer`] appends to a caller-owned
//! buffer. Everything above this layer goes through these two types.

use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_PREFIXED_LEN;

// =============================================================================
// DECODING
// =============================================================================

/// Cursor over a borrowed byte slice.
///
/// The position never exceeds the slice length and only moves forward, by
/// exactly the number of bytes each read consumes. A failed read leaves the
/// position unchanged.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self, DecodeError> {
        if offset > data.len() {
            return Err(DecodeError::OutOfBounds {
                context: "start offset",
                needed: offset,
                remaining: data.len(),
            });
        }
        Ok(Self { data, pos: offset })
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let [byte] = self.read_array::<1>(context)?;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining_len();
        if n > remaining {
            return Err(DecodeError::OutOfBounds {
                context,
                needed: n,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into an array, for fixed-width scalars.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_bytes(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a single-byte length prefix.
    #[inline]
    pub fn read_len_prefix(&mut self, context: &'static str) -> Result<usize, DecodeError> {
        Ok(self.read_byte(context)? as usize)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Append-only writer over a caller-owned buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> Writer<'a> {
    /// Creates a writer that appends to `buf`.
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }

    /// Returns a reference to the whole buffer, including bytes that were
    /// present before this writer was created.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Shortens the underlying buffer to `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a single-byte length prefix.
    ///
    /// Counts that do not fit are rejected, never truncated.
    #[inline]
    pub fn write_len_prefix(&mut self, len: usize, category: &'static str) -> Result<(), EncodeError> {
        let byte = u8::try_from(len).map_err(|_| EncodeError::LengthExceedsLimit {
            category,
            len,
            max: MAX_PREFIXED_LEN,
        })?;
        self.buf.push(byte);
        Ok(())
    }
}
