//! The primitive wire reader.
//!
//! A cursor over a borrowed byte slice with one method per wire
//! primitive. Every read is bounds-checked against the slice; the
//! reader never touches a byte past the declared end, and the buffer
//! ending mid-value fails with [`WireError::TruncatedInput`].
//!
//! Errors leave the cursor where the failed read started from the
//! caller's point of view only in the sense that the buffer must be
//! discarded: decode makes no partial-progress promise on error.

use crate::{WireError, WireType};

/// Bounds-checked cursor over encoded wire bytes.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// A reader positioned at the start of the slice.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when the cursor has consumed the whole slice.
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Reads an unsigned varint.
    ///
    /// # Errors
    /// - [`WireError::MalformedVarint`] after 10 bytes without a clear
    ///   continuation bit (beyond the 64-bit range).
    /// - [`WireError::TruncatedInput`] if the buffer ends mid-varint.
    pub fn varint(&mut self) -> Result<u64, WireError> {
        let mut value: u64 = 0;
        for i in 0..10 {
            let Some(&byte) = self.buf.get(self.pos) else {
                return Err(WireError::TruncatedInput {
                    needed: 1,
                    remaining: 0,
                });
            };
            self.pos += 1;
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(WireError::MalformedVarint)
    }

    /// Reads a varint as a signed 64-bit integer (two's complement).
    pub fn int64(&mut self) -> Result<i64, WireError> {
        Ok(self.varint()? as i64)
    }

    /// Reads a varint as a signed 32-bit integer. Values encoded from
    /// negative int32s arrive as 10-byte varints; the low 32 bits hold
    /// the value, matching protobuf int32 semantics.
    pub fn int32(&mut self) -> Result<i32, WireError> {
        Ok(self.varint()? as i32)
    }

    /// Reads a varint as a bool (any non-zero value is true).
    pub fn bool(&mut self) -> Result<bool, WireError> {
        Ok(self.varint()? != 0)
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < n {
            return Err(WireError::TruncatedInput {
                needed: n - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads 8 raw little-endian bytes.
    pub fn fixed64(&mut self) -> Result<u64, WireError> {
        let mut arr = [0u8; 8];
        arr.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(arr))
    }

    /// Reads an IEEE-754 binary64.
    pub fn double(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_bits(self.fixed64()?))
    }

    /// Reads 4 raw little-endian bytes.
    pub fn fixed32(&mut self) -> Result<u32, WireError> {
        let mut arr = [0u8; 4];
        arr.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(arr))
    }

    /// Reads a length-delimited byte run: varint length, then exactly
    /// that many bytes, borrowed from the input.
    ///
    /// # Errors
    /// [`WireError::TruncatedInput`] when the declared length exceeds
    /// the remaining buffer.
    pub fn bytes(&mut self) -> Result<&'a [u8], WireError> {
        let len = self.varint()? as usize;
        self.take(len)
    }

    /// Reads a length-delimited UTF-8 string. Invalid UTF-8 is
    /// replaced lossily rather than rejected; string fields on this
    /// wire are producer-validated, and a decoder that hard-fails on
    /// one bad byte loses the whole message.
    pub fn string(&mut self) -> Result<String, WireError> {
        Ok(String::from_utf8_lossy(self.bytes()?).into_owned())
    }

    /// Skips one value of the given wire kind; the unknown-field
    /// rule: unrecognized fields are stepped over by their wire kind's
    /// length, never rejected.
    pub fn skip(&mut self, wire_type: WireType) -> Result<(), WireError> {
        match wire_type {
            WireType::Varint => {
                self.varint()?;
            }
            WireType::Bit64 => {
                self.take(8)?;
            }
            WireType::LengthDelimited => {
                self.bytes()?;
            }
            WireType::Bit32 => {
                self.take(4)?;
            }
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
