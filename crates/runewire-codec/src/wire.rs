//! Wire kinds and tags.
//!
//! Every encoded field starts with a *tag*: a varint packing the field
//! number and the wire kind together as `(number << 3) | kind`. The
//! wire kind tells a decoder how many bytes the value occupies even
//! when it doesn't recognize the field number; that's what makes
//! unknown-field skipping (and therefore forward compatibility) work.

use crate::WireError;

/// The four low-level encodings of the protobuf wire format.
///
/// Kinds 3 and 4 (group start/end) are long-deprecated and not
/// supported; a tag carrying them decodes as an error at the call
/// site via [`WireType::from_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// Base-128 varint: bool, enum, int32/int64/uint64, tags, lengths.
    Varint = 0,
    /// 8 raw little-endian bytes: double, fixed64.
    Bit64 = 1,
    /// Varint length prefix, then exactly that many bytes: string,
    /// bytes, nested message, packed repeated scalars.
    LengthDelimited = 2,
    /// 4 raw little-endian bytes: float, fixed32. Declared by the wire
    /// format and fully supported at this layer, though no concrete
    /// THORChain field uses it.
    Bit32 = 5,
}

impl WireType {
    /// Maps the low three tag bits to a wire kind. `None` for the
    /// deprecated group kinds (3, 4) and the reserved codes (6, 7).
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Varint),
            1 => Some(Self::Bit64),
            2 => Some(Self::LengthDelimited),
            5 => Some(Self::Bit32),
            _ => None,
        }
    }

    /// Splits a tag varint into `(field_number, wire_type)`.
    ///
    /// # Errors
    /// [`WireError::MalformedVarint`] if the kind bits name a
    /// deprecated or reserved kind; the decoder cannot know how to
    /// skip such a value, so the buffer is unusable from here on.
    pub fn from_tag(tag: u64) -> Result<(u32, Self), WireError> {
        let number = (tag >> 3) as u32;
        match Self::from_code(tag & 0x7) {
            Some(wire_type) => Ok((number, wire_type)),
            None => Err(WireError::MalformedVarint),
        }
    }

    /// Builds the tag varint for a field number.
    pub fn tag(self, field_number: u32) -> u64 {
        (u64::from(field_number) << 3) | self as u64
    }
}

// =========================================================================
// Tests
// =========================================================================
