//! The primitive wire writer.
//!
//! An append-only byte buffer with one method per wire primitive.
//! Writing never fails (every representable value has an encoding),
//! so these methods return `&mut Self` for chaining instead of
//! `Result`:
//!
//! ```text
//! writer.tag(1, LengthDelimited).string("THOR")
//!       .tag(4, Varint).bool(true);
//! ```
//!
//! Nested messages use fork/join semantics: the inner message is
//! encoded into its own buffer, then joined in with a varint length
//! prefix via [`Writer::nested`].

use crate::WireType;

/// Append-only encoder for the protobuf wire format.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// A fresh, empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the writer, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes an unsigned varint: little-endian base-128, 7 value bits
    /// per byte, continuation bit set on all but the last byte.
    pub fn varint(&mut self, mut value: u64) -> &mut Self {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
        self
    }

    /// Writes a signed integer as a varint. Negative values take the
    /// full 10 bytes (two's-complement through u64), matching protobuf
    /// int32/int64 encoding.
    pub fn int64(&mut self, value: i64) -> &mut Self {
        self.varint(value as u64)
    }

    /// Writes a bool as a single varint byte.
    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.varint(u64::from(value))
    }

    /// Writes 8 raw little-endian bytes.
    pub fn fixed64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes an IEEE-754 binary64 as 8 raw little-endian bytes.
    pub fn double(&mut self, value: f64) -> &mut Self {
        self.fixed64(value.to_bits())
    }

    /// Writes 4 raw little-endian bytes.
    pub fn fixed32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a length-delimited byte blob: varint length, then the
    /// bytes themselves.
    pub fn bytes(&mut self, value: &[u8]) -> &mut Self {
        self.varint(value.len() as u64);
        self.buf.extend_from_slice(value);
        self
    }

    /// Writes a length-delimited UTF-8 string.
    pub fn string(&mut self, value: &str) -> &mut Self {
        self.bytes(value.as_bytes())
    }

    /// Writes a field tag: `(number << 3) | wire_kind` as a varint.
    pub fn tag(&mut self, field_number: u32, wire_type: WireType) -> &mut Self {
        self.varint(wire_type.tag(field_number))
    }

    /// Joins in a sub-encoding as a length-delimited run; the
    /// fork/join step for nested messages and packed repeated fields.
    /// The caller encodes the inner content into its own `Writer` and
    /// passes the finished bytes here.
    pub fn nested(&mut self, inner: &[u8]) -> &mut Self {
        self.bytes(inner)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut Writer)) -> Vec<u8> {
        let mut w = Writer::new();
        f(&mut w);
        w.into_bytes()
    }

    #[test]
    fn test_varint_single_byte_values() {
        assert_eq!(written(|w| { w.varint(0); }), vec![0x00]);
        assert_eq!(written(|w| { w.varint(1); }), vec![0x01]);
        assert_eq!(written(|w| { w.varint(127); }), vec![0x7F]);
    }

    #[test]
    fn test_varint_multi_byte_values() {
        // 128 = 0b1000_0000 → low 7 bits first with continuation bit.
        assert_eq!(written(|w| { w.varint(128); }), vec![0x80, 0x01]);
        assert_eq!(written(|w| { w.varint(300); }), vec![0xAC, 0x02]);
    }

    #[test]
    fn test_varint_u64_max_takes_ten_bytes() {
        let bytes = written(|w| {
            w.varint(u64::MAX);
        });
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[9], 0x01);
    }

    #[test]
    fn test_negative_int64_takes_ten_bytes() {
        let bytes = written(|w| {
            w.int64(-1);
        });
        assert_eq!(bytes.len(), 10);
        // -1 as u64 is all ones: nine 0xFF-ish bytes then 0x01.
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(bytes[9], 0x01);
    }

    #[test]
    fn test_fixed64_is_little_endian() {
        assert_eq!(
            written(|w| { w.fixed64(0x0102_0304_0506_0708); }),
            vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_double_writes_ieee754_bits() {
        assert_eq!(written(|w| { w.double(1.0); }), 1.0f64.to_le_bytes());
    }

    #[test]
    fn test_fixed32_is_little_endian() {
        assert_eq!(
            written(|w| { w.fixed32(0xDEAD_BEEF); }),
            vec![0xEF, 0xBE, 0xAD, 0xDE]
        );
    }

    #[test]
    fn test_string_is_length_prefixed() {
        // Asset.chain = "THOR", minus the tag.
        assert_eq!(
            written(|w| { w.string("THOR"); }),
            vec![0x04, b'T', b'H', b'O', b'R']
        );
    }

    #[test]
    fn test_empty_bytes_writes_zero_length() {
        assert_eq!(written(|w| { w.bytes(&[]); }), vec![0x00]);
    }

    #[test]
    fn test_tag_then_value_chains() {
        let bytes = written(|w| {
            w.tag(1, WireType::LengthDelimited).string("THOR");
        });
        assert_eq!(bytes, vec![0x0A, 0x04, b'T', b'H', b'O', b'R']);
    }

    #[test]
    fn test_nested_is_length_prefixed_sub_encoding() {
        let mut inner = Writer::new();
        inner.tag(1, WireType::LengthDelimited).string("THOR");
        let bytes = written(|w| {
            w.tag(1, WireType::LengthDelimited)
                .nested(&inner.into_bytes());
        });
        assert_eq!(bytes, vec![0x0A, 0x06, 0x0A, 0x04, b'T', b'H', b'O', b'R']);
    }
}
