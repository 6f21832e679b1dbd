//! Error types for the codec layer.
//!
//! Two enums, split by layer:
//!
//! - [`WireError`]: structural problems with raw wire bytes, raised by
//!   the primitive [`Reader`](crate::Reader). If you see one, the bytes
//!   themselves are bad (or cut short).
//! - [`CodecError`]: everything the descriptor-driven codec can
//!   report: wire errors bubbled up, registry lookup misses, and
//!   type-level mismatches from `encode`/`from_object`.
//!
//! `verify` is deliberately *not* part of this taxonomy: it returns
//! descriptive strings so callers can batch-report every problem in a
//! form instead of stopping at the first.

/// Structural errors from the primitive wire reader.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// A varint ran past 10 bytes without a clear continuation bit;
    /// beyond the 64-bit range, so the bytes cannot be a valid varint.
    #[error("malformed varint: exceeds 10 bytes")]
    MalformedVarint,

    /// The buffer ended in the middle of a value.
    #[error("truncated input: needed {needed} more byte(s), {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
}

/// Errors from descriptor-driven encode/decode and object conversion.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Raw wire bytes were structurally invalid.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A field referenced a type the registry doesn't know, or the
    /// schema itself was invalid.
    #[error(transparent)]
    Schema(#[from] runewire_schema::SchemaError),

    /// A length prefix claimed more bytes than remain in the buffer.
    /// Distinct from [`WireError::TruncatedInput`]: the varint parsed
    /// fine, its *claim* is what's impossible.
    #[error("unexpected end of buffer: field claims {claimed} byte(s), {remaining} remaining")]
    UnexpectedEndOfBuffer { claimed: usize, remaining: usize },

    /// A value's runtime type doesn't match the field's declared type.
    /// `path` is the dotted field path (`coins.1.asset`).
    #[error("{path}: {expected} expected")]
    TypeMismatch { path: String, expected: &'static str },

    /// A proto2-style required field was absent after decode.
    #[error("{message}: missing required field {field}")]
    MissingRequiredField { message: String, field: String },
}

impl CodecError {
    /// Shorthand used throughout the codec.
    pub(crate) fn mismatch(path: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
        }
    }
}
