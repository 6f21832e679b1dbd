//! Error types for the schema layer.
//!
//! Each crate in RuneWire defines its own error enum. A `SchemaError`
//! always means the schema itself is wrong or a type lookup failed;
//! never that wire bytes were malformed (that's `runewire-codec`'s
//! territory).

/// Errors raised while building descriptors or resolving types.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// No message or enum is registered under this fully qualified name.
    ///
    /// Either the schema was never registered, or a field references a
    /// type by a misspelled name. Lookup happens lazily at encode/decode
    /// time, so a bad reference surfaces on first use, not at
    /// registration.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A message or enum with this qualified name is already registered.
    ///
    /// The registry is populated once at startup; a duplicate almost
    /// always means the same schema module was wired up twice.
    #[error("type already registered: {0}")]
    DuplicateType(String),

    /// A field number is zero or negative-range. Protobuf field numbers
    /// start at 1.
    #[error("{message}.{field}: field number must be positive")]
    InvalidFieldNumber { message: String, field: String },

    /// Two fields in one message share a tag number.
    #[error("{message}: duplicate field number {number}")]
    DuplicateFieldNumber { message: String, number: u32 },

    /// Two fields in one message share a name.
    #[error("{message}: duplicate field name {field}")]
    DuplicateFieldName { message: String, field: String },
}
