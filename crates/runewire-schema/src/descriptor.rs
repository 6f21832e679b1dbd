//! Message, field, and enum descriptors.
//!
//! A descriptor is the schema metadata for one type: which fields it
//! has, their tag numbers, and how each one is encoded. The generic
//! codec in `runewire-codec` is driven entirely by descriptors; there
//! is no per-message generated encode/decode function, just one
//! dispatcher walking this data.
//!
//! Descriptors are built in code (see the `runewire` facade crate for
//! the THORChain schema) and registered under fully qualified dotted
//! names like `common.Asset`. Fields that reference another message or
//! enum store that *name*, not the descriptor itself; resolution goes
//! through the [`Registry`](crate::Registry) at encode/decode time, so
//! self-referential and mutually-referential types just work.

use serde::{Deserialize, Serialize};

use crate::SchemaError;

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

/// The declared type of a single field.
///
/// This is the schema-level type, one step above the wire: several
/// variants share a wire representation (bool, int32, int64, uint64,
/// and enums are all varints on the wire) but differ in how values are
/// interpreted, verified, and rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// UTF-8 string, length-delimited on the wire.
    Str,
    /// Boolean, varint 0/1 on the wire.
    Bool,
    /// Raw byte blob, length-delimited on the wire.
    Bytes,
    /// 32-bit signed integer, varint on the wire (negatives take the
    /// full 10 bytes, per protobuf).
    Int32,
    /// 64-bit signed integer, varint on the wire.
    Int64,
    /// 64-bit unsigned integer, varint on the wire.
    Uint64,
    /// IEEE-754 binary64, 8 raw little-endian bytes on the wire.
    Double,
    /// Enum value; the string is the fully qualified name of the
    /// [`EnumDescriptor`], resolved lazily through the registry.
    Enum(String),
    /// Nested message; the string is the fully qualified name of the
    /// [`MessageDescriptor`], resolved lazily through the registry.
    Message(String),
}

impl FieldType {
    /// Whether values of this type are length-delimited on the wire
    /// (strings, bytes, nested messages).
    pub fn is_length_delimited(&self) -> bool {
        matches!(self, Self::Str | Self::Bytes | Self::Message(_))
    }

    /// Whether this is a scalar (non-message) type. Only scalar
    /// repeated fields may be packed.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Message(_))
    }
}

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// Schema metadata for one field of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared in the schema (camelCase, matching the
    /// JSON object key verbatim).
    pub name: String,
    /// Tag number. Positive and unique within the message.
    pub number: u32,
    /// Declared type.
    pub ty: FieldType,
    /// Repeated field; decodes by appending, encodes one element per
    /// tag (or one packed run, see `packed`).
    pub repeated: bool,
    /// Packed encoding for a repeated varint/fixed scalar: all
    /// elements share a single length-delimited run instead of one tag
    /// per element. Length-delimited types (strings, bytes, messages)
    /// cannot be packed; the flag is ignored for them, as for
    /// non-repeated fields.
    pub packed: bool,
    /// Proto2-style required field. Decode fails if the field is
    /// absent; `verify` reports it. The THORChain schema is proto3 and
    /// sets this nowhere, but the engine honors it.
    pub required: bool,
}

impl FieldDescriptor {
    /// A plain optional singular field.
    pub fn new(name: impl Into<String>, number: u32, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            number,
            ty,
            repeated: false,
            packed: false,
            required: false,
        }
    }

    /// Marks the field repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Marks the field packed (only meaningful together with
    /// [`repeated`](Self::repeated) on a scalar type).
    pub fn packed(mut self) -> Self {
        self.packed = true;
        self
    }

    /// Marks the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Message descriptors
// ---------------------------------------------------------------------------

/// Schema metadata for one message type: its qualified name and its
/// fields in declaration order.
///
/// Declaration order matters: the codec writes fields in the order they
/// appear here, matching what a schema-faithful generator would emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Fully qualified dotted name, e.g. `common.Asset`.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Builds a descriptor, validating the schema invariants: every
    /// field number is positive and unique, every field name unique.
    ///
    /// # Errors
    /// Returns a [`SchemaError`] naming the offending field when an
    /// invariant is violated.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        for (i, field) in fields.iter().enumerate() {
            if field.number == 0 {
                return Err(SchemaError::InvalidFieldNumber {
                    message: name,
                    field: field.name.clone(),
                });
            }
            for earlier in &fields[..i] {
                if earlier.number == field.number {
                    return Err(SchemaError::DuplicateFieldNumber {
                        message: name,
                        number: field.number,
                    });
                }
                if earlier.name == field.name {
                    return Err(SchemaError::DuplicateFieldName {
                        message: name,
                        field: field.name.clone(),
                    });
                }
            }
        }
        Ok(Self { name, fields })
    }

    /// Looks up a field by tag number (decode-side dispatch).
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Looks up a field by name (object-form conversion).
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// ---------------------------------------------------------------------------
// Enum descriptors
// ---------------------------------------------------------------------------

/// Schema metadata for an enum: its qualified name and the declared
/// `(name, number)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Fully qualified dotted name, e.g. `common.Status`.
    pub name: String,
    /// Declared values. Numbers need not be contiguous.
    pub values: Vec<(String, i32)>,
}

impl EnumDescriptor {
    pub fn new(
        name: impl Into<String>,
        values: Vec<(impl Into<String>, i32)>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Declared name for a number, if any. Unknown numbers are legal on
    /// the wire (forward compatibility) and simply have no name.
    pub fn name_of(&self, number: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, v)| *v == number)
            .map(|(n, _)| n.as_str())
    }

    /// Declared number for a name, if any.
    pub fn number_of(&self, name: &str) -> Option<i32> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Whether the number is one of the declared values (used by
    /// `verify`).
    pub fn contains(&self, number: i32) -> bool {
        self.values.iter().any(|(_, v)| *v == number)
    }
}

// =========================================================================
// Tests
// =========================================================================
