//! Descriptor-driven message encoding.
//!
//! One generic function replaces the per-message `encode` a generator
//! would emit: it walks the descriptor's fields in declaration order,
//! probes the instance for each one, and writes tag + value for every
//! field that is present. Unset fields contribute nothing; an
//! instance with no fields set encodes to an empty buffer.
//!
//! Nested messages are encoded into their own sub-buffer first and
//! joined in length-prefixed (fork/join). Packed repeated scalars
//! share a single length-delimited run of concatenated encodings.

use runewire_schema::{FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry, Value};

use crate::{CodecError, WireType, Writer};

/// The wire kind values of this field type travel as.
pub(crate) fn wire_type_of(ty: &FieldType) -> WireType {
    match ty {
        FieldType::Str | FieldType::Bytes | FieldType::Message(_) => WireType::LengthDelimited,
        FieldType::Double => WireType::Bit64,
        _ => WireType::Varint,
    }
}

/// Encodes an instance against its descriptor.
///
/// Pure: no side effects beyond the returned buffer. Fields are
/// written in declaration order; a present field is written even when
/// it holds the default value (presence is the "explicitly set" bit).
///
/// # Errors
/// - [`CodecError::TypeMismatch`] when a value's variant doesn't match
///   the declared field type.
/// - [`CodecError::Schema`] when a nested message or enum name can't
///   be resolved.
pub fn encode(
    value: &MessageValue,
    descriptor: &MessageDescriptor,
    registry: &Registry,
) -> Result<Vec<u8>, CodecError> {
    let mut writer = Writer::new();
    for field in &descriptor.fields {
        let Some(field_value) = value.get(&field.name) else {
            continue;
        };
        encode_field(&mut writer, field_value, field, registry)?;
    }
    Ok(writer.into_bytes())
}

fn encode_field(
    writer: &mut Writer,
    value: &Value,
    field: &FieldDescriptor,
    registry: &Registry,
) -> Result<(), CodecError> {
    if field.repeated {
        let Value::List(items) = value else {
            return Err(CodecError::mismatch(&field.name, "array"));
        };
        if items.is_empty() {
            // An empty repeated field is indistinguishable from an
            // unset one on the wire.
            return Ok(());
        }
        if field.packed && field.ty.is_scalar() && !field.ty.is_length_delimited() {
            let mut run = Writer::new();
            for item in items {
                encode_scalar(&mut run, item, field, registry)?;
            }
            writer
                .tag(field.number, WireType::LengthDelimited)
                .nested(&run.into_bytes());
        } else {
            for item in items {
                encode_single(writer, item, field, registry)?;
            }
        }
        Ok(())
    } else {
        encode_single(writer, value, field, registry)
    }
}

/// Writes one tag + value pair.
fn encode_single(
    writer: &mut Writer,
    value: &Value,
    field: &FieldDescriptor,
    registry: &Registry,
) -> Result<(), CodecError> {
    if let FieldType::Message(type_name) = &field.ty {
        let Value::Message(nested) = value else {
            return Err(CodecError::mismatch(&field.name, "object"));
        };
        let nested_descriptor = registry.resolve_message(type_name)?;
        let inner = encode(nested, nested_descriptor, registry)?;
        writer
            .tag(field.number, WireType::LengthDelimited)
            .nested(&inner);
        return Ok(());
    }
    writer.tag(field.number, wire_type_of(&field.ty));
    encode_scalar(writer, value, field, registry)
}

/// Writes one scalar value with no tag (shared by the tagged path and
/// packed runs).
fn encode_scalar(
    writer: &mut Writer,
    value: &Value,
    field: &FieldDescriptor,
    registry: &Registry,
) -> Result<(), CodecError> {
    match (&field.ty, value) {
        (FieldType::Str, Value::Str(s)) => {
            writer.string(s);
        }
        (FieldType::Bool, Value::Bool(b)) => {
            writer.bool(*b);
        }
        (FieldType::Int32, Value::I32(n)) => {
            // Negative int32s take the full 10 bytes, per protobuf.
            writer.int64(i64::from(*n));
        }
        (FieldType::Int64, Value::I64(n)) => {
            writer.int64(*n);
        }
        (FieldType::Uint64, Value::U64(n)) => {
            writer.varint(*n);
        }
        (FieldType::Double, Value::F64(n)) => {
            writer.double(*n);
        }
        (FieldType::Bytes, Value::Bytes(b)) => {
            writer.bytes(b);
        }
        (FieldType::Enum(type_name), Value::Enum(n)) => {
            // The enum must at least resolve; unknown *numbers* are
            // fine (forward compatibility), unknown *types* are not.
            registry.resolve_enum(type_name)?;
            writer.int64(i64::from(*n));
        }
        (ty, _) => {
            return Err(CodecError::mismatch(&field.name, expected_noun(ty)));
        }
    }
    Ok(())
}

/// The noun used in mismatch reports, shared with `verify`'s wording.
pub(crate) fn expected_noun(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::Str => "string",
        FieldType::Bool => "boolean",
        FieldType::Bytes => "buffer",
        FieldType::Int32 => "integer",
        FieldType::Int64 | FieldType::Uint64 => "integer|Long",
        FieldType::Double => "number",
        FieldType::Enum(_) => "enum value",
        FieldType::Message(_) => "object",
    }
}

// =========================================================================
// Tests
// =========================================================================
