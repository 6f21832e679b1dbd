//! Descriptor-driven message decoding.
//!
//! The decode loop mirrors what a generator would emit as a `switch`
//! over field numbers: read a tag, dispatch on the number, read the
//! value. Two policies inherited from protobuf shape everything here:
//!
//! - **Unknown fields are skipped, never rejected.** A buffer written
//!   by a newer schema (extra fields) decodes to the same instance as
//!   one with those fields stripped. A *known* field number arriving
//!   with the wrong wire kind is treated the same way; skipping by
//!   wire kind is always safe, reinterpreting bytes is not.
//! - **No partial-result contract.** Decode fails fast on structural
//!   errors; whatever was populated before the error is discarded with
//!   the `Err`.

use runewire_schema::{FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry, Value};
use tracing::trace;

use crate::encode::wire_type_of;
use crate::{CodecError, Reader, WireType};

/// Decodes wire bytes against a descriptor.
///
/// # Errors
/// - [`CodecError::Wire`] for malformed varints and truncated values.
/// - [`CodecError::UnexpectedEndOfBuffer`] when a length prefix claims
///   more bytes than remain.
/// - [`CodecError::MissingRequiredField`] when a `required` field is
///   absent once the buffer is consumed.
pub fn decode(
    bytes: &[u8],
    descriptor: &MessageDescriptor,
    registry: &Registry,
) -> Result<MessageValue, CodecError> {
    let mut reader = Reader::new(bytes);
    let mut message = MessageValue::new();

    while !reader.is_at_end() {
        let tag = reader.varint()?;
        let (number, wire_type) = WireType::from_tag(tag)?;
        match descriptor.field_by_number(number) {
            Some(field) if accepts(field, wire_type) => {
                decode_field(&mut reader, &mut message, field, wire_type, registry)?;
            }
            _ => {
                trace!(
                    message = %descriptor.name,
                    field = number,
                    ?wire_type,
                    "skipping unrecognized field"
                );
                reader.skip(wire_type)?;
            }
        }
    }

    for field in &descriptor.fields {
        if field.required && !message.has(&field.name) {
            return Err(CodecError::MissingRequiredField {
                message: descriptor.name.clone(),
                field: field.name.clone(),
            });
        }
    }
    Ok(message)
}

/// Whether a field can consume a value of this wire kind: either its
/// natural kind, or a length-delimited packed run for a repeated
/// scalar.
fn accepts(field: &FieldDescriptor, wire_type: WireType) -> bool {
    let natural = wire_type_of(&field.ty);
    wire_type == natural
        || (field.repeated
            && field.ty.is_scalar()
            && wire_type == WireType::LengthDelimited
            && natural != WireType::LengthDelimited)
}

/// Reads a length prefix and hands back exactly that many bytes.
fn read_delimited<'a>(reader: &mut Reader<'a>) -> Result<&'a [u8], CodecError> {
    let claimed = reader.varint()? as usize;
    if claimed > reader.remaining() {
        return Err(CodecError::UnexpectedEndOfBuffer {
            claimed,
            remaining: reader.remaining(),
        });
    }
    Ok(reader.take(claimed)?)
}

fn decode_field(
    reader: &mut Reader<'_>,
    message: &mut MessageValue,
    field: &FieldDescriptor,
    wire_type: WireType,
    registry: &Registry,
) -> Result<(), CodecError> {
    if field.repeated {
        let natural = wire_type_of(&field.ty);
        if wire_type == WireType::LengthDelimited && natural != WireType::LengthDelimited {
            // Packed run: one length-delimited blob of concatenated
            // scalar encodings.
            let run = read_delimited(reader)?;
            let mut sub = Reader::new(run);
            while !sub.is_at_end() {
                let element = decode_scalar(&mut sub, &field.ty, registry)?;
                message.push(&field.name, element);
            }
        } else {
            let element = decode_value(reader, &field.ty, registry)?;
            message.push(&field.name, element);
        }
    } else {
        // Singular: last value wins, matching wire merge semantics.
        let value = decode_value(reader, &field.ty, registry)?;
        message.set(&field.name, value);
    }
    Ok(())
}

/// Reads one value of any field type, including nested messages.
fn decode_value(
    reader: &mut Reader<'_>,
    ty: &FieldType,
    registry: &Registry,
) -> Result<Value, CodecError> {
    if let FieldType::Message(type_name) = ty {
        let nested_descriptor = registry.resolve_message(type_name)?;
        let inner = read_delimited(reader)?;
        return Ok(Value::Message(decode(inner, nested_descriptor, registry)?));
    }
    decode_scalar(reader, ty, registry)
}

/// Reads one scalar value (no tag), shared by tagged values and packed
/// runs.
fn decode_scalar(
    reader: &mut Reader<'_>,
    ty: &FieldType,
    registry: &Registry,
) -> Result<Value, CodecError> {
    Ok(match ty {
        FieldType::Str => {
            Value::Str(String::from_utf8_lossy(read_delimited(reader)?).into_owned())
        }
        FieldType::Bool => Value::Bool(reader.bool()?),
        FieldType::Int32 => Value::I32(reader.int32()?),
        FieldType::Int64 => Value::I64(reader.int64()?),
        FieldType::Uint64 => Value::U64(reader.varint()?),
        FieldType::Double => Value::F64(reader.double()?),
        FieldType::Bytes => Value::Bytes(read_delimited(reader)?.to_vec()),
        FieldType::Enum(type_name) => {
            registry.resolve_enum(type_name)?;
            Value::Enum(reader.int32()?)
        }
        FieldType::Message(_) => unreachable!("message values handled in decode_value"),
    })
}

// =========================================================================
// Tests
// =========================================================================
