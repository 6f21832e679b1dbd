//! Advisory structural validation.
//!
//! `verify` answers "does this instance match its schema?" with a
//! descriptive string instead of an error value, so callers can show
//! the message to a user or batch-report problems in a form. It is
//! never invoked implicitly by encode or decode.
//!
//! Error strings carry a dotted, index-qualified path down to the
//! offending field:
//!
//! ```text
//! coins.1.asset.chain: string expected
//! ```
//!
//! meaning: element 1 of `coins`, its `asset`, has a non-string
//! `chain`. The wording (`string expected`, `object expected`, ...)
//! matches the mismatch errors from encode, so the two surfaces read
//! the same.

use runewire_schema::{FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry, Value};

use crate::encode::expected_noun;

/// Checks an instance against its descriptor.
///
/// Returns `None` when the instance is well-formed, or a description
/// of the *first* problem found (fields are checked in declaration
/// order). Pure: repeated calls on the same instance return the same
/// result.
pub fn verify(
    value: &MessageValue,
    descriptor: &MessageDescriptor,
    registry: &Registry,
) -> Option<String> {
    for field in &descriptor.fields {
        let Some(field_value) = value.get(&field.name) else {
            if field.required {
                return Some(format!("{}: required field missing", field.name));
            }
            continue;
        };
        if let Some(problem) = verify_field(field_value, field, registry) {
            return Some(problem);
        }
    }
    None
}

fn verify_field(
    value: &Value,
    field: &FieldDescriptor,
    registry: &Registry,
) -> Option<String> {
    if field.repeated {
        let Value::List(items) = value else {
            return Some(format!("{}: array expected", field.name));
        };
        for (index, item) in items.iter().enumerate() {
            if let Some(problem) =
                verify_value(item, &field.ty, &format!("{}.{index}", field.name), registry)
            {
                return Some(problem);
            }
        }
        return None;
    }
    verify_value(value, &field.ty, &field.name, registry)
}

fn verify_value(
    value: &Value,
    ty: &FieldType,
    path: &str,
    registry: &Registry,
) -> Option<String> {
    let ok = match (ty, value) {
        (FieldType::Str, Value::Str(_)) => true,
        (FieldType::Bool, Value::Bool(_)) => true,
        // Integer kinds accept any integer variant; the wire encodes
        // them identically and object conversion is where width is
        // normalized.
        (FieldType::Int32, Value::I32(_) | Value::I64(_) | Value::U64(_)) => true,
        (
            FieldType::Int64 | FieldType::Uint64,
            Value::I32(_) | Value::I64(_) | Value::U64(_),
        ) => true,
        (FieldType::Double, Value::F64(_)) => true,
        (FieldType::Bytes, Value::Bytes(_)) => true,
        (FieldType::Enum(type_name), Value::Enum(number)) => {
            match registry.resolve_enum(type_name) {
                Ok(descriptor) => descriptor.contains(*number),
                Err(_) => return Some(format!("{path}: unresolved type {type_name}")),
            }
        }
        (FieldType::Message(type_name), Value::Message(nested)) => {
            let descriptor = match registry.resolve_message(type_name) {
                Ok(d) => d,
                Err(_) => return Some(format!("{path}: unresolved type {type_name}")),
            };
            // Recurse, prefixing the nested path.
            return verify(nested, descriptor, registry)
                .map(|problem| format!("{path}.{problem}"));
        }
        _ => false,
    };
    if ok {
        None
    } else {
        Some(format!("{path}: {} expected", expected_noun(ty)))
    }
}

// =========================================================================
// Tests
// =========================================================================
