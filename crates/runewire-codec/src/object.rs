//! Conversion between instances and the generic JSON object form.
//!
//! `to_object` renders a [`MessageValue`] as a `serde_json::Value`
//! for display, storage, or hand-off to JSON consumers; `from_object`
//! is the inverse, turning loosely-typed JSON back into a
//! strongly-typed instance. Object keys are the field names verbatim
//! (camelCase, as declared).
//!
//! Rendering is configurable through [`ObjectOptions`] because JSON
//! consumers disagree on the awkward cases: 64-bit integers overflow
//! the JSON-number range of JavaScript, and byte blobs have no JSON
//! type at all. The defaults are the safe choices: longs as decimal
//! strings, bytes as base64, enums by name.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use runewire_schema::{FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry, Value};
use serde_json::{json, Map, Number};

use crate::CodecError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How 64-bit integer fields render in the object form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongRepr {
    /// Decimal string (`"100000000"`). Default; survives every JSON
    /// consumer without precision loss.
    #[default]
    Text,
    /// JSON number through f64, like a JavaScript number. Loses
    /// precision above 2^53.
    Number,
    /// Full-precision JSON integer. Fine for consumers that parse
    /// 64-bit integers natively.
    Native,
}

/// How byte fields render in the object form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BytesRepr {
    /// Base64 string. Default.
    #[default]
    Base64,
    /// Array of byte values.
    Array,
    /// JSON has no native byte type; renders as an array.
    Native,
}

/// Rendering options for [`to_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectOptions {
    /// Emit schema defaults for unset fields (repeated fields as `[]`,
    /// nested messages as `null`). Off by default: unset keys are
    /// omitted.
    pub include_defaults: bool,
    /// 64-bit integer rendering.
    pub longs: LongRepr,
    /// Byte field rendering.
    pub bytes: BytesRepr,
    /// Render enum values by declared name. Numbers with no declared
    /// name render numerically either way.
    pub enums_as_strings: bool,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            include_defaults: false,
            longs: LongRepr::default(),
            bytes: BytesRepr::default(),
            enums_as_strings: true,
        }
    }
}

impl ObjectOptions {
    /// The common "show me everything" configuration.
    pub fn with_defaults() -> Self {
        Self {
            include_defaults: true,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// to_object
// ---------------------------------------------------------------------------

/// Renders an instance as a JSON object.
///
/// Keys appear for set fields only, unless
/// [`include_defaults`](ObjectOptions::include_defaults) is on.
///
/// # Errors
/// [`CodecError::Schema`] when a referenced type can't be resolved;
/// [`CodecError::TypeMismatch`] when a value's variant doesn't match
/// its declared type.
pub fn to_object(
    value: &MessageValue,
    descriptor: &MessageDescriptor,
    registry: &Registry,
    options: &ObjectOptions,
) -> Result<serde_json::Value, CodecError> {
    let mut object = Map::new();
    for field in &descriptor.fields {
        match value.get(&field.name) {
            Some(field_value) => {
                object.insert(
                    field.name.clone(),
                    render_field(field_value, field, registry, options)?,
                );
            }
            None if options.include_defaults => {
                object.insert(field.name.clone(), default_json(field, registry, options)?);
            }
            None => {}
        }
    }
    Ok(serde_json::Value::Object(object))
}

fn render_field(
    value: &Value,
    field: &FieldDescriptor,
    registry: &Registry,
    options: &ObjectOptions,
) -> Result<serde_json::Value, CodecError> {
    if field.repeated {
        let Value::List(items) = value else {
            return Err(CodecError::mismatch(&field.name, "array"));
        };
        let rendered: Result<Vec<_>, _> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                render_value(
                    item,
                    &field.ty,
                    &format!("{}.{index}", field.name),
                    registry,
                    options,
                )
            })
            .collect();
        return Ok(serde_json::Value::Array(rendered?));
    }
    render_value(value, &field.ty, &field.name, registry, options)
}

fn render_value(
    value: &Value,
    ty: &FieldType,
    path: &str,
    registry: &Registry,
    options: &ObjectOptions,
) -> Result<serde_json::Value, CodecError> {
    Ok(match (ty, value) {
        (FieldType::Str, Value::Str(s)) => json!(s),
        (FieldType::Bool, Value::Bool(b)) => json!(b),
        (FieldType::Int32, Value::I32(n)) => json!(n),
        (FieldType::Int64, Value::I64(n)) => render_long(i128::from(*n), options),
        (FieldType::Uint64, Value::U64(n)) => render_long(i128::from(*n), options),
        (FieldType::Double, Value::F64(n)) => match Number::from_f64(*n) {
            Some(number) => serde_json::Value::Number(number),
            // NaN and the infinities have no JSON number form; render
            // their conventional string spellings.
            None => json!(format!("{n}")),
        },
        (FieldType::Bytes, Value::Bytes(bytes)) => match options.bytes {
            BytesRepr::Base64 => json!(BASE64.encode(bytes)),
            BytesRepr::Array | BytesRepr::Native => json!(bytes),
        },
        (FieldType::Enum(type_name), Value::Enum(number)) => {
            let descriptor = registry.resolve_enum(type_name)?;
            match descriptor.name_of(*number) {
                Some(name) if options.enums_as_strings => json!(name),
                _ => json!(number),
            }
        }
        (FieldType::Message(type_name), Value::Message(nested)) => {
            let descriptor = registry.resolve_message(type_name)?;
            to_object(nested, descriptor, registry, options)?
        }
        (ty, _) => {
            return Err(CodecError::mismatch(
                path,
                crate::encode::expected_noun(ty),
            ));
        }
    })
}

fn render_long(value: i128, options: &ObjectOptions) -> serde_json::Value {
    match options.longs {
        LongRepr::Text => json!(value.to_string()),
        LongRepr::Number => json!(value as f64),
        LongRepr::Native => {
            // i128 here is only ever an i64 or u64 in disguise.
            if let Ok(n) = i64::try_from(value) {
                json!(n)
            } else {
                json!(value as u64)
            }
        }
    }
}

/// The JSON default for an unset field, used with `include_defaults`.
fn default_json(
    field: &FieldDescriptor,
    registry: &Registry,
    options: &ObjectOptions,
) -> Result<serde_json::Value, CodecError> {
    if field.repeated {
        return Ok(json!([]));
    }
    Ok(match &field.ty {
        FieldType::Str => json!(""),
        FieldType::Bool => json!(false),
        FieldType::Int32 => json!(0),
        FieldType::Int64 | FieldType::Uint64 => render_long(0, options),
        FieldType::Double => json!(0.0),
        FieldType::Bytes => match options.bytes {
            BytesRepr::Base64 => json!(""),
            BytesRepr::Array | BytesRepr::Native => json!([]),
        },
        FieldType::Enum(type_name) => {
            let descriptor = registry.resolve_enum(type_name)?;
            match descriptor.name_of(0) {
                Some(name) if options.enums_as_strings => json!(name),
                _ => json!(0),
            }
        }
        // An unset nested message renders as null, not {}; callers
        // can tell "absent" from "present and empty".
        FieldType::Message(_) => serde_json::Value::Null,
    })
}

// ---------------------------------------------------------------------------
// from_object
// ---------------------------------------------------------------------------

/// Builds an instance from a loosely-typed JSON object.
///
/// Unknown keys are ignored; `null` means unset. Scalar coercion is
/// lenient where the JSON type system forces it to be; 64-bit
/// integers accept numbers or decimal strings, bytes accept base64
/// strings or number arrays, enums accept names or numbers.
///
/// # Errors
/// [`CodecError::TypeMismatch`] when a nested-message field isn't an
/// object, a repeated field isn't an array, or a scalar can't be
/// coerced.
pub fn from_object(
    object: &serde_json::Value,
    descriptor: &MessageDescriptor,
    registry: &Registry,
) -> Result<MessageValue, CodecError> {
    from_object_at(object, descriptor, registry, "")
}

fn from_object_at(
    object: &serde_json::Value,
    descriptor: &MessageDescriptor,
    registry: &Registry,
    prefix: &str,
) -> Result<MessageValue, CodecError> {
    let serde_json::Value::Object(map) = object else {
        let path = if prefix.is_empty() {
            descriptor.name.clone()
        } else {
            prefix.trim_end_matches('.').to_string()
        };
        return Err(CodecError::mismatch(path, "object"));
    };

    let mut message = MessageValue::new();
    for field in &descriptor.fields {
        let Some(raw) = map.get(&field.name) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }
        let path = format!("{prefix}{}", field.name);
        if field.repeated {
            let serde_json::Value::Array(items) = raw else {
                return Err(CodecError::mismatch(path, "array"));
            };
            let mut converted = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                converted.push(convert_value(
                    item,
                    &field.ty,
                    &format!("{path}.{index}"),
                    registry,
                )?);
            }
            message.set(&field.name, Value::List(converted));
        } else {
            message.set(
                &field.name,
                convert_value(raw, &field.ty, &path, registry)?,
            );
        }
    }
    Ok(message)
}

fn convert_value(
    raw: &serde_json::Value,
    ty: &FieldType,
    path: &str,
    registry: &Registry,
) -> Result<Value, CodecError> {
    let mismatch = || CodecError::mismatch(path, crate::encode::expected_noun(ty));
    Ok(match ty {
        FieldType::Str => Value::Str(raw.as_str().ok_or_else(mismatch)?.to_string()),
        FieldType::Bool => Value::Bool(raw.as_bool().ok_or_else(mismatch)?),
        FieldType::Int32 => {
            let n = coerce_i64(raw).ok_or_else(mismatch)?;
            Value::I32(i32::try_from(n).map_err(|_| mismatch())?)
        }
        FieldType::Int64 => Value::I64(coerce_i64(raw).ok_or_else(mismatch)?),
        FieldType::Uint64 => Value::U64(coerce_u64(raw).ok_or_else(mismatch)?),
        FieldType::Double => {
            let n = match raw {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.parse().ok(),
                _ => None,
            };
            Value::F64(n.ok_or_else(mismatch)?)
        }
        FieldType::Bytes => match raw {
            serde_json::Value::String(s) => {
                Value::Bytes(BASE64.decode(s).map_err(|_| mismatch())?)
            }
            serde_json::Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for item in items {
                    let byte = item
                        .as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(mismatch)?;
                    bytes.push(byte);
                }
                Value::Bytes(bytes)
            }
            _ => return Err(mismatch()),
        },
        FieldType::Enum(type_name) => {
            let descriptor = registry.resolve_enum(type_name)?;
            match raw {
                serde_json::Value::String(name) => {
                    Value::Enum(descriptor.number_of(name).ok_or_else(mismatch)?)
                }
                serde_json::Value::Number(_) => {
                    let n = coerce_i64(raw).ok_or_else(mismatch)?;
                    Value::Enum(i32::try_from(n).map_err(|_| mismatch())?)
                }
                _ => return Err(mismatch()),
            }
        }
        FieldType::Message(type_name) => {
            let descriptor = registry.resolve_message(type_name)?;
            Value::Message(from_object_at(
                raw,
                descriptor,
                registry,
                &format!("{path}."),
            )?)
        }
    })
}

fn coerce_i64(raw: &serde_json::Value) -> Option<i64> {
    match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn coerce_u64(raw: &serde_json::Value) -> Option<u64> {
    match raw {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use runewire_schema::{EnumDescriptor, FieldDescriptor};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_message(
                MessageDescriptor::new(
                    "common.Asset",
                    vec![
                        FieldDescriptor::new("chain", 1, FieldType::Str),
                        FieldDescriptor::new("symbol", 2, FieldType::Str),
                        FieldDescriptor::new("ticker", 3, FieldType::Str),
                        FieldDescriptor::new("synth", 4, FieldType::Bool),
                    ],
                )
                .unwrap(),
            )
            .unwrap();
        registry
            .register_message(
                MessageDescriptor::new(
                    "common.Coin",
                    vec![
                        FieldDescriptor::new(
                            "asset",
                            1,
                            FieldType::Message("common.Asset".into()),
                        ),
                        FieldDescriptor::new("amount", 2, FieldType::Str),
                        FieldDescriptor::new("decimals", 3, FieldType::Int64),
                    ],
                )
                .unwrap(),
            )
            .unwrap();
        registry
            .register_message(
                MessageDescriptor::new(
                    "types.MsgDeposit",
                    vec![
                        FieldDescriptor::new(
                            "coins",
                            1,
                            FieldType::Message("common.Coin".into()),
                        )
                        .repeated(),
                        FieldDescriptor::new("memo", 2, FieldType::Str),
                        FieldDescriptor::new("signer", 3, FieldType::Bytes),
                    ],
                )
                .unwrap(),
            )
            .unwrap();
        registry
            .register_enum(EnumDescriptor::new(
                "common.Status",
                vec![("incomplete", 0), ("done", 1), ("reverted", 2)],
            ))
            .unwrap();
        registry
            .register_message(
                MessageDescriptor::new(
                    "test.WithStatus",
                    vec![FieldDescriptor::new(
                        "status",
                        1,
                        FieldType::Enum("common.Status".into()),
                    )],
                )
                .unwrap(),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_unset_keys_omitted_by_default() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Asset").unwrap();
        let value = MessageValue::new().with("chain", Value::Str("THOR".into()));
        let object =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "chain": "THOR" }));
    }

    #[test]
    fn test_include_defaults_fills_every_key() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Asset").unwrap();
        let value = MessageValue::new().with("chain", Value::Str("THOR".into()));
        let object = to_object(
            &value,
            descriptor,
            &registry,
            &ObjectOptions::with_defaults(),
        )
        .unwrap();
        assert_eq!(
            object,
            json!({ "chain": "THOR", "symbol": "", "ticker": "", "synth": false })
        );
    }

    #[test]
    fn test_longs_render_as_decimal_strings_by_default() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Coin").unwrap();
        let value = MessageValue::new().with("decimals", Value::I64(8));
        let object =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "decimals": "8" }));
    }

    #[test]
    fn test_longs_native_keeps_full_precision() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Coin").unwrap();
        let big = (1i64 << 53) + 1; // not representable in f64
        let value = MessageValue::new().with("decimals", Value::I64(big));
        let options = ObjectOptions {
            longs: LongRepr::Native,
            ..ObjectOptions::default()
        };
        let object = to_object(&value, descriptor, &registry, &options).unwrap();
        assert_eq!(object, json!({ "decimals": big }));
    }

    #[test]
    fn test_bytes_render_base64_by_default() {
        let registry = registry();
        let descriptor = registry.resolve_message("types.MsgDeposit").unwrap();
        let value = MessageValue::new().with("signer", Value::Bytes(vec![0xDE, 0xAD]));
        let object =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "signer": "3q0=" }));
    }

    #[test]
    fn test_bytes_render_as_array_when_asked() {
        let registry = registry();
        let descriptor = registry.resolve_message("types.MsgDeposit").unwrap();
        let value = MessageValue::new().with("signer", Value::Bytes(vec![1, 2, 3]));
        let options = ObjectOptions {
            bytes: BytesRepr::Array,
            ..ObjectOptions::default()
        };
        let object = to_object(&value, descriptor, &registry, &options).unwrap();
        assert_eq!(object, json!({ "signer": [1, 2, 3] }));
    }

    #[test]
    fn test_enums_render_by_name() {
        let registry = registry();
        let descriptor = registry.resolve_message("test.WithStatus").unwrap();
        let value = MessageValue::new().with("status", Value::Enum(1));
        let object =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "status": "done" }));

        // Undeclared numbers fall back to the number.
        let value = MessageValue::new().with("status", Value::Enum(42));
        let object =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "status": 42 }));
    }

    #[test]
    fn test_nested_message_renders_recursively() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Coin").unwrap();
        let value = MessageValue::new().with(
            "asset",
            Value::Message(MessageValue::new().with("chain", Value::Str("THOR".into()))),
        );
        let object =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "asset": { "chain": "THOR" } }));
    }

    #[test]
    fn test_from_object_round_trips() {
        let registry = registry();
        let descriptor = registry.resolve_message("types.MsgDeposit").unwrap();
        let object = json!({
            "coins": [
                { "asset": { "chain": "THOR", "symbol": "RUNE" }, "amount": "100000000", "decimals": "8" }
            ],
            "memo": "=:BTC.BTC:bc1q...",
            "signer": "3q0="
        });
        let value = from_object(&object, descriptor, &registry).unwrap();
        assert_eq!(
            value.get("signer"),
            Some(&Value::Bytes(vec![0xDE, 0xAD]))
        );
        let back =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap();
        assert_eq!(back, object);
    }

    #[test]
    fn test_from_object_accepts_long_as_number_or_string() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Coin").unwrap();
        let a = from_object(&json!({ "decimals": 8 }), descriptor, &registry).unwrap();
        let b = from_object(&json!({ "decimals": "8" }), descriptor, &registry).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get("decimals"), Some(&Value::I64(8)));
    }

    #[test]
    fn test_from_object_rejects_non_object_nested_field() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Coin").unwrap();
        let err =
            from_object(&json!({ "asset": "THOR.RUNE" }), descriptor, &registry).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { path, .. } if path == "asset"));
    }

    #[test]
    fn test_from_object_rejects_non_array_repeated_field() {
        let registry = registry();
        let descriptor = registry.resolve_message("types.MsgDeposit").unwrap();
        let err =
            from_object(&json!({ "coins": {} }), descriptor, &registry).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { path, .. } if path == "coins"));
    }

    #[test]
    fn test_from_object_ignores_unknown_keys_and_nulls() {
        let registry = registry();
        let descriptor = registry.resolve_message("common.Asset").unwrap();
        let value = from_object(
            &json!({ "chain": "THOR", "memo": "not a field", "symbol": null }),
            descriptor,
            &registry,
        )
        .unwrap();
        assert!(value.has("chain"));
        assert!(!value.has("symbol"));
    }

    #[test]
    fn test_from_object_enum_by_name_or_number() {
        let registry = registry();
        let descriptor = registry.resolve_message("test.WithStatus").unwrap();
        let by_name =
            from_object(&json!({ "status": "reverted" }), descriptor, &registry).unwrap();
        let by_number =
            from_object(&json!({ "status": 2 }), descriptor, &registry).unwrap();
        assert_eq!(by_name, by_number);
        assert_eq!(by_name.get("status"), Some(&Value::Enum(2)));
    }

    #[test]
    fn test_to_object_error_path_is_index_qualified() {
        // A bad second element reports coins.1, matching the wording
        // of verify and from_object.
        let registry = registry();
        let descriptor = registry.resolve_message("types.MsgDeposit").unwrap();
        let value = MessageValue::new().with(
            "coins",
            Value::List(vec![
                Value::Message(MessageValue::new().with("amount", Value::Str("1".into()))),
                Value::Str("not a coin".into()),
            ]),
        );
        let err =
            to_object(&value, descriptor, &registry, &ObjectOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "coins.1: object expected");
    }

    #[test]
    fn test_from_object_nested_error_path() {
        let registry = registry();
        let descriptor = registry.resolve_message("types.MsgDeposit").unwrap();
        let err = from_object(
            &json!({ "coins": [{ "asset": { "chain": 42 } }] }),
            descriptor,
            &registry,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "coins.0.asset.chain: string expected");
    }
}
