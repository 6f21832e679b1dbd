//! The typed message seam.
//!
//! [`WireMessage`] is the trait every typed binding implements: it
//! names the registered type and converts between the struct and the
//! dynamic [`MessageValue`] the generic codec understands. Everything
//! else (`encode`, `decode`, `verify`, the JSON object form) is
//! provided on top of those two conversions and the shared
//! [`registry`](crate::registry).
//!
//! The conversion helpers at the bottom implement proto3 emission
//! semantics once, so each binding stays a thin field list:
//! `to_value` only inserts non-default values (an all-defaults struct
//! encodes to zero bytes), and `from_value` applies the schema default
//! for absent fields.

use runewire_codec::{CodecError, ObjectOptions};
use runewire_schema::{MessageValue, Value};

/// A strongly-typed view of one registered message type.
pub trait WireMessage: Sized {
    /// Fully qualified type name, e.g. `common.Asset`.
    const TYPE_NAME: &'static str;

    /// Converts to the dynamic form. Only non-default fields are
    /// inserted.
    fn to_value(&self) -> MessageValue;

    /// Converts from the dynamic form, applying schema defaults for
    /// absent fields.
    ///
    /// # Errors
    /// [`CodecError::TypeMismatch`] when a present field holds the
    /// wrong value variant.
    fn from_value(value: &MessageValue) -> Result<Self, CodecError>;

    /// Encodes to wire bytes.
    ///
    /// # Errors
    /// Propagates codec errors; with a well-formed binding the only
    /// realistic failure is a schema wiring bug surfacing as
    /// [`CodecError::Schema`].
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let registry = crate::registry();
        let descriptor = registry.resolve_message(Self::TYPE_NAME)?;
        runewire_codec::encode(&self.to_value(), descriptor, registry)
    }

    /// Decodes from wire bytes.
    ///
    /// # Errors
    /// Structural wire errors, plus [`CodecError::TypeMismatch`] if
    /// the decoded dynamic form doesn't fit this struct.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let registry = crate::registry();
        let descriptor = registry.resolve_message(Self::TYPE_NAME)?;
        let value = runewire_codec::decode(bytes, descriptor, registry)?;
        Self::from_value(&value)
    }

    /// Verifies a dynamic instance against this type's schema.
    /// Advisory, string-reporting; see [`runewire_codec::verify`].
    fn verify_value(value: &MessageValue) -> Option<String> {
        let registry = crate::registry();
        match registry.resolve_message(Self::TYPE_NAME) {
            Ok(descriptor) => runewire_codec::verify(value, descriptor, registry),
            Err(err) => Some(err.to_string()),
        }
    }

    /// Renders as the generic JSON object form.
    fn to_object(&self, options: &ObjectOptions) -> Result<serde_json::Value, CodecError> {
        let registry = crate::registry();
        let descriptor = registry.resolve_message(Self::TYPE_NAME)?;
        runewire_codec::to_object(&self.to_value(), descriptor, registry, options)
    }

    /// Builds from the generic JSON object form.
    ///
    /// # Errors
    /// [`CodecError::TypeMismatch`] for shape violations, per
    /// [`runewire_codec::from_object`].
    fn from_object(object: &serde_json::Value) -> Result<Self, CodecError> {
        let registry = crate::registry();
        let descriptor = registry.resolve_message(Self::TYPE_NAME)?;
        let value = runewire_codec::from_object(object, descriptor, registry)?;
        Self::from_value(&value)
    }
}

// ---------------------------------------------------------------------------
// to_value helpers: insert only when non-default
// ---------------------------------------------------------------------------

pub(crate) fn put_str(message: &mut MessageValue, name: &str, value: &str) {
    if !value.is_empty() {
        message.set(name, Value::Str(value.to_string()));
    }
}

pub(crate) fn put_bool(message: &mut MessageValue, name: &str, value: bool) {
    if value {
        message.set(name, Value::Bool(true));
    }
}

pub(crate) fn put_i64(message: &mut MessageValue, name: &str, value: i64) {
    if value != 0 {
        message.set(name, Value::I64(value));
    }
}

pub(crate) fn put_enum(message: &mut MessageValue, name: &str, value: i32) {
    if value != 0 {
        message.set(name, Value::Enum(value));
    }
}

pub(crate) fn put_bytes(message: &mut MessageValue, name: &str, value: &[u8]) {
    if !value.is_empty() {
        message.set(name, Value::Bytes(value.to_vec()));
    }
}

pub(crate) fn put_message<T: WireMessage>(
    message: &mut MessageValue,
    name: &str,
    value: Option<&T>,
) {
    if let Some(inner) = value {
        message.set(name, Value::Message(inner.to_value()));
    }
}

pub(crate) fn put_messages<T: WireMessage>(
    message: &mut MessageValue,
    name: &str,
    values: &[T],
) {
    if !values.is_empty() {
        let items = values
            .iter()
            .map(|v| Value::Message(v.to_value()))
            .collect();
        message.set(name, Value::List(items));
    }
}

pub(crate) fn put_strs(message: &mut MessageValue, name: &str, values: &[String]) {
    if !values.is_empty() {
        let items = values.iter().map(|s| Value::Str(s.clone())).collect();
        message.set(name, Value::List(items));
    }
}

// ---------------------------------------------------------------------------
// from_value helpers: read with schema defaults
// ---------------------------------------------------------------------------

pub(crate) fn get_str(value: &MessageValue, name: &str) -> Result<String, CodecError> {
    match value.get(name) {
        None => Ok(String::new()),
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(_) => Err(mismatch(name, "string")),
    }
}

pub(crate) fn get_bool(value: &MessageValue, name: &str) -> Result<bool, CodecError> {
    match value.get(name) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(mismatch(name, "boolean")),
    }
}

pub(crate) fn get_i64(value: &MessageValue, name: &str) -> Result<i64, CodecError> {
    match value.get(name) {
        None => Ok(0),
        Some(Value::I64(n)) => Ok(*n),
        Some(Value::I32(n)) => Ok(i64::from(*n)),
        Some(_) => Err(mismatch(name, "integer|Long")),
    }
}

pub(crate) fn get_enum(value: &MessageValue, name: &str) -> Result<i32, CodecError> {
    match value.get(name) {
        None => Ok(0),
        Some(Value::Enum(n)) => Ok(*n),
        Some(_) => Err(mismatch(name, "enum value")),
    }
}

pub(crate) fn get_bytes(value: &MessageValue, name: &str) -> Result<Vec<u8>, CodecError> {
    match value.get(name) {
        None => Ok(Vec::new()),
        Some(Value::Bytes(b)) => Ok(b.clone()),
        Some(_) => Err(mismatch(name, "buffer")),
    }
}

pub(crate) fn get_message<T: WireMessage>(
    value: &MessageValue,
    name: &str,
) -> Result<Option<T>, CodecError> {
    match value.get(name) {
        None => Ok(None),
        Some(Value::Message(inner)) => Ok(Some(T::from_value(inner)?)),
        Some(_) => Err(mismatch(name, "object")),
    }
}

pub(crate) fn get_messages<T: WireMessage>(
    value: &MessageValue,
    name: &str,
) -> Result<Vec<T>, CodecError> {
    match value.get(name) {
        None => Ok(Vec::new()),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| match item {
                Value::Message(inner) => T::from_value(inner),
                _ => Err(mismatch(name, "object")),
            })
            .collect(),
        Some(_) => Err(mismatch(name, "array")),
    }
}

pub(crate) fn get_strs(value: &MessageValue, name: &str) -> Result<Vec<String>, CodecError> {
    match value.get(name) {
        None => Ok(Vec::new()),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| match item {
                Value::Str(s) => Ok(s.clone()),
                _ => Err(mismatch(name, "string")),
            })
            .collect(),
        Some(_) => Err(mismatch(name, "array")),
    }
}

fn mismatch(path: &str, expected: &'static str) -> CodecError {
    CodecError::TypeMismatch {
        path: path.to_string(),
        expected,
    }
}
