//! Dynamic message instances.
//!
//! The generic codec doesn't know about `Asset` or `MsgSend` structs;
//! it works on [`MessageValue`], a field-name → [`Value`] map, with the
//! matching [`MessageDescriptor`](crate::MessageDescriptor) supplying
//! the schema. The typed structs in the `runewire` facade convert
//! themselves to and from this form.
//!
//! # Presence
//!
//! A field *absent* from the map is unset: it reads as the schema
//! default (empty string, 0, false, empty bytes, empty list) and is
//! never written to the wire. A field *present* in the map is encoded
//! even when it holds the default value; presence is the "explicitly
//! set" bit.

use std::collections::BTreeMap;

use crate::{FieldType, MessageDescriptor};

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// One dynamically-typed field value.
///
/// The variant must match the field's declared [`FieldType`]; the codec
/// checks this at encode time and `verify` reports it with a dotted
/// path. Enum values carry the raw number; unknown numbers are legal
/// (forward compatibility).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    I32(i32),
    I64(i64),
    U64(u64),
    F64(f64),
    Bytes(Vec<u8>),
    Enum(i32),
    Message(MessageValue),
    List(Vec<Value>),
}

impl Value {
    /// The schema default for a singular field of the given type.
    /// Repeated fields default to an empty list regardless of type.
    pub fn default_for(ty: &FieldType) -> Value {
        match ty {
            FieldType::Str => Value::Str(String::new()),
            FieldType::Bool => Value::Bool(false),
            FieldType::Bytes => Value::Bytes(Vec::new()),
            FieldType::Int32 => Value::I32(0),
            FieldType::Int64 => Value::I64(0),
            FieldType::Uint64 => Value::U64(0),
            FieldType::Double => Value::F64(0.0),
            FieldType::Enum(_) => Value::Enum(0),
            FieldType::Message(_) => Value::Message(MessageValue::new()),
        }
    }

    /// Whether this value equals the schema default for its own
    /// variant. An empty list counts as default.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Bool(b) => !b,
            Value::I32(n) => *n == 0,
            Value::I64(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::F64(n) => *n == 0.0,
            Value::Bytes(b) => b.is_empty(),
            Value::Enum(n) => *n == 0,
            Value::Message(m) => m.is_empty(),
            Value::List(l) => l.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// MessageValue
// ---------------------------------------------------------------------------

/// A dynamic message instance: field name → value.
///
/// Backed by a `BTreeMap`; the iteration order of the *map* is
/// irrelevant to the wire format, because encoding walks the
/// descriptor's declaration order and probes the map per field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageValue {
    fields: BTreeMap<String, Value>,
}

impl MessageValue {
    /// An instance with no fields set. Encodes to zero bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field. Last write wins, mirroring wire decode semantics
    /// for singular fields.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// The value of a field, or `None` when unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The value of a field, or the schema default when unset.
    ///
    /// This is the "apply default at read time" rule: defaults are
    /// never materialized into the map.
    pub fn get_or_default(&self, name: &str, ty: &FieldType, repeated: bool) -> Value {
        if let Some(v) = self.fields.get(name) {
            return v.clone();
        }
        if repeated {
            Value::List(Vec::new())
        } else {
            Value::default_for(ty)
        }
    }

    /// Whether the field is explicitly set.
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Removes a field, returning it to the unset state.
    pub fn clear(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates set fields. Order is map order, not declaration order;
    /// the codec never relies on it.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Appends an element to a repeated field, creating the list when
    /// the field is unset (decode-side repeated semantics).
    pub fn push(&mut self, name: &str, value: Value) {
        match self.fields.get_mut(name) {
            Some(Value::List(items)) => items.push(value),
            _ => {
                self.fields
                    .insert(name.to_string(), Value::List(vec![value]));
            }
        }
    }

    /// Structural equality over *present* fields only, with the quirk
    /// that two instances differing merely by explicitly-set defaults
    /// are still distinct (`PartialEq` covers that case; this helper is
    /// the descriptor-aware comparison used in round-trip tests).
    pub fn semantically_equal(&self, other: &Self, desc: &MessageDescriptor) -> bool {
        desc.fields.iter().all(|f| {
            let a = self.get_or_default(&f.name, &f.ty, f.repeated);
            let b = other.get_or_default(&f.name, &f.ty, f.repeated);
            a == b
        })
    }
}

impl FromIterator<(String, Value)> for MessageValue {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDescriptor;

    #[test]
    fn test_unset_field_reads_as_default() {
        let m = MessageValue::new();
        assert_eq!(
            m.get_or_default("chain", &FieldType::Str, false),
            Value::Str(String::new())
        );
        assert_eq!(
            m.get_or_default("decimals", &FieldType::Int64, false),
            Value::I64(0)
        );
        assert_eq!(
            m.get_or_default("coins", &FieldType::Message("common.Coin".into()), true),
            Value::List(Vec::new())
        );
        assert!(!m.has("chain"));
    }

    #[test]
    fn test_set_then_get() {
        let mut m = MessageValue::new();
        m.set("chain", Value::Str("THOR".into()));
        assert!(m.has("chain"));
        assert_eq!(m.get("chain"), Some(&Value::Str("THOR".into())));
    }

    #[test]
    fn test_explicit_default_is_still_present() {
        // Presence is the "explicitly set" bit, independent of value.
        let mut m = MessageValue::new();
        m.set("synth", Value::Bool(false));
        assert!(m.has("synth"));
        assert!(m.get("synth").unwrap().is_default());
    }

    #[test]
    fn test_push_creates_and_appends() {
        let mut m = MessageValue::new();
        m.push("outHashes", Value::Str("aa".into()));
        m.push("outHashes", Value::Str("bb".into()));
        assert_eq!(
            m.get("outHashes"),
            Some(&Value::List(vec![
                Value::Str("aa".into()),
                Value::Str("bb".into())
            ]))
        );
    }

    #[test]
    fn test_clear_returns_field_to_unset() {
        let mut m = MessageValue::new();
        m.set("memo", Value::Str("swap".into()));
        assert_eq!(m.clear("memo"), Some(Value::Str("swap".into())));
        assert!(!m.has("memo"));
        assert!(m.is_empty());
    }

    #[test]
    fn test_semantic_equality_ignores_explicit_defaults() {
        let desc = MessageDescriptor::new(
            "common.Asset",
            vec![
                FieldDescriptor::new("chain", 1, FieldType::Str),
                FieldDescriptor::new("synth", 4, FieldType::Bool),
            ],
        )
        .unwrap();

        let a = MessageValue::new().with("chain", Value::Str("THOR".into()));
        let b = MessageValue::new()
            .with("chain", Value::Str("THOR".into()))
            .with("synth", Value::Bool(false));

        // Plain PartialEq sees the explicit default...
        assert_ne!(a, b);
        // ...descriptor-aware comparison does not.
        assert!(a.semantically_equal(&b, &desc));
    }
}
