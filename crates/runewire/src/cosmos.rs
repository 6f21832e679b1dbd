//! Typed bindings for the `cosmos.base.v1beta1` namespace.
//!
//! The handful of cosmos-sdk base types the THORChain messages lean
//! on. `MsgSend.amount` carries these [`Coin`]s, not the `common`
//! namespace's; the two coin types differ (denom/amount pair vs
//! asset/amount/decimals) and both are registered.

use serde::{Deserialize, Serialize};

use runewire_codec::CodecError;
use runewire_schema::{
    FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry, SchemaError,
};

use crate::message::{get_str, put_str, WireMessage};

/// Registers every `cosmos.base.v1beta1` type.
pub(crate) fn register(registry: &mut Registry) -> Result<(), SchemaError> {
    registry.register_message(coin_descriptor()?)?;
    registry.register_message(dec_coin_descriptor()?)?;
    registry.register_message(int_proto_descriptor()?)?;
    registry.register_message(dec_proto_descriptor()?)?;
    Ok(())
}

/// A cosmos-sdk coin: bare denom plus integer amount string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

fn coin_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "cosmos.base.v1beta1.Coin",
        vec![
            FieldDescriptor::new("denom", 1, FieldType::Str),
            FieldDescriptor::new("amount", 2, FieldType::Str),
        ],
    )
}

impl WireMessage for Coin {
    const TYPE_NAME: &'static str = "cosmos.base.v1beta1.Coin";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "denom", &self.denom);
        put_str(&mut value, "amount", &self.amount);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            denom: get_str(value, "denom")?,
            amount: get_str(value, "amount")?,
        })
    }
}

/// A cosmos-sdk coin with a decimal amount string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecCoin {
    pub denom: String,
    pub amount: String,
}

fn dec_coin_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "cosmos.base.v1beta1.DecCoin",
        vec![
            FieldDescriptor::new("denom", 1, FieldType::Str),
            FieldDescriptor::new("amount", 2, FieldType::Str),
        ],
    )
}

impl WireMessage for DecCoin {
    const TYPE_NAME: &'static str = "cosmos.base.v1beta1.DecCoin";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "denom", &self.denom);
        put_str(&mut value, "amount", &self.amount);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            denom: get_str(value, "denom")?,
            amount: get_str(value, "amount")?,
        })
    }
}

/// A big integer carried as its decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntProto {
    pub int: String,
}

fn int_proto_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "cosmos.base.v1beta1.IntProto",
        vec![FieldDescriptor::new("int", 1, FieldType::Str)],
    )
}

impl WireMessage for IntProto {
    const TYPE_NAME: &'static str = "cosmos.base.v1beta1.IntProto";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "int", &self.int);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            int: get_str(value, "int")?,
        })
    }
}

/// A big decimal carried as its decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecProto {
    pub dec: String,
}

fn dec_proto_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "cosmos.base.v1beta1.DecProto",
        vec![FieldDescriptor::new("dec", 1, FieldType::Str)],
    )
}

impl WireMessage for DecProto {
    const TYPE_NAME: &'static str = "cosmos.base.v1beta1.DecProto";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "dec", &self.dec);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            dec: get_str(value, "dec")?,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
