//! Typed bindings for the `types` namespace: the messages a wallet
//! actually signs and broadcasts.
//!
//! `MsgDeposit` moves funds into the protocol itself (swaps, liquidity,
//! bonds; the action rides in the memo); `MsgSend` is a plain
//! wallet-to-wallet transfer. Addresses are raw bech32-decoded bytes
//! on the wire, which is why `signer`/`fromAddress`/`toAddress` are
//! byte fields, not strings.

use serde::{Deserialize, Serialize};

use runewire_codec::CodecError;
use runewire_schema::{
    FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry, SchemaError,
};

use crate::common::Coin;
use crate::cosmos;
use crate::message::{
    get_bytes, get_messages, get_str, put_bytes, put_messages, put_str, WireMessage,
};

/// Registers every `types` message.
pub(crate) fn register(registry: &mut Registry) -> Result<(), SchemaError> {
    registry.register_message(msg_deposit_descriptor()?)?;
    registry.register_message(msg_send_descriptor()?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// MsgDeposit
// ---------------------------------------------------------------------------

/// A deposit into the protocol. The memo selects the action
/// (`=:BTC.BTC:...` swaps, `+:...` adds liquidity, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MsgDeposit {
    pub coins: Vec<Coin>,
    pub memo: String,
    /// Signer account address, raw bytes.
    pub signer: Vec<u8>,
}

fn msg_deposit_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "types.MsgDeposit",
        vec![
            FieldDescriptor::new("coins", 1, FieldType::Message("common.Coin".into()))
                .repeated(),
            FieldDescriptor::new("memo", 2, FieldType::Str),
            FieldDescriptor::new("signer", 3, FieldType::Bytes),
        ],
    )
}

impl WireMessage for MsgDeposit {
    const TYPE_NAME: &'static str = "types.MsgDeposit";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_messages(&mut value, "coins", &self.coins);
        put_str(&mut value, "memo", &self.memo);
        put_bytes(&mut value, "signer", &self.signer);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            coins: get_messages(value, "coins")?,
            memo: get_str(value, "memo")?,
            signer: get_bytes(value, "signer")?,
        })
    }
}

// ---------------------------------------------------------------------------
// MsgSend
// ---------------------------------------------------------------------------

/// A wallet-to-wallet transfer of cosmos coins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MsgSend {
    /// Sender account address, raw bytes.
    pub from_address: Vec<u8>,
    /// Recipient account address, raw bytes.
    pub to_address: Vec<u8>,
    pub amount: Vec<cosmos::Coin>,
}

fn msg_send_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "types.MsgSend",
        vec![
            FieldDescriptor::new("fromAddress", 1, FieldType::Bytes),
            FieldDescriptor::new("toAddress", 2, FieldType::Bytes),
            FieldDescriptor::new(
                "amount",
                3,
                FieldType::Message("cosmos.base.v1beta1.Coin".into()),
            )
            .repeated(),
        ],
    )
}

impl WireMessage for MsgSend {
    const TYPE_NAME: &'static str = "types.MsgSend";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_bytes(&mut value, "fromAddress", &self.from_address);
        put_bytes(&mut value, "toAddress", &self.to_address);
        put_messages(&mut value, "amount", &self.amount);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            from_address: get_bytes(value, "fromAddress")?,
            to_address: get_bytes(value, "toAddress")?,
            amount: get_messages(value, "amount")?,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Asset;
    use runewire_codec::ObjectOptions;
    use serde_json::json;

    #[test]
    fn test_msg_deposit_round_trip() {
        let deposit = MsgDeposit {
            coins: vec![Coin {
                asset: Some(Asset {
                    chain: "THOR".into(),
                    symbol: "RUNE".into(),
                    ticker: "RUNE".into(),
                    ..Asset::default()
                }),
                amount: "150000000".into(),
                ..Coin::default()
            }],
            memo: "=:BTC.BTC:bc1qaddr".into(),
            signer: vec![0x01, 0x02, 0x03, 0x04],
        };
        let decoded = MsgDeposit::decode(&deposit.encode().unwrap()).unwrap();
        assert_eq!(decoded, deposit);
    }

    #[test]
    fn test_msg_deposit_signer_is_length_delimited_bytes() {
        let deposit = MsgDeposit {
            signer: vec![0xAA, 0xBB],
            ..MsgDeposit::default()
        };
        // Field 3, length-delimited → tag 0x1A.
        assert_eq!(deposit.encode().unwrap(), vec![0x1A, 0x02, 0xAA, 0xBB]);
    }

    #[test]
    fn test_msg_send_round_trip() {
        let send = MsgSend {
            from_address: vec![1; 20],
            to_address: vec![2; 20],
            amount: vec![cosmos::Coin {
                denom: "rune".into(),
                amount: "25000000".into(),
            }],
        };
        let decoded = MsgSend::decode(&send.encode().unwrap()).unwrap();
        assert_eq!(decoded, send);
    }

    #[test]
    fn test_msg_send_addresses_render_base64() {
        let send = MsgSend {
            from_address: vec![0xDE, 0xAD],
            to_address: vec![0xBE, 0xEF],
            ..MsgSend::default()
        };
        let object = send.to_object(&ObjectOptions::default()).unwrap();
        assert_eq!(
            object,
            json!({ "fromAddress": "3q0=", "toAddress": "vu8=" })
        );
    }

    #[test]
    fn test_msg_send_from_object_accepts_byte_arrays() {
        let object = json!({
            "fromAddress": [222, 173],
            "toAddress": "vu8=",
            "amount": [{ "denom": "rune", "amount": "1" }]
        });
        let send = MsgSend::from_object(&object).unwrap();
        assert_eq!(send.from_address, vec![0xDE, 0xAD]);
        assert_eq!(send.to_address, vec![0xBE, 0xEF]);
        assert_eq!(send.amount[0].denom, "rune");
    }

    #[test]
    fn test_verify_catches_wrong_coin_namespace_shape() {
        // A common.Coin-shaped object in MsgSend.amount: cosmos coins
        // have no "asset" field, so verify stays clean (unknown fields
        // are ignored) but a non-object element does not.
        let value = runewire_schema::MessageValue::new().with(
            "amount",
            runewire_schema::Value::List(vec![runewire_schema::Value::Str("1rune".into())]),
        );
        let problem = MsgSend::verify_value(&value).unwrap();
        assert_eq!(problem, "amount.0: object expected");
    }
}
