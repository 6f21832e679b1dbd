//! Typed bindings for the `common` namespace.
//!
//! These are THORChain's shared wire types: assets, coins, observed
//! transactions, fees. Field names and tag numbers come straight from
//! the chain's schema; the JSON object form uses the camelCase names
//! verbatim, which is why struct fields carry
//! `#[serde(rename_all = "camelCase")]`.

use serde::{Deserialize, Serialize};

use runewire_codec::CodecError;
use runewire_schema::{
    EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor, MessageValue, Registry,
    SchemaError,
};

use crate::message::{
    get_bool, get_enum, get_i64, get_message, get_messages, get_str, get_strs, put_bool,
    put_enum, put_i64, put_message, put_messages, put_str, put_strs, WireMessage,
};

/// Registers every `common` type. Called once from the registry
/// builder.
pub(crate) fn register(registry: &mut Registry) -> Result<(), SchemaError> {
    registry.register_enum(EnumDescriptor::new(
        "common.Status",
        vec![("incomplete", 0), ("done", 1), ("reverted", 2)],
    ))?;
    registry.register_message(asset_descriptor()?)?;
    registry.register_message(coin_descriptor()?)?;
    registry.register_message(pub_key_set_descriptor()?)?;
    registry.register_message(tx_descriptor()?)?;
    registry.register_message(fee_descriptor()?)?;
    registry.register_message(proto_uint_descriptor()?)?;
    registry.register_message(observed_tx_descriptor()?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Observation status of a transaction.
///
/// Typed structs store enum fields as the raw `i32` (so unknown
/// numbers from a newer schema survive decode); this enum is the view
/// over the declared values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Incomplete,
    Done,
    Reverted,
}

impl Status {
    /// The declared value for a wire number, if any.
    pub fn from_i32(number: i32) -> Option<Self> {
        match number {
            0 => Some(Self::Incomplete),
            1 => Some(Self::Done),
            2 => Some(Self::Reverted),
            _ => None,
        }
    }

    /// The wire number.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A chain/symbol/ticker triple identifying an asset, e.g.
/// `THOR.RUNE` or a synth/trade variant of it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Asset {
    pub chain: String,
    pub symbol: String,
    pub ticker: String,
    pub synth: bool,
    pub trade: bool,
    pub secured: bool,
}

fn asset_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.Asset",
        vec![
            FieldDescriptor::new("chain", 1, FieldType::Str),
            FieldDescriptor::new("symbol", 2, FieldType::Str),
            FieldDescriptor::new("ticker", 3, FieldType::Str),
            FieldDescriptor::new("synth", 4, FieldType::Bool),
            FieldDescriptor::new("trade", 5, FieldType::Bool),
            FieldDescriptor::new("secured", 6, FieldType::Bool),
        ],
    )
}

impl WireMessage for Asset {
    const TYPE_NAME: &'static str = "common.Asset";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "chain", &self.chain);
        put_str(&mut value, "symbol", &self.symbol);
        put_str(&mut value, "ticker", &self.ticker);
        put_bool(&mut value, "synth", self.synth);
        put_bool(&mut value, "trade", self.trade);
        put_bool(&mut value, "secured", self.secured);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            chain: get_str(value, "chain")?,
            symbol: get_str(value, "symbol")?,
            ticker: get_str(value, "ticker")?,
            synth: get_bool(value, "synth")?,
            trade: get_bool(value, "trade")?,
            secured: get_bool(value, "secured")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Coin
// ---------------------------------------------------------------------------

/// An amount of one asset. `amount` is a decimal string; chain
/// amounts overflow JSON numbers, so the schema keeps them textual
/// end to end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coin {
    pub asset: Option<Asset>,
    pub amount: String,
    pub decimals: i64,
}

fn coin_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.Coin",
        vec![
            FieldDescriptor::new("asset", 1, FieldType::Message("common.Asset".into())),
            FieldDescriptor::new("amount", 2, FieldType::Str),
            FieldDescriptor::new("decimals", 3, FieldType::Int64),
        ],
    )
}

impl WireMessage for Coin {
    const TYPE_NAME: &'static str = "common.Coin";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_message(&mut value, "asset", self.asset.as_ref());
        put_str(&mut value, "amount", &self.amount);
        put_i64(&mut value, "decimals", self.decimals);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            asset: get_message(value, "asset")?,
            amount: get_str(value, "amount")?,
            decimals: get_i64(value, "decimals")?,
        })
    }
}

// ---------------------------------------------------------------------------
// PubKeySet
// ---------------------------------------------------------------------------

/// The secp256k1/ed25519 public key pair a node signs with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PubKeySet {
    pub secp256k1: String,
    pub ed25519: String,
}

fn pub_key_set_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.PubKeySet",
        vec![
            FieldDescriptor::new("secp256k1", 1, FieldType::Str),
            FieldDescriptor::new("ed25519", 2, FieldType::Str),
        ],
    )
}

impl WireMessage for PubKeySet {
    const TYPE_NAME: &'static str = "common.PubKeySet";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "secp256k1", &self.secp256k1);
        put_str(&mut value, "ed25519", &self.ed25519);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            secp256k1: get_str(value, "secp256k1")?,
            ed25519: get_str(value, "ed25519")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tx
// ---------------------------------------------------------------------------

/// An observed external-chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tx {
    pub id: String,
    pub chain: String,
    pub from_address: String,
    pub to_address: String,
    pub coins: Vec<Coin>,
    pub gas: Vec<Coin>,
    pub memo: String,
}

fn tx_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.Tx",
        vec![
            FieldDescriptor::new("id", 1, FieldType::Str),
            FieldDescriptor::new("chain", 2, FieldType::Str),
            FieldDescriptor::new("fromAddress", 3, FieldType::Str),
            FieldDescriptor::new("toAddress", 4, FieldType::Str),
            FieldDescriptor::new("coins", 5, FieldType::Message("common.Coin".into()))
                .repeated(),
            FieldDescriptor::new("gas", 6, FieldType::Message("common.Coin".into()))
                .repeated(),
            FieldDescriptor::new("memo", 7, FieldType::Str),
        ],
    )
}

impl WireMessage for Tx {
    const TYPE_NAME: &'static str = "common.Tx";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "id", &self.id);
        put_str(&mut value, "chain", &self.chain);
        put_str(&mut value, "fromAddress", &self.from_address);
        put_str(&mut value, "toAddress", &self.to_address);
        put_messages(&mut value, "coins", &self.coins);
        put_messages(&mut value, "gas", &self.gas);
        put_str(&mut value, "memo", &self.memo);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            id: get_str(value, "id")?,
            chain: get_str(value, "chain")?,
            from_address: get_str(value, "fromAddress")?,
            to_address: get_str(value, "toAddress")?,
            coins: get_messages(value, "coins")?,
            gas: get_messages(value, "gas")?,
            memo: get_str(value, "memo")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Fee
// ---------------------------------------------------------------------------

/// The fee charged on an outbound transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fee {
    pub coins: Vec<Coin>,
    pub pool_deduct: String,
}

fn fee_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.Fee",
        vec![
            FieldDescriptor::new("coins", 1, FieldType::Message("common.Coin".into()))
                .repeated(),
            FieldDescriptor::new("poolDeduct", 2, FieldType::Str),
        ],
    )
}

impl WireMessage for Fee {
    const TYPE_NAME: &'static str = "common.Fee";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_messages(&mut value, "coins", &self.coins);
        put_str(&mut value, "poolDeduct", &self.pool_deduct);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            coins: get_messages(value, "coins")?,
            pool_deduct: get_str(value, "poolDeduct")?,
        })
    }
}

// ---------------------------------------------------------------------------
// ProtoUint
// ---------------------------------------------------------------------------

/// A 256-bit unsigned integer carried as its decimal string; the
/// chain's cosmos-sdk `Uint` custom type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtoUint {
    pub value: String,
}

fn proto_uint_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.ProtoUint",
        vec![FieldDescriptor::new("value", 1, FieldType::Str)],
    )
}

impl WireMessage for ProtoUint {
    const TYPE_NAME: &'static str = "common.ProtoUint";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_str(&mut value, "value", &self.value);
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            value: get_str(value, "value")?,
        })
    }
}

// ---------------------------------------------------------------------------
// ObservedTx
// ---------------------------------------------------------------------------

/// A [`Tx`] as witnessed by a validator, with observation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObservedTx {
    pub tx: Option<Tx>,
    /// Raw wire number; see [`ObservedTx::status`] for the typed view.
    pub status: i32,
    pub out_hashes: Vec<String>,
    pub block_height: i64,
    pub signers: Vec<String>,
    pub observed_pub_key: String,
    pub keysign_ms: i64,
    pub finalise_height: i64,
    pub aggregator: String,
    pub aggregator_target: String,
    pub aggregator_target_limit: String,
}

impl ObservedTx {
    /// The declared [`Status`], or `Incomplete` for numbers this
    /// schema doesn't know (a newer peer may send them).
    pub fn status(&self) -> Status {
        Status::from_i32(self.status).unwrap_or_default()
    }

    /// Sets the status from the typed view.
    pub fn set_status(&mut self, status: Status) {
        self.status = status.as_i32();
    }
}

fn observed_tx_descriptor() -> Result<MessageDescriptor, SchemaError> {
    MessageDescriptor::new(
        "common.ObservedTx",
        vec![
            FieldDescriptor::new("tx", 1, FieldType::Message("common.Tx".into())),
            FieldDescriptor::new("status", 2, FieldType::Enum("common.Status".into())),
            FieldDescriptor::new("outHashes", 3, FieldType::Str).repeated(),
            FieldDescriptor::new("blockHeight", 4, FieldType::Int64),
            FieldDescriptor::new("signers", 5, FieldType::Str).repeated(),
            FieldDescriptor::new("observedPubKey", 6, FieldType::Str),
            FieldDescriptor::new("keysignMs", 7, FieldType::Int64),
            FieldDescriptor::new("finaliseHeight", 8, FieldType::Int64),
            FieldDescriptor::new("aggregator", 9, FieldType::Str),
            FieldDescriptor::new("aggregatorTarget", 10, FieldType::Str),
            FieldDescriptor::new("aggregatorTargetLimit", 11, FieldType::Str),
        ],
    )
}

impl WireMessage for ObservedTx {
    const TYPE_NAME: &'static str = "common.ObservedTx";

    fn to_value(&self) -> MessageValue {
        let mut value = MessageValue::new();
        put_message(&mut value, "tx", self.tx.as_ref());
        put_enum(&mut value, "status", self.status);
        put_strs(&mut value, "outHashes", &self.out_hashes);
        put_i64(&mut value, "blockHeight", self.block_height);
        put_strs(&mut value, "signers", &self.signers);
        put_str(&mut value, "observedPubKey", &self.observed_pub_key);
        put_i64(&mut value, "keysignMs", self.keysign_ms);
        put_i64(&mut value, "finaliseHeight", self.finalise_height);
        put_str(&mut value, "aggregator", &self.aggregator);
        put_str(&mut value, "aggregatorTarget", &self.aggregator_target);
        put_str(
            &mut value,
            "aggregatorTargetLimit",
            &self.aggregator_target_limit,
        );
        value
    }

    fn from_value(value: &MessageValue) -> Result<Self, CodecError> {
        Ok(Self {
            tx: get_message(value, "tx")?,
            status: get_enum(value, "status")?,
            out_hashes: get_strs(value, "outHashes")?,
            block_height: get_i64(value, "blockHeight")?,
            signers: get_strs(value, "signers")?,
            observed_pub_key: get_str(value, "observedPubKey")?,
            keysign_ms: get_i64(value, "keysignMs")?,
            finalise_height: get_i64(value, "finaliseHeight")?,
            aggregator: get_str(value, "aggregator")?,
            aggregator_target: get_str(value, "aggregatorTarget")?,
            aggregator_target_limit: get_str(value, "aggregatorTargetLimit")?,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use runewire_codec::ObjectOptions;
    use serde_json::json;

    fn rune_asset() -> Asset {
        Asset {
            chain: "THOR".into(),
            symbol: "RUNE".into(),
            ticker: "RUNE".into(),
            ..Asset::default()
        }
    }

    #[test]
    fn test_asset_golden_bytes() {
        let asset = Asset {
            chain: "THOR".into(),
            ..Asset::default()
        };
        assert_eq!(
            asset.encode().unwrap(),
            vec![0x0A, 0x04, b'T', b'H', b'O', b'R']
        );
    }

    #[test]
    fn test_default_asset_encodes_to_zero_bytes() {
        assert!(Asset::default().encode().unwrap().is_empty());
        assert_eq!(Asset::decode(&[]).unwrap(), Asset::default());
    }

    #[test]
    fn test_coin_round_trip() {
        // A RUNE coin with a string amount and explicit decimals.
        let coin = Coin {
            asset: Some(rune_asset()),
            amount: "100000000".into(),
            decimals: 8,
        };
        let bytes = coin.encode().unwrap();
        let decoded = Coin::decode(&bytes).unwrap();
        assert_eq!(decoded, coin);
    }

    #[test]
    fn test_coin_to_object_with_defaults_expands_nested_asset_only() {
        let coin = Coin {
            asset: Some(rune_asset()),
            amount: "100000000".into(),
            decimals: 8,
        };
        let object = coin.to_object(&ObjectOptions::with_defaults()).unwrap();
        // The nested Asset gets its own defaults (synth: false, ...).
        assert_eq!(object["asset"]["synth"], json!(false));
        assert_eq!(object["asset"]["trade"], json!(false));
        // Coin's keys are exactly its schema fields, nothing invented.
        let mut keys: Vec<&String> = object.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, ["amount", "asset", "decimals"]);
    }

    #[test]
    fn test_coin_decimals_render_as_string_by_default() {
        let coin = Coin {
            amount: "1".into(),
            decimals: 8,
            ..Coin::default()
        };
        let object = coin.to_object(&ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "amount": "1", "decimals": "8" }));
    }

    #[test]
    fn test_tx_round_trip_with_repeated_coins() {
        let tx = Tx {
            id: "A9F2...".into(),
            chain: "BTC".into(),
            from_address: "bc1qfrom".into(),
            to_address: "bc1qto".into(),
            coins: vec![
                Coin {
                    asset: Some(rune_asset()),
                    amount: "1".into(),
                    ..Coin::default()
                },
                Coin {
                    amount: "2".into(),
                    ..Coin::default()
                },
            ],
            gas: vec![Coin {
                amount: "350".into(),
                ..Coin::default()
            }],
            memo: "=:THOR.RUNE".into(),
        };
        let decoded = Tx::decode(&tx.encode().unwrap()).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_tx_verify_reports_index_qualified_path() {
        // coins[1].asset.chain holds a number; the error names the
        // element.
        let tx_value = runewire_schema::MessageValue::new().with(
            "coins",
            runewire_schema::Value::List(vec![
                runewire_schema::Value::Message(
                    runewire_schema::MessageValue::new().with(
                        "asset",
                        runewire_schema::Value::Message(
                            runewire_schema::MessageValue::new().with(
                                "chain",
                                runewire_schema::Value::Str("BTC".into()),
                            ),
                        ),
                    ),
                ),
                runewire_schema::Value::Message(
                    runewire_schema::MessageValue::new().with(
                        "asset",
                        runewire_schema::Value::Message(
                            runewire_schema::MessageValue::new()
                                .with("chain", runewire_schema::Value::I64(42)),
                        ),
                    ),
                ),
            ]),
        );
        let problem = Tx::verify_value(&tx_value).unwrap();
        assert!(problem.contains("coins.1."));
        assert!(problem.contains("asset.chain: string expected"));
    }

    #[test]
    fn test_observed_tx_round_trip_with_enum_and_lists() {
        let mut observed = ObservedTx {
            tx: Some(Tx {
                id: "ABCD".into(),
                ..Tx::default()
            }),
            out_hashes: vec!["h1".into(), "h2".into()],
            block_height: 8_600_000,
            signers: vec!["thor1signer".into()],
            observed_pub_key: "thorpub1".into(),
            finalise_height: 8_600_010,
            ..ObservedTx::default()
        };
        observed.set_status(Status::Done);

        let decoded = ObservedTx::decode(&observed.encode().unwrap()).unwrap();
        assert_eq!(decoded, observed);
        assert_eq!(decoded.status(), Status::Done);
    }

    #[test]
    fn test_observed_tx_status_renders_by_name() {
        let mut observed = ObservedTx::default();
        observed.set_status(Status::Reverted);
        let object = observed.to_object(&ObjectOptions::default()).unwrap();
        assert_eq!(object, json!({ "status": "reverted" }));
    }

    #[test]
    fn test_unknown_status_number_survives_round_trip() {
        let observed = ObservedTx {
            status: 42,
            ..ObservedTx::default()
        };
        let decoded = ObservedTx::decode(&observed.encode().unwrap()).unwrap();
        assert_eq!(decoded.status, 42);
        // The typed view falls back to the default.
        assert_eq!(decoded.status(), Status::Incomplete);
    }

    #[test]
    fn test_fee_round_trip() {
        let fee = Fee {
            coins: vec![Coin {
                asset: Some(rune_asset()),
                amount: "2000000".into(),
                ..Coin::default()
            }],
            pool_deduct: "0".into(),
        };
        assert_eq!(Fee::decode(&fee.encode().unwrap()).unwrap(), fee);
    }

    #[test]
    fn test_pub_key_set_and_proto_uint_round_trip() {
        let keys = PubKeySet {
            secp256k1: "thorpub1addwnpep...".into(),
            ed25519: "thorpub1addwnpee...".into(),
        };
        assert_eq!(PubKeySet::decode(&keys.encode().unwrap()).unwrap(), keys);

        let uint = ProtoUint {
            value: "340282366920938463463374607431768211455".into(),
        };
        assert_eq!(ProtoUint::decode(&uint.encode().unwrap()).unwrap(), uint);
    }

    #[test]
    fn test_serde_derive_keys_match_wire_object_keys() {
        // The serde derive view uses the same camelCase names as the
        // wire object form.
        let fee = Fee {
            pool_deduct: "12".into(),
            ..Fee::default()
        };
        let derived = serde_json::to_value(&fee).unwrap();
        assert_eq!(derived["poolDeduct"], json!("12"));
    }

    #[test]
    fn test_forward_compatibility_extra_field_ignored() {
        // Asset bytes plus an unknown field 99: decodes identically.
        let mut bytes = Asset {
            chain: "GAIA".into(),
            ..Asset::default()
        }
        .encode()
        .unwrap();
        bytes.extend_from_slice(&[0x98, 0x06, 0x01]); // field 99, varint 1
        let decoded = Asset::decode(&bytes).unwrap();
        assert_eq!(decoded.chain, "GAIA");
    }
}
