//! # RuneWire
//!
//! Schema-driven protobuf codec for THORChain wire types.
//!
//! RuneWire gives transaction-construction code strongly-typed message
//! structs ([`Asset`], [`Coin`], [`Tx`], [`MsgDeposit`], [`MsgSend`],
//! ...) backed by one generic, descriptor-driven codec instead of
//! thousands of lines of generated per-type functions.
//!
//! ## Quick start
//!
//! ```rust
//! use runewire::{Asset, Coin, WireMessage};
//!
//! let coin = Coin {
//!     asset: Some(Asset {
//!         chain: "THOR".into(),
//!         symbol: "RUNE".into(),
//!         ticker: "RUNE".into(),
//!         ..Asset::default()
//!     }),
//!     amount: "100000000".into(),
//!     decimals: 8,
//! };
//!
//! let bytes = coin.encode().unwrap();
//! let decoded = Coin::decode(&bytes).unwrap();
//! assert_eq!(coin, decoded);
//! ```
//!
//! ## Layers
//!
//! - [`runewire_schema`]: descriptors, dynamic values, the registry.
//! - [`runewire_codec`]: wire primitives and the generic codec.
//! - this crate: typed bindings plus the process-wide [`registry`].
//!
//! The dynamic layer stays public: anything the typed structs can do,
//! you can also do against a bare
//! [`MessageValue`](runewire_schema::MessageValue) with a descriptor,
//! which is how forward-compatible tooling (explorers, debuggers)
//! consumes unknown message types.

use std::sync::OnceLock;

use tracing::debug;

use runewire_schema::Registry;

pub mod common;
pub mod cosmos;
mod message;
pub mod msgs;

pub use common::{Asset, Coin, Fee, ObservedTx, ProtoUint, PubKeySet, Status, Tx};
pub use message::WireMessage;
pub use msgs::{MsgDeposit, MsgSend};
pub use runewire_codec::{BytesRepr, CodecError, LongRepr, ObjectOptions, WireError};
pub use runewire_schema::SchemaError;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The shared registry of every THORChain/cosmos type this crate
/// knows. Built on first use, immutable afterwards; safe to hand out
/// to any number of threads.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let mut registry = Registry::new();
        // The schema tables are static; failure here is a wiring bug
        // (duplicate name, bad field number), not a runtime condition.
        common::register(&mut registry).expect("common schema registers cleanly");
        msgs::register(&mut registry).expect("types schema registers cleanly");
        cosmos::register(&mut registry).expect("cosmos schema registers cleanly");
        debug!(
            messages = registry.message_count(),
            enums = registry.enum_count(),
            "schema registry initialized"
        );
        registry
    })
}

// =========================================================================
// Tests
// =========================================================================
