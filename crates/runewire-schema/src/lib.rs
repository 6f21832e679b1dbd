//! Schema layer for RuneWire.
//!
//! This crate holds everything the codec needs to *know* about a
//! message type, without doing any encoding itself:
//!
//! - **Descriptors** ([`MessageDescriptor`], [`FieldDescriptor`],
//!   [`EnumDescriptor`]): the schema metadata: field names, tag
//!   numbers, declared types.
//! - **Values** ([`MessageValue`], [`Value`]): the dynamic instance
//!   model that generic encode/decode operates on.
//! - **Registry** ([`Registry`]): qualified-name lookup with lazy
//!   forward references.
//! - **Errors** ([`SchemaError`]): what can go wrong building or
//!   resolving schemas.
//!
//! # Architecture
//!
//! The schema layer sits below the codec: `runewire-codec` walks a
//! descriptor to drive the wire format, and the `runewire` facade
//! builds the concrete THORChain descriptors on top.
//!
//! ```text
//! Schema (descriptors) → Codec (bytes ↔ MessageValue) → Typed structs
//! ```

mod descriptor;
mod error;
mod registry;
mod value;

pub use descriptor::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor};
pub use error::SchemaError;
pub use registry::Registry;
pub use value::{MessageValue, Value};
