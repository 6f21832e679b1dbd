//! Wire codec for RuneWire.
//!
//! This crate turns schema descriptors into bytes and back:
//!
//! - **Primitives** ([`Writer`], [`Reader`], [`WireType`]): the four
//!   low-level wire encodings: varints, 64-bit fixed, length-delimited
//!   runs, 32-bit fixed.
//! - **Message codec** ([`encode`], [`decode`], [`verify`]): one
//!   generic, descriptor-driven implementation of what a protobuf
//!   generator would emit per message type.
//! - **Object form** ([`to_object`], [`from_object`],
//!   [`ObjectOptions`]): conversion to and from loosely-typed JSON.
//! - **Errors** ([`WireError`], [`CodecError`]): structural and
//!   type-level failures, kept apart by layer.
//!
//! # Architecture
//!
//! Every operation here is a pure, single-pass function over borrowed
//! data: no I/O, no shared mutable state, bounded by input size.
//! Concurrent calls on disjoint data need no synchronization; the
//! only shared structure is the read-only
//! [`Registry`](runewire_schema::Registry), populated before use.
//!
//! ```text
//! Descriptors (runewire-schema) → this crate → typed structs (runewire)
//! ```

mod decode;
mod encode;
mod error;
mod object;
mod reader;
mod verify;
mod wire;
mod writer;

pub use decode::decode;
pub use encode::encode;
pub use error::{CodecError, WireError};
pub use object::{from_object, to_object, BytesRepr, LongRepr, ObjectOptions};
pub use reader::Reader;
pub use verify::verify;
pub use wire::WireType;
pub use writer::Writer;
