//! The type registry: fully qualified name → descriptor.
//!
//! Fields that reference another message or enum do so by dotted name
//! (`"common.Coin"`), and the codec resolves that name here at
//! encode/decode time. Lazy by-name resolution is what makes forward
//! and mutual references work: `types.MsgDeposit` can be registered
//! before `common.Coin`, and a message may even reference itself.
//!
//! The registry is populated once at startup and read-only afterwards.
//! That makes it freely shareable across threads (`&Registry` is all
//! the codec ever needs); anyone wanting runtime re-registration must
//! synchronize externally.

use std::collections::HashMap;

use tracing::debug;

use crate::{EnumDescriptor, MessageDescriptor, SchemaError};

/// Resolves qualified type names to descriptors.
#[derive(Debug, Default)]
pub struct Registry {
    messages: HashMap<String, MessageDescriptor>,
    enums: HashMap<String, EnumDescriptor>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message descriptor under its qualified name.
    ///
    /// # Errors
    /// [`SchemaError::DuplicateType`] if the name is already taken by a
    /// message or an enum; silent overwrite would mask schema wiring
    /// bugs.
    pub fn register_message(
        &mut self,
        descriptor: MessageDescriptor,
    ) -> Result<(), SchemaError> {
        let name = descriptor.name.clone();
        if self.messages.contains_key(&name) || self.enums.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        debug!(name = %name, fields = descriptor.fields.len(), "registered message type");
        self.messages.insert(name, descriptor);
        Ok(())
    }

    /// Registers an enum descriptor under its qualified name.
    ///
    /// # Errors
    /// [`SchemaError::DuplicateType`] if the name is already taken.
    pub fn register_enum(
        &mut self,
        descriptor: EnumDescriptor,
    ) -> Result<(), SchemaError> {
        let name = descriptor.name.clone();
        if self.messages.contains_key(&name) || self.enums.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        debug!(name = %name, values = descriptor.values.len(), "registered enum type");
        self.enums.insert(name, descriptor);
        Ok(())
    }

    /// Resolves a message type by qualified name.
    ///
    /// # Errors
    /// [`SchemaError::UnknownType`] when nothing is registered under
    /// the name.
    pub fn resolve_message(&self, name: &str) -> Result<&MessageDescriptor, SchemaError> {
        self.messages
            .get(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// Resolves an enum type by qualified name.
    ///
    /// # Errors
    /// [`SchemaError::UnknownType`] when nothing is registered under
    /// the name.
    pub fn resolve_enum(&self, name: &str) -> Result<&EnumDescriptor, SchemaError> {
        self.enums
            .get(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// Number of registered message types.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Number of registered enum types.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }
}

// =========================================================================
// Tests
// =========================================================================
