//! # Register Registry
//!
//! Open registers keyed by register id (`"__new__"` or the payment id).
//! Opening a second register for the same id replaces the first.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{RegisterConfig, RegisterSettings};
use crate::error::RegisterResult;
use crate::register::Register;

#[derive(Debug, Default)]
pub struct RegisterRegistry {
    registers: HashMap<String, Register>,
}

impl RegisterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a register and keeps it under its id.
    pub fn create(&mut self, config: RegisterConfig, settings: &RegisterSettings) -> RegisterResult<&mut Register> {
        let register = Register::from_config(config, settings)?;
        match self.registers.entry(register.id()) {
            Entry::Occupied(mut entry) => {
                debug!(register = %entry.key(), "Replacing open register");
                entry.insert(register);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(register)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Register> {
        self.registers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Register> {
        self.registers.get_mut(id)
    }

    /// Closes a register, handing it back.
    pub fn destroy(&mut self, id: &str) -> Option<Register> {
        let removed = self.registers.remove(id);
        if removed.is_some() {
            debug!(register = %id, "Register closed");
        }
        removed
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.registers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}
