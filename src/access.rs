//! Field access strategies.
//!
//! A strategy decides how the binder reads and writes fields on an
//! already-allocated [`Instance`]. Neither built-in strategy can target a
//! type without a zero-argument construction path; those are built
//! positionally instead.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::describe::{FieldDescriptor, TypeDescriptor};
use crate::policy::AccessStrategyKind;
use crate::value::{Instance, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{strategy} access cannot write field '{field}' of {type_name}")]
pub struct AccessDenied {
    pub strategy: &'static str,
    pub type_name: String,
    pub field: String,
}

pub trait AccessStrategy: Send + Sync + fmt::Debug {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether instances of `descriptor` can be populated field by field.
    fn can_write(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.is_default_constructible()
    }

    fn read<'a>(&self, instance: &'a Instance, field: &FieldDescriptor) -> Option<&'a Value>;

    fn write(
        &self,
        instance: &mut Instance,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), AccessDenied>;
}

/// Goes through the public accessor and mutator of each field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accessor;

impl AccessStrategy for Accessor {
    fn name(&self) -> &'static str {
        "accessor"
    }

    fn read<'a>(&self, instance: &'a Instance, field: &FieldDescriptor) -> Option<&'a Value> {
        instance.get(field.name())
    }

    fn write(
        &self,
        instance: &mut Instance,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), AccessDenied> {
        instance.set(field.name(), value).map_err(|e| AccessDenied {
            strategy: self.name(),
            type_name: e.type_name,
            field: e.field,
        })
    }
}

/// Writes field storage directly, bypassing mutators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectField;

impl AccessStrategy for DirectField {
    fn name(&self) -> &'static str {
        "direct-field"
    }

    fn read<'a>(&self, instance: &'a Instance, field: &FieldDescriptor) -> Option<&'a Value> {
        instance.get(field.name())
    }

    fn write(
        &self,
        instance: &mut Instance,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<(), AccessDenied> {
        let type_name = instance.type_name().to_string();
        let slot = instance.slot_mut(field).ok_or_else(|| AccessDenied {
            strategy: self.name(),
            type_name,
            field: field.name().to_string(),
        })?;
        *slot = value;
        Ok(())
    }
}

impl AccessStrategyKind {
    /// The built-in strategy this kind selects.
    pub fn strategy(&self) -> Arc<dyn AccessStrategy> {
        match self {
            AccessStrategyKind::Accessor => Arc::new(Accessor),
            AccessStrategyKind::DirectField => Arc::new(DirectField),
        }
    }
}
