//! Bound values.
//!
//! [`Value`] is both the untyped echo of a document (see
//! [`reflect`](crate::reflect)) and the object graph produced by binding,
//! where composites are represented as [`Instance`]s laid out by their
//! [`TypeDescriptor`].

use std::sync::Arc;

use indexmap::IndexMap;

use crate::describe::{FieldDescriptor, TypeDescriptor};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Object(Instance),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Short description of the value's representation, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::Bool(_) => "bool".into(),
            Value::Int(_) => "integer".into(),
            Value::Float(_) => "float".into(),
            Value::Str(_) => "string".into(),
            Value::List(_) => "list".into(),
            Value::Map(_) => "map".into(),
            Value::Object(instance) => format!("instance of {}", instance.type_name()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Raised by [`Instance::set`] when the field has no public mutator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' of {type_name} has no public mutator")]
pub struct ImmutableField {
    pub type_name: String,
    pub field: String,
}

/// A constructed composite: one storage slot per declared field.
#[derive(Debug, Clone)]
pub struct Instance {
    descriptor: Arc<TypeDescriptor>,
    slots: Vec<Value>,
}

impl Instance {
    /// Zero-argument construction: every slot starts at its default, or null.
    pub(crate) fn allocate(descriptor: Arc<TypeDescriptor>) -> Self {
        let slots = descriptor
            .fields()
            .iter()
            .map(|field| field.default_value().cloned().unwrap_or_default())
            .collect();
        Self { descriptor, slots }
    }

    /// Primary constructor: one argument per field, in declaration order.
    ///
    /// Callers guarantee `args.len() == descriptor.fields().len()`.
    pub(crate) fn construct(descriptor: Arc<TypeDescriptor>, args: Vec<Value>) -> Self {
        debug_assert_eq!(args.len(), descriptor.fields().len());
        Self {
            descriptor,
            slots: args,
        }
    }

    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Public accessor.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.descriptor.index_of(name).map(|index| &self.slots[index])
    }

    /// Public mutator. Only fields declared mutable expose one.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ImmutableField> {
        let index = self
            .descriptor
            .index_of(name)
            .filter(|&index| self.descriptor.fields()[index].is_mutable())
            .ok_or_else(|| ImmutableField {
                type_name: self.descriptor.name().to_string(),
                field: name.to_string(),
            })?;
        self.slots[index] = value;
        Ok(())
    }

    /// Raw field storage, bypassing mutators.
    pub(crate) fn slot_mut(&mut self, field: &FieldDescriptor) -> Option<&mut Value> {
        let index = self.descriptor.index_of(field.name())?;
        self.slots.get_mut(index)
    }

    /// Moves a field's value out, leaving null behind.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.descriptor.index_of(name)?;
        Some(std::mem::take(&mut self.slots[index]))
    }

    /// Field names and values in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.descriptor
            .fields()
            .iter()
            .map(FieldDescriptor::name)
            .zip(self.slots.iter())
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.slots == other.slots
    }
}
