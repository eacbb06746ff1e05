use super::declared::{DeclaredType, FieldDecl, TypeRef};
use crate::policy::{DefaultSubstitution, DescriptorProfile, FieldMutability, FieldNullability};
use crate::value::Value;

/// One field (or constructor parameter) of a described type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    declared_type: DeclaredType,
    nullable: bool,
    mutable: bool,
    default: Option<Value>,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the field exposes a public mutator.
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// How instances of a described type come into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construction {
    /// A zero-argument path exists; fields are assigned afterwards.
    ZeroArgument,
    /// Only the primary constructor exists, taking every field in order.
    Positional,
}

/// Reflected shape of one target type under one descriptor profile.
///
/// Field order is fixed at derivation and is the only order used for
/// positional binding.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    construction: Construction,
}

impl TypeDescriptor {
    pub(crate) fn derive(ty: TypeRef, profile: DescriptorProfile) -> Self {
        let fields: Vec<FieldDescriptor> = ty
            .declare()
            .into_iter()
            .map(|decl| FieldDescriptor {
                nullable: decl.optional || profile.nullability == FieldNullability::AllNullable,
                mutable: profile.mutability == FieldMutability::Mutable,
                default: match profile.defaults {
                    DefaultSubstitution::PerFieldDefault => decl.default,
                    DefaultSubstitution::None => None,
                },
                name: decl.name,
                declared_type: decl.ty,
            })
            .collect();

        let construction = if ty.has_zero_argument_constructor()
            || fields.iter().all(|f| f.nullable || f.has_default())
        {
            Construction::ZeroArgument
        } else {
            Construction::Positional
        };

        Self {
            name: ty.name(),
            fields,
            construction,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn construction(&self) -> Construction {
        self.construction
    }

    pub fn is_default_constructible(&self) -> bool {
        self.construction == Construction::ZeroArgument
    }

    /// Primary constructor parameters, present only when no zero-argument
    /// path exists.
    pub fn parameters(&self) -> Option<&[FieldDescriptor]> {
        match self.construction {
            Construction::Positional => Some(&self.fields),
            Construction::ZeroArgument => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
