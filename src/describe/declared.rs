use std::fmt;

use crate::value::Value;

/// Primitive scalar kinds a field can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Str,
    Int,
    Float,
    Bool,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveKind::Str => "string",
            PrimitiveKind::Int => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Bool => "bool",
        })
    }
}

/// Handle to a composite type's declaration.
///
/// The field list is produced lazily so composites may refer to each other
/// (or themselves) without building the whole graph up front.
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    declare: fn() -> Vec<FieldDecl>,
    zero_argument: bool,
}

impl TypeRef {
    pub const fn new(name: &'static str, declare: fn() -> Vec<FieldDecl>) -> Self {
        Self {
            name,
            declare,
            zero_argument: false,
        }
    }

    /// Declares a true zero-argument constructor, so instances can be
    /// allocated even when some fields are neither nullable nor defaulted.
    /// Such fields must then be present in keyed input.
    pub const fn with_zero_argument_constructor(mut self) -> Self {
        self.zero_argument = true;
        self
    }

    pub fn has_zero_argument_constructor(&self) -> bool {
        self.zero_argument
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declare(&self) -> Vec<FieldDecl> {
        (self.declare)()
    }

    /// Identity of this declaration: two refs sharing a name but not a
    /// declaration function or constructor flag are distinct types.
    pub(crate) fn key(&self) -> TypeKey {
        TypeKey {
            name: self.name,
            declare: self.declare as usize,
            zero_argument: self.zero_argument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TypeKey {
    name: &'static str,
    declare: usize,
    zero_argument: bool,
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

/// Declared type of a field or constructor parameter.
#[derive(Debug, Clone)]
pub enum DeclaredType {
    Primitive(PrimitiveKind),
    Composite(TypeRef),
    List(Box<DeclaredType>),
}

impl DeclaredType {
    pub fn list_of(element: DeclaredType) -> Self {
        DeclaredType::List(Box::new(element))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, DeclaredType::List(_))
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Primitive(kind) => write!(f, "{kind}"),
            DeclaredType::Composite(ty) => f.write_str(ty.name()),
            DeclaredType::List(element) => write!(f, "list of {element}"),
        }
    }
}

/// A field as written in a type declaration, before any policy is applied.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub(crate) name: String,
    pub(crate) ty: DeclaredType,
    pub(crate) default: Option<Value>,
    pub(crate) optional: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: DeclaredType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            optional: false,
        }
    }

    /// Value the construction path supplies when the field is omitted.
    /// Only honoured under per-field default substitution.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the declared type itself as permitting absence.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
