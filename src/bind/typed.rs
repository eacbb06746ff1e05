//! Typed views over bound values.

use super::error::{BindError, BindErrorKind, FieldPath};
use crate::describe::{DeclaredType, PrimitiveKind};
use crate::value::{Instance, Value};

/// A Rust type that can be produced by [`Binder::bind`](crate::Binder::bind).
///
/// Composite types implement this by naming their [`TypeRef`](crate::TypeRef)
/// and pulling fields out of the bound [`Instance`]:
///
/// ```
/// use docbind::{Bindable, BindError, DeclaredType, FieldDecl, PrimitiveKind, TypeRef, Value};
///
/// struct Song {
///     name: String,
/// }
///
/// impl Song {
///     const TYPE: TypeRef = TypeRef::new("Song", || {
///         vec![FieldDecl::new("name", DeclaredType::Primitive(PrimitiveKind::Str))]
///     });
/// }
///
/// impl Bindable for Song {
///     fn declared_type() -> DeclaredType {
///         DeclaredType::Composite(Self::TYPE)
///     }
///
///     fn from_value(value: Value) -> Result<Self, BindError> {
///         let mut instance = value.into_instance(Self::TYPE.name())?;
///         Ok(Song {
///             name: instance.take_as("name")?,
///         })
///     }
/// }
/// ```
pub trait Bindable: Sized {
    fn declared_type() -> DeclaredType;

    fn from_value(value: Value) -> Result<Self, BindError>;
}

fn mismatch(expected: &str, found: &Value) -> BindError {
    BindError::conversion(expected, found.describe(), &FieldPath::root())
}

impl Bindable for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::Primitive(PrimitiveKind::Str)
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl Bindable for i64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Primitive(PrimitiveKind::Int)
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(mismatch("integer", &other)),
        }
    }
}

macro_rules! narrow_int {
    ($($ty:ty),*) => {$(
        impl Bindable for $ty {
            fn declared_type() -> DeclaredType {
                DeclaredType::Primitive(PrimitiveKind::Int)
            }

            fn from_value(value: Value) -> Result<Self, BindError> {
                let wide = i64::from_value(value)?;
                <$ty>::try_from(wide).map_err(|_| {
                    BindError::conversion(stringify!($ty), wide.to_string(), &FieldPath::root())
                })
            }
        }
    )*};
}

narrow_int!(i32, u32, u16);

impl Bindable for f64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Primitive(PrimitiveKind::Float)
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl Bindable for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::Primitive(PrimitiveKind::Bool)
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl<T: Bindable> Bindable for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::list_of(T::declared_type())
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| T::from_value(item).map_err(|e| e.within_index(index)))
                .collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl<T: Bindable> Bindable for Option<T> {
    fn declared_type() -> DeclaredType {
        T::declared_type()
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl Value {
    /// Unwraps an instance of the named type.
    pub fn into_instance(self, type_name: &str) -> Result<Instance, BindError> {
        match self {
            Value::Object(instance) if instance.type_name() == type_name => Ok(instance),
            other => Err(mismatch(type_name, &other)),
        }
    }
}

impl Instance {
    /// Moves field `name` out and converts it to `T`.
    pub fn take_as<T: Bindable>(&mut self, name: &str) -> Result<T, BindError> {
        let value = self.take(name).ok_or_else(|| {
            BindError::at_root(BindErrorKind::MissingField {
                field: name.to_string(),
            })
        })?;
        T::from_value(value).map_err(|e| e.within_field(name))
    }
}
