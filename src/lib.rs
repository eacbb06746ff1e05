pub mod access;
pub mod bind;
pub mod describe;
mod error;
mod loader;
pub mod node;
pub mod parse;
pub mod policy;
pub mod source;
pub mod value;

pub use access::{AccessStrategy, Accessor, DirectField};
pub use bind::{reflect, BindError, BindErrorKind, Bindable, Binder, FieldPath};
pub use describe::{DeclaredType, FieldDecl, PrimitiveKind, TypeDescriptor, TypeRef, TypeRegistry};
pub use error::Error;
pub use loader::Loader;
pub use node::{Node, NodeKind, Scalar};
pub use parse::ParseError;
pub use policy::{Preset, StrictnessPolicy};
pub use value::{Instance, Value};
