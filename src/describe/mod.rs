//! Type declarations, derived descriptors, and the descriptor registry.

mod declared;
mod descriptor;
mod registry;

pub use declared::{DeclaredType, FieldDecl, PrimitiveKind, TypeRef};
pub use descriptor::{Construction, FieldDescriptor, TypeDescriptor};
pub use registry::{TypeRegistry, TypeRegistryBuilder, UnknownTag};
