//! The binder: unifies a generic tree with a declared type.

mod engine;
mod error;
mod typed;

pub use engine::{reflect, Binder};
pub use error::{BindError, BindErrorKind, FieldPath, Segment};
pub use typed::Bindable;
