use std::fmt;

use thiserror::Error;

use crate::node::{NodeKind, ShapeMismatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Location of a node within the document, rendered as `$.albums[0].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn push_field(&mut self, name: &str) {
        self.segments.push(Segment::Field(name.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BindErrorKind {
    #[error("unknown type tag '{}'", .tag.as_deref().unwrap_or("<none>"))]
    UnknownType { tag: Option<String> },

    #[error("expected a {expected} node, found a {found}")]
    ShapeMismatch { expected: NodeKind, found: NodeKind },

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("cannot convert {found} to {expected}")]
    Conversion { expected: String, found: String },

    #[error("{type_name} takes {expected} positional arguments, found {found}")]
    Arity {
        type_name: String,
        expected: usize,
        found: usize,
    },

    #[error("{strategy} access cannot write field '{field}' of {type_name}")]
    AccessDenied {
        strategy: &'static str,
        type_name: String,
        field: String,
    },

    #[error("{type_name} has no zero-argument constructor and must be bound from a sequence")]
    PositionalBindingRequired { type_name: String },
}

/// First violation met while binding, with the path of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {path}")]
pub struct BindError {
    path: FieldPath,
    kind: BindErrorKind,
}

impl BindError {
    pub fn new(kind: BindErrorKind, path: FieldPath) -> Self {
        Self { path, kind }
    }

    pub fn at_root(kind: BindErrorKind) -> Self {
        Self::new(kind, FieldPath::root())
    }

    pub(crate) fn shape(mismatch: ShapeMismatch, path: &FieldPath) -> Self {
        Self::new(
            BindErrorKind::ShapeMismatch {
                expected: mismatch.expected,
                found: mismatch.found,
            },
            path.clone(),
        )
    }

    pub(crate) fn conversion(
        expected: impl Into<String>,
        found: impl Into<String>,
        path: &FieldPath,
    ) -> Self {
        Self::new(
            BindErrorKind::Conversion {
                expected: expected.into(),
                found: found.into(),
            },
            path.clone(),
        )
    }

    pub fn kind(&self) -> &BindErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Re-roots the error beneath field `name`.
    pub fn within_field(mut self, name: &str) -> Self {
        self.path.segments.insert(0, Segment::Field(name.to_string()));
        self
    }

    /// Re-roots the error beneath element `index`.
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.segments.insert(0, Segment::Index(index));
        self
    }
}
