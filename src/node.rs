//! Generic tree model produced by the tree parsers.
//!
//! A [`Node`] is a scalar, a sequence, or a mapping, optionally annotated with
//! a type tag taken from the source document. Nodes carry no behavior beyond
//! construction and traversal.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

/// Ordered mapping from key to child node, insertion order preserved.
pub type Mapping = IndexMap<String, Node>;

/// The three structural kinds a [`Node`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        })
    }
}

/// Scalar value as inferred by the tree parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Short name of the scalar's representation, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }
}

/// Raised when a node is accessed as a kind it does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ShapeMismatch {
    pub expected: NodeKind,
    pub found: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeData {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

/// A node of the generic document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    data: NodeData,
    tag: Option<String>,
}

impl Node {
    pub fn scalar(scalar: Scalar) -> Self {
        Self {
            data: NodeData::Scalar(scalar),
            tag: None,
        }
    }

    pub fn null() -> Self {
        Self::scalar(Scalar::Null)
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self {
            data: NodeData::Sequence(items),
            tag: None,
        }
    }

    pub fn mapping(entries: Mapping) -> Self {
        Self {
            data: NodeData::Mapping(entries),
            tag: None,
        }
    }

    /// Attaches a type tag to this node.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Scalar(_) => NodeKind::Scalar,
            NodeData::Sequence(_) => NodeKind::Sequence,
            NodeData::Mapping(_) => NodeKind::Mapping,
        }
    }

    pub(crate) fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, NodeData::Scalar(Scalar::Null))
    }

    pub fn as_scalar(&self) -> Result<&Scalar, ShapeMismatch> {
        match &self.data {
            NodeData::Scalar(scalar) => Ok(scalar),
            _ => Err(self.mismatch(NodeKind::Scalar)),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Node], ShapeMismatch> {
        match &self.data {
            NodeData::Sequence(items) => Ok(items),
            _ => Err(self.mismatch(NodeKind::Sequence)),
        }
    }

    pub fn as_mapping(&self) -> Result<&Mapping, ShapeMismatch> {
        match &self.data {
            NodeData::Mapping(entries) => Ok(entries),
            _ => Err(self.mismatch(NodeKind::Mapping)),
        }
    }

    fn mismatch(&self, expected: NodeKind) -> ShapeMismatch {
        ShapeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::scalar(Scalar::Str(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::scalar(Scalar::Int(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::scalar(Scalar::Float(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::scalar(Scalar::Bool(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(entries: Mapping) -> Self {
        Node::mapping(entries)
    }
}
