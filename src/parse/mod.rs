//! Tree parsers turning markup text into the generic [`Node`] model.
//!
//! Tokenizing and scalar inference are delegated to `serde_yaml` and `toml`;
//! this module only converts their value trees into [`Node`]s.

mod error;
pub mod toml;
pub mod yaml;

pub use error::ParseError;

use crate::node::Node;
use crate::source::Format;

/// Parses `text` in the given format into a generic tree.
pub fn parse_str(text: &str, format: Format) -> Result<Node, ParseError> {
    match format {
        Format::Yaml => yaml::from_str(text),
        Format::Toml => toml::from_str(text),
    }
}
