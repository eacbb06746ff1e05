//! TOML tree parser. TOML has no type tags and no null, so nodes produced
//! here are always untagged.

use ::toml::{Table, Value};

use super::ParseError;
use crate::node::{Mapping, Node};

pub fn from_str(text: &str) -> Result<Node, ParseError> {
    let table: Table = ::toml::from_str(text)?;
    Ok(convert_table(table))
}

fn convert_table(table: Table) -> Node {
    let entries: Mapping = table
        .into_iter()
        .map(|(key, value)| (key, convert(value)))
        .collect();
    Node::mapping(entries)
}

fn convert(value: Value) -> Node {
    match value {
        Value::String(s) => Node::from(s),
        Value::Integer(i) => Node::from(i),
        Value::Float(f) => Node::from(f),
        Value::Boolean(b) => Node::from(b),
        Value::Datetime(dt) => Node::from(dt.to_string()),
        Value::Array(items) => Node::sequence(items.into_iter().map(convert).collect()),
        Value::Table(table) => convert_table(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Scalar;

    #[test]
    fn test_table_becomes_mapping() {
        let node = from_str(
            r#"
            name = "Fleetwood Mac"

            [[albums]]
            name = "Rumours"
            releaseYear = 1977
            "#,
        )
        .unwrap();

        let root = node.as_mapping().unwrap();
        assert_eq!(
            root["name"].as_scalar().unwrap(),
            &Scalar::Str("Fleetwood Mac".into())
        );
        let albums = root["albums"].as_sequence().unwrap();
        let album = albums[0].as_mapping().unwrap();
        assert_eq!(album["releaseYear"].as_scalar().unwrap(), &Scalar::Int(1977));
    }

    #[test]
    fn test_key_order_preserved() {
        let node = from_str("zeta = 1\nalpha = 2\n").unwrap();
        let keys: Vec<&String> = node.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_malformed_input() {
        let result = from_str("name = ");
        assert!(matches!(result, Err(ParseError::Toml(_))));
    }
}
