//! YAML tree parser.
//!
//! Local tags (`!Band`) become node type tags with the leading `!` removed.

use serde_yaml::Value;

use super::ParseError;
use crate::node::{Mapping, Node, Scalar};

pub fn from_str(text: &str) -> Result<Node, ParseError> {
    let value: Value = serde_yaml::from_str(text)?;
    convert(value)
}

fn convert(value: Value) -> Result<Node, ParseError> {
    let node = match value {
        Value::Null => Node::null(),
        Value::Bool(b) => Node::from(b),
        Value::Number(n) => Node::scalar(number_scalar(&n)),
        Value::String(s) => Node::from(s),
        Value::Sequence(items) => Node::sequence(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Mapping(map) => {
            let mut entries = Mapping::with_capacity(map.len());
            for (key, value) in map {
                entries.insert(key_to_string(key)?, convert(value)?);
            }
            Node::mapping(entries)
        }
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let tag = tag.strip_prefix('!').unwrap_or(&tag).to_string();
            convert(tagged.value)?.with_tag(tag)
        }
    };
    Ok(node)
}

fn number_scalar(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(f) = n.as_f64() {
        // u64 beyond i64::MAX lands here as well
        Scalar::Float(f)
    } else {
        Scalar::Str(n.to_string())
    }
}

fn key_to_string(key: Value) -> Result<String, ParseError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ParseError::UnsupportedKey(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_scalars_are_inferred() {
        let node = from_str("[a, 1, 2.5, true, ~]").unwrap();
        let items = node.as_sequence().unwrap();
        assert_eq!(items[0].as_scalar().unwrap(), &Scalar::Str("a".into()));
        assert_eq!(items[1].as_scalar().unwrap(), &Scalar::Int(1));
        assert_eq!(items[2].as_scalar().unwrap(), &Scalar::Float(2.5));
        assert_eq!(items[3].as_scalar().unwrap(), &Scalar::Bool(true));
        assert!(items[4].is_null());
    }

    #[test]
    fn test_mapping_order_preserved() {
        let node = from_str("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&String> = node.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_local_tag_attached() {
        let node = from_str("!Song [\"Stairway to Heaven\"]").unwrap();
        assert_eq!(node.type_tag(), Some("Song"));
        assert_eq!(node.kind(), NodeKind::Sequence);
    }

    #[test]
    fn test_nested_tags_attached() {
        let node = from_str("- !Song [\"Black Dog\"]\n- !Song [\"Rock and Roll\"]\n").unwrap();
        assert_eq!(node.type_tag(), None);
        for item in node.as_sequence().unwrap() {
            assert_eq!(item.type_tag(), Some("Song"));
        }
    }

    #[test]
    fn test_malformed_input() {
        let result = from_str("name: [unclosed");
        assert!(matches!(result, Err(ParseError::Yaml(_))));
    }

    #[test]
    fn test_complex_key_rejected() {
        let result = from_str("? [a, b]\n: value\n");
        assert!(matches!(result, Err(ParseError::UnsupportedKey(_))));
    }
}
