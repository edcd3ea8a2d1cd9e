//! Key-path lookup into JSON rows and cell value conversion.

use serde_json::Value;

use crate::node::Node;

/// Resolves a dot-separated path against a JSON value.
///
/// Object members are looked up by name, array elements by index
/// (`"items.0.name"`). Returns `None` as soon as a segment does not resolve.
pub fn extract_value<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Converts a cell value to display text.
///
/// Strings are used verbatim, `null` becomes empty, and arrays or objects
/// fall back to their JSON representation.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts a cell value to a text node, or [`Node::Empty`] for `null`.
pub fn value_to_node(value: &Value) -> Node {
    match value {
        Value::Null => Node::Empty,
        other => Node::text(value_to_text(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_simple_and_nested() {
        let row = json!({
            "officeName": "Lisbon HQ",
            "address": { "city": "Lisbon", "postalCode": "1100-053" }
        });
        assert_eq!(extract_value(&row, "officeName"), Some(&json!("Lisbon HQ")));
        assert_eq!(extract_value(&row, "address.city"), Some(&json!("Lisbon")));
        assert_eq!(extract_value(&row, "address.country"), None);
        assert_eq!(extract_value(&row, "officeName.length"), None);
    }

    #[test]
    fn extract_array_index() {
        let row = json!({ "desks": [{ "name": "A1" }, { "name": "A2" }] });
        assert_eq!(extract_value(&row, "desks.1.name"), Some(&json!("A2")));
        assert_eq!(extract_value(&row, "desks.5.name"), None);
        assert_eq!(extract_value(&row, "desks.first"), None);
    }

    #[test]
    fn text_conversion() {
        assert_eq!(value_to_text(&json!(null)), "");
        assert_eq!(value_to_text(&json!("Ada")), "Ada");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!(true)), "true");
        assert_eq!(value_to_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn null_is_empty_node() {
        assert_eq!(value_to_node(&Value::Null), Node::Empty);
        assert_eq!(value_to_node(&json!(7)), Node::text("7"));
        assert_eq!(value_to_node(&json!("")), Node::text(""));
    }
}
