//! Field access over parsed status-document trees.
//!
//! The upstream XML-to-tree parser collapses single-element list wrappers to
//! scalars only at the leaves it touches. These helpers replicate that exact
//! behavior: the collapse is applied shallowly at each field access, never
//! recursively into nested structures.

use serde_json::Value;

/// Unwrap a single-element array to its element; everything else unchanged
pub fn collapse(value: &Value) -> &Value {
    match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        _ => value,
    }
}

/// Access one field, collapsing a single-element wrapper at this level only
pub fn field<'a>(tree: &'a Value, name: &str) -> Option<&'a Value> {
    tree.get(name).map(collapse)
}

/// String value of a field
pub fn str_field<'a>(tree: &'a Value, name: &str) -> Option<&'a str> {
    field(tree, name).and_then(|v| v.as_str())
}

/// Unsigned integer value of a field; the feed carries numbers as strings
pub fn uint_field(tree: &Value, name: &str) -> Option<u32> {
    match field(tree, name)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        _ => None,
    }
}

/// The `item` entries of a container field (`actions`, `titles`, ...)
///
/// After the parser's collapsing a one-entry list appears as a lone object,
/// so a non-array `item` is treated as a single-element list.
pub fn items<'a>(tree: &'a Value, name: &str) -> Vec<&'a Value> {
    let Some(container) = field(tree, name) else {
        return Vec::new();
    };
    match container.get("item") {
        Some(Value::Array(entries)) => entries.iter().collect(),
        Some(entry) => vec![entry],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapse_is_shallow() {
        let tree = json!({ "titles": [{ "item": [{ "title": ["inner"] }] }] });
        let titles = field(&tree, "titles").unwrap();
        // The wrapper around `titles` collapses, the nested wrapper does not
        assert!(titles.is_object());
        let item = items(&tree, "titles");
        assert_eq!(item.len(), 1);
        assert!(item[0]["title"].is_array());
    }

    #[test]
    fn test_single_item_becomes_list_of_one() {
        let tree = json!({ "actions": { "item": { "text": "Introduced in House" } } });
        let actions = items(&tree, "actions");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["text"], "Introduced in House");
    }

    #[test]
    fn test_uint_field_parses_strings_and_numbers() {
        let tree = json!({ "congress": "116", "billNumber": 123 });
        assert_eq!(uint_field(&tree, "congress"), Some(116));
        assert_eq!(uint_field(&tree, "billNumber"), Some(123));
        assert_eq!(uint_field(&tree, "missing"), None);
    }
}
