use std::borrow::Cow;

use crate::value::{Map, Value};

pub fn to_lowercase_cow(text: &str) -> Cow<'_, str> {
    if text.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}

/// Returns a copy of the mapping with every top-level key lowercased.
///
/// Values are cloned as is; nested mappings keep their keys. When two keys
/// lowercase to the same name, the later value wins at the earlier position.
pub fn lower_case_object_keys(map: &Map) -> Map {
    map.iter()
        .map(|(key, value)| (to_lowercase_cow(key).into_owned(), value.clone()))
        .collect()
}

/// Returns a copy of the mapping without `Null` or `Undefined` entries.
///
/// A missing mapping gives an empty one.
pub fn null_safe_object(map: Option<&Map>) -> Map {
    match map {
        Some(map) => map
            .iter()
            .filter(|(_key, value)| !value.is_absent())
            .map(|(key, value)| (key, value.clone()))
            .collect(),
        None => Map::new(),
    }
}

/// Returns whether the value is a plain data record.
pub fn is_plain_object(value: &Value) -> bool {
    value.is_plain_object()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_lowercase_cow() {
        assert!(matches!(to_lowercase_cow("abc"), Cow::Borrowed("abc")));
        assert_eq!(to_lowercase_cow("Content-Type"), "content-type");
        assert_eq!(to_lowercase_cow("\u{c9}T\u{c9}"), "\u{e9}t\u{e9}");
        assert_eq!(to_lowercase_cow("\u{1c5}"), "\u{1c6}");
        assert!(matches!(to_lowercase_cow("\u{1c6}"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_lower_case_object_keys() {
        let nested = Map::from_iter([("Inner", 1)]);
        let input = Map::from_iter([
            ("Content-Type", Value::from("Text/HTML")),
            ("X-Nested", Value::from(nested.clone())),
            ("accept", Value::from("*/*")),
        ]);
        let snapshot = input.clone();

        let output = lower_case_object_keys(&input);

        assert_eq!(input, snapshot);
        assert_eq!(
            output.keys().collect::<Vec<_>>(),
            vec!["content-type", "x-nested", "accept"]
        );
        assert_eq!(output.get("content-type"), Some(&Value::from("Text/HTML")));
        assert_eq!(output.get("x-nested"), Some(&Value::from(nested)));
    }

    #[test]
    fn test_lower_case_object_keys_collision() {
        let input = Map::from_iter([("ACCEPT", 1), ("other", 2), ("Accept", 3)]);
        let output = lower_case_object_keys(&input);

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["accept", "other"]);
        assert_eq!(output.get("accept"), Some(&Value::from(3)));
    }

    #[test]
    fn test_lower_case_object_keys_titlecase() {
        let input = Map::from_iter([("\u{1c5}ungla", 1)]);
        let output = lower_case_object_keys(&input);

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["\u{1c6}ungla"]);
    }

    #[test]
    fn test_null_safe_object() {
        assert_eq!(null_safe_object(None), Map::new());

        let input = Map::from_iter([
            ("A", Value::from(1)),
            ("b", Value::Null),
            ("C", Value::from(false)),
            ("d", Value::Undefined),
            ("e", Value::from("")),
        ]);
        let output = null_safe_object(Some(&input));

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["A", "C", "e"]);
        assert_eq!(input.len(), 5);
    }

    #[test]
    fn test_is_plain_object() {
        assert!(is_plain_object(&Value::from(Map::new())));
        assert!(!is_plain_object(&Value::Sequence(Vec::new())));
        assert!(!is_plain_object(&Value::from("{}")));
        assert!(!is_plain_object(&Value::Null));
    }
}
