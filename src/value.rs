//! Dynamically typed values used as query parameters and codec input.
use std::{borrow::Cow, fmt::Display};

use indexmap::IndexMap;

/// Generic tag produced when a mapping is coerced to text.
pub const OBJECT_TAG: &str = "[object Object]";

/// A value tree.
///
/// Mappings and sequences may nest to any depth. `Null` and `Undefined` are
/// distinct so that coercion can reproduce either literal, but the query
/// serializer treats both as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Map),
}

impl Value {
    /// Returns whether the value is `Null` or `Undefined`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Returns whether the value is a `Mapping` or a `Sequence`.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Self::Mapping(..) | Self::Sequence(..))
    }

    /// Returns whether the value is a plain data record.
    ///
    /// Only `Mapping` qualifies. Sequences and scalars do not.
    pub fn is_plain_object(&self) -> bool {
        matches!(self, Self::Mapping(..))
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        if let Self::Sequence(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        if let Self::Mapping(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn try_into_mapping(self) -> Result<Map, Self> {
        if let Self::Mapping(v) = self {
            Ok(v)
        } else {
            Err(self)
        }
    }

    /// Convert the value to its canonical text form.
    ///
    /// | Variant | Output |
    /// |---|---|
    /// | `Null` | `null` |
    /// | `Undefined` | `undefined` |
    /// | `Bool` | `true` or `false` |
    /// | `Number` | ECMAScript `Number::toString`: shortest round-trip digits, exponent form below `1e-6` and from `1e21`, `NaN`, `Infinity`, `-Infinity`; `-0` is `0` |
    /// | `String` | unchanged |
    /// | `Sequence` | elements coerced and joined with `,`; absent elements are empty |
    /// | `Mapping` | [`OBJECT_TAG`] |
    pub fn coerce_to_string(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed("null"),
            Self::Undefined => Cow::Borrowed("undefined"),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Number(number) => Cow::Owned(format_number(*number)),
            Self::String(text) => Cow::Borrowed(text),
            Self::Sequence(items) => {
                let parts = items
                    .iter()
                    .map(|item| {
                        if item.is_absent() {
                            Cow::Borrowed("")
                        } else {
                            item.coerce_to_string()
                        }
                    })
                    .collect::<Vec<_>>();

                Cow::Owned(parts.join(","))
            }
            Self::Mapping(_) => Cow::Borrowed(OBJECT_TAG),
        }
    }
}

fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        if number.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if number == 0.0 {
        "0".to_string()
    } else {
        ryu_js::Buffer::new().format_finite(number).to_string()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.coerce_to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Number(v as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Mapping(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(v) => Self::Number(v.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(v) => Self::Sequence(v.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(v) => {
                Self::Mapping(v.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// String-keyed mapping that keeps insertion order.
///
/// Inserting an existing key replaces its value without moving it.
/// Equality ignores order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: IndexMap<String, Value>,
}

impl Map {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a value, returning the previous value of the key if any.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_scalars() {
        assert_eq!(Value::Null.coerce_to_string(), "null");
        assert_eq!(Value::Undefined.coerce_to_string(), "undefined");
        assert_eq!(Value::from(true).coerce_to_string(), "true");
        assert_eq!(Value::from(false).coerce_to_string(), "false");
        assert_eq!(Value::from("abc").coerce_to_string(), "abc");
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(Value::from(42).coerce_to_string(), "42");
        assert_eq!(Value::from(-7i64).coerce_to_string(), "-7");
        assert_eq!(Value::from(1.5).coerce_to_string(), "1.5");
        assert_eq!(Value::from(-0.0).coerce_to_string(), "0");
        assert_eq!(Value::from(f64::NAN).coerce_to_string(), "NaN");
        assert_eq!(Value::from(f64::INFINITY).coerce_to_string(), "Infinity");
        assert_eq!(
            Value::from(f64::NEG_INFINITY).coerce_to_string(),
            "-Infinity"
        );
    }

    #[test]
    fn test_coerce_numbers_exponent_form() {
        assert_eq!(Value::from(1e21).coerce_to_string(), "1e+21");
        assert_eq!(
            Value::from(1e20).coerce_to_string(),
            "100000000000000000000"
        );
        assert_eq!(Value::from(1e-7).coerce_to_string(), "1e-7");
        assert_eq!(Value::from(0.000001).coerce_to_string(), "0.000001");
        assert_eq!(Value::from(123e-20).coerce_to_string(), "1.23e-18");
        assert_eq!(Value::from(-1.5e300).coerce_to_string(), "-1.5e+300");
        assert_eq!(
            Value::from(2f64.powi(53)).coerce_to_string(),
            "9007199254740992"
        );
        assert_eq!(
            Value::from(0.1 + 0.2).coerce_to_string(),
            "0.30000000000000004"
        );
    }

    #[test]
    fn test_coerce_compound() {
        let seq = Value::from(vec![
            Value::from(1),
            Value::Null,
            Value::from(vec![2, 3]),
            Value::from("x"),
        ]);
        assert_eq!(seq.coerce_to_string(), "1,,2,3,x");

        let map = Value::from(Map::from_iter([("x", 1)]));
        assert_eq!(map.coerce_to_string(), OBJECT_TAG);
        assert_eq!(map.to_string(), "[object Object]");
    }

    #[test]
    fn test_map_insert_keeps_position() {
        let mut map = Map::new();
        assert_eq!(map.insert("a", 1), None);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 3), Some(Value::from(1)));

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn test_map_remove() {
        let mut map = Map::from_iter([("a", 1), ("b", 2)]);

        assert_eq!(map.remove("a"), Some(Value::from(1)));
        assert_eq!(map.remove("a"), None);
        assert!(!map.contains_key("a"));
        assert!(map.contains_key("b"));
    }

    #[test]
    fn test_map_remove_keeps_order() {
        let mut map = Map::from_iter([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        map.remove("b");

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": [true, null], "m": {"k": "v"}}"#).unwrap();
        let value = Value::from(json);
        let map = value.as_mapping().unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(
            map.get("a"),
            Some(&Value::Sequence(vec![Value::Bool(true), Value::Null]))
        );
        assert!(map.get("m").unwrap().is_plain_object());
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
