//! Query string serialization of value trees.
//!
//! Nested values use bracket notation: a mapping inside key `a` produces
//! `a[b]=...` and a sequence inside key `a` produces one `a[]=...` per
//! element. Absent values are left out entirely.
use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

use crate::value::Value;

/// Characters left unescaped in a query component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Configuration for a [`Serializer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Write spaces as `+` instead of `%20`.
    pub space_as_plus: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            space_as_plus: true,
        }
    }
}

/// Output of a serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Serialized<'a> {
    /// Encoded `key=value` pairs joined by `&`, without a leading `?`.
    Query(String),
    /// The input was not a mapping or sequence and is returned as is.
    Passthrough(&'a Value),
}

impl Serialized<'_> {
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(..))
    }

    pub fn as_query(&self) -> Option<&str> {
        if let Self::Query(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(..))
    }

    pub fn as_passthrough(&self) -> Option<&Value> {
        if let Self::Passthrough(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Returns the query text, or the coerced text of a passed through value.
    pub fn into_string(self) -> String {
        match self {
            Self::Query(query) => query,
            Self::Passthrough(value) => value.coerce_to_string().into_owned(),
        }
    }
}

impl Display for Serialized<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(query) => f.write_str(query),
            Self::Passthrough(value) => Display::fmt(value, f),
        }
    }
}

/// Converts value trees into query strings.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: SerializerConfig,
}

impl Serializer {
    pub fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a value.
    ///
    /// Mappings and sequences are flattened into pairs in insertion and index
    /// order. A top-level sequence uses element indexes as keys. Any other
    /// value is returned unchanged as [`Serialized::Passthrough`].
    pub fn serialize<'a>(&self, value: &'a Value) -> Serialized<'a> {
        if !value.is_object_like() {
            return Serialized::Passthrough(value);
        }

        let mut pairs = Vec::new();
        self.walk(value, None, &mut pairs);

        tracing::trace!(pairs = pairs.len(), "serialized query");

        Serialized::Query(pairs.join("&"))
    }

    fn walk(&self, value: &Value, prefix: Option<&str>, pairs: &mut Vec<String>) {
        match value {
            Value::Mapping(map) => {
                for (key, item) in map.iter() {
                    let path = match prefix {
                        Some(prefix) => format!("{}[{}]", prefix, key),
                        None => key.to_string(),
                    };
                    self.visit(item, path, pairs);
                }
            }
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    let path = match prefix {
                        Some(prefix) => format!("{}[]", prefix),
                        None => index.to_string(),
                    };
                    self.visit(item, path, pairs);
                }
            }
            _ => {}
        }
    }

    fn visit(&self, item: &Value, path: String, pairs: &mut Vec<String>) {
        if item.is_absent() {
            return;
        }

        if item.is_object_like() {
            self.walk(item, Some(&path), pairs);
        } else {
            pairs.push(format!(
                "{}={}",
                self.encode_component(&path),
                self.encode_component(&item.coerce_to_string())
            ));
        }
    }

    fn encode_component(&self, text: &str) -> String {
        let encoded = percent_encoding::utf8_percent_encode(text, &COMPONENT_SET).to_string();

        if self.config.space_as_plus {
            encoded.replace("%20", "+")
        } else {
            encoded
        }
    }
}

/// Serialize a value with the default configuration.
///
/// See [`Serializer::serialize()`].
pub fn serialize(value: &Value) -> Serialized<'_> {
    Serializer::default().serialize(value)
}
