//! Response header text parsing.
use std::fmt::Display;

use indexmap::IndexMap;

use crate::util::to_lowercase_cow;

mod de;
mod ser;

/// Header name-value pairs with lowercased names.
///
/// Names are normalized on insertion so lookups ignore case. A name holds a
/// single value; inserting it again replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    fields: IndexMap<String, String>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.fields.clear()
    }

    /// Insert a value, returning the replaced value if the name was present.
    pub fn insert<N: AsRef<str>, V: Into<String>>(&mut self, name: N, value: V) -> Option<String> {
        let name = to_lowercase_cow(name.as_ref()).into_owned();

        self.fields.insert(name, value.into())
    }

    pub fn remove<N: AsRef<str>>(&mut self, name: N) -> Option<String> {
        let name = to_lowercase_cow(name.as_ref());

        self.fields.shift_remove(&*name)
    }

    pub fn contains_name<N: AsRef<str>>(&self, name: N) -> bool {
        self.get(name).is_some()
    }

    pub fn get<N: AsRef<str>>(&self, name: N) -> Option<&str> {
        let name = to_lowercase_cow(name.as_ref());

        self.fields.get(&*name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderFields {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

impl<N: AsRef<str>, V: Into<String>> Extend<(N, V)> for HeaderFields {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for HeaderFields {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Display for HeaderFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.fields {
            write!(f, "{}: {}\r\n", name, value)?;
        }

        Ok(())
    }
}

/// Parse a raw header block.
///
/// Lines end with `\r\n` or `\n`. Each line is split on its first colon; the
/// name is trimmed and lowercased and the value is trimmed. Blank lines and
/// lines without a colon are skipped. A repeated name keeps the last value.
pub fn parse(text: &str) -> HeaderFields {
    let mut fields = HeaderFields::new();

    for field in crate::parse::split_header_lines(text) {
        fields.insert(field.name.trim(), field.value.trim());
    }

    tracing::trace!(count = fields.len(), "parsed header text");

    fields
}
