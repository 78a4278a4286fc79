use serde::{Deserialize, Deserializer, de::Visitor};

use super::HeaderFields;

struct HeaderFieldsVisitor;

impl<'de> Visitor<'de> for HeaderFieldsVisitor {
    type Value = HeaderFields;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("map of header names to string values")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut fields = HeaderFields::new();

        while let Some((name, value)) = access.next_entry::<String, String>()? {
            fields.insert(name, value);
        }

        Ok(fields)
    }
}

impl<'de> Deserialize<'de> for HeaderFields {
    fn deserialize<D>(deserializer: D) -> Result<HeaderFields, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(HeaderFieldsVisitor)
    }
}
