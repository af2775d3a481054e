//! Schema documents -- JSON descriptions of a [`RecordCodec`].
//!
//! ```json
//! {
//!   "prefix": "pkls/",
//!   "postfix": ".pickle",
//!   "fields": { "n_data": "6int", "conf": "fp1.2" }
//! }
//! ```
//!
//! `fields` keeps document order, which becomes field order. `prefix` and
//! `postfix` default to the empty string.

use crate::error::Result;
use crate::record::RecordCodec;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Deserialized form of a schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub postfix: String,
    #[serde(
        serialize_with = "serialize_fields",
        deserialize_with = "deserialize_fields"
    )]
    pub fields: Vec<(String, String)>,
}

impl SchemaConfig {
    /// Parse a schema document.
    ///
    /// Only the JSON shape is checked here; format specifiers are validated
    /// by [`SchemaConfig::build`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile the schema into a codec.
    pub fn build(&self) -> Result<RecordCodec> {
        RecordCodec::from_formats(
            self.fields.iter().map(|(n, f)| (n.as_str(), f.as_str())),
            self.prefix.as_str(),
            self.postfix.as_str(),
        )
    }
}

impl RecordCodec {
    /// Build a codec from a parsed schema document.
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        config.build()
    }
}

fn serialize_fields<S: Serializer>(
    fields: &[(String, String)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (name, format) in fields {
        map.serialize_entry(name, format)?;
    }
    map.end()
}

/// Reads the `fields` object entry by entry so document order survives
/// regardless of the map type serde_json is built with.
fn deserialize_fields<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<(String, String)>, D::Error> {
    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping field names to format specifiers")
        }

        fn visit_map<A: MapAccess<'de>>(
            self,
            mut access: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, String>()? {
                fields.push(entry);
            }
            Ok(fields)
        }
    }

    deserializer.deserialize_map(FieldsVisitor)
}
