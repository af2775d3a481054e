//! Whole-filename codec -- an ordered schema of fields plus a literal
//! prefix and postfix.
//!
//! A [`RecordCodec`] renders a [`Record`] as
//! `prefix + name1_token1_name2_token2... + postfix` and parses such strings
//! back by matching one composite regex in which every field contributes a
//! `name_(pattern)` segment.
//!
//! # Key design decisions
//!
//! - **Group binding by position**: field `i` (0-based) is capture group
//!   `i + 1`. Field patterns never contain capturing groups, and the field
//!   list is private and immutable, so the binding cannot drift.
//! - **Literal affixes**: prefix, postfix and field names are regex-escaped,
//!   so `".csv"` matches only a literal dot.
//! - **Full anchoring**: the matcher is `^...$`; trailing text is a mismatch.
//! - **Unique names**: duplicates are rejected at construction.
//!
//! # Example
//! ```
//! use filename_codec::{Record, RecordCodec};
//!
//! let codec = RecordCodec::from_formats([("s", "fp2.3"), ("m", "8str")], "", ".csv").unwrap();
//! let name = codec.encode(&Record::new().with("s", 2.345).with("m", "abc")).unwrap();
//! assert_eq!(name, "s_02.345_m_00000abc.csv");
//! assert_eq!(codec.decode(&name).unwrap().get("m").and_then(|v| v.as_str()), Some("abc"));
//! ```

use crate::error::{CodecError, Result};
use crate::field::FieldCodec;
use crate::types::Record;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Delimiter between a field's name and its token, and between fields.
const DELIMITER: &str = "_";

/// Encoder/decoder for a complete filename schema.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    fields: Vec<FieldCodec>,
    prefix: String,
    postfix: String,
    pattern: String,
    matcher: Regex,
}

impl RecordCodec {
    /// Build a codec from already constructed field codecs, in order.
    ///
    /// # Errors
    /// Returns `CodecError::DuplicateField` if two fields share a name, and
    /// `CodecError::Regex` if the composite pattern fails to compile.
    pub fn new(
        fields: Vec<FieldCodec>,
        prefix: impl Into<String>,
        postfix: impl Into<String>,
    ) -> Result<Self> {
        let prefix = prefix.into();
        let postfix = postfix.into();

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(CodecError::DuplicateField(field.name().to_string()));
            }
        }

        let pattern = composite_pattern(&fields, &prefix, &postfix);
        let matcher = Regex::new(&format!("^(?:{pattern})$"))?;
        debug!(fields = fields.len(), %pattern, "compiled record codec");

        Ok(Self {
            fields,
            prefix,
            postfix,
            pattern,
            matcher,
        })
    }

    /// Build a codec from `(name, format)` pairs; iteration order is field order.
    ///
    /// Accepts any ordered source: arrays, `Vec`s, or an insertion-ordered map.
    pub fn from_formats<I, N, F>(
        fields: I,
        prefix: impl Into<String>,
        postfix: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (N, F)>,
        N: Into<String>,
        F: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, format)| FieldCodec::new(name, format.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields, prefix, postfix)
    }

    /// Start a builder with an empty prefix and postfix.
    pub fn builder() -> RecordCodecBuilder {
        RecordCodecBuilder::default()
    }

    pub fn fields(&self) -> &[FieldCodec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldCodec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    /// The composite pattern as regex source (literals escaped, no anchors).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `text` conforms to the composite pattern.
    pub fn matches(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Render every field of `values` in schema order.
    ///
    /// # Errors
    /// - `CodecError::MissingFields` if a schema field is absent (checked first)
    /// - `CodecError::UnknownFields` if `values` has keys outside the schema
    /// - any per-field encode error (`TypeMismatch`, `FieldEncode`)
    pub fn encode(&self, values: &Record) -> Result<String> {
        let missing: Vec<String> = self
            .fields
            .iter()
            .filter(|f| !values.contains_key(f.name()))
            .map(|f| f.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CodecError::MissingFields(missing));
        }

        let unknown: Vec<String> = values
            .keys()
            .filter(|k| self.field(k).is_none())
            .map(str::to_string)
            .collect();
        if !unknown.is_empty() {
            return Err(CodecError::UnknownFields(unknown));
        }

        let mut out = String::from(&self.prefix);
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(DELIMITER);
            }
            let value = values
                .get(field.name())
                .ok_or_else(|| CodecError::MissingFields(vec![field.name().to_string()]))?;
            out.push_str(field.name());
            out.push_str(DELIMITER);
            out.push_str(&field.encode(value)?);
        }
        out.push_str(&self.postfix);

        trace!(output = %out, "encoded record");
        Ok(out)
    }

    /// Parse `text` into a record whose entries follow schema order.
    ///
    /// # Errors
    /// - `CodecError::PatternMismatch` if `text` does not match the composite pattern
    /// - `CodecError::FieldDecode` if a captured token cannot be converted
    pub fn decode(&self, text: &str) -> Result<Record> {
        let Some(caps) = self.matcher.captures(text) else {
            debug!(input = text, pattern = %self.pattern, "filename does not match pattern");
            return Err(CodecError::PatternMismatch {
                input: text.to_string(),
                pattern: self.pattern.clone(),
            });
        };

        let mut record = Record::new();
        for (i, field) in self.fields.iter().enumerate() {
            let token = caps
                .get(i + 1)
                .ok_or_else(|| CodecError::FieldDecode {
                    field: field.name().to_string(),
                    message: "no text captured".to_string(),
                })?
                .as_str();
            record.insert(field.name(), field.decode(token)?);
        }

        trace!(input = text, fields = record.len(), "decoded record");
        Ok(record)
    }
}

/// `prefix + join("_", name_(pattern)) + postfix`, with literals escaped.
fn composite_pattern(fields: &[FieldCodec], prefix: &str, postfix: &str) -> String {
    let segments: Vec<String> = fields
        .iter()
        .map(|f| {
            format!(
                "{}{}({})",
                regex::escape(f.name()),
                DELIMITER,
                f.pattern()
            )
        })
        .collect();
    format!(
        "{}{}{}",
        regex::escape(prefix),
        segments.join(DELIMITER),
        regex::escape(postfix)
    )
}

enum Entry {
    Spec(String, String),
    Codec(FieldCodec),
}

/// Incremental construction of a [`RecordCodec`]. Format errors surface from
/// [`RecordCodecBuilder::build`].
#[derive(Default)]
pub struct RecordCodecBuilder {
    entries: Vec<Entry>,
    prefix: String,
    postfix: String,
}

impl RecordCodecBuilder {
    /// Append a field given by name and format specifier.
    pub fn field(mut self, name: impl Into<String>, format: impl Into<String>) -> Self {
        self.entries.push(Entry::Spec(name.into(), format.into()));
        self
    }

    /// Append an already constructed field codec.
    pub fn codec(mut self, codec: FieldCodec) -> Self {
        self.entries.push(Entry::Codec(codec));
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn build(self) -> Result<RecordCodec> {
        let fields = self
            .entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Spec(name, format) => FieldCodec::new(name, &format),
                Entry::Codec(codec) => Ok(codec),
            })
            .collect::<Result<Vec<_>>>()?;
        RecordCodec::new(fields, self.prefix, self.postfix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn codec_is_shareable_across_threads() {
        assert_send_sync::<RecordCodec>();
    }

    #[test]
    fn composite_pattern_escapes_literals() {
        let codec = RecordCodec::from_formats([("v", "fp1.1")], "out/", ".csv").unwrap();
        assert_eq!(codec.pattern(), r"out/v_(-?[0-9]{1,}\.[0-9]{1})\.csv");
    }

    #[test]
    fn groups_bind_to_field_positions() {
        let codec = RecordCodec::from_formats([("b", "bool"), ("n", "int")], "", "").unwrap();
        let caps = codec.matcher.captures("b_True_n_7").unwrap();
        assert_eq!(caps.len(), codec.fields().len() + 1);
        assert_eq!(&caps[1], "True");
        assert_eq!(&caps[2], "7");
    }
}
