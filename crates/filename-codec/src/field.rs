//! Single-field codec: one named parameter, one format.
//!
//! A [`FieldCodec`] is the leaf of the system. It owns the parsed [`Format`]
//! and the capture pattern derived from it, and converts between a
//! [`FieldValue`] and its textual token.
//!
//! # Example
//! ```
//! use filename_codec::{FieldCodec, FieldValue};
//!
//! let g = FieldCodec::new("g", "4int").unwrap();
//! assert_eq!(g.encode(&FieldValue::Int(12)).unwrap(), "0012");
//! assert_eq!(g.decode("0012").unwrap(), FieldValue::Int(12));
//! ```

use crate::error::{CodecError, Result};
use crate::format::{render_fixed_point, render_int, render_str, Format};
use crate::types::FieldValue;

/// Encoder, decoder and capture pattern for one named field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCodec {
    name: String,
    spec: String,
    format: Format,
    pattern: String,
}

impl FieldCodec {
    /// Build a codec for `name` from a format specifier.
    ///
    /// # Errors
    /// Returns `CodecError::InvalidFormat` if `format` is not a recognized
    /// shape, and `CodecError::InvalidFieldName` if `name` is empty.
    pub fn new(name: impl Into<String>, format: &str) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CodecError::InvalidFieldName);
        }
        let parsed = Format::parse(format)?;
        Ok(Self {
            pattern: parsed.pattern(),
            name,
            spec: format.to_string(),
            format: parsed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The format specifier exactly as given at construction.
    pub fn format(&self) -> &str {
        &self.spec
    }

    pub fn kind(&self) -> Format {
        self.format
    }

    /// Capture pattern fragment (without the surrounding capture group).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render a value as this field's token.
    ///
    /// `fp` fields also accept `Int` values, widened to `f64`. Integers that
    /// `f64` cannot hold exactly are rejected with `CodecError::FieldEncode`.
    pub fn encode(&self, value: &FieldValue) -> Result<String> {
        match (self.format, value) {
            (Format::FixedPoint { int_digits, frac_digits }, FieldValue::Float(f)) => {
                self.encode_fixed_point(*f, int_digits, frac_digits)
            }
            (Format::FixedPoint { int_digits, frac_digits }, FieldValue::Int(i)) => {
                let widened = *i as f64;
                // i128 so that i64::MAX, which rounds up to 2^63, does not saturate back.
                if widened as i128 != i128::from(*i) {
                    return Err(CodecError::FieldEncode {
                        field: self.name.clone(),
                        message: format!("{i} is not exactly representable as a float"),
                    });
                }
                self.encode_fixed_point(widened, int_digits, frac_digits)
            }
            (Format::Bool, FieldValue::Bool(b)) => {
                Ok(if *b { "True" } else { "False" }.to_string())
            }
            (Format::Int { width }, FieldValue::Int(i)) => Ok(render_int(*i, width)),
            (Format::Str { padding }, FieldValue::Str(s)) => Ok(render_str(s, padding)),
            _ => Err(CodecError::TypeMismatch {
                field: self.name.clone(),
                expected: self.format.kind_name(),
                found: value.kind_name(),
            }),
        }
    }

    /// Convert a captured token back into a value.
    ///
    /// Sized strings lose every `'0'` character, padding or not:
    /// `"000045.3"` under `8str` decodes to `"45.3"`, and `"a0b"` to `"ab"`.
    pub fn decode(&self, text: &str) -> Result<FieldValue> {
        match self.format {
            Format::FixedPoint { .. } => text
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|e| self.decode_error(text, e)),
            Format::Bool => Ok(FieldValue::Bool(text == "True")),
            Format::Int { .. } => text
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|e| self.decode_error(text, e)),
            Format::Str { padding: None } => Ok(FieldValue::Str(text.to_string())),
            Format::Str { padding: Some(_) } => Ok(FieldValue::Str(text.replace('0', ""))),
        }
    }

    fn encode_fixed_point(&self, value: f64, int_digits: usize, frac_digits: usize) -> Result<String> {
        if !value.is_finite() {
            return Err(CodecError::FieldEncode {
                field: self.name.clone(),
                message: format!("{value} has no fixed-point representation"),
            });
        }
        Ok(render_fixed_point(value, int_digits, frac_digits))
    }

    fn decode_error(&self, text: &str, err: impl std::fmt::Display) -> CodecError {
        CodecError::FieldDecode {
            field: self.name.clone(),
            message: format!("'{text}' is not a valid {}: {err}", self.format.kind_name()),
        }
    }
}
