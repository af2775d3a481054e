//! Format specifiers -- the per-field mini-language.
//!
//! ```text
//! format := "fp" I "." F      fixed-point float, I integer digits, F fractional digits
//!         | "bool"            True / False
//!         | "int"             unpadded integer
//!         | N "int"           integer zero-padded to N characters
//!         | "str"             unpadded word string
//!         | N "str"           string zero-padded at the front to N characters
//!         | "str" N           string zero-padded at the back to N characters
//! ```
//!
//! The kind is chosen by keyword containment in a fixed priority order
//! (`fp`, `bool`, `int`, `str`); the first keyword found decides which shape
//! parser runs, and that parser must then accept the whole specifier.

use crate::error::{CodecError, Result};
use std::fmt;
use std::str::FromStr;

/// Which end of a fixed-width string receives the `'0'` padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Front,
    Back,
}

/// Width and pad side of a sized string format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub width: usize,
    pub side: PadSide,
}

/// A parsed format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    FixedPoint { int_digits: usize, frac_digits: usize },
    Bool,
    Int { width: Option<usize> },
    Str { padding: Option<Padding> },
}

/// Largest width or digit count a specifier may carry.
pub const MAX_WIDTH: usize = 255;

type ShapeParser = fn(&str) -> Result<Format>;

/// Keyword → shape parser, in dispatch priority order.
const SHAPES: [(&str, ShapeParser); 4] = [
    ("fp", parse_fixed_point),
    ("bool", parse_bool),
    ("int", parse_int),
    ("str", parse_str),
];

impl Format {
    /// Parse a format specifier such as `"fp2.3"`, `"4int"` or `"str10"`.
    pub fn parse(spec: &str) -> Result<Format> {
        SHAPES
            .iter()
            .find(|(keyword, _)| spec.contains(keyword))
            .map(|(_, parse)| parse(spec))
            .unwrap_or_else(|| {
                Err(CodecError::invalid_format(
                    spec,
                    "expected one of fp<I>.<F>, bool, int, <N>int, str, <N>str, str<N>",
                ))
            })
    }

    /// Kind name of the values this format accepts, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Format::FixedPoint { .. } => "float",
            Format::Bool => "bool",
            Format::Int { .. } => "int",
            Format::Str { .. } => "str",
        }
    }

    /// The regex fragment matching every string this format encodes to.
    ///
    /// Fragments contain no capture groups; alternations are wrapped in a
    /// non-capturing group or rely on the caller's capture group.
    pub fn pattern(&self) -> String {
        match *self {
            Format::FixedPoint {
                int_digits,
                frac_digits,
            } => format!(r"-?[0-9]{{{int_digits},}}\.[0-9]{{{frac_digits}}}"),
            Format::Bool => "True|False".to_string(),
            Format::Int { width: None } => r"-?[0-9]+".to_string(),
            // A leading '-' takes one of the N slots, and wider values grow.
            Format::Int { width: Some(n) } => {
                format!(r"(?:-[0-9]{{{},}}|[0-9]{{{n},}})", n.saturating_sub(1).max(1))
            }
            Format::Str { padding: None } => r"\w+".to_string(),
            Format::Str {
                padding: Some(Padding { width, .. }),
            } => format!(r"\w{{{width}}}"),
        }
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Format::parse(s)
    }
}

/// Renders the canonical specifier, e.g. `Format::Int { width: Some(4) }` → `4int`.
impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Format::FixedPoint {
                int_digits,
                frac_digits,
            } => write!(f, "fp{int_digits}.{frac_digits}"),
            Format::Bool => f.write_str("bool"),
            Format::Int { width: None } => f.write_str("int"),
            Format::Int { width: Some(n) } => write!(f, "{n}int"),
            Format::Str { padding: None } => f.write_str("str"),
            Format::Str {
                padding:
                    Some(Padding {
                        width,
                        side: PadSide::Front,
                    }),
            } => write!(f, "{width}str"),
            Format::Str {
                padding:
                    Some(Padding {
                        width,
                        side: PadSide::Back,
                    }),
            } => write!(f, "str{width}"),
        }
    }
}

fn parse_fixed_point(spec: &str) -> Result<Format> {
    let (int_part, frac_part) = spec
        .strip_prefix("fp")
        .and_then(|rest| rest.split_once('.'))
        .ok_or_else(|| CodecError::invalid_format(spec, "expected fp<I>.<F>"))?;
    Ok(Format::FixedPoint {
        int_digits: parse_positive(spec, int_part)?,
        frac_digits: parse_positive(spec, frac_part)?,
    })
}

fn parse_bool(spec: &str) -> Result<Format> {
    if spec == "bool" {
        Ok(Format::Bool)
    } else {
        Err(CodecError::invalid_format(spec, "expected bool"))
    }
}

fn parse_int(spec: &str) -> Result<Format> {
    if spec == "int" {
        return Ok(Format::Int { width: None });
    }
    let digits = spec
        .strip_suffix("int")
        .ok_or_else(|| CodecError::invalid_format(spec, "expected int or <N>int"))?;
    Ok(Format::Int {
        width: Some(parse_positive(spec, digits)?),
    })
}

fn parse_str(spec: &str) -> Result<Format> {
    if spec == "str" {
        return Ok(Format::Str { padding: None });
    }
    let (digits, side) = if let Some(rest) = spec.strip_prefix("str") {
        (rest, PadSide::Back)
    } else if let Some(rest) = spec.strip_suffix("str") {
        (rest, PadSide::Front)
    } else {
        return Err(CodecError::invalid_format(
            spec,
            "expected str, <N>str or str<N>",
        ));
    };
    Ok(Format::Str {
        padding: Some(Padding {
            width: parse_positive(spec, digits)?,
            side,
        }),
    })
}

/// Parse a bare positive decimal literal (no sign, no whitespace), at most
/// [`MAX_WIDTH`].
fn parse_positive(spec: &str, digits: &str) -> Result<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid_format(
            spec,
            format!("'{digits}' is not a positive integer"),
        ));
    }
    match digits.parse::<usize>() {
        Ok(0) => Err(CodecError::invalid_format(spec, "widths must be at least 1")),
        Ok(n) if n > MAX_WIDTH => Err(CodecError::invalid_format(
            spec,
            format!("widths must be at most {MAX_WIDTH}"),
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(CodecError::invalid_format(spec, e.to_string())),
    }
}

/// Fixed-point rendering: `frac_digits` decimals, integer part zero-padded
/// to `int_digits`, and a leading `-` for negative values that do not round
/// to zero. The sign does not count toward `int_digits`.
pub(crate) fn render_fixed_point(value: f64, int_digits: usize, frac_digits: usize) -> String {
    let body = format!("{:.*}", frac_digits, value.abs());
    let int_len = body.find('.').unwrap_or(body.len());
    let negative = value < 0.0 && body.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let mut out = String::with_capacity(body.len() + int_digits + 1);
    if negative {
        out.push('-');
    }
    for _ in int_len..int_digits {
        out.push('0');
    }
    out.push_str(&body);
    out
}

/// Integer rendering, zero-padded to `width` characters with the sign
/// taking one of them. Never truncates.
pub(crate) fn render_int(value: i64, width: Option<usize>) -> String {
    match width {
        Some(width) => format!("{value:0width$}"),
        None => value.to_string(),
    }
}

/// String rendering: pad with `'0'` up to the width; longer values pass through.
pub(crate) fn render_str(value: &str, padding: Option<Padding>) -> String {
    let Some(Padding { width, side }) = padding else {
        return value.to_string();
    };
    let fill = width.saturating_sub(value.chars().count());
    let pad = "0".repeat(fill);
    match side {
        PadSide::Front => pad + value,
        PadSide::Back => format!("{value}{pad}"),
    }
}
