//! # filename-codec
//!
//! Schema-driven, lossless conversion between named typed parameters and a
//! single structured string, typically a filename.
//!
//! A schema is an ordered list of fields, each with a small format
//! specifier (`fp2.3`, `4int`, `str8`, `bool`, ...), plus a literal prefix
//! and postfix. Encoding renders `name_token` segments joined by `_`;
//! decoding matches one composite regex and converts each captured token
//! back into a typed value.
//!
//! ## Quick start
//!
//! ```rust
//! use filename_codec::{FieldValue, Record, RecordCodec};
//!
//! let codec = RecordCodec::builder()
//!     .field("n_data", "6int")
//!     .field("conf", "fp1.2")
//!     .prefix("pkls/")
//!     .postfix(".pickle")
//!     .build()
//!     .unwrap();
//!
//! let name = codec
//!     .encode(&Record::new().with("n_data", 100).with("conf", -0.5))
//!     .unwrap();
//! assert_eq!(name, "pkls/n_data_000100_conf_-0.50.pickle");
//!
//! let back = codec.decode(&name).unwrap();
//! assert_eq!(back.get("conf"), Some(&FieldValue::Float(-0.5)));
//! ```
//!
//! ## Modules
//!
//! - [`format`] -- format specifier parsing and capture patterns
//! - [`field`] -- `FieldCodec`, one named field
//! - [`record`] -- `RecordCodec`, a whole filename schema
//! - [`schema`] -- JSON schema documents (`SchemaConfig`)
//! - [`types`] -- `FieldValue` and the ordered `Record`
//! - [`error`] -- Error types for construction, encode and decode failures

pub mod error;
pub mod field;
pub mod format;
pub mod record;
pub mod schema;
pub mod types;

pub use error::{CodecError, Result};
pub use field::FieldCodec;
pub use format::{Format, PadSide, Padding};
pub use record::{RecordCodec, RecordCodecBuilder};
pub use schema::SchemaConfig;
pub use types::{FieldValue, Record};
