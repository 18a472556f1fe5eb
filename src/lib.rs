//! # kyaml
//!
//! An encoder and decoder for KYAML, a strict subset of YAML that always uses
//! flow style and always quotes strings.
//!
//! ## What is KYAML?
//!
//! KYAML keeps YAML's data model but removes the parts that make
//! YAML hard to read back reliably: there is no block style, no implicit
//! typing of bare words, and no indentation-sensitive parsing. Every document
//! is still valid YAML, so existing tooling can read it.
//!
//! - **Flow collections**: `{ ... }` and `[ ... ]` with one entry per line,
//!   two-space indent, and a trailing comma after every entry
//! - **Quoted strings**: every string value is double-quoted, so `"no"` stays
//!   a string
//! - **Folded multi-line strings**: strings with two or more newlines are
//!   written one escaped segment per line and reassembled on read. A folded
//!   line that starts with a tab is written as `\\\t...` so the tab survives
//!   a round trip; encoders that emit `" \t..."` there produce different bytes
//!   and lose the tab on read
//! - **Bare keys where safe**: keys that cannot be mistaken for another type
//!   are written without quotes
//!
//! A document is the line `---` followed by exactly one value:
//!
//! ```text
//! ---
//! {
//!   name: "web",
//!   ports: [
//!     80,
//!     443,
//!   ],
//!   containers: [{
//!     image: "nginx",
//!   }],
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use kyaml::{dump, load, kyaml, Value};
//!
//! let value = kyaml!({
//!     "name": "web",
//!     "replicas": 3,
//!     "labels": {"app": "web"},
//! });
//!
//! let text = dump(&value).unwrap();
//! assert!(text.starts_with("---\n{\n  name: \"web\",\n"));
//!
//! let back = load(&text).unwrap();
//! assert_eq!(back, value);
//! assert_eq!(back["replicas"], Value::Int(3));
//! ```
//!
//! ### With Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use kyaml::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Port {
//!     name: String,
//!     port: u16,
//! }
//!
//! let port = Port { name: "http".to_string(), port: 80 };
//! let text = to_string(&port).unwrap();
//! assert_eq!(text, "---\n{\n  name: \"http\",\n  port: 80,\n}\n");
//!
//! let back: Port = from_str(&text).unwrap();
//! assert_eq!(back, port);
//! ```
//!
//! ## Guarantees
//!
//! - `load(&dump(&v)?)? == v` for every value the encoder accepts
//! - Output is canonical: equal values in the same key order encode to
//!   identical bytes
//! - Decoding is a single pass with one character of lookahead and reports
//!   the character offset of the first error
//!
//! ## Logging
//!
//! `dump` and `load` emit `tracing` events at `trace` level, and decode
//! failures at `debug` level. No subscriber is installed by this crate.

pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use map::Mapping;
pub use options::DecodeOptions;
pub use ser::{to_value, ValueSerializer};
pub use value::{Value, ValueIndex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

const DOCUMENT_PREFIX: &str = "---\n";

/// Encodes a value as a complete KYAML document.
///
/// The result is `"---\n"`, the canonical encoding of `value`, and a final
/// newline.
///
/// # Examples
///
/// ```rust
/// use kyaml::{dump, kyaml};
///
/// assert_eq!(dump(&kyaml!([1, "two"])).unwrap(), "---\n[\n  1,\n  \"two\",\n]\n");
/// assert_eq!(dump(&kyaml!({})).unwrap(), "---\n{}\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the tree contains a NaN or infinite
/// float.
pub fn dump(value: &Value) -> Result<String> {
    let body = Encoder::new().encode(value)?;
    let mut output = String::with_capacity(DOCUMENT_PREFIX.len() + body.len() + 1);
    output.push_str(DOCUMENT_PREFIX);
    output.push_str(&body);
    output.push('\n');
    tracing::trace!(bytes = output.len(), "encoded kyaml document");
    Ok(output)
}

/// Decodes a complete KYAML document.
///
/// # Examples
///
/// ```rust
/// use kyaml::{load, Value};
///
/// let value = load("---\n{\n  enabled: true,\n}\n").unwrap();
/// assert_eq!(value["enabled"], Value::Bool(true));
///
/// let err = load("enabled: true\n").unwrap_err();
/// assert_eq!(err.to_string(), "Parse error: expected \"---\\n\" at position 0");
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with the kind and character offset of the first
/// problem found.
pub fn load(text: &str) -> Result<Value> {
    load_with_options(text, DecodeOptions::default())
}

/// Decodes a complete KYAML document with custom [`DecodeOptions`].
///
/// # Errors
///
/// As [`load`], plus [`ParseErrorKind::DepthLimitExceeded`] when nesting
/// exceeds `options.max_depth`.
pub fn load_with_options(text: &str, options: DecodeOptions) -> Result<Value> {
    tracing::trace!(bytes = text.len(), "decoding kyaml document");
    Decoder::with_options(text, options).decode().map_err(|err| {
        if let Some(parse) = err.as_parse_error() {
            tracing::debug!(
                kind = parse.kind.as_str(),
                position = parse.position,
                "failed to decode kyaml document: {}",
                parse.message
            );
        }
        err
    })
}

/// Serializes any `T: Serialize` to a KYAML document.
///
/// # Errors
///
/// Fails if `T` cannot be represented as a [`Value`] or contains a
/// non-finite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    dump(&to_value(value)?)
}

/// Serializes any `T: Serialize` as a KYAML document into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Deserializes a `T` from KYAML text.
///
/// # Errors
///
/// Returns an error if the text is not a valid KYAML document or does not
/// match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(load(s)?)
}

/// Deserializes a `T` from KYAML text with custom [`DecodeOptions`].
///
/// # Errors
///
/// As [`from_str`], plus the limits enforced by `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(load_with_options(s, options)?)
}

/// Deserializes a `T` from KYAML bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8, are not a valid KYAML
/// document, or do not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes a `T` from a reader of KYAML text.
///
/// # Examples
///
/// ```rust
/// use kyaml::from_reader;
/// use std::io::Cursor;
///
/// let ports: Vec<u16> = from_reader(Cursor::new(b"---\n[\n  80,\n  443,\n]\n")).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
