//! KYAML encoding.
//!
//! The [`Encoder`] renders a [`Value`] tree into canonical KYAML text. The
//! output is fully determined by the value: there are no formatting options,
//! so two producers always agree byte for byte.
//!
//! ## Layout
//!
//! - Scalars: `null`, `true`/`false`, decimal integers, floats that always
//!   carry a `.` so they decode as floats again.
//! - Strings: always double-quoted. A string with two or more newlines is
//!   *folded*: every line becomes its own escaped segment, separated by a
//!   blank escaped newline.
//! - Mappings and sequences: `{}`/`[]` when empty, otherwise one entry per
//!   line, indented two spaces per level, each entry followed by a comma.
//! - A sequence holding only mappings is *cuddled*: `[{ ... }, { ... }]`.
//!
//! ```rust
//! use kyaml::{kyaml, Encoder};
//!
//! let value = kyaml!({
//!     "metadata": { "name": "app" },
//!     "ports": [80, 443]
//! });
//!
//! let text = Encoder::new().encode(&value).unwrap();
//! assert_eq!(
//!     text,
//!     "{\n  metadata: {\n    name: \"app\",\n  },\n  ports: [\n    80,\n    443,\n  ],\n}"
//! );
//! ```

use crate::map::is_safe_bare_key;
use crate::{Error, Mapping, Result, Value};

const INDENT: &str = "  ";

/// Spellings YAML 1.1 readers turn into booleans or null.
const AMBIGUOUS_KEYWORDS: [&str; 21] = [
    "true", "false", "yes", "no", "on", "off", "null", //
    "True", "False", "Yes", "No", "On", "Off", "Null", //
    "TRUE", "FALSE", "YES", "NO", "ON", "OFF", "NULL",
];

/// The KYAML encoder.
///
/// Stateless; one instance can encode any number of values, from any number
/// of threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder;

impl Encoder {
    pub fn new() -> Self {
        Encoder
    }

    /// Encodes a value as a top-level document body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] if the tree contains a NaN or
    /// infinite float.
    pub fn encode(&self, value: &Value) -> Result<String> {
        self.encode_at(value, 0)
    }

    /// Encodes a value as if it were nested `depth` levels deep.
    ///
    /// Only collections are affected: their entries are indented
    /// `depth + 1` levels and their closing bracket `depth` levels.
    ///
    /// ```rust
    /// use kyaml::{Encoder, Value};
    ///
    /// let seq = Value::Sequence(vec![Value::Int(1)]);
    /// assert_eq!(Encoder::new().encode_at(&seq, 1).unwrap(), "[\n    1,\n  ]");
    /// ```
    pub fn encode_at(&self, value: &Value, depth: usize) -> Result<String> {
        let mut output = String::with_capacity(64);
        write_value(&mut output, value, depth)?;
        Ok(output)
    }
}

fn write_value(output: &mut String, value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => output.push_str(&i.to_string()),
        Value::Float(f) => write_float(output, *f)?,
        Value::String(s) => write_string(output, s),
        Value::Mapping(map) => write_mapping(output, map, depth)?,
        Value::Sequence(seq) => write_sequence(output, seq, depth)?,
    }
    Ok(())
}

fn write_float(output: &mut String, f: f64) -> Result<()> {
    if !f.is_finite() {
        return Err(Error::unsupported_type(&format!("non-finite float {}", f)));
    }
    // Display is shortest-round-trip and never switches to exponent notation.
    let text = f.to_string();
    output.push_str(&text);
    if !text.contains('.') {
        output.push_str(".0");
    }
    Ok(())
}

fn push_indent(output: &mut String, depth: usize) {
    for _ in 0..depth {
        output.push_str(INDENT);
    }
}

fn write_mapping(output: &mut String, map: &Mapping, depth: usize) -> Result<()> {
    if map.is_empty() {
        output.push_str("{}");
        return Ok(());
    }

    output.push_str("{\n");
    for (key, value) in map {
        push_indent(output, depth + 1);
        write_key(output, key);
        output.push_str(": ");
        write_value(output, value, depth + 1)?;
        output.push_str(",\n");
    }
    push_indent(output, depth);
    output.push('}');
    Ok(())
}

fn write_sequence(output: &mut String, seq: &[Value], depth: usize) -> Result<()> {
    if seq.is_empty() {
        output.push_str("[]");
        return Ok(());
    }

    if seq.iter().all(Value::is_mapping) {
        return write_cuddled_sequence(output, seq, depth);
    }

    output.push_str("[\n");
    for element in seq {
        push_indent(output, depth + 1);
        write_value(output, element, depth + 1)?;
        output.push_str(",\n");
    }
    push_indent(output, depth);
    output.push(']');
    Ok(())
}

/// `[{...}, {...}]`: each mapping at the sequence's own depth.
fn write_cuddled_sequence(output: &mut String, seq: &[Value], depth: usize) -> Result<()> {
    output.push('[');
    for (i, element) in seq.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        write_value(output, element, depth)?;
    }
    output.push(']');
    Ok(())
}

fn write_key(output: &mut String, key: &str) {
    if needs_quotes(key) {
        write_string(output, key);
    } else {
        output.push_str(key);
    }
}

/// Returns `true` if a mapping key must be written as a quoted string.
///
/// A key stays bare only when it is a safe identifier that no YAML reader
/// could mistake for a boolean, null or number.
///
/// ```rust
/// use kyaml::encoder::needs_quotes;
///
/// assert!(!needs_quotes("apiVersion"));
/// assert!(!needs_quotes("kubernetes.io/name"));
/// assert!(needs_quotes("true"));
/// assert!(needs_quotes("0x1A"));
/// assert!(needs_quotes("has space"));
/// assert!(needs_quotes(""));
/// ```
#[must_use]
pub fn needs_quotes(key: &str) -> bool {
    key.is_empty()
        || AMBIGUOUS_KEYWORDS.contains(&key)
        || looks_numeric(key)
        || !is_safe_bare_key(key)
}

/// Recognizes the spellings a YAML reader may take for a number: decimal
/// with optional sign, fraction, exponent and `_` digit groups, leading-dot
/// decimals, and `0x`/`0o`/`0b` radix literals.
///
/// This is wider than what the decoder accepts as a number value; keys are
/// quoted against every reader, not just this one.
fn looks_numeric(s: &str) -> bool {
    let body = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);

    if let Some(digits) = body.strip_prefix("0x") {
        return all_nonempty(digits, |c| c.is_ascii_hexdigit() || c == '_');
    }
    if let Some(digits) = body.strip_prefix("0o") {
        return all_nonempty(digits, |c| matches!(c, '0'..='7' | '_'));
    }
    if let Some(digits) = body.strip_prefix("0b") {
        return all_nonempty(digits, |c| matches!(c, '0' | '1' | '_'));
    }

    let bytes = body.as_bytes();
    let mut pos = 0;
    match bytes.first() {
        Some(b) if b.is_ascii_digit() => {
            pos += 1;
            pos += count_while(&bytes[pos..], |b| b.is_ascii_digit() || b == b'_');
            if bytes.get(pos) == Some(&b'.') {
                pos += 1;
            }
            pos += count_while(&bytes[pos..], |b| b.is_ascii_digit() || b == b'_');
        }
        Some(b'.') => {
            pos += 1;
            match bytes.get(pos) {
                Some(b) if b.is_ascii_digit() => pos += 1,
                _ => return false,
            }
            pos += count_while(&bytes[pos..], |b| b.is_ascii_digit() || b == b'_');
        }
        _ => return false,
    }

    is_exponent_or_empty(&bytes[pos..])
}

fn all_nonempty(s: &str, pred: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(pred)
}

fn count_while(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// `([eE][+-]?\d+)?` anchored at the end of input.
fn is_exponent_or_empty(rest: &[u8]) -> bool {
    match rest.split_first() {
        None => true,
        Some((b'e' | b'E', tail)) => {
            let digits = match tail.first() {
                Some(b'+' | b'-') => &tail[1..],
                _ => tail,
            };
            !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

fn write_string(output: &mut String, s: &str) {
    if s.matches('\n').count() >= 2 {
        write_folded(output, s);
    } else {
        write_simple(output, s);
    }
}

fn write_simple(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '\n' => output.push_str("\\n"),
            _ => push_escaped(output, ch),
        }
    }
    output.push('"');
}

/// Escapes everything a single folded line can contain.
fn push_escaped(output: &mut String, ch: char) {
    match ch {
        '\\' => output.push_str("\\\\"),
        '"' => output.push_str("\\\""),
        '\t' => output.push_str("\\t"),
        _ => output.push(ch),
    }
}

fn write_folded(output: &mut String, s: &str) {
    output.push_str("\"\\n");
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            output.push_str("\\n\\n");
        }
        if line.starts_with(' ') {
            // `\ ` decodes to a backslash-space pair; unfold drops the backslash.
            output.push('\\');
        } else if line.starts_with('\t') {
            // Escaped backslash ahead of the `\t` escape, for the same reason.
            output.push_str("\\\\");
        } else if !line.is_empty() {
            output.push(' ');
        }
        for ch in line.chars() {
            push_escaped(output, ch);
        }
    }
    output.push_str("\\n\"");
}

/// Renders `s` as a quoted, folded string literal regardless of how many
/// newlines it holds.
///
/// ```rust
/// use kyaml::encoder::fold;
///
/// assert_eq!(fold("a\n  b"), "\"\\n a\\n\\n\\  b\\n\"");
/// ```
#[must_use]
pub fn fold(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 8);
    write_folded(&mut output, s);
    output
}
