//! KYAML decoding.
//!
//! The [`Decoder`] is a single-pass recursive-descent parser over a string
//! slice. One lookahead character, taken after skipping whitespace, picks the
//! production:
//!
//! | lookahead | production |
//! |-----------|------------|
//! | `"` | string |
//! | `{` | mapping |
//! | `[` | sequence |
//! | `t` / `f` / `n` | `true` / `false` / `null` |
//! | `-` or digit | number |
//!
//! Anything else is an error. Every error is fatal and carries the character
//! offset at which decoding stopped.
//!
//! ```rust
//! use kyaml::{Decoder, Value};
//!
//! let value = Decoder::new("---\n{\n  a: 1,\n  b: [\n    true,\n  ],\n}\n")
//!     .decode()
//!     .unwrap();
//! assert_eq!(value["a"], Value::Int(1));
//! assert_eq!(value["b"][0], Value::Bool(true));
//! ```

use crate::map::{is_bare_key_char, is_bare_key_start};
use crate::{DecodeOptions, Error, Mapping, ParseErrorKind, Result, Value};

const DOCUMENT_PREFIX: &str = "---\n";

/// The KYAML decoder.
///
/// Holds a cursor into the input; create one per document.
pub struct Decoder<'de> {
    input: &'de str,
    position: usize,
    depth: usize,
    options: DecodeOptions,
}

impl<'de> Decoder<'de> {
    pub fn new(input: &'de str) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    pub fn with_options(input: &'de str, options: DecodeOptions) -> Self {
        Decoder {
            input,
            position: 0,
            depth: 0,
            options,
        }
    }

    /// Decodes a complete document: the `---\n` prefix, one value, and
    /// nothing but whitespace after it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] describing the first problem found.
    pub fn decode(&mut self) -> Result<Value> {
        if !self.rest().starts_with(DOCUMENT_PREFIX) {
            return Err(self.error(
                ParseErrorKind::MissingPrefix,
                format!("expected {:?}", DOCUMENT_PREFIX),
            ));
        }
        self.position += DOCUMENT_PREFIX.len();

        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.position < self.input.len() {
            return Err(self.error(
                ParseErrorKind::TrailingContent,
                "unexpected content after value",
            ));
        }
        Ok(value)
    }

    fn rest(&self) -> &'de str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.as_bytes().get(self.position).copied() {
            self.position += 1;
        }
    }

    fn error(&self, kind: ParseErrorKind, msg: impl Into<String>) -> Error {
        self.error_at(self.position, kind, msg)
    }

    /// Errors report character offsets; the cursor itself counts bytes.
    fn error_at(&self, byte_pos: usize, kind: ParseErrorKind, msg: impl Into<String>) -> Error {
        let position = self.input[..byte_pos].chars().count();
        Error::parse(kind, msg, position)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.position += ch.len_utf8();
                Ok(())
            }
            other => Err(self.error(
                ParseErrorKind::ExpectedChar,
                format!("expected {:?}, got {}", expected, describe(other)),
            )),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        match self.options.max_depth {
            Some(max) if self.depth > max => Err(self.error(
                ParseErrorKind::DepthLimitExceeded,
                format!("nesting deeper than {} levels", max),
            )),
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();

        match self.peek() {
            Some('"') => Ok(Value::String(self.parse_string()?)),
            Some('{') => self.parse_mapping(),
            Some('[') => self.parse_sequence(),
            Some('t') => self.parse_literal("true", Value::Bool(true)),
            Some('f') => self.parse_literal("false", Value::Bool(false)),
            Some('n') => self.parse_literal("null", Value::Null),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) => Err(self.error(
                ParseErrorKind::UnexpectedCharacter,
                format!("unexpected character: {:?}", ch),
            )),
            None => Err(self.error(ParseErrorKind::UnexpectedEof, "unexpected end of input")),
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.rest().starts_with(word) {
            self.position += word.len();
            Ok(value)
        } else {
            Err(self.error(ParseErrorKind::ExpectedLiteral, format!("expected {:?}", word)))
        }
    }

    fn skip_digits(&mut self) -> bool {
        let count = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        self.position += count;
        count > 0
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.position;

        if self.peek() == Some('-') {
            self.position += 1;
        }
        if !self.skip_digits() {
            return Err(self.error(ParseErrorKind::ExpectedDigit, "expected digit"));
        }

        if self.peek() == Some('.') {
            self.position += 1;
            if !self.skip_digits() {
                return Err(self.error(
                    ParseErrorKind::ExpectedDigit,
                    "expected digit after decimal point",
                ));
            }
            let text = &self.input[start..self.position];
            text.parse::<f64>().map(Value::Float).map_err(|_| {
                self.error_at(start, ParseErrorKind::InvalidNumber, "invalid float")
            })
        } else {
            let text = &self.input[start..self.position];
            text.parse::<i64>().map(Value::Int).map_err(|_| {
                self.error_at(
                    start,
                    ParseErrorKind::InvalidNumber,
                    format!("integer out of range: {}", text),
                )
            })
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect_char('"')?;
        let mut buffer = String::new();

        loop {
            match self.next_char() {
                Some('"') => break,
                Some('\\') => self.parse_escape(&mut buffer)?,
                Some(ch) => buffer.push(ch),
                None => {
                    return Err(self.error(
                        ParseErrorKind::UnterminatedString,
                        "unterminated string",
                    ))
                }
            }
        }

        Ok(unfold(buffer))
    }

    fn parse_escape(&mut self, buffer: &mut String) -> Result<()> {
        let escape_start = self.position;
        match self.next_char() {
            Some('n') => buffer.push('\n'),
            Some('t') => buffer.push('\t'),
            Some('\\') => buffer.push('\\'),
            Some('"') => buffer.push('"'),
            // Kept as a pair: unfold uses the backslash to spot a folded
            // line with significant leading whitespace.
            Some(' ') => buffer.push_str("\\ "),
            Some(other) => {
                return Err(self.error_at(
                    escape_start,
                    ParseErrorKind::UnknownEscape,
                    format!("unknown escape: \\{}", other),
                ))
            }
            None => {
                return Err(self.error(
                    ParseErrorKind::UnterminatedString,
                    "unterminated escape",
                ))
            }
        }
        Ok(())
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some('"') => self.parse_string(),
            Some(ch) if is_bare_key_start(ch) => {
                let start = self.position;
                let len: usize = self
                    .rest()
                    .chars()
                    .take_while(|&c| is_bare_key_char(c))
                    .map(char::len_utf8)
                    .sum();
                self.position += len;
                Ok(self.input[start..self.position].to_string())
            }
            Some(ch) => Err(self.error(
                ParseErrorKind::ExpectedKey,
                format!("expected key, got {:?}", ch),
            )),
            None => Err(self.error(
                ParseErrorKind::UnexpectedEof,
                "unexpected end of input, expected key",
            )),
        }
    }

    fn parse_mapping(&mut self) -> Result<Value> {
        self.enter()?;
        self.expect_char('{')?;
        self.skip_whitespace();

        let mut map = Mapping::new();
        if self.peek() != Some('}') {
            loop {
                self.skip_whitespace();
                let key = self.parse_key()?;
                self.skip_whitespace();
                self.expect_char(':')?;
                let value = self.parse_value()?;
                // Duplicate keys: the later value wins.
                map.insert(key, value);

                // Without a comma the next token must be another key, so a
                // closing brace is only reached through a trailing comma.
                if self.skip_separator('}') {
                    break;
                }
            }
        }

        self.expect_char('}')?;
        self.leave();
        Ok(Value::Mapping(map))
    }

    fn parse_sequence(&mut self) -> Result<Value> {
        self.enter()?;
        self.expect_char('[')?;
        self.skip_whitespace();

        let mut seq = Vec::new();
        if self.peek() != Some(']') {
            loop {
                seq.push(self.parse_value()?);

                self.skip_whitespace();
                if self.peek() == Some(']') || self.skip_separator(']') {
                    break;
                }
            }
        }

        self.expect_char(']')?;
        self.leave();
        Ok(Value::Sequence(seq))
    }

    /// Consumes an optional `,` after a collection entry. Returns `true` when
    /// a comma was consumed and `close` follows it.
    fn skip_separator(&mut self, close: char) -> bool {
        self.skip_whitespace();
        if self.peek() != Some(',') {
            return false;
        }
        self.position += 1;
        self.skip_whitespace();
        self.peek() == Some(close)
    }
}

fn describe(ch: Option<char>) -> String {
    match ch {
        Some(ch) => format!("{:?}", ch),
        None => "end of input".to_string(),
    }
}

/// Reverses the encoder's folding of multi-line strings.
///
/// `buffer` is a string body after escape processing. It is returned as-is
/// unless it starts and ends with a newline and contains a blank line (the
/// fold marker). Otherwise the outer newlines are stripped, the text is split
/// on blank lines, each segment loses one leading space or, failing that,
/// one leading backslash, and the segments are joined with single newlines.
///
/// ```rust
/// use kyaml::decoder::unfold;
///
/// assert_eq!(unfold("\n one\n\n two\n".to_string()), "one\ntwo");
/// assert_eq!(unfold("\n this:\n\n\\  is:\n".to_string()), "this:\n  is:");
/// assert_eq!(unfold("hello\n".to_string()), "hello\n");
/// ```
#[must_use]
pub fn unfold(buffer: String) -> String {
    let folded = buffer.len() > 1
        && buffer.starts_with('\n')
        && buffer.ends_with('\n')
        && buffer.contains("\n\n");
    if !folded {
        return buffer;
    }

    let inner = &buffer[1..buffer.len() - 1];
    inner
        .split("\n\n")
        .map(|segment| {
            segment
                .strip_prefix(' ')
                .or_else(|| segment.strip_prefix('\\'))
                .unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    fn decode(input: &str) -> Result<Value> {
        Decoder::new(input).decode()
    }

    fn parse_error(input: &str) -> ParseError {
        match decode(input) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected parse error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(decode("---\nnull\n").unwrap(), Value::Null);
        assert_eq!(decode("---\ntrue\n").unwrap(), Value::Bool(true));
        assert_eq!(decode("---\nfalse\n").unwrap(), Value::Bool(false));
        assert_eq!(decode("---\n42\n").unwrap(), Value::Int(42));
        assert_eq!(decode("---\n-7\n").unwrap(), Value::Int(-7));
        assert_eq!(decode("---\n2.25\n").unwrap(), Value::Float(2.25));
        assert_eq!(decode("---\n-0.5\n").unwrap(), Value::Float(-0.5));
    }

    #[test]
    fn test_strings() {
        assert_eq!(decode("---\n\"\"\n").unwrap(), Value::from(""));
        assert_eq!(
            decode("---\n\"say \\\"hi\\\"\"\n").unwrap(),
            Value::from("say \"hi\"")
        );
        assert_eq!(
            decode("---\n\"back\\\\slash\"\n").unwrap(),
            Value::from("back\\slash")
        );
        assert_eq!(
            decode("---\n\"col1\\tcol2\"\n").unwrap(),
            Value::from("col1\tcol2")
        );
        assert_eq!(decode("---\n\"\\n\"\n").unwrap(), Value::from("\n"));
    }

    #[test]
    fn test_backslash_space_escape_is_kept_as_a_pair() {
        assert_eq!(decode("---\n\"a\\ b\"\n").unwrap(), Value::from("a\\ b"));
    }

    #[test]
    fn test_unfold_rules() {
        assert_eq!(unfold("\n".to_string()), "\n");
        assert_eq!(unfold("\nno fold marker\n".to_string()), "\nno fold marker\n");
        assert_eq!(unfold("\n line1\n\n line2\n\n\n".to_string()), "line1\nline2\n");
        assert_eq!(unfold("\n a\n\n\n\n b\n".to_string()), "a\n\nb");
        assert_eq!(unfold("\n a\n\n\\\tb\n".to_string()), "a\n\tb");
        assert_eq!(unfold("\n\n".to_string()), "");
    }

    #[test]
    fn test_mapping_forms() {
        let value = decode("---\n{a: 1, \"b c\": 2,}\n").unwrap();
        let keys: Vec<_> = value.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b c"]);

        assert_eq!(
            decode("---\n{}\n").unwrap(),
            Value::Mapping(Mapping::new())
        );
        assert_eq!(decode("---\n{ }\n").unwrap(), Value::Mapping(Mapping::new()));
        assert_eq!(
            decode("---\n{a: 1 b: 2,}\n").unwrap(),
            decode("---\n{\n  a: 1,\n  b: 2,\n}\n").unwrap()
        );
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let value = decode("---\n{\n  a: 1,\n  b: 2,\n  a: 3,\n}\n").unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Value::Int(3)));
        assert_eq!(map.keys().next().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_sequence_forms() {
        assert_eq!(decode("---\n[]\n").unwrap(), Value::Sequence(vec![]));
        assert_eq!(
            decode("---\n[1 2]\n").unwrap(),
            Value::Sequence(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            decode("---\n[1, 2]\n").unwrap(),
            Value::Sequence(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            decode("---\n[\n  1,\n  2,\n]\n").unwrap(),
            Value::Sequence(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_error_positions() {
        let err = parse_error("---\n@\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
        assert_eq!(err.position, 4);

        let err = parse_error("null\n");
        assert_eq!(err.kind, ParseErrorKind::MissingPrefix);
        assert_eq!(err.position, 0);
        assert_eq!(err.message, "expected \"---\\n\"");

        let err = parse_error("---\nnull garbage\n");
        assert_eq!(err.kind, ParseErrorKind::TrailingContent);
        assert_eq!(err.position, 9);
    }

    #[test]
    fn test_positions_count_characters() {
        let err = parse_error("---\n[\"é\", @]\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
        assert_eq!(err.position, 10);
    }

    #[test]
    fn test_error_kinds() {
        let cases = [
            ("---\n\"hello\n", ParseErrorKind::UnterminatedString),
            ("---\n\"a\\qb\"\n", ParseErrorKind::UnknownEscape),
            ("---\n-\n", ParseErrorKind::ExpectedDigit),
            ("---\n1.\n", ParseErrorKind::ExpectedDigit),
            ("---\n99999999999999999999\n", ParseErrorKind::InvalidNumber),
            ("---\ntru\n", ParseErrorKind::ExpectedLiteral),
            ("---\n{a 1}\n", ParseErrorKind::ExpectedChar),
            ("---\n{1: a}\n", ParseErrorKind::ExpectedKey),
            ("---\n{a: 1}\n", ParseErrorKind::ExpectedKey),
            ("---\n{\n  a: 1,\n\n", ParseErrorKind::UnexpectedEof),
            ("---\n[\n  1,\n\n", ParseErrorKind::UnexpectedEof),
            ("---\n", ParseErrorKind::UnexpectedEof),
        ];
        for (input, kind) in cases {
            assert_eq!(parse_error(input).kind, kind, "input {input:?}");
        }
    }

    #[test]
    fn test_depth_limit() {
        let options = DecodeOptions::new().with_max_depth(2);
        assert!(Decoder::with_options("---\n{a: [1],}\n", options.clone())
            .decode()
            .is_ok());

        let err = Decoder::with_options("---\n{a: [[1]],}\n", options)
            .decode()
            .unwrap_err();
        let err = err.as_parse_error().unwrap();
        assert_eq!(err.kind, ParseErrorKind::DepthLimitExceeded);
        assert_eq!(err.position, 9);
    }
}
