//! Error types for KYAML encoding and decoding.
//!
//! Decoding failures are reported as a [`ParseError`], which carries the
//! [`ParseErrorKind`], a human-readable message and the character offset at
//! which the decoder gave up. Every parse error is fatal: there is no partial
//! result and no recovery mode.
//!
//! Encoding only fails for values KYAML has no spelling for (non-finite
//! floats, or foreign shapes reaching the encoder through Serde), reported as
//! [`Error::UnsupportedType`].
//!
//! ## Examples
//!
//! ```rust
//! use kyaml::{load, Error, ParseErrorKind};
//!
//! let err = load("---\n@\n").unwrap_err();
//! match err {
//!     Error::Parse(parse) => {
//!         assert_eq!(parse.kind, ParseErrorKind::UnexpectedCharacter);
//!         assert_eq!(parse.position, 4);
//!     }
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// The category of a decoding failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The document does not start with `---\n`.
    MissingPrefix,
    /// A value was expected but the lookahead character cannot start one.
    UnexpectedCharacter,
    /// The input ended where a value or key was expected.
    UnexpectedEof,
    /// A string literal was not closed before the end of input.
    UnterminatedString,
    /// A backslash was followed by a character with no escape meaning.
    UnknownEscape,
    /// A number is missing its integer or fractional digits.
    ExpectedDigit,
    /// A number is well-formed but does not fit its target type.
    InvalidNumber,
    /// Input starting with `t`, `f` or `n` is not `true`, `false` or `null`.
    ExpectedLiteral,
    /// A required delimiter (`:`, `,`, `}`, `]`) is missing.
    ExpectedChar,
    /// A mapping key is neither a quoted string nor a safe bare key.
    ExpectedKey,
    /// Non-whitespace content follows the top-level value.
    TrailingContent,
    /// Nesting went deeper than the configured limit.
    DepthLimitExceeded,
}

impl ParseErrorKind {
    /// Short, stable name of the kind, used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::MissingPrefix => "missing_prefix",
            ParseErrorKind::UnexpectedCharacter => "unexpected_character",
            ParseErrorKind::UnexpectedEof => "unexpected_eof",
            ParseErrorKind::UnterminatedString => "unterminated_string",
            ParseErrorKind::UnknownEscape => "unknown_escape",
            ParseErrorKind::ExpectedDigit => "expected_digit",
            ParseErrorKind::InvalidNumber => "invalid_number",
            ParseErrorKind::ExpectedLiteral => "expected_literal",
            ParseErrorKind::ExpectedChar => "expected_char",
            ParseErrorKind::ExpectedKey => "expected_key",
            ParseErrorKind::TrailingContent => "trailing_content",
            ParseErrorKind::DepthLimitExceeded => "depth_limit_exceeded",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal decoding failure.
///
/// `position` is the offset, in characters from the start of the input, at
/// which the failure was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Creates a parse error of the given kind at a character offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kyaml::{ParseError, ParseErrorKind};
    ///
    /// let err = ParseError::new(ParseErrorKind::ExpectedKey, "expected key", 12);
    /// assert_eq!(err.to_string(), "expected key at position 12");
    /// ```
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, position: usize) -> Self {
        ParseError {
            kind,
            message: message.into(),
            position,
        }
    }
}

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input is not a valid KYAML document.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The value has no KYAML representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error, usually raised by a `Serialize` or `Deserialize` impl
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error wrapped in [`Error::Parse`].
    pub fn parse(kind: ParseErrorKind, message: impl Into<String>, position: usize) -> Self {
        Error::Parse(ParseError::new(kind, message, position))
    }

    /// Creates an unsupported type error for values that cannot be encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kyaml::Error;
    ///
    /// let err = Error::unsupported_type("non-finite float NaN");
    /// assert!(err.to_string().contains("NaN"));
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the parse error if this is a decoding failure.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
