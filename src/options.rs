//! Configuration options for KYAML decoding.
//!
//! The text format itself has no knobs: indentation, quoting and folding are
//! fixed so that every producer emits byte-identical output. What callers can
//! tune is how much the decoder is willing to accept.
//!
//! ## Examples
//!
//! ```rust
//! use kyaml::{load_with_options, DecodeOptions};
//!
//! let options = DecodeOptions::new().with_max_depth(2);
//! assert!(load_with_options("---\n[[1]]\n", options.clone()).is_ok());
//! assert!(load_with_options("---\n[[[1]]]\n", options).is_err());
//! ```

/// Configuration options for the decoder.
///
/// # Examples
///
/// ```rust
/// use kyaml::DecodeOptions;
///
/// let options = DecodeOptions::new();
/// assert_eq!(options.max_depth, None);
///
/// let options = DecodeOptions::new().with_max_depth(64);
/// assert_eq!(options.max_depth, Some(64));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of mappings and sequences. `None` means unbounded,
    /// which is only safe for trusted input since the decoder recurses once
    /// per level.
    pub max_depth: Option<usize>,
}

impl DecodeOptions {
    /// Creates default options (no depth limit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how deeply mappings and sequences may nest.
    ///
    /// A document whose top-level value is a collection has depth 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
