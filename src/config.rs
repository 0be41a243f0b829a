//! Tokenizer configuration.

/// How `//` and `/* */` comments are treated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum CommentHandling {
    /// Any `/` outside a string is a lexical error.
    #[default]
    Disallow,
    /// Comments are scanned and their bytes counted toward line/column
    /// tracking, but no [`TokenKind::Comment`][crate::TokenKind::Comment]
    /// token is ever produced.
    Skip,
    /// Comments are surfaced as
    /// [`TokenKind::Comment`][crate::TokenKind::Comment] tokens.
    Allow,
}

/// Immutable configuration for a [`Tokenizer`][crate::Tokenizer], set once
/// at construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TokenizerOptions {
    /// Maximum container nesting before `DepthTooLarge` fires on the next
    /// `{` or `[`. Defaults to 64.
    pub max_depth: usize,
    /// If set, a `,` immediately before `}` or `]` is accepted instead of
    /// raising a trailing-comma error.
    pub allow_trailing_commas: bool,
    /// If set, the top level may contain more than one value; otherwise
    /// any non-whitespace, non-comment byte after the first top-level
    /// value is `ExpectedEndAfterSingleJson`.
    pub allow_multiple_values: bool,
    /// See [`CommentHandling`].
    pub comment_handling: CommentHandling,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            max_depth: 64,
            allow_trailing_commas: false,
            allow_multiple_values: false,
            comment_handling: CommentHandling::Disallow,
        }
    }
}

impl TokenizerOptions {
    /// Start from the defaults: `max_depth = 64`, trailing commas and
    /// multiple top-level values disallowed, comments disallowed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    pub fn with_multiple_values(mut self, allow: bool) -> Self {
        self.allow_multiple_values = allow;
        self
    }

    pub fn with_comment_handling(mut self, handling: CommentHandling) -> Self {
        self.comment_handling = handling;
        self
    }
}
