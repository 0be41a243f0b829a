//! The closed set of token kinds produced by [`Tokenizer::read`][crate::Tokenizer::read].

/// Kind of the token currently positioned on by a [`Tokenizer`][crate::Tokenizer].
///
/// This is a closed set: readers that match on every variant do not need a
/// catch-all arm, and never will, because the grammar this tokenizer
/// enforces (RFC 8259 plus optional comments and trailing commas) has no
/// other kinds of lexical unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// The initial state, before any token has been read.
    Unknown,
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// An object property name, spanning only the string's content (not the
    /// surrounding quotes).
    Property,
    /// A JSON string value, spanning only its content.
    String,
    /// A JSON number, spanning its full lexical form (sign, digits,
    /// fraction, exponent).
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// A `//` or `/* */` comment.
    ///
    /// Only ever produced when [`CommentHandling::Allow`][crate::CommentHandling::Allow]
    /// is configured; under `Skip` comments are consumed silently and under
    /// `Disallow` they are a lexical error.
    Comment,
}

impl TokenKind {
    /// Whether this kind is one of the scalar value kinds (string, number,
    /// boolean, null).
    ///
    /// Used by the comment-aware lookback in [`CommentHandling::Allow`][crate::CommentHandling::Allow]
    /// to decide what a comment is "standing in for".
    pub(crate) fn is_primitive_value(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Null
        )
    }

    /// A short, stable name for this kind, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Unknown => "Unknown",
            TokenKind::ObjectStart => "ObjectStart",
            TokenKind::ObjectEnd => "ObjectEnd",
            TokenKind::ArrayStart => "ArrayStart",
            TokenKind::ArrayEnd => "ArrayEnd",
            TokenKind::Property => "Property",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::Boolean => "Boolean",
            TokenKind::Null => "Null",
            TokenKind::Comment => "Comment",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
