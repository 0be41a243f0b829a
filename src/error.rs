//! The closed set of failures this tokenizer can report.

use crate::token::TokenKind;

/// Everything that can go wrong while tokenizing, plus the position it
/// happened at.
///
/// Every variant is terminal for the stream it was raised on: once `self`
/// is populated, further calls to [`Tokenizer::read`][crate::Tokenizer::read]
/// are not guaranteed to make progress until
/// [`clear_error`][crate::Tokenizer::clear_error] is called.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("[Line {line}, Column {column}] {kind}")]
pub struct Error {
    /// 1-based line the error was detected on.
    pub line: usize,
    /// 1-based column the error was detected on.
    pub column: usize,
    /// What went wrong.
    pub kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(line: usize, column: usize, kind: ErrorKind) -> Self {
        Error { line, column, kind }
    }
}

/// A single failure kind, grouped below into the seven families the
/// design falls into: structural, lexical, numeric grammar, literal
/// mismatch, trailing-comma policy, incomplete-on-final-block, and
/// misuse of accessors.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    // --- structural ---
    #[error("object depth of {max_depth} exceeded")]
    ObjectDepthTooLarge { max_depth: usize },
    #[error("array depth of {max_depth} exceeded")]
    ArrayDepthTooLarge { max_depth: usize },
    #[error("expected end of document but depth was not zero")]
    ZeroDepthAtEnd,
    #[error("found invalid character '{found}' when expecting a value, comma, or closing bracket")]
    FoundInvalidCharacter { found: char },
    #[error("expected a JSON value, object, or array but found nothing")]
    ExpectedJsonTokens,
    #[error("expected the start of a property name but it was not found")]
    ExpectedStartOfPropertyNotFound,
    #[error("expected the start of a value but it was not found")]
    ExpectedStartOfValueNotFound,
    #[error("expected the end of the document after a single JSON value")]
    ExpectedEndAfterSingleJson,

    // --- lexical ---
    #[error("invalid escape character '{found}' inside string")]
    InvalidEscapeCharacterWithinString { found: char },
    #[error("invalid hex digit '{found}' within \\u escape")]
    InvalidHexCharacterWithinString { found: char },
    #[error("control character 0x{byte:02x} is not allowed inside a string")]
    ControlCharacterWithinString { byte: u8 },
    #[error("lone UTF-16 surrogate in \\u escape is not a valid Unicode scalar value")]
    InvalidUnicodeEscape,

    // --- numeric grammar ---
    #[error("a leading zero must not be followed by another digit")]
    ExpectedNoLeadingZero,
    #[error("expected a digit after '-'")]
    ExpectedDigitAfterSign,
    #[error("expected a digit after the decimal point")]
    ExpectedDigitAfterDecimalPoint,
    #[error("expected a digit after the exponent character")]
    ExpectedDigitAfterExponent,
    #[error("expected whitespace or a delimiter after the number but found '{found}'")]
    ExpectedEndOfDigitNotFound { found: char },

    // --- literal mismatch ---
    #[error("expected the literal 'true'")]
    ExpectedTrue,
    #[error("expected the literal 'false'")]
    ExpectedFalse,
    #[error("expected the literal 'null'")]
    ExpectedNull,

    // --- trailing-comma policy ---
    #[error("a trailing comma before '}}' is not allowed")]
    TrailingCommaNotAllowedBeforeObjectEnd,
    #[error("a trailing comma before ']' is not allowed")]
    TrailingCommaNotAllowedBeforeArrayEnd,

    // --- incomplete on final block ---
    #[error("the end of the string was not found before the end of the document")]
    EndOfStringNotFound,
    #[error("the end of the comment was not found before the end of the document")]
    EndOfCommentNotFound,
    #[error("expected a digit but found the end of the document")]
    RequiredDigitNotFoundEndOfData,
    #[error("expected a value after the property name but found the end of the document")]
    ExpectedValueAfterPropertyNotFound,
    #[error("an unescaped line separator (U+2028/U+2029) is not allowed in a line comment")]
    UnexpectedEndOfLineSeparator,

    // --- misuse of accessors ---
    #[error("expected the current token to be of kind {expected} but it was {actual}")]
    InvalidOperationExpectedKind {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("cannot skip past a token boundary without the final block")]
    CannotSkipOnPartial,
    #[error("the nesting stack could not grow: out of memory")]
    OutOfMemory,
    #[error("number token does not fit in the requested numeric type")]
    NumberOutOfRange,
}

impl From<crate::bitstack::BitStackOom> for ErrorKind {
    fn from(_: crate::bitstack::BitStackOom) -> Self {
        ErrorKind::OutOfMemory
    }
}
