//! The top-level state machine: given the last token, the current
//! container, and the next non-whitespace byte, decide what kind of token
//! comes next, scan it, and update the cursor.

use crate::bitstack::BitStack;
use crate::config::{CommentHandling, TokenizerOptions};
use crate::cursor::Cursor;
use crate::decode::decode_escaped;
use crate::error::{Error, ErrorKind};
use crate::scan::comment::scan_comment;
use crate::scan::literal::scan_literal;
use crate::scan::number::scan_number;
use crate::scan::string::scan_string;
use crate::scan::ScanOutcome;
use crate::token::TokenKind;

/// What happened on the most recent call to [`Tokenizer::read`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadOutcome {
    /// A token was produced; inspect it with the accessor methods.
    Token,
    /// The document is complete; no further tokens remain.
    End,
    /// The window ended mid-token. Call
    /// [`continue_with`][Tokenizer::continue_with] with more bytes and the
    /// read will resume exactly where it left off.
    NeedMore,
}

/// A pull-based, resumable JSON tokenizer over a borrowed byte window.
///
/// `Tokenizer` never performs I/O. The caller hands it a window of bytes
/// plus whether more bytes can follow (`is_final_block`); [`read`][Self::read]
/// advances by exactly one token, or reports [`ReadOutcome::NeedMore`] when
/// the window ended before a full token could be recognized. Structural
/// state (nesting, last-token bookkeeping) survives across windows via
/// [`continue_with`][Self::continue_with], which consumes `self` so that no
/// token borrowed from the old window can be used after the window is gone.
pub struct Tokenizer<'buf> {
    buffer: &'buf [u8],
    is_final_block: bool,
    cursor: Cursor,
    total_consumed: usize,

    bits: BitStack,
    in_object: bool,
    is_not_primitive: bool,

    token_type: TokenKind,
    previous_token_type: TokenKind,
    token_start: usize,
    token_size: usize,
    value_is_escaped: bool,
    trailing_comma: bool,

    options: TokenizerOptions,
    error: Option<Error>,
}

/// Captures everything [`Tokenizer::read`] can mutate, taken before an
/// attempt and restored verbatim when the attempt reports
/// [`ReadOutcome::NeedMore`]. See the module-level rollback discussion in
/// the design notes: this is what makes each call to `read` atomic.
struct Snapshot {
    cursor: Cursor,
    bits: BitStack,
    in_object: bool,
    is_not_primitive: bool,
    token_type: TokenKind,
    previous_token_type: TokenKind,
    token_start: usize,
    token_size: usize,
    value_is_escaped: bool,
    trailing_comma: bool,
}

enum Attempt {
    Token,
    SkippedComment,
    End,
}

enum SkipOutcome {
    Done,
    NeedMore,
}

impl<'buf> Tokenizer<'buf> {
    /// Begin tokenizing `buffer`. `is_final_block` asserts that no more
    /// bytes will ever follow this window.
    pub fn new(buffer: &'buf [u8], is_final_block: bool, options: TokenizerOptions) -> Self {
        Tokenizer {
            buffer,
            is_final_block,
            cursor: Cursor::new(),
            total_consumed: 0,
            bits: BitStack::new(),
            in_object: false,
            is_not_primitive: false,
            token_type: TokenKind::Unknown,
            previous_token_type: TokenKind::Unknown,
            token_start: 0,
            token_size: 0,
            value_is_escaped: false,
            trailing_comma: false,
            options,
            error: None,
        }
    }

    /// Resume tokenizing with a new window, carrying over all structural
    /// state. `buffer` must begin with whatever tail of the previous window
    /// was left unconsumed (visible via
    /// [`bytes_consumed`][Self::bytes_consumed] before this call).
    pub fn continue_with(self, buffer: &'buf [u8], is_final_block: bool) -> Tokenizer<'buf> {
        Tokenizer {
            buffer,
            is_final_block,
            cursor: Cursor::new(),
            total_consumed: self.total_consumed + self.cursor.consumed,
            bits: self.bits,
            in_object: self.in_object,
            is_not_primitive: self.is_not_primitive,
            token_type: self.token_type,
            previous_token_type: self.previous_token_type,
            token_start: 0,
            token_size: 0,
            value_is_escaped: false,
            trailing_comma: self.trailing_comma,
            options: self.options,
            error: self.error,
        }
    }

    /// Clear a previously recorded error, allowing `read` to be called
    /// again. The tokenizer's position is unchanged; since every error is
    /// terminal for the stream, resuming rarely makes further progress
    /// unless the caller is specifically probing with a different
    /// accessor.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Discard the subtree rooted at the current token: a `Property`
    /// advances past its value; a container start reads until its matching
    /// close. Requires the final block, since a partial window cannot
    /// guarantee the subtree's end exists yet.
    pub fn skip(&mut self) -> Result<(), Error> {
        if !self.is_final_block {
            return Err(self.error_here(ErrorKind::CannotSkipOnPartial));
        }
        match self.skip_inner()? {
            SkipOutcome::Done => Ok(()),
            SkipOutcome::NeedMore => unreachable!("a final block never yields NeedMore"),
        }
    }

    /// Partial-window variant of [`skip`][Self::skip]: snapshots state up
    /// front and restores it if the subtree runs past the end of the
    /// current window, so the caller can retry after
    /// [`continue_with`][Self::continue_with].
    pub fn try_skip(&mut self) -> Result<bool, Error> {
        let snapshot = self.snapshot();
        match self.skip_inner()? {
            SkipOutcome::Done => Ok(true),
            SkipOutcome::NeedMore => {
                self.restore(snapshot);
                Ok(false)
            }
        }
    }

    fn skip_inner(&mut self) -> Result<SkipOutcome, Error> {
        match self.token_type {
            TokenKind::Property => {
                // The value may itself be a container; skip_inner recurses
                // so the whole subtree is consumed, not just its first token.
                match self.read()? {
                    ReadOutcome::NeedMore => Ok(SkipOutcome::NeedMore),
                    ReadOutcome::End => Ok(SkipOutcome::Done),
                    ReadOutcome::Token => self.skip_inner(),
                }
            }
            TokenKind::ObjectStart | TokenKind::ArrayStart => {
                let target = self.current_depth();
                loop {
                    match self.read()? {
                        ReadOutcome::Token => {
                            let closed = matches!(
                                self.token_type,
                                TokenKind::ObjectEnd | TokenKind::ArrayEnd
                            );
                            if closed && self.bits.count() == target {
                                return Ok(SkipOutcome::Done);
                            }
                        }
                        ReadOutcome::End => return Ok(SkipOutcome::Done),
                        ReadOutcome::NeedMore => return Ok(SkipOutcome::NeedMore),
                    }
                }
            }
            _ => Ok(SkipOutcome::Done),
        }
    }

    /// Advance by one token.
    pub fn read(&mut self) -> Result<ReadOutcome, Error> {
        if let Some(error) = self.error.clone() {
            return Err(error);
        }

        loop {
            self.cursor.skip_whitespace(self.buffer);
            let snapshot = self.snapshot();

            match self.attempt() {
                Ok(Attempt::Token) => {
                    log::trace!(
                        "produced {:?} at {}..{}",
                        self.token_type,
                        self.token_start,
                        self.token_start + self.token_size
                    );
                    return Ok(ReadOutcome::Token);
                }
                Ok(Attempt::SkippedComment) => continue,
                Ok(Attempt::End) => return Ok(ReadOutcome::End),
                Err(NeedMoreOr::NeedMore) => {
                    log::trace!("rolling back at offset {}", snapshot.cursor.consumed);
                    self.restore(snapshot);
                    return Ok(ReadOutcome::NeedMore);
                }
                Err(NeedMoreOr::Error(kind)) => {
                    let error = Error::new(
                        self.cursor.line_number,
                        self.cursor.byte_position_in_line,
                        kind,
                    );
                    log::error!("{error}");
                    self.error = Some(error.clone());
                    return Err(error);
                }
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor,
            bits: self.bits.clone(),
            in_object: self.in_object,
            is_not_primitive: self.is_not_primitive,
            token_type: self.token_type,
            previous_token_type: self.previous_token_type,
            token_start: self.token_start,
            token_size: self.token_size,
            value_is_escaped: self.value_is_escaped,
            trailing_comma: self.trailing_comma,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor = snapshot.cursor;
        self.bits = snapshot.bits;
        self.in_object = snapshot.in_object;
        self.is_not_primitive = snapshot.is_not_primitive;
        self.token_type = snapshot.token_type;
        self.previous_token_type = snapshot.previous_token_type;
        self.token_start = snapshot.token_start;
        self.token_size = snapshot.token_size;
        self.value_is_escaped = snapshot.value_is_escaped;
        self.trailing_comma = snapshot.trailing_comma;
    }

    /// The last non-comment token, used for every grammar decision when
    /// comments are allowed, so that `value /*c*/ , value` reads the same
    /// as `value , value`.
    fn effective_token_type(&self) -> TokenKind {
        if self.token_type == TokenKind::Comment {
            self.previous_token_type
        } else {
            self.token_type
        }
    }

    fn is_closed_value(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::ObjectEnd
                | TokenKind::ArrayEnd
        )
    }

    fn attempt(&mut self) -> Result<Attempt, NeedMoreOr> {
        // A comma was already consumed on an earlier call and what followed
        // it was one or more comments; resume the property-or-value (or
        // trailing-close) decision that the comma itself started, rather
        // than falling through to the generic dispatch below, which has no
        // memory of the comma and would let a trailing comma slip past
        // `allow_trailing_commas` whenever a comment sits in between.
        if self.trailing_comma {
            self.trailing_comma = false;
            return self.attempt_after_comma_dispatch();
        }

        let Some(byte) = self.cursor.peek(self.buffer) else {
            return self.attempt_end();
        };

        let effective = self.effective_token_type();

        // A comment is always scanned where one has already been produced
        // (so chains keep resolving) and after a value (so `FOUND_INVALID_CHARACTER`
        // still fires under `Disallow`, matching the "after a value" row).
        // In a value- or property-expecting position, `Disallow` instead
        // falls through to the ordinary dispatch below, which reports the
        // position's own missing-value/-property error.
        if byte == b'/' && (self.options.comment_handling != CommentHandling::Disallow
            || Self::is_closed_value(effective))
        {
            return self.attempt_comment();
        }

        match effective {
            TokenKind::Unknown => self.attempt_value(byte),
            TokenKind::ObjectStart => self.attempt_object_member(byte),
            TokenKind::ArrayStart => self.attempt_value(byte),
            TokenKind::Property => self.attempt_value(byte),
            kind if Self::is_closed_value(kind) => self.attempt_after_value(byte),
            _ => unreachable!("previous_token_type is never Comment (invariant 5)"),
        }
    }

    fn attempt_end(&mut self) -> Result<Attempt, NeedMoreOr> {
        if !self.is_final_block {
            return Err(NeedMoreOr::NeedMore);
        }
        let effective = self.effective_token_type();
        if effective == TokenKind::Unknown {
            return Err(NeedMoreOr::Error(ErrorKind::ExpectedJsonTokens));
        }
        if self.bits.count() == 0 && Self::is_closed_value(effective) {
            return Ok(Attempt::End);
        }
        Err(NeedMoreOr::Error(ErrorKind::ZeroDepthAtEnd))
    }

    fn attempt_comment(&mut self) -> Result<Attempt, NeedMoreOr> {
        if self.options.comment_handling == CommentHandling::Disallow {
            return Err(NeedMoreOr::Error(ErrorKind::FoundInvalidCharacter {
                found: '/',
            }));
        }
        match scan_comment(self.buffer, &mut self.cursor, self.is_final_block)
            .map_err(NeedMoreOr::Error)?
        {
            ScanOutcome::NeedMore => Err(NeedMoreOr::NeedMore),
            ScanOutcome::Done(span) => {
                if self.options.comment_handling == CommentHandling::Skip {
                    return Ok(Attempt::SkippedComment);
                }
                if self.token_type != TokenKind::Comment {
                    self.previous_token_type = self.token_type;
                }
                self.token_type = TokenKind::Comment;
                self.token_start = span.start;
                self.token_size = span.end - span.start;
                Ok(Attempt::Token)
            }
        }
    }

    fn check_depth_and_push(&mut self, is_object: bool) -> Result<(), NeedMoreOr> {
        if self.bits.count() >= self.options.max_depth {
            let kind = if is_object {
                ErrorKind::ObjectDepthTooLarge {
                    max_depth: self.options.max_depth,
                }
            } else {
                ErrorKind::ArrayDepthTooLarge {
                    max_depth: self.options.max_depth,
                }
            };
            return Err(NeedMoreOr::Error(kind));
        }
        self.bits
            .push(is_object)
            .map_err(|_| NeedMoreOr::Error(ErrorKind::OutOfMemory))?;
        self.in_object = is_object;
        Ok(())
    }

    fn attempt_value(&mut self, byte: u8) -> Result<Attempt, NeedMoreOr> {
        let start = self.cursor.consumed;
        match byte {
            b'"' => {
                self.cursor.advance(byte);
                match scan_string(self.buffer, &mut self.cursor, self.is_final_block)
                    .map_err(NeedMoreOr::Error)?
                {
                    ScanOutcome::NeedMore => Err(NeedMoreOr::NeedMore),
                    ScanOutcome::Done(scan) => {
                        self.set_token(TokenKind::String, scan.content_start, scan.content_end);
                        self.value_is_escaped = scan.escaped;
                        self.is_not_primitive = self.bits.count() > 0;
                        Ok(Attempt::Token)
                    }
                }
            }
            b'{' => {
                self.cursor.advance(byte);
                self.check_depth_and_push(true)?;
                self.set_token(TokenKind::ObjectStart, start, self.cursor.consumed);
                self.is_not_primitive = true;
                Ok(Attempt::Token)
            }
            b'[' => {
                self.cursor.advance(byte);
                self.check_depth_and_push(false)?;
                self.set_token(TokenKind::ArrayStart, start, self.cursor.consumed);
                self.is_not_primitive = true;
                Ok(Attempt::Token)
            }
            b'-' | b'0'..=b'9' => {
                let top_level = self.bits.count() == 0;
                match scan_number(self.buffer, &mut self.cursor, self.is_final_block, top_level)
                    .map_err(NeedMoreOr::Error)?
                {
                    ScanOutcome::NeedMore => Err(NeedMoreOr::NeedMore),
                    ScanOutcome::Done(scan) => {
                        self.set_token(TokenKind::Number, scan.start, scan.end);
                        self.is_not_primitive = self.bits.count() > 0;
                        Ok(Attempt::Token)
                    }
                }
            }
            b't' => self.attempt_literal(b"true", ErrorKind::ExpectedTrue, TokenKind::Boolean),
            b'f' => self.attempt_literal(b"false", ErrorKind::ExpectedFalse, TokenKind::Boolean),
            b'n' => self.attempt_literal(b"null", ErrorKind::ExpectedNull, TokenKind::Null),
            _found => Err(NeedMoreOr::Error(ErrorKind::ExpectedStartOfValueNotFound)),
        }
    }

    fn attempt_literal(
        &mut self,
        expected: &'static [u8],
        on_mismatch: ErrorKind,
        kind: TokenKind,
    ) -> Result<Attempt, NeedMoreOr> {
        let start = self.cursor.consumed;
        match scan_literal(self.buffer, &mut self.cursor, self.is_final_block, expected, on_mismatch)
            .map_err(NeedMoreOr::Error)?
        {
            ScanOutcome::NeedMore => Err(NeedMoreOr::NeedMore),
            ScanOutcome::Done(()) => {
                self.set_token(kind, start, self.cursor.consumed);
                self.is_not_primitive = self.bits.count() > 0;
                Ok(Attempt::Token)
            }
        }
    }

    fn attempt_object_member(&mut self, byte: u8) -> Result<Attempt, NeedMoreOr> {
        if byte == b'}' {
            return self.close_container(TokenKind::ObjectEnd);
        }
        if byte != b'"' {
            return Err(NeedMoreOr::Error(ErrorKind::ExpectedStartOfPropertyNotFound));
        }
        self.attempt_property(byte)
    }

    fn attempt_property(&mut self, byte: u8) -> Result<Attempt, NeedMoreOr> {
        self.cursor.advance(byte);
        let scan = match scan_string(self.buffer, &mut self.cursor, self.is_final_block)
            .map_err(NeedMoreOr::Error)?
        {
            ScanOutcome::NeedMore => return Err(NeedMoreOr::NeedMore),
            ScanOutcome::Done(scan) => scan,
        };

        self.cursor.skip_whitespace(self.buffer);
        match self.cursor.peek(self.buffer) {
            Some(b':') => self.cursor.advance(b':'),
            Some(found) => {
                return Err(NeedMoreOr::Error(ErrorKind::FoundInvalidCharacter {
                    found: found as char,
                }))
            }
            None => {
                if self.is_final_block {
                    return Err(NeedMoreOr::Error(ErrorKind::ExpectedValueAfterPropertyNotFound));
                }
                return Err(NeedMoreOr::NeedMore);
            }
        }
        self.cursor.skip_whitespace(self.buffer);

        self.set_token(TokenKind::Property, scan.content_start, scan.content_end);
        self.value_is_escaped = scan.escaped;
        Ok(Attempt::Token)
    }

    fn attempt_after_value(&mut self, byte: u8) -> Result<Attempt, NeedMoreOr> {
        if byte == b'}' && self.in_object && self.bits.count() > 0 {
            return self.close_container(TokenKind::ObjectEnd);
        }
        if byte == b']' && !self.in_object && self.bits.count() > 0 {
            return self.close_container(TokenKind::ArrayEnd);
        }
        // A zero-depth position is always "after a single top-level value",
        // regardless of what byte comes next: a `,` here is not a
        // continuation of anything, it is trailing garbage, exactly as
        // json_consume_next_token checks depth before dispatching on the
        // byte.
        if self.bits.count() == 0 {
            if self.options.allow_multiple_values {
                return self.attempt_value(byte);
            }
            return Err(NeedMoreOr::Error(ErrorKind::ExpectedEndAfterSingleJson));
        }
        if byte == b',' {
            return self.attempt_after_comma();
        }
        Err(NeedMoreOr::Error(ErrorKind::FoundInvalidCharacter {
            found: crate::cursor::char_at(self.buffer, self.cursor.consumed),
        }))
    }

    fn attempt_after_comma(&mut self) -> Result<Attempt, NeedMoreOr> {
        self.cursor.advance(b',');
        self.cursor.skip_whitespace(self.buffer);
        self.attempt_after_comma_dispatch()
    }

    /// Decide what a comma is followed by: a closing bracket (only valid
    /// with `allow_trailing_commas`), a property name, or a value. Also the
    /// resumption point after a comma-adjacent comment: `attempt` routes
    /// here again (via `trailing_comma`) once the comment is out of the
    /// way, so a chain of comments between a comma and its closing bracket
    /// still gets the trailing-comma check applied to whatever follows.
    fn attempt_after_comma_dispatch(&mut self) -> Result<Attempt, NeedMoreOr> {
        let in_object = self.in_object;
        let closing = if in_object { b'}' } else { b']' };

        match self.cursor.peek(self.buffer) {
            Some(b'/') if self.options.comment_handling != CommentHandling::Disallow => {
                self.trailing_comma = true;
                self.attempt_comment()
            }
            Some(found) if found == closing => {
                if !self.options.allow_trailing_commas {
                    let kind = if in_object {
                        ErrorKind::TrailingCommaNotAllowedBeforeObjectEnd
                    } else {
                        ErrorKind::TrailingCommaNotAllowedBeforeArrayEnd
                    };
                    return Err(NeedMoreOr::Error(kind));
                }
                let closing_kind = if in_object {
                    TokenKind::ObjectEnd
                } else {
                    TokenKind::ArrayEnd
                };
                self.close_container(closing_kind)
            }
            Some(found) if in_object && found != b'"' => {
                Err(NeedMoreOr::Error(ErrorKind::ExpectedStartOfPropertyNotFound))
            }
            Some(found) => {
                if in_object {
                    self.attempt_property(found)
                } else {
                    self.attempt_value(found)
                }
            }
            None => {
                if self.is_final_block {
                    Err(NeedMoreOr::Error(if in_object {
                        ErrorKind::ExpectedStartOfPropertyNotFound
                    } else {
                        ErrorKind::ExpectedStartOfValueNotFound
                    }))
                } else {
                    Err(NeedMoreOr::NeedMore)
                }
            }
        }
    }

    fn close_container(&mut self, kind: TokenKind) -> Result<Attempt, NeedMoreOr> {
        let start = self.cursor.consumed;
        let byte = self.cursor.peek(self.buffer).expect("caller confirmed a closing byte");
        self.cursor.advance(byte);
        self.bits.pop();
        self.in_object = self.bits.count() > 0 && self.bits.peek();
        self.set_token(kind, start, self.cursor.consumed);
        Ok(Attempt::Token)
    }

    fn set_token(&mut self, kind: TokenKind, start: usize, end: usize) {
        debug_assert_ne!(kind, TokenKind::Comment, "comments go through attempt_comment");
        self.previous_token_type = kind;
        self.token_type = kind;
        self.token_start = start;
        self.token_size = end - start;
        self.value_is_escaped = false;
    }

    // --- accessors -------------------------------------------------------

    /// Kind of the most recently produced token.
    pub fn token_type(&self) -> TokenKind {
        self.token_type
    }

    /// Offset of the current token into the *current window*.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Byte length of the current token.
    pub fn token_size(&self) -> usize {
        self.token_size
    }

    /// The current token's raw bytes, as they appear in the window
    /// (quotes excluded for `Property`/`String`).
    pub fn token(&self) -> &'buf [u8] {
        &self.buffer[self.token_start..self.token_start + self.token_size]
    }

    /// Whether the current string/property token's raw span contains a
    /// backslash. `false` means [`token`][Self::token] already is the
    /// string's content; `true` means callers that want the decoded form
    /// must call [`get_string`][Self::get_string].
    pub fn value_is_escaped(&self) -> bool {
        self.value_is_escaped
    }

    /// Nesting depth. While positioned on a container-start token, this is
    /// one less than `bits.count()` so the caller sees the depth *inside*
    /// the container just opened.
    pub fn current_depth(&self) -> usize {
        let count = self.bits.count();
        match self.token_type {
            TokenKind::ObjectStart | TokenKind::ArrayStart => count.saturating_sub(1),
            _ => count,
        }
    }

    /// Bytes consumed from the current window.
    pub fn bytes_consumed(&self) -> usize {
        self.cursor.consumed
    }

    /// Bytes consumed across every window seen so far.
    pub fn total_bytes_consumed(&self) -> usize {
        self.total_consumed + self.cursor.consumed
    }

    /// Compare the current string/property token against `text` without
    /// allocating, unless the token is escaped, in which case it is
    /// decoded into a transient `String` first.
    pub fn text_equals(&self, text: &str) -> Result<bool, Error> {
        self.expect_kind_in(&[TokenKind::String, TokenKind::Property])?;
        if !self.value_is_escaped {
            return Ok(self.token() == text.as_bytes());
        }
        let decoded = self.decode_current().map_err(|kind| self.error_here(kind))?;
        Ok(decoded == text)
    }

    /// The current string/property token, decoded if escaped.
    pub fn get_string(&self) -> Result<std::borrow::Cow<'buf, str>, Error> {
        self.expect_kind_in(&[TokenKind::String, TokenKind::Property])?;
        if !self.value_is_escaped {
            let text = std::str::from_utf8(self.token())
                .expect("JSON string scanner only admits valid UTF-8 continuations");
            return Ok(std::borrow::Cow::Borrowed(text));
        }
        let decoded = self.decode_current().map_err(|kind| self.error_here(kind))?;
        Ok(std::borrow::Cow::Owned(decoded))
    }

    /// The current string/property token, decoded if escaped, or `None` if
    /// the current token is of a different kind.
    pub fn try_get_string(&self) -> Option<std::borrow::Cow<'buf, str>> {
        self.get_string().ok()
    }

    /// The current `Property` token's name, decoded if escaped. Stricter
    /// than [`get_string`][Self::get_string], which also accepts a `String`
    /// token: use this one where only a property name makes sense.
    pub fn get_property(&self) -> Result<std::borrow::Cow<'buf, str>, Error> {
        self.expect_kind_in(&[TokenKind::Property])?;
        if !self.value_is_escaped {
            let text = std::str::from_utf8(self.token())
                .expect("JSON string scanner only admits valid UTF-8 continuations");
            return Ok(std::borrow::Cow::Borrowed(text));
        }
        let decoded = self.decode_current().map_err(|kind| self.error_here(kind))?;
        Ok(std::borrow::Cow::Owned(decoded))
    }

    /// `None` unless the current token is a `Property`.
    pub fn try_get_property(&self) -> Option<std::borrow::Cow<'buf, str>> {
        self.get_property().ok()
    }

    /// The current `Comment` token's raw bytes as a `&str`.
    pub fn get_comment(&self) -> Result<&'buf str, Error> {
        self.expect_kind_in(&[TokenKind::Comment])?;
        Ok(std::str::from_utf8(self.token()).unwrap_or(""))
    }

    /// `None` unless the current token is a `Comment`.
    pub fn try_get_comment(&self) -> Option<&'buf str> {
        self.get_comment().ok()
    }

    /// The current `Boolean` token's value.
    pub fn get_bool(&self) -> Result<bool, Error> {
        self.expect_kind_in(&[TokenKind::Boolean])?;
        Ok(self.token() == b"true")
    }

    /// `None` unless the current token is a `Boolean`.
    pub fn try_get_bool(&self) -> Option<bool> {
        self.get_bool().ok()
    }

    /// Advance to the next token and interpret it as a string or property
    /// value. On any failure — wrong token kind, a decode error, or the
    /// window ending before a full token was available — the tokenizer is
    /// rolled back to exactly where it stood before this call, so the
    /// caller can retry with a different `read_X`/`continue_with` call.
    pub fn read_string(&mut self) -> Result<Option<std::borrow::Cow<'buf, str>>, Error> {
        self.read_then(Self::get_string)
    }

    /// Like [`read_string`][Self::read_string], but a type mismatch yields
    /// `Ok(None)` instead of `Err`.
    pub fn try_read_string(&mut self) -> Result<Option<std::borrow::Cow<'buf, str>>, Error> {
        self.try_read_then(Self::get_string)
    }

    /// Advance to the next token and interpret it as a property name.
    pub fn read_property(&mut self) -> Result<Option<std::borrow::Cow<'buf, str>>, Error> {
        self.read_then(Self::get_property)
    }

    /// Like [`read_property`][Self::read_property], but a type mismatch
    /// yields `Ok(None)` instead of `Err`.
    pub fn try_read_property(&mut self) -> Result<Option<std::borrow::Cow<'buf, str>>, Error> {
        self.try_read_then(Self::get_property)
    }

    /// Advance to the next token and interpret it as a comment. Only ever
    /// succeeds under [`CommentHandling::Allow`][crate::CommentHandling::Allow].
    pub fn read_comment(&mut self) -> Result<Option<&'buf str>, Error> {
        self.read_then(Self::get_comment)
    }

    /// Like [`read_comment`][Self::read_comment], but a type mismatch
    /// yields `Ok(None)` instead of `Err`.
    pub fn try_read_comment(&mut self) -> Result<Option<&'buf str>, Error> {
        self.try_read_then(Self::get_comment)
    }

    /// Advance to the next token and interpret it as a boolean.
    pub fn read_bool(&mut self) -> Result<Option<bool>, Error> {
        self.read_then(Self::get_bool)
    }

    /// Like [`read_bool`][Self::read_bool], but a type mismatch yields
    /// `Ok(None)` instead of `Err`.
    pub fn try_read_bool(&mut self) -> Result<Option<bool>, Error> {
        self.try_read_then(Self::get_bool)
    }

    /// Advance one token via [`read`][Self::read] and interpret it with
    /// `interpret`. A window ending mid-token (`NeedMore`) or the document
    /// ending (`End`) both surface as `Ok(None)`, exactly like a type
    /// mismatch, since neither leaves a token for `interpret` to examine.
    /// Any failure restores the snapshot taken before `read` was called, so
    /// the consumed token is un-consumed and the position is unchanged.
    fn read_then<T>(
        &mut self,
        interpret: impl FnOnce(&Self) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        let snapshot = self.snapshot();
        match self.read()? {
            ReadOutcome::Token => match interpret(self) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    self.restore(snapshot);
                    Err(err)
                }
            },
            ReadOutcome::NeedMore => Ok(None),
            ReadOutcome::End => {
                self.restore(snapshot);
                Ok(None)
            }
        }
    }

    /// As [`read_then`][Self::read_then], but a type mismatch is folded
    /// into `Ok(None)` rather than returned as an error.
    fn try_read_then<T>(
        &mut self,
        interpret: impl FnOnce(&Self) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        let snapshot = self.snapshot();
        match self.read()? {
            ReadOutcome::Token => match interpret(self) {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    self.restore(snapshot);
                    Ok(None)
                }
            },
            ReadOutcome::NeedMore | ReadOutcome::End => Ok(None),
        }
    }

    fn decode_current(&self) -> Result<String, ErrorKind> {
        decode_escaped(self.token())
    }

    fn expect_kind_in(&self, allowed: &[TokenKind]) -> Result<(), Error> {
        if allowed.contains(&self.token_type) {
            return Ok(());
        }
        Err(self.error_here(ErrorKind::InvalidOperationExpectedKind {
            expected: allowed[0],
            actual: self.token_type,
        }))
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::new(self.cursor.line_number, self.cursor.byte_position_in_line, kind)
    }
}

/// Parse the current `Number` token with any `FromStr`-based numeric type
/// (`u8`..`u64`, `i8`..`i64`, `f32`, `f64`). The scanner has already
/// validated the token is a syntactically correct JSON number; range
/// checking and the actual conversion are delegated to the standard
/// library, per the design notes' treatment of numeric conversion as an
/// external collaborator.
impl<'buf> Tokenizer<'buf> {
    pub fn get_number<T: std::str::FromStr>(&self) -> Result<T, Error> {
        self.expect_kind_in(&[TokenKind::Number])?;
        let text = std::str::from_utf8(self.token()).expect("number scanner only admits ASCII");
        text.parse::<T>()
            .map_err(|_| self.error_here(ErrorKind::NumberOutOfRange))
    }

    pub fn try_get_number<T: std::str::FromStr>(&self) -> Option<T> {
        if self.token_type != TokenKind::Number {
            return None;
        }
        let text = std::str::from_utf8(self.token()).ok()?;
        text.parse::<T>().ok()
    }

    /// Advance to the next token and interpret it as a number of type `T`
    /// (any `u8`..`u64`, `i8`..`i64`, `f32`, or `f64`). On a wrong token
    /// kind, an out-of-range value, or the window ending before a full
    /// token was available, the tokenizer is rolled back so the caller can
    /// retry.
    pub fn read_number<T: std::str::FromStr>(&mut self) -> Result<Option<T>, Error> {
        self.read_then(Self::get_number::<T>)
    }

    /// Like [`read_number`][Self::read_number], but a type mismatch or
    /// out-of-range value yields `Ok(None)` instead of `Err`.
    pub fn try_read_number<T: std::str::FromStr>(&mut self) -> Result<Option<T>, Error> {
        self.try_read_then(Self::get_number::<T>)
    }
}

enum NeedMoreOr {
    NeedMore,
    Error(ErrorKind),
}
