//! `//` and `/* */` comment scanning.
//!
//! Assumes `cursor` is positioned on the first `/` of the comment opener;
//! the tokenizer only calls into this module once it has already decided
//! the grammar permits a comment here.

use crate::cursor::Cursor;
use crate::error::ErrorKind;
use crate::scan::ScanOutcome;

/// Span of a scanned comment (including the `//`/`/* */` delimiters),
/// relative to the whole buffer.
pub(crate) struct CommentScan {
    pub start: usize,
    pub end: usize,
}

pub(crate) fn scan_comment(
    buffer: &[u8],
    cursor: &mut Cursor,
    is_final: bool,
) -> Result<ScanOutcome<CommentScan>, ErrorKind> {
    let start = *cursor;
    let comment_start = cursor.consumed;

    cursor.advance(b'/');
    let Some(second) = cursor.peek(buffer) else {
        if is_final {
            return Err(ErrorKind::EndOfCommentNotFound);
        }
        *cursor = start;
        return Ok(ScanOutcome::NeedMore);
    };

    match second {
        b'/' => {
            cursor.advance(second);
            scan_line_comment(buffer, cursor, is_final, start, comment_start)
        }
        b'*' => {
            cursor.advance(second);
            scan_block_comment(buffer, cursor, is_final, start, comment_start)
        }
        found => Err(ErrorKind::FoundInvalidCharacter {
            found: found as char,
        }),
    }
}

fn scan_line_comment(
    buffer: &[u8],
    cursor: &mut Cursor,
    is_final: bool,
    start: Cursor,
    comment_start: usize,
) -> Result<ScanOutcome<CommentScan>, ErrorKind> {
    loop {
        let Some(byte) = cursor.peek(buffer) else {
            // A final, unterminated line comment simply ends at EOF; that
            // is not an error, unlike a block comment.
            if !is_final {
                *cursor = start;
                return Ok(ScanOutcome::NeedMore);
            }
            return Ok(ScanOutcome::Done(CommentScan {
                start: comment_start,
                end: cursor.consumed,
            }));
        };
        match byte {
            b'\n' => {
                let end = cursor.consumed;
                cursor.advance(byte);
                return Ok(ScanOutcome::Done(CommentScan {
                    start: comment_start,
                    end,
                }));
            }
            b'\r' => {
                let end = cursor.consumed;
                cursor.advance(byte);
                if cursor.peek(buffer) == Some(b'\n') {
                    cursor.advance(b'\n');
                }
                return Ok(ScanOutcome::Done(CommentScan {
                    start: comment_start,
                    end,
                }));
            }
            _ => {
                if is_line_separator(buffer, cursor.consumed) {
                    return Err(ErrorKind::UnexpectedEndOfLineSeparator);
                }
                cursor.advance(byte);
            }
        }
    }
}

fn scan_block_comment(
    buffer: &[u8],
    cursor: &mut Cursor,
    is_final: bool,
    start: Cursor,
    comment_start: usize,
) -> Result<ScanOutcome<CommentScan>, ErrorKind> {
    loop {
        let Some(byte) = cursor.peek(buffer) else {
            if is_final {
                return Err(ErrorKind::EndOfCommentNotFound);
            }
            *cursor = start;
            return Ok(ScanOutcome::NeedMore);
        };
        if byte == b'*' {
            cursor.advance(byte);
            if cursor.peek(buffer) == Some(b'/') {
                cursor.advance(b'/');
                return Ok(ScanOutcome::Done(CommentScan {
                    start: comment_start,
                    end: cursor.consumed,
                }));
            }
            continue;
        }
        cursor.advance(byte);
    }
}

/// U+2028 (LINE SEPARATOR) and U+2029 (PARAGRAPH SEPARATOR) are each
/// encoded as the 3-byte UTF-8 sequences `E2 80 A8` / `E2 80 A9`. The
/// grammar disallows them unescaped inside a line comment.
fn is_line_separator(buffer: &[u8], index: usize) -> bool {
    match buffer.get(index..index + 3) {
        Some(bytes) => bytes == [0xE2, 0x80, 0xA8] || bytes == [0xE2, 0x80, 0xA9],
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str, is_final: bool) -> Result<(ScanOutcome<CommentScan>, usize), ErrorKind> {
        let buffer = input.as_bytes();
        let mut cursor = Cursor::new();
        let outcome = scan_comment(buffer, &mut cursor, is_final)?;
        Ok((outcome, cursor.consumed))
    }

    #[test]
    fn line_comment_terminated_by_lf() {
        let (outcome, consumed) = scan("// hi\nrest", true).unwrap();
        assert!(matches!(outcome, ScanOutcome::Done(_)));
        assert_eq!(consumed, 6);
    }

    #[test]
    fn line_comment_terminated_by_crlf() {
        let (outcome, consumed) = scan("// hi\r\nrest", true).unwrap();
        assert!(matches!(outcome, ScanOutcome::Done(_)));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn line_comment_terminated_by_cr() {
        let (outcome, consumed) = scan("// hi\rrest", true).unwrap();
        assert!(matches!(outcome, ScanOutcome::Done(_)));
        assert_eq!(consumed, 6);
    }

    #[test]
    fn line_separator_in_line_comment_is_an_error() {
        let err = scan("// hi \u{2028} there\n", true).unwrap_err();
        assert!(matches!(err, ErrorKind::UnexpectedEndOfLineSeparator));
    }

    #[test]
    fn block_comment_requires_terminator() {
        let (outcome, _) = scan("/* hi */rest", true).unwrap();
        assert!(matches!(outcome, ScanOutcome::Done(_)));
    }

    #[test]
    fn unterminated_block_comment_on_final_is_an_error() {
        let err = scan("/* hi", true).unwrap_err();
        assert!(matches!(err, ErrorKind::EndOfCommentNotFound));
    }

    #[test]
    fn unterminated_block_comment_on_non_final_needs_more() {
        let (outcome, consumed) = scan("/* hi", false).unwrap();
        assert!(matches!(outcome, ScanOutcome::NeedMore));
        assert_eq!(consumed, 0);
    }
}
