//! String scanning: fast path for a clean string, slow path when an escape
//! or control byte forces character-by-character validation.

use crate::cursor::{char_at, Cursor};
use crate::error::ErrorKind;
use crate::scan::ScanOutcome;

/// Where a scanned string's content lives, relative to the whole buffer,
/// and whether it needed the validating slow path.
pub(crate) struct StringScan {
    pub content_start: usize,
    pub content_end: usize,
    pub escaped: bool,
}

/// Scan a string's content, assuming `cursor` is positioned just past the
/// opening `"`. On success, `cursor` is left just past the closing `"`.
pub(crate) fn scan_string(
    buffer: &[u8],
    cursor: &mut Cursor,
    is_final: bool,
) -> Result<ScanOutcome<StringScan>, ErrorKind> {
    let start = *cursor;
    let content_start = cursor.consumed;

    // Fast path: look for the first byte that forces the slow path.
    loop {
        let Some(byte) = cursor.peek(buffer) else {
            if is_final {
                return Err(ErrorKind::EndOfStringNotFound);
            }
            *cursor = start;
            return Ok(ScanOutcome::NeedMore);
        };
        if byte == b'"' {
            let content_end = cursor.consumed;
            cursor.advance(byte);
            return Ok(ScanOutcome::Done(StringScan {
                content_start,
                content_end,
                escaped: false,
            }));
        }
        if byte == b'\\' || byte < 0x20 {
            break;
        }
        cursor.advance(byte);
    }

    // Slow path: re-scan from content_start, validating escapes and
    // control bytes, until the closing unescaped quote. `start` is still
    // the cursor as it was at content_start, since nothing has committed
    // past that point yet.
    *cursor = start;

    loop {
        let Some(byte) = cursor.peek(buffer) else {
            if is_final {
                return Err(ErrorKind::EndOfStringNotFound);
            }
            *cursor = start;
            return Ok(ScanOutcome::NeedMore);
        };
        if byte == b'"' {
            let content_end = cursor.consumed;
            cursor.advance(byte);
            return Ok(ScanOutcome::Done(StringScan {
                content_start,
                content_end,
                escaped: true,
            }));
        }
        if byte == b'\\' {
            cursor.advance(byte);
            let Some(escape) = cursor.peek(buffer) else {
                if is_final {
                    return Err(ErrorKind::EndOfStringNotFound);
                }
                *cursor = start;
                return Ok(ScanOutcome::NeedMore);
            };
            match escape {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                    cursor.advance(escape);
                }
                b'u' => {
                    cursor.advance(escape);
                    for _ in 0..4 {
                        let Some(hex) = cursor.peek(buffer) else {
                            if is_final {
                                return Err(ErrorKind::EndOfStringNotFound);
                            }
                            *cursor = start;
                            return Ok(ScanOutcome::NeedMore);
                        };
                        if !hex.is_ascii_hexdigit() {
                            return Err(ErrorKind::InvalidHexCharacterWithinString {
                                found: char_at(buffer, cursor.consumed),
                            });
                        }
                        cursor.advance(hex);
                    }
                }
                _other => {
                    return Err(ErrorKind::InvalidEscapeCharacterWithinString {
                        found: char_at(buffer, cursor.consumed),
                    });
                }
            }
            continue;
        }
        if byte < 0x20 {
            return Err(ErrorKind::ControlCharacterWithinString { byte });
        }
        cursor.advance(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str, is_final: bool) -> Result<(ScanOutcome<StringScan>, Cursor), ErrorKind> {
        let buffer = input.as_bytes();
        let mut cursor = Cursor::new();
        let outcome = scan_string(buffer, &mut cursor, is_final)?;
        Ok((outcome, cursor))
    }

    #[test]
    fn clean_string_fast_path() {
        let (outcome, cursor) = scan(r#"hello""#, true).unwrap();
        match outcome {
            ScanOutcome::Done(s) => {
                assert!(!s.escaped);
                assert_eq!(s.content_start, 0);
                assert_eq!(s.content_end, 5);
            }
            ScanOutcome::NeedMore => panic!("expected Done"),
        }
        assert_eq!(cursor.consumed, 6);
    }

    #[test]
    fn escaped_string_slow_path() {
        let (outcome, _) = scan(r#"a\nb""#, true).unwrap();
        match outcome {
            ScanOutcome::Done(s) => assert!(s.escaped),
            ScanOutcome::NeedMore => panic!("expected Done"),
        }
    }

    #[test]
    fn unicode_escape_requires_four_hex_digits() {
        let err = scan(r#"\u12"#, true).unwrap_err();
        assert!(matches!(err, ErrorKind::EndOfStringNotFound));
    }

    #[test]
    fn invalid_hex_digit_is_an_error() {
        let err = scan(r#"\u12zz""#, true).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidHexCharacterWithinString { .. }));
    }

    #[test]
    fn control_byte_is_an_error() {
        let err = scan("a\u{0}b\"", true).unwrap_err();
        assert!(matches!(err, ErrorKind::ControlCharacterWithinString { byte: 0 }));
    }

    #[test]
    fn needs_more_on_non_final_truncated_input() {
        let (outcome, _) = scan("hello", false).unwrap();
        assert!(matches!(outcome, ScanOutcome::NeedMore));
    }
}
