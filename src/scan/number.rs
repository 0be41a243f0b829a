//! Number scanning: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE][+-]?[0-9]+)?`.

use crate::cursor::{char_at, is_delimiter, Cursor};
use crate::error::ErrorKind;
use crate::scan::ScanOutcome;

/// Span of a scanned number, relative to the whole buffer.
pub(crate) struct NumberScan {
    pub start: usize,
    pub end: usize,
}

/// Scan a number, assuming `cursor` is positioned on the first byte of the
/// number (its leading `-` or first digit). `is_top_level_primitive`
/// controls whether end-of-buffer on a final block is an acceptable
/// delimiter (it is, only for a lone top-level number).
pub(crate) fn scan_number(
    buffer: &[u8],
    cursor: &mut Cursor,
    is_final: bool,
    is_top_level_primitive: bool,
) -> Result<ScanOutcome<NumberScan>, ErrorKind> {
    let start = *cursor;
    let number_start = cursor.consumed;

    macro_rules! need_more_or_eof_ok {
        ($err:expr) => {{
            if is_final {
                if is_top_level_primitive {
                    return Ok(ScanOutcome::Done(NumberScan {
                        start: number_start,
                        end: cursor.consumed,
                    }));
                }
                return Err($err);
            }
            *cursor = start;
            return Ok(ScanOutcome::NeedMore);
        }};
    }

    macro_rules! need_more {
        ($err:expr) => {{
            if is_final {
                return Err($err);
            }
            *cursor = start;
            return Ok(ScanOutcome::NeedMore);
        }};
    }

    if cursor.peek(buffer) == Some(b'-') {
        cursor.advance(b'-');
        match cursor.peek(buffer) {
            Some(b) if b.is_ascii_digit() => {}
            Some(_) => return Err(ErrorKind::ExpectedDigitAfterSign),
            None => need_more!(ErrorKind::RequiredDigitNotFoundEndOfData),
        }
    }

    match cursor.peek(buffer) {
        Some(b'0') => {
            cursor.advance(b'0');
            if let Some(b) = cursor.peek(buffer) {
                if b.is_ascii_digit() {
                    return Err(ErrorKind::ExpectedNoLeadingZero);
                }
            }
        }
        Some(b) if b.is_ascii_digit() => {
            while let Some(b) = cursor.peek(buffer) {
                if !b.is_ascii_digit() {
                    break;
                }
                cursor.advance(b);
            }
        }
        Some(_) => return Err(ErrorKind::ExpectedDigitAfterSign),
        None => need_more!(ErrorKind::RequiredDigitNotFoundEndOfData),
    }

    if cursor.peek(buffer) == Some(b'.') {
        cursor.advance(b'.');
        match cursor.peek(buffer) {
            Some(b) if b.is_ascii_digit() => {
                while let Some(b) = cursor.peek(buffer) {
                    if !b.is_ascii_digit() {
                        break;
                    }
                    cursor.advance(b);
                }
            }
            Some(_) => return Err(ErrorKind::ExpectedDigitAfterDecimalPoint),
            None => need_more!(ErrorKind::RequiredDigitNotFoundEndOfData),
        }
    }

    if matches!(cursor.peek(buffer), Some(b'e') | Some(b'E')) {
        cursor.advance(cursor.peek(buffer).unwrap());
        if matches!(cursor.peek(buffer), Some(b'+') | Some(b'-')) {
            cursor.advance(cursor.peek(buffer).unwrap());
        }
        match cursor.peek(buffer) {
            Some(b) if b.is_ascii_digit() => {
                while let Some(b) = cursor.peek(buffer) {
                    if !b.is_ascii_digit() {
                        break;
                    }
                    cursor.advance(b);
                }
            }
            Some(_) => return Err(ErrorKind::ExpectedDigitAfterExponent),
            None => need_more!(ErrorKind::RequiredDigitNotFoundEndOfData),
        }
    }

    match cursor.peek(buffer) {
        Some(b) if is_delimiter(b) => {}
        Some(_) => {
            return Err(ErrorKind::ExpectedEndOfDigitNotFound {
                found: char_at(buffer, cursor.consumed),
            })
        }
        None => need_more_or_eof_ok!(ErrorKind::ExpectedEndOfDigitNotFound { found: '\0' }),
    }

    Ok(ScanOutcome::Done(NumberScan {
        start: number_start,
        end: cursor.consumed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str, is_final: bool, top_level: bool) -> Result<ScanOutcome<NumberScan>, ErrorKind> {
        let buffer = input.as_bytes();
        let mut cursor = Cursor::new();
        scan_number(buffer, &mut cursor, is_final, top_level)
    }

    #[test]
    fn plain_integer() {
        let outcome = scan("42", true, true).unwrap();
        match outcome {
            ScanOutcome::Done(n) => assert_eq!((n.start, n.end), (0, 2)),
            ScanOutcome::NeedMore => panic!(),
        }
    }

    #[test]
    fn leading_zero_followed_by_digit_is_an_error() {
        let err = scan("01", true, true).unwrap_err();
        assert!(matches!(err, ErrorKind::ExpectedNoLeadingZero));
    }

    #[test]
    fn negative_with_fraction_and_exponent() {
        let outcome = scan("-1.5e+10", true, true).unwrap();
        match outcome {
            ScanOutcome::Done(n) => assert_eq!((n.start, n.end), (0, 8)),
            ScanOutcome::NeedMore => panic!(),
        }
    }

    #[test]
    fn delimiter_required_unless_top_level_primitive_at_eof() {
        let outcome = scan("1]", true, false).unwrap();
        match outcome {
            ScanOutcome::Done(n) => assert_eq!((n.start, n.end), (0, 1)),
            ScanOutcome::NeedMore => panic!(),
        }
    }

    #[test]
    fn needs_more_when_digits_might_continue() {
        let outcome = scan("1", false, false).unwrap();
        assert!(matches!(outcome, ScanOutcome::NeedMore));
    }

    #[test]
    fn bare_top_level_number_at_eof_succeeds() {
        let outcome = scan("42", true, true).unwrap();
        assert!(matches!(outcome, ScanOutcome::Done(_)));
    }
}
