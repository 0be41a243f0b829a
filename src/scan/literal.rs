//! `true` / `false` / `null` literal scanning.

use crate::cursor::Cursor;
use crate::error::ErrorKind;
use crate::scan::ScanOutcome;

/// Scan one of the three fixed literals, assuming `cursor` is positioned
/// on the literal's first byte. `expected` is the exact byte sequence to
/// match (`b"true"`, `b"false"`, or `b"null"`); `on_mismatch` is the error
/// kind to report if the bytes don't match exactly.
pub(crate) fn scan_literal(
    buffer: &[u8],
    cursor: &mut Cursor,
    is_final: bool,
    expected: &'static [u8],
    on_mismatch: ErrorKind,
) -> Result<ScanOutcome<()>, ErrorKind> {
    let start = *cursor;

    for &want in expected {
        match cursor.peek(buffer) {
            Some(got) if got == want => cursor.advance(got),
            Some(_) => return Err(on_mismatch),
            None => {
                if is_final {
                    return Err(on_mismatch);
                }
                *cursor = start;
                return Ok(ScanOutcome::NeedMore);
            }
        }
    }

    Ok(ScanOutcome::Done(()))
}
