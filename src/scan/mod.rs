//! Pure, allocation-free scanners: given a cursor positioned just past the
//! byte that identified the construct, each scanner advances the cursor to
//! just past the construct's end, or reports that more bytes are needed, or
//! reports a specific grammar error.
//!
//! None of these functions perform I/O or touch anything but the cursor and
//! the borrowed buffer; the tokenizer decides what to do with the result,
//! including all rollback.

pub(crate) mod comment;
pub(crate) mod literal;
pub(crate) mod number;
pub(crate) mod string;

/// The result of a single scan attempt.
///
/// `NeedMore` is only ever returned when the window is not the final one;
/// callers on a final window get a terminal `Error` instead wherever this
/// module's functions would otherwise have returned `NeedMore`.
pub(crate) enum ScanOutcome<T> {
    Done(T),
    NeedMore,
}
