//! A pull-based, resumable JSON tokenizer.
//!
//! [`Tokenizer`] reads a borrowed byte window one token at a time,
//! validating RFC 8259 grammar (plus optionally comments and trailing
//! commas) as it goes. It never performs I/O itself: when a window ends
//! mid-token, [`Tokenizer::read`] reports [`ReadOutcome::NeedMore`] and
//! leaves every observable field exactly as it was before the call, so the
//! caller can fetch more bytes and resume with
//! [`Tokenizer::continue_with`].
//!
//! ```
//! use pulljson::{ReadOutcome, TokenKind, Tokenizer, TokenizerOptions};
//!
//! let mut tokenizer = Tokenizer::new(br#"{"hello":"world"}"#, true, TokenizerOptions::new());
//! assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
//! assert_eq!(tokenizer.token_type(), TokenKind::ObjectStart);
//! assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
//! assert_eq!(tokenizer.token_type(), TokenKind::Property);
//! assert_eq!(tokenizer.token(), b"hello");
//! ```

mod bitstack;
mod config;
mod cursor;
mod decode;
mod error;
mod scan;
mod token;
mod tokenizer;

pub use bitstack::{BitStack, BitStackOom};
pub use config::{CommentHandling, TokenizerOptions};
pub use error::{Error, ErrorKind};
pub use token::TokenKind;
pub use tokenizer::{ReadOutcome, Tokenizer};

/// A convenience wrapper over whole-buffer (non-streaming) use: an
/// iterator over token kinds for callers that already hold the entire
/// document in memory.
///
/// This is not available for genuinely streaming use, since
/// [`Iterator::next`] has no way to signal "pause, fetch more bytes" other
/// than ending iteration — which would be indistinguishable from a real
/// end of document. Streaming callers should drive
/// [`Tokenizer::read`]/[`Tokenizer::continue_with`] directly.
pub fn tokens(buffer: &[u8], options: TokenizerOptions) -> impl Iterator<Item = Result<TokenKind, Error>> + '_ {
    let mut tokenizer = Tokenizer::new(buffer, true, options);
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match tokenizer.read() {
            Ok(ReadOutcome::Token) => Some(Ok(tokenizer.token_type())),
            Ok(ReadOutcome::End) => {
                done = true;
                None
            }
            Ok(ReadOutcome::NeedMore) => {
                done = true;
                None
            }
            Err(error) => {
                done = true;
                Some(Err(error))
            }
        }
    })
}
