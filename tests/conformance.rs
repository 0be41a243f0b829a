//! End-to-end scenarios covering the grammar surface: plain documents,
//! resumable streaming, depth limits, comments, and trailing commas.

use pretty_assertions::assert_eq;
use pulljson::{CommentHandling, ErrorKind, ReadOutcome, TokenKind, Tokenizer, TokenizerOptions};

fn collect(buffer: &[u8], options: TokenizerOptions) -> Result<Vec<TokenKind>, pulljson::Error> {
    let mut tokenizer = Tokenizer::new(buffer, true, options);
    let mut kinds = Vec::new();
    loop {
        match tokenizer.read()? {
            ReadOutcome::Token => kinds.push(tokenizer.token_type()),
            ReadOutcome::End => return Ok(kinds),
            ReadOutcome::NeedMore => unreachable!("final block never needs more"),
        }
    }
}

#[test]
fn flat_object_of_scalars() {
    let kinds = collect(
        br#"{"a":1,"b":"two","c":true,"d":false,"e":null}"#,
        TokenizerOptions::new(),
    )
    .unwrap();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ObjectStart,
            TokenKind::Property,
            TokenKind::Number,
            TokenKind::Property,
            TokenKind::String,
            TokenKind::Property,
            TokenKind::Boolean,
            TokenKind::Property,
            TokenKind::Boolean,
            TokenKind::Property,
            TokenKind::Null,
            TokenKind::ObjectEnd,
        ]
    );
}

#[test]
fn nested_arrays_and_objects() {
    let kinds = collect(br#"[{"a":[1,2,{"b":3}]},[]]"#, TokenizerOptions::new()).unwrap();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ArrayStart,
            TokenKind::ObjectStart,
            TokenKind::Property,
            TokenKind::ArrayStart,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::ObjectStart,
            TokenKind::Property,
            TokenKind::Number,
            TokenKind::ObjectEnd,
            TokenKind::ArrayEnd,
            TokenKind::ObjectEnd,
            TokenKind::ArrayStart,
            TokenKind::ArrayEnd,
            TokenKind::ArrayEnd,
        ]
    );
}

#[test]
fn lone_top_level_number() {
    let kinds = collect(b"  42 ", TokenizerOptions::new()).unwrap();
    assert_eq!(kinds, vec![TokenKind::Number]);
}

#[test]
fn streaming_split_mid_number_resumes_cleanly() {
    let mut tokenizer = Tokenizer::new(b"[1", false, TokenizerOptions::new());
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::ArrayStart);
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::NeedMore);

    let consumed = tokenizer.bytes_consumed();
    let mut next = b"[1"[consumed..].to_vec();
    next.extend_from_slice(b",23]");
    let mut tokenizer = tokenizer.continue_with(&next, true);

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::Number);
    assert_eq!(tokenizer.token(), b"1");

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::Number);
    assert_eq!(tokenizer.token(), b"23");

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::ArrayEnd);
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::End);
}

#[test]
fn depth_limit_rejects_third_array() {
    let options = TokenizerOptions::new().with_max_depth(2);
    let err = collect(b"[[[1]]]", options).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ArrayDepthTooLarge { max_depth: 2 }
    ));
}

#[test]
fn comments_allowed_are_surfaced_as_tokens() {
    let options = TokenizerOptions::new().with_comment_handling(CommentHandling::Allow);
    let kinds = collect(b"[1, // trailing note\n2]", options).unwrap();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ArrayStart,
            TokenKind::Number,
            TokenKind::Comment,
            TokenKind::Number,
            TokenKind::ArrayEnd,
        ]
    );
}

#[test]
fn comments_skipped_produce_no_token() {
    let options = TokenizerOptions::new().with_comment_handling(CommentHandling::Skip);
    let kinds = collect(b"[1, /* note */ 2]", options).unwrap();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ArrayStart,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::ArrayEnd,
        ]
    );
}

#[test]
fn comments_disallowed_by_default_is_an_error() {
    let err = collect(b"[1 // oops\n]", TokenizerOptions::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::FoundInvalidCharacter { found: '/' }));
}

#[test]
fn escaped_string_decodes_on_demand() {
    let mut tokenizer = Tokenizer::new(br#""a\nb""#, true, TokenizerOptions::new());
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::String);
    assert!(tokenizer.value_is_escaped());
    assert_eq!(tokenizer.get_string().unwrap(), "a\nb");
    assert!(tokenizer.text_equals("a\nb").unwrap());
    assert!(!tokenizer.text_equals("a\\nb").unwrap());
}

#[test]
fn numeric_accessor_rejects_out_of_range() {
    let mut tokenizer = Tokenizer::new(b"99999999999999999999", true, TokenizerOptions::new());
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    let err = tokenizer.get_number::<u64>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NumberOutOfRange));
    assert_eq!(tokenizer.try_get_number::<u64>(), None);
}

#[test]
fn accessor_misuse_reports_invalid_operation() {
    let mut tokenizer = Tokenizer::new(b"42", true, TokenizerOptions::new());
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    let err = tokenizer.get_string().unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidOperationExpectedKind { .. }
    ));
}

#[test]
fn error_is_terminal_until_cleared() {
    let mut tokenizer = Tokenizer::new(b"]", true, TokenizerOptions::new());
    let first = tokenizer.read().unwrap_err();
    let second = tokenizer.read().unwrap_err();
    assert_eq!(first, second);
    tokenizer.clear_error();
    // Position is unchanged; the same byte re-raises the same error.
    let third = tokenizer.read().unwrap_err();
    assert_eq!(first, third);
}

#[test]
fn trailing_garbage_after_single_value_is_rejected_by_default() {
    let err = collect(b"1 2", TokenizerOptions::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ExpectedEndAfterSingleJson));
}

#[test]
fn comma_separated_garbage_after_single_value_is_rejected_by_default() {
    let err = collect(b"1,2", TokenizerOptions::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ExpectedEndAfterSingleJson));
}

#[test]
fn comment_immediately_after_comma_is_scanned() {
    let options = TokenizerOptions::new().with_comment_handling(CommentHandling::Allow);
    let kinds = collect(b"[1, /* c */ 2]", options).unwrap();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ArrayStart,
            TokenKind::Number,
            TokenKind::Comment,
            TokenKind::Number,
            TokenKind::ArrayEnd,
        ]
    );
}

#[test]
fn trailing_comma_through_a_comment_is_still_rejected_by_default() {
    let options = TokenizerOptions::new().with_comment_handling(CommentHandling::Allow);
    let err = collect(b"[1, /* c */ ]", options).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TrailingCommaNotAllowedBeforeArrayEnd
    ));
}

#[test]
fn trailing_comma_through_a_comment_is_accepted_when_configured() {
    let options = TokenizerOptions::new()
        .with_comment_handling(CommentHandling::Allow)
        .with_trailing_commas(true);
    let kinds = collect(b"[1, /* c */ ]", options).unwrap();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ArrayStart,
            TokenKind::Number,
            TokenKind::Comment,
            TokenKind::ArrayEnd,
        ]
    );
}

#[test]
fn trailing_comma_through_a_skipped_comment_is_still_rejected() {
    let options = TokenizerOptions::new().with_comment_handling(CommentHandling::Skip);
    let err = collect(b"[1, /* c */ ]", options).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TrailingCommaNotAllowedBeforeArrayEnd
    ));
}

#[test]
fn comment_disallowed_in_a_value_position_reports_missing_value() {
    let err = collect(b"[/]", TokenizerOptions::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ExpectedStartOfValueNotFound));
}

#[test]
fn comment_disallowed_in_a_property_position_reports_missing_property() {
    let err = collect(b"{/:1}", TokenizerOptions::new()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ExpectedStartOfPropertyNotFound
    ));
}

#[test]
fn read_x_family_advances_and_interprets_then_rolls_back_on_mismatch() {
    let mut tokenizer = Tokenizer::new(br#"{"a":1}"#, true, TokenizerOptions::new());
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token); // ObjectStart

    assert_eq!(tokenizer.try_read_bool().unwrap(), None);
    assert_eq!(
        tokenizer.read_property().unwrap().as_deref(),
        Some("a")
    );

    let err = tokenizer.read_bool().unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidOperationExpectedKind { .. }
    ));
    // The mismatched read rolled back; the same token is still there to
    // retry with the right interpretation.
    assert_eq!(tokenizer.read_number::<u64>().unwrap(), Some(1));

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token); // ObjectEnd
    assert_eq!(tokenizer.token_type(), TokenKind::ObjectEnd);
}

#[test]
fn multiple_top_level_values_allowed_when_configured() {
    let options = TokenizerOptions::new().with_multiple_values(true);
    let kinds = collect(b"1 2 3", options).unwrap();
    assert_eq!(
        kinds,
        vec![TokenKind::Number, TokenKind::Number, TokenKind::Number]
    );
}

#[test]
fn skip_advances_past_an_entire_object_value() {
    let mut tokenizer = Tokenizer::new(br#"{"a":{"b":[1,2,3]},"c":4}"#, true, TokenizerOptions::new());
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token); // ObjectStart
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token); // Property "a"
    assert_eq!(tokenizer.token_type(), TokenKind::Property);
    tokenizer.skip().unwrap();

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::Property);
    assert_eq!(tokenizer.token(), b"c");

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::Number);
    assert_eq!(tokenizer.token(), b"4");

    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::Token);
    assert_eq!(tokenizer.token_type(), TokenKind::ObjectEnd);
    assert_eq!(tokenizer.read().unwrap(), ReadOutcome::End);
}
