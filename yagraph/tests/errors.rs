use yagraph::{load, Construct, ParseError, Reader, TokenKind, DEFAULT_MAX_DEPTH};

fn unterminated(s: &str) -> Construct {
    match load(s).unwrap_err() {
        ParseError::UnterminatedConstruct { construct, .. } => construct,
        err => panic!("expected an unterminated construct, got: {err}"),
    }
}

#[test]
fn test_unterminated() {
    assert_eq!(unterminated("[a, b"), Construct::FlowSequence);
    assert_eq!(unterminated("[a, [b, c]"), Construct::FlowSequence);
    assert_eq!(unterminated("{a: 1"), Construct::FlowMapping);
    assert_eq!(unterminated("key: {a: [1, 2]"), Construct::FlowMapping);
    assert_eq!(unterminated("'abc"), Construct::FlowScalar);
    assert_eq!(unterminated("- \"abc\n  def"), Construct::FlowScalar);
}

#[test]
fn test_unterminated_span() {
    let err = load("a: 1\nb: [x,\n  y\n").unwrap_err();
    let span = err.span();
    assert_eq!(span.start.line(), 2);
    assert_eq!(span.start.col(), 3);
    assert_eq!(
        err.to_string(),
        "unterminated flow sequence starting at line 2 column 4"
    );
}

#[test]
fn test_unexpected_token() {
    for s in ["a: b: c", "@foo", "]", "key: value\n- item", "[a}"] {
        let err = load(s).unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedToken { .. }),
            "{s:?} gave {err}"
        );
    }

    match load("[a}").unwrap_err() {
        ParseError::UnexpectedToken {
            found, expected, ..
        } => {
            assert_eq!(found, TokenKind::CloseBrace);
            assert_eq!(expected, Some(TokenKind::CloseBracket));
        }
        err => panic!("unexpected error: {err}"),
    }
}

#[test]
fn test_block_scalar_dedent() {
    match load(">\n    a\n  b\n  c\n").unwrap_err() {
        ParseError::UnexpectedToken { found, span, .. } => {
            assert_eq!(found, TokenKind::Unexpected);
            assert_eq!(span.start.line(), 3);
            assert_eq!(span.start.col(), 2);
        }
        err => panic!("unexpected error: {err}"),
    }
    assert!(load("key:\n  - |\n      a\n    b\n").is_err());
    // Returning to the parent's column ends the scalar.
    let docs = load("- |\n    a\n- b\n").unwrap();
    assert_eq!(docs[0].root().to_string(), "[a,b]");
}

#[test]
fn test_no_partial_result() {
    // The first document is fine, but the error discards everything.
    assert!(load("- a\n---\n- *nope\n").is_err());
}

#[test]
fn test_depth_limit() {
    let deep = format!("{}{}", "[".repeat(300), "]".repeat(300));
    match load(&deep).unwrap_err() {
        ParseError::DepthLimitExceeded { limit, .. } => assert_eq!(limit, DEFAULT_MAX_DEPTH),
        err => panic!("unexpected error: {err}"),
    }

    let mut reader = Reader::new_from_str(&deep);
    reader.max_depth(400);
    let docs = reader.load().unwrap();
    assert_eq!(docs.len(), 1);

    let mut reader = Reader::new_from_str("- - - a\n");
    reader.max_depth(3);
    assert!(reader.load().is_err());
}
