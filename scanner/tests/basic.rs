use quickcheck::quickcheck;
use yagraph_scanner::{Scanner, TokenKind, TokenSource};

fn kinds(input: &str) -> Vec<TokenKind> {
    Scanner::new(input)
        .into_tokens()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_stream_end_is_sticky() {
    let mut scanner = Scanner::new("a");
    for _ in 0..10 {
        scanner.advance();
    }
    assert_eq!(scanner.token(), TokenKind::StreamEnd);
    assert_eq!(scanner.text(), "");
}

#[test]
fn test_set_source() {
    let mut scanner = Scanner::default();
    assert!(scanner.is(TokenKind::StreamEnd));
    scanner.set_source("[]");
    assert!(scanner.is(TokenKind::OpenBracket));
    scanner.advance();
    assert!(scanner.is(TokenKind::CloseBracket));
}

#[test]
fn test_bom() {
    assert_eq!(kinds("\u{feff}a"), kinds("a"));
}

#[test]
fn test_nested_blocks_close() {
    let kinds = kinds("a:\n  b:\n    - c\nd: e");
    let opened = kinds
        .iter()
        .filter(|kind| matches!(kind, TokenKind::BlockMappingBegin | TokenKind::BlockSeqBegin))
        .count();
    let closed = kinds.iter().filter(|kind| **kind == TokenKind::Outdent).count();
    assert_eq!(opened, 3);
    assert_eq!(closed, 3);
}

#[test]
fn test_folded_header() {
    let tokens = Scanner::new("key: >- # comment\n  text\n").into_tokens();
    assert!(tokens
        .iter()
        .any(|token| token.kind == TokenKind::Folded && token.text == ">-"));
    assert!(tokens
        .iter()
        .any(|token| token.kind == TokenKind::Comment && token.text == "# comment"));
}

#[test]
fn test_reserved_indicators() {
    assert!(kinds("@foo").contains(&TokenKind::Unexpected));
    assert!(kinds("`foo").contains(&TokenKind::Unexpected));
}

#[test]
fn test_escaped_line_break() {
    assert!(kinds("\"a\\\n  b\"").contains(&TokenKind::EscapedLineBreak));
}

quickcheck! {
    fn scanning_ends_with_stream_end(input: String) -> bool {
        let tokens = Scanner::new(&input).into_tokens();
        tokens.last().map(|token| token.kind) == Some(TokenKind::StreamEnd)
            && tokens.iter().filter(|token| token.kind == TokenKind::StreamEnd).count() == 1
    }

    fn blocks_are_balanced(input: String) -> bool {
        let kinds = kinds(&input);
        let opened = kinds
            .iter()
            .filter(|kind| matches!(kind, TokenKind::BlockMappingBegin | TokenKind::BlockSeqBegin | TokenKind::Literal | TokenKind::Folded))
            .count();
        let closed = kinds.iter().filter(|kind| **kind == TokenKind::Outdent).count();
        opened == closed
    }
}
