#![no_main]

use libfuzzer_sys::fuzz_target;
use yagraph::{Reader, Scanner, TokenKind, YamlDecoder};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens = Scanner::new(s).into_tokens();
        assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::StreamEnd));

        let str_result = Reader::new_from_str(s).load();
        let bytes_result = YamlDecoder::read(data).decode();

        match (str_result, bytes_result) {
            (Ok(str_docs), Ok(bytes_docs)) => assert_eq!(str_docs, bytes_docs),
            // Spans differ by one when the input starts with a BOM.
            (Err(str_error), Err(yagraph::LoadError::Parse(bytes_error))) => {
                assert_eq!(
                    std::mem::discriminant(&str_error),
                    std::mem::discriminant(&bytes_error)
                );
            }
            // Inputs starting with a null byte decode as UTF-16.
            _ => assert!(data.len() > 1 && (data[0] == 0 || data[1] == 0)),
        }
    }
});
