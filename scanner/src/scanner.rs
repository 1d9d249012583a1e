//! Home to the YAML scanner.
//!
//! The scanner turns characters into raw tokens. It keeps track of indentation and emits the
//! structural tokens ([`TokenKind::BlockSeqBegin`], [`TokenKind::BlockMappingBegin`],
//! [`TokenKind::Outdent`], [`TokenKind::SimpleKey`]) the reader needs to tell block collections
//! apart. Scalars are left in pieces: it is up to the reader to put their text back together.

use crate::char_traits::{
    as_hex, is_anchor_char, is_blank, is_blank_or_breakz, is_bom, is_break, is_breakz, is_flow,
    is_hex, is_reserved,
};
use crate::source::TokenSource;
use crate::token::{Marker, Span, Token, TokenKind};

/// The kind of an open block collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockKind {
    Sequence,
    Mapping,
}

/// An open block collection and the column its entries start at.
#[derive(Clone, Copy, Debug)]
struct Indent {
    col: usize,
    kind: BlockKind,
}

/// A materialized stream of raw tokens over a YAML input.
///
/// The whole input is scanned upon creation. Scanning never fails: characters that cannot start
/// any token are reported as [`TokenKind::Unexpected`] and left for the reader to reject.
///
/// ```
/// use yagraph_scanner::{Scanner, TokenKind, TokenSource};
///
/// let mut scanner = Scanner::new("[a]");
/// assert_eq!(scanner.token(), TokenKind::OpenBracket);
/// scanner.advance();
/// assert_eq!(scanner.token(), TokenKind::PlainScalar);
/// ```
#[derive(Clone, Debug)]
pub struct Scanner {
    /// The tokens. The last one is always [`TokenKind::StreamEnd`].
    tokens: Vec<Token>,
    /// Index of the current token.
    cursor: usize,
}

impl Scanner {
    /// Scan the given input.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            tokens: Lexer::new(text).run(),
            cursor: 0,
        }
    }

    /// Return all the tokens of the input, including the already consumed ones.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Return the tokens, consuming `self` in the process.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Return the current token.
    #[must_use]
    pub fn current(&self) -> &Token {
        // `cursor` never goes past the trailing `StreamEnd`.
        &self.tokens[self.cursor]
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new("")
    }
}

impl TokenSource for Scanner {
    fn set_source(&mut self, text: &str) {
        *self = Self::new(text);
    }

    fn token(&self) -> TokenKind {
        self.current().kind
    }

    fn text(&self) -> &str {
        &self.current().text
    }

    fn advance(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    fn depth(&self) -> usize {
        self.current().depth
    }

    fn span(&self) -> Span {
        self.current().span
    }
}

/// The character-level state machine behind [`Scanner`].
struct Lexer {
    chars: Vec<char>,
    mark: Marker,
    tokens: Vec<Token>,
    /// Open block collections, innermost last.
    indents: Vec<Indent>,
    /// Open flow collections (`[` or `{`), innermost last.
    flows: Vec<char>,
    /// Whether we stand at the beginning of a line that has not been processed yet.
    at_line_start: bool,
    /// Whether a simple key may start at the current position.
    allow_simple_key: bool,
    /// The flow level of the simple key whose `:` has not been scanned yet, if any.
    key_pending: Option<usize>,
    /// Whether the last token was a quoted scalar or a closed flow collection, after which a `:`
    /// needs no whitespace in flow context.
    adjacent_value: bool,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            mark: Marker::default(),
            tokens: Vec::new(),
            indents: Vec::new(),
            flows: Vec::new(),
            at_line_start: true,
            allow_simple_key: true,
            key_pending: None,
            adjacent_value: false,
        }
    }

    fn run(mut self) -> Vec<Token> {
        if is_bom(self.peek()) {
            // The BOM does not count as a column.
            self.mark.index += 1;
        }
        while !self.is_end() {
            if self.at_line_start {
                self.at_line_start = false;
                if self.flows.is_empty() {
                    self.scan_line_start();
                } else {
                    self.skip_indentation();
                }
            } else {
                self.scan_next_token();
            }
        }
        self.close_blocks();
        self.push(TokenKind::StreamEnd, "", self.mark);
        self.tokens
    }

    // ===================================== CHARACTER LEVEL =====================================

    fn is_end(&self) -> bool {
        self.mark.index >= self.chars.len()
    }

    fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or('\0')
    }

    fn peek(&self) -> char {
        self.char_at(self.mark.index)
    }

    fn peek_nth(&self, n: usize) -> char {
        self.char_at(self.mark.index + n)
    }

    /// Consume the next character, which must not be a line break.
    fn skip(&mut self) {
        self.mark.index += 1;
        self.mark.col += 1;
    }

    fn skip_n(&mut self, count: usize) {
        self.mark.index += count;
        self.mark.col += count;
    }

    fn skip_blanks(&mut self) {
        while is_blank(self.peek()) {
            self.skip();
        }
    }

    /// Consume a line break (`\n`, `\r` or `\r\n`).
    fn consume_break(&mut self) {
        self.mark.index = self.index_after_break(self.mark.index);
        self.mark.line += 1;
        self.mark.col = 0;
    }

    fn index_after_break(&self, index: usize) -> usize {
        if self.char_at(index) == '\r' && self.char_at(index + 1) == '\n' {
            index + 2
        } else {
            index + 1
        }
    }

    fn text_since(&self, start: Marker) -> String {
        self.chars[start.index..self.mark.index].iter().collect()
    }

    fn is_document_indicator_at(&self, index: usize) -> bool {
        let c = self.char_at(index);
        (c == '-' || c == '.')
            && self.char_at(index + 1) == c
            && self.char_at(index + 2) == c
            && is_blank_or_breakz(self.char_at(index + 3))
    }

    // ====================================== TOKEN LEVEL ======================================

    fn depth(&self) -> usize {
        self.indents.len() + self.flows.len()
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, start: Marker) {
        let span = Span::new(start, self.mark);
        self.push_span(kind, text.into(), span);
    }

    fn push_span(&mut self, kind: TokenKind, text: String, span: Span) {
        let token = Token {
            kind,
            text,
            span,
            depth: self.depth(),
        };
        debug_print!(
            "{:indent$}{:?} {:?}",
            "",
            token.kind,
            token.text,
            indent = token.depth
        );
        self.tokens.push(token);
    }

    /// Whether a block entry at `col` would be nested in the innermost open block.
    fn is_deeper(&self, col: usize) -> bool {
        self.indents.last().map_or(true, |indent| col > indent.col)
    }

    fn open_block(&mut self, kind: BlockKind) {
        let col = self.mark.col;
        self.indents.push(Indent { col, kind });
        let token = match kind {
            BlockKind::Sequence => TokenKind::BlockSeqBegin,
            BlockKind::Mapping => TokenKind::BlockMappingBegin,
        };
        self.push(token, "", self.mark);
    }

    fn close_blocks(&mut self) {
        while self.indents.pop().is_some() {
            self.push(TokenKind::Outdent, "", self.mark);
        }
    }

    /// Close the blocks a line indented by `col` columns ends.
    fn unroll_indent(&mut self, col: usize) {
        let entry = self.peek() == '-' && is_blank_or_breakz(self.peek_nth(1));
        while let Some(top) = self.indents.last().copied() {
            let ends = top.col > col
                || (top.col == col && top.kind == BlockKind::Sequence && !entry);
            if !ends {
                break;
            }
            self.indents.pop();
            self.push(TokenKind::Outdent, "", self.mark);
        }
    }

    // ====================================== LINE LEVEL ======================================

    fn scan_line_start(&mut self) {
        if self.is_document_indicator_at(self.mark.index) {
            self.close_blocks();
            let start = self.mark;
            let (kind, text) = if self.peek() == '-' {
                (TokenKind::DocumentSeparator, "---")
            } else {
                (TokenKind::PauseStream, "...")
            };
            self.skip_n(3);
            self.push(kind, text, start);
            self.allow_simple_key = false;
            self.key_pending = None;
            return;
        }
        if self.peek() == '%' {
            self.close_blocks();
            let start = self.mark;
            while !is_breakz(self.peek()) {
                self.skip();
            }
            let text = self.text_since(start);
            self.push(TokenKind::Directive, text, start);
            return;
        }

        let start = self.mark;
        while self.peek() == ' ' {
            self.skip();
        }
        if self.mark.col > start.col {
            let text = self.text_since(start);
            self.push(TokenKind::IndentSpaces, text, start);
        }
        self.allow_simple_key = true;
        self.key_pending = None;

        let mut ahead = 0;
        while is_blank(self.peek_nth(ahead)) {
            ahead += 1;
        }
        let first = self.peek_nth(ahead);
        // Blank and comment-only lines do not affect indentation.
        if is_breakz(first) || first == '#' {
            return;
        }
        self.unroll_indent(self.mark.col);
    }

    /// Skip the leading whitespace of a line inside a flow collection.
    fn skip_indentation(&mut self) {
        let start = self.mark;
        self.skip_blanks();
        if self.mark.index > start.index {
            let text = self.text_since(start);
            self.push(TokenKind::IndentSpaces, text, start);
        }
    }

    fn scan_next_token(&mut self) {
        let c = self.peek();
        let next = self.peek_nth(1);
        let in_flow = !self.flows.is_empty();
        match c {
            '\n' | '\r' => self.scan_line_break(),
            ' ' | '\t' => self.skip_blanks(),
            '#' => self.scan_comment(),
            '-' if !in_flow && is_blank_or_breakz(next) => self.scan_block_entry(),
            '?' if is_blank_or_breakz(next) || (in_flow && is_flow(next)) => {
                self.scan_key_indicator();
            }
            ':' if is_blank_or_breakz(next)
                || (in_flow && (is_flow(next) || self.adjacent_value)) =>
            {
                self.scan_value_indicator();
            }
            ',' if in_flow => self.scan_flow_entry(),
            '[' | '{' => {
                self.maybe_simple_key();
                self.scan_flow_open(c);
            }
            ']' | '}' => self.scan_flow_close(c),
            '|' | '>' if !in_flow => self.scan_block_scalar(c == '|'),
            '\'' | '"' => {
                self.maybe_simple_key();
                self.scan_quoted(c == '"');
            }
            '&' | '!' => {
                self.maybe_simple_key();
                self.scan_property(c);
            }
            '*' => {
                self.maybe_simple_key();
                self.scan_alias();
            }
            '|' | '>' | '%' | '\0' => self.scan_unexpected(),
            c if is_reserved(c) || is_bom(c) => self.scan_unexpected(),
            _ => {
                self.maybe_simple_key();
                self.scan_plain();
            }
        }
    }

    fn scan_line_break(&mut self) {
        let start = self.mark;
        self.consume_break();
        self.push(TokenKind::Newline, "", start);
        self.at_line_start = true;
        self.adjacent_value = false;
        if self.flows.is_empty() {
            self.allow_simple_key = true;
            self.key_pending = None;
        }
    }

    fn scan_comment(&mut self) {
        let start = self.mark;
        while !is_breakz(self.peek()) {
            self.skip();
        }
        let text = self.text_since(start);
        self.push(TokenKind::Comment, text, start);
    }

    fn scan_unexpected(&mut self) {
        let start = self.mark;
        self.skip();
        let text = self.text_since(start);
        self.push(TokenKind::Unexpected, text, start);
        self.adjacent_value = false;
    }

    // ================================== INDICATORS AND FLOWS ==================================

    fn scan_block_entry(&mut self) {
        let col = self.mark.col;
        let compact = matches!(
            self.indents.last(),
            Some(top) if top.col == col && top.kind == BlockKind::Mapping
        );
        if self.is_deeper(col) || compact {
            self.open_block(BlockKind::Sequence);
        }
        let start = self.mark;
        self.skip();
        self.push(TokenKind::BlockSeqIndicator, "-", start);
        self.allow_simple_key = true;
        self.key_pending = None;
    }

    fn scan_key_indicator(&mut self) {
        if self.flows.is_empty() && self.is_deeper(self.mark.col) {
            self.open_block(BlockKind::Mapping);
        }
        let start = self.mark;
        self.skip();
        self.push(TokenKind::KeyIndicator, "?", start);
        // A block `? a: b` is a compact mapping as the key. In flow, the `:` is the entry's own.
        self.allow_simple_key = self.flows.is_empty();
        self.adjacent_value = false;
    }

    fn scan_value_indicator(&mut self) {
        let start = self.mark;
        self.skip();
        self.push(TokenKind::ValueIndicator, ":", start);
        if self.key_pending == Some(self.flows.len()) {
            self.key_pending = None;
        }
        self.allow_simple_key = false;
        self.adjacent_value = false;
    }

    fn scan_flow_entry(&mut self) {
        let start = self.mark;
        self.skip();
        self.push(TokenKind::Comma, ",", start);
        if self.key_pending == Some(self.flows.len()) {
            self.key_pending = None;
        }
        self.allow_simple_key = true;
        self.adjacent_value = false;
    }

    fn scan_flow_open(&mut self, c: char) {
        let start = self.mark;
        self.skip();
        self.flows.push(c);
        let kind = if c == '[' {
            TokenKind::OpenBracket
        } else {
            TokenKind::OpenBrace
        };
        self.push(kind, c.to_string(), start);
        self.allow_simple_key = true;
        self.adjacent_value = false;
    }

    fn scan_flow_close(&mut self, c: char) {
        let opener = if c == ']' { '[' } else { '{' };
        if self.flows.last() == Some(&opener) {
            self.flows.pop();
        }
        let start = self.mark;
        self.skip();
        let kind = if c == ']' {
            TokenKind::CloseBracket
        } else {
            TokenKind::CloseBrace
        };
        self.push(kind, c.to_string(), start);
        self.allow_simple_key = false;
        self.adjacent_value = true;
    }

    /// Scan an anchor (`&`) or a tag (`!`).
    fn scan_property(&mut self, sigil: char) {
        let start = self.mark;
        self.skip();
        if sigil == '!' && self.peek() == '<' {
            // Verbatim tag.
            while !is_breakz(self.peek()) && self.peek() != '>' {
                self.skip();
            }
            if self.peek() == '>' {
                self.skip();
            }
        } else {
            while is_anchor_char(self.peek()) {
                self.skip();
            }
        }
        let text = self.text_since(start);
        let kind = if sigil == '&' {
            TokenKind::Anchor
        } else {
            TokenKind::Tag
        };
        self.push(kind, text, start);
        self.adjacent_value = false;
    }

    fn scan_alias(&mut self) {
        let start = self.mark;
        self.skip();
        while is_anchor_char(self.peek()) {
            self.skip();
        }
        let text = self.text_since(start);
        self.push(TokenKind::Alias, text, start);
        self.allow_simple_key = false;
        self.adjacent_value = false;
    }

    // ====================================== SIMPLE KEYS ======================================

    /// Emit a [`TokenKind::SimpleKey`] if the node starting here is an implicit key.
    ///
    /// In block context, this also opens a mapping if the key is more indented than the
    /// innermost block.
    fn maybe_simple_key(&mut self) {
        let allowed = self.allow_simple_key && self.key_pending != Some(self.flows.len());
        self.allow_simple_key = false;
        if !allowed || !self.simple_key_at(self.mark.index) {
            return;
        }
        if self.flows.is_empty() && self.is_deeper(self.mark.col) {
            self.open_block(BlockKind::Mapping);
        }
        self.push(TokenKind::SimpleKey, "", self.mark);
        self.key_pending = Some(self.flows.len());
    }

    /// Return whether a single-line node starting at `index` is followed by a `:` on the same
    /// line.
    fn simple_key_at(&self, mut index: usize) -> bool {
        let in_flow = !self.flows.is_empty();
        while matches!(self.char_at(index), '&' | '!') {
            index += 1;
            while is_anchor_char(self.char_at(index)) {
                index += 1;
            }
            while is_blank(self.char_at(index)) {
                index += 1;
            }
        }
        let json_like = match self.char_at(index) {
            '"' | '\'' => match self.quoted_end(index) {
                Some(end) => {
                    index = end;
                    true
                }
                None => return false,
            },
            '[' | '{' => match self.flow_end(index) {
                Some(end) => {
                    index = end;
                    true
                }
                None => return false,
            },
            '*' => {
                index += 1;
                while is_anchor_char(self.char_at(index)) {
                    index += 1;
                }
                false
            }
            c if is_breakz(c) || c == '#' => return false,
            _ => return self.plain_key_at(index),
        };
        while is_blank(self.char_at(index)) {
            index += 1;
        }
        let next = self.char_at(index + 1);
        self.char_at(index) == ':'
            && (is_blank_or_breakz(next) || (in_flow && (json_like || is_flow(next))))
    }

    /// Return the index right after the closing quote of the quoted scalar at `index`, if it
    /// closes on the same line.
    fn quoted_end(&self, index: usize) -> Option<usize> {
        let quote = self.char_at(index);
        let mut i = index + 1;
        loop {
            let c = self.char_at(i);
            if is_breakz(c) {
                return None;
            }
            if quote == '\'' && c == '\'' {
                if self.char_at(i + 1) == '\'' {
                    i += 2;
                    continue;
                }
                return Some(i + 1);
            }
            if quote == '"' && c == '\\' {
                if is_breakz(self.char_at(i + 1)) {
                    return None;
                }
                i += 2;
                continue;
            }
            if quote == '"' && c == '"' {
                return Some(i + 1);
            }
            i += 1;
        }
    }

    /// Return the index right after the flow collection at `index`, if it closes on the same
    /// line.
    fn flow_end(&self, index: usize) -> Option<usize> {
        let mut level = 0usize;
        let mut i = index;
        loop {
            match self.char_at(i) {
                '[' | '{' => level += 1,
                ']' | '}' => {
                    level = level.saturating_sub(1);
                    if level == 0 {
                        return Some(i + 1);
                    }
                }
                '"' | '\'' => {
                    i = self.quoted_end(i)?;
                    continue;
                }
                c if is_breakz(c) => return None,
                _ => {}
            }
            i += 1;
        }
    }

    fn plain_key_at(&self, index: usize) -> bool {
        let in_flow = !self.flows.is_empty();
        let mut i = index;
        loop {
            let c = self.char_at(i);
            let next = self.char_at(i + 1);
            if is_breakz(c) {
                return false;
            }
            if c == ':' && (is_blank_or_breakz(next) || (in_flow && is_flow(next))) {
                return true;
            }
            if in_flow && is_flow(c) {
                return false;
            }
            if c == '#' && i > index && is_blank(self.char_at(i - 1)) {
                return false;
            }
            i += 1;
        }
    }

    // ======================================== SCALARS ========================================

    fn scan_plain(&mut self) {
        let in_flow = !self.flows.is_empty();
        // Keys never span lines.
        let single_line = self.key_pending == Some(self.flows.len());
        self.push(TokenKind::PlainScalar, "", self.mark);
        loop {
            self.scan_plain_line(in_flow);
            if single_line || !is_break(self.peek()) || !self.plain_continues(in_flow) {
                break;
            }
        }
        self.push(TokenKind::PlainEnd, "", self.mark);
        self.allow_simple_key = false;
        self.adjacent_value = false;
    }

    /// Scan the content of a plain scalar up to the end of the current line. Trailing blanks
    /// are consumed but are not part of the content.
    fn scan_plain_line(&mut self, in_flow: bool) {
        let start = self.mark;
        let mut end = self.mark;
        let mut text = String::new();
        let mut blanks = String::new();
        loop {
            let c = self.peek();
            let next = self.peek_nth(1);
            if is_breakz(c)
                || (c == ':' && (is_blank_or_breakz(next) || (in_flow && is_flow(next))))
                || (in_flow && is_flow(c))
                || (c == '#' && !blanks.is_empty())
            {
                break;
            }
            if is_blank(c) {
                blanks.push(c);
            } else {
                text.push_str(&blanks);
                blanks.clear();
                text.push(c);
            }
            self.skip();
            if !is_blank(c) {
                end = self.mark;
            }
        }
        if !text.is_empty() {
            self.push_span(TokenKind::TextContent, text, Span::new(start, end));
        }
    }

    /// Check whether the plain scalar goes on after the line break we stand on. If it does,
    /// consume everything up to the content of the next line.
    fn plain_continues(&mut self, in_flow: bool) -> bool {
        let mut index = self.index_after_break(self.mark.index);
        let mut empty_lines = 0;
        let content = loop {
            let line = index;
            while self.char_at(index) == ' ' {
                index += 1;
            }
            let spaces = index - line;
            while is_blank(self.char_at(index)) {
                index += 1;
            }
            let c = self.char_at(index);
            if index >= self.chars.len() {
                return false;
            }
            if is_break(c) {
                empty_lines += 1;
                index = self.index_after_break(index);
                continue;
            }
            break (line, spaces, c);
        };
        let (line, spaces, c) = content;
        let next = self.char_at(index + 1);
        if c == '#'
            || (spaces == 0 && self.is_document_indicator_at(line))
            || (c == ':' && (is_blank_or_breakz(next) || (in_flow && is_flow(next))))
        {
            return false;
        }
        if in_flow {
            if is_flow(c) {
                return false;
            }
        } else if !self.is_deeper(spaces) || self.simple_key_at(index) {
            return false;
        }

        let start = self.mark;
        self.consume_break();
        self.push(TokenKind::Newline, "", start);
        for _ in 0..empty_lines {
            let start = self.mark;
            self.skip_blanks();
            self.consume_break();
            self.push(TokenKind::EmptyLine, "", start);
        }
        let start = self.mark;
        self.skip_blanks();
        let text = self.text_since(start);
        self.push(TokenKind::IndentSpaces, text, start);
        true
    }

    fn scan_quoted(&mut self, double: bool) {
        let (quote, kind) = if double {
            ('"', TokenKind::DoubleQuote)
        } else {
            ('\'', TokenKind::SingleQuote)
        };
        let start = self.mark;
        self.skip();
        self.push(kind, quote.to_string(), start);

        let mut run = Run::new(self.mark);
        loop {
            if self.is_end() {
                run.flush(self, true);
                break;
            }
            let c = self.peek();
            let next = self.peek_nth(1);
            if !double && c == '\'' && next == '\'' {
                run.flush(self, true);
                let start = self.mark;
                self.skip_n(2);
                self.push(TokenKind::Escape, "'", start);
                run = Run::new(self.mark);
            } else if c == quote {
                run.flush(self, true);
                let start = self.mark;
                self.skip();
                self.push(kind, quote.to_string(), start);
                break;
            } else if double && c == '\\' && is_break(next) {
                run.flush(self, true);
                let start = self.mark;
                self.skip();
                self.consume_break();
                self.push(TokenKind::EscapedLineBreak, "", start);
                self.scan_quoted_continuation();
                run = Run::new(self.mark);
            } else if double && c == '\\' {
                run.flush(self, true);
                self.scan_escape();
                run = Run::new(self.mark);
            } else if is_break(c) {
                // Trailing blanks of a line are not content.
                run.flush(self, false);
                let start = self.mark;
                self.consume_break();
                self.push(TokenKind::Newline, "", start);
                self.scan_quoted_continuation();
                run = Run::new(self.mark);
            } else if c == '\0' {
                run.flush(self, true);
                self.scan_unexpected();
                run = Run::new(self.mark);
            } else {
                run.push(c, self.mark);
                self.skip();
            }
        }
        self.allow_simple_key = false;
        self.adjacent_value = true;
    }

    /// Skip the leading blanks of the lines following a line break inside a quoted scalar,
    /// reporting blank lines as we go.
    fn scan_quoted_continuation(&mut self) {
        loop {
            let start = self.mark;
            self.skip_blanks();
            if is_break(self.peek()) {
                self.consume_break();
                self.push(TokenKind::EmptyLine, "", start);
                continue;
            }
            if self.mark.index > start.index {
                let text = self.text_since(start);
                self.push(TokenKind::IndentSpaces, text, start);
            }
            break;
        }
    }

    /// Scan an escape sequence in a double-quoted scalar and decode it.
    fn scan_escape(&mut self) {
        let start = self.mark;
        self.skip();
        let c = self.peek();
        let decoded = match c {
            '0' => Some('\0'),
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            't' | '\t' => Some('\t'),
            'n' => Some('\n'),
            'v' => Some('\x0b'),
            'f' => Some('\x0c'),
            'r' => Some('\r'),
            'e' => Some('\x1b'),
            ' ' => Some(' '),
            '"' => Some('"'),
            '/' => Some('/'),
            '\\' => Some('\\'),
            'N' => Some('\u{85}'),
            '_' => Some('\u{a0}'),
            'L' => Some('\u{2028}'),
            'P' => Some('\u{2029}'),
            _ => None,
        };
        if let Some(decoded) = decoded {
            self.skip();
            self.push(TokenKind::Escape, decoded.to_string(), start);
            return;
        }

        let width = match c {
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => 0,
        };
        if width > 0 && (1..=width).all(|n| is_hex(self.peek_nth(n))) {
            let value = (1..=width).fold(0, |acc, n| acc * 16 + as_hex(self.peek_nth(n)));
            if let Some(decoded) = char::from_u32(value) {
                self.skip_n(width + 1);
                self.push(TokenKind::Escape, decoded.to_string(), start);
                return;
            }
        }

        if !is_breakz(c) {
            self.skip();
        }
        let text = self.text_since(start);
        self.push(TokenKind::Unexpected, text, start);
    }

    fn scan_block_scalar(&mut self, literal: bool) {
        let start = self.mark;
        self.skip();
        let mut increment = None;
        // Chomping and indentation indicators may come in any order.
        for _ in 0..2 {
            match self.peek() {
                '+' | '-' => self.skip(),
                c @ '1'..='9' => {
                    increment = c.to_digit(10).map(|n| n as usize);
                    self.skip();
                }
                _ => break,
            }
        }
        let header = self.text_since(start);
        let kind = if literal {
            TokenKind::Literal
        } else {
            TokenKind::Folded
        };
        self.push(kind, header, start);

        self.skip_blanks();
        if self.peek() == '#' {
            self.scan_comment();
        }
        if !is_breakz(self.peek()) {
            let start = self.mark;
            while !is_breakz(self.peek()) {
                self.skip();
            }
            let text = self.text_since(start);
            self.push(TokenKind::Unexpected, text, start);
        }
        if is_break(self.peek()) {
            self.consume_break();
        }

        let parent = self.indents.last().map(|indent| indent.col);
        let indent = match increment {
            Some(n) => parent.map_or(n, |p| p + n),
            None => self.detect_block_indent(parent),
        };
        self.scan_block_scalar_lines(indent, parent);
        self.push(TokenKind::Outdent, "", self.mark);
        self.at_line_start = true;
        self.allow_simple_key = false;
    }

    /// Find the indentation of a block scalar from its first non-blank line.
    fn detect_block_indent(&self, parent: Option<usize>) -> usize {
        let min = parent.map_or(1, |p| p + 1);
        let mut index = self.mark.index;
        loop {
            let line = index;
            while self.char_at(index) == ' ' {
                index += 1;
            }
            if index >= self.chars.len() || !is_break(self.char_at(index)) {
                return (index - line).max(min);
            }
            index = self.index_after_break(index);
        }
    }

    /// Scan the lines of a block scalar. A line indented less than `indent` ends the scalar if it
    /// is a comment or is not more indented than the `parent` block. Otherwise its content is
    /// `Unexpected`.
    fn scan_block_scalar_lines(&mut self, indent: usize, parent: Option<usize>) {
        while !self.is_end() && !self.is_document_indicator_at(self.mark.index) {
            let line_start = self.mark;
            let mut spaces = 0;
            while self.peek_nth(spaces) == ' ' {
                spaces += 1;
            }
            let first = self.peek_nth(spaces);
            if is_break(first) {
                self.skip_n(spaces);
                self.consume_break();
                self.push(TokenKind::EmptyLine, "", line_start);
                continue;
            }
            if self.mark.index + spaces >= self.chars.len() {
                // Trailing blanks at the end of the input.
                self.skip_n(spaces);
                return;
            }
            if spaces < indent {
                if first != '#' && parent.map_or(spaces > 0, |p| spaces > p) {
                    self.skip_n(spaces);
                    let start = self.mark;
                    while !is_breakz(self.peek()) {
                        self.skip();
                    }
                    let text = self.text_since(start);
                    self.push(TokenKind::Unexpected, text, start);
                }
                return;
            }

            self.skip_n(indent);
            if spaces > indent {
                let start = self.mark;
                self.skip_n(spaces - indent);
                let text = self.text_since(start);
                self.push(TokenKind::IndentSpaces, text, start);
            }
            let start = self.mark;
            while !is_breakz(self.peek()) {
                self.skip();
            }
            if self.mark.index > start.index {
                let text = self.text_since(start);
                self.push(TokenKind::TextContent, text, start);
            }
            if !is_break(self.peek()) {
                return;
            }
            let start = self.mark;
            self.consume_break();
            self.push(TokenKind::Newline, "", start);
        }
    }
}

/// A run of quoted scalar content on a single line.
///
/// Blanks are held back until we know whether they end the line.
struct Run {
    text: String,
    blanks: String,
    start: Marker,
    end: Marker,
}

impl Run {
    fn new(start: Marker) -> Self {
        Self {
            text: String::new(),
            blanks: String::new(),
            start,
            end: start,
        }
    }

    fn push(&mut self, c: char, at: Marker) {
        if is_blank(c) {
            self.blanks.push(c);
        } else {
            self.text.push_str(&self.blanks);
            self.blanks.clear();
            self.text.push(c);
            self.end = Marker::new(at.index + 1, at.line, at.col + 1);
        }
    }

    /// Emit the run as a [`TokenKind::TextContent`], with or without its trailing blanks.
    fn flush(&mut self, lexer: &mut Lexer, keep_blanks: bool) {
        let mut end = self.end;
        if keep_blanks && !self.blanks.is_empty() {
            self.text.push_str(&self.blanks);
            end = lexer.mark;
        }
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            lexer.push_span(TokenKind::TextContent, text, Span::new(self.start, end));
        }
        self.blanks.clear();
    }
}
