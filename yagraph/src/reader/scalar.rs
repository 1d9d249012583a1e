//! Putting scalar text back together.
//!
//! The scanner hands scalars over as runs of text separated by line break tokens. Flow scalars
//! (plain and quoted) fold a single line break into a space and keep one newline per empty line.
//! Literal block scalars keep every line break. Folded block scalars fold like flow scalars,
//! except around lines carrying extra indentation.

use yagraph_scanner::{TokenKind, TokenSource};

use super::Reader;
use crate::{Construct, ParseError, Scalar, ScalarStyle};

impl<T: TokenSource> Reader<T> {
    /// Read the scalar starting at the current token, including its closing token.
    pub(super) fn read_scalar(&mut self) -> Result<Scalar, ParseError> {
        match self.source.token() {
            TokenKind::Literal => self.read_block_scalar(ScalarStyle::Literal),
            TokenKind::Folded => self.read_block_scalar(ScalarStyle::Folded),
            TokenKind::SingleQuote => {
                self.read_flow_scalar(TokenKind::SingleQuote, ScalarStyle::SingleQuoted)
            }
            TokenKind::DoubleQuote => {
                self.read_flow_scalar(TokenKind::DoubleQuote, ScalarStyle::DoubleQuoted)
            }
            _ => self.read_flow_scalar(TokenKind::PlainEnd, ScalarStyle::Plain),
        }
    }

    fn read_flow_scalar(
        &mut self,
        close: TokenKind,
        style: ScalarStyle,
    ) -> Result<Scalar, ParseError> {
        let start = self.source.span();
        self.source.advance();

        let mut folder = FlowFolder::default();
        loop {
            match self.source.token() {
                kind if kind == close => break,
                TokenKind::TextContent | TokenKind::Escape => folder.push(self.source.text()),
                TokenKind::Newline => folder.line_break(),
                TokenKind::EmptyLine => folder.empty_line(),
                TokenKind::IndentSpaces | TokenKind::EscapedLineBreak | TokenKind::Comment => {}
                _ => {
                    return Err(self.unterminated_or_unexpected(
                        Construct::FlowScalar,
                        start,
                        Some(close),
                    ))
                }
            }
            self.source.advance();
        }
        self.source.advance();
        Ok(Scalar::new(folder.finish(), style))
    }

    fn read_block_scalar(&mut self, style: ScalarStyle) -> Result<Scalar, ParseError> {
        let start = self.source.span();
        let keep = self.source.text().contains('+');
        self.source.advance();

        let mut folder = BlockFolder::new(style == ScalarStyle::Literal);
        loop {
            match self.source.token() {
                TokenKind::Outdent => break,
                TokenKind::IndentSpaces => folder.extra_indent(self.source.text()),
                TokenKind::TextContent => folder.push(self.source.text()),
                TokenKind::Newline => folder.line_break(),
                TokenKind::EmptyLine => folder.empty_line(),
                TokenKind::Comment => {}
                _ => {
                    return Err(self.unterminated_or_unexpected(
                        Construct::BlockScalar,
                        start,
                        Some(TokenKind::Outdent),
                    ))
                }
            }
            self.source.advance();
        }
        self.source.advance();
        Ok(Scalar::new(folder.finish(keep), style))
    }
}

/// Line folding for plain and quoted scalars.
#[derive(Default)]
struct FlowFolder {
    text: String,
    /// Whether a line break was met since the last run of text.
    pending_break: bool,
    /// Empty lines met since the last run of text.
    empty_lines: usize,
}

impl FlowFolder {
    fn push(&mut self, content: &str) {
        self.flush_breaks();
        self.text.push_str(content);
    }

    fn line_break(&mut self) {
        self.pending_break = true;
    }

    fn empty_line(&mut self) {
        self.empty_lines += 1;
    }

    fn flush_breaks(&mut self) {
        if self.empty_lines > 0 {
            self.text.extend(std::iter::repeat('\n').take(self.empty_lines));
        } else if self.pending_break {
            self.text.push(' ');
        }
        self.pending_break = false;
        self.empty_lines = 0;
    }

    fn finish(mut self) -> String {
        self.flush_breaks();
        self.text
    }
}

/// Line folding for block scalars.
struct BlockFolder {
    literal: bool,
    text: String,
    /// Line breaks met since the last line with content.
    breaks: usize,
    /// Whether some content has been written.
    has_content: bool,
    /// Whether the current line already has content.
    line_started: bool,
    /// Whether the current line is more indented than the block.
    line_more_indented: bool,
    /// Whether the last line with content was more indented than the block.
    prev_more_indented: bool,
}

impl BlockFolder {
    fn new(literal: bool) -> Self {
        Self {
            literal,
            text: String::new(),
            breaks: 0,
            has_content: false,
            line_started: false,
            line_more_indented: false,
            prev_more_indented: false,
        }
    }

    /// Extra indentation is content, but it also prevents folding the line breaks around its
    /// line.
    fn extra_indent(&mut self, spaces: &str) {
        if !self.line_started {
            self.line_more_indented = true;
        }
        self.push(spaces);
    }

    fn push(&mut self, content: &str) {
        if !self.line_started {
            self.join_lines();
            self.line_started = true;
        }
        self.text.push_str(content);
        self.has_content = true;
    }

    fn line_break(&mut self) {
        if self.line_started {
            self.prev_more_indented = self.line_more_indented;
        }
        self.line_more_indented = false;
        self.line_started = false;
        self.breaks += 1;
    }

    fn empty_line(&mut self) {
        self.breaks += 1;
    }

    /// Write the line breaks met between the previous line with content and the current one.
    fn join_lines(&mut self) {
        let newlines = if !self.has_content
            || self.literal
            || self.line_more_indented
            || self.prev_more_indented
        {
            self.breaks
        } else if self.breaks == 1 {
            self.text.push(' ');
            0
        } else {
            self.breaks - 1
        };
        self.text.extend(std::iter::repeat('\n').take(newlines));
        self.breaks = 0;
    }

    /// Return the text of the scalar. Trailing line breaks are kept only if `keep` is set.
    fn finish(mut self, keep: bool) -> String {
        if keep {
            self.text.extend(std::iter::repeat('\n').take(self.breaks));
        }
        self.text
    }
}

#[cfg(test)]
mod test {
    use super::{BlockFolder, FlowFolder};

    #[test]
    fn test_flow_folding() {
        let mut folder = FlowFolder::default();
        folder.push("a");
        folder.line_break();
        folder.push("b");
        folder.line_break();
        folder.empty_line();
        folder.push("c");
        folder.line_break();
        folder.empty_line();
        folder.empty_line();
        folder.push("d");
        assert_eq!(folder.finish(), "a b\nc\n\nd");
    }

    #[test]
    fn test_flow_trailing_breaks() {
        let mut folder = FlowFolder::default();
        folder.push("a");
        folder.line_break();
        folder.empty_line();
        assert_eq!(folder.finish(), "a\n");

        let mut folder = FlowFolder::default();
        folder.line_break();
        folder.push("a");
        assert_eq!(folder.finish(), " a");
    }

    fn fold(literal: bool, keep: bool, lines: &[&str]) -> String {
        let mut folder = BlockFolder::new(literal);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                if lines[i - 1].is_empty() {
                    folder.empty_line();
                } else {
                    folder.line_break();
                }
            }
            let content = line.trim_start();
            let extra = &line[..line.len() - content.len()];
            if !extra.is_empty() {
                folder.extra_indent(extra);
            }
            if !content.is_empty() {
                folder.push(content);
            }
        }
        folder.line_break();
        folder.finish(keep)
    }

    #[test]
    fn test_literal() {
        assert_eq!(fold(true, false, &["a", " b", "", "c"]), "a\n b\n\nc");
        assert_eq!(fold(true, true, &["a"]), "a\n");
    }

    #[test]
    fn test_folded() {
        assert_eq!(fold(false, false, &["a", "b", "", "c"]), "a b\nc");
        assert_eq!(fold(false, false, &["a", "  b", "c"]), "a\n  b\nc");
        assert_eq!(fold(false, false, &["a", "  b", "", "c"]), "a\n  b\n\nc");
        assert_eq!(fold(false, true, &["a", "b"]), "a b\n");
    }
}
