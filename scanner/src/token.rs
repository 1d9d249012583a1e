//! Tokens, locations and spans.

use std::fmt;

/// A location in the input.
///
/// The index counts characters, not bytes. Lines start at 1, columns at 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Marker {
    /// The index (in chars) in the input string.
    pub(crate) index: usize,
    /// The line (1-indexed).
    pub(crate) line: usize,
    /// The column (0-indexed).
    pub(crate) col: usize,
}

impl Marker {
    /// Create a new [`Marker`] at the given position.
    #[must_use]
    pub fn new(index: usize, line: usize, col: usize) -> Marker {
        Marker { index, line, col }
    }

    /// Return the index (in chars) of the marker in the source.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the line of the marker in the source.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the column of the marker in the source.
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }
}

impl Default for Marker {
    fn default() -> Self {
        Marker::new(0, 1, 0)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.col + 1)
    }
}

/// A range of locations in the input.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Span {
    /// The start (inclusive) of the range.
    pub start: Marker,
    /// The end (exclusive) of the range.
    pub end: Marker,
}

impl Span {
    /// Create a new [`Span`] for the given range.
    #[must_use]
    pub fn new(start: Marker, end: Marker) -> Span {
        Span { start, end }
    }

    /// Create an empty [`Span`] at the given location.
    #[must_use]
    pub fn empty(mark: Marker) -> Span {
        Span {
            start: mark,
            end: mark,
        }
    }

    /// Return the length of the span (in characters).
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.index.saturating_sub(self.start.index)
    }

    /// Return whether the span has a length of zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.start, f)
    }
}

/// The kind of a raw token.
///
/// Tokens carry no value of their own; their text is available separately (see
/// [`Token::text`]). Anchor, alias and tag tokens keep their sigil as the first character.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TokenKind {
    /// End of the input. Once reached, the source keeps returning it.
    StreamEnd,
    /// A `%` directive line.
    Directive,
    /// `---` at the start of a line.
    DocumentSeparator,
    /// `...` at the start of a line.
    PauseStream,
    /// Leading spaces of a line, or extra indentation inside a block scalar.
    IndentSpaces,
    /// A line break.
    Newline,
    /// A blank line inside a multi-line scalar.
    EmptyLine,
    /// A `#` comment, up to the end of the line.
    Comment,
    /// A block sequence starts at a new indentation level.
    BlockSeqBegin,
    /// `-`, introducing a block sequence entry.
    BlockSeqIndicator,
    /// A block mapping starts at a new indentation level.
    BlockMappingBegin,
    /// The next node is an implicit key.
    SimpleKey,
    /// `?`, introducing an explicit key.
    KeyIndicator,
    /// `:`, introducing a value.
    ValueIndicator,
    /// A block collection or a block scalar ends.
    Outdent,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `,`
    Comma,
    /// `&name`
    Anchor,
    /// `*name`
    Alias,
    /// `!type`
    Tag,
    /// A plain scalar starts.
    PlainScalar,
    /// A plain scalar ends.
    PlainEnd,
    /// `'`, opening or closing a single-quoted scalar.
    SingleQuote,
    /// `"`, opening or closing a double-quoted scalar.
    DoubleQuote,
    /// `|`, with its header, opening a literal block scalar.
    Literal,
    /// `>`, with its header, opening a folded block scalar.
    Folded,
    /// Scalar content on a single line.
    TextContent,
    /// A decoded escape sequence.
    Escape,
    /// A `\` at the end of a line in a double-quoted scalar.
    EscapedLineBreak,
    /// Characters that cannot start any token.
    Unexpected,
}

impl TokenKind {
    /// Return whether the token carries no meaning for the structure of the document.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::IndentSpaces | TokenKind::Newline | TokenKind::EmptyLine | TokenKind::Comment
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::StreamEnd => "end of stream",
            TokenKind::Directive => "directive",
            TokenKind::DocumentSeparator => "document separator `---`",
            TokenKind::PauseStream => "document end `...`",
            TokenKind::IndentSpaces => "indentation",
            TokenKind::Newline => "line break",
            TokenKind::EmptyLine => "empty line",
            TokenKind::Comment => "comment",
            TokenKind::BlockSeqBegin => "start of block sequence",
            TokenKind::BlockSeqIndicator => "sequence entry `-`",
            TokenKind::BlockMappingBegin => "start of block mapping",
            TokenKind::SimpleKey => "mapping key",
            TokenKind::KeyIndicator => "key indicator `?`",
            TokenKind::ValueIndicator => "value indicator `:`",
            TokenKind::Outdent => "end of block",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Anchor => "anchor",
            TokenKind::Alias => "alias",
            TokenKind::Tag => "tag",
            TokenKind::PlainScalar => "plain scalar",
            TokenKind::PlainEnd => "end of plain scalar",
            TokenKind::SingleQuote => "`'`",
            TokenKind::DoubleQuote => "`\"`",
            TokenKind::Literal => "literal block scalar",
            TokenKind::Folded => "folded block scalar",
            TokenKind::TextContent => "text",
            TokenKind::Escape => "escape sequence",
            TokenKind::EscapedLineBreak => "escaped line break",
            TokenKind::Unexpected => "unexpected character",
        };
        f.write_str(name)
    }
}

/// A raw token, as produced by the [`Scanner`].
///
/// [`Scanner`]: crate::Scanner
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    /// The kind of the token.
    pub kind: TokenKind,
    /// The text of the token.
    ///
    /// This is the raw lexeme, except for [`TokenKind::Escape`] where it is the decoded text.
    pub text: String,
    /// Where the token is in the input.
    pub span: Span,
    /// The number of open block and flow collections when the token was produced.
    pub depth: usize,
}
