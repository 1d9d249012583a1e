//! The recursive-descent reader turning tokens into documents.

mod collection;
mod scalar;

use std::rc::Rc;

use hashlink::LinkedHashMap;
use yagraph_scanner::{Scanner, Span, TokenKind, TokenSource};

use crate::{Comment, Construct, Document, Node, NodeRef, ParseError, Scalar, Tagged};

/// The default maximum nesting depth of nodes.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Reads the documents of a token stream.
///
/// The reader owns its anchor table: anchors never leak from one [`Reader::load`] call to another.
///
/// ```
/// use yagraph::Reader;
///
/// let mut reader = Reader::new_from_str("# top\n[a, b]\n");
/// reader.keep_comments(true);
/// let docs = reader.load().unwrap();
/// assert!(docs[0].root().is_comment());
/// assert_eq!(docs[0].items()[1].to_string(), "[a,b]");
/// ```
pub struct Reader<T: TokenSource> {
    /// The token stream.
    source: T,
    /// Anchors bound so far, by name.
    anchors: LinkedHashMap<String, NodeRef>,
    /// Anchors whose node is being read.
    open_anchors: Vec<String>,
    /// Current nesting depth of [`Self::read_node`].
    depth: usize,
    max_depth: usize,
    keep_comments: bool,
}

impl Reader<Scanner> {
    /// Create a reader over the given input.
    #[must_use]
    pub fn new_from_str(text: &str) -> Self {
        Self::new(Scanner::new(text))
    }
}

impl<T: TokenSource> Reader<T> {
    /// Create a reader over the given token source.
    pub fn new(source: T) -> Self {
        Self {
            source,
            anchors: LinkedHashMap::new(),
            open_anchors: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            keep_comments: false,
        }
    }

    /// Set the maximum nesting depth of nodes.
    ///
    /// Collections, tags and anchors each count as one level. Reading fails with
    /// [`ParseError::DepthLimitExceeded`] when the limit is exceeded.
    pub fn max_depth(&mut self, limit: usize) -> &mut Self {
        self.max_depth = limit;
        self
    }

    /// Whether to keep top-level comments as [`Node::Comment`] items of their document.
    ///
    /// Comments are discarded by default. Comments within collections and scalars are always
    /// discarded.
    pub fn keep_comments(&mut self, enabled: bool) -> &mut Self {
        self.keep_comments = enabled;
        self
    }

    /// Return the anchors bound by the last call to [`Self::load`], in definition order.
    ///
    /// A rebound anchor appears once, with its last binding.
    pub fn anchors(&self) -> impl Iterator<Item = (&str, &NodeRef)> {
        self.anchors.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Read all the documents of the token stream.
    ///
    /// Documents are split on `---`. Documents with no node are dropped.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] met. No document is returned in that case.
    pub fn load(&mut self) -> Result<Vec<Document>, ParseError> {
        self.anchors.clear();
        self.open_anchors.clear();
        self.depth = 0;

        let mut documents = Vec::new();
        let mut items = Vec::new();
        loop {
            match self.source.token() {
                TokenKind::StreamEnd => break,
                TokenKind::DocumentSeparator => {
                    debug_print!("--- document {}", documents.len());
                    flush_document(&mut documents, &mut items);
                    self.source.advance();
                }
                TokenKind::PauseStream | TokenKind::Directive | TokenKind::Outdent => {
                    self.source.advance();
                }
                TokenKind::Comment if self.keep_comments => {
                    let comment = Comment::new(self.source.text().to_owned());
                    items.push(Rc::new(Node::Comment(comment)));
                    self.source.advance();
                }
                kind if kind.is_trivia() => self.source.advance(),
                _ => match self.read_node()? {
                    Some(node) => items.push(node),
                    None => return Err(self.unexpected(None)),
                },
            }
        }
        flush_document(&mut documents, &mut items);
        debug_print!("read {} document(s)", documents.len());
        Ok(documents)
    }

    /// Read the node starting at the current token.
    ///
    /// Returns `None` if the current token ends the enclosing construct or starts the next entry
    /// of a collection, without consuming it.
    pub(crate) fn read_node(&mut self) -> Result<Option<NodeRef>, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.max_depth,
                span: self.source.span(),
            });
        }
        self.depth += 1;
        let node = self.dispatch();
        self.depth -= 1;
        node
    }

    /// Like [`Self::read_node`], but a missing node reads as an empty plain scalar.
    pub(crate) fn read_node_or_empty(&mut self) -> Result<NodeRef, ParseError> {
        Ok(self.read_node()?.unwrap_or_else(empty_node))
    }

    fn dispatch(&mut self) -> Result<Option<NodeRef>, ParseError> {
        self.skip_trivia();
        let token = self.source.token();
        debug_print!("{:indent$}read {token:?}", "", indent = self.depth);
        let node = match token {
            TokenKind::Anchor => return self.read_anchor().map(Some),
            TokenKind::Alias => return self.read_alias().map(Some),
            TokenKind::Tag => {
                let type_id = strip_sigil(self.source.text()).to_owned();
                self.source.advance();
                Node::Tag(Tagged::new(type_id, self.read_node_or_empty()?))
            }
            TokenKind::BlockSeqBegin => Node::Sequence(self.read_block_sequence()?),
            TokenKind::BlockMappingBegin => Node::Mapping(self.read_block_mapping()?),
            TokenKind::OpenBracket => Node::Sequence(self.read_flow_sequence()?),
            TokenKind::OpenBrace => Node::Mapping(self.read_flow_mapping()?),
            TokenKind::PlainScalar
            | TokenKind::SingleQuote
            | TokenKind::DoubleQuote
            | TokenKind::Literal
            | TokenKind::Folded => Node::Scalar(self.read_scalar()?),
            TokenKind::StreamEnd
            | TokenKind::Outdent
            | TokenKind::DocumentSeparator
            | TokenKind::PauseStream
            | TokenKind::BlockSeqIndicator
            | TokenKind::SimpleKey
            | TokenKind::KeyIndicator
            | TokenKind::ValueIndicator
            | TokenKind::Comma
            | TokenKind::CloseBracket
            | TokenKind::CloseBrace => return Ok(None),
            _ => return Err(self.unexpected(None)),
        };
        Ok(Some(Rc::new(node)))
    }

    /// Read `&name node`, binding the node to the anchor.
    ///
    /// The node itself is returned, not a wrapper.
    fn read_anchor(&mut self) -> Result<NodeRef, ParseError> {
        let name = strip_sigil(self.source.text()).to_owned();
        self.source.advance();

        self.open_anchors.push(name.clone());
        let node = self.read_node_or_empty();
        self.open_anchors.pop();
        let node = node?;

        debug_print!("{:indent$}&{name} = {node}", "", indent = self.depth);
        // Rebinding only affects aliases read from now on.
        self.anchors.replace(name, node.clone());
        Ok(node)
    }

    fn read_alias(&mut self) -> Result<NodeRef, ParseError> {
        let name = strip_sigil(self.source.text());
        let node = match self.anchors.get(name) {
            Some(node) => Rc::clone(node),
            None if self.open_anchors.iter().any(|open| open == name) => {
                return Err(ParseError::RecursiveAlias {
                    name: name.to_owned(),
                    span: self.source.span(),
                })
            }
            None => {
                return Err(ParseError::UndefinedAnchor {
                    name: name.to_owned(),
                    span: self.source.span(),
                })
            }
        };
        self.source.advance();
        Ok(node)
    }

    /// Skip tokens that carry no meaning for the structure of the document.
    pub(crate) fn skip_trivia(&mut self) {
        while self.source.token().is_trivia() {
            self.source.advance();
        }
    }

    /// Consume the current token if it is of the given kind, fail otherwise.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.source.is(kind) {
            self.source.advance();
            Ok(())
        } else {
            Err(self.unexpected(Some(kind)))
        }
    }

    /// Build an error for the current token.
    ///
    /// The end of the stream is reported as an unexpected token too; readers of open constructs
    /// use [`Self::unterminated`] instead.
    pub(crate) fn unexpected(&self, expected: Option<TokenKind>) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.source.token(),
            expected,
            span: self.source.span(),
        }
    }

    /// Fail on the current token: at the end of the stream, report `construct` as left open.
    ///
    /// The scanner closes the open blocks before the end of the stream. Inside flow constructs,
    /// an `Outdent` can only come from there.
    pub(crate) fn unterminated_or_unexpected(
        &self,
        construct: Construct,
        start: Span,
        expected: Option<TokenKind>,
    ) -> ParseError {
        if matches!(self.source.token(), TokenKind::StreamEnd | TokenKind::Outdent) {
            ParseError::UnterminatedConstruct {
                construct,
                span: start,
            }
        } else {
            self.unexpected(expected)
        }
    }
}

/// Push the document being read, unless it is empty.
fn flush_document(documents: &mut Vec<Document>, items: &mut Vec<NodeRef>) {
    if let Some(document) = Document::new(std::mem::take(items)) {
        documents.push(document);
    }
}

fn empty_node() -> NodeRef {
    Rc::new(Node::Scalar(Scalar::empty()))
}

/// Remove the leading `&`, `*` or `!` of a property or alias.
fn strip_sigil(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.as_str()
}

#[cfg(test)]
mod test {
    use yagraph_scanner::{Marker, Span, Token, TokenKind, TokenSource};

    use super::{strip_sigil, Reader};
    use crate::ParseError;

    /// A source replaying a fixed list of tokens.
    struct Replay {
        tokens: Vec<Token>,
        cursor: usize,
    }

    impl Replay {
        fn new(kinds: &[(TokenKind, &str)]) -> Self {
            let tokens = kinds
                .iter()
                .enumerate()
                .map(|(i, (kind, text))| Token {
                    kind: *kind,
                    text: (*text).to_owned(),
                    span: Span::empty(Marker::new(i, 1, i)),
                    depth: 0,
                })
                .collect();
            Self { tokens, cursor: 0 }
        }
    }

    impl TokenSource for Replay {
        fn set_source(&mut self, _: &str) {
            self.cursor = 0;
        }

        fn token(&self) -> TokenKind {
            self.tokens
                .get(self.cursor)
                .map_or(TokenKind::StreamEnd, |token| token.kind)
        }

        fn text(&self) -> &str {
            self.tokens
                .get(self.cursor)
                .map_or("", |token| token.text.as_str())
        }

        fn advance(&mut self) {
            self.cursor += 1;
        }

        fn depth(&self) -> usize {
            0
        }

        fn span(&self) -> Span {
            self.tokens
                .get(self.cursor)
                .map_or_else(Span::default, |token| token.span)
        }
    }

    #[test]
    fn test_strip_sigil() {
        assert_eq!(strip_sigil("&anchor"), "anchor");
        assert_eq!(strip_sigil("!!str"), "!str");
        assert_eq!(strip_sigil(""), "");
    }

    #[test]
    fn test_replayed_tokens() {
        use TokenKind::*;
        let source = Replay::new(&[
            (OpenBracket, "["),
            (PlainScalar, ""),
            (TextContent, "a"),
            (PlainEnd, ""),
            (Comma, ","),
            (Alias, "*x"),
        ]);
        let err = Reader::new(source).load().unwrap_err();
        assert!(matches!(err, ParseError::UndefinedAnchor { ref name, .. } if name == "x"));

        // The source ends without closing the sequence.
        let source = Replay::new(&[
            (OpenBracket, "["),
            (PlainScalar, ""),
            (TextContent, "a"),
            (PlainEnd, ""),
        ]);
        let err = Reader::new(source).load().unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedConstruct { .. }));
    }

    #[test]
    fn test_anchors_are_per_load() {
        let mut reader = Reader::new_from_str("&a x");
        reader.load().unwrap();
        assert_eq!(reader.anchors().count(), 1);
        reader.source.set_source("*a");
        assert!(reader.load().is_err());
    }

    #[test]
    fn test_depth_limit() {
        let mut reader = Reader::new_from_str("[[[a]]]");
        reader.max_depth(3);
        let err = reader.load().unwrap_err();
        assert!(matches!(err, ParseError::DepthLimitExceeded { limit: 3, .. }));

        let mut reader = Reader::new_from_str("[[[a]]]");
        reader.max_depth(4);
        assert_eq!(reader.load().unwrap()[0].to_string(), "[[[[a]]]]");
    }
}
