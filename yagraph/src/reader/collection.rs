//! Block and flow collections.

use std::rc::Rc;

use yagraph_scanner::{Span, TokenKind, TokenSource};

use super::{empty_node, Reader};
use crate::{Construct, Mapping, Node, NodeRef, ParseError, Sequence};

impl<T: TokenSource> Reader<T> {
    /// Read a block sequence, from its begin marker to its `Outdent`.
    pub(super) fn read_block_sequence(&mut self) -> Result<Sequence, ParseError> {
        let start = self.source.span();
        self.source.advance();

        let mut seq = Sequence::default();
        loop {
            self.skip_trivia();
            match self.source.token() {
                TokenKind::BlockSeqIndicator => {
                    self.source.advance();
                    seq.push(self.read_node_or_empty()?);
                }
                TokenKind::Outdent => {
                    self.source.advance();
                    return Ok(seq);
                }
                _ => {
                    return Err(self.unterminated_or_unexpected(
                        Construct::BlockSequence,
                        start,
                        Some(TokenKind::Outdent),
                    ))
                }
            }
        }
    }

    /// Read a block mapping, from its begin marker to its `Outdent`.
    pub(super) fn read_block_mapping(&mut self) -> Result<Mapping, ParseError> {
        let start = self.source.span();
        self.source.advance();

        let mut map = Mapping::default();
        loop {
            self.skip_trivia();
            match self.source.token() {
                TokenKind::SimpleKey => {
                    self.source.advance();
                    let key = self.read_node_or_empty()?;
                    self.skip_trivia();
                    self.expect(TokenKind::ValueIndicator)?;
                    map.insert(key, self.read_node_or_empty()?);
                }
                TokenKind::KeyIndicator => {
                    let (key, value) = self.read_explicit_entry()?;
                    map.insert(key, value);
                }
                TokenKind::Outdent => {
                    self.source.advance();
                    return Ok(map);
                }
                _ => {
                    return Err(self.unterminated_or_unexpected(
                        Construct::BlockMapping,
                        start,
                        Some(TokenKind::Outdent),
                    ))
                }
            }
        }
    }

    /// Read a `[...]` sequence.
    ///
    /// A single `key: value` pair as an entry reads as a mapping with one entry.
    pub(super) fn read_flow_sequence(&mut self) -> Result<Sequence, ParseError> {
        let start = self.source.span();
        self.source.advance();

        let mut seq = Sequence::default();
        loop {
            self.skip_trivia();
            match self.source.token() {
                TokenKind::CloseBracket => {
                    self.close_flow();
                    return Ok(seq);
                }
                TokenKind::SimpleKey | TokenKind::KeyIndicator => {
                    let (key, value) = self.read_explicit_entry()?;
                    let mut pair = Mapping::default();
                    pair.insert(key, value);
                    seq.push(Rc::new(Node::Mapping(pair)));
                }
                _ => match self.read_node()? {
                    Some(item) => seq.push(item),
                    None => {
                        return Err(self.unterminated_or_unexpected(
                            Construct::FlowSequence,
                            start,
                            Some(TokenKind::CloseBracket),
                        ))
                    }
                },
            }
            self.flow_separator(Construct::FlowSequence, start, TokenKind::CloseBracket)?;
        }
    }

    /// Read a `{...}` mapping.
    ///
    /// Entries may omit their value (`{a, b: c}`), which then reads as an empty scalar.
    pub(super) fn read_flow_mapping(&mut self) -> Result<Mapping, ParseError> {
        let start = self.source.span();
        self.source.advance();

        let mut map = Mapping::default();
        loop {
            self.skip_trivia();
            let (key, value) = match self.source.token() {
                TokenKind::CloseBrace => {
                    self.close_flow();
                    return Ok(map);
                }
                TokenKind::SimpleKey | TokenKind::KeyIndicator => self.read_explicit_entry()?,
                TokenKind::ValueIndicator => (empty_node(), self.read_value()?),
                _ => match self.read_node()? {
                    Some(key) => (key, self.read_value()?),
                    None => {
                        return Err(self.unterminated_or_unexpected(
                            Construct::FlowMapping,
                            start,
                            Some(TokenKind::CloseBrace),
                        ))
                    }
                },
            };
            map.insert(key, value);
            self.flow_separator(Construct::FlowMapping, start, TokenKind::CloseBrace)?;
        }
    }

    /// Read an entry starting with a `SimpleKey` or `KeyIndicator` token, whose value is
    /// optional.
    fn read_explicit_entry(&mut self) -> Result<(NodeRef, NodeRef), ParseError> {
        self.source.advance();
        let key = self.read_node_or_empty()?;
        Ok((key, self.read_value()?))
    }

    /// Read `: value` if the current token (after trivia) is a value indicator. Otherwise, the
    /// value is empty.
    fn read_value(&mut self) -> Result<NodeRef, ParseError> {
        self.skip_trivia();
        if self.source.is(TokenKind::ValueIndicator) {
            self.source.advance();
            self.read_node_or_empty()
        } else {
            Ok(empty_node())
        }
    }

    /// Consume the `,` after a flow entry. The closing token is left for the caller.
    fn flow_separator(
        &mut self,
        construct: Construct,
        start: Span,
        close: TokenKind,
    ) -> Result<(), ParseError> {
        self.skip_trivia();
        match self.source.token() {
            TokenKind::Comma => {
                self.source.advance();
                Ok(())
            }
            kind if kind == close => Ok(()),
            _ => Err(self.unterminated_or_unexpected(construct, start, Some(close))),
        }
    }

    /// Consume the closing `]` or `}` of a flow collection, along with a line break right after
    /// it.
    fn close_flow(&mut self) {
        self.source.advance();
        if self.source.is(TokenKind::Newline) {
            self.source.advance();
        }
    }
}
