//! The interface between a token producer and the reader.

use crate::{Span, TokenKind};

/// A cursor over a stream of raw tokens.
///
/// The reader only ever looks at the current token; it never peeks further ahead. Hiding the
/// scanner behind this trait allows feeding the reader from pre-recorded token streams.
pub trait TokenSource {
    /// (Re)initialize the source over the given text, positioned on its first token.
    fn set_source(&mut self, text: &str);

    /// Return the kind of the current token.
    ///
    /// Once the end of the input is reached, this returns [`TokenKind::StreamEnd`] forever.
    #[must_use]
    fn token(&self) -> TokenKind;

    /// Return the text of the current token.
    #[must_use]
    fn text(&self) -> &str;

    /// Consume the current token and load the next one.
    fn advance(&mut self);

    /// Return the nesting depth of the current token.
    ///
    /// This is informational only.
    #[must_use]
    fn depth(&self) -> usize;

    /// Return the location of the current token.
    #[must_use]
    fn span(&self) -> Span;

    /// Return whether the current token is of the given kind.
    #[inline]
    #[must_use]
    fn is(&self, kind: TokenKind) -> bool {
        self.token() == kind
    }
}
