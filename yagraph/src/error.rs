use std::fmt;

use yagraph_scanner::{Span, TokenKind};

/// A construct that can be left open at the end of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construct {
    /// A block sequence.
    BlockSequence,
    /// A block mapping.
    BlockMapping,
    /// A `[...]` sequence.
    FlowSequence,
    /// A `{...}` mapping.
    FlowMapping,
    /// A plain or quoted scalar.
    FlowScalar,
    /// A `|` or `>` scalar.
    BlockScalar,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Construct::BlockSequence => "block sequence",
            Construct::BlockMapping => "block mapping",
            Construct::FlowSequence => "flow sequence",
            Construct::FlowMapping => "flow mapping",
            Construct::FlowScalar => "scalar",
            Construct::BlockScalar => "block scalar",
        })
    }
}

/// An error that aborted the reading of an input.
///
/// There is no recovery: once an error is returned, no document of the input is available.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The current token does not fit the grammar at this position.
    #[error("unexpected {found}{} at {span}", expected_suffix(.expected))]
    UnexpectedToken {
        /// The offending token.
        found: TokenKind,
        /// The token that was required, if a specific one was.
        expected: Option<TokenKind>,
        /// Where the offending token is.
        span: Span,
    },
    /// An alias refers to an anchor that has not been defined yet.
    #[error("undefined anchor `{name}` at {span}")]
    UndefinedAnchor {
        /// The name of the anchor, without its sigil.
        name: String,
        /// Where the alias is.
        span: Span,
    },
    /// The input ended while a construct was still open.
    #[error("unterminated {construct} starting at {span}")]
    UnterminatedConstruct {
        /// What was left open.
        construct: Construct,
        /// Where the construct starts.
        span: Span,
    },
    /// An alias refers to an anchor whose node contains the alias.
    #[error("alias `{name}` refers to its own enclosing node at {span}")]
    RecursiveAlias {
        /// The name of the anchor, without its sigil.
        name: String,
        /// Where the alias is.
        span: Span,
    },
    /// Nodes are nested deeper than the reader allows.
    #[error("nesting deeper than {limit} levels at {span}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
        /// Where the limit was exceeded.
        span: Span,
    },
}

impl ParseError {
    /// Return the location the error refers to.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UndefinedAnchor { span, .. }
            | ParseError::UnterminatedConstruct { span, .. }
            | ParseError::RecursiveAlias { span, .. }
            | ParseError::DepthLimitExceeded { span, .. } => *span,
        }
    }
}

fn expected_suffix(expected: &Option<TokenKind>) -> String {
    match expected {
        Some(kind) => format!(" (expected {kind})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use yagraph_scanner::{Marker, Span, TokenKind};

    use super::{Construct, ParseError};

    #[test]
    fn test_display() {
        let span = Span::empty(Marker::new(4, 2, 3));
        let err = ParseError::UnexpectedToken {
            found: TokenKind::Comma,
            expected: Some(TokenKind::ValueIndicator),
            span,
        };
        assert_eq!(
            err.to_string(),
            "unexpected `,` (expected value indicator `:`) at line 2 column 4"
        );
        let err = ParseError::UnterminatedConstruct {
            construct: Construct::FlowSequence,
            span,
        };
        assert_eq!(
            err.to_string(),
            "unterminated flow sequence starting at line 2 column 4"
        );
        assert_eq!(err.span(), span);
    }
}
