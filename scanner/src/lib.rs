//! Raw token scanner for the `yagraph` YAML reader.
//!
//! **If you want to load YAML documents into a node graph, use `yagraph` instead of
//! `yagraph-scanner`. This crate contains only the scanner.**
//!
//! The scanner splits its input into a flat stream of [`Token`]s. It takes care of indentation
//! and of finding out where implicit keys are, but leaves scalars in pieces (text runs, line
//! breaks, escapes) for the reader to put back together. The reader consumes tokens through the
//! [`TokenSource`] trait, one at a time, without ever looking ahead.
//!
//! ```
//! use yagraph_scanner::{Scanner, TokenKind, TokenSource};
//!
//! let mut scanner = Scanner::new("- foo");
//! let mut kinds = vec![];
//! while !scanner.is(TokenKind::StreamEnd) {
//!     kinds.push(scanner.token());
//!     scanner.advance();
//! }
//! assert_eq!(kinds[0], TokenKind::BlockSeqBegin);
//! ```
//!
//! # Features
//!
//! #### `debug_prints`
//! Enables the `debug` module and usage of debug prints in the scanner. Every token is traced to
//! `stderr` when the `YAGRAPH_DEBUG` environment variable is set. Do not enable if you are
//! consuming the crate rather than working on it.

#![warn(missing_docs, clippy::pedantic)]

#[macro_use]
mod debug;
mod char_traits;
mod scanner;
mod source;
mod token;

pub use crate::scanner::Scanner;
pub use crate::source::TokenSource;
pub use crate::token::{Marker, Span, Token, TokenKind};
