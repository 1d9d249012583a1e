//! A recursive-descent YAML reader producing a shared node graph.
//!
//! `yagraph` reads YAML documents into a graph of immutable [`Node`]s. Anchored nodes are shared,
//! not copied: every alias of an anchor points to the very same node.
//!
//! # Usage
//!
//! ```
//! let docs = yagraph::load(
//!     "
//! time: 20:03:20
//! player: Sammy Sosa
//! action: strike (miss)
//! ",
//! )
//! .unwrap();
//! let root = docs[0].root();
//! assert_eq!(root.get("player").unwrap().as_str(), Some("Sammy Sosa"));
//! assert_eq!(root.get("time").unwrap().to_string(), "20:03:20");
//! ```
//!
//! Scalars are kept as text. Tags (`!type`) are carried as opaque identifiers in [`Node::Tag`]
//! wrappers and never change how a node is read.
//!
//! The [`Reader`] can be fed any [`TokenSource`]; [`load`] uses the [`Scanner`] from
//! `yagraph-scanner`.
//!
//! # Features
//!
//! #### `encoding` (_enabled by default_)
//! Enables [`YamlDecoder`] and encoding detection in [`load_file`].
//!
//! #### `debug_prints`
//! Traces tokens, dispatch decisions, anchor bindings and document boundaries to `stderr` when
//! the `YAGRAPH_DEBUG` environment variable is set. Do not enable if you are consuming the crate
//! rather than working on it.

#![warn(missing_docs, clippy::pedantic)]

#[macro_use]
mod debug;
#[macro_use]
mod macros;

#[cfg(feature = "encoding")]
mod encoding;
mod error;
mod loader;
mod node;
mod reader;

#[cfg(feature = "encoding")]
pub use crate::encoding::{DecodingTrap, DecodingTrapFn, YamlDecoder};
pub use crate::error::{Construct, ParseError};
pub use crate::loader::{load, load_file, LoadError};
pub use crate::node::{
    Comment, Document, Mapping, Node, NodeRef, Scalar, ScalarStyle, Sequence, Tagged,
};
pub use crate::reader::{Reader, DEFAULT_MAX_DEPTH};

// Re-export the scanner types appearing in our API.
pub use yagraph_scanner::{Marker, Scanner, Span, TokenKind, TokenSource};
