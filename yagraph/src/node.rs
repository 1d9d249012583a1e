//! The node graph produced by the reader.
//!
//! Nodes are immutable once built. They are handed around as [`NodeRef`]s so that a node bound to
//! an anchor can be owned by every container that references it, either directly or through an
//! alias. The result is, in general, a directed acyclic graph rather than a tree:
//!
//! ```
//! use std::rc::Rc;
//!
//! let docs = yagraph::load("- &a [1, 2]\n- *a").unwrap();
//! let root = docs[0].root();
//! let seq = root.as_sequence().unwrap();
//! assert!(Rc::ptr_eq(&seq[0], &seq[1]));
//! ```

use std::fmt;
use std::ops::Index;
use std::rc::Rc;

/// A shared handle to a [`Node`].
pub type NodeRef = Rc<Node>;

/// The style a scalar was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// An unquoted scalar.
    Plain,
    /// A `'`-quoted scalar.
    SingleQuoted,
    /// A `"`-quoted scalar.
    DoubleQuoted,
    /// A `|` block scalar.
    Literal,
    /// A `>` block scalar.
    Folded,
}

/// A node of the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A leaf text value.
    Scalar(Scalar),
    /// An ordered list of nodes.
    Sequence(Sequence),
    /// An ordered list of key-value pairs.
    Mapping(Mapping),
    /// A node preceded by a type annotation.
    Tag(Tagged),
    /// A standalone comment.
    Comment(Comment),
    /// The top-level nodes of one document.
    Document(Document),
}

impl Node {
    define_is!(is_scalar, Self::Scalar(_));
    define_is!(is_sequence, Self::Sequence(_));
    define_is!(is_mapping, Self::Mapping(_));
    define_is!(is_tag, Self::Tag(_));
    define_is!(is_comment, Self::Comment(_));
    define_is!(is_document, Self::Document(_));

    define_as_ref!(as_scalar, &Scalar, Scalar);
    define_as_ref!(as_sequence, &Sequence, Sequence);
    define_as_ref!(as_mapping, &Mapping, Mapping);
    define_as_ref!(as_tag, &Tagged, Tag);
    define_as_ref!(as_comment, &Comment, Comment);
    define_as_ref!(as_document, &Document, Document);

    /// Return the text of the node if it is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().map(Scalar::text)
    }

    /// Look up a key in a mapping.
    ///
    /// Returns `None` if the node is not a mapping or has no such key. See [`Mapping::get`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NodeRef> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Return the type identifier of the node if it is a [`Node::Tag`] wrapper.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.as_tag().map(Tagged::type_id)
    }

    /// Look through any [`Node::Tag`] wrappers and return the innermost node.
    #[must_use]
    pub fn untagged(&self) -> &Node {
        let mut node = self;
        while let Node::Tag(tagged) = node {
            node = &tagged.value;
        }
        node
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => f.write_str(&scalar.text),
            Node::Sequence(seq) => write_items(f, &seq.items),
            Node::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("}")
            }
            Node::Tag(tagged) => write!(f, "{}", tagged.value),
            Node::Comment(comment) => f.write_str(&comment.text),
            Node::Document(doc) => write_items(f, &doc.items),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[NodeRef]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// A leaf text value, with escapes decoded and line folding applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar {
    text: String,
    style: ScalarStyle,
}

impl Scalar {
    /// Create a new scalar.
    #[must_use]
    pub fn new(text: String, style: ScalarStyle) -> Self {
        Self { text, style }
    }

    /// An empty plain scalar, which stands for a missing node.
    pub(crate) fn empty() -> Self {
        Self::new(String::new(), ScalarStyle::Plain)
    }

    /// Return the text of the scalar.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Return the style the scalar was written in.
    #[must_use]
    pub fn style(&self) -> ScalarStyle {
        self.style
    }
}

/// An ordered list of nodes. Duplicates and mixed node kinds are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    items: Vec<NodeRef>,
}

impl Sequence {
    pub(crate) fn push(&mut self, node: NodeRef) {
        self.items.push(node);
    }
}

define_item_container!(Sequence, NodeRef);

impl Index<usize> for Sequence {
    type Output = NodeRef;

    /// # Panics
    /// Panics if the index is out of bounds.
    fn index(&self, index: usize) -> &NodeRef {
        &self.items[index]
    }
}

/// An ordered list of key-value pairs.
///
/// Keys are arbitrary nodes. Entries keep the order they were written in and duplicate keys are
/// kept as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(NodeRef, NodeRef)>,
}

impl Mapping {
    pub(crate) fn insert(&mut self, key: NodeRef, value: NodeRef) {
        self.entries.push((key, value));
    }

    /// Return the value of the first entry whose key renders as `key`.
    ///
    /// Keys are compared through their [`Display`] rendering, so this also finds non-scalar keys
    /// (e.g. `[a,b]`).
    ///
    /// [`Display`]: std::fmt::Display
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NodeRef> {
        self.entries
            .iter()
            .find(|(k, _)| k.to_string() == key)
            .map(|(_, v)| v)
    }

    /// Return the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeRef, &NodeRef)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate over the keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &NodeRef> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate over the values, in order.
    pub fn values(&self) -> impl Iterator<Item = &NodeRef> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// A node with a type annotation.
///
/// The type identifier is opaque: it is not interpreted and does not change how the wrapped node
/// was read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tagged {
    type_id: String,
    value: NodeRef,
}

impl Tagged {
    /// Wrap `value` with the given type identifier.
    #[must_use]
    pub fn new(type_id: String, value: NodeRef) -> Self {
        Self { type_id, value }
    }

    /// Return the type identifier, without the leading `!`.
    #[must_use]
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Return the wrapped node.
    #[must_use]
    pub fn value(&self) -> &NodeRef {
        &self.value
    }
}

/// A standalone comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    text: String,
}

impl Comment {
    /// Create a comment node. The text includes the leading `#`.
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// Return the text of the comment.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The top-level nodes of one document.
///
/// Documents produced by the reader are never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    items: Vec<NodeRef>,
}

impl Document {
    /// Create a document from its top-level nodes, or `None` if there are none.
    #[must_use]
    pub fn new(items: Vec<NodeRef>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    /// Return the first node of the document.
    #[must_use]
    pub fn root(&self) -> &NodeRef {
        // Documents are never empty, see `Document::new`.
        &self.items[0]
    }
}

define_item_container!(Document, NodeRef);

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, &self.items)
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::{Comment, Document, Mapping, Node, Scalar, ScalarStyle, Sequence, Tagged};

    fn scalar(text: &str) -> Rc<Node> {
        Rc::new(Node::Scalar(Scalar::new(text.into(), ScalarStyle::Plain)))
    }

    #[test]
    fn test_display() {
        let mut seq = Sequence::default();
        seq.push(scalar("a"));
        seq.push(scalar("b"));
        let seq = Rc::new(Node::Sequence(seq));
        assert_eq!(seq.to_string(), "[a,b]");

        let mut map = Mapping::default();
        map.insert(scalar("k"), seq.clone());
        map.insert(seq.clone(), scalar("v"));
        assert_eq!(Node::Mapping(map).to_string(), "{k:[a,b],[a,b]:v}");

        let tagged = Node::Tag(Tagged::new("str".into(), scalar("x")));
        assert_eq!(tagged.to_string(), "x");
        assert_eq!(Node::Comment(Comment::new("# c".into())).to_string(), "# c");
        assert_eq!(Node::Sequence(Sequence::default()).to_string(), "[]");
        assert_eq!(Node::Mapping(Mapping::default()).to_string(), "{}");
    }

    #[test]
    fn test_mapping_get() {
        let mut map = Mapping::default();
        map.insert(scalar("a"), scalar("1"));
        map.insert(scalar("a"), scalar("2"));
        let mut key = Sequence::default();
        key.push(scalar("x"));
        map.insert(Rc::new(Node::Sequence(key)), scalar("3"));

        assert_eq!(map.get("a").and_then(|n| n.as_str()), Some("1"));
        assert_eq!(map.get("[x]").and_then(|n| n.as_str()), Some("3"));
        assert!(map.get("b").is_none());
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.keys().map(ToString::to_string).collect::<Vec<_>>(),
            ["a", "a", "[x]"]
        );
    }

    #[test]
    fn test_untagged() {
        let inner = Rc::new(Node::Tag(Tagged::new("b".into(), scalar("x"))));
        let outer = Node::Tag(Tagged::new("a".into(), inner));
        assert_eq!(outer.tag(), Some("a"));
        assert_eq!(outer.untagged().as_str(), Some("x"));
        assert!(outer.as_str().is_none());
    }

    #[test]
    fn test_document() {
        assert!(Document::new(vec![]).is_none());
        let doc = Document::new(vec![scalar("a"), scalar("b")]).unwrap();
        assert_eq!(doc.root().as_str(), Some("a"));
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.to_string(), "[a,b]");
    }
}
