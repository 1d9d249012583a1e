use std::rc::Rc;

use miette::{bail, Diagnostic, NamedSource, Result, SourceSpan};
use rustyline::{error::ReadlineError, DefaultEditor};
use thiserror::Error;
use yagraph::{Document, Node, NodeRef, ParseError};

/// A REPL to navigate the node graph of a YAML document.
///
/// See [`read_action`] for commands.
fn main() {
    let args: Vec<_> = std::env::args().collect();
    match args.as_slice() {
        [_, filename] => {
            let contents = std::fs::read_to_string(filename).unwrap();
            match yagraph::load(&contents) {
                Ok(docs) => walk(&docs),
                Err(e) => {
                    let report = miette::Error::new(ReadErr::new(filename, contents, e));
                    eprintln!("{report:?}");
                }
            }
        }
        _ => {
            eprintln!("Usage: walk <file.yaml>");
        }
    }
}

fn walk(docs: &[Document]) {
    let Some(first) = docs.first() else {
        eprintln!("No document");
        return;
    };
    let mut doc_idx = 0;
    let mut stack = vec![Frame::top(first)];
    let mut io = DefaultEditor::new().unwrap();

    print(doc_idx, &stack);

    loop {
        let err = match read_action(&mut io) {
            Action::StepIn => step_in(&mut stack, Slot::Value),
            Action::StepInKey => step_in(&mut stack, Slot::Key),
            Action::Next => sibling(&mut stack, 1),
            Action::Prev => sibling(&mut stack, -1),
            Action::Fin => fin(&mut stack),
            Action::Doc(idx) => match docs.get(idx) {
                Some(doc) => {
                    doc_idx = idx;
                    stack = vec![Frame::top(doc)];
                    Ok(())
                }
                None => Err(miette::miette!("There are {} documents", docs.len())),
            },
            Action::Stop => break,
        };

        match err {
            Ok(()) => {
                io.clear_screen().unwrap();
                print(doc_idx, &stack);
            }
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn print(doc_idx: usize, stack: &[Frame]) {
    let path: Vec<_> = stack.iter().skip(1).map(Frame::describe).collect();
    let frame = stack.last().unwrap();
    eprintln!("document {doc_idx} / {}", path.join(" / "));
    eprintln!("  kind:   {}", kind(&frame.node));
    if let Some(tag) = frame.node.tag() {
        eprintln!("  tag:    !{tag}");
    }
    // The frame itself holds one reference.
    if Rc::strong_count(&frame.node) > 2 {
        eprintln!("  shared: yes");
    }
    eprintln!("  value:  {}", frame.node);
}

fn kind(node: &Node) -> &'static str {
    match node.untagged() {
        Node::Scalar(_) => "scalar",
        Node::Sequence(_) => "sequence",
        Node::Mapping(_) => "mapping",
        Node::Tag(_) => unreachable!(),
        Node::Comment(_) => "comment",
        Node::Document(_) => "document",
    }
}

/// Return the children of a collection, looking through tags.
fn children(node: &Node, slot: Slot) -> Option<Vec<NodeRef>> {
    match (node.untagged(), slot) {
        (Node::Sequence(seq), _) => Some(seq.iter().cloned().collect()),
        (Node::Document(doc), _) => Some(doc.iter().cloned().collect()),
        (Node::Mapping(map), Slot::Key) => Some(map.keys().cloned().collect()),
        (Node::Mapping(map), Slot::Value) => Some(map.values().cloned().collect()),
        _ => None,
    }
}

fn step_in(stack: &mut Vec<Frame>, slot: Slot) -> Result<()> {
    let frame = stack.last().unwrap();
    let Some(children) = children(&frame.node, slot) else {
        bail!("Not in a mapping or a sequence");
    };
    let Some(first) = children.first() else {
        bail!("Collection is empty");
    };
    let node = first.clone();
    stack.push(Frame { node, idx: 0, slot });
    Ok(())
}

fn sibling(stack: &mut Vec<Frame>, offset: isize) -> Result<()> {
    if stack.len() == 1 {
        bail!("Can't move from top-level");
    }
    let frame = stack.pop().unwrap();
    let parent = stack.last().unwrap();
    let siblings = children(&parent.node, frame.slot).unwrap();
    match frame.idx.checked_add_signed(offset) {
        Some(idx) if idx < siblings.len() => {
            stack.push(Frame {
                node: siblings[idx].clone(),
                idx,
                slot: frame.slot,
            });
            Ok(())
        }
        _ => {
            stack.push(frame);
            bail!("Reached the edge of the collection");
        }
    }
}

fn fin(stack: &mut Vec<Frame>) -> Result<()> {
    if stack.len() > 1 {
        stack.pop();
        Ok(())
    } else {
        bail!("Already at the top-level");
    }
}

/// A node being visited, and where it sits in its parent.
struct Frame {
    node: NodeRef,
    idx: usize,
    slot: Slot,
}

impl Frame {
    fn top(doc: &Document) -> Self {
        Frame {
            node: Rc::new(Node::Document(doc.clone())),
            idx: 0,
            slot: Slot::Value,
        }
    }

    fn describe(&self) -> String {
        match self.slot {
            Slot::Key => format!("key {}", self.idx),
            Slot::Value => format!("{}", self.idx),
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Slot {
    Key,
    Value,
}

#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
#[diagnostic()]
pub struct ReadErr {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

impl ReadErr {
    fn new(filename: &str, contents: String, error: ParseError) -> Self {
        // Spans count characters, miette wants bytes.
        let span = error.span();
        let byte_at = |index: usize| {
            contents
                .char_indices()
                .nth(index)
                .map_or(contents.len(), |(byte, _)| byte)
        };
        let start = byte_at(span.start.index());
        let end = byte_at(span.end.index()).max(start);
        ReadErr {
            message: error.to_string(),
            src: NamedSource::new(filename, contents),
            span: (start, end - start).into(),
        }
    }
}

enum Action {
    StepIn,
    StepInKey,
    Next,
    Prev,
    Fin,
    Doc(usize),
    Stop,
}

fn read_action(io: &mut DefaultEditor) -> Action {
    loop {
        match io.readline(">> ") {
            Ok(line) => match line.split_whitespace().collect::<Vec<_>>().as_slice() {
                ["q" | "quit"] => return Action::Stop,
                ["n" | "next"] => return Action::Next,
                ["p" | "prev"] => return Action::Prev,
                ["s" | "si" | "i" | "sv"] => return Action::StepIn,
                ["sk"] => return Action::StepInKey,
                ["fin" | "out" | "up"] => return Action::Fin,
                ["doc" | "d", idx] => {
                    if let Ok(idx) = idx.parse() {
                        return Action::Doc(idx);
                    }
                }
                _ => {}
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Action::Stop,
            Err(e) => panic!("{e:?}"),
        }
    }
}
