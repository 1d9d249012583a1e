//! Entry points loading documents from text and files.

use std::{borrow::Cow, path::Path, sync::Arc};

use crate::{Document, ParseError, Reader};

/// An error that occurred while loading documents from a file or a byte stream.
#[derive(Clone, Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum LoadError {
    /// An I/O error.
    #[error(transparent)]
    Io(Arc<std::io::Error>),
    /// The input is not well-formed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A decoding error (e.g.: Invalid UTF-8).
    #[error("{0}")]
    Decode(Cow<'static, str>),
}

impl From<std::io::Error> for LoadError {
    fn from(error: std::io::Error) -> Self {
        LoadError::Io(Arc::new(error))
    }
}

/// Load the documents of a string.
///
/// Documents are split on `---`; documents with no node are dropped.
///
/// ```
/// let docs = yagraph::load("- Mark McGwire\n- Sammy Sosa\n---\n- Chicago Cubs").unwrap();
/// assert_eq!(docs.len(), 2);
/// assert_eq!(docs[0].root().to_string(), "[Mark McGwire,Sammy Sosa]");
/// ```
///
/// # Errors
/// Returns a [`ParseError`] if the input is malformed.
pub fn load(text: &str) -> Result<Vec<Document>, ParseError> {
    Reader::new_from_str(text).load()
}

/// Load the documents of a file.
///
/// With the `encoding` feature, the encoding of the file is detected from its first bytes (see
/// [`YamlDecoder`]) and malformed sequences are errors. Otherwise, the file must be UTF-8.
///
/// [`YamlDecoder`]: crate::YamlDecoder
///
/// # Errors
/// Returns a [`LoadError`] if the file cannot be read or decoded, or if it is malformed.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Document>, LoadError> {
    let file = std::fs::File::open(path)?;
    read_file(file)
}

#[cfg(feature = "encoding")]
fn read_file(file: std::fs::File) -> Result<Vec<Document>, LoadError> {
    crate::YamlDecoder::read(file).decode()
}

#[cfg(not(feature = "encoding"))]
fn read_file(mut file: std::fs::File) -> Result<Vec<Document>, LoadError> {
    use std::io::Read;

    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(load(&text)?)
}
