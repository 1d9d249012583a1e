//! Encoding detection and decoding. Available only with the `encoding` feature.

use std::{borrow::Cow, ops::ControlFlow};

use encoding_rs::{Decoder, DecoderResult, Encoding};

use crate::{load, Document, LoadError};

/// The signature of the function to call when using [`DecodingTrap::Call`].
///
/// The arguments are as follows:
///  * `malformation_length`: The length of the sequence the decoder failed to decode.
///  * `bytes_read_after_malformation`: The number of lookahead bytes the decoder consumed after
///    the malformation.
///  * `input_at_malformation`: The input, starting at the malformation.
///  * `output`: The text decoded so far.
///
/// The function may write a replacement into `output`. It returns [`ControlFlow::Continue`] to
/// resume decoding, or [`ControlFlow::Break`] with an optional message to abort.
pub type DecodingTrapFn = fn(
    malformation_length: u8,
    bytes_read_after_malformation: u8,
    input_at_malformation: &[u8],
    output: &mut String,
) -> ControlFlow<Cow<'static, str>>;

/// What [`YamlDecoder`] does with malformed input.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecodingTrap {
    /// Drop the offending bytes.
    Ignore,
    /// Fail with [`LoadError::Decode`].
    Strict,
    /// Replace the offending bytes with U+FFFD.
    Replace,
    /// Call a user-supplied function.
    Call(DecodingTrapFn),
}

/// Decodes a byte stream before loading its documents.
///
/// The encoding is detected from a BOM (UTF-8, UTF-16LE or UTF-16BE) or, without one, from the
/// position of null bytes in the first two bytes of the input, which must be an ASCII character.
///
/// ```
/// use yagraph::{DecodingTrap, YamlDecoder};
///
/// let bytes = b"a\xa9: 1\nb: 2\n";
/// let docs = YamlDecoder::read(&bytes[..])
///     .encoding_trap(DecodingTrap::Ignore)
///     .decode()
///     .unwrap();
/// assert_eq!(docs[0].root().get("b").unwrap().as_str(), Some("2"));
/// ```
pub struct YamlDecoder<T: std::io::Read> {
    source: T,
    trap: DecodingTrap,
}

impl<T: std::io::Read> YamlDecoder<T> {
    /// Create a decoder over the given source. Malformed input is an error by default.
    pub fn read(source: T) -> YamlDecoder<T> {
        YamlDecoder {
            source,
            trap: DecodingTrap::Strict,
        }
    }

    /// Set the behavior of the decoder when the input is malformed.
    pub fn encoding_trap(&mut self, trap: DecodingTrap) -> &mut Self {
        self.trap = trap;
        self
    }

    /// Read the whole source and decode it to a string.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if reading fails and [`LoadError::Decode`] if the input is
    /// malformed and the trap says so.
    pub fn decode_to_string(&mut self) -> Result<String, LoadError> {
        let mut buffer = Vec::new();
        self.source.read_to_end(&mut buffer)?;

        let encoding = Encoding::for_bom(&buffer)
            .map_or_else(|| detect_utf16_endianness(&buffer), |(encoding, _)| encoding);
        debug_print!("decoding input as {}", encoding.name());
        let mut decoder = encoding.new_decoder();
        let mut output = String::new();
        decode_loop(&buffer, &mut output, &mut decoder, self.trap)?;
        Ok(output)
    }

    /// Read, decode and load the documents of the source.
    ///
    /// # Errors
    /// Returns a [`LoadError`] if reading or decoding fails, or if the input is malformed.
    pub fn decode(&mut self) -> Result<Vec<Document>, LoadError> {
        let text = self.decode_to_string()?;
        Ok(load(&text)?)
    }
}

/// Run [`Decoder::decode_to_string_without_replacement`] until the input is exhausted, growing
/// `output` as needed and handing malformations to `trap`.
fn decode_loop(
    input: &[u8],
    output: &mut String,
    decoder: &mut Decoder,
    trap: DecodingTrap,
) -> Result<(), LoadError> {
    output.reserve(input.len());
    let mut total_read = 0;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&input[total_read..], output, true);
        total_read += read;
        match result {
            DecoderResult::InputEmpty => return Ok(()),
            // Expect about 10% of the bytes to double in size as UTF-8.
            DecoderResult::OutputFull => output.reserve(input.len() / 10 + 4),
            DecoderResult::Malformed(length, after) => {
                let at = total_read - (usize::from(length) + usize::from(after));
                let malformation = || {
                    Cow::Owned(format!(
                        "invalid character sequence at byte {at}: {:?}",
                        &input[at..at + usize::from(length)]
                    ))
                };
                match trap {
                    DecodingTrap::Ignore => {}
                    DecodingTrap::Replace => output.push('\u{FFFD}'),
                    DecodingTrap::Strict => return Err(LoadError::Decode(malformation())),
                    DecodingTrap::Call(callback) => {
                        if let ControlFlow::Break(error) =
                            callback(length, after, &input[at..], output)
                        {
                            let error = if error.is_empty() {
                                malformation()
                            } else {
                                error
                            };
                            return Err(LoadError::Decode(error));
                        }
                    }
                }
            }
        }
    }
}

/// Guess the encoding of BOM-less input.
///
/// The first character of a document is ASCII, so a null byte among the first two bytes tells
/// UTF-16 and its endianness apart from UTF-8.
fn detect_utf16_endianness(b: &[u8]) -> &'static Encoding {
    match b {
        [0, c, ..] if *c != 0 => encoding_rs::UTF_16BE,
        [c, 0, ..] if *c != 0 => encoding_rs::UTF_16LE,
        _ => encoding_rs::UTF_8,
    }
}
