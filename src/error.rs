//! Error types for the hufham codec.
//!
//! Tree and container failures are surfaced to the caller, never absorbed. Multi-bit damage inside
//! a single Hamming block is not detectable by a (7,4) code and is therefore not an error here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Header, frequency table or bit counts could not be parsed.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The bit string walked off the tree, or ended part way through a code.
    #[error("tree traversal failed at bit {position}")]
    TreeTraversal { position: usize },

    /// A tree was requested from a table with no symbols.
    #[error("empty frequency table: cannot build a tree")]
    EmptyFrequencyTable,

    /// A symbol to encode has no code in the table.
    #[error("symbol {0:#04x} has no code")]
    MissingSymbol(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
