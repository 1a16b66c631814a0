//! hufham: a Huffman file compressor with optional Hamming (7,4) error protection.
//!
//! Version 0.1.0
//!
//! Compresses a byte stream with a frequency-derived prefix code and, on request, protects the
//! resulting bitstream so that any single flipped bit in each 7 bit block is corrected on decode.
//! Both directions are pure functions: `compress` and `decompress` hold no state between calls,
//! and the tree built for a call lives only as long as that call.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> hufham -z -e notes.txt`
//!
//! This will compress the file, with error protection, and create the file notes.txt.huf.
//! `hufham -d notes.txt.huf` restores notes.txt.
//!
pub mod bitstream;
pub mod compression;
pub mod ecc;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::{decompress, decompress_with_report};
pub use error::{CodecError, Result};
pub use tools::container::Container;
pub use tools::freq_count::FrequencyTable;
