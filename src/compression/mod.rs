//! The compression module manages both directions of the hufham pipeline.
//!
//! Compression happens in the following steps:
//! - Frequency count: tally every byte value of the input.
//! - Tree build: merge the symbols into a prefix-code tree with a fixed tie-break order.
//! - Code table: record the root-to-leaf path of every symbol.
//! - Encode: concatenate the code of each input byte.
//! - Hamming (optional): expand every 4 bits into a 7 bit block that survives one flipped bit.
//! - Pack: put the bits into bytes, most significant bit first.
//!
//! Decompression is the mirror image: unpack, optionally Hamming decode, rebuild the same tree
//! from the stored frequency table, and walk it.
//!
//! Empty input and single-symbol input never produce payload bits. The frequency table alone
//! carries what is needed to rebuild them.
//!

pub mod compress;
pub mod decompress;
