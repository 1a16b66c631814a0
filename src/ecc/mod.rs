//! The ecc module provides the optional error protection layer applied to the huffman bitstream.
//!
//! Only the Hamming (7,4) code is used: it expands the stream by 7/4 and corrects any single flipped
//! bit per 7 bit block.
//!

pub mod hamming;
