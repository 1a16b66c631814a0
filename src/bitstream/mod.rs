//! The bitstream module forms the packing layer between logical bit strings and stored bytes.
//!
//! Bits are placed most significant bit first. The last byte is padded with zeros in its low bits,
//! and nothing in the packed bytes records how many of those bits are padding: the bit count
//! travels separately in the container header.
//!
pub mod bitpacker;
pub mod bitreader;
