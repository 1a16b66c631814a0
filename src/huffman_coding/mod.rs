//! The huffman module turns a frequency table into a prefix-code tree, derives the code for every
//! symbol, and walks the tree to decode.
//!
//! The tree is never stored. Encoder and decoder each rebuild it from the same frequency table, so
//! the merge order must be fully deterministic: lower weight first, a leaf before an internal node
//! of equal weight, then the smaller symbol (for internal nodes, the symbol of the leftmost leaf).
//!
//! Building and walking a tree is inherently sequential and does not benefit from multithreading.
//!

pub mod code_table;
pub mod huffman;
