//! Hamming (7,4) error correction over a logical bit string.
//!
//! Every 4 data bits d1..d4 become a 7 bit block laid out as (p1, p2, d1, p3, d2, d3, d4), with
//! parity bits at the 1-indexed positions 1, 2 and 4:
//! - p1 = d1 ^ d2 ^ d4
//! - p2 = d1 ^ d3 ^ d4
//! - p3 = d2 ^ d3 ^ d4
//!
//! On decode the three syndrome bits form the 1-indexed position of a single flipped bit (0 means
//! clean). Two or more flips in the same block are not detected and may be "corrected" into the
//! wrong data.

use log::debug;

/// Data bits per block.
pub const DATA_BITS: usize = 4;
/// Transmitted bits per block.
pub const BLOCK_BITS: usize = 7;

/// Encode 4 data bits into a 7 bit block.
pub fn encode_block(data: [bool; DATA_BITS]) -> [bool; BLOCK_BITS] {
    let [d1, d2, d3, d4] = data;
    let p1 = d1 ^ d2 ^ d4;
    let p2 = d1 ^ d3 ^ d4;
    let p3 = d2 ^ d3 ^ d4;
    [p1, p2, d1, p3, d2, d3, d4]
}

/// Decode a 7 bit block, correcting a single flipped bit. Returns the 4 data bits and the
/// 1-indexed position that was corrected (0 when the syndrome was clean).
pub fn decode_block(block: [bool; BLOCK_BITS]) -> ([bool; DATA_BITS], usize) {
    let [p1, p2, mut d1, p3, mut d2, mut d3, mut d4] = block;
    let s1 = p1 ^ d1 ^ d2 ^ d4;
    let s2 = p2 ^ d1 ^ d3 ^ d4;
    let s3 = p3 ^ d2 ^ d3 ^ d4;
    let position = s1 as usize | (s2 as usize) << 1 | (s3 as usize) << 2;

    // Positions 1, 2 and 4 are parity bits; the data comes through untouched.
    match position {
        3 => d1 = !d1,
        5 => d2 = !d2,
        6 => d3 = !d3,
        7 => d4 = !d4,
        _ => {}
    }
    ([d1, d2, d3, d4], position)
}

/// Zero-pad the bits to a multiple of 4 and encode every 4 bit chunk. Returns the expanded bits
/// and the original (pre-padding) bit count.
pub fn encode_stream(bits: &[bool]) -> (Vec<bool>, usize) {
    let original_bits = bits.len();
    let blocks = original_bits.div_ceil(DATA_BITS);
    let mut out = Vec::with_capacity(blocks * BLOCK_BITS);

    for chunk in bits.chunks(DATA_BITS) {
        let mut data = [false; DATA_BITS];
        data[..chunk.len()].copy_from_slice(chunk);
        out.extend_from_slice(&encode_block(data));
    }
    debug!(
        "Hamming encoded {} bits into {} blocks ({} padding bits).",
        original_bits,
        blocks,
        blocks * DATA_BITS - original_bits
    );
    (out, original_bits)
}

/// Decode every complete 7 bit block and truncate the result to `original_bits`. A trailing
/// incomplete block is dropped.
pub fn decode_stream(bits: &[bool], original_bits: usize) -> Vec<bool> {
    decode_stream_with_report(bits, original_bits).0
}

/// As `decode_stream`, also returning how many blocks had a bit corrected.
pub fn decode_stream_with_report(bits: &[bool], original_bits: usize) -> (Vec<bool>, usize) {
    let mut out = Vec::with_capacity(bits.len() / BLOCK_BITS * DATA_BITS);
    let mut corrected = 0;

    for chunk in bits.chunks_exact(BLOCK_BITS) {
        let mut block = [false; BLOCK_BITS];
        block.copy_from_slice(chunk);
        let (data, position) = decode_block(block);
        if position != 0 {
            corrected += 1;
        }
        out.extend_from_slice(&data);
    }
    if bits.len() % BLOCK_BITS != 0 {
        debug!(
            "Dropped {} trailing bits that do not form a block.",
            bits.len() % BLOCK_BITS
        );
    }
    out.truncate(original_bits);
    (out, corrected)
}
