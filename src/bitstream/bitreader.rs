//! BitReader: unpacks a byte source into logical bits, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. Padding bits in
//! the last byte are indistinguishable from data, so the caller must know how many bits matter.
//!

use log::error;

use crate::error::{CodecError, Result};

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0x80;

#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> bool {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = match self.source.read(&mut self.buffer) {
                Ok(size) => size,
                Err(e) => {
                    error!("Unable to read source data: {}", e);
                    0
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.clear();
                self.cursor = 0;
                return false;
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
        }
        true
    }

    /// Return Option<bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bit(&mut self) -> Option<bool> {
        if self.bit_index == 0 && !self.have_data() {
            return None;
        }
        let bit = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index) != 0;
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Returns up to n bits, fewer if the source runs dry.
    pub fn bits(&mut self, n: usize) -> Vec<bool> {
        let mut result = Vec::with_capacity(n);
        while result.len() < n {
            match self.bit() {
                Some(bit) => result.push(bit),
                None => break,
            }
        }
        result
    }
}

/// Expand packed bytes into exactly `count` logical bits. Fails if the bytes hold fewer bits.
pub fn unpack(bytes: &[u8], count: usize) -> Result<Vec<bool>> {
    let mut br = BitReader::new(bytes);
    let bits = br.bits(count);
    if bits.len() < count {
        return Err(CodecError::MalformedContainer(format!(
            "payload holds {} bits, header claims {}",
            bytes.len() * 8,
            count
        )));
    }
    Ok(bits)
}
