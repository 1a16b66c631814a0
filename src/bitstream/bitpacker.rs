use log::error;

/// Packs logical bits into bytes, most significant bit first. Call flush() before reading the
/// output or the last partial byte stays in the queue.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with the given output buffer capacity.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.write_stream();
    }

    /// Puts a run of bits on the stream, first bit first.
    pub fn out_bits(&mut self, bits: &[bool]) {
        bits.iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Flushes the remaining bits (1-7) from the buffer, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }
}

/// Pack a logical bit string into bytes. The final partial byte is zero padded; the caller keeps
/// the exact bit count.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut bp = BitPacker::new(bits.len().div_ceil(8));
    bp.out_bits(bits);
    bp.flush();
    bp.output
}
