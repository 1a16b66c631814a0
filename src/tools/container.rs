//! Container: text header followed by the packed payload.
//!
//! ```text
//! HUFFMAN | HUFFMAN_HAMMING
//! <symbol> <count>        one line per present symbol, ascending
//! <blank line>
//! <original bits>
//! <encoded bits>
//! <payload bytes...>
//! ```
//!
//! A symbol is written as its literal byte, except newline (`'\n'`) and space (`' '`).

use std::io::Write;

use crate::error::{CodecError, Result};
use crate::tools::freq_count::FrequencyTable;

pub const TAG_PLAIN: &str = "HUFFMAN";
pub const TAG_HAMMING: &str = "HUFFMAN_HAMMING";

const NEWLINE_REPR: &[u8] = b"'\\n'";
const SPACE_REPR: &[u8] = b"' '";

/// Everything needed to rebuild the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub use_error_correction: bool,
    pub frequencies: FrequencyTable,
    /// Bit count before error correction expansion.
    pub original_bits: usize,
    /// Meaningful bits in the payload.
    pub encoded_bits: usize,
    pub payload: Vec<u8>,
}

impl Container {
    pub fn header_tag(&self) -> &'static str {
        if self.use_error_correction {
            TAG_HAMMING
        } else {
            TAG_PLAIN
        }
    }
}

/// Serialize the header and payload.
pub fn write_container<W: Write>(container: &Container, mut out: W) -> Result<()> {
    let mut header = Vec::with_capacity(64 + container.frequencies.distinct() * 8);
    header.extend_from_slice(container.header_tag().as_bytes());
    header.push(b'\n');
    for (sym, count) in container.frequencies.symbols() {
        match sym {
            b'\n' => header.extend_from_slice(NEWLINE_REPR),
            b' ' => header.extend_from_slice(SPACE_REPR),
            other => header.push(other),
        }
        header.push(b' ');
        header.extend_from_slice(count.to_string().as_bytes());
        header.push(b'\n');
    }
    header.push(b'\n');
    header.extend_from_slice(
        format!("{}\n{}\n", container.original_bits, container.encoded_bits).as_bytes(),
    );

    out.write_all(&header)?;
    out.write_all(&container.payload)?;
    out.flush()?;
    Ok(())
}

/// Splits the input into '\n' terminated lines while remembering where the payload starts.
struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lines<'a> {
    fn next_line(&mut self, what: &str) -> Result<&'a [u8]> {
        let data = self.data;
        let rest = &data[self.pos..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.pos += end + 1;
                Ok(&rest[..end])
            }
            None => Err(malformed(format!("missing {}", what))),
        }
    }

    fn remainder(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

fn malformed(reason: String) -> CodecError {
    CodecError::MalformedContainer(reason)
}

fn parse_number<T: std::str::FromStr>(field: &[u8], what: &str) -> Result<T> {
    std::str::from_utf8(field)
        .ok()
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| {
            malformed(format!(
                "{} is not a decimal number: {:?}",
                what,
                String::from_utf8_lossy(field)
            ))
        })
}

/// Parse one `<symbol> <count>` line.
fn parse_symbol_line(line: &[u8]) -> Result<(u8, u64)> {
    let (sym, count) = if let Some(count) = line.strip_prefix(NEWLINE_REPR) {
        (b'\n', count)
    } else if let Some(count) = line.strip_prefix(SPACE_REPR) {
        (b' ', count)
    } else {
        match line.split_first() {
            Some((&sym, count)) => (sym, count),
            None => return Err(malformed("empty symbol line".to_string())),
        }
    };
    let count = count
        .strip_prefix(b" ")
        .ok_or_else(|| malformed(format!("no separator after symbol {:#04x}", sym)))?;
    let count = parse_number::<u64>(count, "symbol count")?;
    if count == 0 {
        return Err(malformed(format!("symbol {:#04x} has a zero count", sym)));
    }
    Ok((sym, count))
}

/// Parse a complete container from bytes.
pub fn read_container(data: &[u8]) -> Result<Container> {
    let mut lines = Lines { data, pos: 0 };

    let use_error_correction = match lines.next_line("header tag")? {
        tag if tag == TAG_PLAIN.as_bytes() => false,
        tag if tag == TAG_HAMMING.as_bytes() => true,
        tag => {
            return Err(malformed(format!(
                "unknown header tag {:?}",
                String::from_utf8_lossy(tag)
            )))
        }
    };

    let mut frequencies = FrequencyTable::new();
    loop {
        let line = lines.next_line("frequency table terminator")?;
        if line.is_empty() {
            break;
        }
        let (sym, count) = parse_symbol_line(line)?;
        if frequencies.get(sym) != 0 {
            return Err(malformed(format!("symbol {:#04x} listed twice", sym)));
        }
        frequencies.set(sym, count);
    }
    if frequencies.total().is_none() {
        return Err(malformed("symbol counts overflow a 64 bit total".to_string()));
    }

    let original_bits = parse_number(lines.next_line("original bit count")?, "original bit count")?;
    let encoded_bits = parse_number(lines.next_line("encoded bit count")?, "encoded bit count")?;
    let payload = lines.remainder().to_vec();

    if !use_error_correction && original_bits > encoded_bits {
        return Err(malformed(format!(
            "original bit count {} exceeds encoded bit count {}",
            original_bits, encoded_bits
        )));
    }
    if payload.len() * 8 < encoded_bits {
        return Err(malformed(format!(
            "payload holds {} bits, header claims {}",
            payload.len() * 8,
            encoded_bits
        )));
    }

    Ok(Container {
        use_error_correction,
        frequencies,
        original_bits,
        encoded_bits,
        payload,
    })
}
