use std::fs;
use std::io::Write;

use log::{debug, error, info, warn};

use crate::bitstream::bitreader::unpack;
use crate::ecc::hamming;
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::{HuffmanTree, NodeData};
use crate::tools::cli::{HufOpts, Mode};
use crate::tools::container::{read_container, Container};
use crate::tools::data_out::open_output;
use crate::tools::freq_count::FrequencyTable;

/// Rebuild the original bytes from a frequency table, the two bit counts and the packed payload.
pub fn decompress(
    frequencies: &FrequencyTable,
    original_bits: usize,
    encoded_bits: usize,
    payload: &[u8],
    use_error_correction: bool,
) -> Result<Vec<u8>> {
    decompress_with_report(
        frequencies,
        original_bits,
        encoded_bits,
        payload,
        use_error_correction,
    )
    .map(|(data, _)| data)
}

/// As `decompress`, also returning how many Hamming blocks needed a single bit correction.
pub fn decompress_with_report(
    frequencies: &FrequencyTable,
    original_bits: usize,
    encoded_bits: usize,
    payload: &[u8],
    use_error_correction: bool,
) -> Result<(Vec<u8>, usize)> {
    if frequencies.is_empty() {
        return Ok((Vec::new(), 0));
    }

    let total = frequencies.total().ok_or_else(|| {
        CodecError::MalformedContainer("symbol counts overflow a 64 bit total".to_string())
    })?;
    let tree = HuffmanTree::build(frequencies)?;
    // Single symbol: the codes were empty, so repeat the symbol as often as it was counted.
    if let NodeData::Leaf(sym) = tree.root().node_data {
        return Ok((repeat_symbol(sym, total)?, 0));
    }
    // Every code is at least one bit long.
    if total > original_bits as u64 {
        return Err(CodecError::MalformedContainer(format!(
            "table counts {} symbols but only {} original bits are claimed",
            total, original_bits
        )));
    }

    let mut bits = unpack(payload, encoded_bits)?;
    let mut corrected = 0;
    if use_error_correction {
        let (decoded, fixed) = hamming::decode_stream_with_report(&bits, original_bits);
        bits = decoded;
        corrected = fixed;
    } else {
        bits.truncate(original_bits);
    }
    if bits.len() < original_bits {
        return Err(CodecError::MalformedContainer(format!(
            "only {} of {} original bits are present",
            bits.len(),
            original_bits
        )));
    }

    let data = tree.decode(&bits)?;
    if data.len() as u64 != total {
        warn!(
            "Decoded {} bytes but the frequency table counts {}.",
            data.len(),
            total
        );
    }
    Ok((data, corrected))
}

/// Output for a single-symbol table. The allocation is checked so an absurd count is an error.
fn repeat_symbol(sym: u8, count: u64) -> Result<Vec<u8>> {
    let too_large =
        || CodecError::MalformedContainer(format!("repeat count {} is too large", count));
    let count = usize::try_from(count).map_err(|_| too_large())?;
    let mut out = Vec::new();
    out.try_reserve_exact(count).map_err(|_| too_large())?;
    out.resize(count, sym);
    debug!("Single symbol {:#04x} repeated {} times.", sym, count);
    Ok(out)
}

/// Decompress a parsed container.
pub fn decompress_container(container: &Container) -> Result<(Vec<u8>, usize)> {
    decompress_with_report(
        &container.frequencies,
        container.original_bits,
        container.encoded_bits,
        &container.payload,
        container.use_error_correction,
    )
}

/// Decompress (or, in test mode, just verify) the file named in opts (HufOpts).
pub fn decompress_file(opts: &HufOpts) -> Result<()> {
    let raw = fs::read(&opts.file)?;
    let container = match read_container(&raw) {
        Ok(container) => container,
        Err(e) => {
            error!("Fatal error: {} is not a valid hufham file.", opts.file);
            return Err(e);
        }
    };
    info!(
        "Found a valid {} header with {} symbols.",
        container.header_tag(),
        container.frequencies.distinct()
    );

    let (data, corrected) = decompress_container(&container)?;
    if corrected > 0 {
        info!("Corrected single bit errors in {} Hamming blocks.", corrected);
    }

    if opts.op_mode == Mode::Test {
        // The table total is the only length check the container carries.
        if Some(data.len() as u64) != container.frequencies.total() {
            error!(
                "{}: decoded {} bytes, the frequency table expects a different count.",
                opts.file,
                data.len()
            );
            return Err(CodecError::MalformedContainer(format!(
                "decoded {} bytes, frequency table disagrees",
                data.len()
            )));
        }
        info!("{}: ok, {} bytes.", opts.file, data.len());
        return Ok(());
    }
    let mut out = open_output(opts)?;
    out.write_all(&data)?;
    out.flush()?;
    info!("Wrote {} bytes.", data.len());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{decompress, decompress_with_report};
    use crate::compression::compress::compress;
    use crate::error::CodecError;
    use crate::tools::freq_count::{freqs, FrequencyTable};

    #[test]
    fn scenario_test() {
        for ecc in [false, true] {
            let c = compress(b"AAAB", ecc).unwrap();
            let out = decompress(&c.frequencies, c.original_bits, c.encoded_bits, &c.payload, ecc);
            assert_eq!(out.unwrap(), b"AAAB");
        }
    }

    #[test]
    fn corrupted_scenario_test() {
        // Block 0010110 with position 3 flipped -> 0000110, still "AAAB".
        let c = compress(b"AAAB", true).unwrap();
        let mut payload = c.payload.clone();
        payload[0] ^= 0b0010_0000;
        let (out, corrected) =
            decompress_with_report(&c.frequencies, c.original_bits, c.encoded_bits, &payload, true)
                .unwrap();
        assert_eq!(out, b"AAAB");
        assert_eq!(corrected, 1);
    }

    #[test]
    fn empty_table_test() {
        let out = decompress(&FrequencyTable::new(), 0, 0, &[], false).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn single_symbol_repeat_test() {
        let mut table = FrequencyTable::new();
        table.set(b'x', 5);
        assert_eq!(decompress(&table, 0, 0, &[], true).unwrap(), b"xxxxx");
    }

    #[test]
    fn short_payload_test() {
        let table = freqs(b"AAAB");
        assert!(matches!(
            decompress(&table, 4, 12, &[0xe0], false),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn missing_hamming_blocks_test() {
        // 10 original bits need 3 blocks; only 14 bits (2 blocks) are claimed.
        let table = freqs(b"AAAB");
        assert!(matches!(
            decompress(&table, 10, 14, &[0, 0], true),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn huge_repeat_count_test() {
        let mut table = FrequencyTable::new();
        table.set(b'x', u64::MAX);
        assert!(matches!(
            decompress(&table, 0, 0, &[], false),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn overflowing_table_test() {
        let mut table = FrequencyTable::new();
        table.set(b'a', u64::MAX);
        table.set(b'b', u64::MAX);
        assert!(matches!(
            decompress(&table, 1, 1, &[0x80], false),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn more_symbols_than_bits_test() {
        // Two symbols need at least one bit each; 1000 of them cannot fit in 4 bits.
        let mut table = FrequencyTable::new();
        table.set(b'a', 500);
        table.set(b'b', 500);
        assert!(matches!(
            decompress(&table, 4, 4, &[0xf0], false),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn traversal_failure_test() {
        // a = 10, b = 11, c = 0. "0000" is cccc, then a lone "1" ends half way down the tree.
        let mut table = FrequencyTable::new();
        table.set(b'a', 1);
        table.set(b'b', 1);
        table.set(b'c', 2);
        assert!(matches!(
            decompress(&table, 5, 5, &[0b0000_1000], false),
            Err(CodecError::TreeTraversal { position: 5 })
        ));
    }
}
