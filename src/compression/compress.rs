use std::fs;

use log::{debug, info, warn};

use crate::bitstream::bitpacker::pack;
use crate::ecc::hamming;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::cli::HufOpts;
use crate::tools::container::{write_container, Container};
use crate::tools::data_out::open_output;
use crate::tools::freq_count::{freqs, FrequencyTable};

/// Compress a byte slice. Returns the container contents: frequency table, bit counts and packed
/// payload. Neither empty nor single-symbol input produces any payload bits.
pub fn compress(data: &[u8], use_error_correction: bool) -> Result<Container> {
    let frequencies = freqs(data);

    // Empty input: no tree, nothing to encode.
    if frequencies.is_empty() {
        warn!("Input is empty; writing an empty container.");
        return Ok(empty_container(frequencies, use_error_correction));
    }

    let tree = HuffmanTree::build(&frequencies)?;
    // One distinct symbol: its code is empty, so the repeat count lives in the frequency table.
    if tree.is_single_leaf() {
        info!(
            "Single symbol input ({} bytes); no payload bits needed.",
            data.len()
        );
        return Ok(empty_container(frequencies, use_error_correction));
    }

    let codes = CodeTable::from_tree(&tree);
    let bits = codes.encode(data)?;
    debug!("Huffman coded {} bytes into {} bits.", data.len(), bits.len());

    let (bits, original_bits) = if use_error_correction {
        hamming::encode_stream(&bits)
    } else {
        let len = bits.len();
        (bits, len)
    };
    let encoded_bits = bits.len();
    let payload = pack(&bits);

    info!(
        "Compressed {} bytes ({} symbols) into {} payload bytes. Original bits {}, encoded bits {}{}.",
        data.len(),
        codes.len(),
        payload.len(),
        original_bits,
        encoded_bits,
        if use_error_correction {
            ", Hamming protected"
        } else {
            ""
        }
    );

    Ok(Container {
        use_error_correction,
        frequencies,
        original_bits,
        encoded_bits,
        payload,
    })
}

fn empty_container(frequencies: FrequencyTable, use_error_correction: bool) -> Container {
    Container {
        use_error_correction,
        frequencies,
        original_bits: 0,
        encoded_bits: 0,
        payload: Vec::new(),
    }
}

/// Compress the input file defined in opts <HufOpts> and write the container.
pub fn compress_file(opts: &HufOpts) -> Result<()> {
    let data = fs::read(&opts.file)?;
    info!("Read {} bytes from {}.", data.len(), opts.file);

    let container = compress(&data, opts.hamming)?;
    let out = open_output(opts)?;
    write_container(&container, out)?;
    Ok(())
}
