use hufham::compression::compress::compress_file;
use hufham::compression::decompress::{decompress_container, decompress_file};
use hufham::tools::cli::{HufOpts, Mode};
use hufham::tools::container::{read_container, write_container};
use hufham::{compress, decompress, CodecError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn samples() -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut out = vec![
        b"AAAB".to_vec(),
        b"ab".to_vec(),
        b"hello\nworld, hello again\n".to_vec(),
        (0..=255_u8).collect(),
        vec![0_u8; 3],
    ];
    for len in [1_usize, 2, 7, 64, 1000, 70_000] {
        // Skewed alphabet so the tree is unbalanced.
        out.push((0..len).map(|_| (rng.gen::<u8>() % 17) * (rng.gen::<u8>() % 3)).collect());
        out.push((0..len).map(|_| rng.gen::<u8>()).collect());
    }
    out
}

fn through_container(data: &[u8], ecc: bool) -> Vec<u8> {
    let container = compress(data, ecc).unwrap();
    let mut file = Vec::new();
    write_container(&container, &mut file).unwrap();
    let parsed = read_container(&file).unwrap();
    assert_eq!(parsed, container);
    decompress_container(&parsed).unwrap().0
}

#[test]
fn round_trip_plain_test() {
    for data in samples() {
        let c = compress(&data, false).unwrap();
        let out = decompress(&c.frequencies, c.original_bits, c.encoded_bits, &c.payload, false);
        assert_eq!(out.unwrap(), data);
        assert_eq!(through_container(&data, false), data);
    }
}

#[test]
fn round_trip_hamming_test() {
    for data in samples() {
        let c = compress(&data, true).unwrap();
        let out = decompress(&c.frequencies, c.original_bits, c.encoded_bits, &c.payload, true);
        assert_eq!(out.unwrap(), data);
        assert_eq!(through_container(&data, true), data);
    }
}

#[test]
fn empty_round_trip_test() {
    for ecc in [false, true] {
        assert!(through_container(&[], ecc).is_empty());
    }
}

#[test]
fn single_symbol_round_trip_test() {
    for count in [1_usize, 2, 9, 12_345] {
        let data = vec![b'\n'; count];
        for ecc in [false, true] {
            assert_eq!(through_container(&data, ecc), data);
        }
    }
}

#[test]
fn one_flip_per_block_is_corrected_test() {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let c = compress(&data, true).unwrap();
    let mut payload = c.payload.clone();
    for block in 0..c.encoded_bits / 7 {
        let bit = block * 7 + rng.gen_range(0..7);
        payload[bit / 8] ^= 0x80 >> (bit % 8);
    }
    let out = decompress(&c.frequencies, c.original_bits, c.encoded_bits, &payload, true);
    assert_eq!(out.unwrap(), data);
}

#[test]
fn unprotected_flip_changes_output_test() {
    let data = b"abcdefgh abcdefgh abcdefgh".to_vec();
    let c = compress(&data, false).unwrap();
    let mut payload = c.payload.clone();
    payload[0] ^= 0x80;
    match decompress(&c.frequencies, c.original_bits, c.encoded_bits, &payload, false) {
        Ok(out) => assert_ne!(out, data),
        Err(e) => assert!(matches!(e, CodecError::TreeTraversal { .. })),
    }
}

#[test]
fn deterministic_output_test() {
    for data in samples() {
        assert_eq!(compress(&data, true).unwrap(), compress(&data, true).unwrap());
    }
}

#[test]
fn file_drivers_test() {
    let dir = std::env::temp_dir().join(format!("hufham_it_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("notes.txt");
    let data = b"line one\nline two\n  indented ' quote\n".repeat(50);
    std::fs::write(&input, &data).unwrap();

    let mut opts = HufOpts::new(&input.to_string_lossy());
    opts.hamming = true;
    compress_file(&opts).unwrap();
    let packed = format!("{}.huf", input.to_string_lossy());
    assert!(std::fs::read(&packed).unwrap().starts_with(b"HUFFMAN_HAMMING\n"));

    // The input still exists, so decompressing onto it needs --force.
    let mut opts = HufOpts::new(&packed);
    opts.op_mode = Mode::Unzip;
    assert!(matches!(decompress_file(&opts), Err(CodecError::Io(_))));

    opts.op_mode = Mode::Test;
    decompress_file(&opts).unwrap();

    opts.op_mode = Mode::Unzip;
    opts.out_file = Some(dir.join("restored.txt").to_string_lossy().into_owned());
    decompress_file(&opts).unwrap();
    assert_eq!(std::fs::read(dir.join("restored.txt")).unwrap(), data);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn overflowing_header_counts_test() {
    let raw = b"HUFFMAN\na 18446744073709551615\nb 18446744073709551615\n\n1\n1\n\x80";
    assert!(matches!(read_container(raw), Err(CodecError::MalformedContainer(_))));
    let huge = i64::MAX;
    let raw = format!("HUFFMAN\na {0}\nb {0}\nc {0}\n\n1\n1\n\x7f", huge);
    assert!(matches!(read_container(raw.as_bytes()), Err(CodecError::MalformedContainer(_))));
}

#[test]
fn huge_single_symbol_count_test() {
    let raw = b"HUFFMAN\na 18446744073709551615\n\n0\n0\n";
    let container = read_container(raw).unwrap();
    assert!(matches!(
        decompress_container(&container),
        Err(CodecError::MalformedContainer(_))
    ));
}

#[test]
fn test_mode_rejects_length_mismatch_test() {
    let dir = std::env::temp_dir().join(format!("hufham_len_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    // c = 0, a = 10, b = 11. "101011" decodes to "aab", but the table counts four symbols.
    let packed = dir.join("short.huf");
    let mut raw = b"HUFFMAN\na 1\nb 1\nc 2\n\n6\n6\n".to_vec();
    raw.push(0b1010_1100);
    std::fs::write(&packed, &raw).unwrap();

    let mut opts = HufOpts::new(&packed.to_string_lossy());
    opts.op_mode = Mode::Test;
    assert!(matches!(decompress_file(&opts), Err(CodecError::MalformedContainer(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_file_test() {
    let opts = HufOpts::new("/definitely/not/here.txt");
    assert!(matches!(compress_file(&opts), Err(CodecError::Io(_))));
}
