//! Huffman integration tests.

use streamcodec_core::{Codec, CodecError, round_trip};
use streamcodec_huffman::{
    CodeTree, HuffmanCodec, HuffmanReader, HuffmanWriter, StaticCodes, SymbolTable, decode, encode,
};
use std::io::{Read, Write};

const SAMPLES: &[&str] = &[
    "Hello, World!\r\n안녕하세요!",
    "BABAABAAA",
    "AAAAAAABBCCCDEEEEFFFFFFGHIIJ",
    "000.000,000.001,000.002,000.003,000.004,000.005,000.006,000.007",
];

fn pseudo_random(size: usize, spread: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push(((seed >> 32) as u8) % spread);
    }
    data
}

#[test]
fn test_roundtrip_samples() {
    for sample in SAMPLES {
        let data = sample.as_bytes();
        let encoded = encode(data).expect("encode failed");
        let decoded =
            decode(&encoded.data, &encoded.table, encoded.symbol_count).expect("decode failed");
        assert_eq!(decoded, data, "sample {sample:?}");
    }
}

#[test]
fn test_roundtrip_through_codec_trait() {
    let mut codec = HuffmanCodec::new();
    for sample in SAMPLES {
        let result = round_trip(&mut codec, sample.as_bytes()).unwrap();
        assert!(result.matches(sample.as_bytes()));
        assert_eq!(result.codec, "Huffman");
    }
}

#[test]
fn test_roundtrip_pseudo_random() {
    for spread in [2u8, 17, 255] {
        let data = pseudo_random(20_000, spread);
        let encoded = encode(&data).unwrap();
        assert_eq!(
            decode(&encoded.data, &encoded.table, encoded.symbol_count).unwrap(),
            data
        );
    }
}

#[test]
fn test_symbol_table_preserves_codes() {
    for sample in SAMPLES {
        let tree = CodeTree::from_data(sample.as_bytes()).unwrap();
        let rebuilt = CodeTree::from_symbol_table(&tree.to_symbol_table()).unwrap();
        assert_eq!(rebuilt.to_code_table(), tree.to_code_table());
    }

    let tree = CodeTree::from_data(&pseudo_random(4096, 255)).unwrap();
    let rebuilt = CodeTree::from_symbol_table(&tree.to_symbol_table()).unwrap();
    assert_eq!(rebuilt.to_code_table(), tree.to_code_table());
}

#[test]
fn test_codes_are_prefix_free() {
    let tree = CodeTree::from_data(&pseudo_random(4096, 100)).unwrap();
    let table = tree.to_code_table();
    let codes: Vec<_> = table.iter().collect();

    for (i, &(a, code_a)) in codes.iter().enumerate() {
        for &(b, code_b) in &codes[i + 1..] {
            assert!(
                !code_a.is_prefix_of(&code_b) && !code_b.is_prefix_of(&code_a),
                "{a:#04x} ({code_a}) and {b:#04x} ({code_b}) overlap"
            );
        }
    }
}

#[test]
fn test_single_symbol_input() {
    let data = vec![b'q'; 100];
    let encoded = encode(&data).unwrap();
    assert_eq!(encoded.table.levels(), &[vec![b'q']]);
    assert_eq!(encoded.data.len(), 13);
    assert_eq!(decode(&encoded.data, &encoded.table, 100).unwrap(), data);
}

#[test]
fn test_mismatched_table_is_detected() {
    // The stream starts with a 1 bit, which the foreign table has no code for
    let encoded = encode(b"abbbbbbbbbbbbbbbbcd").unwrap();
    let foreign = SymbolTable::new(vec![vec![b'x']]);
    let err = decode(&encoded.data, &foreign, encoded.symbol_count).unwrap_err();
    assert!(matches!(err, CodecError::TableMismatch { .. }));
}

#[test]
fn test_unsupported_symbol_through_write() {
    let tree = CodeTree::from_data(b"abc").unwrap();
    let mut writer = HuffmanWriter::new(Vec::new(), StaticCodes::new(tree.to_code_table()));
    let err = writer.write_all(b"abd").unwrap_err();
    let err = CodecError::from(err);
    assert!(matches!(err, CodecError::UnsupportedSymbol { symbol: b'd' }));
}

#[test]
fn test_malformed_table_rejected_by_codec() {
    let table = SymbolTable::new(vec![vec![1, 2, 3, 4, 5]]);
    assert!(matches!(
        HuffmanCodec::from_symbol_table(&table, None),
        Err(CodecError::MalformedTable { .. })
    ));
}

#[test]
fn test_streaming_reader_counts() {
    let data = b"AAAAAAABBCCCDEEEEFFFFFFGHIIJ";
    let tree = CodeTree::from_data(data).unwrap();
    let codes = StaticCodes::new(tree.to_code_table());

    let mut writer = HuffmanWriter::new(Vec::new(), codes.clone());
    writer.write_all(data).unwrap();
    let out_bits = writer.counters().out_bits;
    let encoded = writer.finish().unwrap();
    assert_eq!(encoded.len() as u64, out_bits.div_ceil(8));

    let mut reader = HuffmanReader::with_symbol_limit(encoded.as_slice(), codes, data.len() as u64);
    let mut decoded = Vec::new();
    reader.read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, data);
    assert_eq!(reader.counters().in_bits, out_bits);
}

#[test]
fn test_codec_without_symbol_count_decodes_padding() {
    // "a" is the one-bit code "0", so zero padding decodes as extra symbols
    let encoded = encode(b"a").unwrap();
    let mut codec = HuffmanCodec::from_symbol_table(&encoded.table, None).unwrap();
    assert_eq!(codec.decompress_all(&encoded.data).unwrap(), b"aaaaaaaa");
}

#[test]
fn test_table_with_two_top_level_nodes() {
    let table = SymbolTable::new(vec![vec![b'x', b'y', b'z']]);
    let tree = CodeTree::from_symbol_table(&table).unwrap();

    let mut writer = HuffmanWriter::new(Vec::new(), StaticCodes::new(tree.to_code_table()));
    writer.write_all(b"xyzzyx").unwrap();
    let encoded = writer.finish().unwrap();
    // x=00 y=01 z=10
    assert_eq!(encoded, [0b0001_1010, 0b0100_0000]);

    assert_eq!(decode(&encoded, &table, 6).unwrap(), b"xyzzyx");
}
