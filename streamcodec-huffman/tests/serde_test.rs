//! Symbol table serialization tests.

use streamcodec_huffman::{CodeTree, SymbolTable, encode};

#[test]
fn test_symbol_table_json() {
    let encoded = encode(b"aaaabbcd").unwrap();
    let json = serde_json::to_string(&encoded.table).unwrap();
    assert_eq!(json, "[[97],[98],[100,99]]");

    let parsed: SymbolTable = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, encoded.table);
}

#[test]
fn test_parsed_table_rebuilds_tree() {
    let parsed: SymbolTable = serde_json::from_str("[[120],[121,122]]").unwrap();
    let tree = CodeTree::from_symbol_table(&parsed).unwrap();
    assert_eq!(tree.symbol_count(), 3);
    assert_eq!(tree.to_symbol_table(), parsed);
}
