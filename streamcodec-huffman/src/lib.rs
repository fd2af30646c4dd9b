//! # streamcodec-huffman
//!
//! Canonical Huffman coding over bit streams.
//!
//! A [`CodeTree`] is built from the symbol frequencies of the data to be
//! compressed. Its portable form, the [`SymbolTable`], lists the symbols at
//! each depth and is all a receiver needs to rebuild the identical code
//! assignment. The encoded stream itself carries no header: the table must
//! travel out of band.
//!
//! ## Example
//!
//! ```rust
//! use streamcodec_huffman::{decode, encode};
//!
//! let data = b"AAAAAAABBCCCDEEEEFFFFFFGHIIJ";
//! let encoded = encode(data).unwrap();
//! assert!(encoded.data.len() < data.len());
//!
//! let decoded = decode(&encoded.data, &encoded.table, encoded.symbol_count).unwrap();
//! assert_eq!(decoded, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod code;
mod stream;
mod table;
mod tree;

pub use code::{CanonicalCode, MAX_CODE_LENGTH};
pub use stream::{CodeSource, HuffmanReader, HuffmanWriter, StaticCodes};
pub use table::{CodeTable, SymbolTable};
pub use tree::CodeTree;

use std::io::{self, Read, Write};
use streamcodec_core::{Codec, CodecError, Result};
use tracing::debug;

/// Output of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The encoded bytes.
    pub data: Vec<u8>,
    /// Table needed to decode `data`.
    pub table: SymbolTable,
    /// Number of encoded symbols.
    pub symbol_count: u64,
}

/// Build a table from `data` and encode `data` with it.
pub fn encode(data: &[u8]) -> Result<Encoded> {
    let mut codec = HuffmanCodec::new();
    let encoded = codec.compress_all(data)?;
    Ok(Encoded {
        data: encoded,
        table: codec.symbol_table(),
        symbol_count: data.len() as u64,
    })
}

/// Decode `symbol_count` symbols from `data` using `table`.
pub fn decode(data: &[u8], table: &SymbolTable, symbol_count: u64) -> Result<Vec<u8>> {
    let mut codec = HuffmanCodec::from_symbol_table(table, Some(symbol_count))?;
    codec.decompress_all(data)
}

/// Huffman coding as a [`Codec`].
///
/// The table is derived from the input in
/// [`prepare_compress`](Codec::prepare_compress), or supplied up front with
/// [`from_symbol_table`](HuffmanCodec::from_symbol_table) on the receiving
/// side.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    tree: CodeTree,
    codes: Option<StaticCodes>,
    symbol_count: Option<u64>,
}

impl HuffmanCodec {
    /// Create a codec without a table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec from a received symbol table.
    ///
    /// With a `symbol_count`, decoding stops after that many symbols and
    /// ignores the zero padding of the last byte.
    pub fn from_symbol_table(table: &SymbolTable, symbol_count: Option<u64>) -> Result<Self> {
        let tree = CodeTree::from_symbol_table(table)?;
        Ok(Self {
            codes: Some(StaticCodes::new(tree.to_code_table())),
            tree,
            symbol_count,
        })
    }

    /// The active tree.
    pub fn tree(&self) -> &CodeTree {
        &self.tree
    }

    /// The portable form of the active table.
    pub fn symbol_table(&self) -> SymbolTable {
        self.tree.to_symbol_table()
    }

    /// The active symbol-to-code mapping, if prepared.
    pub fn code_table(&self) -> Option<&CodeTable> {
        self.codes.as_ref().map(StaticCodes::table)
    }

    /// Number of symbols in the last compressed or expected input.
    pub fn symbol_count(&self) -> Option<u64> {
        self.symbol_count
    }

    fn codes(&self) -> Result<StaticCodes> {
        self.codes
            .clone()
            .ok_or_else(|| CodecError::invalid_config("Huffman code table not prepared"))
    }
}

impl Codec for HuffmanCodec {
    fn name(&self) -> &str {
        "Huffman"
    }

    fn prepare_compress(&mut self, original: &[u8]) -> Result<()> {
        self.tree = CodeTree::from_data(original)?;
        self.codes = Some(StaticCodes::new(self.tree.to_code_table()));
        self.symbol_count = Some(original.len() as u64);
        Ok(())
    }

    fn compress(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64> {
        let mut writer = HuffmanWriter::new(output, self.codes()?);
        let consumed = io::copy(input, &mut writer)?;
        let counters = writer.counters();
        writer.finish()?;

        self.symbol_count = Some(consumed);
        debug!(consumed, out_bits = counters.out_bits, "huffman encoded");
        Ok(consumed)
    }

    fn decompress(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64> {
        let codes = self.codes()?;
        let mut reader = match self.symbol_count {
            Some(limit) => HuffmanReader::with_symbol_limit(input, codes, limit),
            None => HuffmanReader::new(input, codes),
        };
        Ok(io::copy(&mut reader, output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_roundtrip() {
        let mut codec = HuffmanCodec::new();
        let original = b"BABAABAAA";
        let compressed = codec.compress_all(original).unwrap();
        assert_eq!(compressed.len(), 2);
        assert_eq!(codec.decompress_all(&compressed).unwrap(), original);
    }

    #[test]
    fn test_unprepared_codec_fails() {
        let mut codec = HuffmanCodec::new();
        let mut input: &[u8] = b"abc";
        let mut output = Vec::new();
        assert!(matches!(
            codec.compress(&mut input, &mut output),
            Err(CodecError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_receiver_side_codec() {
        let encoded = encode(b"Hello, World!").unwrap();
        let mut receiver = HuffmanCodec::from_symbol_table(&encoded.table, Some(13)).unwrap();
        assert_eq!(receiver.decompress_all(&encoded.data).unwrap(), b"Hello, World!");
        assert_eq!(receiver.symbol_table(), encoded.table);
    }

    #[test]
    fn test_empty_input() {
        let encoded = encode(b"").unwrap();
        assert!(encoded.data.is_empty());
        assert!(encoded.table.is_empty());
        assert_eq!(decode(&encoded.data, &encoded.table, 0).unwrap(), b"");
    }
}
