//! Huffman-coded bit streams.
//!
//! [`HuffmanWriter`] emits each byte as its code, first bit first.
//! [`HuffmanReader`] accumulates bits one at a time and scans the active
//! table after every bit; since the codes are prefix-free at most one entry
//! can match.

use crate::code::CanonicalCode;
use crate::table::CodeTable;
use std::io::{self, Read, Write};
use std::sync::Arc;
use streamcodec_core::{BitCounters, BitReader, BitWriter, CodecError, Endianness, Result};
use tracing::trace;

/// Supplies the code table for each side of a stream.
///
/// The reading and writing sides may use different generations of a table;
/// adaptive schemes update them between symbols.
pub trait CodeSource {
    /// Table used to decode the next symbol.
    fn reading_codes(&self) -> &CodeTable;

    /// Table used to encode the next symbol.
    fn writing_codes(&self) -> &CodeTable;
}

/// One fixed table shared by both sides for the whole stream.
#[derive(Debug, Clone, Default)]
pub struct StaticCodes {
    table: Arc<CodeTable>,
}

impl StaticCodes {
    /// Wrap a code table.
    pub fn new(table: CodeTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The shared table.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }
}

impl From<Arc<CodeTable>> for StaticCodes {
    fn from(table: Arc<CodeTable>) -> Self {
        Self { table }
    }
}

impl CodeSource for StaticCodes {
    fn reading_codes(&self) -> &CodeTable {
        &self.table
    }

    fn writing_codes(&self) -> &CodeTable {
        &self.table
    }
}

/// Encodes bytes with a prefix code.
#[derive(Debug)]
pub struct HuffmanWriter<W: Write, S: CodeSource = StaticCodes> {
    bits: BitWriter<W>,
    codes: S,
    symbols: u64,
}

impl<W: Write, S: CodeSource> HuffmanWriter<W, S> {
    /// Create a new writer emitting codes to `writer`.
    pub fn new(writer: W, codes: S) -> Self {
        Self {
            bits: BitWriter::new(writer, Endianness::Big),
            codes,
            symbols: 0,
        }
    }

    /// Encode one symbol.
    pub fn write_symbol(&mut self, symbol: u8) -> Result<()> {
        let code = self
            .codes
            .writing_codes()
            .get(symbol)
            .ok_or(CodecError::unsupported_symbol(symbol))?;
        for i in 0..code.length() {
            self.bits.write_bit(code.bit(i))?;
        }
        self.symbols += 1;
        trace!(symbol, %code, "huffman symbol written");
        Ok(())
    }

    /// Number of symbols encoded so far.
    pub fn symbols_written(&self) -> u64 {
        self.symbols
    }

    /// Bits and bytes written so far.
    pub fn counters(&self) -> BitCounters {
        self.bits.counters()
    }

    /// Pad the final byte with zero bits and flush.
    pub fn close(&mut self) -> Result<()> {
        self.bits.close()
    }

    /// Close the stream and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.bits.finish()
    }
}

impl<W: Write, S: CodeSource> Write for HuffmanWriter<W, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &symbol in buf {
            self.write_symbol(symbol)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.bits.flush()?)
    }
}

/// Decodes bytes encoded with a prefix code.
///
/// The final byte of an encoded stream is padded with zero bits, which may
/// themselves form valid codes. Give the reader the number of encoded
/// symbols with [`with_symbol_limit`](HuffmanReader::with_symbol_limit) to
/// stop before the padding.
#[derive(Debug)]
pub struct HuffmanReader<R: Read, S: CodeSource = StaticCodes> {
    bits: BitReader<R>,
    codes: S,
    symbols: u64,
    limit: Option<u64>,
}

impl<R: Read, S: CodeSource> HuffmanReader<R, S> {
    /// Create a new reader decoding until the source is exhausted.
    pub fn new(reader: R, codes: S) -> Self {
        Self {
            bits: BitReader::new(reader, Endianness::Big),
            codes,
            symbols: 0,
            limit: None,
        }
    }

    /// Create a new reader that stops after `limit` symbols.
    pub fn with_symbol_limit(reader: R, codes: S, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(reader, codes)
        }
    }

    /// Decode the next symbol.
    ///
    /// Returns `Ok(None)` at end of input, including when the input ends in
    /// the middle of a code.
    pub fn read_symbol(&mut self) -> Result<Option<u8>> {
        if self.limit.is_some_and(|limit| self.symbols >= limit) {
            return Ok(None);
        }

        let table = self.codes.reading_codes();
        let mut raw = 0u64;
        let mut length = 0u8;
        loop {
            let Some(bit) = self.bits.read_bit()? else {
                return Ok(None);
            };
            raw = (raw << 1) | u64::from(bit);
            length += 1;

            if let Some(symbol) = table.find(CanonicalCode::new(raw, length)) {
                self.symbols += 1;
                return Ok(Some(symbol));
            }
            if length >= table.max_length() {
                return Err(CodecError::table_mismatch(raw, length));
            }
        }
    }

    /// Number of symbols decoded so far.
    pub fn symbols_read(&self) -> u64 {
        self.symbols
    }

    /// Bits and bytes read so far.
    pub fn counters(&self) -> BitCounters {
        self.bits.counters()
    }

    /// Consume the reader and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.bits.into_inner()
    }
}

impl<R: Read, S: CodeSource> Read for HuffmanReader<R, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.read_symbol()? {
                Some(symbol) => *slot = symbol,
                None => return Ok(i),
            }
        }
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CodeTree;

    fn codes_for(data: &[u8]) -> StaticCodes {
        StaticCodes::new(CodeTree::from_data(data).unwrap().to_code_table())
    }

    #[test]
    fn test_write_known_codes() {
        // a=0 b=10 d=110 c=111
        let codes = codes_for(b"aaaabbcd");
        let mut writer = HuffmanWriter::new(Vec::new(), codes);
        writer.write_all(b"abdc").unwrap();
        assert_eq!(writer.symbols_written(), 4);
        assert_eq!(writer.counters().out_bits, 9);

        let output = writer.finish().unwrap();
        assert_eq!(output, vec![0b0101_1011, 0b1000_0000]);
    }

    #[test]
    fn test_read_with_limit_ignores_padding() {
        let codes = codes_for(b"aaaabbcd");
        let encoded = vec![0b0101_1011, 0b1000_0000];

        let mut reader = HuffmanReader::with_symbol_limit(encoded.as_slice(), codes.clone(), 4);
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"abdc");
        assert_eq!(reader.symbols_read(), 4);

        // Without a limit the zero padding decodes as `a`
        let mut reader = HuffmanReader::new(encoded.as_slice(), codes);
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"abdcaaaaaaa");
    }

    #[test]
    fn test_unsupported_symbol() {
        let mut writer = HuffmanWriter::new(Vec::new(), codes_for(b"ab"));
        assert!(matches!(
            writer.write_symbol(b'z'),
            Err(CodecError::UnsupportedSymbol { symbol: b'z' })
        ));
    }

    #[test]
    fn test_table_mismatch() {
        // Only "0" and "10" are codes; "11" matches nothing
        let mut table = CodeTable::new();
        table.insert(b'a', CanonicalCode::new(0b0, 1));
        table.insert(b'b', CanonicalCode::new(0b10, 2));

        let mut reader = HuffmanReader::new(&[0b1100_0000u8][..], StaticCodes::new(table));
        assert!(matches!(
            reader.read_symbol(),
            Err(CodecError::TableMismatch { raw: 0b11, length: 2 })
        ));
    }

    #[test]
    fn test_truncated_code_is_end_of_stream() {
        let mut table = CodeTable::new();
        table.insert(b'a', CanonicalCode::new(0, 9));
        table.insert(b'b', CanonicalCode::new(1, 1));

        let mut reader = HuffmanReader::new(&[0u8][..], StaticCodes::new(table));
        assert_eq!(reader.read_symbol().unwrap(), None);
    }
}
