//! The codec filter trait.
//!
//! Every codec in the workspace transforms an uncompressed byte sequence
//! into an encoded one and back. Exposing them behind one object-safe trait
//! lets callers chain codecs or swap one for another without knowing which
//! concrete stream type sits underneath.

use crate::error::Result;
use std::io::{Read, Write};

/// A reversible byte-stream transformation.
pub trait Codec {
    /// Short human-readable name of the codec.
    fn name(&self) -> &str;

    /// Inspect the original data before compressing it.
    ///
    /// Codecs that derive state from their input (a Huffman code table, for
    /// instance) build it here. The default does nothing.
    fn prepare_compress(&mut self, _original: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Inspect the encoded data before decompressing it.
    fn prepare_decompress(&mut self, _compressed: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Encode everything from `input` into `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes consumed from `input`.
    fn compress(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64>;

    /// Decode everything from `input` into `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `output`.
    fn decompress(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64>;

    /// Prepare for and compress a whole buffer (convenience method).
    fn compress_all(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.prepare_compress(data)?;
        let mut input = data;
        let mut output = Vec::new();
        self.compress(&mut input, &mut output)?;
        Ok(output)
    }

    /// Prepare for and decompress a whole buffer (convenience method).
    fn decompress_all(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.prepare_decompress(data)?;
        let mut input = data;
        let mut output = Vec::new();
        self.decompress(&mut input, &mut output)?;
        Ok(output)
    }
}

/// Statistics of one compress/decompress round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    /// Codec name.
    pub codec: String,
    /// The encoded bytes.
    pub compressed: Vec<u8>,
    /// The bytes recovered from `compressed`.
    pub decompressed: Vec<u8>,
    /// Length of the original input.
    pub original_len: usize,
}

impl RoundTrip {
    /// Whether the decoded bytes equal the original.
    pub fn matches(&self, original: &[u8]) -> bool {
        self.decompressed == original
    }

    /// Encoded size as a percentage of the original size.
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        self.compressed.len() as f64 / self.original_len as f64 * 100.0
    }
}

/// Compress `original` and decompress the result with the same codec.
pub fn round_trip(codec: &mut dyn Codec, original: &[u8]) -> Result<RoundTrip> {
    let compressed = codec.compress_all(original)?;
    let decompressed = codec.decompress_all(&compressed)?;
    Ok(RoundTrip {
        codec: codec.name().to_string(),
        compressed,
        decompressed,
        original_len: original.len(),
    })
}
