//! # streamcodec-lzw
//!
//! Adaptive LZW compression with variable-width codes.
//!
//! ## Stream format
//!
//! - **Literals**: codes `0..2^min_code_length` stand for single bytes
//! - **Control codes**: `CLEAR = 2^min_code_length`, `END = CLEAR + 1`
//! - **Width**: every code is `code_length + 1` bits, clamped to
//!   `max_code_length`; the code length grows with the dictionary as
//!   decided by a [`CodeLengthPolicy`]
//! - **Framing**: the stream starts with CLEAR and ends with END; the
//!   encoder emits CLEAR and starts over when the code space is exhausted
//!
//! Encoder and decoder grow their code length from their own dictionary
//! state, so no width information is transmitted.
//!
//! ## Example
//!
//! ```rust
//! use streamcodec_lzw::{LzwConfig, compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
//! assert!(compressed.len() < original.len());
//!
//! let decompressed = decompress(&compressed, LzwConfig::DEFAULT).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bimap;
mod config;
mod entry;
mod error;
mod policy;
mod processor;
mod reader;
mod writer;

pub use bimap::Bimap;
pub use config::LzwConfig;
pub use entry::DictionaryEntry;
pub use error::{LzwError, Result};
pub use policy::{CodeLengthPolicy, EarlyChange, StandardGrowth};
pub use processor::{Decoded, LzwProcessor};
pub use reader::LzwReader;
pub use writer::LzwWriter;

use std::io::{self, Read, Write};
use streamcodec_core::Codec;
use tracing::debug;

/// Compress `data` with the given configuration.
pub fn compress(data: &[u8], config: LzwConfig) -> streamcodec_core::Result<Vec<u8>> {
    LzwCodec::new(config).compress_all(data)
}

/// Decompress an LZW stream produced with the same configuration.
pub fn decompress(data: &[u8], config: LzwConfig) -> streamcodec_core::Result<Vec<u8>> {
    LzwCodec::new(config).decompress_all(data)
}

/// LZW as a [`Codec`].
#[derive(Debug, Clone, Default)]
pub struct LzwCodec<P: CodeLengthPolicy + Clone = StandardGrowth> {
    config: LzwConfig,
    policy: P,
}

impl LzwCodec {
    /// Create a codec with [`StandardGrowth`].
    pub fn new(config: LzwConfig) -> Self {
        Self::with_policy(config, StandardGrowth)
    }
}

impl<P: CodeLengthPolicy + Clone> LzwCodec<P> {
    /// Create a codec with a custom growth policy.
    pub fn with_policy(config: LzwConfig, policy: P) -> Self {
        Self { config, policy }
    }

    /// The configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}

impl<P: CodeLengthPolicy + Clone> Codec for LzwCodec<P> {
    fn name(&self) -> &str {
        "LZW"
    }

    fn compress(
        &mut self,
        input: &mut dyn Read,
        output: &mut dyn Write,
    ) -> streamcodec_core::Result<u64> {
        let mut writer = LzwWriter::with_policy(output, self.config, self.policy.clone())?;
        let consumed = io::copy(input, &mut writer)?;
        let counters = writer.counters();
        writer.finish()?;
        debug!(consumed, out_bits = counters.out_bits, "lzw encoded");
        Ok(consumed)
    }

    fn decompress(
        &mut self,
        input: &mut dyn Read,
        output: &mut dyn Write,
    ) -> streamcodec_core::Result<u64> {
        let mut reader = LzwReader::with_policy(input, self.config, self.policy.clone())?;
        Ok(io::copy(&mut reader, output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_default() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
        assert_eq!(decompress(&compressed, LzwConfig::DEFAULT).unwrap(), original);
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"", LzwConfig::DEFAULT).unwrap();
        // CLEAR and END, 9 bits each
        assert_eq!(compressed.len(), 3);
        assert!(decompress(&compressed, LzwConfig::DEFAULT).unwrap().is_empty());
    }

    #[test]
    fn test_single_byte() {
        let compressed = compress(b"A", LzwConfig::DEFAULT).unwrap();
        assert_eq!(decompress(&compressed, LzwConfig::DEFAULT).unwrap(), b"A");
    }

    #[test]
    fn test_codec_name() {
        let codec = LzwCodec::new(LzwConfig::DEFAULT);
        assert_eq!(codec.name(), "LZW");
        assert_eq!(codec.config().max_code_length, 12);
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let err = compress(b"abc", LzwConfig::new(9, 12)).unwrap_err();
        assert!(matches!(
            err,
            streamcodec_core::CodecError::InvalidConfig { .. }
        ));
    }
}
