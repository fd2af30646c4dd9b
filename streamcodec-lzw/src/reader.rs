//! LZW decoder stream.

use crate::config::LzwConfig;
use crate::policy::{CodeLengthPolicy, StandardGrowth};
use crate::processor::{Decoded, LzwProcessor};
use std::io::{self, Read};
use streamcodec_core::{BitCounters, BitReader, Result};
use tracing::{debug, trace};

/// Decompresses an LZW code stream.
///
/// Decoding stops at the end code. A source that ends in the middle of a
/// code is treated as if the end code had been read.
#[derive(Debug)]
pub struct LzwReader<R: Read, P: CodeLengthPolicy = StandardGrowth> {
    bits: BitReader<R>,
    processor: LzwProcessor<P>,
    /// Bytes of the last decoded entry.
    pending: Vec<u8>,
    position: usize,
    finished: bool,
}

impl<R: Read> LzwReader<R> {
    /// Create a new decoder with [`StandardGrowth`].
    pub fn new(reader: R, config: LzwConfig) -> Result<Self> {
        Self::with_policy(reader, config, StandardGrowth)
    }
}

impl<R: Read, P: CodeLengthPolicy> LzwReader<R, P> {
    /// Create a new decoder with a custom growth policy.
    pub fn with_policy(reader: R, config: LzwConfig, policy: P) -> Result<Self> {
        Ok(Self {
            bits: BitReader::new(reader, config.endianness),
            processor: LzwProcessor::with_policy(&config, policy)?,
            pending: Vec::new(),
            position: 0,
            finished: false,
        })
    }

    /// Decode the next byte, or `Ok(None)` once the end code is reached.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.position >= self.pending.len() && !self.fill()? {
            return Ok(None);
        }
        let byte = self.pending[self.position];
        self.position += 1;
        Ok(Some(byte))
    }

    /// The dictionary state.
    pub fn processor(&self) -> &LzwProcessor<P> {
        &self.processor
    }

    /// Width of the next code.
    pub fn code_bits(&self) -> u8 {
        self.processor.code_bits()
    }

    /// Width of the next code before clamping to the maximum.
    pub fn code_bits_unclamped(&self) -> u8 {
        self.processor.code_bits_unclamped()
    }

    /// Bits and bytes read so far.
    pub fn counters(&self) -> BitCounters {
        self.bits.counters()
    }

    /// Consume the decoder and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.bits.into_inner()
    }

    /// Decode codes until one yields bytes; `false` at end of stream.
    fn fill(&mut self) -> Result<bool> {
        while !self.finished {
            let Some(code) = self.read_code()? else {
                debug!(in_bits = self.bits.counters().in_bits, "lzw input ended without end code");
                self.finished = true;
                break;
            };

            match self.processor.decode(code)? {
                Decoded::Entry(key) => {
                    if let Some(bytes) = self.processor.entry(key) {
                        self.pending.clear();
                        self.pending.extend_from_slice(bytes);
                        self.position = 0;
                        return Ok(true);
                    }
                }
                Decoded::Cleared => {}
                Decoded::End => {
                    debug!(in_bits = self.bits.counters().in_bits, "lzw end code read");
                    self.finished = true;
                }
            }
        }
        Ok(false)
    }

    fn read_code(&mut self) -> Result<Option<u32>> {
        self.processor.grow_code_length(true);
        let width = self.processor.code_bits();
        let code = self.bits.read_bits(width)?;
        trace!(?code, width, "lzw code read");
        Ok(code)
    }
}

impl<R: Read, P: CodeLengthPolicy> Read for LzwReader<R, P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.pending.len() && !self.fill()? {
            return Ok(0);
        }
        let available = &self.pending[self.position..];
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.position += count;
        Ok(count)
    }
}
