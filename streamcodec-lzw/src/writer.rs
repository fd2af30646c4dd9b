//! LZW encoder stream.

use crate::config::LzwConfig;
use crate::policy::{CodeLengthPolicy, StandardGrowth};
use crate::processor::LzwProcessor;
use std::io::{self, Write};
use streamcodec_core::{BitCounters, BitWriter, CodecError, Result};
use tracing::{debug, trace};

/// Compresses bytes written to it into variable-width LZW codes.
///
/// The stream opens with a clear code and ends with the final pending code
/// followed by the end code, written by [`finish`](LzwWriter::finish),
/// [`close`](LzwWriter::close), or on drop.
#[derive(Debug)]
pub struct LzwWriter<W: Write, P: CodeLengthPolicy = StandardGrowth> {
    /// Taken by `finish`.
    bits: Option<BitWriter<W>>,
    processor: LzwProcessor<P>,
    closed: bool,
    clears: u64,
}

impl<W: Write> LzwWriter<W> {
    /// Create a new encoder with [`StandardGrowth`].
    pub fn new(writer: W, config: LzwConfig) -> Result<Self> {
        Self::with_policy(writer, config, StandardGrowth)
    }
}

impl<W: Write, P: CodeLengthPolicy> LzwWriter<W, P> {
    /// Create a new encoder with a custom growth policy.
    pub fn with_policy(writer: W, config: LzwConfig, policy: P) -> Result<Self> {
        let processor = LzwProcessor::with_policy(&config, policy)?;
        let mut lzw = Self {
            bits: Some(BitWriter::new(writer, config.endianness)),
            processor,
            closed: false,
            clears: 0,
        };
        lzw.processor.grow_code_length(false);
        lzw.write_code(lzw.processor.clear_code())?;
        Ok(lzw)
    }

    /// Compress one byte.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        if self.closed {
            return Err(CodecError::StreamClosed);
        }

        self.processor.grow_code_length(false);
        if self.processor.needs_clear() {
            self.write_clear()?;
        }

        if let Some(code) = self.processor.encode(value)? {
            self.write_code(code)?;
        }
        Ok(())
    }

    /// Flush the pending code and reset the dictionary.
    pub fn write_clear(&mut self) -> Result<()> {
        if let Some(code) = self.processor.finish() {
            self.write_code(code)?;
        }
        self.processor.grow_code_length(false);
        self.write_code(self.processor.clear_code())?;

        self.processor.clear_table();
        self.processor.grow_code_length(false);
        self.clears += 1;
        debug!(clears = self.clears, "lzw dictionary cleared");
        Ok(())
    }

    /// The dictionary state.
    pub fn processor(&self) -> &LzwProcessor<P> {
        &self.processor
    }

    /// Number of dictionary resets written after the opening clear code.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Width of the next code.
    pub fn code_bits(&self) -> u8 {
        self.processor.code_bits()
    }

    /// Width of the next code before clamping to the maximum.
    pub fn code_bits_unclamped(&self) -> u8 {
        self.processor.code_bits_unclamped()
    }

    /// Bits and bytes written so far.
    pub fn counters(&self) -> BitCounters {
        self.bits
            .as_ref()
            .map(BitWriter::counters)
            .unwrap_or_default()
    }

    /// Write the pending code and the end code, then flush.
    ///
    /// Only the first call has any effect.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.processor.grow_code_length(false);
        if let Some(code) = self.processor.finish() {
            self.write_code(code)?;
        }
        self.processor.grow_code_length(false);
        self.write_code(self.processor.end_code())?;

        if let Some(bits) = self.bits.as_mut() {
            bits.close()?;
        }
        debug!(
            out_bits = self.counters().out_bits,
            clears = self.clears,
            "lzw writer closed"
        );
        Ok(())
    }

    /// Close the stream and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        self.bits
            .take()
            .ok_or(CodecError::StreamClosed)?
            .finish()
    }

    fn write_code(&mut self, code: u32) -> Result<()> {
        let width = self.processor.code_bits();
        if code >> width != 0 {
            return Err(CodecError::invalid_config(format!(
                "code {code} does not fit in {width} bits; the growth policy widens too late"
            )));
        }
        trace!(code, width, "lzw code written");
        self.bits
            .as_mut()
            .ok_or(CodecError::StreamClosed)?
            .write_bits(code, width)
    }
}

impl<W: Write, P: CodeLengthPolicy> Write for LzwWriter<W, P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.write_byte(byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(bits) = self.bits.as_mut() {
            bits.flush()?;
        }
        Ok(())
    }
}

impl<W: Write, P: CodeLengthPolicy> Drop for LzwWriter<W, P> {
    fn drop(&mut self) {
        // Best-effort close on drop
        let _ = self.close();
    }
}
