//! # streamcodec-base64
//!
//! Base64 expressed as a bit-stream unit: the generic
//! [`BitWriter`]/[`BitReader`] accumulation logic is reused unchanged, and
//! [`Base64Unit`] redefines a wire unit as six bits packed into one
//! character of the standard alphabet (`A-Z a-z 0-9 + /`, `=` padding, no
//! line wrapping).
//!
//! ## Example
//!
//! ```rust
//! use streamcodec_base64::{decode, encode};
//!
//! let encoded = encode(b"Man").unwrap();
//! assert_eq!(encoded, b"TWFu");
//! assert_eq!(decode(&encoded).unwrap(), b"Man");
//! assert_eq!(encode(b"M").unwrap(), b"TQ==");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod unit;

pub use unit::{ALPHABET, BITS_PER_CHAR, Base64Unit, PAD, decode_char};

use std::io::{self, Read, Write};
use streamcodec_core::{BitCounters, BitReader, BitWriter, Codec, Endianness, Result};

/// Streaming Base64 encoder.
///
/// Bytes written are emitted as alphabet characters as soon as six bits are
/// available. [`finish`](Base64Writer::finish) (or dropping the writer)
/// emits the final short character and its padding exactly once.
#[derive(Debug)]
pub struct Base64Writer<W: Write> {
    bits: BitWriter<W, Base64Unit>,
}

impl<W: Write> Base64Writer<W> {
    /// Create a new encoder writing characters to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            bits: BitWriter::with_unit(writer, Endianness::Big, Base64Unit::new()),
        }
    }

    /// Bits accepted and characters emitted so far.
    pub fn counters(&self) -> BitCounters {
        self.bits.counters()
    }

    /// Emit the trailing character and padding.
    pub fn close(&mut self) -> Result<()> {
        self.bits.close()
    }

    /// Close the stream and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.bits.finish()
    }
}

impl<W: Write> Write for Base64Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.bits.write_byte(byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.bits.flush()?)
    }
}

/// Streaming Base64 decoder.
#[derive(Debug)]
pub struct Base64Reader<R: Read> {
    bits: BitReader<R, Base64Unit>,
}

impl<R: Read> Base64Reader<R> {
    /// Create a new decoder reading characters from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            bits: BitReader::with_unit(reader, Endianness::Big, Base64Unit::new()),
        }
    }

    /// Bits decoded and characters consumed so far.
    pub fn counters(&self) -> BitCounters {
        self.bits.counters()
    }

    /// Decode the next byte, or `Ok(None)` at end of input.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        self.bits.read_byte()
    }

    /// Consume the decoder and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.bits.into_inner()
    }
}

impl<R: Read> Read for Base64Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.bits.read_byte()? {
                Some(byte) => *slot = byte,
                None => return Ok(i),
            }
        }
        Ok(buf.len())
    }
}

/// Encode `data` as Base64 characters.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut writer = Base64Writer::new(Vec::with_capacity(data.len().div_ceil(3) * 4));
    writer.write_all(data)?;
    writer.finish()
}

/// Decode Base64 characters back to bytes.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Base64Reader::new(data);
    let mut output = Vec::with_capacity(data.len() / 4 * 3);
    reader.read_to_end(&mut output)?;
    Ok(output)
}

/// Base64 as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Codec for Base64Codec {
    fn name(&self) -> &str {
        "Base64"
    }

    fn compress(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64> {
        let mut writer = Base64Writer::new(output);
        let consumed = io::copy(input, &mut writer)?;
        let counters = writer.counters();
        writer.finish()?;
        tracing::debug!(consumed, out_bits = counters.out_bits, "base64 encoded");
        Ok(consumed)
    }

    fn decompress(&mut self, input: &mut dyn Read, output: &mut dyn Write) -> Result<u64> {
        let mut reader = Base64Reader::new(input);
        Ok(io::copy(&mut reader, output)?)
    }
}
