//! Bit-granular I/O over byte sources and sinks.
//!
//! This module provides [`BitReader`] and [`BitWriter`], which move data one
//! bit at a time and delegate the shape of each wire unit to a
//! [`UnitCodec`]. With the default [`PlainByte`] unit they behave like an
//! ordinary bit stream; other units let a codec reuse the same accumulation
//! logic with a different notion of "byte".
//!
//! # Bit Ordering
//!
//! [`Endianness::Big`] places the first bit of a unit in its most
//! significant position; [`Endianness::Little`] places it in the least
//! significant position. Multi-bit values written with
//! [`BitWriter::write_bits`] follow the same rule: big-endian streams emit
//! the most significant bit of the value first.
//!
//! # Example
//!
//! ```
//! use streamcodec_core::bitstream::{BitReader, BitWriter, Endianness};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output, Endianness::Big);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.close().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(&output), Endianness::Big);
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(4).unwrap(), Some(0b1100));
//! ```

use crate::error::{CodecError, Result};
use crate::unit::{PlainByte, UnitCodec};
use std::io::{Read, Write};
use tracing::debug;

/// Order of bits within a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// Most significant bit first.
    #[default]
    Big,
    /// Least significant bit first.
    Little,
}

impl Endianness {
    /// Returns `true` for [`Endianness::Little`].
    pub fn is_little(self) -> bool {
        self == Endianness::Little
    }
}

/// Shift of the bit at `position` within a `bits`-wide value.
///
/// Little-endian streams transfer bit `position` from the least significant
/// end, big-endian streams from the most significant end.
#[inline]
pub fn bit_shift(endianness: Endianness, bits: u8, position: u8) -> u8 {
    debug_assert!(position < bits, "bit position {position} out of {bits}");
    match endianness {
        Endianness::Little => position,
        Endianness::Big => bits - 1 - position,
    }
}

/// Running totals of bits and units moved through a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCounters {
    /// Bits handed out by the reader.
    pub in_bits: u64,
    /// Units pulled from the source.
    pub in_bytes: u64,
    /// Bits accepted by the writer.
    pub out_bits: u64,
    /// Units pushed to the sink.
    pub out_bytes: u64,
}

/// A bit-level reader over any `Read` implementation.
#[derive(Debug)]
pub struct BitReader<R: Read, U: UnitCodec = PlainByte> {
    /// Underlying reader.
    reader: R,
    /// Wire unit strategy.
    unit: U,
    /// Bit order within a unit.
    endianness: Endianness,
    /// Unit currently being consumed.
    current: u8,
    /// Bits already consumed from `current`.
    position: u8,
    /// Valid bits in `current`.
    length: u8,
    /// Set once the source reported end of input.
    exhausted: bool,
    counters: BitCounters,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` reading plain bytes.
    pub fn new(reader: R, endianness: Endianness) -> Self {
        Self::with_unit(reader, endianness, PlainByte)
    }
}

impl<R: Read, U: UnitCodec> BitReader<R, U> {
    /// Create a new `BitReader` with a custom wire unit.
    pub fn with_unit(reader: R, endianness: Endianness, unit: U) -> Self {
        Self {
            reader,
            unit,
            endianness,
            current: 0,
            position: 0,
            length: 0,
            exhausted: false,
            counters: BitCounters::default(),
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Bit order of this stream.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bits and units read so far.
    pub fn counters(&self) -> BitCounters {
        self.counters
    }

    /// Read a single bit.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        while self.position >= self.length {
            if self.exhausted {
                return Ok(None);
            }
            match self.unit.read_unit(&mut self.reader)? {
                Some(unit) => {
                    self.current = unit.value;
                    self.length = unit.bits.min(8);
                    self.position = 0;
                    self.counters.in_bytes += 1;
                }
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }

        let shift = bit_shift(self.endianness, 8, self.position);
        let bit = (self.current >> shift) & 1 == 1;
        self.position += 1;
        self.counters.in_bits += 1;
        Ok(Some(bit))
    }

    /// Read eight bits as a byte.
    ///
    /// A trailing partial byte at end of input is discarded and reported as
    /// `Ok(None)`.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.read_bits(8)?.map(|value| value as u8))
    }

    /// Read up to 32 bits as one value.
    ///
    /// Returns `Ok(None)` if the source ends before `count` bits were read.
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for i in 0..count {
            match self.read_bit()? {
                Some(bit) => value |= u32::from(bit) << bit_shift(self.endianness, count, i),
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }
}

/// A bit-level writer over any `Write` implementation.
///
/// Bits accumulate until the [`UnitCodec`] accepts a unit. Call
/// [`close`](BitWriter::close) or [`finish`](BitWriter::finish) when done to
/// emit the trailing partial unit; dropping an unclosed writer does the same
/// on a best-effort basis.
#[derive(Debug)]
pub struct BitWriter<W: Write, U: UnitCodec = PlainByte> {
    /// Underlying writer, taken by `finish`.
    writer: Option<W>,
    /// Wire unit strategy.
    unit: U,
    /// Bit order within a unit.
    endianness: Endianness,
    /// Unit being accumulated.
    current: u8,
    /// Bits placed into `current`.
    position: u8,
    closed: bool,
    counters: BitCounters,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` emitting plain bytes.
    pub fn new(writer: W, endianness: Endianness) -> Self {
        Self::with_unit(writer, endianness, PlainByte)
    }
}

impl<W: Write, U: UnitCodec> BitWriter<W, U> {
    /// Create a new `BitWriter` with a custom wire unit.
    pub fn with_unit(writer: W, endianness: Endianness, unit: U) -> Self {
        Self {
            writer: Some(writer),
            unit,
            endianness,
            current: 0,
            position: 0,
            closed: false,
            counters: BitCounters::default(),
        }
    }

    /// Bit order of this stream.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bits and units written so far.
    pub fn counters(&self) -> BitCounters {
        self.counters
    }

    /// Whether [`close`](BitWriter::close) has already run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.closed {
            return Err(CodecError::StreamClosed);
        }
        let writer = self.writer.as_mut().ok_or(CodecError::StreamClosed)?;

        let shift = bit_shift(self.endianness, 8, self.position);
        self.current |= u8::from(bit) << shift;
        self.position += 1;
        self.counters.out_bits += 1;

        if self
            .unit
            .try_write_unit(writer, self.current, self.position, false)?
        {
            self.current = 0;
            self.position = 0;
            self.counters.out_bytes += 1;
        } else if self.position >= 8 {
            return Err(CodecError::invalid_config(
                "unit codec refused a full 8-bit unit",
            ));
        }
        Ok(())
    }

    /// Write a byte as eight bits.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write_bits(u32::from(value), 8)
    }

    /// Write the low `count` bits of `value` (up to 32).
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for i in 0..count {
            let shift = bit_shift(self.endianness, count, i);
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Flush the underlying writer without closing the stream.
    ///
    /// A partially filled unit stays in the accumulator.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Emit the trailing partial unit and flush the underlying writer.
    ///
    /// Only the first call has any effect, even if it fails.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        if self.position > 0 {
            self.unit
                .try_write_unit(writer, self.current, self.position, true)?;
            self.current = 0;
            self.position = 0;
            self.counters.out_bytes += 1;
        }
        writer.flush()?;

        debug!(
            out_bits = self.counters.out_bits,
            out_bytes = self.counters.out_bytes,
            "bit writer closed"
        );
        Ok(())
    }

    /// Close the stream and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        self.writer.take().ok_or(CodecError::StreamClosed)
    }
}

impl<W: Write, U: UnitCodec> Drop for BitWriter<W, U> {
    fn drop(&mut self) {
        // Best-effort close on drop
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bit_shift() {
        assert_eq!(bit_shift(Endianness::Big, 8, 0), 7);
        assert_eq!(bit_shift(Endianness::Big, 8, 7), 0);
        assert_eq!(bit_shift(Endianness::Little, 8, 0), 0);
        assert_eq!(bit_shift(Endianness::Big, 9, 0), 8);
    }

    #[test]
    fn test_bitreader_big_endian() {
        // 0b10110101 = 0xB5
        let mut reader = BitReader::new(Cursor::new(vec![0xB5]), Endianness::Big);

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap().unwrap()).collect();
        assert_eq!(
            bits,
            vec![true, false, true, true, false, true, false, true]
        );
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_bitreader_little_endian() {
        let mut reader = BitReader::new(Cursor::new(vec![0xB5]), Endianness::Little);

        assert_eq!(reader.read_bit().unwrap(), Some(true)); // LSB first
        assert_eq!(reader.read_bit().unwrap(), Some(false));
        assert_eq!(reader.read_bit().unwrap(), Some(true));
        assert_eq!(reader.read_bit().unwrap(), Some(false));
    }

    #[test]
    fn test_read_byte_discards_partial_tail() {
        let mut reader = BitReader::new(Cursor::new(vec![0xAB, 0xCD]), Endianness::Big);
        reader.read_bits(4).unwrap();

        assert_eq!(reader.read_byte().unwrap(), Some(0xBC));
        assert_eq!(reader.read_byte().unwrap(), None);
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output, Endianness::Little);
            for bit in [true, false, true, false, true, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.close().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_write_bits_msb_first() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output, Endianness::Big);
            writer.write_bits(0x101, 9).unwrap();
            writer.close().unwrap();
        }
        assert_eq!(output, vec![0x80, 0x80]);
    }

    #[test]
    fn test_roundtrip_mixed_widths() {
        for endianness in [Endianness::Big, Endianness::Little] {
            let mut output = Vec::new();
            {
                let mut writer = BitWriter::new(&mut output, endianness);
                writer.write_bits(0b101, 3).unwrap();
                writer.write_bits(0b1111, 4).unwrap();
                writer.write_bits(0b10, 2).unwrap();
                writer.write_bits(0x1ABC, 13).unwrap();
            }

            let mut reader = BitReader::new(Cursor::new(&output), endianness);
            assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
            assert_eq!(reader.read_bits(4).unwrap(), Some(0b1111));
            assert_eq!(reader.read_bits(2).unwrap(), Some(0b10));
            assert_eq!(reader.read_bits(13).unwrap(), Some(0x1ABC));
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut writer = BitWriter::new(Vec::new(), Endianness::Big);
        writer.write_bits(0b11, 2).unwrap();
        writer.close().unwrap();
        writer.close().unwrap();
        assert!(writer.is_closed());
        assert!(matches!(writer.write_bit(true), Err(CodecError::StreamClosed)));

        let output = writer.finish().unwrap();
        assert_eq!(output, vec![0xC0]);
    }

    #[test]
    fn test_drop_flushes_partial_byte() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output, Endianness::Big);
            writer.write_byte(0x12).unwrap();
            writer.write_bit(true).unwrap();
        }
        assert_eq!(output, vec![0x12, 0x80]);
    }

    #[test]
    fn test_counters() {
        let data = vec![0x01, 0x02, 0x03];
        let mut reader = BitReader::new(Cursor::new(&data), Endianness::Big);
        let mut writer = BitWriter::new(Vec::new(), Endianness::Big);
        while let Some(byte) = reader.read_byte().unwrap() {
            writer.write_byte(byte).unwrap();
        }

        let read = reader.counters();
        assert_eq!(read.in_bits, 8 * read.in_bytes);
        assert_eq!(read.in_bytes, 3);

        let written = writer.counters();
        assert_eq!(written.out_bits, 8 * written.out_bytes);
        assert_eq!(writer.finish().unwrap(), data);
    }
}
