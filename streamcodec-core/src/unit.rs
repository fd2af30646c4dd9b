//! Wire-unit hooks for the bit-stream engine.
//!
//! A [`BitReader`](crate::BitReader) or [`BitWriter`](crate::BitWriter)
//! accumulates bits one at a time; the [`UnitCodec`] decides what a unit on
//! the wire looks like. The default [`PlainByte`] unit is an ordinary 8-bit
//! byte, while other codecs (Base64, for instance) redefine a unit as a
//! shorter bit group packed into a printable character.

use crate::error::Result;
use std::io::{self, Read, Write};

/// A raw unit pulled from the source.
///
/// `value` holds the unit's bits in the positions the owning stream reads
/// first: the top `bits` bits for big-endian streams, the bottom `bits` for
/// little-endian ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// The unit's bits, aligned to the stream's bit order.
    pub value: u8,
    /// Number of valid bits carried by this unit (0-8).
    pub bits: u8,
}

impl Unit {
    /// A full 8-bit unit.
    pub fn byte(value: u8) -> Self {
        Self { value, bits: 8 }
    }
}

/// Strategy deciding how bits map to units on the wire.
pub trait UnitCodec {
    /// Pull the next unit from `source`.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    fn read_unit<R: Read>(&mut self, source: &mut R) -> Result<Option<Unit>>;

    /// Offer the accumulator to the sink.
    ///
    /// `value` holds `bits_filled` accumulated bits. Returns `true` when a
    /// unit was emitted and the accumulator must be reset. When `flushing`
    /// is set the stream is closing and the unit must be emitted even if it
    /// is short.
    fn try_write_unit<W: Write>(
        &mut self,
        sink: &mut W,
        value: u8,
        bits_filled: u8,
        flushing: bool,
    ) -> Result<bool>;
}

/// The default unit: one plain byte per unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainByte;

impl UnitCodec for PlainByte {
    fn read_unit<R: Read>(&mut self, source: &mut R) -> Result<Option<Unit>> {
        Ok(next_byte(source)?.map(Unit::byte))
    }

    fn try_write_unit<W: Write>(
        &mut self,
        sink: &mut W,
        value: u8,
        bits_filled: u8,
        flushing: bool,
    ) -> Result<bool> {
        if bits_filled == 8 || flushing {
            sink.write_all(&[value])?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Read a single byte, retrying on interruption.
///
/// Returns `Ok(None)` at end of input.
pub fn next_byte<R: Read + ?Sized>(source: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
