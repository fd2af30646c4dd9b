//! The Base64 wire unit.
//!
//! Each unit carries six bits, written as one character of the standard
//! alphabet. Bits are accumulated big-endian, so a unit's six bits sit in
//! the top of the accumulator byte.

use streamcodec_core::error::{CodecError, Result};
use streamcodec_core::unit::{Unit, UnitCodec, next_byte};
use std::io::{Read, Write};

/// The padding character.
pub const PAD: u8 = b'=';

/// Bits carried by one character.
pub const BITS_PER_CHAR: u8 = 6;

/// Shift between a 6-bit index and its position in the accumulator byte.
const BITS_OFFSET: u8 = 8 - BITS_PER_CHAR;

/// The standard alphabet, indexed by 6-bit value.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Marker for bytes outside the alphabet in [`DECODE_MAP`].
const INVALID: u8 = 0xFF;

/// Reverse lookup from character to 6-bit value.
const DECODE_MAP: [u8; 256] = build_decode_map();

const fn build_decode_map() -> [u8; 256] {
    let mut map = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
}

/// Map a character to its 6-bit value.
pub fn decode_char(c: u8) -> Option<u8> {
    match DECODE_MAP[c as usize] {
        INVALID => None,
        value => Some(value),
    }
}

/// Base64 unit strategy for [`BitReader`](streamcodec_core::BitReader) and
/// [`BitWriter`](streamcodec_core::BitWriter).
///
/// On the read side the unit looks one character ahead so that padding
/// following a character shortens that character's unit instead of ending
/// the stream: a character followed by `p` pad characters carries
/// `6 - 2p` bits.
#[derive(Debug, Clone, Default)]
pub struct Base64Unit {
    /// Character read ahead of the current unit.
    peek: Option<u8>,
}

impl Base64Unit {
    /// Create a new unit strategy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnitCodec for Base64Unit {
    fn read_unit<R: Read>(&mut self, source: &mut R) -> Result<Option<Unit>> {
        let current = match self.peek.take() {
            Some(c) => c,
            None => match next_byte(source)? {
                Some(c) => c,
                None => return Ok(None),
            },
        };
        let index = decode_char(current).ok_or(CodecError::invalid_unit(current))?;

        let mut pads = 0u8;
        loop {
            match next_byte(source)? {
                Some(PAD) => pads += 1,
                next => {
                    self.peek = next;
                    break;
                }
            }
        }
        if pads > 2 {
            return Err(CodecError::invalid_unit(PAD));
        }

        Ok(Some(Unit {
            value: index << BITS_OFFSET,
            bits: BITS_PER_CHAR - 2 * pads,
        }))
    }

    fn try_write_unit<W: Write>(
        &mut self,
        sink: &mut W,
        value: u8,
        bits_filled: u8,
        flushing: bool,
    ) -> Result<bool> {
        if bits_filled < BITS_PER_CHAR && !flushing {
            return Ok(false);
        }

        sink.write_all(&[ALPHABET[(value >> BITS_OFFSET) as usize]])?;
        if flushing {
            let remain = BITS_PER_CHAR.saturating_sub(bits_filled);
            for _ in 0..remain / 2 {
                sink.write_all(&[PAD])?;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_map() {
        assert_eq!(decode_char(b'A'), Some(0));
        assert_eq!(decode_char(b'a'), Some(26));
        assert_eq!(decode_char(b'0'), Some(52));
        assert_eq!(decode_char(b'/'), Some(63));
        assert_eq!(decode_char(PAD), None);
        assert_eq!(decode_char(b'\n'), None);
    }

    #[test]
    fn test_read_unit_with_padding() {
        let mut source = Cursor::new(b"QQ==".to_vec());
        let mut unit = Base64Unit::new();

        let first = unit.read_unit(&mut source).unwrap().unwrap();
        assert_eq!(first, Unit { value: 16 << 2, bits: 6 });

        let second = unit.read_unit(&mut source).unwrap().unwrap();
        assert_eq!(second.bits, 2);

        assert_eq!(unit.read_unit(&mut source).unwrap(), None);
    }

    #[test]
    fn test_read_unit_rejects_foreign_characters() {
        let mut source = Cursor::new(b"Q*".to_vec());
        let mut unit = Base64Unit::new();

        unit.read_unit(&mut source).unwrap();
        assert!(matches!(
            unit.read_unit(&mut source),
            Err(CodecError::InvalidUnit { value: b'*' })
        ));
    }

    #[test]
    fn test_write_unit_pads_on_flush() {
        let mut sink = Vec::new();
        let mut unit = Base64Unit::new();

        assert!(!unit.try_write_unit(&mut sink, 0, 5, false).unwrap());
        assert!(unit.try_write_unit(&mut sink, 0b0100_0000, 2, true).unwrap());
        assert_eq!(sink, b"Q==");
    }
}
