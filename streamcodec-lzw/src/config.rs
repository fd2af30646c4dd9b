//! LZW configuration.

use crate::error::{LzwError, Result};
use streamcodec_core::Endianness;

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Bits per literal; literals are `0..2^min_code_length`.
    pub min_code_length: u8,
    /// Upper bound on the code width written to the stream.
    pub max_code_length: u8,
    /// Bit order of the underlying bit stream.
    pub endianness: Endianness,
}

impl LzwConfig {
    /// Byte literals, codes of up to 12 bits, most significant bit first.
    pub const DEFAULT: Self = Self {
        min_code_length: 8,
        max_code_length: 12,
        endianness: Endianness::Big,
    };

    /// Create a big-endian configuration with the given code lengths.
    pub fn new(min_code_length: u8, max_code_length: u8) -> Self {
        Self {
            min_code_length,
            max_code_length,
            endianness: Endianness::Big,
        }
    }

    /// Use `endianness` for the bit stream.
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Check that the code lengths are supported.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_code_length, self.max_code_length);
        if !(2..=8).contains(&min) || max <= min || max > 16 {
            return Err(LzwError::InvalidCodeLength { min, max });
        }
        Ok(())
    }

    /// The clear code, first code after the literals.
    pub fn clear_code(&self) -> u32 {
        1 << self.min_code_length
    }

    /// The end-of-information code (clear code + 1).
    pub fn end_code(&self) -> u32 {
        self.clear_code() + 1
    }

    /// The first code assigned to a dictionary entry.
    pub fn first_code(&self) -> u32 {
        self.end_code() + 1
    }

    /// Number of codes representable at the maximum code width.
    pub fn code_space(&self) -> u32 {
        1 << self.max_code_length
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LzwConfig::DEFAULT;
        assert_eq!(config.min_code_length, 8);
        assert_eq!(config.max_code_length, 12);
        assert_eq!(config.clear_code(), 256);
        assert_eq!(config.end_code(), 257);
        assert_eq!(config.first_code(), 258);
        assert_eq!(config.code_space(), 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_alphabet() {
        let config = LzwConfig::new(2, 4).with_endianness(Endianness::Little);
        assert_eq!(config.clear_code(), 4);
        assert_eq!(config.first_code(), 6);
        assert!(config.endianness.is_little());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        for (min, max) in [(1, 8), (9, 12), (8, 8), (8, 7), (8, 17)] {
            assert!(
                matches!(
                    LzwConfig::new(min, max).validate(),
                    Err(LzwError::InvalidCodeLength { .. })
                ),
                "{min}..{max} should be rejected"
            );
        }
        assert!(LzwConfig::new(8, 16).validate().is_ok());
    }
}
