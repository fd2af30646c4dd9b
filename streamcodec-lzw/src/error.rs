//! LZW-specific error types.

use std::io;
use streamcodec_core::CodecError;
use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// A code the decoder has not been able to assign yet.
    #[error("Invalid LZW code {code} (next assignable code is {next_code})")]
    InvalidCode {
        /// The offending code.
        code: u32,
        /// Next code the decoder would assign.
        next_code: u32,
    },

    /// A byte outside the literal range of the configured code length.
    #[error("Byte {value:#04x} is not a literal for {min_code_length}-bit codes")]
    InvalidLiteral {
        /// The byte that could not be encoded.
        value: u8,
        /// Configured minimum code length.
        min_code_length: u8,
    },

    /// Unsupported code length bounds.
    #[error("Invalid code lengths {min}..{max} (need 2 <= min <= 8 and min < max <= 16)")]
    InvalidCodeLength {
        /// Minimum code length.
        min: u8,
        /// Maximum code length.
        max: u8,
    },
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

impl From<LzwError> for CodecError {
    fn from(err: LzwError) -> Self {
        match err {
            LzwError::InvalidCode { code, .. } => CodecError::invalid_code(code),
            LzwError::InvalidLiteral { value, .. } => CodecError::unsupported_symbol(value),
            invalid @ LzwError::InvalidCodeLength { .. } => {
                CodecError::invalid_config(invalid.to_string())
            }
        }
    }
}

impl From<LzwError> for io::Error {
    fn from(err: LzwError) -> Self {
        CodecError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzwError::InvalidCode {
            code: 300,
            next_code: 260,
        };
        assert!(err.to_string().contains("300"));

        let err = LzwError::InvalidCodeLength { min: 9, max: 12 };
        assert!(err.to_string().contains("9..12"));
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: CodecError = LzwError::InvalidLiteral {
            value: 0x80,
            min_code_length: 7,
        }
        .into();
        assert!(matches!(err, CodecError::UnsupportedSymbol { symbol: 0x80 }));

        let err: CodecError = LzwError::InvalidCodeLength { min: 1, max: 4 }.into();
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
    }
}
