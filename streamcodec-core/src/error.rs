//! Error types for streamcodec operations.
//!
//! End of input is deliberately absent from this taxonomy: every reader in
//! the workspace reports exhaustion as `Ok(None)`, and only conditions that
//! indicate corrupted input or mismatched codec state surface as errors.

use std::io;
use thiserror::Error;

/// The main error type for codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O error from the underlying source or sink.
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// A canonical symbol table does not describe a valid binary tree.
    #[error("Malformed code table: {message}")]
    MalformedTable {
        /// Description of the inconsistency.
        message: String,
    },

    /// Accumulated bits exceed every code length without matching a code.
    #[error("No code in table matches {length} bits {raw:#b}")]
    TableMismatch {
        /// Bits accumulated so far, first bit in the most significant position.
        raw: u64,
        /// Number of accumulated bits.
        length: u8,
    },

    /// A symbol has no code in the active table.
    #[error("Symbol {symbol:#04x} is not present in the code table")]
    UnsupportedSymbol {
        /// The symbol that could not be encoded.
        symbol: u8,
    },

    /// A wire unit could not be mapped back to a value.
    #[error("Invalid encoded unit {value:#04x}")]
    InvalidUnit {
        /// The raw unit as read from the source.
        value: u8,
    },

    /// A code that the decoder cannot have been sent.
    #[error("Invalid code {code}")]
    InvalidCode {
        /// The offending code.
        code: u32,
    },

    /// Invalid codec configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// The stream was already closed.
    #[error("Stream already closed")]
    StreamClosed,
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a malformed table error.
    pub fn malformed_table(message: impl Into<String>) -> Self {
        Self::MalformedTable {
            message: message.into(),
        }
    }

    /// Create a table mismatch error.
    pub fn table_mismatch(raw: u64, length: u8) -> Self {
        Self::TableMismatch { raw, length }
    }

    /// Create an unsupported symbol error.
    pub fn unsupported_symbol(symbol: u8) -> Self {
        Self::UnsupportedSymbol { symbol }
    }

    /// Create an invalid unit error.
    pub fn invalid_unit(value: u8) -> Self {
        Self::InvalidUnit { value }
    }

    /// Create an invalid code error.
    pub fn invalid_code(code: u32) -> Self {
        Self::InvalidCode { code }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

// Codec errors travel through `std::io::Read`/`Write` as `InvalidData`
// payloads; unwrap them again so callers see the original variant.
impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<CodecError>()) {
            return Self::Io(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<CodecError>()) {
            Some(Ok(codec)) => *codec,
            Some(Err(other)) => Self::Io(io::Error::new(kind, other)),
            None => Self::Io(io::Error::from(kind)),
        }
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::unsupported_symbol(0x41);
        assert!(err.to_string().contains("0x41"));

        let err = CodecError::table_mismatch(0b101, 3);
        assert!(err.to_string().contains("3 bits"));

        let err = CodecError::malformed_table("3 top-level nodes");
        assert!(err.to_string().contains("3 top-level nodes"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CodecError = io_err.into();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn test_codec_error_survives_io_boundary() {
        let io_err: io::Error = CodecError::invalid_code(999).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);

        let back: CodecError = io_err.into();
        assert!(matches!(back, CodecError::InvalidCode { code: 999 }));
    }
}
