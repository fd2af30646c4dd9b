//! # streamcodec core
//!
//! Core components shared by the streamcodec codecs.
//!
//! - [`bitstream`]: Bit-granular reader and writer over byte sources/sinks
//! - [`unit`]: Wire-unit hooks that redefine what a "byte" is on the wire
//! - [`traits`]: The [`Codec`] filter trait
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Harness                                             │
//! │     streamcodec CLI (encode, decode, bench, table)     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Base64, canonical Huffman, adaptive LZW            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, UnitCodec, Codec trait        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use streamcodec_core::{BitReader, BitWriter, Endianness};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new(), Endianness::Little);
//! writer.write_bits(0x5, 3).unwrap();
//! let data = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(data), Endianness::Little);
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0x5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod traits;
pub mod unit;

// Re-exports for convenience
pub use bitstream::{BitCounters, BitReader, BitWriter, Endianness, bit_shift};
pub use error::{CodecError, Result};
pub use traits::{Codec, RoundTrip, round_trip};
pub use unit::{PlainByte, Unit, UnitCodec, next_byte};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitCounters, BitReader, BitWriter, Endianness};
    pub use crate::error::{CodecError, Result};
    pub use crate::traits::Codec;
    pub use crate::unit::{PlainByte, UnitCodec};
}
