//! Command implementations for the streamcodec CLI.

pub mod bench;
pub mod table;
pub mod transform;

pub use bench::cmd_bench;
pub use table::cmd_table;
pub use transform::{TransformOptions, cmd_decode, cmd_encode};

use clap::ValueEnum;

/// Codec selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodecKind {
    /// Base64 text encoding
    Base64,
    /// Canonical Huffman coding (needs a table file)
    Huffman,
    /// Adaptive variable-width LZW
    Lzw,
}
