//! Encode and decode command implementations.

use super::CodecKind;
use super::table::TableFile;
use crate::utils::{create_progress_bar, read_input, write_output};
use std::error::Error;
use std::path::Path;
use streamcodec_base64::Base64Codec;
use streamcodec_core::Codec;
use streamcodec_huffman::HuffmanCodec;
use streamcodec_lzw::{LzwCodec, LzwConfig};
use tracing::info;

/// Settings shared by `encode` and `decode`.
#[derive(Debug, Clone, Copy)]
pub struct TransformOptions<'a> {
    pub codec: CodecKind,
    pub input: Option<&'a Path>,
    pub output: Option<&'a Path>,
    /// Huffman symbol table sidecar.
    pub table: Option<&'a Path>,
    pub lzw: LzwConfig,
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Compress,
    Decompress,
}

pub fn cmd_encode(options: &TransformOptions<'_>) -> Result<(), Box<dyn Error>> {
    let data = read_input(options.input)?;

    let encoded = match options.codec {
        CodecKind::Base64 => run(&mut Base64Codec, &data, options.progress, Direction::Compress)?,
        CodecKind::Lzw => run(
            &mut LzwCodec::new(options.lzw),
            &data,
            options.progress,
            Direction::Compress,
        )?,
        CodecKind::Huffman => {
            let table_path = options
                .table
                .ok_or("--table is required for the huffman codec")?;
            let mut codec = HuffmanCodec::new();
            let encoded = run(&mut codec, &data, options.progress, Direction::Compress)?;
            TableFile::from_codec(&codec).save(table_path)?;
            info!(path = %table_path.display(), "symbol table written");
            encoded
        }
    };

    write_output(options.output, &encoded)?;
    Ok(())
}

pub fn cmd_decode(options: &TransformOptions<'_>) -> Result<(), Box<dyn Error>> {
    let data = read_input(options.input)?;

    let decoded = match options.codec {
        CodecKind::Base64 => run(&mut Base64Codec, &data, options.progress, Direction::Decompress)?,
        CodecKind::Lzw => run(
            &mut LzwCodec::new(options.lzw),
            &data,
            options.progress,
            Direction::Decompress,
        )?,
        CodecKind::Huffman => {
            let table_path = options
                .table
                .ok_or("--table is required for the huffman codec")?;
            let table = TableFile::load(table_path)?;
            let mut codec = HuffmanCodec::from_symbol_table(&table.table, Some(table.symbol_count))?;
            run(&mut codec, &data, options.progress, Direction::Decompress)?
        }
    };

    write_output(options.output, &decoded)?;
    Ok(())
}

/// Push `data` through one direction of `codec` with a progress bar over
/// the consumed input.
fn run(
    codec: &mut dyn Codec,
    data: &[u8],
    progress: bool,
    direction: Direction,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let pb = create_progress_bar(data.len() as u64, progress);
    pb.set_message(codec.name().to_string());

    let mut input = pb.wrap_read(data);
    let mut output = Vec::new();
    match direction {
        Direction::Compress => {
            codec.prepare_compress(data)?;
            codec.compress(&mut input, &mut output)?;
        }
        Direction::Decompress => {
            codec.prepare_decompress(data)?;
            codec.decompress(&mut input, &mut output)?;
        }
    }
    pb.finish_and_clear();

    info!(
        codec = codec.name(),
        ?direction,
        input = data.len(),
        output = output.len(),
        "transform complete"
    );
    Ok(output)
}
