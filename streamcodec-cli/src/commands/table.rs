//! Table command implementation and the symbol table sidecar file.

use crate::utils::{read_input, symbol_label};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use streamcodec_huffman::{CodeTree, HuffmanCodec, SymbolTable};

/// What a Huffman receiver needs besides the encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFile {
    /// Number of encoded symbols; decoding stops there.
    pub symbol_count: u64,
    /// Symbols per code length.
    pub table: SymbolTable,
}

impl TableFile {
    /// Capture the table of a codec that has compressed its input.
    pub fn from_codec(codec: &HuffmanCodec) -> Self {
        Self {
            symbol_count: codec.symbol_count().unwrap_or(0),
            table: codec.symbol_table(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

pub fn cmd_table(input: Option<&Path>, json: bool) -> Result<(), Box<dyn Error>> {
    let data = read_input(input)?;
    let tree = CodeTree::from_data(&data)?;
    let table = tree.to_symbol_table();

    if json {
        let file = TableFile {
            symbol_count: data.len() as u64,
            table,
        };
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }

    let mut counts = [0u64; 256];
    for &byte in &data {
        counts[byte as usize] += 1;
    }

    let codes = tree.to_code_table();
    println!("Huffman Code Table");
    println!("==================");
    println!(
        "{:>8} {:>8} {:>6}  Code",
        "Symbol", "Count", "Bits"
    );
    println!("{}", "-".repeat(40));

    let mut total_bits = 0u64;
    for (symbol, code) in codes.iter() {
        let count = counts[symbol as usize];
        total_bits += count * u64::from(code.length());
        println!(
            "{:>8} {:>8} {:>6}  {}",
            symbol_label(symbol),
            count,
            code.length(),
            code
        );
    }
    println!("{}", "-".repeat(40));
    println!(
        "{} symbols, {} bytes in, {} bits ({} bytes) out",
        codes.len(),
        data.len(),
        total_bits,
        total_bits.div_ceil(8)
    );

    println!();
    println!("Symbol Table ({} levels)", table.depth());
    for (index, level) in table.levels().iter().enumerate() {
        if level.is_empty() {
            continue;
        }
        let labels: Vec<String> = level.iter().map(|&s| symbol_label(s)).collect();
        println!("  {:>2}: {}", index + 1, labels.join(" "));
    }

    println!();
    println!("Tree: {}", tree);
    Ok(())
}
