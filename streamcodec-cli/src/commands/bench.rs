//! Bench command implementation: every codec over every text.

use crate::utils::hex_string;
use serde::Serialize;
use std::error::Error;
use streamcodec_base64::Base64Codec;
use streamcodec_core::{Codec, Result, round_trip};
use streamcodec_huffman::HuffmanCodec;
use streamcodec_lzw::{LzwCodec, LzwConfig};
use tracing::debug;

/// Texts used when none are given.
pub const DEMO_TEXTS: [&str; 4] = [
    "Hello, World!\r\n안녕하세요!",
    "BABAABAAA",
    "AAAAAAABBCCCDEEEEFFFFFFGHIIJ",
    "000.000,000.000,000.000,000.000,000.000,000.000,000.000,000.000,\
     000.000,000.000,000.000,000.000,000.000,000.000,000.000,000.000",
];

/// Result of one codec on one text.
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub text: String,
    pub codec: String,
    pub original_len: usize,
    pub compressed_len: usize,
    /// Compressed size as a percentage of the original.
    pub ratio: f64,
    pub ok: bool,
    #[serde(skip)]
    pub compressed: Vec<u8>,
}

fn codecs(lzw: LzwConfig) -> Vec<Box<dyn Codec>> {
    vec![
        Box::new(Base64Codec),
        Box::new(HuffmanCodec::new()),
        Box::new(LzwCodec::new(lzw)),
    ]
}

/// Round-trip each text through each codec.
pub fn run_bench(texts: &[String], lzw: LzwConfig) -> Result<Vec<BenchRow>> {
    let mut rows = Vec::with_capacity(texts.len() * 3);
    for text in texts {
        for mut codec in codecs(lzw) {
            let result = round_trip(codec.as_mut(), text.as_bytes())?;
            debug!(codec = %result.codec, ratio = result.ratio(), "round trip");
            rows.push(BenchRow {
                text: text.clone(),
                ok: result.matches(text.as_bytes()),
                ratio: result.ratio(),
                original_len: result.original_len,
                compressed_len: result.compressed.len(),
                codec: result.codec,
                compressed: result.compressed,
            });
        }
    }
    Ok(rows)
}

pub fn cmd_bench(
    texts: &[String],
    lzw: LzwConfig,
    json: bool,
    verbose: bool,
) -> std::result::Result<(), Box<dyn Error>> {
    let texts: Vec<String> = if texts.is_empty() {
        DEMO_TEXTS.iter().map(|t| t.to_string()).collect()
    } else {
        texts.to_vec()
    };

    let rows = run_bench(&texts, lzw)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for text in &texts {
            println!();
            println!("===== {} =====", text.escape_debug());
            println!(
                "{:>8} {:>10} {:>12} {:>8}  Result",
                "Codec", "Original", "Compressed", "Ratio"
            );
            println!("{}", "-".repeat(52));
            for row in rows.iter().filter(|r| &r.text == text) {
                println!(
                    "{:>8} {:>10} {:>12} {:>7.2}%  {}",
                    row.codec,
                    row.original_len,
                    row.compressed_len,
                    row.ratio,
                    if row.ok { "OK" } else { "FAILED" }
                );
                if verbose {
                    println!("         {}", hex_string(&row.compressed));
                }
            }
        }
    }

    let failures = rows.iter().filter(|r| !r.ok).count();
    if failures > 0 {
        return Err(format!("{failures} round trip(s) failed").into());
    }
    Ok(())
}
