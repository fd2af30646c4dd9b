//! streamcodec CLI
//!
//! Drives the Base64, canonical Huffman and adaptive LZW codecs over files
//! and demo texts.

mod commands;
mod logging;
mod utils;

use clap::{Args, Parser, Subcommand};
use commands::{CodecKind, TransformOptions, cmd_bench, cmd_decode, cmd_encode, cmd_table};
use std::path::PathBuf;
use streamcodec_core::Endianness;
use streamcodec_lzw::LzwConfig;

#[derive(Parser)]
#[command(name = "streamcodec")]
#[command(
    author,
    version,
    about = "Composable bit-stream codecs: Base64, canonical Huffman and adaptive LZW"
)]
#[command(long_about = "
streamcodec runs byte streams through bit-level codecs.
Codecs: base64, huffman, lzw

Examples:
  streamcodec encode --codec lzw notes.txt -o notes.lzw
  streamcodec decode --codec lzw notes.lzw -o notes.txt
  streamcodec encode --codec huffman notes.txt -o notes.huf --table notes.json
  streamcodec decode --codec huffman notes.huf --table notes.json
  streamcodec encode --codec base64 < image.png
  streamcodec bench
  streamcodec bench --json \"TOBEORNOTTOBEORTOBEORNOT\"
  streamcodec table notes.txt
")]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file (or stdin) with one codec
    #[command(alias = "e")]
    Encode {
        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Decode a file (or stdin) with one codec
    #[command(alias = "d")]
    Decode {
        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Round-trip texts through every codec and print statistics
    #[command(alias = "b")]
    Bench {
        /// Texts to test (the built-in demo texts if empty)
        texts: Vec<String>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        #[command(flatten)]
        lzw: LzwArgs,
    },

    /// Print the Huffman code table built from a file (or stdin)
    #[command(alias = "t")]
    Table {
        /// Input file ("-" for stdin)
        input: Option<PathBuf>,

        /// Output the symbol table file as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Args)]
struct TransformArgs {
    /// Input file ("-" for stdin)
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Codec to use
    #[arg(short, long, value_enum, default_value = "lzw")]
    codec: CodecKind,

    /// Huffman symbol table file (written by encode, read by decode)
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Show progress bar
    #[arg(short = 'P', long)]
    progress: bool,

    #[command(flatten)]
    lzw: LzwArgs,
}

impl TransformArgs {
    fn options(&self) -> TransformOptions<'_> {
        TransformOptions {
            codec: self.codec,
            input: self.input.as_deref(),
            output: self.output.as_deref(),
            table: self.table.as_deref(),
            lzw: self.lzw.config(),
            progress: self.progress,
        }
    }
}

#[derive(Args)]
struct LzwArgs {
    /// LZW literal width in bits
    #[arg(long, default_value_t = LzwConfig::DEFAULT.min_code_length)]
    min_code_length: u8,

    /// LZW widest code in bits
    #[arg(long, default_value_t = LzwConfig::DEFAULT.max_code_length)]
    max_code_length: u8,

    /// Pack LZW codes least significant bit first
    #[arg(long)]
    little_endian: bool,
}

impl LzwArgs {
    fn config(&self) -> LzwConfig {
        let endianness = if self.little_endian {
            Endianness::Little
        } else {
            Endianness::Big
        };
        LzwConfig::new(self.min_code_length, self.max_code_length).with_endianness(endianness)
    }
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Encode { transform } => cmd_encode(&transform.options()),
        Commands::Decode { transform } => cmd_decode(&transform.options()),
        Commands::Bench { texts, json, lzw } => cmd_bench(texts, lzw.config(), *json, cli.verbose),
        Commands::Table { input, json } => cmd_table(input.as_deref(), *json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
