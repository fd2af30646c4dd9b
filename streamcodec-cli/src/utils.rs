//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template(
        "[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▓▒░ ");

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb
}

/// Read a whole file, or stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    match path {
        Some(path) if path != Path::new("-") => {
            File::open(path)?.read_to_end(&mut data)?;
        }
        _ => {
            io::stdin().lock().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

/// Write `data` to a file, or stdout when `path` is absent or `-`.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> io::Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(data)?;
            writer.flush()
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

/// Bytes as dash-separated upper-case hex pairs (`48-69`).
pub fn hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join("-")
}

/// A symbol as a printable character, or its hex value.
pub fn symbol_label(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{symbol:02X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_string() {
        assert_eq!(hex_string(b"Hi"), "48-69");
        assert_eq!(hex_string(&[]), "");
        assert_eq!(hex_string(&[0x0A]), "0A");
    }

    #[test]
    fn test_symbol_label() {
        assert_eq!(symbol_label(b'a'), "'a'");
        assert_eq!(symbol_label(b' '), "' '");
        assert_eq!(symbol_label(b'\n'), "0x0A");
        assert_eq!(symbol_label(0xFF), "0xFF");
    }

    #[test]
    fn test_hidden_progress_bar() {
        assert!(create_progress_bar(10, false).is_hidden());
    }
}
