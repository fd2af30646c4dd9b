//! Code tables: the symbol-to-code mapping used by the streams, and the
//! portable per-depth symbol lists transmitted instead of the tree.

use crate::code::CanonicalCode;

/// Mapping from byte symbols to their codes.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Code per symbol.
    by_symbol: [Option<CanonicalCode>; 256],
    /// Entries in insertion order, scanned when decoding.
    entries: Vec<(u8, CanonicalCode)>,
    /// Longest code in the table.
    max_length: u8,
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            by_symbol: [None; 256],
            entries: Vec::new(),
            max_length: 0,
        }
    }

    /// Assign `code` to `symbol`, replacing any previous code.
    pub fn insert(&mut self, symbol: u8, code: CanonicalCode) {
        if self.by_symbol[symbol as usize].replace(code).is_some() {
            self.entries.retain(|&(s, _)| s != symbol);
        }
        self.entries.push((symbol, code));
        self.max_length = self.entries.iter().map(|(_, c)| c.length()).max().unwrap_or(0);
    }

    /// The code of `symbol`, if any.
    pub fn get(&self, symbol: u8) -> Option<CanonicalCode> {
        self.by_symbol[symbol as usize]
    }

    /// The symbol whose code equals `code`, found by linear scan.
    pub fn find(&self, code: CanonicalCode) -> Option<u8> {
        self.entries
            .iter()
            .find(|&&(_, candidate)| candidate == code)
            .map(|&(symbol, _)| symbol)
    }

    /// Longest code length in the table (0 when empty).
    pub fn max_length(&self) -> u8 {
        self.max_length
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, CanonicalCode)> + '_ {
        self.by_symbol
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CodeTable {
    fn eq(&self, other: &Self) -> bool {
        self.by_symbol == other.by_symbol
    }
}

impl Eq for CodeTable {}

/// Symbols grouped by the depth of their leaf.
///
/// `levels[0]` lists the symbols whose code is one bit long, `levels[1]`
/// the two-bit ones, and so on. Within a level the order is significant: it
/// fixes which code each symbol receives when the tree is rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SymbolTable {
    levels: Vec<Vec<u8>>,
}

impl SymbolTable {
    /// Create a table from per-depth symbol lists, shallowest first.
    pub fn new(levels: Vec<Vec<u8>>) -> Self {
        Self { levels }
    }

    /// Per-depth symbol lists, shallowest first.
    pub fn levels(&self) -> &[Vec<u8>] {
        &self.levels
    }

    /// Symbols whose code is `depth` bits long (`depth` starts at 1).
    pub fn symbols_at(&self, depth: usize) -> &[u8] {
        depth
            .checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of levels, equal to the longest code length.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Total number of symbols.
    pub fn symbol_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Whether the table lists no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Consume the table and return its levels.
    pub fn into_levels(self) -> Vec<Vec<u8>> {
        self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table_lookup() {
        let mut table = CodeTable::new();
        table.insert(b'a', CanonicalCode::new(0b0, 1));
        table.insert(b'b', CanonicalCode::new(0b10, 2));
        table.insert(b'c', CanonicalCode::new(0b11, 2));

        assert_eq!(table.len(), 3);
        assert_eq!(table.max_length(), 2);
        assert_eq!(table.get(b'b'), Some(CanonicalCode::new(0b10, 2)));
        assert_eq!(table.get(b'z'), None);
        assert_eq!(table.find(CanonicalCode::new(0b11, 2)), Some(b'c'));
        assert_eq!(table.find(CanonicalCode::new(0b1, 1)), None);
    }

    #[test]
    fn test_code_table_replace() {
        let mut table = CodeTable::new();
        table.insert(b'a', CanonicalCode::new(0b111, 3));
        table.insert(b'a', CanonicalCode::new(0b0, 1));

        assert_eq!(table.len(), 1);
        assert_eq!(table.max_length(), 1);
        assert_eq!(table.find(CanonicalCode::new(0b111, 3)), None);
    }

    #[test]
    fn test_code_table_equality_ignores_insertion_order() {
        let mut first = CodeTable::new();
        first.insert(1, CanonicalCode::new(0, 1));
        first.insert(2, CanonicalCode::new(1, 1));

        let mut second = CodeTable::new();
        second.insert(2, CanonicalCode::new(1, 1));
        second.insert(1, CanonicalCode::new(0, 1));

        assert_eq!(first, second);
    }

    #[test]
    fn test_symbol_table_levels() {
        let table = SymbolTable::new(vec![vec![b'a'], vec![b'b', b'c']]);
        assert_eq!(table.depth(), 2);
        assert_eq!(table.symbols_at(1), b"a");
        assert_eq!(table.symbols_at(2), b"bc");
        assert!(table.symbols_at(0).is_empty());
        assert!(table.symbols_at(3).is_empty());
        assert_eq!(table.symbol_count(), 3);
    }
}
