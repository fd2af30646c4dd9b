//! Dictionary entries.

use std::borrow::Borrow;
use std::fmt;

/// An immutable byte sequence stored in the LZW dictionary.
///
/// Entries borrow as `[u8]`, so a dictionary keyed by entries can be
/// searched with the encoder's working buffer directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DictionaryEntry(Box<[u8]>);

impl DictionaryEntry {
    /// Create a single-byte entry.
    pub fn literal(value: u8) -> Self {
        Self(Box::new([value]))
    }

    /// Bytes of the entry.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// First byte of the entry.
    pub fn first(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// A new entry made of this one followed by `value`.
    pub fn extended(&self, value: u8) -> Self {
        let mut bytes = Vec::with_capacity(self.0.len() + 1);
        bytes.extend_from_slice(&self.0);
        bytes.push(value);
        Self(bytes.into_boxed_slice())
    }

    /// Number of bytes in the entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the entry has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for DictionaryEntry {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl Borrow<[u8]> for DictionaryEntry {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DictionaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DictionaryEntry({:02x?})", &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_extend() {
        let entry = DictionaryEntry::literal(b'A').extended(b'B');
        assert_eq!(entry.as_bytes(), b"AB");
        assert_eq!(entry.first(), Some(b'A'));
        assert_eq!(entry.len(), 2);
    }

    #[test]
    fn test_lookup_by_slice() {
        let mut map = HashMap::new();
        map.insert(DictionaryEntry::from(&b"xyz"[..]), 7u32);
        assert_eq!(map.get(&b"xyz"[..]), Some(&7));
        assert_eq!(map.get(&b"xy"[..]), None);
    }
}
