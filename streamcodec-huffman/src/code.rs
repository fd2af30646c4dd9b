//! Canonical codes: a bit pattern plus its length.

use std::cmp::Ordering;
use std::fmt;

/// Maximum supported code length in bits.
pub const MAX_CODE_LENGTH: u8 = 64;

/// A prefix code represented only by its bits and bit length.
///
/// The first bit of the code is the most significant of the `length` low
/// bits of `raw`. Two codes are equal when both fields match; ordering is
/// lexicographic on the bit string, so `001` sorts before `01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanonicalCode {
    raw: u64,
    length: u8,
}

impl CanonicalCode {
    /// The empty code of the root node.
    pub const ROOT: Self = Self { raw: 0, length: 0 };

    /// Create a code from its low `length` bits of `raw`.
    pub fn new(raw: u64, length: u8) -> Self {
        debug_assert!(length <= MAX_CODE_LENGTH);
        let raw = if length >= 64 {
            raw
        } else {
            raw & ((1u64 << length) - 1)
        };
        Self { raw, length }
    }

    /// The code bits.
    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// Number of bits in the code.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Whether this is the empty root code.
    pub fn is_root(&self) -> bool {
        self.length == 0
    }

    /// The code of a child reached by following `bit` (left = 0, right = 1).
    pub fn child(self, bit: bool) -> Self {
        Self {
            raw: (self.raw << 1) | u64::from(bit),
            length: self.length + 1,
        }
    }

    /// The bit at `index`, counting from the first transmitted bit.
    pub fn bit(&self, index: u8) -> bool {
        debug_assert!(index < self.length);
        (self.raw >> (self.length - 1 - index)) & 1 == 1
    }

    /// Whether `self` is a bit-prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.length <= other.length
            && other
                .raw
                .checked_shr(u32::from(other.length - self.length))
                .unwrap_or(0)
                == self.raw
    }
}

impl fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.length {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Ord for CanonicalCode {
    fn cmp(&self, other: &Self) -> Ordering {
        let shared = self.length.min(other.length);
        for i in 0..shared {
            match self.bit(i).cmp(&other.bit(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.length.cmp(&other.length)
    }
}

impl PartialOrd for CanonicalCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
