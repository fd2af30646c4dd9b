//! The adaptive LZW dictionary engine.
//!
//! [`LzwProcessor`] owns the code table and the code-length state shared by
//! both directions. The encoder feeds it one byte at a time and receives a
//! code whenever the longest known prefix can no longer be extended; the
//! decoder feeds it codes and receives the key of the entry to output.
//!
//! # Code width synchronization
//!
//! The decoder learns each new entry one code later than the encoder
//! created it, so while the decoder holds a previous code its `next_code`
//! is one behind. [`code_length_grow_threshold`](LzwProcessor::code_length_grow_threshold)
//! compensates by lowering the reading threshold by one in that state.
//! [`finish`](LzwProcessor::finish) advances the encoder's `next_code` for
//! the entry the decoder will add when it receives the flushed code.

use crate::bimap::Bimap;
use crate::config::LzwConfig;
use crate::entry::DictionaryEntry;
use crate::error::{LzwError, Result};
use crate::policy::{CodeLengthPolicy, StandardGrowth};
use tracing::{debug, trace};

/// Longest code length the growth loop will reach.
const MAX_GROWTH: u8 = 31;

/// Outcome of feeding one code to [`LzwProcessor::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// Output the entry stored under this code.
    Entry(u32),
    /// The dictionary was reset.
    Cleared,
    /// End of the encoded data.
    End,
}

/// LZW dictionary and code-length state.
#[derive(Debug, Clone)]
pub struct LzwProcessor<P: CodeLengthPolicy = StandardGrowth> {
    table: Bimap<u32, DictionaryEntry>,
    /// Bytes matched so far by the encoder.
    builder: Vec<u8>,
    policy: P,
    min_code_length: u8,
    max_code_length: u8,
    next_code: u32,
    last_code: Option<u32>,
    code_length: u8,
}

impl LzwProcessor {
    /// Create a processor with [`StandardGrowth`].
    pub fn new(config: &LzwConfig) -> Result<Self> {
        Self::with_policy(config, StandardGrowth)
    }
}

impl<P: CodeLengthPolicy> LzwProcessor<P> {
    /// Create a processor with a custom growth policy.
    pub fn with_policy(config: &LzwConfig, policy: P) -> Result<Self> {
        config.validate()?;
        let mut processor = Self {
            table: Bimap::new(),
            builder: Vec::new(),
            policy,
            min_code_length: config.min_code_length,
            max_code_length: config.max_code_length,
            next_code: 0,
            last_code: None,
            code_length: config.min_code_length,
        };
        processor.clear_table();
        Ok(processor)
    }

    /// Reset the dictionary to the literals and the code length to its minimum.
    pub fn clear_table(&mut self) {
        self.table.clear();
        self.builder.clear();
        for value in 0..self.clear_code() {
            self.table
                .insert(value, DictionaryEntry::literal(value as u8));
        }
        self.next_code = self.end_code() + 1;
        self.last_code = None;
        self.code_length = self.min_code_length;
    }

    /// Add `entry` under the next code, or return its existing code.
    pub fn insert(&mut self, entry: DictionaryEntry) -> u32 {
        if let Some(&key) = self.table.get_by_value(entry.as_bytes()) {
            return key;
        }
        let key = self.next_code;
        self.next_code += 1;
        self.table.insert(key, entry);
        key
    }

    /// Feed one byte to the encoder.
    ///
    /// Returns the code of the longest match once `value` no longer extends
    /// it, or `None` while the match is still growing.
    pub fn encode(&mut self, value: u8) -> Result<Option<u32>> {
        if u32::from(value) >= self.clear_code() {
            return Err(LzwError::InvalidLiteral {
                value,
                min_code_length: self.min_code_length,
            });
        }

        self.builder.push(value);
        if let Some(&key) = self.table.get_by_value(self.builder.as_slice()) {
            self.last_code = Some(key);
            return Ok(None);
        }

        let entry = DictionaryEntry::from(self.builder.as_slice());
        self.insert(entry);
        self.builder.clear();
        self.builder.push(value);

        Ok(self.last_code.replace(u32::from(value)))
    }

    /// Flush the pending match.
    ///
    /// Returns the code of the bytes fed since the last emitted code, if any.
    pub fn finish(&mut self) -> Option<u32> {
        self.builder.clear();
        let code = self.last_code.take();
        if code.is_some() {
            self.next_code += 1;
        }
        code
    }

    /// Feed one code to the decoder.
    pub fn decode(&mut self, code: u32) -> Result<Decoded> {
        if code == self.clear_code() {
            self.clear_table();
            debug!("lzw dictionary cleared by stream");
            return Ok(Decoded::Cleared);
        }
        if code == self.end_code() {
            return Ok(Decoded::End);
        }

        let previous = self.last_code.and_then(|last| self.table.get_by_key(&last));
        let key = match (self.table.get_by_key(&code), previous) {
            (Some(current), Some(previous)) => {
                let entry = current.first().map(|first| previous.extended(first));
                if let Some(entry) = entry {
                    self.insert(entry);
                }
                code
            }
            (Some(_), None) => code,
            (None, Some(previous)) if code == self.next_code => {
                let entry = previous.first().map(|first| previous.extended(first));
                match entry {
                    Some(entry) => self.insert(entry),
                    None => return Err(self.invalid_code(code)),
                }
            }
            (None, _) => return Err(self.invalid_code(code)),
        };

        trace!(code, key, next_code = self.next_code, "lzw code decoded");
        self.last_code = Some(key);
        Ok(Decoded::Entry(key))
    }

    /// Widen the code length until the next code fits.
    pub fn grow_code_length(&mut self, reading: bool) {
        while self.code_length < MAX_GROWTH
            && self.next_code >= self.code_length_grow_threshold(reading)
        {
            self.code_length += 1;
            trace!(code_length = self.code_length, reading, "lzw code length grown");
        }
    }

    /// Next code at which the current code length grows.
    ///
    /// While decoding with a previous code, the threshold is one lower than
    /// the encoder's to account for the entry the decoder has yet to add.
    pub fn code_length_grow_threshold(&self, reading: bool) -> u32 {
        let threshold = self.policy.grow_threshold(self.code_length);
        if reading && self.last_code.is_some() {
            threshold.saturating_sub(1)
        } else {
            threshold
        }
    }

    /// Width in bits of the next code on the wire.
    pub fn code_bits(&self) -> u8 {
        self.code_bits_unclamped().min(self.max_code_length)
    }

    /// Width the next code would need without the maximum applied.
    pub fn code_bits_unclamped(&self) -> u8 {
        self.code_length + 1
    }

    /// Whether the encoder has used up its code space.
    pub fn needs_clear(&self) -> bool {
        self.code_bits_unclamped() > self.max_code_length
            || self.next_code >= 1 << self.max_code_length
    }

    /// Bytes stored under `code`.
    pub fn entry(&self, code: u32) -> Option<&[u8]> {
        self.table.get_by_key(&code).map(DictionaryEntry::as_bytes)
    }

    /// The clear code.
    pub fn clear_code(&self) -> u32 {
        1 << self.min_code_length
    }

    /// The end-of-information code.
    pub fn end_code(&self) -> u32 {
        self.clear_code() + 1
    }

    /// Next code to be assigned.
    pub fn next_code(&self) -> u32 {
        self.next_code
    }

    /// Code of the current encoder match, or the last decoded code.
    pub fn last_code(&self) -> Option<u32> {
        self.last_code
    }

    /// Current code length (the wire width is one more).
    pub fn code_length(&self) -> u8 {
        self.code_length
    }

    /// Number of dictionary entries, literals included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn invalid_code(&self, code: u32) -> LzwError {
        LzwError::InvalidCode {
            code,
            next_code: self.next_code,
        }
    }
}
