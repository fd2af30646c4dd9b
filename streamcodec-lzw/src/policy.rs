//! Code-length growth rules.
//!
//! The processor widens its codes whenever the next code to be assigned
//! reaches [`CodeLengthPolicy::grow_threshold`] of the current code length.
//! Codes are written `code_length + 1` bits wide, so a policy must grow no
//! later than `2^(code_length + 1) + 1` for every assigned code to fit;
//! the writer rejects a code wider than the current width.

/// Decides when the code length grows.
pub trait CodeLengthPolicy {
    /// Smallest next code at which `code_length` is too short.
    fn grow_threshold(&self, code_length: u8) -> u32;
}

/// Grow as late as possible: `threshold = 2^(code_length + 1) + 1`.
///
/// The resulting width equals `ceil(log2(next_code))` bits, the tightest
/// width that still holds every assigned code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardGrowth;

impl CodeLengthPolicy for StandardGrowth {
    fn grow_threshold(&self, code_length: u8) -> u32 {
        power_of_two(u32::from(code_length) + 1).saturating_add(1)
    }
}

/// Grow one code earlier than [`StandardGrowth`]: `threshold = 2^(code_length + 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarlyChange;

impl CodeLengthPolicy for EarlyChange {
    fn grow_threshold(&self, code_length: u8) -> u32 {
        power_of_two(u32::from(code_length) + 1)
    }
}

fn power_of_two(exponent: u32) -> u32 {
    1u32.checked_shl(exponent).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_thresholds() {
        assert_eq!(StandardGrowth.grow_threshold(8), 513);
        assert_eq!(StandardGrowth.grow_threshold(11), 4097);
        assert_eq!(StandardGrowth.grow_threshold(31), u32::MAX);
    }

    #[test]
    fn test_standard_matches_log2_width() {
        // Width after growth is the number of bits needed for next_code - 1
        for next_code in 258u32..5000 {
            let mut code_length = 8u8;
            while next_code >= StandardGrowth.grow_threshold(code_length) {
                code_length += 1;
            }
            let needed = 32 - (next_code - 1).leading_zeros();
            assert_eq!(u32::from(code_length) + 1, needed.max(9), "next_code {next_code}");
        }
    }

    #[test]
    fn test_early_change_thresholds() {
        assert_eq!(EarlyChange.grow_threshold(8), 512);
        assert_eq!(EarlyChange.grow_threshold(11), 4096);
    }
}
