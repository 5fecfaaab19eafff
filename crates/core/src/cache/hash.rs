//! Content fingerprinting.
//!
//! The fingerprint is a 31-multiplier rolling hash over UTF-16 code units with
//! 32-bit wraparound. It is an identity check only: collisions are possible and
//! tolerated, and it offers no integrity or security guarantee.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Best-effort fingerprint of a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(i32);

impl ContentHash {
    /// Compute the fingerprint of `content`.
    pub fn of(content: &str) -> Self {
        let hash = content
            .encode_utf16()
            .fold(0i32, |hash, unit| hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit)));
        Self(hash)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        assert_eq!(ContentHash::of("").value(), 0);
        assert_eq!(ContentHash::of("").to_string(), "0");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(ContentHash::of("a").value(), 97);
        assert_eq!(ContentHash::of("ab").value(), 97 * 31 + 98);
        assert_eq!(ContentHash::of("hello").value(), 99_162_322);
    }

    #[test]
    fn test_wraps_to_negative() {
        assert_eq!(ContentHash::of("hello world").value(), 1_794_106_052);
        assert_eq!(ContentHash::of("The quick brown fox").value(), -1_739_336_029);
        assert_eq!(ContentHash::of("The quick brown fox").to_string(), "-1739336029");
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(ContentHash::of("ab"), ContentHash::of("ba"));
    }

    #[test]
    fn test_utf16_code_units() {
        // U+1F600 is a surrogate pair, hashed as two code units.
        let expected = (0xD83Di32).wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(ContentHash::of("\u{1F600}").value(), expected);
    }
}
