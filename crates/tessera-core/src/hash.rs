//! SHA-256 digests of signature text

use sha2::{Digest, Sha256};
use std::fmt;

/// Digest of a structural signature.
///
/// Reports show only `short_hex`; equality compares the full digest.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(text: &str) -> Self {
        Self(Sha256::digest(text.as_bytes()).into())
    }

    /// First 8 hex characters, the width used in report columns
    pub fn short_hex(&self) -> String {
        self.0[..4].iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short_hex())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_text_equal_hash() {
        assert_eq!(
            ContentHash::of("Role.Element.Title:Text"),
            ContentHash::of("Role.Element.Title:Text")
        );
        assert_ne!(
            ContentHash::of("Role.Element.Title:Text"),
            ContentHash::of("Role.Element.Description:Text")
        );
    }

    #[test]
    fn test_short_hex() {
        // sha256("abc") = ba7816bf...
        let h = ContentHash::of("abc");
        assert_eq!(h.short_hex(), "ba7816bf");
        assert_eq!(h.to_string(), "ba7816bf");
    }
}
