//!
//! Length-Prefixed Borrowed Strings
//!
//! `LpString` is a view into character data owned by someone else (usually
//! the source buffer the scanner walked) together with a hash of its last
//! few bytes. The hash is a pre-filter only: different hashes prove two
//! strings differ, equal hashes still need a byte comparison.
//!

use std::fmt;

/// Number of trailing bytes folded into a `SuffixHash`.
pub const SUFFIX_HASH_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuffixHash(u32);

impl SuffixHash {
    /// FNV-1a over the length and the last `SUFFIX_HASH_CHARS` bytes.
    pub fn of(bytes: &[u8]) -> Self {
        const OFFSET: u32 = 0x811c_9dc5;
        const PRIME: u32 = 0x0100_0193;

        let mut hash = OFFSET;
        for b in (bytes.len() as u32).to_le_bytes() {
            hash = (hash ^ b as u32).wrapping_mul(PRIME);
        }
        let tail = &bytes[bytes.len().saturating_sub(SUFFIX_HASH_CHARS)..];
        for &b in tail {
            hash = (hash ^ b as u32).wrapping_mul(PRIME);
        }
        SuffixHash(hash)
    }
}

#[derive(Clone, Copy)]
pub struct LpString<'a> {
    text: &'a str,
    hash: SuffixHash,
}

impl<'a> LpString<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            hash: SuffixHash::of(text.as_bytes()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn hash(&self) -> SuffixHash {
        self.hash
    }

    /// Compares against text that carries no precomputed hash.
    pub fn eq_str(&self, other: &str) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.hash != SuffixHash::of(other.as_bytes()) {
            return false;
        }
        self.text.as_bytes() == other.as_bytes()
    }
}

impl PartialEq for LpString<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.text.as_bytes() == other.text.as_bytes()
    }
}

impl Eq for LpString<'_> {}

impl fmt::Debug for LpString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{:08x}", self.text, self.hash.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_depends_only_on_bytes() {
        let source = String::from("let a = 'hello'; let b = 'hello';");
        let first = LpString::new(&source[9..14]);
        let second = LpString::new(&source[26..31]);
        assert_eq!(first.as_str(), "hello");
        assert_eq!(first.hash(), second.hash());
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_covers_suffix_and_length() {
        assert_ne!(SuffixHash::of(b"abcd"), SuffixHash::of(b"abce"));
        assert_ne!(SuffixHash::of(b"xabcd"), SuffixHash::of(b"abcd"));
        // Same length and same last four bytes collide; bytes decide.
        assert_eq!(SuffixHash::of(b"xabcd"), SuffixHash::of(b"yabcd"));
        assert_ne!(LpString::new("xabcd"), LpString::new("yabcd"));
    }

    #[test]
    fn test_eq_str() {
        let s = LpString::new("prototype");
        assert!(s.eq_str("prototype"));
        assert!(!s.eq_str("Prototype"));
        assert!(!s.eq_str("proto"));
    }

    #[test]
    fn test_empty() {
        let s = LpString::new("");
        assert!(s.is_empty());
        assert!(s.eq_str(""));
        assert_eq!(s.hash(), SuffixHash::of(b""));
    }
}
