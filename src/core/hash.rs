//! Deterministic string hashing.
//!
//! [`StringHash`] is the key used for type names in the
//! [`Factory`](crate::core::factory::Factory) and in
//! [`TypeInfo`](crate::core::typeinfo::TypeInfo) descriptors. The value only
//! depends on the bytes of the string, so hashes are stable across runs and
//! can be compared against values computed at a different time.

use std::fmt;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of a string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StringHash(pub u32);

impl StringHash {
    /// Hash `text`.
    pub const fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut hash = FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        StringHash(hash)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<&str> for StringHash {
    fn from(text: &str) -> Self {
        StringHash::new(text)
    }
}

impl From<&String> for StringHash {
    fn from(text: &String) -> Self {
        StringHash::new(text)
    }
}

impl fmt::Debug for StringHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringHash({:#010x})", self.0)
    }
}

impl fmt::Display for StringHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
