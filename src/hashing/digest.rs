use std::fmt;
use std::str::FromStr;

use crate::core::error::PadHunterError;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex form of an MD5 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Hex-encode a raw 16-byte MD5 output
    pub fn from_raw(raw: [u8; 16]) -> Self {
        let mut hex = [0u8; 32];
        for (i, byte) in raw.iter().enumerate() {
            hex[2 * i] = HEX[(byte >> 4) as usize];
            hex[2 * i + 1] = HEX[(byte & 0x0f) as usize];
        }
        Self(hex)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ever holds ASCII hex digits.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Hex character at `position` (0-based)
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.0.get(position).map(|&b| b as char)
    }

    /// Whether the hex form starts with at least `zeros` `'0'` characters
    pub fn has_zero_prefix(&self, zeros: usize) -> bool {
        zeros <= self.0.len() && self.0[..zeros].iter().all(|&b| b == b'0')
    }
}

impl FromStr for Digest {
    type Err = PadHunterError;

    /// Parse 32 lowercase hex characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 32 || !bytes.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(PadHunterError::InvalidArgument(format!("not an MD5 hex digest: {}", s)));
        }
        let mut hex = [0u8; 32];
        hex.copy_from_slice(bytes);
        Ok(Self(hex))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.as_str())
    }
}

/// Computes `md5(salt + index)`, optionally stretched.
#[derive(Debug, Clone)]
pub struct Md5Hasher {
    salt: String,
    stretch_rounds: u32,
}

impl Md5Hasher {
    pub fn new(salt: impl Into<String>, stretch_rounds: u32) -> Self {
        Self {
            salt: salt.into(),
            stretch_rounds,
        }
    }

    /// Base digest of `salt` followed by the decimal `index`, then
    /// `stretch_rounds` more rounds over the previous hex digest.
    pub fn digest(&self, index: u64) -> Digest {
        let mut input = Vec::with_capacity(self.salt.len() + 20);
        input.extend_from_slice(self.salt.as_bytes());
        input.extend_from_slice(index.to_string().as_bytes());

        let mut digest = Digest::from_raw(md5::compute(&input).0);
        for _ in 0..self.stretch_rounds {
            digest = Digest::from_raw(md5::compute(digest.as_bytes()).0);
        }
        digest
    }
}
