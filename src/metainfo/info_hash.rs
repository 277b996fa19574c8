use std::fmt;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use super::error::MetainfoError;
use crate::bencode::{encode_into, Value};

/// The 20-byte SHA-1 identifier of a torrent's `info` dictionary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Hashes the canonical encoding of `value`.
    ///
    /// Bytes are streamed straight into the digest; no intermediate buffer is
    /// built.
    pub fn of(value: &Value) -> Self {
        let mut hasher = Sha1::new();
        encode_into(value, &mut hasher);
        Self(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetainfoError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| MetainfoError::InvalidInfoHash(format!("{} bytes", bytes.len())))?;
        Ok(Self(arr))
    }

    /// Parses 40 hex characters, either case.
    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        if s.len() != 40 {
            return Err(MetainfoError::InvalidInfoHash(format!(
                "expected 40 hex characters, got {}",
                s.len()
            )));
        }
        let mut arr = [0u8; 20];
        hex::decode_to_slice(s, &mut arr)
            .map_err(|e| MetainfoError::InvalidInfoHash(e.to_string()))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Computes the info hash of a parsed `info` dictionary.
///
/// # Examples
///
/// ```
/// use rscrape::bencode::decode;
/// use rscrape::info_hash;
///
/// let info = decode(b"d6:lengthi5e4:name5:a.txt12:piece lengthi16384ee").unwrap();
/// assert_eq!(info_hash(&info).to_hex().len(), 40);
/// ```
pub fn info_hash(value: &Value) -> InfoHash {
    InfoHash::of(value)
}

impl FromStr for InfoHash {
    type Err = MetainfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for InfoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
