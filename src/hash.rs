use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// a 160-bit object hash, the identity of every object in the store
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid([u8; 20]);

impl Oid {
    pub const ZERO: Oid = Oid([0u8; 20]);

    /// parse from a lowercase or uppercase 40-character hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 40 {
            return Err(Error::InvalidHash(s.to_string()));
        }
        let bytes = hex::decode(s).map_err(|_| Error::InvalidHash(s.to_string()))?;
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// parse from a raw 20-byte slice, as found in a tree entry
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 20 {
            return Err(Error::InvalidHash(hex::encode(bytes)));
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// lowercase 40-character hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// split into the `objects/<xx>/<yy...>` path components
    pub fn to_path_components(&self) -> (String, String) {
        let hex = self.to_hex();
        (hex[..2].to_string(), hex[2..].to_string())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", &self.to_hex()[..12])
    }
}

/// sha1 of arbitrary bytes, used directly on the canonical `type SP size NUL payload` form
pub fn sha1(bytes: &[u8]) -> Oid {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    Oid(hasher.finalize().into())
}
