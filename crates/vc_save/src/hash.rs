//! Content hashes of node trees.
//!
//! A hash is taken over the `bincode` encoding of the serialized node tree,
//! so it only depends on the members that are persisted.

use core::fmt;
use core::str::FromStr;
use std::io;

use md5::Md5;
use serde_json::Value;
use sha2::digest::DynDigest;
use sha2::{Sha256, Sha512};

use crate::SaveError;

// -----------------------------------------------------------------------------
// HashAlgorithm

/// A supported digest.
///
/// Names parse case-insensitively, a dash is optional:
///
/// ```
/// use vc_save::hash::HashAlgorithm;
///
/// assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
/// assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
/// assert!("crc32".parse::<HashAlgorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// 16 bytes.
    #[default]
    Md5,
    /// 32 bytes.
    Sha256,
    /// 64 bytes.
    Sha512,
}

impl HashAlgorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// Length of the digest in bytes, the hex string is twice as long.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    fn digest(self) -> Box<dyn DynDigest> {
        match self {
            Self::Md5 => Box::new(Md5::default()),
            Self::Sha256 => Box::new(Sha256::default()),
            Self::Sha512 => Box::new(Sha512::default()),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "MD5" => Ok(Self::Md5),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(SaveError::UnknownAlgorithm(name.to_owned())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// ContentHasher

/// Hashes node trees with one algorithm.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_save::hash::{ContentHasher, HashAlgorithm};
///
/// let hasher = ContentHasher::new(HashAlgorithm::Md5);
/// let a = hasher.hash_node(&json!({ "hp": 10 })).unwrap();
/// let b = hasher.hash_node(&json!({ "hp": 11 })).unwrap();
///
/// assert_eq!(a.len(), 32);
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHasher {
    algorithm: HashAlgorithm,
}

impl ContentHasher {
    #[inline]
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    #[inline]
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lowercase hex digest of the encoded node.
    pub fn hash_node(&self, node: &Value) -> Result<String, SaveError> {
        let mut writer = DigestWriter(self.algorithm.digest());
        bincode::serde::encode_into_std_write(node, &mut writer, bincode::config::standard())?;
        Ok(hex::encode(writer.0.finalize()))
    }
}

/// Feeds encoder output straight into a digest.
struct DigestWriter(Box<dyn DynDigest>);

impl io::Write for DigestWriter {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ContentHasher, HashAlgorithm};
    use crate::SaveError;

    #[test]
    fn parse_names() {
        for (name, expected) in [
            ("MD5", HashAlgorithm::Md5),
            (" md5 ", HashAlgorithm::Md5),
            ("sha256", HashAlgorithm::Sha256),
            ("Sha-256", HashAlgorithm::Sha256),
            ("SHA512", HashAlgorithm::Sha512),
            ("sha-512", HashAlgorithm::Sha512),
        ] {
            assert_eq!(name.parse::<HashAlgorithm>().unwrap(), expected, "{name}");
        }

        assert!(matches!(
            "sha1".parse::<HashAlgorithm>(),
            Err(SaveError::UnknownAlgorithm(name)) if name == "sha1"
        ));
    }

    #[test]
    fn digest_lengths() {
        let node = json!({ "name": "Rex", "tags": ["a", "b"] });
        for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
            let hash = ContentHasher::new(algorithm).hash_node(&node).unwrap();
            assert_eq!(hash.len(), algorithm.output_len() * 2);
            assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn deterministic_and_order_sensitive() {
        let hasher = ContentHasher::default();
        let node = json!({ "a": 1, "b": [true, null, 2.5] });

        assert_eq!(hasher.hash_node(&node).unwrap(), hasher.hash_node(&node).unwrap());
        assert_ne!(
            hasher.hash_node(&json!({ "a": 1 })).unwrap(),
            hasher.hash_node(&json!({ "a": "1" })).unwrap()
        );
    }
}
