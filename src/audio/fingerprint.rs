//! Feature-vector hashing.
//!
//! Serialization format: every value is written as fixed-point decimal
//! with five fractional digits, negative zero written as `0.00000`, values
//! joined by a single `,` with no trailing separator, UTF-8 encoded. The
//! digest of those bytes is rendered as lowercase hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512_256};

use super::error::{unsupported, AnalysisError, Result};

const DECIMALS: usize = 5;
const SEPARATOR: &str = ",";

/// Digest used for the fingerprint. Both produce 256-bit digests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha512-256")]
    Sha512_256,
}

impl HashAlgorithm {
    /// Digest length in bytes; the hex fingerprint is twice as long.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512_256 => 32,
        }
    }

    fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            HashAlgorithm::Sha512_256 => format!("{:x}", Sha512_256::digest(bytes)),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha512-256" | "sha512_256" | "sha-512/256" => Ok(HashAlgorithm::Sha512_256),
            other => Err(unsupported(format!("unknown hash algorithm '{}'", other))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => f.write_str("sha256"),
            HashAlgorithm::Sha512_256 => f.write_str("sha512-256"),
        }
    }
}

/// Canonical text form of a feature vector.
pub fn serialize(features: &[f64]) -> String {
    features
        .iter()
        // Adding +0.0 turns -0.0 into +0.0 so the sign never reaches the text.
        .map(|v| format!("{:.*}", DECIMALS, v + 0.0))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Hex digest of the canonical serialization of `features`.
pub fn fingerprint(features: &[f64], algorithm: HashAlgorithm) -> String {
    let text = serialize(features);
    log::debug!("Hashing {} feature bytes with {}", text.len(), algorithm);
    algorithm.hex_digest(text.as_bytes())
}
