//! Common types and error handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hkdf::{self, MAX_BLOCKS};
use crate::mac::{HmacSha256, HmacSha384, HmacSha512, KeyedHash};

#[derive(Debug, Error)]
pub enum Error {
    #[error("HKDF output too large: {length} bytes needs {blocks} blocks, limit is {max_blocks}")]
    OutputTooLarge {
        length: usize,
        blocks: usize,
        max_blocks: usize,
    },
    #[error("keyed hash rejected the key length")]
    InvalidKeyLength,
    #[error("cannot absorb after squeezing has started")]
    AlreadySqueezing,
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("unsupported PRNG: {0}")]
    UnsupportedPrng(String),
    #[error("invalid encoding")]
    InvalidEncoding,
    #[error("missing or invalid argument: {0}")]
    InvalidArgument(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(_: hmac::digest::InvalidLength) -> Self {
        Error::InvalidKeyLength
    }
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Error::InvalidEncoding
    }
}

/// Hash functions the HKDF engine can be instantiated with at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [Self::Sha256, Self::Sha384, Self::Sha512];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Digest size in bytes, which is also the PRK length.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => HmacSha256::OUTPUT_LEN,
            Self::Sha384 => HmacSha384::OUTPUT_LEN,
            Self::Sha512 => HmacSha512::OUTPUT_LEN,
        }
    }

    pub fn max_output_len(self) -> usize {
        MAX_BLOCKS * self.output_len()
    }

    pub fn extract(self, salt: &[u8], ikm: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            Self::Sha256 => hkdf::extract::<HmacSha256>(salt, ikm),
            Self::Sha384 => hkdf::extract::<HmacSha384>(salt, ikm),
            Self::Sha512 => hkdf::extract::<HmacSha512>(salt, ikm),
        }
    }

    pub fn expand(self, prk: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>, Error> {
        match self {
            Self::Sha256 => hkdf::expand::<HmacSha256>(prk, info, length),
            Self::Sha384 => hkdf::expand::<HmacSha384>(prk, info, length),
            Self::Sha512 => hkdf::expand::<HmacSha512>(prk, info, length),
        }
    }

    pub fn derive(
        self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        length: usize,
    ) -> Result<Vec<u8>, Error> {
        let prk = self.extract(salt, ikm)?;
        self.expand(&prk, info, length)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

pub fn decode_hex(s: &str) -> Result<Vec<u8>, Error> {
    // Accept an optional 0x prefix and ignore embedded whitespace.
    let cleaned: String = s
        .strip_prefix("0x")
        .unwrap_or(s)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Ok(hex::decode(cleaned)?)
}
