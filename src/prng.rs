//! Seeded pseudorandom generators selected by name.
//!
//! Peers negotiate which generator to use by name (`"shake"` or `"hkdf"`),
//! so both constructions are exposed behind one type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Error, HashAlgorithm};
use crate::xof::{ExtendableHash, XofVariant, create_extendable_hash};

pub const DEFAULT_PRNG_INFO: &str = "DLEQ_PROOF";
pub const DEFAULT_PRNG_OUTPUT_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrngKind {
    Shake,
    #[default]
    Hkdf,
}

impl fmt::Display for PrngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrngKind::Shake => f.write_str("shake"),
            PrngKind::Hkdf => f.write_str("hkdf"),
        }
    }
}

impl FromStr for PrngKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shake" => Ok(PrngKind::Shake),
            "hkdf" => Ok(PrngKind::Hkdf),
            _ => Err(Error::UnsupportedPrng(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrngConfig {
    pub kind: PrngKind,
    // Only used by the hkdf generator.
    pub hash: HashAlgorithm,
    pub info: String,
    pub output_len: usize,
}

impl Default for PrngConfig {
    fn default() -> Self {
        Self {
            kind: PrngKind::default(),
            hash: HashAlgorithm::default(),
            info: DEFAULT_PRNG_INFO.to_string(),
            output_len: DEFAULT_PRNG_OUTPUT_LEN,
        }
    }
}

impl PrngConfig {
    pub fn with_kind(kind: PrngKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

enum Source {
    // One sponge, squeezed sequentially.
    Shake(ExtendableHash),
    // Fresh derivation per output, salted with the counter.
    Hkdf { seed: Vec<u8> },
}

pub struct Prng {
    config: PrngConfig,
    source: Source,
    counter: u32,
}

impl Prng {
    pub fn new(config: &PrngConfig, seed: &[u8]) -> Result<Self, Error> {
        let source = match config.kind {
            PrngKind::Shake => {
                let mut xof = create_extendable_hash(XofVariant::Shake256);
                xof.absorb(seed)?;
                Source::Shake(xof)
            }
            PrngKind::Hkdf => {
                // Fail at construction rather than on the first output.
                if config.output_len > config.hash.max_output_len() {
                    return Err(Error::OutputTooLarge {
                        length: config.output_len,
                        blocks: config.output_len.div_ceil(config.hash.output_len()),
                        max_blocks: crate::hkdf::MAX_BLOCKS,
                    });
                }
                Source::Hkdf {
                    seed: seed.to_vec(),
                }
            }
        };
        tracing::debug!(kind = %config.kind, output_len = config.output_len, "prng seeded");
        Ok(Self {
            config: config.clone(),
            source,
            counter: 0,
        })
    }

    pub fn kind(&self) -> PrngKind {
        self.config.kind
    }

    /// Number of outputs produced so far.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn next_output(&mut self) -> Result<Vec<u8>, Error> {
        let out = match &mut self.source {
            Source::Shake(xof) => xof.squeeze(self.config.output_len),
            Source::Hkdf { seed } => {
                let salt = counter_salt(self.counter);
                self.config.hash.derive(
                    &salt,
                    seed,
                    self.config.info.as_bytes(),
                    self.config.output_len,
                )?
            }
        };
        self.counter = self.counter.wrapping_add(1);
        Ok(out)
    }
}

/// Minimal big-endian encoding of `counter`; zero encodes as `[0]`.
///
/// HMAC right-pads keys with zeros, so leading zero bytes would change the
/// key for every nonzero counter.
fn counter_salt(counter: u32) -> Vec<u8> {
    let bytes = counter.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

impl fmt::Debug for Prng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prng")
            .field("config", &self.config)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}
