//! SHAKE extendable-output hash factory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};

use crate::types::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XofVariant {
    Shake128,
    #[default]
    Shake256,
}

impl XofVariant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Shake128 => "shake128",
            Self::Shake256 => "shake256",
        }
    }

    pub fn security_bits(self) -> u32 {
        match self {
            Self::Shake128 => 128,
            Self::Shake256 => 256,
        }
    }
}

impl fmt::Display for XofVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for XofVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shake128" => Ok(Self::Shake128),
            "shake256" => Ok(Self::Shake256),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

enum Sponge {
    Shake128(Shake128),
    Shake256(Shake256),
}

impl Sponge {
    fn new(variant: XofVariant) -> Self {
        match variant {
            XofVariant::Shake128 => Sponge::Shake128(Shake128::default()),
            XofVariant::Shake256 => Sponge::Shake256(Shake256::default()),
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        match self {
            Sponge::Shake128(h) => h.update(data),
            Sponge::Shake256(h) => h.update(data),
        }
    }

    fn finalize(self) -> Squeezer {
        match self {
            Sponge::Shake128(h) => Squeezer::Shake128(h.finalize_xof()),
            Sponge::Shake256(h) => Squeezer::Shake256(h.finalize_xof()),
        }
    }
}

enum Squeezer {
    Shake128(Shake128Reader),
    Shake256(Shake256Reader),
}

impl Squeezer {
    fn read(&mut self, out: &mut [u8]) {
        match self {
            Squeezer::Shake128(r) => r.read(out),
            Squeezer::Shake256(r) => r.read(out),
        }
    }
}

enum Phase {
    Absorbing(Sponge),
    Squeezing(Squeezer),
}

/// A stateful SHAKE instance: absorb input incrementally, then squeeze any
/// number of output bytes. Once squeezing starts no more input is accepted.
pub struct ExtendableHash {
    variant: XofVariant,
    phase: Phase,
    squeezed: usize,
}

/// Construct a fresh, independently owned hash instance for `variant`.
pub fn create_extendable_hash(variant: XofVariant) -> ExtendableHash {
    ExtendableHash {
        variant,
        phase: Phase::Absorbing(Sponge::new(variant)),
        squeezed: 0,
    }
}

impl ExtendableHash {
    pub fn variant(&self) -> XofVariant {
        self.variant
    }

    pub fn security_bits(&self) -> u32 {
        self.variant.security_bits()
    }

    pub fn is_squeezing(&self) -> bool {
        matches!(self.phase, Phase::Squeezing(_))
    }

    /// Total output bytes produced so far.
    pub fn squeezed(&self) -> usize {
        self.squeezed
    }

    pub fn absorb(&mut self, data: &[u8]) -> Result<(), Error> {
        match &mut self.phase {
            Phase::Absorbing(sponge) => {
                sponge.absorb(data);
                Ok(())
            }
            Phase::Squeezing(_) => Err(Error::AlreadySqueezing),
        }
    }

    /// Fill `out` with the next bytes of the output stream.
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        if let Phase::Absorbing(_) = self.phase {
            let placeholder = Phase::Absorbing(Sponge::new(self.variant));
            if let Phase::Absorbing(sponge) = std::mem::replace(&mut self.phase, placeholder) {
                self.phase = Phase::Squeezing(sponge.finalize());
            }
        }
        if let Phase::Squeezing(squeezer) = &mut self.phase {
            squeezer.read(out);
        }
        self.squeezed += out.len();
        tracing::trace!(variant = %self.variant, n = out.len(), total = self.squeezed, "squeeze");
    }

    pub fn squeeze(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.squeeze_into(&mut out);
        out
    }

    /// Consume the instance and return `n` bytes of output.
    pub fn digest(mut self, n: usize) -> Vec<u8> {
        self.squeeze(n)
    }
}

impl fmt::Debug for ExtendableHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendableHash")
            .field("variant", &self.variant)
            .field("squeezing", &self.is_squeezing())
            .field("squeezed", &self.squeezed)
            .finish()
    }
}

pub fn shake128(data: &[u8], n: usize) -> Vec<u8> {
    one_shot(XofVariant::Shake128, data, n)
}

pub fn shake256(data: &[u8], n: usize) -> Vec<u8> {
    one_shot(XofVariant::Shake256, data, n)
}

fn one_shot(variant: XofVariant, data: &[u8], n: usize) -> Vec<u8> {
    let mut sponge = Sponge::new(variant);
    sponge.absorb(data);
    let mut out = vec![0u8; n];
    sponge.finalize().read(&mut out);
    out
}
