//! HKDF extract-then-expand (RFC 5869) over any [`KeyedHash`].

use std::fmt;
use std::marker::PhantomData;

use crate::mac::{KeyedHash, keyed_digest};
use crate::types::Error;

/// Hard ceiling on expansion blocks; the block counter is a single byte.
pub const MAX_BLOCKS: usize = 255;

pub fn max_output_len<H: KeyedHash>() -> usize {
    MAX_BLOCKS * H::OUTPUT_LEN
}

/// HKDF-Extract: `PRK = HMAC(salt, ikm)`.
pub fn extract<H: KeyedHash>(salt: &[u8], ikm: &[u8]) -> Result<Vec<u8>, Error> {
    if ikm.is_empty() {
        tracing::warn!("hkdf extract called with empty input keying material");
    }
    keyed_digest::<H>(salt, ikm)
}

/// HKDF-Expand: `T(i) = HMAC(prk, T(i-1) || info || i)`, truncated to `length`.
pub fn expand<H: KeyedHash>(prk: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>, Error> {
    let blocks = block_count::<H>(length)?;
    tracing::debug!(length, blocks, hash_len = H::OUTPUT_LEN, "hkdf expand");

    let mut okm = Vec::with_capacity(usize::from(blocks) * H::OUTPUT_LEN);
    let mut previous: Vec<u8> = Vec::new();
    for counter in 1..=blocks {
        let mut mac = H::new_with_key(prk)?;
        mac.update(&previous);
        mac.update(info);
        mac.update(&[counter]);
        previous = mac.digest();
        okm.extend_from_slice(&previous);
    }
    okm.truncate(length);
    Ok(okm)
}

/// Extract then expand in one call.
pub fn derive<H: KeyedHash>(
    salt: &[u8],
    ikm: &[u8],
    info: &[u8],
    length: usize,
) -> Result<Vec<u8>, Error> {
    let prk = extract::<H>(salt, ikm)?;
    expand::<H>(&prk, info, length)
}

fn block_count<H: KeyedHash>(length: usize) -> Result<u8, Error> {
    let blocks = length.div_ceil(H::OUTPUT_LEN);
    u8::try_from(blocks).map_err(|_| Error::OutputTooLarge {
        length,
        blocks,
        max_blocks: MAX_BLOCKS,
    })
}

/// An extracted pseudorandom key, ready for any number of expansions.
///
/// Extraction is done once per shared secret; each `expand` with a distinct
/// `info` then yields an independent sub-key.
pub struct Hkdf<H: KeyedHash> {
    prk: Vec<u8>,
    _hash: PhantomData<fn() -> H>,
}

impl<H: KeyedHash> Hkdf<H> {
    pub fn new(salt: &[u8], ikm: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_prk(extract::<H>(salt, ikm)?))
    }

    /// Wrap a PRK derived elsewhere. No length check is applied.
    pub fn from_prk(prk: impl Into<Vec<u8>>) -> Self {
        Self {
            prk: prk.into(),
            _hash: PhantomData,
        }
    }

    pub fn prk(&self) -> &[u8] {
        &self.prk
    }

    pub fn expand(&self, info: &[u8], length: usize) -> Result<Vec<u8>, Error> {
        expand::<H>(&self.prk, info, length)
    }
}

impl<H: KeyedHash> Clone for Hkdf<H> {
    fn clone(&self) -> Self {
        Self::from_prk(self.prk.clone())
    }
}

impl<H: KeyedHash> fmt::Debug for Hkdf<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hkdf")
            .field("hash_len", &H::OUTPUT_LEN)
            .field("prk", &"<redacted>")
            .finish()
    }
}
