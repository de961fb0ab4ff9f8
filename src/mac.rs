//! Keyed-hash capability consumed by the HKDF engine.
//!
//! The engine only needs construct-with-key, update and digest, so any HMAC
//! (or other PRF with the same shape) can be plugged in by implementing
//! [`KeyedHash`].

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::types::Error;

pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha384 = Hmac<Sha384>;
pub type HmacSha512 = Hmac<Sha512>;

pub trait KeyedHash: Sized {
    // Digest size in bytes.
    const OUTPUT_LEN: usize;

    // Start a fresh computation keyed with `key`.
    fn new_with_key(key: &[u8]) -> Result<Self, Error>;

    // Absorb more message bytes.
    fn update(&mut self, data: &[u8]);

    // Finish and return exactly `OUTPUT_LEN` bytes.
    fn digest(self) -> Vec<u8>;
}

macro_rules! impl_keyed_hash_for_hmac {
    ($($hash:ty => $len:expr),+ $(,)?) => {
        $(
            impl KeyedHash for Hmac<$hash> {
                const OUTPUT_LEN: usize = $len;

                fn new_with_key(key: &[u8]) -> Result<Self, Error> {
                    Ok(<Self as Mac>::new_from_slice(key)?)
                }

                fn update(&mut self, data: &[u8]) {
                    Mac::update(self, data);
                }

                fn digest(self) -> Vec<u8> {
                    Mac::finalize(self).into_bytes().to_vec()
                }
            }
        )+
    };
}

impl_keyed_hash_for_hmac!(Sha256 => 32, Sha384 => 48, Sha512 => 64);

/// One-shot keyed hash of a single message.
pub fn keyed_digest<H: KeyedHash>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
    let mut mac = H::new_with_key(key)?;
    mac.update(message);
    Ok(mac.digest())
}
