//! Key schedule configuration: one shared secret, many labelled sub-keys.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hkdf::Hkdf;
use crate::mac::{HmacSha256, HmacSha384, HmacSha512, KeyedHash};
use crate::types::{Error, HashAlgorithm, decode_hex};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub label: String,
    // Falls back to the label bytes when absent.
    #[serde(default)]
    pub info: Option<String>,
    pub length: usize,
}

impl OutputSpec {
    pub fn info_bytes(&self) -> &[u8] {
        self.info.as_deref().unwrap_or(&self.label).as_bytes()
    }
}

/// Secrets are hex encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub hash: HashAlgorithm,
    pub ikm: String,
    #[serde(default)]
    pub salt: String,
    pub outputs: Vec<OutputSpec>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey {
    pub label: String,
    pub okm: Vec<u8>,
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("label", &self.label)
            .field("len", &self.okm.len())
            .finish()
    }
}

impl ScheduleConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn derive(&self) -> Result<Vec<DerivedKey>, Error> {
        let ikm = decode_hex(&self.ikm)?;
        let salt = decode_hex(&self.salt)?;
        tracing::debug!(hash = %self.hash, outputs = self.outputs.len(), "deriving key schedule");
        match self.hash {
            HashAlgorithm::Sha256 => self.derive_with::<HmacSha256>(&salt, &ikm),
            HashAlgorithm::Sha384 => self.derive_with::<HmacSha384>(&salt, &ikm),
            HashAlgorithm::Sha512 => self.derive_with::<HmacSha512>(&salt, &ikm),
        }
    }

    fn derive_with<H: KeyedHash>(&self, salt: &[u8], ikm: &[u8]) -> Result<Vec<DerivedKey>, Error> {
        let hk = Hkdf::<H>::new(salt, ikm)?;
        self.outputs
            .iter()
            .map(|spec| -> Result<DerivedKey, Error> {
                Ok(DerivedKey {
                    label: spec.label.clone(),
                    okm: hk.expand(spec.info_bytes(), spec.length)?,
                })
            })
            .collect()
    }
}
