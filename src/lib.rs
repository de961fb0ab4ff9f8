#![forbid(unsafe_code)]

pub mod config;
pub mod hkdf;
pub mod logging;
pub mod mac;
pub mod prng;
pub mod types;
pub mod xof;

pub use crate::config::{DerivedKey, OutputSpec, ScheduleConfig};
pub use crate::hkdf::{Hkdf, MAX_BLOCKS, derive, expand, extract, max_output_len};
pub use crate::mac::{HmacSha256, HmacSha384, HmacSha512, KeyedHash};
pub use crate::prng::{Prng, PrngConfig, PrngKind};
pub use crate::types::{Error, HashAlgorithm};
pub use crate::xof::{ExtendableHash, XofVariant, create_extendable_hash, shake128, shake256};
