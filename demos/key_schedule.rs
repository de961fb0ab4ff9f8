//! Extract once, expand many.
//!
//! A protocol layer typically holds one shared secret and needs several
//! unrelated keys from it. This walks through that pattern:
//! 1. Extract a PRK from the secret and a public salt.
//! 2. Expand the PRK once per purpose, each with its own info tag.
//! 3. Squeeze a SHAKE256 stream as the sponge-based alternative.
//!
//! Run with `RUST_LOG=debug` to see the derivation events.

use hkdf_shake::hkdf::Hkdf;
use hkdf_shake::mac::HmacSha256;
use hkdf_shake::types::Error;
use hkdf_shake::xof::{XofVariant, create_extendable_hash};

fn main() -> Result<(), Error> {
    hkdf_shake::logging::init_tracing(None);

    let shared_secret = [0x42u8; 32];
    let salt = b"key-schedule-demo-v1";

    let hk = Hkdf::<HmacSha256>::new(salt, &shared_secret)?;
    println!("prk:         {}", hex::encode(hk.prk()));

    for (purpose, len) in [("client write key", 16), ("server write key", 16), ("iv", 12)] {
        let okm = hk.expand(purpose.as_bytes(), len)?;
        println!("{purpose:<12} {}", hex::encode(okm));
    }

    // Asking past 255 blocks is a hard error, never a shorter key.
    match hk.expand(b"too long", 255 * 32 + 1) {
        Err(err) => println!("rejected:    {err}"),
        Ok(_) => unreachable!("expand past the block ceiling must fail"),
    }

    let mut xof = create_extendable_hash(XofVariant::Shake256);
    xof.absorb(&shared_secret)?;
    println!("shake256:    {}", hex::encode(xof.squeeze(32)));
    println!("shake256+:   {}", hex::encode(xof.squeeze(32)));
    Ok(())
}
