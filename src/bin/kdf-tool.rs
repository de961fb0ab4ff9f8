use std::collections::BTreeMap;
use std::process::ExitCode;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hkdf_shake::ScheduleConfig;
use hkdf_shake::prng::{Prng, PrngConfig, PrngKind};
use hkdf_shake::types::{Error, HashAlgorithm, decode_hex};
use hkdf_shake::xof::{XofVariant, create_extendable_hash};

fn main() -> ExitCode {
    hkdf_shake::logging::init_tracing(None);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        usage();
        return ExitCode::from(2);
    }
    let cmd = &args[0];
    let rest = &args[1..];

    let result = match cmd.as_str() {
        "extract" => cmd_extract(rest),
        "expand" => cmd_expand(rest),
        "hkdf" => cmd_hkdf(rest),
        "shake" => cmd_shake(rest),
        "prng" => cmd_prng(rest),
        "schedule" => cmd_schedule(rest),
        _ => {
            usage();
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(command = %cmd, "{err}");
            eprintln!("kdf-tool: {err}");
            ExitCode::FAILURE
        }
    }
}

fn usage() {
    eprintln!("kdf-tool <cmd> [args]\n");
    eprintln!("Byte arguments are hex encoded.\n");
    eprintln!("Commands:");
    eprintln!("  extract --ikm <hex> [--salt <hex>] [--hash sha256|sha384|sha512]");
    eprintln!("  expand --prk <hex> --len <n> [--info <hex>] [--hash <alg>]");
    eprintln!("  hkdf --ikm <hex> --len <n> [--salt <hex>] [--info <hex>] [--hash <alg>] [--b64]");
    eprintln!("  shake --in <hex> --len <n> [--variant shake128|shake256]");
    eprintln!("  prng --kind shake|hkdf --seed <hex> [--count <n>] [--len <n>] [--hash <alg>] [--info-str <s>]");
    eprintln!("  schedule --config <file.json>");
}

fn cmd_extract(args: &[String]) -> Result<(), Error> {
    let hash = get_hash(args)?;
    let ikm = get_hex(args, "--ikm")?.unwrap_or_default();
    let salt = get_hex(args, "--salt")?.unwrap_or_default();

    let prk = hash.extract(&salt, &ikm)?;
    println!("{}", hex::encode(prk));
    Ok(())
}

fn cmd_expand(args: &[String]) -> Result<(), Error> {
    let hash = get_hash(args)?;
    let prk = require(get_hex(args, "--prk")?, "--prk")?;
    let info = get_hex(args, "--info")?.unwrap_or_default();
    let len = get_usize(args, "--len")?.unwrap_or(hash.output_len());

    let okm = hash.expand(&prk, &info, len)?;
    println!("{}", hex::encode(okm));
    Ok(())
}

fn cmd_hkdf(args: &[String]) -> Result<(), Error> {
    let hash = get_hash(args)?;
    let ikm = get_hex(args, "--ikm")?.unwrap_or_default();
    let salt = get_hex(args, "--salt")?.unwrap_or_default();
    let info = get_hex(args, "--info")?.unwrap_or_default();
    let len = get_usize(args, "--len")?.unwrap_or(hash.output_len());

    let okm = hash.derive(&salt, &ikm, &info, len)?;
    if has_flag(args, "--b64") {
        println!("{}", STANDARD.encode(okm));
    } else {
        println!("{}", hex::encode(okm));
    }
    Ok(())
}

fn cmd_shake(args: &[String]) -> Result<(), Error> {
    let variant = match get_str(args, "--variant") {
        Some(v) => v.parse::<XofVariant>()?,
        None => XofVariant::Shake256,
    };
    let input = get_hex(args, "--in")?.unwrap_or_default();
    let len = get_usize(args, "--len")?.unwrap_or(32);

    let mut xof = create_extendable_hash(variant);
    xof.absorb(&input)?;
    println!("{}", hex::encode(xof.digest(len)));
    Ok(())
}

fn cmd_prng(args: &[String]) -> Result<(), Error> {
    let kind = match get_str(args, "--kind") {
        Some(k) => k.parse::<PrngKind>()?,
        None => PrngKind::default(),
    };
    let mut config = PrngConfig::with_kind(kind);
    config.hash = get_hash(args)?;
    if let Some(len) = get_usize(args, "--len")? {
        config.output_len = len;
    }
    if let Some(info) = get_str(args, "--info-str") {
        config.info = info;
    }
    let seed = get_hex(args, "--seed")?.unwrap_or_default();
    let count = get_usize(args, "--count")?.unwrap_or(1);

    let mut prng = Prng::new(&config, &seed)?;
    for _ in 0..count {
        println!("{}", hex::encode(prng.next_output()?));
    }
    Ok(())
}

fn cmd_schedule(args: &[String]) -> Result<(), Error> {
    let path = require(get_str(args, "--config"), "--config")?;
    let config = ScheduleConfig::load(&path)?;

    let keys: BTreeMap<String, String> = config
        .derive()?
        .into_iter()
        .map(|k| (k.label, STANDARD.encode(k.okm)))
        .collect();
    println!("{}", serde_json::to_string_pretty(&keys)?);
    Ok(())
}

fn get_hash(args: &[String]) -> Result<HashAlgorithm, Error> {
    match get_str(args, "--hash") {
        Some(h) => h.parse(),
        None => Ok(HashAlgorithm::default()),
    }
}

fn get_hex(args: &[String], key: &str) -> Result<Option<Vec<u8>>, Error> {
    get_str(args, key).map(|v| decode_hex(&v)).transpose()
}

fn get_usize(args: &[String], key: &str) -> Result<Option<usize>, Error> {
    get_str(args, key)
        .map(|v| {
            v.parse()
                .map_err(|_| Error::InvalidArgument(format!("{key} {v}")))
        })
        .transpose()
}

fn require<T>(value: Option<T>, key: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::InvalidArgument(key.to_string()))
}

fn get_str(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|v| v.to_string())
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}
