use std::io::Write;

use hkdf_shake::config::{OutputSpec, ScheduleConfig};
use hkdf_shake::hkdf::Hkdf;
use hkdf_shake::mac::{HmacSha256, HmacSha384};
use hkdf_shake::prng::{DEFAULT_PRNG_INFO, Prng, PrngConfig, PrngKind};
use hkdf_shake::types::{Error, HashAlgorithm, decode_hex};
use hkdf_shake::xof::shake256;

#[test]
fn prng_kind_by_name() {
    assert_eq!("shake".parse::<PrngKind>().unwrap(), PrngKind::Shake);
    assert_eq!("hkdf".parse::<PrngKind>().unwrap(), PrngKind::Hkdf);
    match "xorshift".parse::<PrngKind>() {
        Err(Error::UnsupportedPrng(name)) => assert_eq!(name, "xorshift"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn shake_prng_squeezes_one_stream() {
    let config = PrngConfig::with_kind(PrngKind::Shake);
    let mut prng = Prng::new(&config, b"seed").unwrap();

    let mut outputs = Vec::new();
    for _ in 0..3 {
        outputs.extend(prng.next_output().unwrap());
    }
    assert_eq!(prng.counter(), 3);
    assert_eq!(outputs, shake256(b"seed", 96));
}

#[test]
fn hkdf_prng_salts_with_minimal_counter_bytes() {
    let config = PrngConfig::with_kind(PrngKind::Hkdf);
    let mut prng = Prng::new(&config, b"seed").unwrap();
    let outputs: Vec<Vec<u8>> = (0..257).map(|_| prng.next_output().unwrap()).collect();
    assert_ne!(outputs[0], outputs[1]);
    assert_eq!(outputs[0].len(), 32);

    let expected = |salt: &[u8]| {
        HashAlgorithm::Sha256
            .derive(salt, b"seed", DEFAULT_PRNG_INFO.as_bytes(), 32)
            .unwrap()
    };
    // Zero-valued salts of any length give the same HMAC key.
    assert_eq!(outputs[0], expected(&[0, 0, 0]));
    assert_eq!(outputs[0], expected(&[]));
    assert_eq!(outputs[1], expected(&[0x01]));
    assert_eq!(outputs[255], expected(&[0xff]));
    assert_eq!(outputs[256], expected(&[0x01, 0x00]));

    // A fixed-width counter would key HMAC differently.
    assert_ne!(outputs[1], expected(&1u32.to_be_bytes()));
}

#[test]
fn prng_is_reproducible_from_seed() {
    for kind in [PrngKind::Shake, PrngKind::Hkdf] {
        let config = PrngConfig {
            output_len: 48,
            ..PrngConfig::with_kind(kind)
        };
        let mut a = Prng::new(&config, b"same seed").unwrap();
        let mut b = Prng::new(&config, b"same seed").unwrap();
        for _ in 0..4 {
            assert_eq!(a.next_output().unwrap(), b.next_output().unwrap());
        }
    }
}

#[test]
fn hkdf_prng_rejects_oversized_output() {
    let config = PrngConfig {
        output_len: HashAlgorithm::Sha256.max_output_len() + 1,
        ..PrngConfig::with_kind(PrngKind::Hkdf)
    };
    assert!(matches!(
        Prng::new(&config, b"seed"),
        Err(Error::OutputTooLarge { .. })
    ));
}

#[test]
fn prng_config_defaults_from_json() {
    let config: PrngConfig = serde_json::from_str(r#"{"kind": "shake"}"#).unwrap();
    assert_eq!(config.kind, PrngKind::Shake);
    assert_eq!(config.hash, HashAlgorithm::Sha256);
    assert_eq!(config.info, DEFAULT_PRNG_INFO);
    assert_eq!(config.output_len, 32);
}

const SCHEDULE: &str = r#"{
    "hash": "sha384",
    "ikm": "0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b",
    "salt": "000102030405060708090a0b0c",
    "outputs": [
        { "label": "client", "length": 32 },
        { "label": "server", "info": "server traffic", "length": 100 },
        { "label": "empty", "length": 0 }
    ]
}"#;

#[test]
fn schedule_extracts_once_and_expands_each_output() {
    let config = ScheduleConfig::from_json(SCHEDULE).unwrap();
    assert_eq!(config.hash, HashAlgorithm::Sha384);
    let keys = config.derive().unwrap();

    let hk = Hkdf::<HmacSha384>::new(&hex::decode(&config.salt).unwrap(), &[0x0b; 22]).unwrap();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0].label, "client");
    assert_eq!(keys[0].okm, hk.expand(b"client", 32).unwrap());
    assert_eq!(keys[1].okm, hk.expand(b"server traffic", 100).unwrap());
    assert!(keys[2].okm.is_empty());
}

#[test]
fn schedule_defaults_to_sha256_and_empty_salt() {
    let config = ScheduleConfig::from_json(
        r#"{"ikm": "0x0b0b 0b0b", "outputs": [{"label": "k", "length": 16}]}"#,
    )
    .unwrap();
    let keys = config.derive().unwrap();
    let expected = Hkdf::<HmacSha256>::new(&[], &[0x0b; 4])
        .unwrap()
        .expand(b"k", 16)
        .unwrap();
    assert_eq!(keys[0].okm, expected);
}

#[test]
fn schedule_fails_without_partial_output() {
    let config = ScheduleConfig {
        hash: HashAlgorithm::Sha256,
        ikm: "00".into(),
        salt: String::new(),
        outputs: vec![
            OutputSpec {
                label: "ok".into(),
                info: None,
                length: 32,
            },
            OutputSpec {
                label: "too big".into(),
                info: None,
                length: 9000,
            },
        ],
    };
    assert!(matches!(
        config.derive(),
        Err(Error::OutputTooLarge { .. })
    ));
}

#[test]
fn schedule_rejects_bad_hex() {
    let config = ScheduleConfig::from_json(r#"{"ikm": "zz", "outputs": []}"#).unwrap();
    assert!(matches!(config.derive(), Err(Error::InvalidEncoding)));
}

#[test]
fn hex_accepts_a_single_prefix_only() {
    assert_eq!(decode_hex("0x0b").unwrap(), [0x0b]);
    assert_eq!(decode_hex("0b 0c").unwrap(), [0x0b, 0x0c]);
    assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    assert!(matches!(decode_hex("0x0x0b"), Err(Error::InvalidEncoding)));

    let config = ScheduleConfig::from_json(r#"{"ikm": "0x0x0b", "outputs": []}"#).unwrap();
    assert!(matches!(config.derive(), Err(Error::InvalidEncoding)));
}

#[test]
fn schedule_rejects_unknown_hash() {
    let err = ScheduleConfig::from_json(r#"{"hash": "md5", "ikm": "00", "outputs": []}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn schedule_loads_from_file() {
    let path = std::env::temp_dir().join(format!("hkdf_shake_schedule_{}.json", std::process::id()));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(SCHEDULE.as_bytes()).unwrap();
    drop(f);

    let loaded = ScheduleConfig::load(&path).unwrap();
    assert_eq!(loaded, ScheduleConfig::from_json(SCHEDULE).unwrap());
    let _ = std::fs::remove_file(&path);

    assert!(matches!(
        ScheduleConfig::load(&path),
        Err(Error::Io(_))
    ));
}

#[test]
fn derived_key_debug_hides_material() {
    let keys = ScheduleConfig::from_json(SCHEDULE).unwrap().derive().unwrap();
    let shown = format!("{:?}", keys[0]);
    assert!(shown.contains("client"));
    assert!(shown.contains("len"));
    assert!(!shown.contains("okm"));
}
