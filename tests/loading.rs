//! Key loading and parameter derivation against 2048-bit PEM fixtures.

use fwsign::{BigUint, Capability, Error, PublicKey};

const PRIV_PKCS8: &str = include_str!("keys/rsa2048-priv.pem");
const PRIV_PKCS1: &str = include_str!("keys/rsa2048-priv-pkcs1.pem");
const PUB_SPKI: &str = include_str!("keys/rsa2048-pub.pem");
const PUB_PKCS1: &str = include_str!("keys/rsa2048-pub-pkcs1.pem");

#[test]
fn private_key_grammars_load_as_local() {
    for pem in [PRIV_PKCS8, PRIV_PKCS1] {
        let view = PublicKey::from_pem(pem).unwrap();
        assert_eq!(view.capability(), Capability::Local);
        assert_eq!(view.size(), 256);
        assert_eq!(view.nwords(), 64);
        assert_eq!(view.public_exponent().unwrap(), 65537);
    }
}

#[test]
fn public_key_grammars_load_as_external() {
    for pem in [PUB_SPKI, PUB_PKCS1] {
        let view = PublicKey::from_pem(pem).unwrap();
        assert_eq!(view.capability(), Capability::External);
        assert_eq!(view.nwords(), 64);
    }
}

#[test]
fn all_grammars_agree_on_the_modulus() {
    let reference = PublicKey::from_pem(PRIV_PKCS8).unwrap();
    for pem in [PRIV_PKCS1, PUB_SPKI, PUB_PKCS1] {
        assert_eq!(PublicKey::from_pem(pem).unwrap().n(), reference.n());
    }
}

#[test]
fn n0inv_pinned_for_fixture_key() {
    // Derived independently with OpenSSL + python for this modulus.
    let view = PublicKey::from_pem(PUB_SPKI).unwrap();
    assert_eq!(view.n0inv().unwrap(), 0xf0e5616b);

    let low = view.export_words(1, view.n())[0];
    assert_eq!(view.n0inv().unwrap().wrapping_mul(low), u32::MAX);
}

#[test]
fn malformed_sources_are_unreadable() {
    assert_eq!(PublicKey::from_pem("").unwrap_err(), Error::Unreadable);
    assert_eq!(
        PublicKey::from_pem("definitely not PEM").unwrap_err(),
        Error::Unreadable
    );
    // Truncated fixture: header intact, body mangled.
    let truncated = &PRIV_PKCS8[..120];
    assert_eq!(PublicKey::from_pem(truncated).unwrap_err(), Error::Unreadable);
    assert_eq!(
        PublicKey::load("tests/keys/no-such-file.pem").unwrap_err(),
        Error::Unreadable
    );
}

#[test]
fn print_modulus_round_trips() {
    let view = PublicKey::from_pem(PUB_SPKI).unwrap();
    let text = view.print_modulus("rsa_key").unwrap();

    assert!(text.starts_with("const uint32_t rsa_key[64 + 1] = {"));
    assert!(text.ends_with("};\n"));

    // Parse the literal back and compare against the derived parameters.
    let body = text
        .split_once('{')
        .and_then(|(_, rest)| rest.split_once('}'))
        .map(|(inner, _)| inner)
        .unwrap();
    let entries: Vec<u32> = body
        .split(", ")
        .map(|tok| u32::from_str_radix(tok.trim_start_matches("0x"), 16).unwrap())
        .collect();

    assert_eq!(entries.len(), 64 + 1);
    assert_eq!(entries[0], view.n0inv().unwrap());
    assert_eq!(&entries[1..], &view.export_words(64, view.n())[..]);
}

#[test]
fn export_words_reassemble_modulo_word_span() {
    let view = PublicKey::from_pem(PUB_SPKI).unwrap();
    let words = view.export_words(64, view.n());
    let mut reassembled = BigUint::from(0u32);
    for word in words.iter().rev() {
        reassembled = (reassembled << 32) + BigUint::from(*word);
    }
    assert_eq!(&reassembled, view.n());
}
