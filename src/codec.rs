//! PEM key-source decoding.
//!
//! Supports the four grammars the signing tool encounters in practice:
//! PKCS#8 `PRIVATE KEY`, PKCS#1 `RSA PRIVATE KEY`, SPKI `PUBLIC KEY` and
//! PKCS#1 `RSA PUBLIC KEY`. Private grammars are tried first; a source that
//! matches neither family is [`Error::Unreadable`]. A [`KeyHandle`] is never
//! partially populated: it only exists for a fully parsed key.

use std::fs;
use std::path::Path;

use log::{info, warn};
use num_bigint::BigUint;
use pkcs8::{Document, SecretDocument, SubjectPublicKeyInfoRef};

use crate::errors::{Error, Result};
use crate::key::KeyHandle;

fn check_algorithm(algorithm: &pkcs8::AlgorithmIdentifierRef<'_>) -> Result<()> {
    if algorithm.oid != pkcs1::ALGORITHM_OID {
        return Err(Error::Unreadable);
    }
    Ok(())
}

fn decode_private(pem: &str) -> Result<KeyHandle> {
    let (label, doc) = SecretDocument::from_pem(pem).map_err(|_| Error::Unreadable)?;

    let der = match label {
        "PRIVATE KEY" => {
            let info =
                pkcs8::PrivateKeyInfo::try_from(doc.as_bytes()).map_err(|_| Error::Unreadable)?;
            check_algorithm(&info.algorithm)?;
            pkcs1::RsaPrivateKey::try_from(info.private_key).map_err(|_| Error::Unreadable)?
        }
        "RSA PRIVATE KEY" => {
            pkcs1::RsaPrivateKey::try_from(doc.as_bytes()).map_err(|_| Error::Unreadable)?
        }
        _ => return Err(Error::Unreadable),
    };

    Ok(KeyHandle::from_components(
        BigUint::from_bytes_be(der.modulus.as_bytes()),
        BigUint::from_bytes_be(der.public_exponent.as_bytes()),
        Some(BigUint::from_bytes_be(der.private_exponent.as_bytes())),
    ))
}

fn decode_public(pem: &str) -> Result<KeyHandle> {
    let (label, doc) = Document::from_pem(pem).map_err(|_| Error::Unreadable)?;

    let der = match label {
        "PUBLIC KEY" => {
            let spki = SubjectPublicKeyInfoRef::try_from(doc.as_bytes())
                .map_err(|_| Error::Unreadable)?;
            check_algorithm(&spki.algorithm)?;
            pkcs1::RsaPublicKey::try_from(
                spki.subject_public_key.as_bytes().ok_or(Error::Unreadable)?,
            )
            .map_err(|_| Error::Unreadable)?
        }
        "RSA PUBLIC KEY" => {
            pkcs1::RsaPublicKey::try_from(doc.as_bytes()).map_err(|_| Error::Unreadable)?
        }
        _ => return Err(Error::Unreadable),
    };

    Ok(KeyHandle::from_components(
        BigUint::from_bytes_be(der.modulus.as_bytes()),
        BigUint::from_bytes_be(der.public_exponent.as_bytes()),
        None,
    ))
}

/// Parses a PEM-encoded RSA key, private grammars first.
pub fn load_pem(pem: &str) -> Result<KeyHandle> {
    if let Ok(key) = decode_private(pem) {
        return Ok(key);
    }

    match decode_public(pem) {
        Ok(key) => {
            info!("read public key only, assuming token signing");
            Ok(key)
        }
        Err(_) => Err(Error::Unreadable),
    }
}

/// Reads `path` and parses it with [`load_pem`].
pub fn load_pem_file(path: impl AsRef<Path>) -> Result<KeyHandle> {
    let path = path.as_ref();
    let pem = fs::read_to_string(path).map_err(|_| Error::Unreadable)?;
    load_pem(&pem).map_err(|err| {
        warn!("failed to load RSA key from '{}'", path.display());
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_unreadable() {
        assert_eq!(load_pem("not a key").unwrap_err(), Error::Unreadable);
        assert_eq!(
            load_pem("-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n")
                .unwrap_err(),
            Error::Unreadable
        );
    }
}
