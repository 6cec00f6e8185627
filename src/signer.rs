//! Signing backends: locally-held private key material or an external
//! hardware token.
//!
//! The backend is fixed when the signer is built from a key handle and never
//! changes afterwards; an external-signer failure is surfaced verbatim and
//! never triggers a fallback to the other backend.

use log::debug;
use num_bigint::BigUint;
use num_integer::Integer;
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::algorithms::oaep::{oaep_decrypt_unpad, oaep_encrypt_pad};
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::pkcs1v15::{pkcs1v15_generate_prefix, pkcs1v15_sign_pad};
use crate::errors::{Error, Result};
use crate::key::KeyHandle;
use crate::montgomery;

/// Which backend produces signatures for a loaded key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Private exponent held locally; signatures are computed in-process.
    Local,
    /// Public-only key; signatures are delegated to a hardware token.
    External,
}

/// Capability interface to an external hardware signing token.
///
/// This is the only boundary to the token; its wire protocol, including any
/// timeout policy, is the implementation's business. Failures are reported
/// as [`Error::SignerUnavailable`] and are not retried by the caller.
pub trait TokenSigner {
    /// Signs a raw SHA-256 digest, returning the raw big-endian signature
    /// bytes.
    fn sign_digest(&self, digest: &[u8]) -> Result<Vec<u8>>;
}

/// A firmware signature in both representations the tooling consumes.
#[derive(Debug)]
pub struct Signature {
    raw: Vec<u8>,
    montgomery: BigUint,
}

impl Signature {
    /// Raw big-endian signature bytes, as wide as the modulus.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The signature in Montgomery form: `(S * 2^(32 * nwords)) mod n`.
    /// Always less than the modulus.
    pub fn montgomery(&self) -> &BigUint {
        &self.montgomery
    }

    /// Little-endian word decomposition of the Montgomery form.
    pub fn montgomery_words(&self, nwords: usize) -> Vec<u32> {
        montgomery::to_words(&self.montgomery, nwords)
    }
}

enum Backend {
    Local { d: BigUint },
    External { token: Option<Box<dyn TokenSigner>> },
}

/// Produces signatures over firmware images with the backend fixed at
/// construction.
pub struct Signer {
    n: BigUint,
    e: BigUint,
    backend: Backend,
}

impl Signer {
    /// Builds a signer from a loaded key handle.
    ///
    /// A handle with a private exponent signs locally and ignores any token;
    /// a public-only handle delegates to `token`. Building an external
    /// signer without a token is allowed, but every [`sign`](Self::sign)
    /// call on it fails with [`Error::NoSigner`]. Fails with
    /// [`Error::EvenModulus`] when the modulus is even, since neither the
    /// verifier parameters nor RSA itself are defined for it.
    pub fn from_key(key: &KeyHandle, token: Option<Box<dyn TokenSigner>>) -> Result<Self> {
        if key.n.is_even() {
            return Err(Error::EvenModulus);
        }

        let backend = match &key.d {
            Some(d) => {
                if token.is_some() {
                    debug!("private key loaded, ignoring token capability");
                }
                Backend::Local { d: d.clone() }
            }
            None => Backend::External { token },
        };

        Ok(Self {
            n: key.n.clone(),
            e: key.e.clone(),
            backend,
        })
    }

    /// Which backend this signer uses. Never changes after construction.
    pub fn capability(&self) -> Capability {
        match self.backend {
            Backend::Local { .. } => Capability::Local,
            Backend::External { .. } => Capability::External,
        }
    }

    /// Byte length of the modulus.
    pub fn size(&self) -> usize {
        (self.n.bits() + 7) / 8
    }

    /// Number of 32-bit verifier words needed to hold the modulus.
    pub fn nwords(&self) -> usize {
        montgomery::word_count(&self.n)
    }

    /// Signs `msg`: SHA-256, PKCS#1 v1.5, then the Montgomery transform
    /// expected by the verifier.
    ///
    /// The local backend pads and exponentiates in-process; the external
    /// backend delegates the digest to the token and treats the returned
    /// bytes as the opaque raw signature.
    pub fn sign(&self, msg: &[u8]) -> Result<Signature> {
        let digest = Zeroizing::new(<[u8; 32]>::from(Sha256::digest(msg)));
        let k = self.size();

        let raw = match &self.backend {
            Backend::Local { d } => {
                debug!("local signing");
                let prefix = pkcs1v15_generate_prefix::<Sha256>();
                let em = Zeroizing::new(pkcs1v15_sign_pad(&prefix, &digest[..], k)?);
                let m = Zeroizing::new(BigUint::from_bytes_be(&em));
                let s = m.modpow(d, &self.n);
                uint_to_be_pad(s, k)?
            }
            Backend::External { token } => {
                let token = token.as_ref().ok_or(Error::NoSigner)?;
                debug!("token signing");
                let sig = token.sign_digest(&digest[..])?;
                let s = BigUint::from_bytes_be(&sig);
                uint_to_be_pad(s, k).map_err(|_| {
                    Error::SignerUnavailable("token signature wider than modulus".into())
                })?
            }
        };

        let s = BigUint::from_bytes_be(&raw);
        let montgomery = montgomery::to_montgomery(&s, &self.n);
        Ok(Signature { raw, montgomery })
    }

    /// Diagnostic path: `input^d mod n` with no hashing or padding.
    ///
    /// Requires the local backend; fails with [`Error::PublicOnly`]
    /// otherwise. Not part of the production signing path.
    pub fn raw(&self, input: &[u8]) -> Result<BigUint> {
        match &self.backend {
            Backend::Local { d } => {
                let m = Zeroizing::new(BigUint::from_bytes_be(input));
                Ok(m.modpow(d, &self.n))
            }
            Backend::External { .. } => Err(Error::PublicOnly),
        }
    }

    /// OAEP(SHA-256) encryption under the public key.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>> {
        let k = self.size();
        let em = oaep_encrypt_pad::<_, Sha256>(rng, msg, k)?;
        let m = BigUint::from_bytes_be(&em);
        let c = m.modpow(&self.e, &self.n);
        uint_to_be_pad(c, k)
    }

    /// OAEP(SHA-256) decryption under the private key. Local backend only.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let d = match &self.backend {
            Backend::Local { d } => d,
            Backend::External { .. } => return Err(Error::PublicOnly),
        };

        let k = self.size();
        let c = BigUint::from_bytes_be(ciphertext);
        if c >= self.n {
            return Err(Error::Decryption);
        }

        let m = c.modpow(d, &self.n);
        let mut em = Zeroizing::new(uint_to_zeroizing_be_pad(m, k)?);
        oaep_decrypt_unpad::<Sha256>(&mut em, k)
    }
}

impl Drop for Signer {
    fn drop(&mut self) {
        if let Backend::Local { d } = &mut self.backend {
            d.zeroize();
        }
    }
}
