//! Key handles and the public-key view used by the export tooling.

use std::fmt;
use std::path::Path;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Error, Result};
use crate::signer::{Capability, Signer, TokenSigner};
use crate::{codec, export, montgomery};

/// Loaded RSA key material.
///
/// Holds the modulus `n`, the public exponent `e` and, for private-capable
/// keys, the private exponent `d`. The private exponent is zeroized when the
/// handle is dropped.
pub struct KeyHandle {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
    pub(crate) d: Option<BigUint>,
}

impl KeyHandle {
    /// Builds a handle from raw components. A handle with `d` signs locally;
    /// one without delegates to an external token.
    pub fn from_components(n: BigUint, e: BigUint, d: Option<BigUint>) -> Self {
        Self { n, e, d }
    }

    /// Returns the modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Returns the public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Which signing backend this handle selects. Fixed for its lifetime.
    pub fn capability(&self) -> Capability {
        if self.d.is_some() {
            Capability::Local
        } else {
            Capability::External
        }
    }
}

// Keeps the private exponent out of logs and panic messages.
impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("n", &self.n)
            .field("e", &self.e)
            .field("d", &self.d.as_ref().map(|_| "<private>"))
            .finish()
    }
}

impl Zeroize for KeyHandle {
    fn zeroize(&mut self) {
        if let Some(d) = &mut self.d {
            d.zeroize();
        }
    }
}

impl Drop for KeyHandle {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for KeyHandle {}

/// View over a loaded key exposing the queries the firmware build needs.
#[derive(Debug)]
pub struct PublicKey {
    key: KeyHandle,
}

impl PublicKey {
    /// Wraps an already-loaded handle.
    pub fn new(key: KeyHandle) -> Self {
        Self { key }
    }

    /// Parses a PEM-encoded key (see [`codec::load_pem`]).
    pub fn from_pem(pem: &str) -> Result<Self> {
        codec::load_pem(pem).map(Self::new)
    }

    /// Loads a PEM-encoded key from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        codec::load_pem_file(path).map(Self::new)
    }

    /// Which signing backend this key selects.
    pub fn capability(&self) -> Capability {
        self.key.capability()
    }

    /// Returns the modulus.
    pub fn n(&self) -> &BigUint {
        &self.key.n
    }

    /// Byte length of the modulus.
    pub fn size(&self) -> usize {
        (self.key.n.bits() + 7) / 8
    }

    /// Number of 32-bit verifier words needed to hold the modulus.
    pub fn nwords(&self) -> usize {
        montgomery::word_count(&self.key.n)
    }

    /// The public exponent as a 32-bit word.
    ///
    /// Fails with [`Error::ExponentTooWide`] for exponents past 32 bits
    /// rather than truncating them.
    pub fn public_exponent(&self) -> Result<u32> {
        self.key.e.to_u32().ok_or(Error::ExponentTooWide)
    }

    /// The Montgomery reduction seed for this modulus.
    pub fn n0inv(&self) -> Result<u32> {
        montgomery::n0inv(&self.key.n)
    }

    /// Little-endian base-2^32 decomposition of `value` into exactly
    /// `nwords` digits.
    pub fn export_words(&self, nwords: usize, value: &BigUint) -> Vec<u32> {
        montgomery::to_words(value, nwords)
    }

    /// Formats `n0inv` plus the word decomposition of `value` as a C array
    /// literal for firmware embedding. Pure formatting, no key mutation.
    pub fn print_array(&self, tag: &str, nwords: usize, value: &BigUint) -> Result<String> {
        let n0inv = self.n0inv()?;
        Ok(export::format_word_array(
            tag,
            n0inv,
            &montgomery::to_words(value, nwords),
        ))
    }

    /// [`print_array`](Self::print_array) applied to the modulus itself.
    pub fn print_modulus(&self, tag: &str) -> Result<String> {
        self.print_array(tag, self.nwords(), &self.key.n)
    }

    /// Builds the signer for this key, fixing the backend from the handle
    /// capability.
    pub fn signer(&self, token: Option<Box<dyn TokenSigner>>) -> Result<Signer> {
        Signer::from_key(&self.key, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    fn toy_view(d: Option<u64>) -> PublicKey {
        PublicKey::new(KeyHandle::from_components(
            BigUint::from_u64(0xFFFF_FFFB).unwrap(),
            BigUint::from_u64(65537).unwrap(),
            d.map(|d| BigUint::from_u64(d).unwrap()),
        ))
    }

    #[test]
    fn capability_follows_private_exponent() {
        assert_eq!(toy_view(None).capability(), Capability::External);
        assert_eq!(toy_view(Some(3)).capability(), Capability::Local);
    }

    #[test]
    fn exponent_wider_than_32_bits_is_an_error() {
        let view = PublicKey::new(KeyHandle::from_components(
            BigUint::from_u64(0xFFFF_FFFB).unwrap(),
            BigUint::from_u64(1 << 33).unwrap(),
            None,
        ));
        assert_eq!(view.public_exponent(), Err(Error::ExponentTooWide));
    }

    #[test]
    fn debug_never_prints_the_private_exponent() {
        let view = toy_view(Some(999_983));
        let text = format!("{view:?}");
        assert!(text.contains("KeyHandle"));
        assert!(text.contains("<private>"));
        assert!(!text.contains("999983"));
    }

    #[test]
    fn toy_modulus_array_literal() {
        let view = toy_view(None);
        assert_eq!(
            view.print_modulus("key").unwrap(),
            "const uint32_t key[1 + 1] = {0xcccccccd, 0xfffffffb};\n"
        );
    }
}
