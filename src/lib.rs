#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Usage
//!
//! Derive the verifier parameters for a key and emit the array literal the
//! firmware build embeds:
//!
//! ```
//! use fwsign::{BigUint, KeyHandle, PublicKey};
//!
//! let key = KeyHandle::from_components(
//!     BigUint::from(0xffff_fffbu32), // toy 32-bit modulus
//!     BigUint::from(65537u32),
//!     None,
//! );
//! let view = PublicKey::new(key);
//!
//! assert_eq!(view.n0inv()?, 0xcccc_cccd);
//! assert_eq!(
//!     view.print_modulus("key")?,
//!     "const uint32_t key[1 + 1] = {0xcccccccd, 0xfffffffb};\n"
//! );
//! # Ok::<(), fwsign::Error>(())
//! ```
//!
//! Signing goes through [`Signer`], built once from the loaded key: a
//! private-capable key signs in-process, a public-only key delegates the
//! digest to a [`TokenSigner`] capability.

pub use num_bigint::BigUint;

mod algorithms;
pub mod codec;
pub mod errors;
pub mod export;
pub mod key;
pub mod montgomery;
pub mod signer;

pub use pkcs1;
pub use pkcs8;
pub use sha2;

pub use crate::{
    errors::{Error, Result},
    key::{KeyHandle, PublicKey},
    signer::{Capability, Signature, Signer, TokenSigner},
};
