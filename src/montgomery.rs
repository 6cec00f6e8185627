//! Montgomery parameter derivation for the verified-boot verifier.
//!
//! The embedded verifier works on fixed-width 32-bit words and performs
//! Montgomery reduction seeded by `n0inv`, the negated inverse of the
//! modulus' least-significant word. This module derives those parameters
//! from arbitrary-precision integers: word counts, little-endian base-2^32
//! digit sequences, and the Montgomery transform itself.

use num_bigint::{BigInt, BigUint, ModInverse, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};

use crate::errors::{Error, Result};

/// Width of a verifier word in bits.
pub const WORD_BITS: usize = 32;

const WORD_BYTES: usize = WORD_BITS / 8;

/// Number of 32-bit words needed to hold `n`, i.e. `ceil(byte_len(n) / 4)`.
pub fn word_count(n: &BigUint) -> usize {
    let nbytes = (n.bits() + 7) / 8;
    (nbytes + WORD_BYTES - 1) / WORD_BYTES
}

/// Computes `-(n mod 2^32)^-1 mod 2^32`, the Montgomery reduction seed.
///
/// The negation is exact modulo-2^32 wraparound, never widened or signed.
/// Fails with [`Error::NotInvertible`] when `n` is even, since the low word
/// then shares a factor of two with 2^32.
pub fn n0inv(n: &BigUint) -> Result<u32> {
    let r = BigUint::one() << WORD_BITS;
    let low = n % &r;
    let inv = low.mod_inverse(&r).ok_or(Error::NotInvertible)?;
    // mod_inverse may hand back a representative from either side of zero;
    // reduce to the canonical residue before narrowing.
    let inv = inv.mod_floor(&BigInt::from_biguint(Sign::Plus, r));
    let inv = inv
        .to_u32()
        .expect("residue mod 2^32 fits in a 32-bit word");
    Ok(inv.wrapping_neg())
}

/// Decomposes `value` into exactly `nwords` little-endian base-2^32 digits.
///
/// Digits beyond `nwords` are silently dropped; supplying a sufficient
/// `nwords` is the caller's contract, as it is for the downstream firmware
/// tooling consuming the export.
pub fn to_words(value: &BigUint, nwords: usize) -> Vec<u32> {
    let bytes = value.to_bytes_le();
    (0..nwords)
        .map(|i| {
            let mut word = [0u8; WORD_BYTES];
            for (j, b) in word.iter_mut().enumerate() {
                if let Some(src) = bytes.get(i * WORD_BYTES + j) {
                    *b = *src;
                }
            }
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Reassembles a little-endian base-2^32 digit sequence into an integer.
pub fn from_words(words: &[u32]) -> BigUint {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// Maps `value` into Montgomery form: `(value * 2^(32 * word_count(n))) mod n`.
pub fn to_montgomery(value: &BigUint, n: &BigUint) -> BigUint {
    (value.clone() << (WORD_BITS * word_count(n))) % n
}

/// Undoes [`to_montgomery`]: `(value * R^-1) mod n` for `R = 2^(32 * word_count(n))`.
///
/// Fails with [`Error::NotInvertible`] when `R` has no inverse mod `n`
/// (even modulus).
pub fn from_montgomery(value: &BigUint, n: &BigUint) -> Result<BigUint> {
    let r = BigUint::one() << (WORD_BITS * word_count(n));
    let rinv = (r % n).mod_inverse(n).ok_or(Error::NotInvertible)?;
    let rinv = rinv.mod_floor(&BigInt::from_biguint(Sign::Plus, n.clone()));
    let rinv = rinv
        .to_biguint()
        .expect("canonical residue is non-negative");
    Ok((value * rinv) % n)
}
