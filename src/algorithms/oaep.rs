//! OAEP padding as described in [RFC8017 § 7.1].
//!
//! [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

/// Applies OAEP padding to `msg` with an empty label.
///
/// The message must be no longer than `k - 2 * h_size - 2` where `k` is the
/// byte length of the modulus.
#[inline]
pub(crate) fn oaep_encrypt_pad<R, D>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();

    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let p_hash = D::digest(b"");

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB = pHash || PS || 01 || M
    let db_len = k - h_size - 1;

    db[0..h_size].copy_from_slice(&p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    let mut mgf_digest = D::new();
    mgf1_xor(db, &mut mgf_digest, seed);
    mgf1_xor(seed, &mut mgf_digest, db);

    Ok(em)
}

/// Removes OAEP padding in place, returning the recovered message.
///
/// Note that whether this function returns an error or not discloses secret
/// information. If an attacker can cause this function to run repeatedly and
/// learn whether each instance returned an error then they can decrypt and
/// forge signatures as if they had the private key.
#[inline]
pub(crate) fn oaep_decrypt_unpad<D>(em: &mut [u8], k: usize) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();
    let expected_p_hash = D::digest(b"");

    let res = decrypt_inner::<D>(em, h_size, &expected_p_hash, k)?;
    if res.is_none().into() {
        return Err(Error::Decryption);
    }

    let (out, index) = res.unwrap();

    Ok(out[index as usize..].to_vec())
}

/// Unmasks the encoded block and validates its structure in constant time.
#[inline]
fn decrypt_inner<D>(
    em: &mut [u8],
    h_size: usize,
    expected_p_hash: &[u8],
    k: usize,
) -> Result<CtOption<(Vec<u8>, u32)>>
where
    D: Digest + FixedOutputReset,
{
    if k < 11 || k < h_size * 2 + 2 {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    let mut mgf_digest = D::new();
    mgf1_xor(seed, &mut mgf_digest, db);
    mgf1_xor(db, &mut mgf_digest, seed);

    let hash_are_equal = db[0..h_size].ct_eq(expected_p_hash);

    // The remainder of the plaintext must be zero or more 0x00, followed
    // by 0x01, followed by the message.
    //   looking_for_index: 1 if we are still looking for the 0x01
    //   index: the offset of the first 0x01 byte
    //   nonzero_before_one: 1 if we saw a non-zero byte before the 1
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;

    Ok(CtOption::new(
        (em.to_vec(), index + 2 + (h_size * 2) as u32),
        valid,
    ))
}
