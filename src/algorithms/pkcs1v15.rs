//! PKCS#1 v1.5 signature padding as described in [RFC8017 § 9.2].
//!
//! [RFC8017 § 9.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

use digest::Digest;
use pkcs8::AssociatedOid;

use crate::errors::{Error, Result};

/// Applies the signature padding scheme from PKCS#1 v1.5.
///
/// `prefix` is the DER-encoded DigestInfo header for the hash that produced
/// `hashed`; `k` is the byte length of the modulus.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + 11 {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..k].copy_from_slice(hashed);

    Ok(em)
}

/// prefix = 0x30 <oid_len + 8 + digest_len> 0x30 <oid_len + 4> 0x06 <oid_len> oid 0x05 0x00 0x04 <digest_len>
#[inline]
pub(crate) fn pkcs1v15_generate_prefix<D>() -> Vec<u8>
where
    D: Digest + AssociatedOid,
{
    let oid = D::OID.as_bytes();
    let oid_len = oid.len() as u8;
    let digest_len = <D as Digest>::output_size() as u8;
    let mut v = vec![
        0x30,
        oid_len + 8 + digest_len,
        0x30,
        oid_len + 4,
        0x6,
        oid_len,
    ];
    v.extend_from_slice(oid);
    v.extend_from_slice(&[0x05, 0x00, 0x04, digest_len]);
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use sha2::Sha256;

    #[test]
    fn sha256_digest_info_prefix() {
        // DER DigestInfo header for SHA-256, RFC 8017 § 9.2 note 1.
        assert_eq!(
            pkcs1v15_generate_prefix::<Sha256>(),
            hex!("3031300d060960864801650304020105000420").to_vec()
        );
    }

    #[test]
    fn sign_pad_structure() {
        let prefix = pkcs1v15_generate_prefix::<Sha256>();
        let hashed = [0xabu8; 32];
        let em = pkcs1v15_sign_pad(&prefix, &hashed, 128).unwrap();

        assert_eq!(em.len(), 128);
        assert_eq!(&em[..2], &[0x00, 0x01]);
        let t_len = prefix.len() + hashed.len();
        assert!(em[2..128 - t_len - 1].iter().all(|&b| b == 0xff));
        assert_eq!(em[128 - t_len - 1], 0x00);
        assert_eq!(&em[128 - 32..], &hashed[..]);
    }

    #[test]
    fn sign_pad_modulus_too_small() {
        let prefix = pkcs1v15_generate_prefix::<Sha256>();
        let hashed = [0u8; 32];
        assert_eq!(
            pkcs1v15_sign_pad(&prefix, &hashed, 32),
            Err(Error::MessageTooLong)
        );
    }
}
