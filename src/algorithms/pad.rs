//! Fixed-width big-endian encoding of big integers.

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::MessageTooLong);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Converts input to a vector of the given length, big-endian, left padded
/// with 0s.
#[inline]
pub(crate) fn uint_to_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    left_pad(&input.to_bytes_be(), padded_len)
}

/// Same as [`uint_to_be_pad`], but zeroizes the intermediate encodings of a
/// secret value.
#[inline]
pub(crate) fn uint_to_zeroizing_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    let m = Zeroizing::new(input);
    let m = Zeroizing::new(m.to_bytes_be());
    left_pad(&m, padded_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_pad_bounds() {
        let input = [1u8, 2, 3];

        let padded = left_pad(&input, 4).unwrap();
        assert_eq!(padded, vec![0, 1, 2, 3]);

        let padded = left_pad(&input, 3).unwrap();
        assert_eq!(padded, vec![1, 2, 3]);

        assert!(left_pad(&input, 2).is_err());
    }
}
