//! Padding and mask-generation primitives backing the signing and
//! provisioning paths.

pub(crate) mod mgf;
pub(crate) mod oaep;
pub(crate) mod pad;
pub(crate) mod pkcs1v15;
