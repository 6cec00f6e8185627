//! Error types shared across the crate.

/// Alias for [`core::result::Result`] with the `fwsign` [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Error variants produced by key loading, parameter derivation and signing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The key source could not be parsed as any supported PEM grammar.
    #[error("unreadable key source")]
    Unreadable,

    /// The low word of the modulus has no inverse mod 2^32 (the modulus is
    /// even).
    #[error("modulus low word is not invertible mod 2^32")]
    NotInvertible,

    /// The modulus is even; Montgomery parameters are undefined.
    #[error("modulus is even")]
    EvenModulus,

    /// The public exponent does not fit in 32 bits.
    #[error("public exponent is wider than 32 bits")]
    ExponentTooWide,

    /// The operation needs private key material but only the public half is
    /// loaded.
    #[error("operation requires a private key")]
    PublicOnly,

    /// The key is public-only and no external token capability was supplied.
    #[error("no signer available: public-only key without a token")]
    NoSigner,

    /// The external signing token reported a failure; surfaced verbatim,
    /// never retried here.
    #[error("external signer unavailable: {0}")]
    SignerUnavailable(String),

    /// The message exceeds the padding capacity for this modulus size.
    #[error("message too long")]
    MessageTooLong,

    /// OAEP unpadding rejected the plaintext.
    #[error("decryption error")]
    Decryption,
}
