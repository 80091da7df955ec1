//! This backend implements the primitives using the [RustCrypto] ecosystem.
//!
//! [RustCrypto]: https://github.com/RustCrypto

use rand_core::{OsRng, RngCore as _};
use sha2::Digest as _;
use thiserror::Error;

use super::interface;
use crate::error::{Error, Result};

mod aes_gcm;
mod ec;
mod hmac;

/// The errors that can be produced by the RustCrypto backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The error returned if the key is invalid.
    #[error("invalid key length")]
    InvalidLength,

    /// An AEAD tag did not verify.
    #[error("the authenticated decryption failed")]
    Aead,

    /// A coordinate or scalar of an EC key has the wrong width.
    #[error("expected {expected} bytes for the curve, got {actual}")]
    InvalidEcPoint {
        /// The field size of the curve.
        expected: usize,
        /// The length of the provided value.
        actual: usize,
    },

    /// The coordinates are not a point on the curve.
    #[error("the public key is not a valid point on the curve")]
    InvalidEcKey,

    /// The private scalar does not belong to the public point.
    #[error("the private key does not match the public point")]
    EcKeyMismatch,

    /// An ECDSA operation failed.
    #[error("an ECDSA operation failed: {0}")]
    Ecdsa(signature::Error),

    /// The operating system failed to provide random data.
    #[error("failed to generate random data: {0}")]
    Random(rand_core::Error),
}

impl From<digest::InvalidLength> for BackendError {
    fn from(_: digest::InvalidLength) -> Self {
        Self::InvalidLength
    }
}

impl From<::aes_gcm::Error> for BackendError {
    fn from(_: ::aes_gcm::Error) -> Self {
        Self::Aead
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::InvalidLength => Self::IncorrectKeySize,
            BackendError::Aead => Self::AuthenticationFailure,
            BackendError::InvalidEcPoint { .. } => {
                Self::InvalidKey("a coordinate does not have the width of the curve")
            }
            BackendError::InvalidEcKey => Self::InvalidKey("the point is not on the curve"),
            BackendError::EcKeyMismatch => {
                Self::InvalidKey("the private scalar does not match the public point")
            }
            err => Self::Backend(err),
        }
    }
}

impl From<digest::InvalidLength> for Error {
    fn from(x: digest::InvalidLength) -> Self {
        BackendError::from(x).into()
    }
}

impl From<::aes_gcm::Error> for Error {
    fn from(x: ::aes_gcm::Error) -> Self {
        BackendError::from(x).into()
    }
}

/// The [RustCrypto] based backend.
///
/// [RustCrypto]: https://github.com/RustCrypto
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type AesGcmKey = aes_gcm::Key;
    type EcPrivateKey = ec::PrivateKey;
    type EcPublicKey = ec::PublicKey;
    type HmacKey = hmac::Key;

    fn fill_random(buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| BackendError::Random(e).into())
    }

    fn sha256(data: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(data).to_vec()
    }

    fn sha384(data: &[u8]) -> Vec<u8> {
        sha2::Sha384::digest(data).to_vec()
    }

    fn sha512(data: &[u8]) -> Vec<u8> {
        sha2::Sha512::digest(data).to_vec()
    }
}
