//! The error types returned by key operations.

use thiserror::Error;

use crate::{crypto::BackendError, jwa::JsonWebAlgorithm};

/// The result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that can occur while constructing keys or running one of the
/// key operations.
///
/// Every failure is reported with a specific kind, so callers can tell apart
/// a token signed with an algorithm they don't support from a token that was
/// tampered with.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested (or defaulted) algorithm is unknown, or can not be used
    /// with this kind of key.
    #[error("the algorithm `{0}` is unknown or not supported by this key")]
    UnknownAlgorithm(JsonWebAlgorithm),

    /// The symmetric key material is absent, or has the wrong length for the
    /// algorithm it is used with.
    #[error("the key material is missing or has an incorrect size")]
    IncorrectKeySize,

    /// A signature or authentication tag did not verify.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// A base64url or DER payload could not be parsed.
    #[error(transparent)]
    MalformedEncoding(#[from] EncodingError),

    /// The key members are present, but do not form a valid key of the claimed
    /// type.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    /// The cryptographic backend failed for an unexpected reason.
    #[error(transparent)]
    Backend(BackendError),
}

/// The ways an encoded payload can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodingError {
    /// The value is not a valid base64url string.
    #[error("encountered invalid Base64Url string")]
    Base64Url,

    /// The value is not valid DER.
    #[error("malformed DER: {0}")]
    Der(der::Error),

    /// The value is shorter than its fixed-size parts require.
    #[error("expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// The minimum number of bytes.
        expected: usize,
        /// The number of bytes that were available.
        actual: usize,
    },

    /// A JWK was expected to be a JSON object.
    #[error("a JSON Web Key must be a JSON object")]
    NotAnObject,
}

impl From<der::Error> for EncodingError {
    fn from(err: der::Error) -> Self {
        Self::Der(err)
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Self::MalformedEncoding(EncodingError::Der(err))
    }
}
