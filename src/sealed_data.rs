//! The bridge between the two shapes of authenticated ciphertext.
//!
//! AEAD primitives commonly produce one *combined* buffer holding
//! `nonce‖ciphertext‖tag`, while JWE transports the three parts as separate
//! `iv`, `ciphertext` and `tag` fields. [`SealedData`] is the structured form
//! and converts losslessly from and to the combined form.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    base64_url::{self, Base64UrlBytes},
    error::{EncodingError, Result},
};

/// The structured output of an AEAD encryption.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SealedData {
    #[serde(rename = "iv")]
    nonce: Base64UrlBytes,
    ciphertext: Base64UrlBytes,
    tag: Base64UrlBytes,
}

impl SealedData {
    /// Creates a new value from its three parts.
    pub fn new(
        nonce: impl Into<Vec<u8>>,
        ciphertext: impl Into<Vec<u8>>,
        tag: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            nonce: Base64UrlBytes(nonce.into()),
            ciphertext: Base64UrlBytes(ciphertext.into()),
            tag: Base64UrlBytes(tag.into()),
        }
    }

    /// Splits a combined `nonce‖ciphertext‖tag` buffer.
    ///
    /// The first `nonce_len` bytes become the nonce, the last `tag_len` bytes
    /// the tag and everything in between the ciphertext, which may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEncoding`](crate::Error::MalformedEncoding) if the
    /// buffer is shorter than `nonce_len + tag_len`.
    pub fn from_combined(combined: &[u8], nonce_len: usize, tag_len: usize) -> Result<Self> {
        let too_short = || EncodingError::Truncated {
            expected: nonce_len.saturating_add(tag_len),
            actual: combined.len(),
        };
        match nonce_len.checked_add(tag_len) {
            Some(min) if combined.len() >= min => {}
            _ => return Err(too_short().into()),
        }

        let (nonce, rest) = combined.split_at(nonce_len);
        let (ciphertext, tag) = rest.split_at(rest.len() - tag_len);
        Ok(Self::new(nonce, ciphertext, tag))
    }

    /// Concatenates the parts into the combined `nonce‖ciphertext‖tag` form.
    pub fn to_combined(&self) -> Vec<u8> {
        let mut combined =
            Vec::with_capacity(self.nonce.0.len() + self.ciphertext.0.len() + self.tag.0.len());
        combined.extend_from_slice(&self.nonce.0);
        combined.extend_from_slice(&self.ciphertext.0);
        combined.extend_from_slice(&self.tag.0);
        combined
    }

    /// The nonce, called `iv` in JWE.
    #[inline]
    pub fn nonce(&self) -> &[u8] {
        &self.nonce.0
    }

    /// The encrypted payload without nonce or tag.
    #[inline]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext.0
    }

    /// The authentication tag.
    #[inline]
    pub fn tag(&self) -> &[u8] {
        &self.tag.0
    }

    /// Returns the `(nonce, ciphertext, tag)` parts.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        (self.nonce.0, self.ciphertext.0, self.tag.0)
    }
}

impl fmt::Debug for SealedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedData")
            .field("iv", &base64_url::encode(self.nonce()))
            .field("ciphertext", &base64_url::encode(self.ciphertext()))
            .field("tag", &base64_url::encode(self.tag()))
            .finish()
    }
}

/// The input of a decrypt operation.
///
/// Decryption accepts both shapes, so a caller never has to know which one
/// the producer of the ciphertext used.
#[derive(Debug, Clone, Copy)]
pub enum Ciphertext<'a> {
    /// Separate nonce, ciphertext and tag.
    Sealed(&'a SealedData),
    /// A single `nonce‖ciphertext‖tag` buffer.
    Combined(&'a [u8]),
}

impl Ciphertext<'_> {
    /// Brings this input into the structured form, using the fixed nonce and
    /// tag lengths of the primitive that will open it.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEncoding`](crate::Error::MalformedEncoding) if a
    /// combined buffer is too short.
    pub fn to_sealed(self, nonce_len: usize, tag_len: usize) -> Result<SealedData> {
        match self {
            Self::Sealed(sealed) => Ok(sealed.clone()),
            Self::Combined(combined) => SealedData::from_combined(combined, nonce_len, tag_len),
        }
    }
}

impl<'a> From<&'a SealedData> for Ciphertext<'a> {
    fn from(sealed: &'a SealedData) -> Self {
        Self::Sealed(sealed)
    }
}

impl<'a> From<&'a [u8]> for Ciphertext<'a> {
    fn from(combined: &'a [u8]) -> Self {
        Self::Combined(combined)
    }
}

impl<'a> From<&'a Vec<u8>> for Ciphertext<'a> {
    fn from(combined: &'a Vec<u8>) -> Self {
        Self::Combined(combined)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Ciphertext<'a> {
    fn from(combined: &'a [u8; N]) -> Self {
        Self::Combined(combined)
    }
}
