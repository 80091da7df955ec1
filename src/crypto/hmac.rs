//! The primitives for working with [HMAC] algorithms.
//!
//! [HMAC]: https://en.wikipedia.org/wiki/HMAC

use subtle::ConstantTimeEq as _;

use super::backend::{
    interface::{self, hmac::Key as _},
    Backend,
};
use crate::{
    error::{Error, Result},
    jwa,
};

type BackendHmacKey = <Backend as interface::Backend>::HmacKey;

/// A key that can be used for computing and checking HMAC tags.
pub(crate) struct Key {
    inner: BackendHmacKey,
}

impl Key {
    /// Creates a new key for the given variant.
    ///
    /// # Errors
    ///
    /// Keys shorter than the output of the hash function are rejected with
    /// [`Error::IncorrectKeySize`].
    pub(crate) fn new(variant: jwa::Hmac, key: &[u8]) -> Result<Self> {
        if key.len() < variant.output_size() {
            return Err(Error::IncorrectKeySize);
        }

        Ok(Self {
            inner: BackendHmacKey::new(variant, key)?,
        })
    }

    /// Computes the MAC of `data`.
    pub(crate) fn sign(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.inner.sign(data)?.as_ref().to_vec())
    }

    /// Recomputes the MAC of `data` and compares it with `signature` in
    /// constant time.
    pub(crate) fn verify(&mut self, data: &[u8], signature: &[u8]) -> Result<()> {
        let expected = self.inner.sign(data)?;

        if bool::from(expected.as_ref().ct_eq(signature)) {
            Ok(())
        } else {
            Err(Error::AuthenticationFailure)
        }
    }
}
