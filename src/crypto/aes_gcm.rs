//! Authenticated encryption with [AES-GCM].
//!
//! [AES-GCM]: https://en.wikipedia.org/wiki/Galois/Counter_Mode

use super::backend::{
    interface::{self, aes_gcm::Key as _},
    Backend,
};
use crate::{
    error::{Error, Result},
    jwa,
    sealed_data::SealedData,
};

type BackendAesGcmKey = <Backend as interface::Backend>::AesGcmKey;

/// An AES-GCM content encryption key.
pub(crate) struct Key {
    inner: BackendAesGcmKey,
}

impl Key {
    /// Creates a new key for the given variant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncorrectKeySize`] if the key does not have exactly
    /// the length the variant requires.
    pub(crate) fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self> {
        if key.len() != variant.key_size() {
            return Err(Error::IncorrectKeySize);
        }

        Ok(Self {
            inner: BackendAesGcmKey::new(variant, key)?,
        })
    }

    /// Encrypts `plaintext` under a fresh random nonce.
    pub(crate) fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<SealedData> {
        let mut nonce = [0u8; jwa::AesGcm::NONCE_SIZE];
        super::fill_random(&mut nonce)?;

        let mut buffer = plaintext.to_vec();
        let tag = self.inner.seal_in_place(&nonce, aad, &mut buffer)?;

        Ok(SealedData::new(nonce, buffer, tag))
    }

    /// Checks the tag and decrypts the ciphertext of `sealed`.
    ///
    /// # Errors
    ///
    /// Every failure, including a nonce or tag of the wrong length, is
    /// reported as [`Error::AuthenticationFailure`].
    pub(crate) fn open(&self, sealed: &SealedData, aad: &[u8]) -> Result<Vec<u8>> {
        if sealed.nonce().len() != jwa::AesGcm::NONCE_SIZE
            || sealed.tag().len() != jwa::AesGcm::TAG_SIZE
        {
            return Err(Error::AuthenticationFailure);
        }

        let mut buffer = sealed.ciphertext().to_vec();
        self.inner
            .open_in_place(sealed.nonce(), aad, &mut buffer, sealed.tag())?;

        Ok(buffer)
    }
}
