//! The interfaces for AES-GCM.

use crate::{error::Result, jwa};

/// The common operations for an AES-GCM key.
///
/// Nonces are always [`AesGcm::NONCE_SIZE`](jwa::AesGcm::NONCE_SIZE) and
/// tags [`AesGcm::TAG_SIZE`](jwa::AesGcm::TAG_SIZE) bytes long, callers check
/// the lengths before invoking the backend.
pub(crate) trait Key: Sized {
    /// Creates a new key from the given data.
    ///
    /// Fails if the key length does not match the variant.
    fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self>;

    /// Encrypts `buffer` in place and returns the authentication tag.
    fn seal_in_place(&self, nonce: &[u8], aad: &[u8], buffer: &mut [u8]) -> Result<Vec<u8>>;

    /// Verifies `tag` and decrypts `buffer` in place.
    ///
    /// The buffer must be left untouched if the tag does not verify.
    fn open_in_place(&self, nonce: &[u8], aad: &[u8], buffer: &mut [u8], tag: &[u8])
        -> Result<()>;
}
