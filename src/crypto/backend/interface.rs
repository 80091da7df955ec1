//! Common traits that define the API each backend must implement.

use crate::error::Result;

pub(crate) mod aes_gcm;
pub(crate) mod ec;
pub(crate) mod hmac;

/// The backend trait that all backends must implement.
///
/// This trait is used to define some commonly used operations, like generating
/// random data or hashing, and the key types of the primitives.
pub(crate) trait Backend {
    /// The HMAC key type.
    type HmacKey: hmac::Key;

    /// The AES-GCM key type.
    type AesGcmKey: aes_gcm::Key;

    /// The EC private key type.
    type EcPrivateKey: ec::PrivateKey<PublicKey = Self::EcPublicKey>;

    /// The EC public key type.
    type EcPublicKey: ec::PublicKey;

    /// Fills the given buffer with random data.
    fn fill_random(buf: &mut [u8]) -> Result<()>;

    /// Calculates the SHA-256 digest of the given data.
    fn sha256(data: &[u8]) -> Vec<u8>;

    /// Calculates the SHA-384 digest of the given data.
    fn sha384(data: &[u8]) -> Vec<u8>;

    /// Calculates the SHA-512 digest of the given data.
    fn sha512(data: &[u8]) -> Vec<u8>;
}
