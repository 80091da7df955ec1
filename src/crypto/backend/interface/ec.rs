//! The interfaces for EC keys.

use secrecy::SecretSlice;

use crate::{error::Result, jwa};

/// A public key on one of the NIST curves, with the curve chosen at runtime.
pub(crate) trait PublicKey: Sized + Clone {
    /// Creates a new public key from the given affine coordinates.
    fn new(alg: jwa::EcDSA, x: &[u8], y: &[u8]) -> Result<Self>;

    /// Big-endian affine coordinates, each padded to the field size.
    fn to_point(&self) -> (Vec<u8>, Vec<u8>);

    /// Verifies the raw `r‖s` signature over an already hashed message.
    ///
    /// Returns `true` if the signature is valid, `false` otherwise.
    fn verify_prehash(&self, prehash: &[u8], signature: &[u8]) -> Result<bool>;
}

/// The private counterpart of [`PublicKey`].
pub(crate) trait PrivateKey: Sized + Clone {
    type Signature: Into<Vec<u8>> + AsRef<[u8]>;

    type PublicKey: PublicKey;

    /// Creates a new private key from the given data.
    ///
    /// Fails if `d` does not belong to the point `(x, y)`.
    fn new(alg: jwa::EcDSA, x: &[u8], y: &[u8], d: &SecretSlice<u8>) -> Result<Self>;

    /// Draws a fresh scalar from the OS random source.
    fn generate(alg: jwa::EcDSA) -> Result<Self>;

    /// Returns the private scalar of this key.
    fn private_material(&self) -> SecretSlice<u8>;

    fn public_point(&self) -> (Vec<u8>, Vec<u8>);

    fn to_public_key(&self) -> Self::PublicKey;

    /// Signs an already hashed message, producing a raw `r‖s` signature.
    ///
    /// P-256 and P-384 signatures are deterministic, according to
    /// [RFC 6979](https://www.rfc-editor.org/rfc/rfc6979). P-521 signatures use
    /// a random nonce.
    fn sign_prehash(&self, prehash: &[u8]) -> Result<Self::Signature>;
}
