//! Cryptographic primitives.
//!
//! This module wraps the primitives the key types need (HMAC, AES-GCM and
//! ECDSA) behind a small backend interface, so the key types only ever deal
//! with raw byte slices and this crate's [`Error`](crate::Error).

pub(crate) mod aes_gcm;
pub(crate) mod backend;
pub(crate) mod ec;
pub(crate) mod hmac;

use backend::interface;

use self::backend::Backend;
#[doc(inline)]
pub use self::backend::BackendError;
use crate::error::Result;

/// Fills the given buffer with random data.
#[inline]
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    <Backend as interface::Backend>::fill_random(buf)
}

/// Performs a quick Sha256 of the given data.
#[inline]
pub(crate) fn sha256(data: &[u8]) -> Vec<u8> {
    <Backend as interface::Backend>::sha256(data)
}

/// Performs a quick Sha384 of the given data.
#[inline]
pub(crate) fn sha384(data: &[u8]) -> Vec<u8> {
    <Backend as interface::Backend>::sha384(data)
}

/// Performs a quick Sha512 of the given data.
#[inline]
pub(crate) fn sha512(data: &[u8]) -> Vec<u8> {
    <Backend as interface::Backend>::sha512(data)
}
