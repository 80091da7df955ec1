use ::aes_gcm::{
    aead::{consts::U12, AeadInPlace as _},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, KeyInit as _, Nonce, Tag,
};

use super::BackendError;
use crate::{crypto::backend::interface::aes_gcm, error::Result, jwa};

type Aes192Gcm = ::aes_gcm::AesGcm<Aes192, U12>;

/// Same as the HMAC keys, the cipher width is a generic argument and is
/// erased here.
enum ErasedKey {
    Aes128(Box<Aes128Gcm>),
    Aes192(Box<Aes192Gcm>),
    Aes256(Box<Aes256Gcm>),
}

macro_rules! with_cipher {
    ($key:expr, |$cipher:ident| $body:expr) => {
        match $key {
            ErasedKey::Aes128($cipher) => $body,
            ErasedKey::Aes192($cipher) => $body,
            ErasedKey::Aes256($cipher) => $body,
        }
    };
}

/// A low level AES-GCM key.
pub(crate) struct Key {
    inner: ErasedKey,
}

fn check_sizes(nonce: &[u8], tag: Option<&[u8]>) -> Result<()> {
    if nonce.len() != jwa::AesGcm::NONCE_SIZE {
        return Err(BackendError::InvalidLength.into());
    }
    match tag {
        Some(tag) if tag.len() != jwa::AesGcm::TAG_SIZE => Err(BackendError::Aead.into()),
        _ => Ok(()),
    }
}

impl aes_gcm::Key for Key {
    fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self> {
        let inner = match variant {
            jwa::AesGcm::Aes128 => ErasedKey::Aes128(Box::new(Aes128Gcm::new_from_slice(key)?)),
            jwa::AesGcm::Aes192 => ErasedKey::Aes192(Box::new(Aes192Gcm::new_from_slice(key)?)),
            jwa::AesGcm::Aes256 => ErasedKey::Aes256(Box::new(Aes256Gcm::new_from_slice(key)?)),
        };

        Ok(Self { inner })
    }

    fn seal_in_place(&self, nonce: &[u8], aad: &[u8], buffer: &mut [u8]) -> Result<Vec<u8>> {
        check_sizes(nonce, None)?;
        let nonce = Nonce::<U12>::from_slice(nonce);

        let tag = with_cipher!(&self.inner, |cipher| cipher
            .encrypt_in_place_detached(nonce, aad, buffer)?);

        Ok(tag.to_vec())
    }

    fn open_in_place(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<()> {
        check_sizes(nonce, Some(tag))?;
        let nonce = Nonce::<U12>::from_slice(nonce);
        let tag = Tag::from_slice(tag);

        with_cipher!(&self.inner, |cipher| cipher
            .decrypt_in_place_detached(nonce, aad, buffer, tag)?);

        Ok(())
    }
}
