//! Symmetric `oct` keys, used for HMAC signatures and AES-GCM encryption.

use core::fmt;

use secrecy::{ExposeSecret as _, ExposeSecretMut as _, SecretSlice};

use super::{
    thumbprint::{self, Thumbprint},
    unsupported, DecryptingKey, JsonWebKey, KeyKind, SigningKey, ValidatingKey,
};
use crate::{
    base64_url, crypto,
    dispatch::Primitive,
    error::{Error, Result},
    jwa::{self, JsonWebAlgorithm},
    sealed_data::{Ciphertext, SealedData},
    storage::ValueStorage,
};

/// An octet sequence key as defined in [section 6.4 of RFC 7518].
///
/// The `k` member is the only place the key bytes are kept.
///
/// [section 6.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-6.4>
#[derive(Clone)]
pub struct SymmetricKey {
    storage: ValueStorage,
}

impl SymmetricKey {
    /// Creates a key without an `alg` member from the given bytes.
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        let mut storage = ValueStorage::new();
        storage.set("kty", KeyKind::Symmetric.kty());
        storage.set_bytes("k", key);

        tracing::trace!(kty = "oct", "created symmetric key");
        Self { storage }
    }

    /// Creates an AES-GCM key, setting `alg` from the length of the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncorrectKeySize`] unless the key is 128, 192 or 256
    /// bits long.
    pub fn for_aes_gcm(key: impl AsRef<[u8]>) -> Result<Self> {
        let key = key.as_ref();
        let variant = jwa::AesGcm::from_key_bits(key.len() * 8).ok_or(Error::IncorrectKeySize)?;

        let mut this = Self::new(key);
        this.set_algorithm(variant.into());
        Ok(this)
    }

    /// Generates a random HMAC key as long as the output of the hash function,
    /// with `alg` set to `variant`.
    ///
    /// # Errors
    ///
    /// Fails if the system could not provide random data.
    pub fn generate_hmac(variant: jwa::Hmac) -> Result<Self> {
        Self::generate(variant.output_size(), variant.into())
    }

    /// Generates a random AES-GCM key with `alg` set to `variant`.
    ///
    /// # Errors
    ///
    /// Fails if the system could not provide random data.
    pub fn generate_aes_gcm(variant: jwa::AesGcm) -> Result<Self> {
        Self::generate(variant.key_size(), variant.into())
    }

    fn generate(len: usize, alg: JsonWebAlgorithm) -> Result<Self> {
        let mut key = SecretSlice::from(vec![0u8; len]);
        crypto::fill_random(key.expose_secret_mut())?;

        let mut this = Self::new(key.expose_secret());
        this.set_algorithm(alg);
        Ok(this)
    }

    /// Builds a key from its JWK members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `kty` is not `oct`, and
    /// [`Error::IncorrectKeySize`] if `k` is missing or not base64url.
    pub fn from_storage(storage: ValueStorage) -> Result<Self> {
        if storage.get_str("kty") != Some(KeyKind::Symmetric.kty()) {
            return Err(Error::InvalidKey("the `kty` of a symmetric key must be `oct`"));
        }
        if storage.get_bytes("k").is_none() {
            return Err(Error::IncorrectKeySize);
        }

        tracing::trace!(kty = "oct", "loaded symmetric key");
        Ok(Self { storage })
    }

    /// The key bytes, decoded from the `k` member.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncorrectKeySize`] if `k` is missing.
    pub fn key_bytes(&self) -> Result<SecretSlice<u8>> {
        self.storage
            .get_secret_bytes("k")
            .ok_or(Error::IncorrectKeySize)
    }

    /// Sets or, with [`JsonWebAlgorithm::None`], removes the `alg` member.
    pub fn set_algorithm(&mut self, alg: JsonWebAlgorithm) {
        super::set_algorithm(&mut self.storage, alg);
    }

    /// Sets the `kid` member.
    pub fn set_key_id(&mut self, kid: impl Into<String>) {
        self.storage.set("kid", kid.into());
    }

    fn hmac(&self, variant: jwa::Hmac) -> Result<crypto::hmac::Key> {
        crypto::hmac::Key::new(variant, self.key_bytes()?.expose_secret())
    }

    fn aes_gcm(&self, variant: jwa::AesGcm) -> Result<crypto::aes_gcm::Key> {
        crypto::aes_gcm::Key::new(variant, self.key_bytes()?.expose_secret())
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("alg", &self.algorithm())
            .field("kid", &self.key_id())
            .finish_non_exhaustive()
    }
}

impl JsonWebKey for SymmetricKey {
    fn storage(&self) -> &ValueStorage {
        &self.storage
    }

    fn key_type(&self) -> KeyKind {
        KeyKind::Symmetric
    }
}

impl ValidatingKey for SymmetricKey {
    fn validate(&self, signature: &[u8], message: &[u8], alg: &JsonWebAlgorithm) -> Result<()> {
        match self.resolve_algorithm(alg)? {
            Primitive::Hmac(variant) => self
                .hmac(variant)?
                .verify(message, signature)
                .inspect_err(|_| {
                    tracing::debug!(alg = %JsonWebAlgorithm::from(variant), "HMAC did not verify")
                }),
            primitive => unsupported(primitive),
        }
    }
}

impl SigningKey for SymmetricKey {
    fn sign(&self, message: &[u8], alg: &JsonWebAlgorithm) -> Result<Vec<u8>> {
        match self.resolve_algorithm(alg)? {
            Primitive::Hmac(variant) => self.hmac(variant)?.sign(message),
            primitive => unsupported(primitive),
        }
    }
}

impl DecryptingKey for SymmetricKey {
    fn encrypt_with_aad(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        alg: &JsonWebAlgorithm,
    ) -> Result<SealedData> {
        match self.resolve_algorithm(alg)? {
            Primitive::AesGcm(variant) => self.aes_gcm(variant)?.seal(plaintext, aad),
            primitive => unsupported(primitive),
        }
    }

    fn decrypt_with_aad(
        &self,
        ciphertext: Ciphertext<'_>,
        aad: &[u8],
        alg: &JsonWebAlgorithm,
    ) -> Result<Vec<u8>> {
        match self.resolve_algorithm(alg)? {
            Primitive::AesGcm(variant) => {
                let key = self.aes_gcm(variant)?;
                let sealed =
                    ciphertext.to_sealed(jwa::AesGcm::NONCE_SIZE, jwa::AesGcm::TAG_SIZE)?;
                key.open(&sealed, aad).inspect_err(|_| {
                    tracing::debug!(alg = %JsonWebAlgorithm::from(variant), "AES-GCM tag did not verify")
                })
            }
            primitive => unsupported(primitive),
        }
    }
}

impl crate::sealed::Sealed for SymmetricKey {}
impl Thumbprint for SymmetricKey {
    fn thumbprint_prehashed(&self) -> String {
        let k = self
            .storage
            .get_bytes("k")
            .map(base64_url::encode)
            .unwrap_or_default();

        thumbprint::serialize_key_thumbprint([("k", k), ("kty", "oct".to_owned())])
    }
}
