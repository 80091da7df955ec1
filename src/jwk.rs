//! The key types and the capabilities they provide.
//!
//! Every key is backed by a [`ValueStorage`] holding its JWK members exactly
//! as they are serialized. What a key can do is expressed by the capability
//! traits it implements:
//!
//! | Key               | [`ValidatingKey`] | [`SigningKey`] | [`DecryptingKey`] |
//! |-------------------|:-----------------:|:--------------:|:-----------------:|
//! | [`SymmetricKey`]  | HMAC              | HMAC           | AES-GCM           |
//! | [`EcPublicKey`]   | ECDSA             |                |                   |
//! | [`EcPrivateKey`]  | ECDSA             | ECDSA          |                   |
//!
//! All operations take a [`JsonWebAlgorithm`]. Passing
//! [`JsonWebAlgorithm::None`] selects the algorithm stored in the `alg`
//! member of the key.

pub mod ec;
pub mod symmetric;
mod thumbprint;

#[doc(inline)]
pub use self::{
    ec::{EcCurve, EcPrivateKey, EcPublicKey},
    symmetric::SymmetricKey,
    thumbprint::Thumbprint,
};
#[doc(inline)]
pub use crate::dispatch::KeyKind;
use crate::{
    dispatch::{self, Primitive},
    error::{Error, Result},
    jwa::JsonWebAlgorithm,
    sealed_data::{Ciphertext, SealedData},
    storage::ValueStorage,
};

/// The properties every key has.
pub trait JsonWebKey {
    /// The JWK members of this key.
    fn storage(&self) -> &ValueStorage;

    /// The kind of this key, which always agrees with the `kty` member.
    fn key_type(&self) -> KeyKind;

    /// The algorithm stored in the `alg` member, if any.
    fn algorithm(&self) -> Option<JsonWebAlgorithm> {
        self.storage().get_typed("alg")
    }

    /// The `kid` member, if any.
    fn key_id(&self) -> Option<&str> {
        self.storage().get_str("kid")
    }

    /// Selects the primitive for an operation that was requested with `alg`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownAlgorithm`] if `alg` is `none` and the key
    /// has no algorithm of its own, if the algorithm is not supported, or if
    /// it needs a different kind of key.
    fn resolve_algorithm(&self, alg: &JsonWebAlgorithm) -> Result<Primitive> {
        let alg = dispatch::effective_algorithm(alg, self.algorithm().as_ref())?;
        dispatch::resolve_for(&alg, self.key_type())
    }
}

/// A key that can check signatures.
pub trait ValidatingKey: JsonWebKey {
    /// Checks that `signature` is a valid signature of `message`.
    ///
    /// For ECDSA the signature is the raw `r‖s` concatenation, for HMAC the
    /// MAC itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailure`] if the signature does not
    /// verify, or the errors of [`JsonWebKey::resolve_algorithm`].
    fn validate(&self, signature: &[u8], message: &[u8], alg: &JsonWebAlgorithm) -> Result<()>;
}

/// A key that can create signatures.
pub trait SigningKey: ValidatingKey {
    /// Signs `message`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`JsonWebKey::resolve_algorithm`], or
    /// [`Error::IncorrectKeySize`] if the key material is too short for the
    /// algorithm.
    fn sign(&self, message: &[u8], alg: &JsonWebAlgorithm) -> Result<Vec<u8>>;
}

/// A key that can encrypt and decrypt content.
pub trait DecryptingKey: JsonWebKey {
    /// Encrypts `plaintext` without additional authenticated data.
    ///
    /// # Errors
    ///
    /// See [`encrypt_with_aad`](Self::encrypt_with_aad).
    fn encrypt(&self, plaintext: &[u8], alg: &JsonWebAlgorithm) -> Result<SealedData> {
        self.encrypt_with_aad(plaintext, &[], alg)
    }

    /// Decrypts a ciphertext that was sealed without additional authenticated
    /// data.
    ///
    /// The ciphertext may be given in its structured or combined form, see
    /// [`Ciphertext`].
    ///
    /// # Errors
    ///
    /// See [`decrypt_with_aad`](Self::decrypt_with_aad).
    fn decrypt(&self, ciphertext: Ciphertext<'_>, alg: &JsonWebAlgorithm) -> Result<Vec<u8>> {
        self.decrypt_with_aad(ciphertext, &[], alg)
    }

    /// Encrypts `plaintext`, authenticating `aad` alongside it.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`JsonWebKey::resolve_algorithm`], or
    /// [`Error::IncorrectKeySize`] if the key does not fit the algorithm.
    fn encrypt_with_aad(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        alg: &JsonWebAlgorithm,
    ) -> Result<SealedData>;

    /// Decrypts `ciphertext`, checking that it was sealed with `aad`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailure`] if the tag does not verify,
    /// [`Error::MalformedEncoding`] if a combined buffer is too short to hold
    /// a nonce and a tag, and otherwise the same errors as
    /// [`encrypt_with_aad`](Self::encrypt_with_aad).
    fn decrypt_with_aad(
        &self,
        ciphertext: Ciphertext<'_>,
        aad: &[u8],
        alg: &JsonWebAlgorithm,
    ) -> Result<Vec<u8>>;
}

/// Any key supported by this crate.
///
/// Deserializing picks the variant from the `kty` member and the presence of
/// the private `d` member.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum AnyJsonWebKey {
    /// An `oct` key.
    Symmetric(SymmetricKey),
    /// An `EC` key without its private part.
    EcPublic(EcPublicKey),
    /// An `EC` key including its private part.
    EcPrivate(EcPrivateKey),
}

impl AnyJsonWebKey {
    /// Builds a key from its JWK members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the `kty` is missing or not
    /// supported, and otherwise the errors of the matching `from_storage`
    /// constructor.
    pub fn from_storage(storage: ValueStorage) -> Result<Self> {
        match storage.get_str("kty") {
            Some("oct") => SymmetricKey::from_storage(storage).map(Self::Symmetric),
            Some("EC") if storage.contains("d") => {
                EcPrivateKey::from_storage(storage).map(Self::EcPrivate)
            }
            Some("EC") => EcPublicKey::from_storage(storage).map(Self::EcPublic),
            _ => Err(Error::InvalidKey("missing or unsupported `kty`")),
        }
    }

    /// Returns this key as a [`SigningKey`], if it can sign.
    pub fn as_signing_key(&self) -> Option<&dyn SigningKey> {
        match self {
            Self::Symmetric(key) => Some(key),
            Self::EcPrivate(key) => Some(key),
            Self::EcPublic(_) => None,
        }
    }

    /// Returns this key as a [`DecryptingKey`], if it can encrypt.
    pub fn as_decrypting_key(&self) -> Option<&dyn DecryptingKey> {
        match self {
            Self::Symmetric(key) => Some(key),
            Self::EcPublic(_) | Self::EcPrivate(_) => None,
        }
    }

    /// Sets or, with [`JsonWebAlgorithm::None`], removes the `alg` member.
    pub fn set_algorithm(&mut self, alg: JsonWebAlgorithm) {
        match self {
            Self::Symmetric(key) => key.set_algorithm(alg),
            Self::EcPublic(key) => key.set_algorithm(alg),
            Self::EcPrivate(key) => key.set_algorithm(alg),
        }
    }

    /// Sets the `kid` member.
    pub fn set_key_id(&mut self, kid: impl Into<String>) {
        match self {
            Self::Symmetric(key) => key.set_key_id(kid),
            Self::EcPublic(key) => key.set_key_id(kid),
            Self::EcPrivate(key) => key.set_key_id(kid),
        }
    }

    fn inner(&self) -> &dyn ValidatingKey {
        match self {
            Self::Symmetric(key) => key,
            Self::EcPublic(key) => key,
            Self::EcPrivate(key) => key,
        }
    }
}

impl JsonWebKey for AnyJsonWebKey {
    fn storage(&self) -> &ValueStorage {
        self.inner().storage()
    }

    fn key_type(&self) -> KeyKind {
        self.inner().key_type()
    }
}

impl ValidatingKey for AnyJsonWebKey {
    fn validate(&self, signature: &[u8], message: &[u8], alg: &JsonWebAlgorithm) -> Result<()> {
        self.inner().validate(signature, message, alg)
    }
}

impl crate::sealed::Sealed for AnyJsonWebKey {}
impl Thumbprint for AnyJsonWebKey {
    fn thumbprint_prehashed(&self) -> String {
        match self {
            Self::Symmetric(key) => key.thumbprint_prehashed(),
            Self::EcPublic(key) => key.thumbprint_prehashed(),
            Self::EcPrivate(key) => key.thumbprint_prehashed(),
        }
    }
}

impl From<SymmetricKey> for AnyJsonWebKey {
    fn from(key: SymmetricKey) -> Self {
        Self::Symmetric(key)
    }
}

impl From<EcPublicKey> for AnyJsonWebKey {
    fn from(key: EcPublicKey) -> Self {
        Self::EcPublic(key)
    }
}

impl From<EcPrivateKey> for AnyJsonWebKey {
    fn from(key: EcPrivateKey) -> Self {
        Self::EcPrivate(key)
    }
}

impl TryFrom<ValueStorage> for AnyJsonWebKey {
    type Error = Error;

    fn try_from(storage: ValueStorage) -> Result<Self> {
        Self::from_storage(storage)
    }
}

/// Serializes a key as its storage, and deserializes it through
/// `from_storage`.
macro_rules! impl_storage_serde {
    ($($T:ty),+ $(,)?) => {$(
        impl serde::Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(JsonWebKey::storage(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $T {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let storage = <ValueStorage as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_storage(storage).map_err(<D::Error as serde::de::Error>::custom)
            }
        }
    )+};
}

impl_storage_serde!(SymmetricKey, EcPublicKey, EcPrivateKey, AnyJsonWebKey);

pub(crate) fn set_algorithm(storage: &mut ValueStorage, alg: JsonWebAlgorithm) {
    if alg.is_none() {
        storage.remove("alg");
    } else {
        storage.set("alg", alg.to_string());
    }
}

/// Rejects primitives that don't belong to the capability being used, e.g.
/// `A128GCM` passed to `sign`.
pub(crate) fn unsupported<T>(primitive: Primitive) -> Result<T> {
    let alg = JsonWebAlgorithm::from(primitive);
    tracing::debug!(%alg, "algorithm can not be used for this operation");
    Err(Error::UnknownAlgorithm(alg))
}
