//! Implementation of the JSON Web Algorithms (JWA) as defined in [RFC 7518]
//! that keys of this crate can run.
//!
//! [RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518>

mod aes_gcm;
mod ecdsa;
mod hmac;

#[doc(inline)]
pub use self::{aes_gcm::AesGcm, ecdsa::EcDSA, hmac::Hmac};

/// An algorithm identifier as found in the `alg` member of a JWK or the
/// `alg`/`enc` header parameters.
///
/// Possible values should be registered in the [IANA `JSON Web Signature and
/// Encryption Algorithms` registry][1]. Names that are not recognised parse
/// into [`Other`](Self::Other) instead of failing.
///
/// [1]: <https://www.iana.org/assignments/jose/jose.xhtml#web-signature-encryption-algorithms>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum JsonWebAlgorithm {
    /// The `none` algorithm.
    ///
    /// Passed to a key operation, it means "use the algorithm stored in the
    /// key".
    #[default]
    None,
    /// HMAC with SHA-2 Functions
    Hmac(Hmac),
    /// Content encryption using AES GCM
    AesGcm(AesGcm),
    /// Digital Signature with ECDSA
    EcDSA(EcDSA),
    /// JSON Web Algorithms that are not recognised by this implementation.
    Other(String),
}

impl JsonWebAlgorithm {
    /// Returns `true` for the [`None`](Self::None) algorithm.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<Hmac> for JsonWebAlgorithm {
    fn from(x: Hmac) -> Self {
        Self::Hmac(x)
    }
}

impl From<AesGcm> for JsonWebAlgorithm {
    fn from(x: AesGcm) -> Self {
        Self::AesGcm(x)
    }
}

impl From<EcDSA> for JsonWebAlgorithm {
    fn from(x: EcDSA) -> Self {
        Self::EcDSA(x)
    }
}

impl_serde_jwa!(
    JsonWebAlgorithm,
    [
        "none" => Self::None; Self::None,

        "HS256" => Self::Hmac(Hmac::Hs256); Self::Hmac(Hmac::Hs256),
        "HS384" => Self::Hmac(Hmac::Hs384); Self::Hmac(Hmac::Hs384),
        "HS512" => Self::Hmac(Hmac::Hs512); Self::Hmac(Hmac::Hs512),

        "A128GCM" => Self::AesGcm(AesGcm::Aes128); Self::AesGcm(AesGcm::Aes128),
        "A192GCM" => Self::AesGcm(AesGcm::Aes192); Self::AesGcm(AesGcm::Aes192),
        "A256GCM" => Self::AesGcm(AesGcm::Aes256); Self::AesGcm(AesGcm::Aes256),

        "ES256" => Self::EcDSA(EcDSA::Es256); Self::EcDSA(EcDSA::Es256),
        "ES384" => Self::EcDSA(EcDSA::Es384); Self::EcDSA(EcDSA::Es384),
        "ES512" => Self::EcDSA(EcDSA::Es512); Self::EcDSA(EcDSA::Es512),
    ]
);
