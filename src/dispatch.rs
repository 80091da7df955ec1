//! Mapping of algorithm identifiers onto the primitives that run them.
//!
//! This is the only place where an [`JsonWebAlgorithm`] is looked up at
//! runtime. Key types first apply the `none` fallback with
//! [`effective_algorithm`], then ask [`resolve_for`] which primitive to run,
//! which also rejects algorithms that need a different kind of key.

use core::fmt;

use crate::{
    error::{Error, Result},
    jwa::{self, JsonWebAlgorithm},
};

/// A primitive operation, together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// HMAC with the digest of the variant.
    Hmac(jwa::Hmac),
    /// AES-GCM with the key size of the variant.
    AesGcm(jwa::AesGcm),
    /// ECDSA over the curve of the variant, hashing with its mandated digest.
    EcDSA(jwa::EcDSA),
}

impl Primitive {
    /// The kind of key this primitive needs.
    pub const fn key_kind(self) -> KeyKind {
        match self {
            Self::Hmac(_) | Self::AesGcm(_) => KeyKind::Symmetric,
            Self::EcDSA(_) => KeyKind::EllipticCurve,
        }
    }
}

impl From<Primitive> for JsonWebAlgorithm {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Hmac(x) => Self::Hmac(x),
            Primitive::AesGcm(x) => Self::AesGcm(x),
            Primitive::EcDSA(x) => Self::EcDSA(x),
        }
    }
}

/// The kinds of keys, as named by the `kty` member of a JWK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// An octet sequence (`oct`).
    Symmetric,
    /// An elliptic curve key (`EC`).
    EllipticCurve,
}

impl KeyKind {
    /// The value of the `kty` member for this kind of key.
    pub const fn kty(self) -> &'static str {
        match self {
            Self::Symmetric => "oct",
            Self::EllipticCurve => "EC",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kty())
    }
}

/// Looks up the primitive for `alg`.
///
/// # Errors
///
/// `none` and algorithms this crate does not know fail with
/// [`Error::UnknownAlgorithm`].
pub fn resolve(alg: &JsonWebAlgorithm) -> Result<Primitive> {
    let primitive = match alg {
        JsonWebAlgorithm::Hmac(x) => Primitive::Hmac(*x),
        JsonWebAlgorithm::AesGcm(x) => Primitive::AesGcm(*x),
        JsonWebAlgorithm::EcDSA(x) => Primitive::EcDSA(*x),
        JsonWebAlgorithm::None | JsonWebAlgorithm::Other(_) => {
            tracing::debug!(%alg, "no primitive for algorithm");
            return Err(Error::UnknownAlgorithm(alg.clone()));
        }
    };

    tracing::trace!(%alg, ?primitive, "resolved algorithm");
    Ok(primitive)
}

/// Looks up the primitive for `alg` and checks that a key of the given kind
/// can run it.
///
/// # Errors
///
/// Fails with [`Error::UnknownAlgorithm`] if [`resolve`] fails, or if the
/// primitive needs a different kind of key, e.g. `HS256` on an `EC` key.
pub fn resolve_for(alg: &JsonWebAlgorithm, kind: KeyKind) -> Result<Primitive> {
    let primitive = resolve(alg)?;

    if primitive.key_kind() != kind {
        tracing::debug!(%alg, key = %kind, "algorithm can not be used with this kind of key");
        return Err(Error::UnknownAlgorithm(alg.clone()));
    }

    Ok(primitive)
}

/// Applies the `none` fallback: a requested `none` is replaced by the
/// algorithm stored in the key.
///
/// # Errors
///
/// Returns [`Error::UnknownAlgorithm`] if `none` was requested and the key
/// does not store an algorithm either.
pub fn effective_algorithm(
    requested: &JsonWebAlgorithm,
    stored: Option<&JsonWebAlgorithm>,
) -> Result<JsonWebAlgorithm> {
    let alg = match (requested, stored) {
        (JsonWebAlgorithm::None, Some(stored)) => {
            tracing::trace!(%stored, "using the algorithm of the key");
            stored.clone()
        }
        (requested, _) => requested.clone(),
    };

    if alg.is_none() {
        tracing::debug!("neither the caller nor the key name an algorithm");
        return Err(Error::UnknownAlgorithm(alg));
    }

    Ok(alg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_algorithm_resolves() {
        let cases = [
            ("HS256", Primitive::Hmac(jwa::Hmac::Hs256)),
            ("HS384", Primitive::Hmac(jwa::Hmac::Hs384)),
            ("HS512", Primitive::Hmac(jwa::Hmac::Hs512)),
            ("A128GCM", Primitive::AesGcm(jwa::AesGcm::Aes128)),
            ("A192GCM", Primitive::AesGcm(jwa::AesGcm::Aes192)),
            ("A256GCM", Primitive::AesGcm(jwa::AesGcm::Aes256)),
            ("ES256", Primitive::EcDSA(jwa::EcDSA::Es256)),
            ("ES384", Primitive::EcDSA(jwa::EcDSA::Es384)),
            ("ES512", Primitive::EcDSA(jwa::EcDSA::Es512)),
        ];

        for (name, expected) in cases {
            let alg: JsonWebAlgorithm = name.parse().unwrap();
            assert_eq!(resolve(&alg).unwrap(), expected);
            assert_eq!(JsonWebAlgorithm::from(expected), alg);
        }
    }

    #[test]
    fn unknown_algorithms() {
        for alg in [
            JsonWebAlgorithm::None,
            JsonWebAlgorithm::Other("A128CBC-HS256".to_owned()),
            JsonWebAlgorithm::Other("RS256".to_owned()),
        ] {
            assert!(matches!(resolve(&alg), Err(Error::UnknownAlgorithm(x)) if x == alg));
        }
    }

    #[test]
    fn key_kind_must_match() {
        let hs256 = JsonWebAlgorithm::Hmac(jwa::Hmac::Hs256);
        let es256 = JsonWebAlgorithm::EcDSA(jwa::EcDSA::Es256);

        assert!(resolve_for(&hs256, KeyKind::Symmetric).is_ok());
        assert!(matches!(
            resolve_for(&hs256, KeyKind::EllipticCurve),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(resolve_for(&es256, KeyKind::EllipticCurve).is_ok());
        assert!(matches!(
            resolve_for(&es256, KeyKind::Symmetric),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn none_falls_back_to_the_stored_algorithm() {
        let stored = JsonWebAlgorithm::AesGcm(jwa::AesGcm::Aes128);
        let hs384 = JsonWebAlgorithm::Hmac(jwa::Hmac::Hs384);

        assert_eq!(
            effective_algorithm(&JsonWebAlgorithm::None, Some(&stored)).unwrap(),
            stored
        );
        assert_eq!(effective_algorithm(&hs384, Some(&stored)).unwrap(), hs384);
        assert_eq!(effective_algorithm(&hs384, None).unwrap(), hs384);
        assert!(matches!(
            effective_algorithm(&JsonWebAlgorithm::None, None),
            Err(Error::UnknownAlgorithm(JsonWebAlgorithm::None))
        ));
        assert!(matches!(
            effective_algorithm(&JsonWebAlgorithm::None, Some(&JsonWebAlgorithm::None)),
            Err(Error::UnknownAlgorithm(JsonWebAlgorithm::None))
        ));
    }
}
