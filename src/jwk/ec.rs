//! Elliptic curve keys on the NIST curves P-256, P-384 and P-521.
//!
//! The coordinates `x` and `y` and the private scalar `d` are stored as
//! big-endian integers exactly as wide as the field of the curve, and a key
//! can only be used with the ECDSA algorithm of its own curve.

use core::fmt;

use secrecy::{ExposeSecret as _, SecretSlice};

use super::{
    thumbprint::{self, Thumbprint},
    unsupported, JsonWebKey, KeyKind, SigningKey, ValidatingKey,
};
use crate::{
    asn1, base64_url, crypto,
    dispatch::Primitive,
    error::{Error, Result},
    jwa::{self, JsonWebAlgorithm},
    storage::ValueStorage,
};

/// The curves EC keys can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256, used by `ES256`.
    P256,
    /// NIST P-384, used by `ES384`.
    P384,
    /// NIST P-521, used by `ES512`.
    P521,
}

impl EcCurve {
    /// The value of the `crv` member.
    pub const fn name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Looks up a curve by its `crv` name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(Self::P256),
            "P-384" => Some(Self::P384),
            "P-521" => Some(Self::P521),
            _ => None,
        }
    }

    /// The width of coordinates, scalars and each half of a signature, in
    /// bytes.
    pub const fn field_size(self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    /// The only signing algorithm keys on this curve can be used with.
    pub const fn algorithm(self) -> jwa::EcDSA {
        match self {
            Self::P256 => jwa::EcDSA::Es256,
            Self::P384 => jwa::EcDSA::Es384,
            Self::P521 => jwa::EcDSA::Es512,
        }
    }

    /// Converts a raw `r‖s` signature into a DER `ECDSA-Sig-Value`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MalformedEncoding`] if the signature is not twice
    /// the field size long.
    pub fn signature_to_der(self, raw: &[u8]) -> Result<Vec<u8>> {
        asn1::raw_signature_to_der(raw, self.field_size())
    }

    /// Converts a DER `ECDSA-Sig-Value` into a raw `r‖s` signature.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MalformedEncoding`] if the input is not valid DER
    /// or an integer does not fit into the field size.
    pub fn signature_from_der(self, der: &[u8]) -> Result<Vec<u8>> {
        asn1::der_signature_to_raw(der, self.field_size())
    }
}

impl From<jwa::EcDSA> for EcCurve {
    fn from(alg: jwa::EcDSA) -> Self {
        match alg {
            jwa::EcDSA::Es256 => Self::P256,
            jwa::EcDSA::Es384 => Self::P384,
            jwa::EcDSA::Es512 => Self::P521,
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads `kty`, `crv`, `x` and `y`, the members shared by public and
/// private keys.
fn read_public_members(storage: &ValueStorage) -> Result<(EcCurve, Vec<u8>, Vec<u8>)> {
    if storage.get_str("kty") != Some(KeyKind::EllipticCurve.kty()) {
        return Err(Error::InvalidKey("the `kty` of an EC key must be `EC`"));
    }
    let curve = storage
        .get_str("crv")
        .and_then(EcCurve::from_name)
        .ok_or(Error::InvalidKey("missing or unsupported `crv`"))?;
    let x = storage
        .get_bytes("x")
        .ok_or(Error::InvalidKey("missing or malformed `x` coordinate"))?;
    let y = storage
        .get_bytes("y")
        .ok_or(Error::InvalidKey("missing or malformed `y` coordinate"))?;

    Ok((curve, x, y))
}

/// Checks that the requested algorithm is the ECDSA variant of `curve`.
fn check_algorithm(key: &impl JsonWebKey, curve: EcCurve, alg: &JsonWebAlgorithm) -> Result<()> {
    match key.resolve_algorithm(alg)? {
        Primitive::EcDSA(alg) if alg == curve.algorithm() => Ok(()),
        Primitive::EcDSA(alg) => {
            tracing::debug!(%curve, alg = %JsonWebAlgorithm::from(alg), "algorithm does not match the curve");
            Err(Error::UnknownAlgorithm(alg.into()))
        }
        primitive => unsupported(primitive),
    }
}

fn thumbprint_of(curve: EcCurve, (x, y): (Vec<u8>, Vec<u8>)) -> String {
    thumbprint::serialize_key_thumbprint([
        ("crv", curve.name().to_owned()),
        ("kty", KeyKind::EllipticCurve.kty().to_owned()),
        ("x", base64_url::encode(x)),
        ("y", base64_url::encode(y)),
    ])
}

/// The public part of an EC key pair.
#[derive(Clone)]
pub struct EcPublicKey {
    storage: ValueStorage,
    curve: EcCurve,
    key: crypto::ec::PublicKey,
}

impl EcPublicKey {
    /// Builds a key from its JWK members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `kty` is not `EC`, the curve is not
    /// supported, a coordinate is missing or has the wrong width, the point
    /// is not on the curve, or the private `d` member is present.
    pub fn from_storage(storage: ValueStorage) -> Result<Self> {
        let (curve, x, y) = read_public_members(&storage)?;
        if storage.contains("d") {
            return Err(Error::InvalidKey("a public key must not contain `d`"));
        }

        let key = crypto::ec::PublicKey::new(curve.algorithm(), &x, &y)?;

        tracing::trace!(%curve, "loaded EC public key");
        Ok(Self {
            storage,
            curve,
            key,
        })
    }

    /// The curve of this key.
    pub const fn curve(&self) -> EcCurve {
        self.curve
    }

    /// Sets or, with [`JsonWebAlgorithm::None`], removes the `alg` member.
    pub fn set_algorithm(&mut self, alg: JsonWebAlgorithm) {
        super::set_algorithm(&mut self.storage, alg);
    }

    /// Sets the `kid` member.
    pub fn set_key_id(&mut self, kid: impl Into<String>) {
        self.storage.set("kid", kid.into());
    }
}

impl fmt::Debug for EcPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPublicKey")
            .field("storage", &self.storage)
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl JsonWebKey for EcPublicKey {
    fn storage(&self) -> &ValueStorage {
        &self.storage
    }

    fn key_type(&self) -> KeyKind {
        KeyKind::EllipticCurve
    }
}

impl ValidatingKey for EcPublicKey {
    fn validate(&self, signature: &[u8], message: &[u8], alg: &JsonWebAlgorithm) -> Result<()> {
        check_algorithm(self, self.curve, alg)?;
        self.key
            .verify(message, signature)
            .inspect_err(|_| tracing::debug!(curve = %self.curve, "ECDSA signature did not verify"))
    }
}

impl crate::sealed::Sealed for EcPublicKey {}
impl Thumbprint for EcPublicKey {
    fn thumbprint_prehashed(&self) -> String {
        thumbprint_of(self.curve, self.key.to_point())
    }
}

/// An EC key pair.
#[derive(Clone)]
pub struct EcPrivateKey {
    storage: ValueStorage,
    curve: EcCurve,
    key: crypto::ec::PrivateKey,
}

impl EcPrivateKey {
    /// Generates a new random key pair, with `alg` set to the algorithm of the
    /// curve.
    ///
    /// # Errors
    ///
    /// Fails if the system could not provide random data.
    pub fn generate(curve: EcCurve) -> Result<Self> {
        let key = crypto::ec::PrivateKey::generate(curve.algorithm())?;
        let (x, y) = key.public_point();

        let mut storage = ValueStorage::new();
        storage.set("kty", KeyKind::EllipticCurve.kty());
        storage.set("crv", curve.name());
        storage.set_bytes("x", x);
        storage.set_bytes("y", y);
        storage.set_bytes("d", key.private_material().expose_secret());
        super::set_algorithm(&mut storage, curve.algorithm().into());

        tracing::trace!(%curve, "generated EC private key");
        Ok(Self {
            storage,
            curve,
            key,
        })
    }

    /// Builds a key from its JWK members.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`EcPublicKey::from_storage`], and
    /// [`Error::InvalidKey`] if `d` is missing, has the wrong width or does
    /// not belong to the public point.
    pub fn from_storage(storage: ValueStorage) -> Result<Self> {
        let (curve, x, y) = read_public_members(&storage)?;
        let d: SecretSlice<u8> = storage
            .get_secret_bytes("d")
            .ok_or(Error::InvalidKey("missing or malformed private scalar `d`"))?;

        let key = crypto::ec::PrivateKey::new(curve.algorithm(), &x, &y, &d)?;

        tracing::trace!(%curve, "loaded EC private key");
        Ok(Self {
            storage,
            curve,
            key,
        })
    }

    /// The curve of this key.
    pub const fn curve(&self) -> EcCurve {
        self.curve
    }

    /// Returns the public part of this key pair.
    ///
    /// All members except `d` are kept.
    pub fn to_public_key(&self) -> EcPublicKey {
        let mut storage = self.storage.clone();
        storage.remove("d");

        EcPublicKey {
            storage,
            curve: self.curve,
            key: self.key.to_public_key(),
        }
    }

    /// Sets or, with [`JsonWebAlgorithm::None`], removes the `alg` member.
    pub fn set_algorithm(&mut self, alg: JsonWebAlgorithm) {
        super::set_algorithm(&mut self.storage, alg);
    }

    /// Sets the `kid` member.
    pub fn set_key_id(&mut self, kid: impl Into<String>) {
        self.storage.set("kid", kid.into());
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("curve", &self.curve)
            .field("alg", &self.algorithm())
            .field("kid", &self.key_id())
            .finish_non_exhaustive()
    }
}

impl JsonWebKey for EcPrivateKey {
    fn storage(&self) -> &ValueStorage {
        &self.storage
    }

    fn key_type(&self) -> KeyKind {
        KeyKind::EllipticCurve
    }
}

impl ValidatingKey for EcPrivateKey {
    fn validate(&self, signature: &[u8], message: &[u8], alg: &JsonWebAlgorithm) -> Result<()> {
        check_algorithm(self, self.curve, alg)?;
        self.key
            .to_public_key()
            .verify(message, signature)
            .inspect_err(|_| tracing::debug!(curve = %self.curve, "ECDSA signature did not verify"))
    }
}

impl SigningKey for EcPrivateKey {
    fn sign(&self, message: &[u8], alg: &JsonWebAlgorithm) -> Result<Vec<u8>> {
        check_algorithm(self, self.curve, alg)?;
        self.key.sign(message)
    }
}

impl crate::sealed::Sealed for EcPrivateKey {}
impl Thumbprint for EcPrivateKey {
    fn thumbprint_prehashed(&self) -> String {
        thumbprint_of(self.curve, self.key.public_point())
    }
}
