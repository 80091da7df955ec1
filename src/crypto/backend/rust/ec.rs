use ecdsa::{EncodedPoint, Signature, SigningKey, VerifyingKey};
use elliptic_curve::{generic_array::typenum::Unsigned as _, FieldBytes};
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand_core::OsRng;
use secrecy::{ExposeSecret as _, SecretSlice};
use signature::hazmat::{
    PrehashSigner as _, PrehashVerifier as _, RandomizedPrehashSigner as _,
};
use zeroize::Zeroizing;

use super::BackendError;
use crate::{
    crypto::backend::interface::ec::{self, PublicKey as _},
    error::Result,
    jwa::EcDSA,
};

/// Picks the curve for the algorithm, `$curve` names it inside `$body`, and
/// wraps the result into the matching variant of `$erased`.
macro_rules! for_curve {
    ($alg:expr, $erased:ident, |$curve:ident| $body:expr) => {
        match $alg {
            EcDSA::Es256 => {
                type $curve = NistP256;
                $erased::P256($body)
            }
            EcDSA::Es384 => {
                type $curve = NistP384;
                $erased::P384($body)
            }
            EcDSA::Es512 => {
                type $curve = NistP521;
                $erased::P521($body)
            }
        }
    };
}

/// Runs `$body` on the key inside any variant of `$erased`.
macro_rules! with_key {
    ($value:expr, $erased:ident, |$key:ident, $curve:ident| $body:expr) => {
        match $value {
            $erased::P256($key) => {
                #[allow(dead_code)]
                type $curve = NistP256;
                $body
            }
            $erased::P384($key) => {
                #[allow(dead_code)]
                type $curve = NistP384;
                $body
            }
            $erased::P521($key) => {
                #[allow(dead_code)]
                type $curve = NistP521;
                $body
            }
        }
    };
}

#[derive(Clone)]
enum ErasedPublicKey {
    P256(VerifyingKey<NistP256>),
    P384(VerifyingKey<NistP384>),
    P521(VerifyingKey<NistP521>),
}

#[derive(Clone)]
enum ErasedPrivateKey {
    P256(SigningKey<NistP256>),
    P384(SigningKey<NistP384>),
    P521(SigningKey<NistP521>),
}

fn to_field_bytes<C: elliptic_curve::Curve>(bytes: &[u8]) -> Result<&FieldBytes<C>, BackendError> {
    if bytes.len() != C::FieldBytesSize::USIZE {
        return Err(BackendError::InvalidEcPoint {
            expected: C::FieldBytesSize::USIZE,
            actual: bytes.len(),
        });
    }

    Ok(FieldBytes::<C>::from_slice(bytes))
}

/// A low level public EC key.
#[derive(Clone)]
pub(crate) struct PublicKey {
    inner: ErasedPublicKey,
}

impl ec::PublicKey for PublicKey {
    fn new(alg: EcDSA, x: &[u8], y: &[u8]) -> Result<Self> {
        let inner = for_curve!(alg, ErasedPublicKey, |C| {
            let point = EncodedPoint::<C>::from_affine_coordinates(
                to_field_bytes::<C>(x)?,
                to_field_bytes::<C>(y)?,
                false,
            );
            VerifyingKey::<C>::from_encoded_point(&point).map_err(|_| BackendError::InvalidEcKey)?
        });

        Ok(Self { inner })
    }

    fn to_point(&self) -> (Vec<u8>, Vec<u8>) {
        with_key!(&self.inner, ErasedPublicKey, |key, C| {
            let point = key.to_encoded_point(false);
            (
                point.x().map(|x| x.to_vec()).unwrap_or_default(),
                point.y().map(|y| y.to_vec()).unwrap_or_default(),
            )
        })
    }

    fn verify_prehash(&self, prehash: &[u8], signature: &[u8]) -> Result<bool> {
        let valid = with_key!(&self.inner, ErasedPublicKey, |key, C| {
            match Signature::<C>::from_slice(signature) {
                Ok(signature) => key.verify_prehash(prehash, &signature).is_ok(),
                Err(_) => false,
            }
        });

        Ok(valid)
    }
}

/// A low level private EC key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    inner: ErasedPrivateKey,
}

impl ec::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;
    type Signature = Vec<u8>;

    fn new(alg: EcDSA, x: &[u8], y: &[u8], d: &SecretSlice<u8>) -> Result<Self> {
        let inner = for_curve!(alg, ErasedPrivateKey, |C| {
            let point = EncodedPoint::<C>::from_affine_coordinates(
                to_field_bytes::<C>(x)?,
                to_field_bytes::<C>(y)?,
                false,
            );
            let key = SigningKey::<C>::from_bytes(to_field_bytes::<C>(d.expose_secret())?)
                .map_err(|_| BackendError::InvalidEcKey)?;

            if key.verifying_key().to_encoded_point(false) != point {
                return Err(BackendError::EcKeyMismatch.into());
            }

            key
        });

        Ok(Self { inner })
    }

    fn generate(alg: EcDSA) -> Result<Self> {
        let inner = for_curve!(alg, ErasedPrivateKey, |C| SigningKey::<C>::random(
            &mut OsRng
        ));

        Ok(Self { inner })
    }

    fn private_material(&self) -> SecretSlice<u8> {
        with_key!(&self.inner, ErasedPrivateKey, |key, C| {
            let d = Zeroizing::new(key.to_bytes());
            SecretSlice::from(d.to_vec())
        })
    }

    fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.to_public_key().to_point()
    }

    fn to_public_key(&self) -> Self::PublicKey {
        let inner = match &self.inner {
            ErasedPrivateKey::P256(key) => ErasedPublicKey::P256(*key.verifying_key()),
            ErasedPrivateKey::P384(key) => ErasedPublicKey::P384(*key.verifying_key()),
            ErasedPrivateKey::P521(key) => ErasedPublicKey::P521(*key.verifying_key()),
        };

        PublicKey { inner }
    }

    fn sign_prehash(&self, prehash: &[u8]) -> Result<Self::Signature> {
        let signature = match &self.inner {
            ErasedPrivateKey::P256(key) => {
                let signature: Signature<NistP256> =
                    key.sign_prehash(prehash).map_err(BackendError::Ecdsa)?;
                signature.to_vec()
            }
            ErasedPrivateKey::P384(key) => {
                let signature: Signature<NistP384> =
                    key.sign_prehash(prehash).map_err(BackendError::Ecdsa)?;
                signature.to_vec()
            }
            // p521 binds no digest for RFC 6979, the nonce comes from the OS
            ErasedPrivateKey::P521(key) => {
                let signature: Signature<NistP521> = p521::ecdsa::SigningKey::from(key.clone())
                    .sign_prehash_with_rng(&mut OsRng, prehash)
                    .map_err(BackendError::Ecdsa)?;
                signature.to_vec()
            }
        };

        Ok(signature)
    }
}
