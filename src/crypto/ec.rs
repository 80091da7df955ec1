//! ECDSA over the NIST curves, as used by the `ES256`, `ES384` and `ES512`
//! algorithms.
//!
//! Messages are hashed with the digest the algorithm mandates before they
//! reach the backend, which only ever signs and verifies prehashed input.
//! Signatures are the raw `r‖s` concatenation JWS uses.

use secrecy::SecretSlice;

use super::backend::{
    interface::{
        self,
        ec::{PrivateKey as _, PublicKey as _},
    },
    Backend,
};
use crate::{
    error::{Error, Result},
    jwa::EcDSA,
};

type BackendPublicKey = <Backend as interface::Backend>::EcPublicKey;
type BackendPrivateKey = <Backend as interface::Backend>::EcPrivateKey;

fn digest(alg: EcDSA, message: &[u8]) -> Vec<u8> {
    match alg {
        EcDSA::Es256 => super::sha256(message),
        EcDSA::Es384 => super::sha384(message),
        EcDSA::Es512 => super::sha512(message),
    }
}

/// An EC public key that verifies signatures of a single algorithm.
#[derive(Clone)]
pub(crate) struct PublicKey {
    inner: BackendPublicKey,
    alg: EcDSA,
}

impl PublicKey {
    /// Creates a public key from its big-endian affine coordinates.
    pub(crate) fn new(alg: EcDSA, x: &[u8], y: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: BackendPublicKey::new(alg, x, y)?,
            alg,
        })
    }

    /// The (x, y) coordinates, each as wide as the field of the curve.
    pub(crate) fn to_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.inner.to_point()
    }

    /// Verifies a raw `r‖s` signature over `message`.
    pub(crate) fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        if signature.len() != self.alg.signature_size() {
            return Err(Error::AuthenticationFailure);
        }

        let prehash = digest(self.alg, message);
        if self.inner.verify_prehash(&prehash, signature)? {
            Ok(())
        } else {
            Err(Error::AuthenticationFailure)
        }
    }
}

/// An EC private key that signs with a single algorithm.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    inner: BackendPrivateKey,
    alg: EcDSA,
}

impl PrivateKey {
    /// Creates a private key from the public point and the private scalar.
    ///
    /// Fails if `d` does not belong to `(x, y)`.
    pub(crate) fn new(alg: EcDSA, x: &[u8], y: &[u8], d: &SecretSlice<u8>) -> Result<Self> {
        Ok(Self {
            inner: BackendPrivateKey::new(alg, x, y, d)?,
            alg,
        })
    }

    /// Generates a new random key on the curve of `alg`.
    pub(crate) fn generate(alg: EcDSA) -> Result<Self> {
        Ok(Self {
            inner: BackendPrivateKey::generate(alg)?,
            alg,
        })
    }

    /// The private scalar, as wide as the field of the curve.
    pub(crate) fn private_material(&self) -> SecretSlice<u8> {
        self.inner.private_material()
    }

    /// The (x, y) coordinates of the public point.
    pub(crate) fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.inner.public_point()
    }

    pub(crate) fn to_public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
            alg: self.alg,
        }
    }

    /// Signs `message`, producing a raw `r‖s` signature.
    pub(crate) fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let prehash = digest(self.alg, message);
        Ok(self.inner.sign_prehash(&prehash)?.into())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;

    #[test]
    fn sign_and_verify_on_every_curve() {
        for (alg, width) in [(EcDSA::Es256, 32), (EcDSA::Es384, 48), (EcDSA::Es512, 66)] {
            let key = PrivateKey::generate(alg).unwrap();
            let (x, y) = key.public_point();
            assert_eq!(x.len(), width);
            assert_eq!(y.len(), width);
            assert_eq!(key.private_material().expose_secret().len(), width);

            let signature = key.sign(b"payload").unwrap();
            assert_eq!(signature.len(), alg.signature_size());

            let public = key.to_public_key();
            public.verify(b"payload", &signature).unwrap();
            assert!(matches!(
                public.verify(b"payloae", &signature),
                Err(Error::AuthenticationFailure)
            ));
            assert!(matches!(
                public.verify(b"payload", &signature[1..]),
                Err(Error::AuthenticationFailure)
            ));
        }
    }

    #[test]
    fn p256_and_p384_signatures_are_deterministic() {
        for alg in [EcDSA::Es256, EcDSA::Es384] {
            let key = PrivateKey::generate(alg).unwrap();
            assert_eq!(key.sign(b"abc").unwrap(), key.sign(b"abc").unwrap());
        }
    }

    #[test]
    fn p521_signatures_use_fresh_nonces() {
        let key = PrivateKey::generate(EcDSA::Es512).unwrap();
        let public = key.to_public_key();

        let first = key.sign(b"abc").unwrap();
        let second = key.sign(b"abc").unwrap();
        assert_ne!(first, second);
        public.verify(b"abc", &first).unwrap();
        public.verify(b"abc", &second).unwrap();
    }

    #[test]
    fn reconstruct_from_parts() {
        let key = PrivateKey::generate(EcDSA::Es384).unwrap();
        let (x, y) = key.public_point();
        let d = key.private_material();

        let restored = PrivateKey::new(EcDSA::Es384, &x, &y, &d).unwrap();
        assert_eq!(restored.public_point(), (x.clone(), y.clone()));

        let other = PrivateKey::generate(EcDSA::Es384).unwrap();
        assert!(matches!(
            PrivateKey::new(EcDSA::Es384, &x, &y, &other.private_material()),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            PublicKey::new(EcDSA::Es256, &x, &y),
            Err(Error::InvalidKey(_))
        ));
    }
}
