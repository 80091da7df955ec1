use ::hmac::Hmac;
use digest::{KeyInit, Mac, Output};
use sha2::{Sha256, Sha384, Sha512};

use crate::{crypto::backend::interface::hmac, error::Result, jwa};

/// One `Hmac<D>` per supported digest, behind a single concrete type.
enum Instance {
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

/// Runs `$body` with `$mac` bound to the concrete `Hmac<D>` and wraps the
/// output in the matching [`Tag`] variant.
macro_rules! each_instance {
    ($inner:expr, |$mac:ident| $body:expr) => {
        match $inner {
            Instance::Sha256($mac) => Tag::Sha256($body),
            Instance::Sha384($mac) => Tag::Sha384($body),
            Instance::Sha512($mac) => Tag::Sha512($body),
        }
    };
}

/// A finished tag, still in the fixed-size array of its digest.
pub(crate) enum Tag {
    Sha256(Output<Hmac<Sha256>>),
    Sha384(Output<Hmac<Sha384>>),
    Sha512(Output<Hmac<Sha512>>),
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        match self {
            Tag::Sha256(tag) => tag.as_slice(),
            Tag::Sha384(tag) => tag.as_slice(),
            Tag::Sha512(tag) => tag.as_slice(),
        }
    }
}

fn keyed<M: KeyInit>(key: &[u8]) -> Result<M> {
    Ok(<M as KeyInit>::new_from_slice(key)?)
}

/// HMAC key backed by the `hmac` crate.
pub(crate) struct Key(Instance);

impl hmac::Key for Key {
    type Signature = Tag;

    fn new(variant: jwa::Hmac, key: &[u8]) -> Result<Self> {
        let instance = match variant {
            jwa::Hmac::Hs256 => Instance::Sha256(keyed(key)?),
            jwa::Hmac::Hs384 => Instance::Sha384(keyed(key)?),
            jwa::Hmac::Hs512 => Instance::Sha512(keyed(key)?),
        };
        Ok(Key(instance))
    }

    fn sign(&mut self, data: &[u8]) -> Result<Tag> {
        // `finalize_reset` leaves the keyed state ready for the next message
        Ok(each_instance!(&mut self.0, |mac| {
            Mac::update(mac, data);
            mac.finalize_reset().into_bytes()
        }))
    }
}
