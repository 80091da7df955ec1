use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::sealed::Sealed;

/// JWK thumbprints as defined in [RFC 7638].
///
/// This trait is implemented by all key types. Private and public EC keys
/// of the same key pair have the same thumbprint.
///
/// If you want to use custom hashing functions, call the
/// [`Self::thumbprint_prehashed`] method and hash the result yourself.
///
/// [RFC 7638]: <https://datatracker.ietf.org/doc/html/rfc7638>
pub trait Thumbprint: Sealed {
    /// Compute the thumbprint JSON string of this key.
    ///
    /// This is the JSON object of the required members of the key type,
    /// ordered lexicographically and without any whitespace. It is not hashed,
    /// for the common hash functions have a look at these methods:
    ///
    /// - SHA256 - [`thumbprint_sha256`](Self::thumbprint_sha256)
    /// - SHA384 - [`thumbprint_sha384`](Self::thumbprint_sha384)
    /// - SHA512 - [`thumbprint_sha512`](Self::thumbprint_sha512)
    fn thumbprint_prehashed(&self) -> String;

    /// Computes the SHA256-hashed thumbprint of this key.
    fn thumbprint_sha256(&self) -> Vec<u8> {
        let msg = self.thumbprint_prehashed();
        crate::crypto::sha256(msg.as_bytes())
    }

    /// Computes the SHA384-hashed thumbprint of this key.
    fn thumbprint_sha384(&self) -> Vec<u8> {
        let msg = self.thumbprint_prehashed();
        crate::crypto::sha384(msg.as_bytes())
    }

    /// Computes the SHA512-hashed thumbprint of this key.
    fn thumbprint_sha512(&self) -> Vec<u8> {
        let msg = self.thumbprint_prehashed();
        crate::crypto::sha512(msg.as_bytes())
    }
}

/// Serializes the required members in lexicographic order.
pub(crate) fn serialize_key_thumbprint<const N: usize>(
    members: [(&'static str, String); N],
) -> String {
    let sorted = BTreeMap::from(members);
    let map = sorted
        .into_iter()
        .map(|(name, value)| (name.to_owned(), Value::String(value)))
        .collect::<Map<String, Value>>();

    Value::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_sorted() {
        let json = serialize_key_thumbprint([
            ("y", "4".to_owned()),
            ("kty", "EC".to_owned()),
            ("x", "3".to_owned()),
            ("crv", "P-256".to_owned()),
        ]);
        assert_eq!(json, r#"{"crv":"P-256","kty":"EC","x":"3","y":"4"}"#);
    }
}
