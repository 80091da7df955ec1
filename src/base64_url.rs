//! The single base64url codec used for every byte-valued JWK member.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use zeroize::Zeroize;

use crate::error::EncodingError;

/// Encodes the given bytes using the unpadded Base64Url alphabet.
#[inline]
pub(crate) fn encode(x: impl AsRef<[u8]>) -> String {
    Base64UrlUnpadded::encode_string(x.as_ref())
}

/// Decodes a Base64Url string.
///
/// Producers are not consistent about padding, so trailing `=` characters
/// are stripped before decoding.
pub(crate) fn decode(s: &str) -> Result<Vec<u8>, EncodingError> {
    Base64UrlUnpadded::decode_vec(s.trim_end_matches('='))
        .map_err(|_| EncodingError::Base64Url)
}

/// Raw bytes that (de)serialize as an unpadded Base64Url string.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Default, Zeroize)]
pub(crate) struct Base64UrlBytes(pub(crate) Vec<u8>);

impl Serialize for Base64UrlBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        encode(&self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Base64UrlBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = <std::borrow::Cow<'_, str>>::deserialize(deserializer)?;
        decode(&encoded).map(Self).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_tolerated() {
        assert_eq!(decode("aGk").unwrap(), b"hi");
        assert_eq!(decode("aGk=").unwrap(), b"hi");
    }

    #[test]
    fn standard_alphabet_is_rejected() {
        assert_eq!(decode("+/+/"), Err(EncodingError::Base64Url));
        assert_eq!(encode([0xfb, 0xff]), "-_8");
    }
}
