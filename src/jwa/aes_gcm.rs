/// Content Encryption with AES GCM as defined in [section 5.3 of RFC 7518]
///
/// [section 5.3 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.3>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesGcm {
    /// AES GCM using 128-bit key
    Aes128,
    /// AES GCM using 192-bit key
    Aes192,
    /// AES GCM using 256-bit key
    Aes256,
}

impl AesGcm {
    /// The length of the nonce (`iv`) in bytes.
    pub const NONCE_SIZE: usize = 96 / 8;

    /// The length of the authentication tag in bytes.
    pub const TAG_SIZE: usize = 128 / 8;

    /// The key length in bytes.
    pub const fn key_size(self) -> usize {
        match self {
            Self::Aes128 => 128 / 8,
            Self::Aes192 => 192 / 8,
            Self::Aes256 => 256 / 8,
        }
    }

    /// Picks the variant for a key of the given length in bits.
    pub const fn from_key_bits(bits: usize) -> Option<Self> {
        match bits {
            128 => Some(Self::Aes128),
            192 => Some(Self::Aes192),
            256 => Some(Self::Aes256),
            _ => None,
        }
    }
}
