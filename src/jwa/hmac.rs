/// HMAC with SHA-2 Functions as defined in [section 3.2 of RFC 7518]
///
/// [section 3.2 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hmac {
    /// HMAC using SHA-256
    Hs256,
    /// HMAC using SHA-384
    Hs384,
    /// HMAC using SHA-512
    Hs512,
}

impl Hmac {
    /// The number of bytes produced by this MAC.
    ///
    /// Keys shorter than this are rejected, as required by RFC 7518.
    pub const fn output_size(self) -> usize {
        match self {
            Self::Hs256 => 256 / 8,
            Self::Hs384 => 384 / 8,
            Self::Hs512 => 512 / 8,
        }
    }
}
