/// Digital Signature with ECDSA as defined in [section 3.4 of RFC 7518]
///
/// [section 3.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.4>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcDSA {
    /// ECDSA using P-256 and SHA-256
    Es256,
    /// ECDSA using P-384 and SHA-384
    Es384,
    /// ECDSA using P-521 and SHA-512
    Es512,
}

impl EcDSA {
    /// Length of a raw `r‖s` signature, two big-endian scalars of the curve's
    /// field size.
    pub const fn signature_size(self) -> usize {
        match self {
            Self::Es256 => 2 * 32,
            Self::Es384 => 2 * 48,
            Self::Es512 => 2 * 66,
        }
    }
}
