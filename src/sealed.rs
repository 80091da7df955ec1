/// Keeps traits like [`Thumbprint`](crate::jwk::Thumbprint) closed to the key
/// types of this crate ([`C-SEALED`]).
///
/// [`C-SEALED`]: <https://rust-lang.github.io/api-guidelines/future-proofing.html>
pub trait Sealed {}
