//! The key layer of a JOSE toolkit.
//!
//! Keys are represented by their JSON Web Key members, stored in an ordered
//! [`ValueStorage`](storage::ValueStorage), and expose what they can do
//! through the capability traits in [`jwk`]. All operations take an
//! algorithm identifier from [`jwa`], where [`JsonWebAlgorithm::None`]
//! selects the algorithm stored in the key.
//!
//! ```
//! use jose_keys::{
//!     jwa::{Hmac, JsonWebAlgorithm},
//!     jwk::{DecryptingKey, SigningKey, SymmetricKey, ValidatingKey},
//! };
//! # fn main() -> Result<(), jose_keys::Error> {
//! let key = SymmetricKey::for_aes_gcm([0x42u8; 16])?;
//! let sealed = key.encrypt(b"hello", &JsonWebAlgorithm::None)?;
//! assert_eq!(key.decrypt((&sealed).into(), &JsonWebAlgorithm::None)?, b"hello");
//!
//! let key = SymmetricKey::generate_hmac(Hmac::Hs256)?;
//! let mac = key.sign(b"token-body", &JsonWebAlgorithm::None)?;
//! assert!(key.validate(&mac, b"token-bodx", &JsonWebAlgorithm::None).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! [`JsonWebAlgorithm::None`]: jwa::JsonWebAlgorithm::None
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub(crate) mod base64_url;
pub(crate) mod sealed;

pub mod asn1;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod jwa;
pub mod jwk;
pub mod sealed_data;
pub mod storage;

#[doc(inline)]
pub use self::error::{Error, Result};
