//! The actual implementations for the cryptographic backend.

pub(super) mod interface;

mod rust;

pub(crate) use rust::Backend;
pub use rust::BackendError;
