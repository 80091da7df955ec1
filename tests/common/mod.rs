//! Common test helpers.

#![allow(dead_code)]

use jose_keys::storage::ValueStorage;
use serde_json::Value;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Reads a key file from the `tests/vectors/jwk` directory.
pub fn read_jwk(name: &str) -> TestResult<Value> {
    let json = std::fs::read_to_string(format!(
        "{}/tests/vectors/jwk/{name}.json",
        env!("CARGO_MANIFEST_DIR"),
    ))?;
    let key: Value = serde_json::from_str(&json)?;

    Ok(key)
}

/// Reads a key file into a [`ValueStorage`].
pub fn read_storage(name: &str) -> TestResult<ValueStorage> {
    Ok(ValueStorage::try_from(read_jwk(name)?)?)
}

/// Returns copies of `data` with each single bit flipped in turn.
pub fn bit_flips(data: &[u8]) -> impl Iterator<Item = Vec<u8>> + '_ {
    (0..data.len() * 8).map(move |bit| {
        let mut flipped = data.to_vec();
        flipped[bit / 8] ^= 1 << (bit % 8);
        flipped
    })
}
