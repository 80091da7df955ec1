//! The ordered member store that backs every JSON Web Key.

use secrecy::SecretSlice;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    base64_url,
    error::{EncodingError, Error},
};

/// An insertion-ordered map from JWK member names to JSON values.
///
/// Byte-valued members (`k`, `x`, `y`, `d`, ...) are kept as unpadded
/// Base64Url strings and converted on access. All read accessors are soft:
/// a missing member, a member of the wrong JSON type or an undecodable string
/// all yield [`None`]. Callers that require a member turn the `None` into an
/// error of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueStorage(Map<String, Value>);

impl ValueStorage {
    /// Creates an empty storage.
    #[inline]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the raw value of the member `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the member `name` if it is a JSON string.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Deserializes the member `name` into `T`.
    ///
    /// Returns [`None`] if the member is missing or has a different shape.
    pub fn get_typed<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let value = self.get(name)?.clone();
        serde_json::from_value(value).ok()
    }

    /// Decodes the Base64Url string stored under `name`.
    pub fn get_bytes(&self, name: &str) -> Option<Vec<u8>> {
        base64_url::decode(self.get_str(name)?).ok()
    }

    /// Decodes the Base64Url string stored under `name` into a secret that
    /// is zeroized on drop.
    pub fn get_secret_bytes(&self, name: &str) -> Option<SecretSlice<u8>> {
        self.get_bytes(name).map(SecretSlice::from)
    }

    /// Sets the member `name`, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Stores `bytes` under `name`, encoded as an unpadded Base64Url string.
    pub fn set_bytes(&mut self, name: impl Into<String>, bytes: impl AsRef<[u8]>) {
        self.set(name, base64_url::encode(bytes));
    }

    /// Removes the member `name` and returns its value.
    ///
    /// The remaining members keep their relative order.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    /// Returns `true` if a member called `name` exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over all members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of members in this storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ValueStorage {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ValueStorage {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(EncodingError::NotAnObject.into()),
        }
    }
}

impl From<ValueStorage> for Value {
    fn from(storage: ValueStorage) -> Self {
        Value::Object(storage.0)
    }
}
