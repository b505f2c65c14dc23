use std::fmt;
use std::ops::Deref;

use bytes::Bytes;
use serde::{Serialize, Serializer};

/// An immutable byte string as it travels on the wire.
///
/// Index keys, continuations and index names are all carried as raw bytes.
/// The textual form is the UTF-8 rendering of those bytes and is used
/// verbatim, so a value created from a string always renders back to it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BinaryValue(Bytes);

impl BinaryValue {
    /// Create a value from anything convertible into bytes
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        BinaryValue(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value as `&str` if the bytes are valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl fmt::Display for BinaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl Deref for BinaryValue {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for BinaryValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for BinaryValue {
    fn from(s: &str) -> Self {
        BinaryValue(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for BinaryValue {
    fn from(s: String) -> Self {
        BinaryValue(Bytes::from(s))
    }
}

impl From<&[u8]> for BinaryValue {
    fn from(b: &[u8]) -> Self {
        BinaryValue(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for BinaryValue {
    fn from(b: Vec<u8>) -> Self {
        BinaryValue(Bytes::from(b))
    }
}

impl From<Bytes> for BinaryValue {
    fn from(b: Bytes) -> Self {
        BinaryValue(b)
    }
}

// Text when it is text, otherwise the raw bytes.
impl Serialize for BinaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(&self.0),
        }
    }
}
