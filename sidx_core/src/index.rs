use std::fmt;

use serde::Serialize;

use crate::BinaryValue;

/// The kind of a secondary index. Decides the wire suffix of the index name
/// and the type of the keys it is queried with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Integer index, keyed by 64-bit signed values
    Integer,
    /// Binary index, keyed by opaque byte strings
    Binary,
}

impl IndexKind {
    /// The suffix appended to the user-given index name on the wire
    pub fn suffix(&self) -> &'static str {
        match self {
            IndexKind::Integer => "_int",
            IndexKind::Binary => "_bin",
        }
    }

    /// Produce the fully qualified index name for this kind.
    ///
    /// Not idempotent: an already suffixed name gets suffixed again.
    pub fn canonicalize(&self, index_name: &str) -> String {
        let mut name = String::with_capacity(index_name.len() + 4);
        name.push_str(index_name);
        name.push_str(self.suffix());
        name
    }

    /// Only binary indexes can be scanned with a term filter
    pub fn supports_term_filter(&self) -> bool {
        matches!(self, IndexKind::Binary)
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Integer => write!(f, "integer"),
            IndexKind::Binary => write!(f, "binary"),
        }
    }
}

/// Free-function form of [`IndexKind::canonicalize`].
pub fn canonical_index_name(index_name: &str, kind: IndexKind) -> String {
    kind.canonicalize(index_name)
}

/// A key value used to match or bound an index query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKeyValue {
    Int(i64),
    Bin(BinaryValue),
}

impl IndexKeyValue {
    pub fn kind(&self) -> IndexKind {
        match self {
            IndexKeyValue::Int(_) => IndexKind::Integer,
            IndexKeyValue::Bin(_) => IndexKind::Binary,
        }
    }

    /// Wire form of the key. Integers render as decimal strings.
    pub fn to_binary_value(&self) -> BinaryValue {
        match self {
            IndexKeyValue::Int(i) => BinaryValue::from(i.to_string()),
            IndexKeyValue::Bin(b) => b.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            IndexKeyValue::Int(i) => Some(*i),
            IndexKeyValue::Bin(_) => None,
        }
    }

    pub fn as_bin(&self) -> Option<&BinaryValue> {
        match self {
            IndexKeyValue::Int(_) => None,
            IndexKeyValue::Bin(b) => Some(b),
        }
    }
}

impl From<i64> for IndexKeyValue {
    fn from(i: i64) -> Self {
        IndexKeyValue::Int(i)
    }
}

impl From<BinaryValue> for IndexKeyValue {
    fn from(b: BinaryValue) -> Self {
        IndexKeyValue::Bin(b)
    }
}

impl From<&str> for IndexKeyValue {
    fn from(s: &str) -> Self {
        IndexKeyValue::Bin(BinaryValue::from(s))
    }
}

impl From<String> for IndexKeyValue {
    fn from(s: String) -> Self {
        IndexKeyValue::Bin(BinaryValue::from(s))
    }
}
