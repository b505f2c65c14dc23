use serde::Serialize;

use crate::location::Location;
use crate::BinaryValue;

/// Key part of a descriptor in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DescriptorKey {
    Single {
        index_key: BinaryValue,
    },
    Range {
        range_start: BinaryValue,
        range_end: BinaryValue,
    },
}

/// The neutral, wire-ready form of a built index query.
///
/// This is what a transport serializes and sends. It holds no reference to
/// the builder or the query it came from, and every field is already
/// validated, so creating one cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    pub(crate) location: Location,
    pub(crate) index_name: String,
    #[serde(flatten)]
    pub(crate) key: DescriptorKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) continuation: Option<BinaryValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pagination_sort: Option<bool>,
    pub(crate) return_key_and_index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) term_filter: Option<String>,
}

impl QueryDescriptor {
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Canonical index name, suffix included
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn key(&self) -> &DescriptorKey {
        &self.key
    }

    pub fn is_range(&self) -> bool {
        matches!(self.key, DescriptorKey::Range { .. })
    }

    /// The exact-match key, absent for range queries
    pub fn index_key(&self) -> Option<&BinaryValue> {
        match &self.key {
            DescriptorKey::Single { index_key } => Some(index_key),
            DescriptorKey::Range { .. } => None,
        }
    }

    pub fn range_start(&self) -> Option<&BinaryValue> {
        match &self.key {
            DescriptorKey::Range { range_start, .. } => Some(range_start),
            DescriptorKey::Single { .. } => None,
        }
    }

    pub fn range_end(&self) -> Option<&BinaryValue> {
        match &self.key {
            DescriptorKey::Range { range_end, .. } => Some(range_end),
            DescriptorKey::Single { .. } => None,
        }
    }

    pub fn continuation(&self) -> Option<&BinaryValue> {
        self.continuation.as_ref()
    }

    /// Absent means the server default applies
    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    pub fn pagination_sort(&self) -> Option<bool> {
        self.pagination_sort
    }

    pub fn is_pagination_sort(&self) -> bool {
        self.pagination_sort.unwrap_or(false)
    }

    pub fn is_return_key_and_index(&self) -> bool {
        self.return_key_and_index
    }

    pub fn term_filter(&self) -> Option<&str> {
        self.term_filter.as_deref()
    }
}
