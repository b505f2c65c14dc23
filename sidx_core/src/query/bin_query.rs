use std::ops::Deref;

use crate::error::Result;
use crate::index::{IndexKeyValue, IndexKind};
use crate::location::Location;
use crate::BinaryValue;

use super::builder::{impl_index_query_builder, IndexQuery, KeyCriteria, KeyShape, QueryOptions};
use super::validate::check_key_kind;

/// A query against a binary (`_bin`) secondary index.
///
/// The only typed variant that accepts a regex term filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinIndexQuery {
    query: IndexQuery,
}

impl BinIndexQuery {
    pub fn match_value(&self) -> Option<&BinaryValue> {
        match self.query.criteria() {
            KeyCriteria::Match(key) => key.as_bin(),
            KeyCriteria::Range { .. } => None,
        }
    }

    pub fn range_start(&self) -> Option<&BinaryValue> {
        match self.query.criteria() {
            KeyCriteria::Range { start, .. } => start.as_bin(),
            KeyCriteria::Match(_) => None,
        }
    }

    pub fn range_end(&self) -> Option<&BinaryValue> {
        match self.query.criteria() {
            KeyCriteria::Range { end, .. } => end.as_bin(),
            KeyCriteria::Match(_) => None,
        }
    }

    pub fn into_index_query(self) -> IndexQuery {
        self.query
    }
}

impl Deref for BinIndexQuery {
    type Target = IndexQuery;

    fn deref(&self) -> &Self::Target {
        &self.query
    }
}

/// Builder for [`BinIndexQuery`].
#[derive(Debug, Clone)]
pub struct BinIndexQueryBuilder {
    options: QueryOptions,
}

impl BinIndexQueryBuilder {
    fn options(location: Location, index_name: impl Into<String>) -> QueryOptions {
        QueryOptions::new(
            location,
            index_name.into(),
            IndexKind::Binary,
            KeyShape::Typed,
        )
    }

    /// Exact match on `key`
    pub fn new(
        location: Location,
        index_name: impl Into<String>,
        key: impl Into<BinaryValue>,
    ) -> Self {
        Self {
            options: Self::options(location, index_name)
                .with_match(Some(IndexKeyValue::Bin(key.into()))),
        }
    }

    /// Inclusive range from `start` to `end`
    pub fn range(
        location: Location,
        index_name: impl Into<String>,
        start: impl Into<BinaryValue>,
        end: impl Into<BinaryValue>,
    ) -> Self {
        Self {
            options: Self::options(location, index_name).with_range(
                Some(IndexKeyValue::Bin(start.into())),
                Some(IndexKeyValue::Bin(end.into())),
            ),
        }
    }

    /// Exact match on an untyped key. Fails right away if the key is not
    /// binary.
    pub fn from_key(
        location: Location,
        index_name: impl Into<String>,
        key: IndexKeyValue,
    ) -> Result<Self> {
        check_key_kind(IndexKind::Binary, &key)?;
        Ok(Self {
            options: Self::options(location, index_name).with_match(Some(key)),
        })
    }

    /// Range over untyped keys. Fails right away if either bound is not
    /// binary.
    pub fn from_key_range(
        location: Location,
        index_name: impl Into<String>,
        start: IndexKeyValue,
        end: IndexKeyValue,
    ) -> Result<Self> {
        check_key_kind(IndexKind::Binary, &start)?;
        check_key_kind(IndexKind::Binary, &end)?;
        Ok(Self {
            options: Self::options(location, index_name).with_range(Some(start), Some(end)),
        })
    }
}

impl_index_query_builder!(BinIndexQueryBuilder => BinIndexQuery);
