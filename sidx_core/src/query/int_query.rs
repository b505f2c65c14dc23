use std::ops::Deref;

use crate::error::Result;
use crate::index::{IndexKeyValue, IndexKind};
use crate::location::Location;

use super::builder::{impl_index_query_builder, IndexQuery, KeyCriteria, KeyShape, QueryOptions};
use super::validate::check_key_kind;

/// A query against an integer (`_int`) secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntIndexQuery {
    query: IndexQuery,
}

impl IntIndexQuery {
    pub fn match_value(&self) -> Option<i64> {
        match self.query.criteria() {
            KeyCriteria::Match(key) => key.as_int(),
            KeyCriteria::Range { .. } => None,
        }
    }

    pub fn range_start(&self) -> Option<i64> {
        match self.query.criteria() {
            KeyCriteria::Range { start, .. } => start.as_int(),
            KeyCriteria::Match(_) => None,
        }
    }

    pub fn range_end(&self) -> Option<i64> {
        match self.query.criteria() {
            KeyCriteria::Range { end, .. } => end.as_int(),
            KeyCriteria::Match(_) => None,
        }
    }

    pub fn into_index_query(self) -> IndexQuery {
        self.query
    }
}

impl Deref for IntIndexQuery {
    type Target = IndexQuery;

    fn deref(&self) -> &Self::Target {
        &self.query
    }
}

/// Builder for [`IntIndexQuery`].
#[derive(Debug, Clone)]
pub struct IntIndexQueryBuilder {
    options: QueryOptions,
}

impl IntIndexQueryBuilder {
    fn options(location: Location, index_name: impl Into<String>) -> QueryOptions {
        QueryOptions::new(
            location,
            index_name.into(),
            IndexKind::Integer,
            KeyShape::Typed,
        )
    }

    /// Exact match on `key`
    pub fn new(location: Location, index_name: impl Into<String>, key: i64) -> Self {
        Self {
            options: Self::options(location, index_name).with_match(Some(IndexKeyValue::Int(key))),
        }
    }

    /// Inclusive range from `start` to `end`
    pub fn range(location: Location, index_name: impl Into<String>, start: i64, end: i64) -> Self {
        let start = IndexKeyValue::Int(start);
        let end = IndexKeyValue::Int(end);
        Self {
            options: Self::options(location, index_name).with_range(Some(start), Some(end)),
        }
    }

    /// Exact match on an untyped key. Fails right away if the key is not an
    /// integer.
    pub fn from_key(
        location: Location,
        index_name: impl Into<String>,
        key: IndexKeyValue,
    ) -> Result<Self> {
        check_key_kind(IndexKind::Integer, &key)?;
        Ok(Self {
            options: Self::options(location, index_name).with_match(Some(key)),
        })
    }

    /// Range over untyped keys. Fails right away if either bound is not an
    /// integer.
    pub fn from_key_range(
        location: Location,
        index_name: impl Into<String>,
        start: IndexKeyValue,
        end: IndexKeyValue,
    ) -> Result<Self> {
        check_key_kind(IndexKind::Integer, &start)?;
        check_key_kind(IndexKind::Integer, &end)?;
        Ok(Self {
            options: Self::options(location, index_name).with_range(Some(start), Some(end)),
        })
    }
}

impl_index_query_builder!(IntIndexQueryBuilder => IntIndexQuery);
