use std::ops::Deref;

use crate::index::{IndexKeyValue, IndexKind};
use crate::location::Location;
use crate::BinaryValue;

use super::builder::{impl_index_query_builder, IndexQuery, KeyCriteria, KeyShape, QueryOptions};

/// Key fields of a query in wire form, as received from elsewhere.
///
/// Any combination may be set; `build()` rejects the illegal ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawKeys {
    pub match_value: Option<BinaryValue>,
    pub range_start: Option<BinaryValue>,
    pub range_end: Option<BinaryValue>,
}

/// A query whose keys are already wire-shaped byte strings.
///
/// Used to re-issue a query built from values the caller got back from the
/// store. The kind is explicit and the keys are not parsed, so an integer
/// query with a non-numeric key builds fine unless strict integer keys are
/// turned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIndexQuery {
    query: IndexQuery,
}

impl RawIndexQuery {
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

impl Deref for RawIndexQuery {
    type Target = IndexQuery;

    fn deref(&self) -> &Self::Target {
        &self.query
    }
}

/// Builder for [`RawIndexQuery`].
#[derive(Debug, Clone)]
pub struct RawIndexQueryBuilder {
    options: QueryOptions,
}

impl RawIndexQueryBuilder {
    /// Exact match on `key`
    pub fn new(
        location: Location,
        index_name: impl Into<String>,
        kind: IndexKind,
        key: impl Into<BinaryValue>,
    ) -> Self {
        Self::from_parts(
            location,
            index_name,
            kind,
            RawKeys {
                match_value: Some(key.into()),
                ..Default::default()
            },
        )
    }

    /// Inclusive range from `start` to `end`
    pub fn range(
        location: Location,
        index_name: impl Into<String>,
        kind: IndexKind,
        start: impl Into<BinaryValue>,
        end: impl Into<BinaryValue>,
    ) -> Self {
        Self::from_parts(
            location,
            index_name,
            kind,
            RawKeys {
                match_value: None,
                range_start: Some(start.into()),
                range_end: Some(end.into()),
            },
        )
    }

    /// Build from the individual key fields of a wire-shaped query
    pub fn from_parts(
        location: Location,
        index_name: impl Into<String>,
        kind: IndexKind,
        keys: RawKeys,
    ) -> Self {
        let options = QueryOptions::new(
            location,
            index_name.into(),
            kind,
            KeyShape::Raw { strict: false },
        )
        .with_match(keys.match_value.map(IndexKeyValue::Bin))
        .with_range(
            keys.range_start.map(IndexKeyValue::Bin),
            keys.range_end.map(IndexKeyValue::Bin),
        );
        Self { options }
    }

    /// Reject integer keys that are not decimal 64-bit integers at
    /// `build()` instead of leaving it to the server. Off by default.
    pub fn with_strict_integer_keys(mut self, strict: bool) -> Self {
        self.options.set_strict(strict);
        self
    }
}

impl_index_query_builder!(RawIndexQueryBuilder => RawIndexQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::IndexQueryBuilder;
    use crate::Error;

    fn loc() -> Location {
        Location::new("bucket_name").with_bucket_type("bucket_type")
    }

    #[test]
    fn test_non_numeric_integer_key_builds() {
        let query = RawIndexQueryBuilder::new(loc(), "test_index", IndexKind::Integer, "match")
            .build()
            .unwrap();
        assert_eq!(query.match_value(), Some(&BinaryValue::from("match")));
        assert_eq!(query.canonical_index_name(), "test_index_int");
    }

    #[test]
    fn test_strict_integer_keys() {
        let err = RawIndexQueryBuilder::new(loc(), "test_index", IndexKind::Integer, "match")
            .with_strict_integer_keys(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::IllegalConfiguration(_)));

        let query = RawIndexQueryBuilder::range(loc(), "age", IndexKind::Integer, "-5", "17")
            .with_strict_integer_keys(true)
            .build()
            .unwrap();
        assert_eq!(query.range_start(), Some(&BinaryValue::from("-5")));
    }

    #[test]
    fn test_from_parts_exclusivity() {
        let keys = RawKeys {
            match_value: Some("m".into()),
            range_start: Some("a".into()),
            range_end: Some("z".into()),
        };
        let err = RawIndexQueryBuilder::from_parts(loc(), "test_index", IndexKind::Binary, keys)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::IllegalConfiguration(_)));

        let err = RawIndexQueryBuilder::from_parts(
            loc(),
            "test_index",
            IndexKind::Binary,
            RawKeys::default(),
        )
        .build()
        .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(_)));
    }

    #[test]
    fn test_from_parts_missing_bound() {
        let keys = RawKeys {
            range_start: Some("a".into()),
            ..Default::default()
        };
        let err = RawIndexQueryBuilder::from_parts(loc(), "test_index", IndexKind::Binary, keys)
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingRequiredField("range end".to_string()));
    }

    #[test]
    fn test_term_filter_follows_kind() {
        let err = RawIndexQueryBuilder::new(loc(), "test_index", IndexKind::Integer, "1")
            .with_regex_term_filter("filter")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::IllegalConfiguration(_)));

        let query = RawIndexQueryBuilder::new(loc(), "test_index", IndexKind::Binary, "1")
            .with_regex_term_filter("filter")
            .build()
            .unwrap();
        assert_eq!(query.term_filter(), Some("filter"));
    }
}
