use tracing::trace;

use crate::error::Result;
use crate::index::{IndexKeyValue, IndexKind};
use crate::location::Location;
use crate::BinaryValue;

use super::descriptor::{DescriptorKey, QueryDescriptor};
use super::validate;

/// How the keys of a builder relate to its index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyShape {
    /// Keys are typed values of the builder's kind
    Typed,
    /// Keys are wire-shaped byte strings whatever the kind
    Raw { strict: bool },
}

/// The key part of a built query: an exact match or an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCriteria {
    Match(IndexKeyValue),
    Range {
        start: IndexKeyValue,
        end: IndexKeyValue,
    },
}

impl KeyCriteria {
    pub fn is_range(&self) -> bool {
        matches!(self, KeyCriteria::Range { .. })
    }
}

/// Options collected by every builder variant until `build()`.
///
/// Location, name, kind and keys are fixed by the variant constructors. Only
/// the chained options below are written by the setters.
#[derive(Debug, Clone)]
pub(crate) struct QueryOptions {
    location: Location,
    index_name: String,
    kind: IndexKind,
    shape: KeyShape,
    match_value: Option<IndexKeyValue>,
    range_start: Option<IndexKeyValue>,
    range_end: Option<IndexKeyValue>,
    pub(crate) continuation: Option<BinaryValue>,
    pub(crate) max_results: Option<i32>,
    pub(crate) pagination_sort: Option<bool>,
    pub(crate) return_key_and_index: bool,
    pub(crate) term_filter: Option<String>,
}

impl QueryOptions {
    pub(crate) fn new(
        location: Location,
        index_name: String,
        kind: IndexKind,
        shape: KeyShape,
    ) -> Self {
        Self {
            location,
            index_name,
            kind,
            shape,
            match_value: None,
            range_start: None,
            range_end: None,
            continuation: None,
            max_results: None,
            pagination_sort: None,
            return_key_and_index: false,
            term_filter: None,
        }
    }

    pub(crate) fn with_match(mut self, key: Option<IndexKeyValue>) -> Self {
        self.match_value = key;
        self
    }

    pub(crate) fn with_range(
        mut self,
        start: Option<IndexKeyValue>,
        end: Option<IndexKeyValue>,
    ) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        if let KeyShape::Raw { .. } = self.shape {
            self.shape = KeyShape::Raw { strict };
        }
    }

    /// Run the validation rules in order and freeze the options.
    pub(crate) fn freeze(self) -> Result<IndexQuery> {
        validate::check_required(&self.location, &self.index_name)?;
        let criteria =
            validate::check_criteria(self.match_value, self.range_start, self.range_end)?;
        validate::check_key_kinds(self.kind, &criteria, self.shape)?;
        validate::check_term_filter(self.kind, self.term_filter.as_deref())?;
        let max_results = validate::check_max_results(self.max_results)?;

        let canonical_name = self.kind.canonicalize(&self.index_name);
        trace!(
            index = %canonical_name,
            location = %self.location,
            range = criteria.is_range(),
            "built secondary index query"
        );

        Ok(IndexQuery {
            location: self.location,
            index_name: self.index_name,
            canonical_name,
            kind: self.kind,
            criteria,
            continuation: self.continuation,
            max_results,
            pagination_sort: self.pagination_sort,
            return_key_and_index: self.return_key_and_index,
            term_filter: self.term_filter,
        })
    }
}

/// Chained configuration shared by all index query builders.
///
/// Setters only record values. Everything is checked in [`build`], which
/// either returns a fully valid query or the first rule that failed.
///
/// The index kind and keys of a builder are fixed when it is created and
/// cannot be reached through this trait:
///
/// ```compile_fail
/// use sidx_core::{IndexQueryBuilder, IntIndexQueryBuilder, Location};
///
/// let mut builder = IntIndexQueryBuilder::new(Location::new("users"), "age", 1);
/// let _ = builder.options_mut();
/// ```
///
/// ```compile_fail
/// use sidx_core::QueryOptions;
/// ```
///
/// [`build`]: IndexQueryBuilder::build
pub trait IndexQueryBuilder: Sized {
    /// The immutable query produced by `build()`
    type Query;

    /// Validate the options and freeze them into a query
    fn build(self) -> Result<Self::Query>;

    /// Resume from a continuation returned by a previous page
    fn with_continuation(self, continuation: impl Into<BinaryValue>) -> Self;

    /// Cap the number of results. Must be positive.
    fn with_max_results(self, max_results: i32) -> Self;

    /// Ask for sorted results, needed for stable pagination
    fn with_pagination_sort(self, pagination_sort: bool) -> Self;

    /// Return the index value alongside each object key
    fn with_key_and_index(self, return_key_and_index: bool) -> Self;

    /// Filter index values on the server with a regular expression.
    /// Only binary indexes accept a term filter.
    fn with_regex_term_filter(self, term_filter: impl Into<String>) -> Self;
}

/// Implements [`IndexQueryBuilder`] for a builder holding its `QueryOptions`
/// in an `options` field and wrapping the frozen query in a `query` field.
macro_rules! impl_index_query_builder {
    ( $builder:ident => $query:ident ) => {
        impl $crate::query::IndexQueryBuilder for $builder {
            type Query = $query;

            fn build(self) -> $crate::error::Result<$query> {
                Ok($query {
                    query: self.options.freeze()?,
                })
            }

            fn with_continuation(mut self, continuation: impl Into<$crate::BinaryValue>) -> Self {
                self.options.continuation = Some(continuation.into());
                self
            }

            fn with_max_results(mut self, max_results: i32) -> Self {
                self.options.max_results = Some(max_results);
                self
            }

            fn with_pagination_sort(mut self, pagination_sort: bool) -> Self {
                self.options.pagination_sort = Some(pagination_sort);
                self
            }

            fn with_key_and_index(mut self, return_key_and_index: bool) -> Self {
                self.options.return_key_and_index = return_key_and_index;
                self
            }

            fn with_regex_term_filter(mut self, term_filter: impl Into<String>) -> Self {
                self.options.term_filter = Some(term_filter.into());
                self
            }
        }
    };
}

pub(crate) use impl_index_query_builder;

/// A validated, immutable secondary index query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    location: Location,
    index_name: String,
    canonical_name: String,
    kind: IndexKind,
    criteria: KeyCriteria,
    continuation: Option<BinaryValue>,
    max_results: Option<u32>,
    pagination_sort: Option<bool>,
    return_key_and_index: bool,
    term_filter: Option<String>,
}

impl IndexQuery {
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The index name as given by the caller
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The index name as sent on the wire
    pub fn canonical_index_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn criteria(&self) -> &KeyCriteria {
        &self.criteria
    }

    pub fn continuation(&self) -> Option<&BinaryValue> {
        self.continuation.as_ref()
    }

    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    pub fn pagination_sort(&self) -> Option<bool> {
        self.pagination_sort
    }

    pub fn return_key_and_index(&self) -> bool {
        self.return_key_and_index
    }

    pub fn term_filter(&self) -> Option<&str> {
        self.term_filter.as_deref()
    }

    /// Translate into the descriptor handed to the transport.
    pub fn create_core_query(&self) -> QueryDescriptor {
        let key = match &self.criteria {
            KeyCriteria::Match(key) => DescriptorKey::Single {
                index_key: key.to_binary_value(),
            },
            KeyCriteria::Range { start, end } => DescriptorKey::Range {
                range_start: start.to_binary_value(),
                range_end: end.to_binary_value(),
            },
        };
        QueryDescriptor {
            location: self.location.clone(),
            index_name: self.canonical_name.clone(),
            key,
            continuation: self.continuation.clone(),
            max_results: self.max_results,
            pagination_sort: self.pagination_sort,
            return_key_and_index: self.return_key_and_index,
            term_filter: self.term_filter.clone(),
        }
    }
}
