// Building secondary index queries.
//
// Each variant (integer, binary, raw) has its own builder. All of them share
// the chained options of `IndexQueryBuilder`, run the same validation rules
// in `build()` and freeze into an `IndexQuery`, which turns into the
// transport-facing `QueryDescriptor`.

mod bin_query;
mod builder;
mod descriptor;
mod int_query;
mod raw_query;
mod validate;

pub use bin_query::{BinIndexQuery, BinIndexQueryBuilder};
pub use builder::{IndexQuery, IndexQueryBuilder, KeyCriteria};
pub use descriptor::{DescriptorKey, QueryDescriptor};
pub use int_query::{IntIndexQuery, IntIndexQueryBuilder};
pub use raw_query::{RawIndexQuery, RawIndexQueryBuilder, RawKeys};
