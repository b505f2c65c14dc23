mod binary_value;
pub mod error;
pub mod index;
pub mod location;
pub mod query;

pub use binary_value::*;
pub use error::*;
pub use index::*;
pub use location::*;
pub use query::*;
