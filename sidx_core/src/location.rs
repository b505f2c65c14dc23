use std::fmt;

use serde::Serialize;

use crate::BinaryValue;

/// Bucket type used by the store when none is given.
pub const DEFAULT_BUCKET_TYPE: &str = "default";

/// The bucket (and optional bucket type) an index query runs against.
///
/// Queries treat this as an opaque value and only compare it for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    bucket_name: BinaryValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_type: Option<BinaryValue>,
}

impl Location {
    pub fn new(bucket_name: impl Into<BinaryValue>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            bucket_type: None,
        }
    }

    /// Set the bucket type
    pub fn with_bucket_type(mut self, bucket_type: impl Into<BinaryValue>) -> Self {
        self.bucket_type = Some(bucket_type.into());
        self
    }

    pub fn bucket_name(&self) -> &BinaryValue {
        &self.bucket_name
    }

    pub fn bucket_type(&self) -> Option<&BinaryValue> {
        self.bucket_type.as_ref()
    }

    /// The bucket type, falling back to the store default
    pub fn bucket_type_or_default(&self) -> BinaryValue {
        self.bucket_type
            .clone()
            .unwrap_or_else(|| BinaryValue::from(DEFAULT_BUCKET_TYPE))
    }

    pub(crate) fn is_present(&self) -> bool {
        !self.bucket_name.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket_type_or_default(), self.bucket_name)
    }
}
