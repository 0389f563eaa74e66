//! Errors raised while interpreting ArcGIS responses.

use thiserror::Error;

use crate::dataset::{DatasetKey, LogicalField};

/// Errors raised by the response normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// The body is JSON but not a query envelope.
    #[error("malformed query response: {message}")]
    Decode {
        /// Deserializer message.
        message: String,
    },
    /// The provider reported a query error inside a successful response.
    #[error("service error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Service {
        /// ArcGIS error code, when given.
        code: Option<i64>,
        /// Provider message.
        message: String,
    },
    /// Values were requested for a field the dataset does not map.
    #[error("dataset {dataset} has no attribute for field `{field}`")]
    UnmappedField {
        /// Dataset the response belongs to.
        dataset: DatasetKey,
        /// Logical field with no mapping.
        field: LogicalField,
    },
    /// A count query response carried no `count`.
    #[error("count response has no `count` attribute")]
    MissingCount,
}
