//! Errors raised while building query URLs.

use thiserror::Error;

use crate::dataset::{DatasetKey, LogicalField, UnknownDatasetError};

/// Errors raised by [`QueryBuilder`](super::QueryBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The dataset is not in the registry.
    #[error(transparent)]
    UnknownDataset(#[from] UnknownDatasetError),
    /// A filter, sort or distinct field has no provider attribute in the
    /// dataset.
    #[error("dataset {dataset} has no attribute for field `{field}`")]
    UnmappedField {
        /// Dataset being queried.
        dataset: DatasetKey,
        /// Logical field with no mapping.
        field: LogicalField,
    },
    /// A value for a numeric attribute is not a number.
    #[error("value {value:?} for numeric attribute {field} is not a number")]
    InvalidNumericLiteral {
        /// Provider attribute name.
        field: String,
        /// Value as supplied.
        value: String,
    },
}
