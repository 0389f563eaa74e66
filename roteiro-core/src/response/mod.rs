//! Response decoding and normalization.
//!
//! Raw bodies arrive as [`serde_json::Value`] from the gateway, are decoded
//! into a [`QueryEnvelope`] and mapped through a dataset's field map into
//! [`Record`]s keyed by [`LogicalField`](crate::LogicalField).

mod envelope;
mod error;
mod normalize;
mod record;

pub use envelope::{Feature, QueryEnvelope, ServiceErrorBody};
pub use error::ResponseError;
pub use normalize::{count, distinct_values, normalize, to_records};
pub use record::{AttributeValue, NormalizedResult, Record};
