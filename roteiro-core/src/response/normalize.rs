//! Mapping from provider attributes onto logical fields.

use log::warn;
use serde_json::Value;

use crate::dataset::{DatasetDescriptor, LogicalField};

use super::{AttributeValue, NormalizedResult, QueryEnvelope, Record, ResponseError};

/// Map every feature of `envelope` through the descriptor's field map.
///
/// Attributes with no logical counterpart are dropped. `null`, missing and
/// composite attributes become absent; composite ones are logged.
#[must_use]
pub fn normalize(envelope: QueryEnvelope, descriptor: &DatasetDescriptor) -> NormalizedResult {
    let records = envelope
        .features
        .iter()
        .map(|feature| {
            descriptor
                .fields()
                .filter_map(|(logical, spec)| {
                    let raw = feature.attributes.get(&spec.name)?;
                    let value = AttributeValue::from_json(raw);
                    if value.is_none() && (raw.is_array() || raw.is_object()) {
                        warn!(
                            "dropping composite attribute {} in {} feature",
                            spec.name,
                            descriptor.key()
                        );
                    }
                    value.map(|attribute| (logical, attribute))
                })
                .collect::<Record>()
        })
        .collect();
    NormalizedResult {
        records,
        exceeded_transfer_limit: envelope.exceeded_transfer_limit,
        total_count: envelope.count,
    }
}

/// Decode a raw response body and normalize it.
///
/// # Errors
/// Returns [`ResponseError`] when the body is not an envelope or reports a
/// service error.
pub fn to_records(
    body: Value,
    descriptor: &DatasetDescriptor,
) -> Result<NormalizedResult, ResponseError> {
    QueryEnvelope::from_value(body).map(|envelope| normalize(envelope, descriptor))
}

/// Sorted textual values of `field` from a distinct-values response.
///
/// Numbers and flags are rendered as text; absent values are dropped.
/// Uniqueness is left to the provider.
///
/// # Errors
/// Returns [`ResponseError`] when the body is not an envelope, reports a
/// service error, or `field` has no provider attribute.
///
/// # Examples
/// ```
/// use roteiro_core::{ApiHost, DatasetKey, LogicalField, Registry, distinct_values};
/// use serde_json::json;
///
/// let registry = Registry::standard(&ApiHost::default())?;
/// let et = registry.resolve(DatasetKey::Et)?;
/// let body = json!({"features": [
///     {"attributes": {"Distrito": "Porto"}},
///     {"attributes": {"Distrito": "Aveiro"}},
///     {"attributes": {"Distrito": "Lisboa"}},
/// ]});
/// let values = distinct_values(body, et, LogicalField::District)?;
/// assert_eq!(values, ["Aveiro", "Lisboa", "Porto"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn distinct_values(
    body: Value,
    descriptor: &DatasetDescriptor,
    field: LogicalField,
) -> Result<Vec<String>, ResponseError> {
    if descriptor.field(field).is_none() {
        return Err(ResponseError::UnmappedField {
            dataset: descriptor.key(),
            field,
        });
    }
    let result = to_records(body, descriptor)?;
    let mut values = result
        .records
        .iter()
        .filter_map(|record| record.get(field).map(ToString::to_string))
        .collect::<Vec<_>>();
    values.sort();
    Ok(values)
}

/// Total from a `returnCountOnly` response.
///
/// # Errors
/// Returns [`ResponseError::MissingCount`] when the body carries no count,
/// or the decode and service errors of [`QueryEnvelope::from_value`].
pub fn count(body: Value) -> Result<u64, ResponseError> {
    QueryEnvelope::from_value(body)?
        .count
        .ok_or(ResponseError::MissingCount)
}
