//! Wire shape of an ArcGIS query response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResponseError;

/// Top-level JSON object returned by a `MapServer/<layer>/query` call.
///
/// Only the members the client consumes are modelled; geometry and field
/// metadata are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEnvelope {
    /// Matching features. Absent for count-only queries.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Set when the provider truncated the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceeded_transfer_limit: Option<bool>,
    /// Total for `returnCountOnly` queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Query error reported with a 200 status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceErrorBody>,
}

/// One row of a query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Provider attribute name to raw JSON value.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// Error object ArcGIS embeds in failed query responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    /// Numeric error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Extra detail lines.
    #[serde(default)]
    pub details: Vec<String>,
}

impl QueryEnvelope {
    /// Decode `value` and surface any embedded service error.
    ///
    /// # Errors
    /// Returns [`ResponseError::Decode`] when `value` is not an envelope and
    /// [`ResponseError::Service`] when it carries an `error` member.
    ///
    /// # Examples
    /// ```
    /// use roteiro_core::{QueryEnvelope, ResponseError};
    /// use serde_json::json;
    ///
    /// let err = QueryEnvelope::from_value(json!({
    ///     "error": {"code": 400, "message": "Invalid query", "details": []}
    /// }))
    /// .unwrap_err();
    /// assert!(matches!(err, ResponseError::Service { code: Some(400), .. }));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ResponseError> {
        let envelope: Self =
            serde_json::from_value(value).map_err(|err| ResponseError::Decode {
                message: err.to_string(),
            })?;
        match envelope.error {
            Some(body) => {
                let message = if body.details.is_empty() {
                    body.message
                } else {
                    format!("{} ({})", body.message, body.details.join("; "))
                };
                Err(ResponseError::Service {
                    code: body.code,
                    message,
                })
            }
            None => Ok(envelope),
        }
    }
}
