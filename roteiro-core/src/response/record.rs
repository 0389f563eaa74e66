//! Normalized domain records.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::dataset::LogicalField;

/// Scalar attribute value after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String attribute.
    Text(String),
    /// Numeric attribute, kept as the provider sent it. Dates arrive as
    /// epoch milliseconds.
    Number(Number),
    /// Boolean attribute.
    Flag(bool),
}

impl AttributeValue {
    /// Convert a raw JSON attribute. `null` and composite values yield
    /// `None`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::Bool(flag) => Some(Self::Flag(*flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Borrow the string payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric payload.
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }

    /// Numeric payload as a float, for arithmetic.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Boolean payload.
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

/// Dataset-agnostic view of one feature.
///
/// Attributes the provider omitted or sent as `null` are absent.
///
/// # Examples
/// ```
/// use roteiro_core::{AttributeValue, LogicalField, Record};
///
/// let record: Record = [
///     (LogicalField::Id, AttributeValue::Number(12345.into())),
///     (LogicalField::Name, AttributeValue::Text("Casa do Rio".into())),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(record.id().as_deref(), Some("12345"));
/// assert_eq!(record.name(), Some("Casa do Rio"));
/// assert_eq!(record.district(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<LogicalField, AttributeValue>,
}

impl Record {
    /// Value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: LogicalField) -> Option<&AttributeValue> {
        self.fields.get(&field)
    }

    /// String value of `field`, if present and textual.
    #[must_use]
    pub fn text(&self, field: LogicalField) -> Option<&str> {
        self.get(field).and_then(AttributeValue::as_text)
    }

    /// Registration number rendered as text, whatever its provider type.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.get(LogicalField::Id).map(ToString::to_string)
    }

    /// Establishment name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text(LogicalField::Name)
    }

    /// Typology or modality.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.text(LogicalField::Kind)
    }

    /// Municipality.
    #[must_use]
    pub fn municipality(&self) -> Option<&str> {
        self.text(LogicalField::Municipality)
    }

    /// District.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        self.text(LogicalField::District)
    }

    /// Present fields in logical-field order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, &AttributeValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(LogicalField, AttributeValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (LogicalField, AttributeValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Records plus the envelope metadata callers need for paging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Normalized features, in response order.
    pub records: Vec<Record>,
    /// Whether the provider truncated the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceeded_transfer_limit: Option<bool>,
    /// Total reported by the provider, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}
