//! Filter predicates and `where` expression assembly.

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetDescriptor, FieldKind, FieldSpec, LogicalField};

use super::QueryError;

/// Expression ArcGIS treats as "no constraint".
pub const MATCH_ALL: &str = "1=1";

/// Optional equality constraints on a listing.
///
/// Terms are emitted in declaration order (district, then type) and joined
/// with `AND`. Empty strings are treated as absent.
///
/// # Examples
/// ```
/// use roteiro_core::FilterPredicate;
///
/// let filters = FilterPredicate::new().with_district("Lisboa").with_type("Hotel");
/// assert!(!filters.is_empty());
/// assert!(FilterPredicate::new().with_district("").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// District the establishment must be in.
    #[serde(default)]
    pub district: Option<String>,
    /// Typology or modality the establishment must have.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl FilterPredicate {
    /// An unconstrained predicate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            district: None,
            kind: None,
        }
    }

    /// Constrain the district.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Constrain the typology.
    #[must_use]
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether no term would be emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms().next().is_none()
    }

    fn terms(&self) -> impl Iterator<Item = (LogicalField, &str)> {
        [
            (LogicalField::District, self.district.as_deref()),
            (LogicalField::Kind, self.kind.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.filter(|v| !v.is_empty()).map(|v| (field, v)))
    }
}

/// Double every single quote so `value` can sit inside a quoted literal.
///
/// This keeps expressions well formed; it is not a general injection
/// defence.
///
/// # Examples
/// ```
/// use roteiro_core::query::escape_literal;
///
/// assert_eq!(escape_literal("Casa d'Avó"), "Casa d''Avó");
/// ```
#[must_use]
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render `spec = value` with the literal style the attribute needs.
pub(crate) fn equality_term(spec: &FieldSpec, value: &str) -> Result<String, QueryError> {
    match spec.kind {
        FieldKind::Text => Ok(format!("{} = '{}'", spec.name, escape_literal(value))),
        FieldKind::Numeric => {
            let literal = value.trim();
            if is_numeric_literal(literal) {
                Ok(format!("{} = {literal}", spec.name))
            } else {
                Err(QueryError::InvalidNumericLiteral {
                    field: spec.name.clone(),
                    value: value.to_owned(),
                })
            }
        }
    }
}

/// Build the `where` expression for `filters` against `descriptor`.
pub(crate) fn where_clause(
    descriptor: &DatasetDescriptor,
    filters: &FilterPredicate,
) -> Result<String, QueryError> {
    let terms = filters
        .terms()
        .map(|(logical, value)| {
            let spec = descriptor
                .field(logical)
                .ok_or(QueryError::UnmappedField {
                    dataset: descriptor.key(),
                    field: logical,
                })?;
            equality_term(spec, value)
        })
        .collect::<Result<Vec<_>, _>>()?;
    if terms.is_empty() {
        Ok(MATCH_ALL.to_owned())
    } else {
        Ok(terms.join(" AND "))
    }
}

/// Accept an optional minus sign, digits, and an optional fractional part.
fn is_numeric_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}
