//! Pagination windows and sort orders.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{LogicalField, UnknownFieldError};

/// Page size used by the listing views when none is given.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Offset and size of one page of results.
///
/// Maps onto ArcGIS `resultOffset` and `resultRecordCount`.
///
/// # Examples
/// ```
/// use roteiro_core::PageWindow;
///
/// let first = PageWindow::new(0, 20)?;
/// let second = first.next();
/// assert_eq!((second.offset(), second.limit()), (20, 20));
/// assert!(PageWindow::new(0, 0).is_err());
/// # Ok::<(), roteiro_core::PageWindowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

/// Errors raised by [`PageWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageWindowError {
    /// A page must request at least one record.
    #[error("page limit must be positive")]
    ZeroLimit,
}

impl PageWindow {
    /// Validate and build a window.
    ///
    /// # Errors
    /// Returns [`PageWindowError::ZeroLimit`] when `limit` is zero.
    pub const fn new(offset: u64, limit: u64) -> Result<Self, PageWindowError> {
        if limit == 0 {
            return Err(PageWindowError::ZeroLimit);
        }
        Ok(Self { offset, limit })
    }

    /// Zero-based index of the first record.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of records.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// The window immediately after this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Direction of an `orderByFields` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

/// Field and direction to sort a listing by.
///
/// Parses from `field` or `field:asc|desc`.
///
/// # Examples
/// ```
/// use roteiro_core::{LogicalField, SortField, SortOrder};
///
/// let sort: SortField = "name:desc".parse()?;
/// assert_eq!(sort, SortField::new(LogicalField::Name, SortOrder::Desc));
/// # Ok::<(), roteiro_core::ParseSortError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field to sort on.
    pub field: LogicalField,
    /// Direction.
    pub order: SortOrder,
}

impl SortField {
    /// Sort by `field` in `order`.
    #[must_use]
    pub const fn new(field: LogicalField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Ascending sort by `field`.
    #[must_use]
    pub const fn ascending(field: LogicalField) -> Self {
        Self::new(field, SortOrder::Asc)
    }
}

/// Errors raised when parsing a [`SortField`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSortError {
    /// The field part is not a known logical field.
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
    /// The direction part is neither `asc` nor `desc`.
    #[error("unknown sort order `{order}` (expected asc or desc)")]
    UnknownOrder {
        /// The rejected direction.
        order: String,
    },
}

impl FromStr for SortField {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (field, direction) = value.split_once(':').unwrap_or((value, "asc"));
        let order = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => {
                return Err(ParseSortError::UnknownOrder {
                    order: direction.to_owned(),
                });
            }
        };
        Ok(Self::new(field.parse()?, order))
    }
}
