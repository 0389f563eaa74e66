//! Query URL assembly for ArcGIS `MapServer` layers.
//!
//! Every operation resolves its dataset through the [`Registry`] and returns
//! a complete [`url::Url`] whose parameters are form-urlencoded. Nothing
//! here performs I/O.
//!
//! [`Registry`]: crate::Registry

mod builder;
mod error;
mod filter;
mod page;

pub use builder::QueryBuilder;
pub use error::QueryError;
pub use filter::{FilterPredicate, MATCH_ALL, escape_literal};
pub use page::{
    DEFAULT_PAGE_SIZE, PageWindow, PageWindowError, ParseSortError, SortField, SortOrder,
};
