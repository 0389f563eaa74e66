//! Routed views of the browsing front end.

use std::{fmt, str::FromStr};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::DatasetKey;

/// Bytes escaped when an identifier is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Accommodation dataset named in a detail route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationApi {
    /// Tourist developments.
    Et,
    /// Local lodging.
    Ea,
}

impl AccommodationApi {
    /// Dataset backing this route segment.
    #[must_use]
    pub const fn dataset(self) -> DatasetKey {
        match self {
            Self::Et => DatasetKey::Et,
            Self::Ea => DatasetKey::Ea,
        }
    }
}

impl fmt::Display for AccommodationApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset().as_str())
    }
}

impl FromStr for AccommodationApi {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "et" => Ok(Self::Et),
            "ea" => Ok(Self::Ea),
            _ => Err(RouteError::UnknownApi {
                api: value.to_owned(),
            }),
        }
    }
}

/// Errors raised while routing a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No view matches the path.
    #[error("no view for path `{path}`")]
    NotFound {
        /// Path as supplied.
        path: String,
    },
    /// The detail route names a dataset other than `et` or `ea`.
    #[error("unknown accommodation api `{api}` (expected et or ea)")]
    UnknownApi {
        /// Segment as supplied.
        api: String,
    },
}

/// A page of the browsing front end.
///
/// # Examples
/// ```
/// use roteiro_core::{AccommodationApi, View};
///
/// let view = View::from_path("/accommodationsdetails/ea/12345")?;
/// assert_eq!(
///     view,
///     View::AccommodationDetails { api: AccommodationApi::Ea, id: "12345".into() }
/// );
/// assert_eq!(view.to_path(), "/accommodationsdetails/ea/12345");
/// # Ok::<(), roteiro_core::RouteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Landing page.
    Home,
    /// Paginated accommodation listing.
    Accommodations,
    /// One accommodation establishment.
    AccommodationDetails {
        /// Dataset the identifier belongs to.
        api: AccommodationApi,
        /// Registration number, percent-decoded from the path.
        id: String,
    },
    /// Flat casino listing.
    Casinos,
    /// Flat bingo hall listing.
    Bingos,
}

impl View {
    /// Route `path`, ignoring any query string, fragment or trailing slash.
    ///
    /// # Errors
    /// Returns [`RouteError::NotFound`] for unknown paths or identifiers that
    /// do not decode to UTF-8, and [`RouteError::UnknownApi`] for detail
    /// routes naming another dataset.
    pub fn from_path(path: &str) -> Result<Self, RouteError> {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let not_found = || RouteError::NotFound {
            path: path.to_owned(),
        };
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .strip_prefix('/')
                .ok_or_else(not_found)?
                .split('/')
                .collect::<Vec<_>>()
        };
        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["accommodations"] => Ok(Self::Accommodations),
            ["casinos"] => Ok(Self::Casinos),
            ["bingos"] => Ok(Self::Bingos),
            ["accommodationsdetails", api, id] if !id.is_empty() => {
                let api = api.parse()?;
                let decoded = percent_decode_str(id)
                    .decode_utf8()
                    .map_err(|_| not_found())?;
                Ok(Self::AccommodationDetails {
                    api,
                    id: decoded.into_owned(),
                })
            }
            _ => Err(not_found()),
        }
    }

    /// Canonical path for this view.
    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Accommodations => "/accommodations".to_owned(),
            Self::AccommodationDetails { api, id } => {
                format!(
                    "/accommodationsdetails/{api}/{}",
                    utf8_percent_encode(id, SEGMENT)
                )
            }
            Self::Casinos => "/casinos".to_owned(),
            Self::Bingos => "/bingos".to_owned(),
        }
    }

    /// Dataset the view reads from, if any.
    #[must_use]
    pub const fn dataset(&self) -> Option<DatasetKey> {
        match self {
            Self::Home | Self::Accommodations => None,
            Self::AccommodationDetails { api, .. } => Some(api.dataset()),
            Self::Casinos => Some(DatasetKey::Casinos),
            Self::Bingos => Some(DatasetKey::Bingos),
        }
    }
}

impl FromStr for View {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_path(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", View::Home)]
    #[case("", View::Home)]
    #[case("/accommodations", View::Accommodations)]
    #[case("/accommodations/?page=2", View::Accommodations)]
    #[case("/casinos", View::Casinos)]
    #[case("/bingos#top", View::Bingos)]
    #[case(
        "/accommodationsdetails/et/RNET%20123",
        View::AccommodationDetails { api: AccommodationApi::Et, id: "RNET 123".into() }
    )]
    #[case(
        "/accommodationsdetails/ea/A%2FB%C3%A9",
        View::AccommodationDetails { api: AccommodationApi::Ea, id: "A/Bé".into() }
    )]
    #[case(
        "/accommodationsdetails/ea/12%zz",
        View::AccommodationDetails { api: AccommodationApi::Ea, id: "12%zz".into() }
    )]
    fn routes_known_paths(#[case] path: &str, #[case] expected: View) {
        assert_eq!(View::from_path(path), Ok(expected));
    }

    #[rstest]
    #[case("/hotels")]
    #[case("/accommodationsdetails/et")]
    #[case("/accommodationsdetails/et/")]
    #[case("/accommodationsdetails/et/1/extra")]
    #[case("accommodations")]
    #[case("/accommodationsdetails/et/%FF%FE")]
    fn rejects_unknown_paths(#[case] path: &str) {
        assert!(matches!(
            View::from_path(path),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[rstest]
    fn rejects_unknown_accommodation_api() {
        assert_eq!(
            View::from_path("/accommodationsdetails/casinos/1"),
            Err(RouteError::UnknownApi {
                api: "casinos".to_owned()
            })
        );
    }

    #[rstest]
    #[case(View::Home)]
    #[case(View::Accommodations)]
    #[case(View::Casinos)]
    #[case(View::Bingos)]
    #[case(View::AccommodationDetails { api: AccommodationApi::Ea, id: "12345".into() })]
    #[case(View::AccommodationDetails { api: AccommodationApi::Et, id: "RNET 12/3%".into() })]
    fn canonical_paths_route_back(#[case] view: View) {
        assert_eq!(View::from_path(&view.to_path()), Ok(view));
    }

    #[rstest]
    fn detail_paths_escape_identifiers() {
        let view = View::AccommodationDetails {
            api: AccommodationApi::Et,
            id: "RNET 123".into(),
        };
        assert_eq!(view.to_path(), "/accommodationsdetails/et/RNET%20123");
    }

    #[rstest]
    fn detail_view_reads_its_dataset() {
        let view = View::AccommodationDetails {
            api: AccommodationApi::Et,
            id: "1".into(),
        };
        assert_eq!(view.dataset(), Some(DatasetKey::Et));
        assert_eq!(View::Accommodations.dataset(), None);
    }
}
