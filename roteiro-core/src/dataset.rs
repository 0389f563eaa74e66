//! Dataset keys, logical field names and per-dataset descriptors.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Identifies one of the published tourism layers.
///
/// # Examples
/// ```
/// use roteiro_core::DatasetKey;
///
/// let key: DatasetKey = "accommodations-EA".parse()?;
/// assert_eq!(key, DatasetKey::Ea);
/// assert_eq!(key.to_string(), "ea");
/// # Ok::<(), roteiro_core::UnknownDatasetError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKey {
    /// Tourist developments (hotels, resorts, rural tourism).
    Et,
    /// Local lodging establishments.
    Ea,
    /// Licensed casinos.
    Casinos,
    /// Licensed bingo halls.
    Bingos,
}

impl DatasetKey {
    /// Every dataset known to the client, in registration order.
    pub const ALL: [Self; 4] = [Self::Et, Self::Ea, Self::Casinos, Self::Bingos];

    /// Short lowercase key used in URLs, configuration and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Et => "et",
            Self::Ea => "ea",
            Self::Casinos => "casinos",
            Self::Bingos => "bingos",
        }
    }

    /// Whether the dataset lists accommodation establishments.
    #[must_use]
    pub const fn is_accommodation(self) -> bool {
        matches!(self, Self::Et | Self::Ea)
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKey {
    type Err = UnknownDatasetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "et" | "accommodations-et" => Ok(Self::Et),
            "ea" | "al" | "accommodations-ea" => Ok(Self::Ea),
            "casinos" | "casino" => Ok(Self::Casinos),
            "bingos" | "bingo" => Ok(Self::Bingos),
            _ => Err(UnknownDatasetError {
                key: value.to_owned(),
            }),
        }
    }
}

/// Raised when a dataset key is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dataset `{key}`")]
pub struct UnknownDatasetError {
    /// The key as supplied by the caller.
    pub key: String,
}

/// Dataset-agnostic attribute names.
///
/// Each [`DatasetDescriptor`] maps a subset of these onto the provider's own
/// attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    /// Registration number.
    Id,
    /// Establishment name.
    Name,
    /// Typology or modality.
    #[serde(rename = "type")]
    Kind,
    /// Municipality (concelho).
    Municipality,
    /// District (distrito).
    District,
    /// Street address.
    Address,
    /// Contact e-mail.
    Email,
    /// "Clean & Safe" certification flag.
    CleanSafeSeal,
    /// Opening or licensing date.
    OpeningDate,
    /// Star category.
    Category,
    /// Number of accommodation units.
    Units,
    /// Number of fixed beds.
    Beds,
    /// Number of rooms.
    Rooms,
    /// Number of suites.
    Suites,
    /// Number of apartments.
    Apartments,
    /// Number of villas.
    Villas,
    /// Camping capacity.
    Campers,
    /// Whether the establishment belongs to a tourist resort.
    TouristResort,
    /// Tourist resort designation.
    TouristResortName,
    /// Golf course available.
    GolfCourse,
    /// Meeting rooms available.
    MeetingRooms,
    /// Meeting room capacity.
    MeetingCapacity,
    /// Spa available.
    Spa,
    /// Other equipment.
    OtherEquipment,
    /// Website.
    Website,
    /// Maximum number of guests (local lodging).
    Occupants,
    /// Banked games offered (casinos).
    BankedGames,
    /// Show room available (casinos).
    ShowRoom,
    /// Conference room available (casinos).
    ConferenceRoom,
    /// Number of restaurants.
    Restaurants,
    /// Number of bars.
    Bars,
    /// Locality and postcode.
    Locality,
}

impl LogicalField {
    /// Snake-case name used in configuration and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Kind => "type",
            Self::Municipality => "municipality",
            Self::District => "district",
            Self::Address => "address",
            Self::Email => "email",
            Self::CleanSafeSeal => "clean_safe_seal",
            Self::OpeningDate => "opening_date",
            Self::Category => "category",
            Self::Units => "units",
            Self::Beds => "beds",
            Self::Rooms => "rooms",
            Self::Suites => "suites",
            Self::Apartments => "apartments",
            Self::Villas => "villas",
            Self::Campers => "campers",
            Self::TouristResort => "tourist_resort",
            Self::TouristResortName => "tourist_resort_name",
            Self::GolfCourse => "golf_course",
            Self::MeetingRooms => "meeting_rooms",
            Self::MeetingCapacity => "meeting_capacity",
            Self::Spa => "spa",
            Self::OtherEquipment => "other_equipment",
            Self::Website => "website",
            Self::Occupants => "occupants",
            Self::BankedGames => "banked_games",
            Self::ShowRoom => "show_room",
            Self::ConferenceRoom => "conference_room",
            Self::Restaurants => "restaurants",
            Self::Bars => "bars",
            Self::Locality => "locality",
        }
    }

    const ALL: [Self; 32] = [
        Self::Id,
        Self::Name,
        Self::Kind,
        Self::Municipality,
        Self::District,
        Self::Address,
        Self::Email,
        Self::CleanSafeSeal,
        Self::OpeningDate,
        Self::Category,
        Self::Units,
        Self::Beds,
        Self::Rooms,
        Self::Suites,
        Self::Apartments,
        Self::Villas,
        Self::Campers,
        Self::TouristResort,
        Self::TouristResortName,
        Self::GolfCourse,
        Self::MeetingRooms,
        Self::MeetingCapacity,
        Self::Spa,
        Self::OtherEquipment,
        Self::Website,
        Self::Occupants,
        Self::BankedGames,
        Self::ShowRoom,
        Self::ConferenceRoom,
        Self::Restaurants,
        Self::Bars,
        Self::Locality,
    ];
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| UnknownFieldError {
                name: value.to_owned(),
            })
    }
}

/// Raised when a logical field name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{name}`")]
pub struct UnknownFieldError {
    /// The name as supplied by the caller.
    pub name: String,
}

/// How a provider attribute is written as a literal in a `where` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Quoted string literal with embedded quotes doubled.
    Text,
    /// Bare numeric literal.
    Numeric,
}

/// Provider attribute backing a [`LogicalField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Attribute name in the provider's schema.
    pub name: String,
    /// Literal style for `where` expressions.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A string-typed attribute.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
        }
    }

    /// A numeric attribute.
    #[must_use]
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Numeric,
        }
    }
}

/// Which output-field set a query projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Compact set used by listing views.
    List,
    /// Extended set used by detail views and flat listings.
    Detail,
}

/// Endpoint and schema for one dataset.
///
/// Descriptors are assembled once, when the [`Registry`](crate::Registry) is
/// built, and never mutated afterwards.
///
/// # Examples
/// ```
/// use roteiro_core::{DatasetDescriptor, DatasetKey, FieldSpec, LogicalField, Projection};
/// use url::Url;
///
/// let descriptor = DatasetDescriptor::new(DatasetKey::Bingos, Url::parse("https://example.org/query")?)
///     .with_field(LogicalField::Name, FieldSpec::text("Denominacao"))
///     .with_field(LogicalField::District, FieldSpec::text("Distrito"))
///     .with_list_fields([LogicalField::Name, LogicalField::District]);
/// assert_eq!(descriptor.output_fields(Projection::List), "Denominacao,Distrito");
/// # Ok::<(), url::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDescriptor {
    key: DatasetKey,
    base_url: Url,
    fields: BTreeMap<LogicalField, FieldSpec>,
    list_fields: Vec<LogicalField>,
    detail_fields: Vec<LogicalField>,
}

impl DatasetDescriptor {
    /// Start a descriptor for `key` served at `base_url`.
    #[must_use]
    pub const fn new(key: DatasetKey, base_url: Url) -> Self {
        Self {
            key,
            base_url,
            fields: BTreeMap::new(),
            list_fields: Vec::new(),
            detail_fields: Vec::new(),
        }
    }

    /// Map `logical` onto a provider attribute.
    #[must_use]
    pub fn with_field(mut self, logical: LogicalField, spec: FieldSpec) -> Self {
        self.fields.insert(logical, spec);
        self
    }

    /// Set the ordered output fields for listing queries.
    #[must_use]
    pub fn with_list_fields(mut self, fields: impl IntoIterator<Item = LogicalField>) -> Self {
        self.list_fields = fields.into_iter().collect();
        self
    }

    /// Set the ordered output fields for detail queries.
    #[must_use]
    pub fn with_detail_fields(mut self, fields: impl IntoIterator<Item = LogicalField>) -> Self {
        self.detail_fields = fields.into_iter().collect();
        self
    }

    /// Dataset this descriptor belongs to.
    #[must_use]
    pub const fn key(&self) -> DatasetKey {
        self.key
    }

    /// Query endpoint URL, without parameters.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Provider attribute for `logical`, if the dataset has one.
    #[must_use]
    pub fn field(&self, logical: LogicalField) -> Option<&FieldSpec> {
        self.fields.get(&logical)
    }

    /// Iterate the logical → provider mapping.
    pub fn fields(&self) -> impl Iterator<Item = (LogicalField, &FieldSpec)> {
        self.fields.iter().map(|(logical, spec)| (*logical, spec))
    }

    /// Logical fields projected by `projection`, in declaration order.
    #[must_use]
    pub fn projected(&self, projection: Projection) -> &[LogicalField] {
        match projection {
            Projection::List => &self.list_fields,
            Projection::Detail => &self.detail_fields,
        }
    }

    /// Comma-joined provider names for the `outFields` parameter.
    ///
    /// Logical fields without a mapping are skipped.
    #[must_use]
    pub fn output_fields(&self, projection: Projection) -> String {
        self.projected(projection)
            .iter()
            .filter_map(|logical| self.fields.get(logical))
            .map(|spec| spec.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}
