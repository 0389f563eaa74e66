//! Field tables for the published tourism layers.

use url::Url;

use crate::dataset::{DatasetDescriptor, DatasetKey, FieldSpec, LogicalField, LogicalField as F};

const SERVICES: &str = "arcgis/rest/services/TDP";

/// Service path, relative to the host base, of each dataset's query endpoint.
pub(crate) const fn service_path(key: DatasetKey) -> &'static str {
    match key {
        DatasetKey::Et => "OpenData_ETExistentes/MapServer/0/query",
        DatasetKey::Ea => "OpenData_AL/MapServer/6/query",
        DatasetKey::Casinos => "OpenData_Casinos/MapServer/10/query",
        DatasetKey::Bingos => "OpenData_Casinos/MapServer/11/query",
    }
}

pub(crate) fn endpoint(base: &str, key: DatasetKey) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{base}/{SERVICES}/{}", service_path(key)))
}

pub(crate) fn descriptor(key: DatasetKey, base_url: Url) -> DatasetDescriptor {
    let empty = DatasetDescriptor::new(key, base_url);
    match key {
        DatasetKey::Et => tourist_developments(empty),
        DatasetKey::Ea => local_lodging(empty),
        DatasetKey::Casinos => casinos(empty),
        DatasetKey::Bingos => bingos(empty),
    }
}

const LIST_FIELDS: [LogicalField; 5] = [F::Name, F::Id, F::Kind, F::Municipality, F::District];

const ACCOMMODATION_DETAIL: [LogicalField; 9] = [
    F::Name,
    F::Id,
    F::Kind,
    F::Municipality,
    F::District,
    F::Address,
    F::Email,
    F::CleanSafeSeal,
    F::OpeningDate,
];

fn accommodation_common(descriptor: DatasetDescriptor) -> DatasetDescriptor {
    descriptor
        .with_field(F::Name, FieldSpec::text("Denominacao"))
        .with_field(F::Municipality, FieldSpec::text("Concelho"))
        .with_field(F::District, FieldSpec::text("Distrito"))
        .with_field(F::Address, FieldSpec::text("Endereco"))
        .with_field(F::Email, FieldSpec::text("Email"))
        .with_field(F::CleanSafeSeal, FieldSpec::text("SeloCleanSafe"))
        .with_list_fields(LIST_FIELDS)
}

fn tourist_developments(descriptor: DatasetDescriptor) -> DatasetDescriptor {
    let extras = [
        (F::Category, FieldSpec::text("Categoria")),
        (F::Units, FieldSpec::numeric("NrUnidAloj")),
        (F::Beds, FieldSpec::numeric("NrCamasFixas")),
        (F::Rooms, FieldSpec::numeric("NrQuartos")),
        (F::Suites, FieldSpec::numeric("NrSuites")),
        (F::Apartments, FieldSpec::numeric("NrApart")),
        (F::Villas, FieldSpec::numeric("NrMoradias")),
        (F::Campers, FieldSpec::numeric("NrCampistas")),
        (F::TouristResort, FieldSpec::text("IntegraCT")),
        (F::TouristResortName, FieldSpec::text("DesignacaoCT")),
        (F::GolfCourse, FieldSpec::text("CampoGolfe")),
        (F::MeetingRooms, FieldSpec::text("SalasReunioes")),
        (F::MeetingCapacity, FieldSpec::numeric("CapacSalasReunioes")),
        (F::Spa, FieldSpec::text("SPA")),
        (F::OtherEquipment, FieldSpec::text("OutrosEquip")),
        (F::Website, FieldSpec::text("Website")),
    ];
    let detail = ACCOMMODATION_DETAIL
        .into_iter()
        .chain(extras.iter().map(|(logical, _)| *logical))
        .collect::<Vec<_>>();
    let base = accommodation_common(descriptor)
        .with_field(F::Id, FieldSpec::text("NrRNET"))
        .with_field(F::Kind, FieldSpec::text("TipologiaET"))
        .with_field(F::OpeningDate, FieldSpec::numeric("DataTituloValAbert"))
        .with_detail_fields(detail);
    extras
        .into_iter()
        .fold(base, |acc, (logical, spec)| acc.with_field(logical, spec))
}

fn local_lodging(descriptor: DatasetDescriptor) -> DatasetDescriptor {
    accommodation_common(descriptor)
        .with_field(F::Id, FieldSpec::numeric("NrRNAL"))
        .with_field(F::Kind, FieldSpec::text("Modalidade"))
        .with_field(F::OpeningDate, FieldSpec::numeric("DataAberturaPublico"))
        .with_field(F::Occupants, FieldSpec::numeric("NrUtentes"))
        .with_detail_fields(ACCOMMODATION_DETAIL.into_iter().chain([F::Occupants]))
}

fn casinos(descriptor: DatasetDescriptor) -> DatasetDescriptor {
    descriptor
        .with_field(F::Name, FieldSpec::text("Denominacao"))
        .with_field(F::BankedGames, FieldSpec::text("JogosBancados"))
        .with_field(F::ShowRoom, FieldSpec::text("SalaEspetaculos"))
        .with_field(F::ConferenceRoom, FieldSpec::text("SalaReunioesCongressos"))
        .with_field(F::Restaurants, FieldSpec::numeric("Restaurantes"))
        .with_field(F::Bars, FieldSpec::numeric("Bares"))
        .with_field(F::Website, FieldSpec::text("Website"))
        .with_field(F::Locality, FieldSpec::text("LocalidadeCP"))
        .with_field(F::Municipality, FieldSpec::text("Concelho"))
        .with_field(F::District, FieldSpec::text("Distrito"))
        .with_list_fields([F::Name, F::Municipality, F::District])
        .with_detail_fields([
            F::Name,
            F::BankedGames,
            F::ShowRoom,
            F::ConferenceRoom,
            F::Restaurants,
            F::Bars,
            F::Website,
            F::Locality,
            F::Municipality,
            F::District,
        ])
}

fn bingos(descriptor: DatasetDescriptor) -> DatasetDescriptor {
    descriptor
        .with_field(F::Name, FieldSpec::text("Denominacao"))
        .with_field(F::Website, FieldSpec::text("Website"))
        .with_field(F::Locality, FieldSpec::text("LocalidadeCP"))
        .with_field(F::Municipality, FieldSpec::text("Concelho"))
        .with_field(F::District, FieldSpec::text("Distrito"))
        .with_list_fields([F::Name, F::Municipality, F::District])
        .with_detail_fields([
            F::Name,
            F::Website,
            F::Locality,
            F::Municipality,
            F::District,
        ])
}
