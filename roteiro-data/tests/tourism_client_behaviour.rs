//! Behavioural tests for [`TourismClient`].
//!
//! These tests use [`StubGateway`] to verify behaviour without a running
//! ArcGIS service.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use roteiro_core::{
    ApiHost, AttributeValue, DatasetKey, FilterPredicate, LogicalField, NormalizedResult,
    PageWindow, Registry, ResponseError,
};
use roteiro_data::test_support::{StubGateway, block_on_for_tests};
use roteiro_data::{ClientError, GatewayError, TourismClient};
use serde_json::json;
use std::cell::RefCell;

/// Client under test, once a gateway has been chosen.
type ClientCell = RefCell<Option<TourismClient<StubGateway>>>;

/// Outcome of the last listing request.
type ResultCell = RefCell<Option<Result<NormalizedResult, ClientError>>>;

/// Outcome of the last count request.
type CountCell = RefCell<Option<Result<u64, ClientError>>>;

#[fixture]
fn client() -> ClientCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

#[fixture]
fn total() -> CountCell {
    RefCell::new(None)
}

fn install(client: &ClientCell, gateway: StubGateway) {
    let registry = Registry::standard(&ApiHost::default()).expect("default host should build");
    *client.borrow_mut() = Some(TourismClient::new(registry, gateway));
}

fn with_client<T>(client: &ClientCell, op: impl FnOnce(&TourismClient<StubGateway>) -> T) -> T {
    let guard = client.borrow();
    op(guard.as_ref().expect("client must be initialised"))
}

// --- Given steps ---

#[given("a gateway returning two local lodging features")]
fn gateway_two_features(#[from(client)] client: &ClientCell) {
    install(
        client,
        StubGateway::with_body(json!({
            "features": [
                {"attributes": {"Denominacao": "Casa A", "NrRNAL": 1, "Modalidade": "Moradia", "Concelho": "Porto", "Distrito": "Porto"}},
                {"attributes": {"Denominacao": "Casa B", "NrRNAL": 2, "Modalidade": "Apartamento", "Concelho": "Braga", "Distrito": "Braga"}}
            ]
        })),
    );
}

#[given("a gateway returning one casino feature")]
fn gateway_casino(#[from(client)] client: &ClientCell) {
    install(
        client,
        StubGateway::with_body(json!({
            "features": [{"attributes": {
                "Denominacao": "Casino Estoril",
                "JogosBancados": "Roleta, Blackjack",
                "SalaEspetaculos": true,
                "SalaReunioesCongressos": false,
                "Restaurantes": 3,
                "Bares": 2,
                "Concelho": "Cascais",
                "Distrito": "Lisboa"
            }}]
        })),
    );
}

#[given("a gateway failing with status 500")]
fn gateway_500(#[from(client)] client: &ClientCell) {
    install(
        client,
        StubGateway::with_error(GatewayError::Http {
            url: "https://example.org/query".to_owned(),
            status: 500,
        }),
    );
}

#[given("a gateway returning an ArcGIS error body")]
fn gateway_service_error(#[from(client)] client: &ClientCell) {
    install(
        client,
        StubGateway::with_body(json!({
            "error": {"code": 400, "message": "Failed to execute query.", "details": []}
        })),
    );
}

#[given("a gateway returning a count of 17")]
fn gateway_count(#[from(client)] client: &ClientCell) {
    install(client, StubGateway::with_body(json!({"count": 17})));
}

// --- When steps ---

#[when("I list the first page of local lodging")]
fn list_first_page(#[from(client)] client: &ClientCell, #[from(result)] result: &ResultCell) {
    let outcome = with_client(client, |c| {
        block_on_for_tests(c.list_page(
            DatasetKey::Ea,
            PageWindow::default(),
            &FilterPredicate::new(),
            None,
        ))
    });
    *result.borrow_mut() = Some(outcome);
}

#[when("I fetch every casino")]
fn fetch_casinos(#[from(client)] client: &ClientCell, #[from(result)] result: &ResultCell) {
    let outcome = with_client(client, |c| block_on_for_tests(c.list_all(DatasetKey::Casinos)));
    *result.borrow_mut() = Some(outcome);
}

#[when("I count hotels among tourist developments")]
fn count_hotels(#[from(client)] client: &ClientCell, #[from(total)] total: &CountCell) {
    let filters = FilterPredicate::new().with_type("Hotel");
    let outcome = with_client(client, |c| {
        block_on_for_tests(c.count(DatasetKey::Et, &filters))
    });
    *total.borrow_mut() = Some(outcome);
}

// --- Then steps ---

#[then("two normalized records are returned")]
fn then_two_records(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let page = borrowed
        .as_ref()
        .expect("a request must have been made")
        .as_ref()
        .expect("expected Ok result");
    let names = page
        .records
        .iter()
        .filter_map(|record| record.name())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Casa A", "Casa B"]);
    assert_eq!(
        page.records.iter().filter_map(|r| r.id()).collect::<Vec<_>>(),
        ["1", "2"]
    );
}

#[then("exactly one request was sent")]
fn then_one_request(#[from(client)] client: &ClientCell) {
    let requests = with_client(client, |c| c.gateway().requests());
    assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
}

#[then("the casino record carries its equipment flags")]
fn then_casino_flags(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let page = borrowed
        .as_ref()
        .expect("a request must have been made")
        .as_ref()
        .expect("expected Ok result");
    let record = page.records.first().expect("one casino");
    assert_eq!(record.name(), Some("Casino Estoril"));
    assert_eq!(
        record.get(LogicalField::ShowRoom),
        Some(&AttributeValue::Flag(true))
    );
    assert_eq!(
        record.get(LogicalField::ConferenceRoom),
        Some(&AttributeValue::Flag(false))
    );
    assert_eq!(
        record.get(LogicalField::Restaurants),
        Some(&AttributeValue::Number(3.into()))
    );
    assert_eq!(record.get(LogicalField::Website), None);
}

#[then("an HTTP error with status 500 is returned")]
fn then_http_500(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(ClientError::Gateway(GatewayError::Http { status: 500, .. })))
        ),
        "expected HTTP 500, got {borrowed:?}"
    );
}

#[then("a service error is returned")]
fn then_service_error(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(ClientError::Response(ResponseError::Service { .. })))
        ),
        "expected service error, got {borrowed:?}"
    );
}

#[then("the count is 17")]
fn then_count(#[from(total)] total: &CountCell) {
    let borrowed = total.borrow();
    assert!(
        matches!(&*borrowed, Some(Ok(17))),
        "expected 17, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/tourism_client.feature", name = $title)]
        fn $fn_name(client: ClientCell, result: ResultCell, total: CountCell) {
            let _ = (client, result, total);
        }
    };
}

register_scenario!(listing_local_lodging, "listing local lodging");
register_scenario!(fetching_casino_detail, "fetching casino detail fields");
register_scenario!(handling_server_error, "handling a server error");
register_scenario!(
    handling_service_error,
    "handling an embedded service error"
);
register_scenario!(counting_with_type_filter, "counting with a type filter");
