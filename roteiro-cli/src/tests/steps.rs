//! Behaviour-driven step definitions driving the query CLI scenarios.

use super::helpers::{StubGatewayFactory, json_output};
use super::*;
use crate::query::{QueryConfig, run_config};
use roteiro_data::test_support::StubGateway;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use std::cell::RefCell;

/// Aggregates query CLI scenario state so each step only needs a single world
/// argument.
struct QueryWorld {
    args: RefCell<QueryArgs>,
    factory: RefCell<StubGatewayFactory>,
    output: RefCell<Option<Result<Vec<u8>, CliError>>>,
}

impl QueryWorld {
    fn new() -> Self {
        Self {
            args: RefCell::new(QueryArgs::default()),
            factory: RefCell::new(StubGatewayFactory::new(StubGateway::with_body(
                json!({"features": []}),
            ))),
            output: RefCell::new(None),
        }
    }

    fn run(&self, kind: QueryKind) {
        let args = self.args.borrow().clone();
        let factory = self.factory.borrow();
        let outcome = QueryConfig::try_from((kind, args)).and_then(|config| {
            let mut buffer = Vec::new();
            run_config(&config, &*factory, &mut buffer).map(|()| buffer)
        });
        self.output.replace(Some(outcome));
    }

    fn printed(&self) -> Vec<u8> {
        let borrowed = self.output.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect("expected success")
            .clone()
    }
}

#[fixture]
fn world() -> QueryWorld {
    QueryWorld::new()
}

// --- Given steps ---

#[given("the {key} dataset is selected")]
fn dataset_selected(#[from(world)] world: &QueryWorld, key: String) {
    world.args.borrow_mut().dataset = Some(key.trim_matches('"').to_owned());
}

#[given("a district filter of Évora")]
fn district_filter(#[from(world)] world: &QueryWorld) {
    world.args.borrow_mut().district = Some("Évora".to_owned());
}

#[given("a dry run is requested")]
fn dry_run_requested(#[from(world)] world: &QueryWorld) {
    world.args.borrow_mut().dry_run = true;
}

#[given("the provider reports a count of 42")]
fn provider_count(#[from(world)] world: &QueryWorld) {
    world.factory.replace(StubGatewayFactory::new(StubGateway::with_body(
        json!({"count": 42}),
    )));
}

// --- When steps ---

#[when("I run the list command")]
fn run_list(#[from(world)] world: &QueryWorld) {
    world.run(QueryKind::List);
}

#[when("I run the detail command")]
fn run_detail(#[from(world)] world: &QueryWorld) {
    world.run(QueryKind::Detail);
}

#[when("I run the count command")]
fn run_count(#[from(world)] world: &QueryWorld) {
    world.run(QueryKind::Count);
}

// --- Then steps ---

#[then("the printed URL filters on Évora")]
fn url_filters_on_evora(#[from(world)] world: &QueryWorld) {
    let printed = String::from_utf8(world.printed()).expect("utf-8 output");
    assert!(
        printed.contains("where=Distrito+%3D+%27%C3%89vora%27"),
        "{printed}"
    );
    assert!(printed.contains("resultRecordCount=20"), "{printed}");
}

#[then("no request reaches the provider")]
fn no_request(#[from(world)] world: &QueryWorld) {
    assert!(world.factory.borrow().gateway().requests().is_empty());
}

#[then("the CLI reports that the \"id\" flag is missing")]
fn reports_missing_id(#[from(world)] world: &QueryWorld) {
    let borrowed = world.output.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_ID),
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("the output reports a count of 42")]
fn reports_count(#[from(world)] world: &QueryWorld) {
    let output = json_output(&world.printed());
    assert_eq!(output["count"], 42);
    assert_eq!(world.factory.borrow().gateway().requests().len(), 1);
}

macro_rules! register_query_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/query_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: QueryWorld) {
            let _ = world;
        }
    };
}

register_query_scenario!(
    dry_run_list_url,
    "printing a list query URL without fetching"
);
register_query_scenario!(
    missing_detail_identifier,
    "rejecting a detail query without an identifier"
);
register_query_scenario!(count_through_provider, "counting records through the provider");
