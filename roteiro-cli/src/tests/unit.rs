//! Unit tests for argument parsing and configuration resolution.

use super::helpers::{args_for, config_for};
use super::*;
use crate::query::{Operation, QueryConfig, config_from_layers_for_test};
use roteiro_core::{
    AccommodationApi, ApiHost, DatasetKey, FilterPredicate, HostMode, LogicalField, PageWindow,
    SortField, SortOrder, View,
};
use rstest::rstest;
use std::time::Duration;

fn parse(args: &[&str]) -> (QueryKind, QueryArgs) {
    let mut invocation = vec!["roteiro"];
    invocation.extend_from_slice(args);
    Cli::try_parse_from(invocation)
        .expect("arguments should parse")
        .command
        .into_parts()
}

#[rstest]
fn parses_list_flags() {
    let (kind, args) = parse(&[
        "list",
        "et",
        "--district",
        "Faro",
        "--type",
        "Hotel",
        "--limit",
        "5",
        "--sort",
        "name:desc",
    ]);
    assert_eq!(kind, QueryKind::List);
    assert_eq!(args.dataset.as_deref(), Some("et"));
    assert_eq!(args.district.as_deref(), Some("Faro"));
    assert_eq!(args.typology.as_deref(), Some("Hotel"));
    assert_eq!(args.limit, Some(5));
    assert_eq!(args.sort.as_deref(), Some("name:desc"));
    assert!(!args.dry_run);
}

#[rstest]
#[case("count", QueryKind::Count)]
#[case("distinct", QueryKind::Distinct)]
#[case("detail", QueryKind::Detail)]
#[case("all", QueryKind::All)]
#[case("view", QueryKind::View)]
fn maps_subcommands_to_kinds(#[case] name: &str, #[case] expected: QueryKind) {
    let (kind, _) = parse(&[name]);
    assert_eq!(kind, expected);
}

#[rstest]
fn rejects_unknown_subcommands() {
    let err = Cli::try_parse_from(["roteiro", "export"]).expect_err("unknown subcommand");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
}

#[rstest]
fn list_defaults_to_the_first_page() {
    let mut args = args_for("ea");
    args.district = Some("Porto".to_owned());
    args.sort = Some("name:desc".to_owned());
    let config = config_for(QueryKind::List, args);
    assert_eq!(
        config.operation,
        Operation::List {
            dataset: DatasetKey::Ea,
            page: PageWindow::default(),
            filters: FilterPredicate::new().with_district("Porto"),
            sort: Some(SortField::new(LogicalField::Name, SortOrder::Desc)),
        }
    );
    assert_eq!(config.host, ApiHost::default());
    assert!(config.output.is_none());
}

#[rstest]
fn distinct_parses_the_field() {
    let mut args = args_for("et");
    args.field = Some("district".to_owned());
    let config = config_for(QueryKind::Distinct, args);
    assert_eq!(
        config.operation,
        Operation::Distinct {
            dataset: DatasetKey::Et,
            field: LogicalField::District,
        }
    );
}

#[rstest]
#[case(QueryKind::Detail, ARG_ID, ENV_ID)]
#[case(QueryKind::Distinct, ARG_FIELD, ENV_FIELD)]
fn reports_missing_operation_arguments(
    #[case] kind: QueryKind,
    #[case] expected_field: &str,
    #[case] expected_env: &str,
) {
    let err = QueryConfig::try_from((kind, args_for("ea"))).expect_err("argument missing");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn reports_missing_dataset() {
    let err = QueryConfig::try_from((QueryKind::Count, QueryArgs::default()))
        .expect_err("dataset missing");
    match err {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_DATASET),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn rejects_unknown_datasets() {
    let err = QueryConfig::try_from((QueryKind::All, args_for("museums")))
        .expect_err("unknown dataset");
    match err {
        CliError::UnknownDataset(inner) => assert_eq!(inner.key, "museums"),
        other => panic!("expected UnknownDataset, found {other:?}"),
    }
}

#[rstest]
fn rejects_malformed_sort() {
    let mut args = args_for("et");
    args.sort = Some("name:sideways".to_owned());
    let err = QueryConfig::try_from((QueryKind::List, args)).expect_err("bad sort");
    assert!(matches!(err, CliError::InvalidSort(_)), "{err:?}");
}

#[rstest]
fn rejects_empty_pages() {
    let mut args = args_for("et");
    args.limit = Some(0);
    let err = QueryConfig::try_from((QueryKind::List, args)).expect_err("zero limit");
    assert!(matches!(err, CliError::InvalidPage(_)), "{err:?}");
}

#[rstest]
fn view_routes_the_path() {
    let args = QueryArgs {
        path: Some("/accommodationsdetails/ea/12345".to_owned()),
        ..QueryArgs::default()
    };
    let config = config_for(QueryKind::View, args);
    assert_eq!(
        config.operation,
        Operation::View {
            view: View::AccommodationDetails {
                api: AccommodationApi::Ea,
                id: "12345".to_owned(),
            },
            listing: AccommodationApi::Et,
            page: PageWindow::default(),
            filters: FilterPredicate::new(),
        }
    );
}

#[rstest]
#[case("/hotels")]
#[case("/accommodationsdetails/bingos/1")]
fn view_rejects_unknown_routes(#[case] path: &str) {
    let args = QueryArgs {
        path: Some(path.to_owned()),
        ..QueryArgs::default()
    };
    let err = QueryConfig::try_from((QueryKind::View, args)).expect_err("unknown route");
    assert!(matches!(err, CliError::Route(_)), "{err:?}");
}

#[rstest]
fn relay_mode_uses_default_origins() {
    let mut args = args_for("casinos");
    args.host_mode = Some("relay".to_owned());
    let config = config_for(QueryKind::All, args);
    assert_eq!(config.host.mode(), HostMode::Relay);
    assert_eq!(
        config.host.base(),
        "https://cors-anywhere.com/https://servergeo.sgeconomia.gov.pt"
    );
}

#[rstest]
fn rejects_unknown_host_modes() {
    let mut args = args_for("casinos");
    args.host_mode = Some("tunnel".to_owned());
    let err = QueryConfig::try_from((QueryKind::All, args)).expect_err("bad host mode");
    assert!(matches!(err, CliError::InvalidHostMode(_)), "{err:?}");
}

#[rstest]
fn gateway_settings_are_applied() {
    let mut args = args_for("bingos");
    args.user_agent = Some("roteiro-tests/1.0".to_owned());
    args.timeout_secs = Some(15);
    let config = config_for(QueryKind::All, args);
    assert_eq!(config.gateway.user_agent, "roteiro-tests/1.0");
    assert_eq!(config.gateway.timeout, Some(Duration::from_secs(15)));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "limit": "twenty" }));

    let err = config_from_layers_for_test(QueryKind::List, composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "dataset": "casinos",
            "host_mode": "relay",
            "district": "Faro",
        }),
        None,
    );
    composer.push_environment(json!({
        "dataset": "ea",
        "district": "Braga",
    }));
    composer.push_cli(json!({
        "district": "Porto",
    }));

    let config = config_from_layers_for_test(QueryKind::Count, composer.layers())
        .expect("merged config should build");
    assert_eq!(
        config.operation,
        Operation::Count {
            dataset: DatasetKey::Ea,
            filters: FilterPredicate::new().with_district("Porto"),
        }
    );
    assert_eq!(config.host.mode(), HostMode::Relay);
}

#[rstest]
fn kind_and_args_convert_into_a_config() {
    let mut args = args_for("bingos");
    args.district = Some("Lisboa".to_owned());
    let config: QueryConfig = (QueryKind::Count, args)
        .try_into()
        .expect("configuration should resolve");
    assert_eq!(
        config.operation,
        Operation::Count {
            dataset: DatasetKey::Bingos,
            filters: FilterPredicate::new().with_district("Lisboa"),
        }
    );
    assert!(!config.dry_run);
}
