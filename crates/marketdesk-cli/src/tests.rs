use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["marketdesk"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_schema_command() {
    let cli = Cli::try_parse_from(["marketdesk", "schema", "5"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Schema { category_id: 5 })
    ));
}

#[test]
fn schema_requires_numeric_category() {
    assert!(Cli::try_parse_from(["marketdesk", "schema", "laptops"]).is_err());
}

#[test]
fn parses_submit_command() {
    let cli = Cli::try_parse_from(["marketdesk", "submit", "pixel.yaml"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Submit {
            ref path,
            dry_run: false
        }) if path == &PathBuf::from("pixel.yaml")
    ));
}

#[test]
fn parses_submit_dry_run() {
    let cli = Cli::try_parse_from(["marketdesk", "submit", "pixel.yaml", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Submit { dry_run: true, .. })
    ));
}

#[test]
fn submit_requires_a_path() {
    assert!(Cli::try_parse_from(["marketdesk", "submit"]).is_err());
}

#[tokio::test]
async fn no_command_runs_without_configuration() {
    let cli = Cli::try_parse_from(["marketdesk"]).unwrap();

    let result = run(cli, || {
        Err(ConfigError::MissingEnvVar(
            "MARKETDESK_API_BASE_URL".to_string(),
        ))
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn command_surfaces_configuration_errors() {
    let cli = Cli::try_parse_from(["marketdesk", "schema", "4"]).unwrap();

    let err = run(cli, || {
        Err(ConfigError::MissingEnvVar(
            "MARKETDESK_API_BASE_URL".to_string(),
        ))
    })
    .await
    .unwrap_err();

    assert!(err.to_string().contains("MARKETDESK_API_BASE_URL"));
}
