use super::*;

#[test]
fn parses_save_with_url_only() {
    let cli = Cli::try_parse_from(["tabscout-cli", "save", "--url", "https://example.com/a"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Save {
            ref url,
            html_file: None,
            fetch_html: false,
        } if url == "https://example.com/a"
    ));
}

#[test]
fn parses_save_with_html_file() {
    let cli = Cli::try_parse_from([
        "tabscout-cli",
        "save",
        "--url",
        "https://example.com/a",
        "--html-file",
        "page.html",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Save { html_file, .. } => {
            assert_eq!(html_file, Some(PathBuf::from("page.html")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn html_file_conflicts_with_fetch_html() {
    let result = Cli::try_parse_from([
        "tabscout-cli",
        "save",
        "--url",
        "https://example.com/a",
        "--html-file",
        "page.html",
        "--fetch-html",
    ]);
    assert!(result.is_err());
}

#[test]
fn save_requires_url() {
    assert!(Cli::try_parse_from(["tabscout-cli", "save"]).is_err());
}

#[test]
fn parses_search_query() {
    let cli = Cli::try_parse_from(["tabscout-cli", "search", "rust async"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Search { ref query } if query == "rust async"));
}

#[test]
fn parses_preview() {
    let cli = Cli::try_parse_from(["tabscout-cli", "preview", "--url", "https://example.com"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Preview { .. }));
}

#[test]
fn parses_analyze_symbol() {
    let cli = Cli::try_parse_from(["tabscout-cli", "analyze", "aapl"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Analyze { ref symbol } if symbol == "aapl"));
}

#[test]
fn parses_relay_with_selection() {
    let cli = Cli::try_parse_from(["tabscout-cli", "relay", "--selection", "hello"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Relay { selection: Some(ref s) } if s == "hello"
    ));
}

#[test]
fn relay_selection_defaults_to_none() {
    let cli = Cli::try_parse_from(["tabscout-cli", "relay"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Relay { selection: None }));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["tabscout-cli"]).is_err());
}
