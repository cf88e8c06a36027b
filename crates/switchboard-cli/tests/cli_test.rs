//! End-to-end CLI tests: argument parsing and persisted overrides across runs.

use std::fs;
use std::path::Path;

use clap::Parser;
use switchboard_cli::{load_config, run, Cli, Command};
use switchboard_core::config::BuildConfiguration;
use switchboard_core::flags::FeatureFlag;
use switchboard_core::errors::error_code;
use switchboard_core::{ConfigError, FlagError, SwitchboardErrorCode};

fn invoke(root: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec![
        "switchboard".to_string(),
        "--root".to_string(),
        root.display().to_string(),
        "--build".to_string(),
        "app_store".to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));

    let cli = Cli::try_parse_from(argv)?;
    let mut buf = Vec::new();
    run(cli, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

// ============================================================
// Parsing
// ============================================================

#[test]
fn parses_set_with_boolish_values() {
    for (raw, expected) in [("true", true), ("false", false), ("on", true), ("0", false)] {
        let cli = Cli::try_parse_from(["switchboard", "set", "blaze", raw]).unwrap();
        match cli.command {
            Command::Set { flag, value } => {
                assert_eq!(flag, FeatureFlag::Blaze);
                assert_eq!(value, expected, "{raw}");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

#[test]
fn rejects_unknown_flag_and_build() {
    assert!(Cli::try_parse_from(["switchboard", "get", "no_such_flag"]).is_err());
    assert!(Cli::try_parse_from(["switchboard", "--build", "nightly", "list"]).is_err());
}

#[test]
fn parses_global_options() {
    let cli = Cli::try_parse_from([
        "switchboard",
        "--build",
        "branch_test",
        "--app",
        "jetpack",
        "list",
        "--json",
    ])
    .unwrap();
    assert_eq!(cli.build, Some(BuildConfiguration::BranchTest));
    assert!(matches!(cli.command, Command::List { json: true, overridden: false }));
}

// ============================================================
// Config loading
// ============================================================

#[test]
fn build_flag_skips_invalid_env_build() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["switchboard", "--build", "app_store", "get", "blaze"];
    let cli = Cli::try_parse_from(args).unwrap();
    let config = load_config(&cli, dir.path(), Some("nightly")).unwrap();
    assert_eq!(config.build.effective_configuration(), BuildConfiguration::AppStore);
}

#[test]
fn env_build_applies_without_build_flag() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from(["switchboard", "get", "blaze"]).unwrap();

    let config = load_config(&cli, dir.path(), Some("branch_test")).unwrap();
    assert_eq!(config.build.effective_configuration(), BuildConfiguration::BranchTest);

    let err = load_config(&cli, dir.path(), Some("nightly")).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert_eq!(config_err.error_code(), error_code::CONFIG_INVALID_VALUE);
}

// ============================================================
// Execution
// ============================================================

#[test]
fn override_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();

    invoke(dir.path(), &["set", "site_name", "true"]).unwrap();
    let out = invoke(dir.path(), &["get", "site_name"]).unwrap();
    assert!(out.starts_with("site_name = true (override)"), "{out}");

    invoke(dir.path(), &["clear", "site_name"]).unwrap();
    let out = invoke(dir.path(), &["get", "site_name"]).unwrap();
    assert!(out.starts_with("site_name = false (default)"), "{out}");
}

#[test]
fn pinned_flag_rejected_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let err = invoke(dir.path(), &["set", "debug_menu", "true"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FlagError>(),
        Some(FlagError::NotOverridable { .. })
    ));

    let out = invoke(dir.path(), &["get", "debug_menu"]).unwrap();
    assert!(out.starts_with("debug_menu = false (default)"), "{out}");
}

#[test]
fn remote_preview_reports_ignored_keys() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("payload.json");
    fs::write(&payload, r#"{"blaze": true, "old_experiment": true}"#).unwrap();

    let out = invoke(dir.path(), &["remote-preview", payload.to_str().unwrap(), "--json"]).unwrap();
    let preview: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(preview["matched"][0]["flag"], "blaze");
    assert_eq!(preview["matched"][0]["source"], "remote");
    assert_eq!(preview["ignored"][0], "old_experiment");
}

#[test]
fn list_prints_context_header_and_every_flag() {
    let dir = tempfile::tempdir().unwrap();
    let out = invoke(dir.path(), &["list"]).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("build: app_store (public)  app: wordpress  stats_revamp_v2: false")
    );
    assert!(lines.next().unwrap().starts_with("FLAG"));
    assert_eq!(lines.count(), FeatureFlag::COUNT);
}

#[test]
fn reset_and_prune() {
    let dir = tempfile::tempdir().unwrap();
    invoke(dir.path(), &["set", "blaze", "true"]).unwrap();
    invoke(dir.path(), &["set", "qr_login", "false"]).unwrap();

    let out = invoke(dir.path(), &["prune"]).unwrap();
    assert_eq!(out, "removed 0 stale override(s)\n");

    let out = invoke(dir.path(), &["reset"]).unwrap();
    assert_eq!(out, "removed 2 override(s)\n");
}
