use super::args::CliArgs;
use super::config::{
    StateflatConfig, load_config, parse_config, resolve_log_settings, resolve_options,
};
use crate::tracing_config::{LogFormat, LogSettings};
use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["stateflat"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("should parse")
}

#[test]
fn parses_camel_case_config() {
    let config = parse_config(r#"{ "exitLabel": "done", "anonymousPrefix": "s_" }"#).unwrap();
    assert_eq!(
        config,
        StateflatConfig {
            exit_label: Some("done".to_string()),
            anonymous_prefix: Some("s_".to_string()),
            ..StateflatConfig::default()
        }
    );
    assert_eq!(parse_config("{}").unwrap(), StateflatConfig::default());
}

#[test]
fn rejects_unknown_config_keys() {
    assert!(parse_config(r#"{ "exit_label": "done" }"#).is_err());
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "stateflat.json",
        r#"{ "exitLabel": "done", "anonymousPrefix": "s_" }"#,
    );
    let config = load_config(&path).unwrap();

    let options = resolve_options(Some(&config), &args(&[])).unwrap();
    assert_eq!(options.exit_label, "done");
    assert_eq!(options.anonymous_prefix, "s_");

    let options = resolve_options(Some(&config), &args(&["--exit-label", "end"])).unwrap();
    assert_eq!(options.exit_label, "end");
    assert_eq!(options.anonymous_prefix, "s_");
}

#[test]
fn defaults_without_config() {
    let options = resolve_options(None, &args(&[])).unwrap();
    assert_eq!(options.exit_label, "$exit");
    assert_eq!(options.anonymous_prefix, "$sm");
}

#[test]
fn invalid_combination_is_a_config_error() {
    let err = resolve_options(None, &args(&["--exit-label", "$sm_exit"])).unwrap_err();
    assert!(err.to_string().contains("anonymous prefix"), "{err}");
}

#[test]
fn missing_config_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let err = load_config(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("missing.json"), "{err}");
}

#[test]
fn log_settings_layer_env_then_file_then_flags() {
    let env = LogSettings {
        filter: Some("info".to_string()),
        format: LogFormat::Text,
    };
    let config = parse_config(r#"{ "log": "debug", "logFormat": "json" }"#).unwrap();

    let settings = resolve_log_settings(env.clone(), Some(&config), &args(&[]));
    assert_eq!(settings.filter.as_deref(), Some("debug"));
    assert_eq!(settings.format, LogFormat::Json);

    let settings = resolve_log_settings(env.clone(), Some(&config), &args(&["--log-format", "tree"]));
    assert_eq!(settings.filter.as_deref(), Some("debug"));
    assert_eq!(settings.format, LogFormat::Tree);

    assert_eq!(resolve_log_settings(env.clone(), None, &args(&[])), env);
}

#[test]
fn logging_stays_off_without_a_filter() {
    let settings = resolve_log_settings(LogSettings::default(), None, &args(&["--log-format", "json"]));
    assert!(settings.filter.is_none());
    assert_eq!(settings.format, LogFormat::Json);
}

#[test]
fn rejects_unknown_log_format_in_config() {
    assert!(parse_config(r#"{ "logFormat": "xml" }"#).is_err());
}
