use super::args::{CliArgs, OutputFormat};
use crate::tracing_config::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["stateflat"]).expect("should parse");
    assert!(args.input.is_none());
    assert_eq!(args.format, OutputFormat::Json);
    assert!(!args.pretty);
    assert!(!args.verify);
    assert!(args.exit_label.is_none());
    assert!(args.anonymous_prefix.is_none());
    assert!(args.log.is_none());
    assert!(args.log_format.is_none());
}

#[test]
fn parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "stateflat",
        "body.json",
        "--format",
        "TEXT",
        "--pretty",
        "--verify",
        "--no-color",
        "--exit-label",
        "done",
        "--anonymousPrefix",
        "s_",
        "-c",
        "stateflat.json",
    ])
    .expect("should parse");
    assert_eq!(args.input, Some(PathBuf::from("body.json")));
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.pretty && args.verify && args.no_color);
    assert_eq!(args.exit_label.as_deref(), Some("done"));
    assert_eq!(args.anonymous_prefix.as_deref(), Some("s_"));
    assert_eq!(args.config, Some(PathBuf::from("stateflat.json")));
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["stateflat", "--format", "yaml"]).is_err());
}

#[test]
fn parses_log_flags() {
    let args = CliArgs::try_parse_from(["stateflat", "--log", "trace", "--logFormat", "JSON"])
        .expect("should parse");
    assert_eq!(args.log.as_deref(), Some("trace"));
    assert_eq!(args.log_format, Some(LogFormat::Json));
}
