//! `stateflat.json` loading and option resolution.
//!
//! Options are layered: built-in defaults, then the config file, then
//! command-line flags.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::Path;

use crate::cli::args::CliArgs;
use crate::tracing_config::{LogFormat, LogSettings};
use stateflat_flatten::FlattenOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StateflatConfig {
    #[serde(default)]
    pub exit_label: Option<String>,
    #[serde(default)]
    pub anonymous_prefix: Option<String>,
    /// Log filter, as for `--log`.
    #[serde(default)]
    pub log: Option<String>,
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

pub fn parse_config(source: &str) -> Result<StateflatConfig> {
    serde_json::from_str(source)
        .context("expected an object with `exitLabel`, `anonymousPrefix`, `log` or `logFormat`")
}

pub fn load_config(path: &Path) -> Result<StateflatConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Merge defaults, `config` and the flags in `args`, later layers winning.
///
/// Invalid combinations are reported as configuration errors, not as
/// flattening failures.
pub fn resolve_options(config: Option<&StateflatConfig>, args: &CliArgs) -> Result<FlattenOptions> {
    let mut options = FlattenOptions::default();

    if let Some(config) = config {
        if let Some(exit_label) = &config.exit_label {
            options.exit_label.clone_from(exit_label);
        }
        if let Some(prefix) = &config.anonymous_prefix {
            options.anonymous_prefix.clone_from(prefix);
        }
    }
    if let Some(exit_label) = &args.exit_label {
        options.exit_label.clone_from(exit_label);
    }
    if let Some(prefix) = &args.anonymous_prefix {
        options.anonymous_prefix.clone_from(prefix);
    }

    options.validate().map_err(|err| anyhow!("{err}"))?;
    tracing::debug!(
        exit_label = %options.exit_label,
        anonymous_prefix = %options.anonymous_prefix,
        "resolved options"
    );
    Ok(options)
}

/// Layer the config file and flags over `base` (normally the environment).
pub fn resolve_log_settings(
    base: LogSettings,
    config: Option<&StateflatConfig>,
    args: &CliArgs,
) -> LogSettings {
    let settings = match config {
        Some(config) => base.override_with(config.log.as_deref(), config.log_format),
        None => base,
    };
    settings.override_with(args.log.as_deref(), args.log_format)
}
