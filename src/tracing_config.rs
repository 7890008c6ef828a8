//! Logging setup for the `stateflat` binary.
//!
//! The filter and output format are part of a run's configuration, layered
//! like the flatten options: environment (`STATEFLAT_LOG`, falling back to
//! `RUST_LOG`, and `STATEFLAT_LOG_FORMAT`), then the config file's `log` /
//! `logFormat`, then `--log` / `--log-format`.
//!
//! ```bash
//! # Every scheduling decision of the engine, as a tree
//! stateflat body.json --log trace --log-format tree
//!
//! # Only the construct handlers
//! stateflat body.json --log "stateflat_flatten::engine=trace"
//! ```
//!
//! A bare level such as `debug` is scoped to the pass crates, so dependency
//! noise stays out of the trace. Nothing is installed when no filter is set.
//! Output always goes to stderr; stdout carries the flattened blocks.

use clap::ValueEnum;
use serde::Deserialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_ENV: &str = "STATEFLAT_LOG";
const LOG_FORMAT_ENV: &str = "STATEFLAT_LOG_FORMAT";

/// Crates whose events a bare level turns on.
const PASS_TARGETS: [&str; 3] = ["stateflat", "stateflat_flatten", "stateflat_ir"];

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Flat text lines.
    #[default]
    Text,
    /// Indented tree via `tracing-tree`: one level per flatten run.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

/// Filter and format for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// `None` leaves logging off.
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl LogSettings {
    /// Settings from the environment only.
    pub fn from_env() -> Self {
        let filter = std::env::var(LOG_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|value| LogFormat::from_str(&value, true).ok())
            .unwrap_or_default();
        Self { filter, format }
    }

    /// Layer `filter` and `format` on top, where present.
    pub fn override_with(mut self, filter: Option<&str>, format: Option<LogFormat>) -> Self {
        if let Some(filter) = filter {
            self.filter = Some(filter.to_string());
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}

/// Expand a bare level into per-crate directives; pass anything else through.
pub fn filter_directives(filter: &str) -> String {
    let level = filter.trim().to_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        return filter.to_string();
    }
    PASS_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber described by `settings`.
pub fn init_tracing(settings: &LogSettings) {
    let Some(filter) = settings.filter.as_deref() else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(filter_directives(filter));

    match settings.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
