//! Reads a statement tree, flattens it and renders the result.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::Path;

use crate::cli::args::{CliArgs, OutputFormat};
use crate::cli::config::{StateflatConfig, load_config, resolve_options};
use stateflat_flatten::{FlattenError, FlattenOptions, VerifyError, flatten_body, verify_blocks};
use stateflat_ir::{Block, LabeledBlock, Printer, Statement};

/// The input was read but could not be flattened (or failed verification).
pub const EXIT_FLATTEN_FAILED: i32 = 1;
/// I/O, parse or configuration failure.
pub const EXIT_USAGE_ERROR: i32 = 2;

/// Parse a JSON statement array, or a single statement as a one-element body.
pub fn parse_body(source: &str) -> Result<Block> {
    let value: serde_json::Value =
        serde_json::from_str(source).context("input is not valid JSON")?;
    if value.is_array() {
        return serde_json::from_value(value).context("input is not a statement array");
    }
    let statement: Statement =
        serde_json::from_value(value).context("input is neither a statement array nor a statement")?;
    Ok(Block::new(vec![statement]))
}

/// Flatten `source`, optionally checking the produced blocks.
pub fn flatten_source(
    source: &str,
    options: &FlattenOptions,
    verify: bool,
) -> Result<Vec<LabeledBlock>> {
    let body = parse_body(source)?;
    let blocks = flatten_body(&body, options)?;
    if verify {
        verify_blocks(&blocks, &options.exit_label)?;
    }
    Ok(blocks)
}

pub fn render_blocks(blocks: &[LabeledBlock], format: OutputFormat, pretty: bool) -> Result<String> {
    let mut output = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(blocks)?,
        OutputFormat::Json => serde_json::to_string(blocks)?,
        OutputFormat::Text => Printer::print_blocks(blocks),
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read input from stdin")?;
            Ok(source)
        }
    }
}

/// Load the `--config` file, if one was given.
pub fn load_run_config(args: &CliArgs) -> Result<Option<StateflatConfig>> {
    args.config.as_deref().map(load_config).transpose()
}

/// Run one CLI invocation and return what goes to stdout.
pub fn run(args: &CliArgs, config: Option<&StateflatConfig>) -> Result<String> {
    let options = resolve_options(config, args)?;

    let source = read_input(args.input.as_deref())?;
    tracing::debug!(bytes = source.len(), "read input");

    let blocks = flatten_source(&source, &options, args.verify)?;
    render_blocks(&blocks, args.format, args.pretty)
}

/// Exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<FlattenError>().is_some() || err.downcast_ref::<VerifyError>().is_some()
    {
        EXIT_FLATTEN_FAILED
    } else {
        EXIT_USAGE_ERROR
    }
}

/// Format an error and its causes for stderr.
pub fn render_error(err: &anyhow::Error, color: bool) -> String {
    let label = if color {
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    };
    let mut out = format!("{label}: {err}");
    for cause in err.chain().skip(1) {
        let prefix = if color {
            "caused by".yellow().to_string()
        } else {
            "caused by".to_string()
        };
        out.push_str(&format!("\n  {prefix}: {cause}"));
    }
    out
}
