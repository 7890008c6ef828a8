#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use stateflat::cli::args::CliArgs;
use stateflat::cli::config::resolve_log_settings;
use stateflat::cli::driver;
use stateflat::tracing_config::{LogSettings, init_tracing};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let color = !args.no_color && std::io::stderr().is_terminal();

    // Logging is configured like the run itself: environment, then the
    // config file, then flags (see src/tracing_config.rs).
    let result = driver::load_run_config(&args).and_then(|config| {
        init_tracing(&resolve_log_settings(
            LogSettings::from_env(),
            config.as_ref(),
            &args,
        ));
        driver::run(&args, config.as_ref())
    });

    match result {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("failed to write output")?;
            stdout.flush().context("failed to flush output")?;
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", driver::render_error(&err, color));
            std::process::exit(driver::exit_code(&err));
        }
    }
}
