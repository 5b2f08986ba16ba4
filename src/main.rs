//! cachedu - disk usage calculator with per-directory size caches

use cachedu::cli::Cli;
use cachedu::export::{create_exporter, Report};
use cachedu::{clear_cache, measure};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Convert to config
    let config = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let session = config.session();
    let mut report = Report::default();

    for path in &config.paths {
        if config.clear_cache {
            match clear_cache(path) {
                Ok(n) => log::info!("Removed {} cache records under {}", n, path.display()),
                Err(e) => log::warn!("Failed to clear cache: {}", e),
            }
        }

        let usage = measure(path, &session, config.use_cache);
        report.push(path.clone(), usage);
    }

    let exporter = create_exporter(config.output_format);
    let mut writer = BufWriter::new(io::stdout());

    if let Err(e) = exporter.export(&report, &mut writer) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::from(2);
    }

    if let Err(e) = writer.flush() {
        eprintln!("Error flushing output: {}", e);
        return ExitCode::from(2);
    }

    if report.had_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Diagnostics go to stderr; `-v` enables the per-directory trace and
/// `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
