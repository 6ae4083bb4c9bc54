mod cli;

use flvscope::config::{self, ReportFormat};

use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser};
use cli::Cli;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::process::ExitCode;

fn open_input(cli: &Cli) -> Box<dyn Read> {
    match cli.input_path() {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => Cli::command()
                .error(
                    ErrorKind::Io,
                    format!("Unable to open {}: {}", path.display(), e),
                )
                .exit(),
        },
        None => Box::new(io::stdin().lock()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;

    // CLI flags override the config file
    if cli.json {
        config.report.format = ReportFormat::Json;
    }
    if cli.max_tags.is_some() {
        config.report.max_tags = cli.max_tags;
    }

    let input = open_input(cli);
    let out = BufWriter::new(io::stdout().lock());

    let summary = flvscope::analyze(input, out, &config.report)?;
    tracing::info!(
        "Decoded {} tags ({} bytes)",
        summary.total_tags(),
        summary.bytes_read
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "flvscope=debug,flvscope_flv=trace".to_string()
        } else {
            "flvscope=warn,flvscope_flv=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
