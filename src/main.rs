//! intentc: compile IntentLang intents into flow-table, router-CLI and
//! host-network configuration.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use intentc::backend::{Backends, TargetSelection};
use intentc::config::Config;
use intentc::dsl::ParseError;
use intentc::model::Statement;
use intentc::pipeline::{annotate, read_models, render_statements, sample_source, CompiledLine};
use intentc::report::{write_report, Format};

#[derive(Parser)]
#[command(
    name = "intentc",
    about = "IntentLang compiler: intent -> JSON -> P4/Cisco/Linux",
    version
)]
struct Cli {
    /// IntentLang program file (the built-in sample when omitted)
    file: Option<PathBuf>,

    /// Treat the input as semantic-model JSON lines instead of IntentLang
    /// (reads stdin when no file is given)
    #[arg(long)]
    model: bool,

    /// Config file (default: ~/.intentc/config.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Render all targets or a single one
    #[arg(long, value_enum, default_value_t = TargetSelection::All)]
    target: TargetSelection,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => Ok(sample_source()),
    }
}

fn read_model_input(file: Option<&Path>) -> Result<Vec<Statement>> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            Box::new(io::Cursor::new(buf))
        }
    };
    Ok(read_models(reader)?)
}

fn report_parse_error(err: &ParseError) {
    eprintln!("=== Parse Error ===");
    eprintln!("{err}");
    if !err.context.is_empty() {
        eprintln!("{}", err.context);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let backends = Backends::select(&config, &cli.target.targets());

    let lines: Vec<CompiledLine> = if cli.model {
        let statements = read_model_input(cli.file.as_deref())?;
        info!(statements = statements.len(), "rendering semantic model");
        render_statements(statements, &backends)
    } else {
        let source = read_source(cli.file.as_deref())?;
        match annotate(&source, &config.hosts, &backends) {
            Ok(lines) => lines,
            Err(err) => {
                report_parse_error(&err);
                process::exit(2);
            }
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, cli.format, &lines, &backends.targets())?;
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 64; 2 is reserved for parse errors.
            let _ = e.print();
            process::exit(if e.use_stderr() { 64 } else { 0 });
        }
    };
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
