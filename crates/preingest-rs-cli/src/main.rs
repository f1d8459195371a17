// crates/preingest-rs-cli/src/main.rs

//! `preingest`: runs one operation over a session working directory and
//! prints its report as JSON on stdout. Logging goes to stderr.

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use preingest_rs::{LoggingSink, OperationReport, Preingest, PreingestConfig, SidecarConvention};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "preingest", version)]
#[command(about = "Convert, validate and enrich archival sidecar metadata before ingest")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Session working directory containing the archive folder
    #[arg(long, short = 'w', default_value = ".", global = true)]
    working_dir: PathBuf,

    /// Configuration file
    #[arg(long, env = "PREINGEST_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert ToPX sidecars to MDTO
    Convert,
    /// Check the aggregation levels of every chain
    Validate {
        #[arg(long, value_enum, default_value_t = DialectArg::Mdto)]
        dialect: DialectArg,
    },
    /// Recompute SHA-256 checksums
    Fixity {
        #[arg(long, value_enum, default_value_t = DialectArg::Mdto)]
        dialect: DialectArg,
    },
    /// Fill in file formats from a DROID CSV export
    Format {
        #[arg(long, value_enum, default_value_t = DialectArg::Mdto)]
        dialect: DialectArg,
        /// DROID export; defaults to the newest *.csv in the working directory
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Write parent, child and representation references (MDTO only)
    Relations,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    Topx,
    Mdto,
    Opex,
}

impl From<DialectArg> for SidecarConvention {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Topx => SidecarConvention::ToPx,
            DialectArg::Mdto => SidecarConvention::Mdto,
            DialectArg::Opex => SidecarConvention::Opex,
        }
    }
}

fn run(engine: &Preingest, cli: &Cli) -> OperationReport {
    let dir = cli.working_dir.as_path();
    let mut sink = LoggingSink;
    match &cli.command {
        Command::Convert => engine.convert(dir, &mut sink),
        Command::Validate { dialect } => engine.validate(dir, (*dialect).into(), &mut sink),
        Command::Fixity { dialect } => engine.fixity(dir, (*dialect).into(), &mut sink),
        Command::Format { dialect, csv } => {
            engine.format(dir, (*dialect).into(), csv.as_deref(), &mut sink)
        }
        Command::Relations => engine.relationships(dir, &mut sink),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match PreingestConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let report = run(&Preingest::new(config), &cli);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Could not serialize report: {e}");
            return ExitCode::from(2);
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
