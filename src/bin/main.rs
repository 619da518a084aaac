use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use pattern_catalog::{catalog, logging, CatalogConfig, DemoKind};

#[derive(Parser)]
#[command(name = "pattern-catalog")]
#[command(about = "Runnable design pattern demonstrations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable coloured headings
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every demo in the catalog
    List,

    /// Run one demo by name, or `all` for the configured set
    Run {
        /// Demo name (builder, chain, command, factory, state, strategy, visitor) or `all`
        name: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let config = match &cli.config {
        Some(path) => CatalogConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CatalogConfig::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List => catalog::write_listing(&mut out)?,
        Commands::Run { name } if name.eq_ignore_ascii_case("all") => {
            catalog::run_all(&config, &mut out)?
        }
        Commands::Run { name } => {
            let kind: DemoKind = name.parse()?;
            catalog::write_heading(&mut out, kind)?;
            catalog::run_demo(kind, &config, &mut out)
                .with_context(|| format!("running the {kind} demo"))?;
        }
    }

    out.flush()?;
    Ok(())
}
