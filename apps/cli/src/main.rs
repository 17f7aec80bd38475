//! `wetwire` CLI: a thin `clap`-derive surface over `wetwire-core`'s
//! `build`/`import` operations, plus a `lint` stub (spec.md §6).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wetwire_catalog::Catalog;
use wetwire_core::{build, import, BuildConfig, BuildOutcome, ImportConfig};
use wetwire_discovery::Discoverer;
use wetwire_validator::{validate, DependencyMode, ValidatorError};

#[derive(Parser)]
#[command(name = "wetwire", about = "Azure ARM template toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover resource bindings under a directory and emit an ARM template.
    Build {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Parse an ARM template and regenerate equivalent source declarations.
    Import {
        file: PathBuf,
        #[arg(long, default_value = "infra")]
        package: String,
    },
    /// Report the duplicate-binding and cycle diagnostics this core can produce.
    Lint {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Build { path } => run_build(path),
        Command::Import { file, package } => run_import(file, package),
        Command::Lint { path } => run_lint(path),
    };

    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wetwire_cli=info,wetwire_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run_build(path: PathBuf) -> Result<String, String> {
    let config = BuildConfig::new(path);
    let outcome = build(&config).map_err(|e| e.to_string())?;
    Ok(outcome.message())
}

fn run_import(file: PathBuf, package: String) -> Result<String, String> {
    let mut config = ImportConfig::new(file);
    config.package = package;
    let outcome = import(&config).map_err(|e| e.to_string())?;
    Ok(outcome.message())
}

fn run_lint(path: PathBuf) -> Result<String, String> {
    if !path.exists() {
        return Err(format!("path not found: {}", path.display()));
    }
    let discoverer = Discoverer::new(Catalog::new());
    let discovered = discoverer
        .discover(&path)
        .map_err(|e| format!("discovery failed: {e}"))?;

    match validate(discovered, DependencyMode::Lenient) {
        Ok(_) => Ok("No violations found.".to_string()),
        Err(ValidatorError::DuplicateResource(name)) => {
            Ok(format!("WAZ004: duplicate resource binding name '{name}'"))
        }
        Err(ValidatorError::CyclicDependency(cycle)) => {
            Ok(format!("WAZ005: circular dependency: {}", cycle.join(" -> ")))
        }
        Err(other) => Err(other.to_string()),
    }
}
