use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "wirescope")]
#[command(about = "Wiring reports for dependency-injection containers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the bindings report for a container snapshot
    Report {
        /// Snapshot file (defaults to wiring.yaml/wiring.json in the current directory or parents)
        snapshot: Option<PathBuf>,
        /// Config file (defaults to the user config)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print binding chains only
    Chains {
        /// Snapshot file (defaults to wiring.yaml/wiring.json in the current directory or parents)
        snapshot: Option<PathBuf>,
        /// Config file (defaults to the user config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Manage report configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Config file (defaults to the user config)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Write a default config file
    Init {
        /// Config file (defaults to the user config)
        #[arg(short, long)]
        path: Option<PathBuf>,
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    // logs go to stderr so report output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            snapshot,
            config,
            json,
        } => cli::report::run(snapshot, config, json),
        Commands::Chains { snapshot, config } => cli::chains::run(snapshot, config),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { path } => cli::config::show(path),
            ConfigCommands::Init { path, force } => cli::config::init(path, force),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", wirescope::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
