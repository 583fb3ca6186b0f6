//! Colexnet CLI entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use colexnet_query::{BuiltinSourceCodes, LayeredSourceCodes};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

const DEFAULT_MAX_DEPTH: usize = 4;

#[derive(Parser)]
#[command(name = "colexnet")]
#[command(about = "Query cross-linguistic colexification networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Network description in GML
    #[arg(short, long, env = "CLICS_NETWORK_PATH", global = true)]
    network: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "COLEXNET_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print results as pretty JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,
    #[command(flatten)]
    Query(QueryCommand),
}

/// Commands that need a loaded network.
#[derive(Subcommand)]
enum QueryCommand {
    /// Summarize the loaded network
    Stats,
    /// List concepts, most colexified first
    Concepts {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Find concepts whose gloss contains a string
    Search { query: String },
    /// Show the colexifications of a concept
    Colex {
        concept: String,
        /// Restrict to these ISO or source codes
        #[arg(short, long, value_delimiter = ',')]
        languages: Vec<String>,
    },
    /// Show which colexifications of a concept one language attests
    Language { concept: String, iso: String },
    /// Break down a concept pair's colexifications by family
    Family {
        concept1: String,
        concept2: String,
        #[arg(short, long, value_delimiter = ',')]
        families: Vec<String>,
    },
    /// Direct and indirect colexification proportions per family
    Patterns {
        concept1: String,
        concept2: String,
        #[arg(short, long, value_delimiter = ',')]
        families: Vec<String>,
    },
    /// Find semantic chains between two concepts within a family
    Chains {
        concept1: String,
        concept2: String,
        #[arg(short, long)]
        family: String,
        /// Maximum number of hops (default 4)
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("colexnet={}", log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Version => {
            println!("Colexnet v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Query(command) => {
            let config = config::Config::load(cli.config.as_deref())?;
            let output = run(command, cli.network, config, cli.json)?;
            print!("{}", output);
            Ok(())
        }
    }
}

fn run(command: QueryCommand, network: Option<PathBuf>, config: config::Config, json: bool) -> anyhow::Result<String> {
    let path = network
        .or(config.network)
        .context("no network file given; pass --network or set CLICS_NETWORK_PATH")?;
    let network = colexnet_loader::load(&path)
        .with_context(|| format!("failed to load network from {}", path.display()))?;

    let resolver = LayeredSourceCodes {
        primary: config.source_codes,
        fallback: BuiltinSourceCodes,
    };

    match command {
        QueryCommand::Stats => commands::stats(&network, json),
        QueryCommand::Concepts { limit } => commands::concepts(&network, limit, json),
        QueryCommand::Search { query } => commands::search(&network, &query, json),
        QueryCommand::Colex { concept, languages } => {
            commands::colex(&network, &concept, &languages, &resolver, json)
        }
        QueryCommand::Language { concept, iso } => commands::language(&network, &concept, &iso, &resolver, json),
        QueryCommand::Family {
            concept1,
            concept2,
            families,
        } => commands::family(&network, &concept1, &concept2, &families, json),
        QueryCommand::Patterns {
            concept1,
            concept2,
            families,
        } => commands::patterns(&network, &concept1, &concept2, &families, json),
        QueryCommand::Chains {
            concept1,
            concept2,
            family,
            max_depth,
        } => {
            let max_depth = max_depth.or(config.max_depth).unwrap_or(DEFAULT_MAX_DEPTH);
            commands::chains(&network, &concept1, &concept2, &family, max_depth, json)
        }
    }
}
