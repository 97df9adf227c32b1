use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newslens_core::corpus::Table;
use newslens_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "newslens")]
#[command(author, version, about = "Scrape news feeds, enrich articles with NLP and explore them")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal dashboard
    Run,
    /// Fetch every configured feed and overwrite the raw corpus
    Scrape,
    /// Enrich the raw corpus and overwrite the enriched corpus
    Analyze,
    /// List enriched articles, optionally filtered
    List(ListArgs),
    /// Show one enriched article
    Show {
        /// 1-based row number from `list`, or the article URL
        article: String,
    },
    /// Translate an article's text
    Translate {
        /// 1-based row number from `list`, or the article URL
        article: String,
        /// Target language code (see `languages`)
        #[arg(short, long)]
        lang: String,
    },
    /// Answer a question about an article
    Ask {
        /// 1-based row number from `list`, or the article URL
        article: String,
        /// The question
        question: String,
    },
    /// Copy a corpus file to another location
    Export(ExportArgs),
    /// List the supported translation languages
    Languages,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show these sources (repeatable); all sources when omitted
    #[arg(short, long = "source")]
    pub sources: Vec<String>,
    /// Lower sentiment bound, inclusive
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub min: f64,
    /// Upper sentiment bound, inclusive
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub max: f64,
    /// List the raw corpus instead
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Export the raw corpus
    #[arg(long, conflicts_with = "enriched", required_unless_present = "enriched")]
    raw: bool,
    /// Export the enriched corpus
    #[arg(long)]
    enriched: bool,
    /// Destination file
    dest: PathBuf,
}

impl ExportArgs {
    fn table(&self) -> Table {
        if self.raw {
            Table::Raw
        } else {
            Table::Enriched
        }
    }
}

/// Log to stderr, or to the log file while the dashboard owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Cannot load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    let is_tui = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, is_tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Scrape) => commands::scrape::run(&config).await,
        Some(Commands::Analyze) => commands::analyze::run(&config).await,
        Some(Commands::List(args)) => commands::list::run(&config, &args),
        Some(Commands::Show { article }) => commands::show::run(&config, &article),
        Some(Commands::Translate { article, lang }) => {
            commands::translate::run(&config, &article, &lang).await
        }
        Some(Commands::Ask { article, question }) => {
            commands::ask::run(&config, &article, &question).await
        }
        Some(Commands::Export(args)) => commands::export::run(&config, args.table(), &args.dest),
        Some(Commands::Languages) => commands::languages::run(),
    }
}
