//! Command-line definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DOCUMENT_PATH: &str = "data/diseases.json";

#[derive(Debug, Parser)]
#[command(
    name = "diseasedx",
    version,
    about = "Build and query the disease lookup dataset",
    after_help = "Query commands read --data <json> (default data/diseases.json) or --db <sqlite>."
)]
pub struct Cli {
    /// JSON dataset document to query; ignored when --db is given
    #[arg(long, global = true, value_name = "JSON")]
    pub data: Option<PathBuf>,

    /// SQLite dataset store; the import target, or the source for queries
    #[arg(long, global = true, value_name = "SQLITE")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Build a dataset document from CSV
    Convert {
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
        #[arg(short, long, value_name = "JSON")]
        out: PathBuf,
    },
    /// Build from CSV and replace the SQLite dataset (requires --db)
    Import {
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
    /// List diseases with optional filters
    List(ListArgs),
    /// Show one disease by identifier
    Show { id: u32 },
    /// Rank diseases by symptom
    Check {
        #[arg(required = true, value_name = "SYMPTOM")]
        symptoms: Vec<String>,
    },
    /// Dataset statistics
    Stats,
    /// Print the core version
    Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ListArgs {
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long, value_parser = parse_bool, value_name = "BOOL")]
    pub contagious: Option<bool>,
    #[arg(long, value_parser = parse_bool, value_name = "BOOL")]
    pub chronic: Option<bool>,
    #[arg(long)]
    pub page: Option<usize>,
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Where query commands read the dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Document(PathBuf),
    Database(PathBuf),
}

impl Cli {
    pub fn source(&self) -> Source {
        match (&self.db, &self.data) {
            (Some(db), _) => Source::Database(db.clone()),
            (None, Some(data)) => Source::Document(data.clone()),
            (None, None) => Source::Document(PathBuf::from(DEFAULT_DOCUMENT_PATH)),
        }
    }
}

/// Strict on the CLI: unlike source flags, a typo should not silently mean `false`.
fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("expected a boolean, got `{other}`")),
    }
}
