//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "commentgate")]
#[command(about = "Tag-based visibility for stored comments", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new comment store
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Read comments as a caller with the given roles
    Get {
        /// Comment id (ignored when --period is given)
        id: Option<String>,

        /// Only comments belonging to these comment periods
        #[arg(short, long = "period", value_name = "PERIOD_ID")]
        periods: Vec<String>,

        /// Comma-separated fields to return (default: from config)
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Comma-separated caller roles
        #[arg(short, long, default_value = "public")]
        roles: String,
    },

    /// Submit a new comment from a JSON payload
    Create {
        /// Payload file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Update a comment's fields from a JSON payload (tags are ignored)
    Update {
        id: String,

        /// Payload file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Make a comment visible to public callers
    Publish { id: String },

    /// Hide a comment from public callers
    Unpublish { id: String },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
