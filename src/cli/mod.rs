//! Command-line interface for threat-browser.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **show**: Aggregate and display details for a set of selected threats
//! - **catalog**: List, show, or export entries from the threat catalog
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # List the catalog in numeric-ordinal order
//! threat-browser catalog list
//!
//! # List the ids a running server exposes
//! threat-browser catalog list --server http://localhost:8080
//!
//! # Combined, de-duplicated details for two threats
//! threat-browser show T.1 T.2
//!
//! # Narrow the displayed details with a live-style text filter
//! threat-browser show T.1 T.2 --filter "risk_level: high"
//!
//! # JSON output for scripting
//! threat-browser show T.1 T.2 --format json
//!
//! # Start web UI
//! threat-browser serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod show;

#[derive(Parser)]
#[command(name = "threat-browser")]
#[command(version)]
#[command(about = "Browse a threat catalog and aggregate details across selected entries")]
#[command(
    long_about = "threat-browser lets you select entries from a threat catalog and view the combined, de-duplicated set of affected objects and implementation methods they contribute.\n\nDuplicate sub-records contributed by several threats appear once, keeping the fields of the first selected contributor."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show combined details for the selected threats
    Show(show::ShowArgs),

    /// Manage the threat catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to a custom catalog file (defaults to the embedded dataset)
    #[arg(long)]
    pub catalog: Option<std::path::PathBuf>,

    /// URL of a remote catalog document to fetch once at startup
    #[arg(long, conflicts_with = "catalog")]
    pub catalog_url: Option<String>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
