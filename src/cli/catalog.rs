use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::aggregate::remote::RemoteCatalog;
use crate::catalog::store::ThreatCatalog;
use crate::cli::OutputFormat;
use crate::core::types::ThreatId;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all threats in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// URL of a remote catalog document
        #[arg(long, conflicts_with = "catalog")]
        url: Option<String>,

        /// Base URL of a running threat-browser server; ids come from its
        /// list endpoint instead of a full catalog document
        #[arg(long, conflicts_with_all = ["catalog", "url"])]
        server: Option<String>,
    },

    /// Show details of a single threat entry
    Show {
        /// Threat ID
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            url,
            server,
        } => match server {
            Some(base_url) => run_list_remote(&base_url, format),
            None => run_list(catalog.as_deref(), url, format, verbose),
        },
        CatalogCommands::Show { id, catalog } => run_show(&id, catalog.as_deref(), format),
        CatalogCommands::Export { output, catalog } => run_export(&output, catalog.as_deref()),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<ThreatCatalog> {
    Ok(match path {
        Some(path) => ThreatCatalog::load_from_file(path)?,
        None => ThreatCatalog::load_embedded()?,
    })
}

/// List ids from a running server. The list endpoint returns identifiers
/// only, so there are no per-entry counts to print.
fn run_list_remote(base_url: &str, format: OutputFormat) -> anyhow::Result<()> {
    let remote = RemoteCatalog::new(base_url);
    let ids = remote.list_ids()?;

    match format {
        OutputFormat::Text => {
            println!("Threat Catalog ({} threats)\n", ids.len());
            for id in &ids {
                println!("{id}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ids)?),
        OutputFormat::Tsv => {
            println!("id");
            for id in &ids {
                println!("{}", id.as_str());
            }
        }
    }

    Ok(())
}

fn run_list(
    catalog_path: Option<&Path>,
    url: Option<String>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = match url {
        Some(url) => ThreatCatalog::load_from_url(&url)?,
        None => load_catalog(catalog_path)?,
    };

    if verbose {
        eprintln!("Loaded catalog with {} threats", catalog.len());
    }

    let ids = catalog.sorted_ids();

    match format {
        OutputFormat::Text => {
            let id_width = ids
                .iter()
                .map(|id| id.as_str().len())
                .max()
                .unwrap_or(2)
                .max(2);

            println!("Threat Catalog ({} threats)\n", ids.len());
            println!(
                "{:<id_w$} {:>8} {:>16} Name",
                "ID",
                "Objects",
                "Implementations",
                id_w = id_width
            );
            println!("{}", "-".repeat(id_width + 70));

            for id in &ids {
                let entry = catalog.get(id).expect("sorted id came from the catalog");
                println!(
                    "{:<id_w$} {:>8} {:>16} {}",
                    id.as_str(),
                    entry.objects.len(),
                    entry.implementations.len(),
                    entry.name.as_deref().unwrap_or("-"),
                    id_w = id_width
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = ids
                .iter()
                .map(|id| {
                    let entry = catalog.get(id).expect("sorted id came from the catalog");
                    serde_json::json!({
                        "id": id.as_str(),
                        "name": entry.name,
                        "object_count": entry.objects.len(),
                        "implementation_count": entry.implementations.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tobject_count\timplementation_count");
            for id in &ids {
                let entry = catalog.get(id).expect("sorted id came from the catalog");
                println!(
                    "{}\t{}\t{}\t{}",
                    id.as_str(),
                    entry.name.as_deref().unwrap_or(""),
                    entry.objects.len(),
                    entry.implementations.len()
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let threat_id = ThreatId::new(id);
    let entry = catalog
        .get(&threat_id)
        .ok_or_else(|| anyhow::anyhow!("Threat '{}' not found in catalog", id))?;

    match format {
        OutputFormat::Text => {
            println!("Threat: {}", entry.name.as_deref().unwrap_or(id));
            println!("ID:     {threat_id}");
            println!();

            println!("Objects ({}):", entry.objects.len());
            for obj in &entry.objects {
                match &obj.object_type {
                    Some(t) => println!("  {}: {} [{}]", obj.id, obj.name, t),
                    None => println!("  {}: {}", obj.id, obj.name),
                }
            }

            println!();
            println!("Implementations ({}):", entry.implementations.len());
            for imp in &entry.implementations {
                println!("  {}: {}", imp.id, imp.name);
                if let Some(category) = &imp.category {
                    println!("      category: {category}");
                }
                if let Some(risk) = &imp.risk_level {
                    println!("      risk_level: {risk}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        OutputFormat::Tsv => {
            println!("kind\tid\tname");
            for obj in &entry.objects {
                println!("object\t{}\t{}", obj.id, obj.name);
            }
            for imp in &entry.implementations {
                println!("implementation\t{}\t{}", imp.id, imp.name);
            }
        }
    }

    Ok(())
}

fn run_export(output: &Path, catalog_path: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!("Exported {} threats to {}", catalog.len(), output.display());

    Ok(())
}
