use std::path::PathBuf;

use clap::Args;

use crate::aggregate::engine::Aggregate;
use crate::aggregate::remote::RemoteCatalog;
use crate::aggregate::DetailsProvider;
use crate::catalog::store::ThreatCatalog;
use crate::cli::OutputFormat;
use crate::core::types::ThreatId;
use crate::session::{SessionContext, SessionError};
use crate::view::filter::apply_filter;
use crate::view::presenter::{render_details, DetailsView, SectionView};

#[derive(Args)]
pub struct ShowArgs {
    /// Threat identifiers to select, in selection order
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Narrow the displayed details with a case-insensitive text filter
    #[arg(long)]
    pub filter: Option<String>,

    /// Path to custom catalog file (defaults to the embedded dataset)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Base URL of a running threat-browser server; details are fetched
    /// pre-aggregated from its details endpoint instead of merged locally
    #[arg(long, conflicts_with = "catalog")]
    pub server: Option<String>,
}

pub fn run(args: ShowArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // A repeated id on the command line is one selection, not a toggle pair
    let mut ids: Vec<ThreatId> = Vec::with_capacity(args.ids.len());
    for raw in &args.ids {
        let id = ThreatId::new(raw.as_str());
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    let aggregate = match &args.server {
        Some(base_url) => {
            let remote = RemoteCatalog::new(base_url.as_str());
            remote.combined_details(&ids)?
        }
        None => aggregate_locally(&ids, args.catalog.as_deref(), verbose)?,
    };

    match format {
        OutputFormat::Text => print_text(&aggregate, args.filter.as_deref()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&aggregate)?),
        OutputFormat::Tsv => print_tsv(&aggregate),
    }

    Ok(())
}

/// Drive a full headless session: load, toggle each requested id, show.
fn aggregate_locally(
    ids: &[ThreatId],
    catalog_path: Option<&std::path::Path>,
    verbose: bool,
) -> anyhow::Result<Aggregate> {
    let catalog = match catalog_path {
        Some(path) => ThreatCatalog::load_from_file(path)?,
        None => ThreatCatalog::load_embedded()?,
    };

    if verbose {
        eprintln!("Loaded catalog with {} threats", catalog.len());
    }

    let mut session = SessionContext::new(catalog);
    for id in ids {
        if session.toggle(id).is_none() && verbose {
            eprintln!("Ignoring unknown threat id '{id}'");
        }
    }

    match session.show_details() {
        Ok(aggregate) => Ok(aggregate),
        Err(SessionError::EmptySelection) => {
            anyhow::bail!("Select at least one threat (no requested id exists in the catalog)")
        }
    }
}

fn print_text(aggregate: &Aggregate, filter: Option<&str>) {
    let view = render_details(aggregate);

    println!("Selected threats: {}", view.threat_count);
    println!("  {}", view.chips.join("  "));
    println!();

    match filter {
        Some(query) => print_filtered(&view, query),
        None => {
            print_section(&view.objects, None);
            println!();
            print_section(&view.implementations, None);
        }
    }
}

fn print_filtered(view: &DetailsView, query: &str) {
    // The filter runs over the full details view, both kinds at once,
    // exactly like the live search box in the web UI
    let mut items = view.objects.items.clone();
    let object_count = items.len();
    items.extend(view.implementations.items.clone());

    let outcome = apply_filter(&items, query);

    print_section(&view.objects, Some(&outcome.visible[..object_count]));
    println!();
    print_section(&view.implementations, Some(&outcome.visible[object_count..]));

    if let Some(marker) = outcome.marker() {
        println!();
        println!("{marker}");
    }
}

fn print_section(section: &SectionView, visible: Option<&[bool]>) {
    println!("{}", section.heading);

    if let Some(marker) = &section.empty_marker {
        println!("  {marker}");
        return;
    }

    for (i, item) in section.items.iter().enumerate() {
        if let Some(mask) = visible {
            if !mask[i] {
                continue;
            }
        }
        println!("  {}: {}", item.id, item.title);
        for line in &item.meta {
            println!("      {line}");
        }
    }
}

fn print_tsv(aggregate: &Aggregate) {
    println!("kind\tid\tname\tclassification\trisk_level");
    for obj in &aggregate.objects {
        println!(
            "object\t{}\t{}\t{}\t",
            obj.id,
            obj.name,
            obj.object_type.as_deref().unwrap_or("")
        );
    }
    for imp in &aggregate.implementations {
        println!(
            "implementation\t{}\t{}\t{}\t{}",
            imp.id,
            imp.name,
            imp.category.as_deref().unwrap_or(""),
            imp.risk_level.as_deref().unwrap_or("")
        );
    }
}
