use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalogdb_core::config::{resolve_with_base, Config, QuerySettings};
use catalogdb_core::loader::load_catalog;
use catalogdb_core::seed::seed_catalog;
use catalogdb_core::{CatalogStore, CategoryId, InMemoryCatalog, ListingId};
use catalogdb_query::{category_counts, paginate, PageRequest, QueryEngine, RawQuery};

#[derive(Parser)]
#[command(name = "catalogdb", about = "Search and browse a marketplace catalog")]
struct Cli {
    /// JSON catalog file; overrides `catalog.path` from config.
    #[arg(long, global = true)]
    catalog: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Free-text search across the catalog.
    Search {
        #[arg(default_value = "")]
        text: String,
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Browse one category.
    Category {
        id: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List categories with stored and recomputed listing counts.
    Categories,
    /// Show one listing.
    Show { id: String },
}

#[derive(Args)]
struct FilterArgs {
    /// Filter chip label, in selection order (e.g. under_25, score_90, price:0-50).
    #[arg(long = "chip")]
    chips: Vec<String>,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    per_page: Option<usize>,
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn open_catalog(cli_path: Option<&str>, config: &Config) -> anyhow::Result<InMemoryCatalog> {
    let cwd = env::current_dir()?;
    let settings = config.settings()?;
    let path: Option<PathBuf> = match cli_path {
        Some(p) => Some(resolve_with_base(&cwd, p)),
        None => settings.catalog_path(&cwd),
    };
    match path {
        Some(p) => load_catalog(&p).map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", p.display(), e)),
        None => {
            tracing::info!("no catalog configured, using built-in seed catalog");
            Ok(seed_catalog()?)
        }
    }
}

fn run_query(engine: &QueryEngine<InMemoryCatalog>, raw: &RawQuery, filters: &FilterArgs, settings: &QuerySettings) -> anyhow::Result<()> {
    let query = engine.normalize(raw);
    let results = engine.execute(&query)?;
    let page = paginate(&results, PageRequest::clamped(filters.page, filters.per_page, settings));

    if filters.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if query.has_text() {
        println!("🔍 Results for \"{}\" (sort: {})", query.text(), query.sort_key());
    } else {
        println!("🔍 All listings (sort: {})", query.sort_key());
    }
    if page.total == 0 {
        println!("\nNo products found");
        return Ok(());
    }
    println!("Page {}/{} · {} results", page.page, page.total_pages.max(1), page.total);
    for (i, l) in page.items.iter().enumerate() {
        let rank = (page.page - 1) * page.per_page + i + 1;
        println!("\n  {}. {}  ${}  {} origin  id={}  category={}", rank, l.name, l.price, l.origin_score, l.id, l.category_id);
    }
    println!("\n📊 Category counts:");
    for (id, count) in category_counts(&results) {
        let name = engine.store().category(&id).map(|c| c.name.as_str()).unwrap_or("?");
        println!("  {} ({}): {} listings", name, id, count);
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let catalog = open_catalog(cli.catalog.as_deref(), &config)?;
    let engine = QueryEngine::new(catalog, &settings.query)?;

    match &cli.command {
        Command::Search { text, category, filters } => {
            let raw = RawQuery { text: text.clone(), category: category.clone(), chips: filters.chips.clone(), sort: filters.sort.clone() };
            run_query(&engine, &raw, filters, &settings.query)?;
        }
        Command::Category { id, filters } => {
            let category = engine.store().category(&CategoryId::from(id.as_str()))?;
            println!("📁 {}", category.name);
            let raw = RawQuery { category: Some(id.clone()), chips: filters.chips.clone(), sort: filters.sort.clone(), ..RawQuery::default() };
            run_query(&engine, &raw, filters, &settings.query)?;
        }
        Command::Categories => {
            let store = engine.store();
            for c in store.categories() {
                let actual = store.actual_listing_count(&c.id)?;
                println!("  {:<4} {:<20} {:>5} listed  {:>3} in catalog", c.id.as_str(), c.name, c.listing_count, actual);
            }
        }
        Command::Show { id } => {
            let store = engine.store();
            let l = store.listing(&ListingId::from(id.as_str()))?;
            let category = store.category(&l.category_id)?;
            println!("{}  ${}", l.name, l.price);
            println!("Origin score: {} ({})", l.origin_score, l.origin_score.tier());
            println!("Category: {}", category.name);
            if let Some(d) = &l.description { println!("\n{}", d); }
            if let Some(s) = &l.seller {
                let verified = if s.verified { " ✔" } else { "" };
                println!("\nSeller: {}{} {}", s.name, verified, s.location.as_deref().unwrap_or(""));
            }
            for f in &l.features { println!("  • {}", f); }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Err(e) if e.downcast_ref::<catalogdb_core::Error>().is_some_and(catalogdb_core::Error::is_not_found) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
        other => other,
    }
}
