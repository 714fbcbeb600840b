//! Lumina Search CLI - image meta search server and command line client.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lumina_search::{
    parse_sources, Config, ImageQuery, OrderBy, Registry, Search, SearchError, SourceInfo,
    DEFAULT_PER_PAGE,
};

/// Lumina Search - image meta search across stock and public archives
#[derive(Parser)]
#[command(name = "lumina-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// Search images from the command line
    Search(SearchArgs),

    /// List image sources and their availability
    Sources,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Sources to query (comma-separated)
    #[arg(short, long)]
    sources: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    page: u32,

    /// Results per source
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: u32,

    /// Ordering hint: relevant, latest or oldest
    #[arg(short, long, default_value = "relevant")]
    order_by: OrderBy,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();

    match cli.command {
        Commands::Serve(args) => run_serve(args, config).await,
        Commands::Search(args) => run_search(args, config).await,
        Commands::Sources => list_sources(&config),
    }
}

async fn run_serve(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(host) = args.host {
        config = config.with_host(host);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }

    let search = Arc::new(Search::new(Arc::new(Registry::new(&config)?)));
    lumina_search::serve(search, &config).await?;
    Ok(())
}

fn print_sources(label: &str, sources: &[SourceInfo]) {
    println!("  {}:", label);
    for source in sources {
        let status = if source.available {
            "available"
        } else {
            "missing credentials"
        };
        println!("    {:<22} {:<28} {}", source.id, source.name, status);
    }
    println!();
}

fn list_sources(config: &Config) -> Result<()> {
    let listing = Registry::new(config)?.list_sources();

    println!("Image sources:\n");
    print_sources("Free", &listing.free);
    print_sources("Paid", &listing.paid);
    println!("Usage: lumina-search search \"query\" -s pexels,pixabay");
    Ok(())
}

async fn run_search(args: SearchArgs, config: Config) -> Result<()> {
    let search = Search::new(Arc::new(Registry::new(&config)?));

    let mut query = ImageQuery::new(&args.query)
        .with_page(args.page)
        .with_per_page(args.per_page)
        .with_order(args.order_by);
    if let Some(raw) = &args.sources {
        query = query.with_sources(parse_sources(raw));
        if query.sources.is_empty() {
            return Err(SearchError::NoSources.into());
        }
    }

    let response = search.search(query).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nImages for \"{}\" ({} results in {:.0}ms):\n",
                response.query, response.total_results, response.search_time_ms
            );

            for (i, image) in response.items().iter().enumerate() {
                println!("{}. {}", i + 1, image.title);
                println!("   URL: {}", image.regular_url);
                if let Some(photographer) = &image.photographer {
                    println!("   By: {}", photographer);
                }
                println!("   Source: {} | License: {}", image.source, image.license);
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for image in response.items() {
                println!("{}\t{}\t{}", image.source, image.title, image.regular_url);
            }
        }
    }

    Ok(())
}
