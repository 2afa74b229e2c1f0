use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use core_sitemap::{
    ConfigFile, JsonFileManualRoutes, SitemapGenerator, common::env::base_url_from_env, find_route_tree,
    load_route_tree, parse_sitemap, setup_logging, write_sitemap,
};

#[derive(Parser)]
#[command(name = "route-sitemap")]
#[command(about = "Generates an XML sitemap from a router's route tree", long_about = None)]
struct SitemapCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sitemap from a route tree
    Generate(GenerateArgs),

    /// Parse an existing sitemap and report how many entries it has
    Check {
        /// The sitemap file to check.
        #[arg(short, long, value_parser = validate_input_file)]
        file: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON route tree export. Detected under --root when omitted.
    #[arg(short, long, value_parser = validate_input_file)]
    routes: Option<PathBuf>,

    /// Project root to search for a route tree export.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON configuration file (baseUrl, excludeRoutes, routeOptions, ...).
    #[arg(short, long, value_parser = validate_input_file)]
    config: Option<PathBuf>,

    /// Base URL of the site. Overrides the config file and SITEMAP_BASE_URL.
    #[arg(short, long, value_parser = validate_url)]
    base_url: Option<String>,

    /// JSON array of manual entries to append.
    #[arg(short, long, value_parser = validate_input_file)]
    manual_routes: Option<PathBuf>,

    /// Output file path for the generated sitemap. Printed to stdout when omitted.
    #[arg(short, long, value_parser = validate_output_file)]
    output: Option<PathBuf>,

    /// Write the document on a single line.
    #[arg(long)]
    compact: bool,
}

fn validate_url(s: &str) -> Result<String, String> {
    url::Url::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid URL: {}", e))
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file., if it exists
    dotenvy::dotenv().ok();

    setup_logging("core_sitemap=info,route_sitemap=info");

    let cli = SitemapCli::parse();

    match cli.command {
        Commands::Generate(args) => generate(args).await,
        Commands::Check { file } => {
            let xml = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Cannot read file {}", file.display()))?;
            let entries = parse_sitemap(&xml).with_context(|| format!("Invalid sitemap {}", file.display()))?;
            println!("Valid sitemap with {} entries: {}", entries.len(), file.display());
            Ok(())
        }
    }
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let routes_path = match args.routes {
        Some(path) => path,
        None => find_route_tree(&args.root).await?,
    };
    let tree = load_route_tree(&routes_path)
        .await
        .with_context(|| format!("Cannot load route tree {}", routes_path.display()))?;

    let config_file = match &args.config {
        Some(path) => ConfigFile::load(path)
            .await
            .with_context(|| format!("Cannot load config {}", path.display()))?,
        None => ConfigFile::default(),
    };

    let mut builder = config_file.into_builder();
    if let Some(base_url) = args.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(base_url) = base_url_from_env() {
        builder = builder.or_base_url(base_url);
    }
    if args.compact {
        builder = builder.pretty_print(false);
    }
    if let Some(path) = args.manual_routes {
        builder = builder.manual_routes(JsonFileManualRoutes::new(path));
    }
    let config = builder.build().context("Invalid sitemap configuration")?;

    let xml = SitemapGenerator::new(config).xml(&tree).await?;

    match args.output {
        Some(path) => write_sitemap(&path, &xml).await?,
        None => println!("{xml}"),
    }
    Ok(())
}
