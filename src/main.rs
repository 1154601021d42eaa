use clap::{Parser, Subcommand};
use sitegraph::paths::OutputPlan;
use sitegraph::{Site, config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitegraph")]
#[command(about = "Build a navigable page graph from a source tree")]
#[command(long_about = "\
Build a navigable page graph from a source tree

Source files (those ending in .html) contain a metadata header, a split
sequence, and the page HTML, which may use convenience macros.

Site navigation and URLs follow the source directory structure and the
internal page id:

  site_data/example.com/index.html             = index
  site_data/example.com/news.html              = news
  site_data/example.com/news/2019/10_06.html   = news/2019/10_06
     dist/example.com/news/2019/10_06.html     <--- output path

Requires one index.html at the source root. A directory containing an entry
named skip_rendering is ignored together with everything beneath it.

Run 'sitegraph gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source root directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory for rendered sites
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".sitegraph-temp", global = true)]
    temp_dir: PathBuf,

    /// Extra config file, layered over <source>/config.toml
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Renderers append .html to internal links (overrides config)
    #[arg(long, short = 'a', global = true)]
    append_html: bool,

    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site graph and write it to a manifest
    Scan,
    /// Validate the source tree without writing anything
    Check,
    /// List every output file a renderer would write
    Plan,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let site = build(&cli)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&site)?;
            std::fs::write(&manifest_path, json)?;
            output::print_site_output(&site);
            println!("==> Manifest written: {}", manifest_path.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = build(&cli)?;
            output::print_site_output(&site);
            println!("==> Source tree is valid");
        }
        Command::Plan => {
            let site = build(&cli)?;
            let plan = OutputPlan::for_site(&site);
            output::print_plan_output(&plan, &cli.output);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` forces debug logging, otherwise `RUST_LOG` or `info`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(&cli.source, cli.config.as_deref())?;
    if cli.append_html {
        site_config.append_html = true;
    }
    Ok(site_config)
}

fn build(cli: &Cli) -> Result<Site, Box<dyn std::error::Error>> {
    let site_config = load_config(cli)?;
    let site = sitegraph::build_site(Path::new(&cli.source), &site_config)?;
    Ok(site)
}
