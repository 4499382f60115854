use std::error::Error;

use clap::Parser;
use console::style;
use sitegrab::network;
use sitegrab::options::{Cli, Config, ConfigFile};
use sitegrab::prettify::prettify_dir;
use sitegrab::products::fetch_products;
use sitegrab::report::Report;
use sitegrab::sitemap::{ProductFilter, collect_product_urls, load_sitemap};
use tokio::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse terminal arguments.
    let options = Cli::parse();

    // Load config file and merge it with the arguments (CLI args take priority).
    let config_file = ConfigFile::load(options.config.as_ref()).unwrap_or_else(|e| {
        eprintln!("{} {}", style("[ERROR]").red(), e);
        std::process::exit(1);
    });
    let config = Config::resolve(&options, &config_file).unwrap_or_else(|e| {
        eprintln!("{} {}", style("[ERROR]").red(), e);
        std::process::exit(1);
    });

    let client = network::build_client(&config)?;
    let start_time = Instant::now();

    // Every later stage depends on the sitemap, so failing here ends the run.
    let sitemap = load_sitemap(&config, &client).await.unwrap_or_else(|e| {
        eprintln!("{} {}", style("[ERROR]").red(), e);
        std::process::exit(1);
    });

    let urls = collect_product_urls(&sitemap, &ProductFilter::new(&config.product_base));

    let fetch = if config.fetch_products {
        Some(fetch_products(&urls, &client, &config.output_dir).await)
    } else {
        println!(
            "{} ⏭  Skip fetching product JSON (pass --fetch to download)",
            style("[3/4]").dim()
        );
        None
    };

    let prettify = if config.prettify {
        Some(prettify_dir(&config.output_dir, &config.pretty_suffix))
    } else {
        println!("{} ⏭  Skip prettifying", style("[4/4]").dim());
        None
    };

    let report = Report {
        sitemap_url: config.sitemap_url.to_string(),
        sitemap_source: sitemap.source,
        urls_found: urls.len(),
        fetch,
        prettify,
        total_time: start_time.elapsed(),
    };
    report.show_text_report();

    Ok(())
}
