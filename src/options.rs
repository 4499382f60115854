use crate::error::{Error, Result};
use crate::utils::expand_path;
use clap::{Parser, ValueHint, value_parser};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default values used throughout the project.
pub mod defaults {
    /// The product sitemap of the storefront. `from` and `to` are the
    /// storefront's own pagination cursors.
    pub const SITEMAP_URL: &str =
        "https://futuresfins.com/sitemap_products_1.xml?from=4539112718475&to=7713593983115";

    /// Where the sitemap is cached between runs.
    pub const SITEMAP_CACHE: &str = "product_sitemap.xml";

    /// Directory holding the fetched product JSON and its pretty copies.
    pub const OUTPUT_DIR: &str = "products";

    /// Appended to the file stem of a prettified copy.
    pub const PRETTY_SUFFIX: &str = "-pretty";

    /// The default timeout for network requests, in seconds.
    pub const TIMEOUT: u64 = 15;

    /// The default user agent header value used for network requests.
    pub const USER_AGENT: &str = concat!("sitegrab/", env!("CARGO_PKG_VERSION"));

    /// Config file picked up from the working directory when no `--config` is given.
    pub const CONFIG_FILE: &str = ".sitegrab.toml";
}

#[derive(Debug, Parser)]
#[command(term_width = 80, version, about)]
pub struct Cli {
    #[arg(
        long,
        help = "The URL of the product sitemap to be fetched and processed.",
        value_hint = ValueHint::Url,
        value_parser = value_parser!(Url)
    )]
    pub sitemap_url: Option<Url>,

    #[arg(
        long,
        help = "Only sitemap locations starting with this URL are treated as products. Defaults to `/products/` on the sitemap's host.",
        value_hint = ValueHint::Url,
        value_parser = value_parser!(Url)
    )]
    pub product_base: Option<Url>,

    #[arg(
        long,
        help = "File the sitemap is cached in. Delete it to force a fresh download.",
        value_hint = ValueHint::FilePath,
        value_parser = value_parser!(PathBuf)
    )]
    pub cache_path: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        help = "Directory where product JSON documents are saved and prettified",
        value_hint = ValueHint::DirPath,
        value_parser = value_parser!(PathBuf)
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        help = "Download the JSON document of every product. Without it, only the sitemap is read and saved documents are prettified."
    )]
    pub fetch: bool,

    #[arg(long, help = "Do not write prettified copies of the saved JSON documents")]
    pub no_prettify: bool,

    #[arg(
        short = 't',
        long,
        help = "Timeout (in seconds) for each request [default: 15]",
        value_parser = value_parser!(u64).range(1..=120)
    )]
    pub request_timeout: Option<u64>,

    #[arg(long, help = "Custom User-Agent header to be used in requests")]
    pub user_agent: Option<String>,

    #[arg(
        short = 'c',
        long,
        help = "Path to a TOML config file. Defaults to `.sitegrab.toml` in the working directory, if present.",
        value_hint = ValueHint::FilePath,
        value_parser = value_parser!(PathBuf)
    )]
    pub config: Option<PathBuf>,
}

/// Values read from a TOML config file. Every field is optional, command line
/// flags take priority over them.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub sitemap_url: Option<String>,
    pub product_base: Option<String>,
    pub cache_path: Option<String>,
    pub output_dir: Option<String>,
    pub fetch: Option<bool>,
    pub prettify: Option<bool>,
    pub pretty_suffix: Option<String>,
    pub request_timeout: Option<u64>,
    pub user_agent: Option<String>,
}

impl ConfigFile {
    /// Loads the config file at `path`, or `.sitegrab.toml` from the working
    /// directory when no path is given. A missing default file is not an error.
    pub fn load(path: Option<&PathBuf>) -> std::result::Result<Self, String> {
        let path = match path {
            Some(p) => {
                let expanded = expand_path(&p.to_string_lossy());
                if !expanded.exists() {
                    return Err(format!("Config file not found: {}", expanded.display()));
                }
                expanded
            }
            None => {
                let default = PathBuf::from(defaults::CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("Invalid config file '{}': {}", path.display(), e))
    }
}

/// The resolved settings every stage of a run is driven by.
#[derive(Debug, Clone)]
pub struct Config {
    pub sitemap_url: Url,
    pub sitemap_cache: PathBuf,
    pub product_base: Url,
    pub output_dir: PathBuf,
    pub fetch_products: bool,
    pub prettify: bool,
    pub pretty_suffix: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        let sitemap_url =
            Url::parse(defaults::SITEMAP_URL).expect("default sitemap URL is valid");
        let product_base =
            product_base_for(&sitemap_url).expect("default sitemap URL has a host");
        Config {
            sitemap_url,
            sitemap_cache: PathBuf::from(defaults::SITEMAP_CACHE),
            product_base,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            fetch_products: false,
            prettify: true,
            pretty_suffix: defaults::PRETTY_SUFFIX.to_string(),
            request_timeout: Duration::from_secs(defaults::TIMEOUT),
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Merges command line flags, config file values and defaults, in that order
    /// of priority.
    pub fn resolve(cli: &Cli, file: &ConfigFile) -> Result<Self> {
        let fallback = Config::default();

        let sitemap_url = match (&cli.sitemap_url, &file.sitemap_url) {
            (Some(url), _) => url.clone(),
            (None, Some(raw)) => parse_url("sitemap_url", raw)?,
            (None, None) => fallback.sitemap_url,
        };

        let product_base = match (&cli.product_base, &file.product_base) {
            (Some(url), _) => url.clone(),
            (None, Some(raw)) => parse_url("product_base", raw)?,
            (None, None) => product_base_for(&sitemap_url)?,
        };

        let sitemap_cache = cli
            .cache_path
            .clone()
            .or_else(|| file.cache_path.as_deref().map(expand_path))
            .unwrap_or(fallback.sitemap_cache);

        let output_dir = cli
            .output_dir
            .clone()
            .or_else(|| file.output_dir.as_deref().map(expand_path))
            .unwrap_or(fallback.output_dir);

        let pretty_suffix = file.pretty_suffix.clone().unwrap_or(fallback.pretty_suffix);
        if pretty_suffix.is_empty() {
            return Err(Error::Config(
                "pretty_suffix must not be empty, prettified copies would overwrite their source"
                    .to_string(),
            ));
        }

        let request_timeout = cli
            .request_timeout
            .or(file.request_timeout)
            .map(Duration::from_secs)
            .unwrap_or(fallback.request_timeout);

        Ok(Config {
            sitemap_url,
            sitemap_cache,
            product_base,
            output_dir,
            fetch_products: cli.fetch || file.fetch.unwrap_or(fallback.fetch_products),
            prettify: !cli.no_prettify && file.prettify.unwrap_or(fallback.prettify),
            pretty_suffix,
            request_timeout,
            user_agent: cli
                .user_agent
                .clone()
                .or_else(|| file.user_agent.clone())
                .unwrap_or(fallback.user_agent),
        })
    }
}

/// Derives the product prefix `{scheme}://{host[:port]}/products/` from a sitemap URL.
pub fn product_base_for(sitemap_url: &Url) -> Result<Url> {
    if sitemap_url.host_str().is_none() {
        return Err(Error::Config(format!(
            "Cannot derive a product URL prefix from '{}': the URL has no host",
            sitemap_url
        )));
    }
    sitemap_url
        .join("/products/")
        .map_err(|e| Error::Config(format!("Invalid product URL prefix: {}", e)))
}

fn parse_url(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("Invalid URL for {}: '{}' ({})", field, raw, e)))
}
