use crate::error::{Error, Result};
use crate::network::get_url_bytes;
use crate::options::Config;
use console::style;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

// region: Structs & Enums
#[derive(Debug, PartialEq)]
pub enum SitemapType {
    SitemapIndex,
    UrlSet,
    Unknown,
}

impl fmt::Display for SitemapType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Where the bytes of a [`SitemapDocument`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapSource {
    Cache,
    Network,
}

impl fmt::Display for SitemapSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SitemapSource::Cache => write!(f, "cache"),
            SitemapSource::Network => write!(f, "network"),
        }
    }
}

/// The raw sitemap of one run. Never modified once loaded.
#[derive(Debug, Clone)]
pub struct SitemapDocument {
    pub url: Url,
    pub cache_path: PathBuf,
    pub source: SitemapSource,
    pub content: Vec<u8>,
}

impl SitemapDocument {
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// One-line account of where the document came from.
    pub fn describe(&self) -> String {
        match self.source {
            SitemapSource::Cache => {
                format!("Using cached sitemap {}", self.cache_path.display())
            }
            SitemapSource::Network => format!("Fetched sitemap {}", self.url),
        }
    }
}

/// Decides which sitemap locations are product pages.
///
/// A location qualifies when it starts with the product prefix, for example
/// `https://site.com/products/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    prefix: String,
}

impl ProductFilter {
    pub fn new(product_base: &Url) -> Self {
        let mut prefix = product_base.as_str().to_string();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        ProductFilter { prefix }
    }

    /// Filter for `https://{host}/products/`.
    pub fn for_host(host: &str) -> Self {
        ProductFilter {
            prefix: format!("https://{}/products/", host),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, location: &str) -> bool {
        location.starts_with(&self.prefix)
    }
}
// endregion

// region: Functions
/// Returns the sitemap, from `cache_path` if that file exists, otherwise from
/// the network.
///
/// A cached file is returned as is, without any request or staleness check.
/// Any transport failure or non-success status of the download is returned as
/// an error; there is no retry.
pub async fn fetch_sitemap(
    sitemap_url: &Url,
    cache_path: &Path,
    client: &Client,
) -> Result<SitemapDocument> {
    if cache_path.exists() {
        let content = fs::read(cache_path).map_err(|e| Error::io(cache_path, e))?;
        return Ok(SitemapDocument {
            url: sitemap_url.clone(),
            cache_path: cache_path.to_path_buf(),
            source: SitemapSource::Cache,
            content,
        });
    }

    let content = get_url_bytes(sitemap_url.as_str(), client).await?;
    Ok(SitemapDocument {
        url: sitemap_url.clone(),
        cache_path: cache_path.to_path_buf(),
        source: SitemapSource::Network,
        content,
    })
}

/// Persists a freshly downloaded sitemap to its cache path. Documents that were
/// read from the cache are left alone. Returns whether the cache was written.
pub fn save_sitemap(document: &SitemapDocument) -> Result<bool> {
    if document.source == SitemapSource::Cache {
        return Ok(false);
    }

    if let Some(parent) = document.cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(&document.cache_path, &document.content)
        .map_err(|e| Error::io(&document.cache_path, e))?;
    Ok(true)
}

/// Loads the configured sitemap and makes sure it is cached for the next run.
pub async fn load_sitemap(config: &Config, client: &Client) -> Result<SitemapDocument> {
    let document = fetch_sitemap(&config.sitemap_url, &config.sitemap_cache, client).await?;
    println!("{} 🔎 {}...", style("[1/4]").dim(), document.describe());

    if save_sitemap(&document)? {
        println!(
            "      Saved sitemap to {}",
            style(document.cache_path.display()).underlined()
        );
    }

    Ok(document)
}

/// Extracts the product URLs of a loaded sitemap and reports how many were found.
pub fn collect_product_urls(document: &SitemapDocument, filter: &ProductFilter) -> Vec<String> {
    println!(
        "{} 🚚 Collect product URLs matching {}...",
        style("[2/4]").dim(),
        style(filter.prefix()).cyan()
    );

    let xml = document.as_str();
    let sitemap_type = identify_sitemap_type(&xml);
    if sitemap_type != SitemapType::UrlSet {
        eprintln!(
            "{} Expected a urlset sitemap, found {}: {}",
            style("[WARN]").yellow(),
            sitemap_type,
            document.url
        );
    }

    let urls = extract_product_urls(&xml, filter);
    println!("      Found {} product URLs", style(urls.len()).bold());
    urls
}

pub fn identify_sitemap_type(xml: &str) -> SitemapType {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                return match e.local_name().as_ref() {
                    b"sitemapindex" => SitemapType::SitemapIndex,
                    b"urlset" => SitemapType::UrlSet,
                    _ => SitemapType::Unknown,
                };
            }
            Ok(Event::Eof) => break,
            Err(_) => return SitemapType::Unknown,
            _ => {}
        }
        buf.clear();
    }

    SitemapType::Unknown
}

/// Extracts the text of every `<loc>` that is a direct child of a `<url>`
/// element and accepted by the filter, in document order. Duplicates are kept.
///
/// Malformed XML is not an error: parsing stops at the first problem and the
/// locations found up to that point are returned.
pub fn extract_product_urls(xml: &str, filter: &ProductFilter) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut urls = Vec::new();
    // Local names of the currently open elements.
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut location: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"loc" && open.last().is_some_and(|parent| parent == b"url") {
                    location = Some(String::new());
                }
                open.push(name);
            }
            Ok(Event::Text(ref e)) => {
                if let Some(loc) = location.as_mut() {
                    match e.unescape() {
                        Ok(text) => loc.push_str(&text),
                        Err(_) => break,
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(loc) = location.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(_)) => {
                if open.pop().is_some_and(|name| name == b"loc") {
                    if let Some(loc) = location.take() {
                        let loc = loc.trim();
                        if filter.matches(loc) {
                            urls.push(loc.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    urls
}
// endregion
