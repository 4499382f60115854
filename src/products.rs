use crate::error::{Error, Result};
use crate::network::get_url_bytes;
use crate::storage::store_document;
use crate::utils::{kb, truncate_message};
use console::style;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// A product JSON document that was saved to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub json_url: String,
    pub path: PathBuf,
    pub size: usize,
}

/// The result of a batch of product fetches. Every URL ends up in exactly one
/// of the two lists.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub saved: Vec<ProductRecord>,
    pub failed: Vec<(String, Error)>,
}

/// The short name of a product: the last non-empty path segment of its page URL,
/// without query or fragment.
///
/// ```rust
/// use sitegrab::products::product_name;
///
/// assert_eq!(
///     product_name("https://site.com/products/blue-fin?variant=1").as_deref(),
///     Some("blue-fin")
/// );
/// assert_eq!(product_name("https://site.com/"), None);
/// ```
pub fn product_name(product_url: &str) -> Option<String> {
    let url = Url::parse(product_url).ok()?;
    url.path_segments()?
        .rfind(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// The JSON representation of a product page lives at the page URL plus `.json`.
pub fn json_endpoint(product_url: &str) -> String {
    format!("{}.json", product_url)
}

/// Downloads the JSON document of one product and writes the body, untouched,
/// to `{output_dir}/{name}.json`.
pub async fn fetch_product_json(
    product_url: &str,
    client: &Client,
    output_dir: &Path,
) -> Result<ProductRecord> {
    let name =
        product_name(product_url).ok_or_else(|| Error::ProductName(product_url.to_string()))?;
    let json_url = json_endpoint(product_url);

    let body = get_url_bytes(&json_url, client).await?;
    let path = store_document(output_dir, &format!("{}.json", name), &body)?;

    Ok(ProductRecord {
        name,
        json_url,
        path,
        size: body.len(),
    })
}

/// Fetches the products one after another. A failing product is logged and
/// recorded, the remaining ones are still attempted.
pub async fn fetch_products(urls: &[String], client: &Client, output_dir: &Path) -> FetchOutcome {
    println!(
        "{} 📥 Fetch product JSON into {}...",
        style("[3/4]").dim(),
        style(output_dir.display()).cyan()
    );

    let progress = indicatif::ProgressBar::new(urls.len() as u64);
    progress.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("      📥 [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("■┄"),
    );

    let mut outcome = FetchOutcome::default();
    for url in urls {
        progress.set_message(truncate_message(url, 60));

        match fetch_product_json(url, client, output_dir).await {
            Ok(record) => {
                progress.suspend(|| {
                    println!(
                        "      {} {} {}",
                        style("✔").green(),
                        record.path.display(),
                        style(kb(record.size)).dim()
                    )
                });
                outcome.saved.push(record);
            }
            Err(e) => {
                progress.suspend(|| {
                    println!(
                        "      {} Error fetching {}: {}",
                        style("[ERROR]").red(),
                        json_endpoint(url),
                        e
                    )
                });
                outcome.failed.push((url.clone(), e));
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message("- 🏁 Complete!");

    outcome
}
