use crate::metrics::{Entry, Metrics};
use crate::prettify::PrettifyOutcome;
use crate::products::FetchOutcome;
use crate::sitemap::SitemapSource;
use crate::utils::ms;
use console::style;
use std::time::Duration;

/// What a single run did, for the closing summary.
#[derive(Debug)]
pub struct Report {
    pub sitemap_url: String,
    pub sitemap_source: SitemapSource,
    pub urls_found: usize,
    /// `None` when fetching was not requested.
    pub fetch: Option<FetchOutcome>,
    /// `None` when the prettify pass was disabled.
    pub prettify: Option<PrettifyOutcome>,
    pub total_time: Duration,
}

impl Report {
    pub fn metrics(&self) -> Metrics {
        let (saved, fetch_failed) = match &self.fetch {
            Some(outcome) => (
                outcome.saved.len().to_string(),
                outcome.failed.len().to_string(),
            ),
            None => ("skipped".to_string(), "-".to_string()),
        };
        let (prettified, prettify_failed) = match &self.prettify {
            Some(outcome) => (
                outcome.written.len().to_string(),
                outcome.failed.len().to_string(),
            ),
            None => ("skipped".to_string(), "-".to_string()),
        };

        Metrics(vec![
            Entry {
                label: "Sitemap Source",
                value: self.sitemap_source.to_string(),
            },
            Entry {
                label: "Product URLs",
                value: self.urls_found.to_string(),
            },
            Entry {
                label: "Products Saved",
                value: saved,
            },
            Entry {
                label: "Fetch Errors",
                value: fetch_failed,
            },
            Entry {
                label: "Prettified",
                value: prettified,
            },
            Entry {
                label: "Prettify Errors",
                value: prettify_failed,
            },
            Entry {
                label: "Elapsed Time",
                value: ms(self.total_time),
            },
        ])
    }

    pub fn show_text_report(&self) {
        println!(
            "\n{} {}\n",
            style("Summary for").bold(),
            style(&self.sitemap_url).bold().underlined()
        );
        println!("{}", self.metrics().build_table());
    }
}
