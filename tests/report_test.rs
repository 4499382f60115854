use sitegrab::error::Error;
use sitegrab::metrics::{Entry, Metrics};
use sitegrab::prettify::PrettifyOutcome;
use sitegrab::products::{FetchOutcome, ProductRecord};
use sitegrab::report::Report;
use sitegrab::sitemap::SitemapSource;
use std::path::PathBuf;
use std::time::Duration;

fn record(name: &str) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        json_url: format!("https://site.com/products/{}.json", name),
        path: PathBuf::from(format!("products/{}.json", name)),
        size: 42,
    }
}

#[test]
fn test_metrics_table_contains_all_rows() {
    let metrics = Metrics(vec![
        Entry {
            label: "Product URLs",
            value: "12".to_string(),
        },
        Entry {
            label: "Fetch Errors",
            value: "1".to_string(),
        },
    ]);

    let table = metrics.build_table();
    let lines: Vec<&str> = table.lines().collect();

    // Top border, two rows, bottom border.
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with('┌'));
    assert!(lines[1].contains("Product URLs") && lines[1].contains("12"));
    assert!(lines[2].contains("Fetch Errors") && lines[2].contains('1'));
    assert!(lines[3].starts_with('└'));
}

#[test]
fn test_report_metrics_with_fetch_and_prettify() {
    let report = Report {
        sitemap_url: "https://site.com/sitemap_products_1.xml".to_string(),
        sitemap_source: SitemapSource::Network,
        urls_found: 3,
        fetch: Some(FetchOutcome {
            saved: vec![record("a"), record("b")],
            failed: vec![(
                "https://site.com/".to_string(),
                Error::ProductName("https://site.com/".to_string()),
            )],
        }),
        prettify: Some(PrettifyOutcome {
            written: vec![PathBuf::from("products/a-pretty.json")],
            failed: Vec::new(),
        }),
        total_time: Duration::from_millis(1500),
    };

    let metrics = report.metrics();
    assert_eq!(metrics.value_of("Sitemap Source"), Some("network"));
    assert_eq!(metrics.value_of("Product URLs"), Some("3"));
    assert_eq!(metrics.value_of("Products Saved"), Some("2"));
    assert_eq!(metrics.value_of("Fetch Errors"), Some("1"));
    assert_eq!(metrics.value_of("Prettified"), Some("1"));
    assert_eq!(metrics.value_of("Prettify Errors"), Some("0"));
    assert_eq!(metrics.value_of("Elapsed Time"), Some("1500.00ms"));
}

#[test]
fn test_report_metrics_skipped_stages() {
    let report = Report {
        sitemap_url: "https://site.com/sitemap_products_1.xml".to_string(),
        sitemap_source: SitemapSource::Cache,
        urls_found: 0,
        fetch: None,
        prettify: None,
        total_time: Duration::ZERO,
    };

    let metrics = report.metrics();
    assert_eq!(metrics.value_of("Sitemap Source"), Some("cache"));
    assert_eq!(metrics.value_of("Products Saved"), Some("skipped"));
    assert_eq!(metrics.value_of("Prettified"), Some("skipped"));
    assert_eq!(metrics.value_of("Missing"), None);
}
