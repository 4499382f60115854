use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while grabbing a sitemap and its products.
///
/// Whether an error is fatal depends on the stage that produced it: a sitemap
/// failure stops the run, a product or prettify failure only skips that item.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{}' exists and is not a pretty copy, refusing to overwrite it", .0.display())]
    Collision(PathBuf),

    #[error("cannot derive a product name from '{0}'")]
    ProductName(String),

    #[error("{0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
