// Library interface for sitegrab
// This allows integration tests to access the modules

pub mod error;
pub mod metrics;
pub mod network;
pub mod options;
pub mod prettify;
pub mod products;
pub mod report;
pub mod sitemap;
pub mod storage;
pub mod utils;
