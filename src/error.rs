use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to the data endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint {url} returned status code {status}")]
    Transport { status: StatusCode, url: String },

    #[error("could not read cache file {}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write cache file {}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed statistics document from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid calendar date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no historical data for {date} ({days_ago} days ago)")]
    MissingHistory { date: NaiveDate, days_ago: u32 },

    #[error("region {region} appears more than once in today's data")]
    DuplicateRegion { region: String },

    #[error("region {region} appears {days_ago} days ago but not in today's data")]
    UnknownRegion { region: String, days_ago: u32 },

    #[error("region {region} has no entry {days_ago} days ago")]
    IncompleteSeries { region: String, days_ago: u32 },
}
