use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::extract::WatchList;

pub const DEFAULT_DATA_URL: &str = "https://d35p9e4fm9h3wo.cloudfront.net/latestData.json";
pub const DEFAULT_CACHE_FILE: &str = "./latest_data.json";
pub const DEFAULT_NATION_LABEL: &str = "Romania";

/// Counties shown besides the nation-wide numbers unless overridden.
pub const DEFAULT_WATCHED_REGIONS: [&str; 42] = [
    "AB", "AR", "AG", "BC", "BH", "BN", "BT", "BV", "BR", "BZ", "CS", "CL", "CJ", "CT", "CV", "DB",
    "DJ", "GL", "GR", "GJ", "HR", "HD", "IL", "IS", "IF", "MM", "MH", "MS", "NT", "OT", "PH", "SM",
    "SJ", "SB", "SV", "TR", "TM", "TL", "VS", "VL", "VN", "B",
];

/// The env config env vars read at startup. All of them are optional.
#[derive(Debug, Deserialize)]
pub struct AppEnv {
    #[serde(default = "default_data_url")]
    pub covid_data_url: String,
    #[serde(default = "default_cache_file")]
    pub covid_cache_file: PathBuf,
    /// Comma separated region codes.
    #[serde(default)]
    pub covid_watched_regions: Option<Vec<String>>,
    #[serde(default = "default_nation_label")]
    pub covid_nation_label: String,
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

fn default_cache_file() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_FILE)
}

fn default_nation_label() -> String {
    DEFAULT_NATION_LABEL.to_string()
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_url: String,
    pub cache_file: PathBuf,
    pub watched_regions: Vec<String>,
    pub nation_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            cache_file: default_cache_file(),
            watched_regions: DEFAULT_WATCHED_REGIONS.iter().map(|s| s.to_string()).collect(),
            nation_label: default_nation_label(),
        }
    }
}

impl AppConfig {
    pub fn new() -> anyhow::Result<Self> {
        let app_env = AppEnv::load_from_env()?;
        Ok(Self::from(app_env))
    }

    /// Replaces the configured regions when `regions` is non-empty.
    pub fn override_regions(&mut self, regions: Vec<String>) {
        if !regions.is_empty() {
            self.watched_regions = regions;
        }
    }

    pub fn watch_list(&self) -> WatchList {
        WatchList::new(&self.watched_regions)
    }
}

impl From<AppEnv> for AppConfig {
    fn from(app_env: AppEnv) -> Self {
        let defaults = Self::default();
        Self {
            data_url: app_env.covid_data_url,
            cache_file: app_env.covid_cache_file,
            watched_regions: app_env
                .covid_watched_regions
                .filter(|regions| regions.iter().any(|r| !r.trim().is_empty()))
                .unwrap_or(defaults.watched_regions),
            nation_label: app_env.covid_nation_label,
        }
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
