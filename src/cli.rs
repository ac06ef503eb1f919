use std::path::PathBuf;

use clap::Parser;

use crate::{config::AppConfig, render::RenderOptions};

/// See the latest data about Covid-19 in Romania.
#[derive(Debug, Parser)]
#[command(name = "covid_watch", version)]
pub struct Cli {
    /// Use the data cached by the last successful fetch instead of the network.
    #[arg(long)]
    pub cached: bool,

    /// How many days before today should be displayed.
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Display only deltas, without the full values.
    #[arg(long)]
    pub deltas: bool,

    /// Display a smaller table by omitting the horizontal rules.
    #[arg(long)]
    pub compact: bool,

    /// Region code to watch; repeat or comma separate to watch several.
    /// Replaces COVID_WATCHED_REGIONS and the built-in list.
    #[arg(long = "region", value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Where the fetched document is mirrored. Overrides COVID_CACHE_FILE.
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Print the table without terminal colours.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            deltas_only: self.deltas,
            compact: self.compact,
            color: !self.no_color,
        }
    }

    /// Applies the command line overrides on top of `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        config.override_regions(self.regions.clone());
        if let Some(cache_file) = &self.cache_file {
            config.cache_file = cache_file.clone();
        }
    }
}
