use chrono::{DateTime, Local, NaiveDate};

use crate::{
    document::RawDocument,
    error::Result,
    extract::{self, Extractor},
    history,
    render::{self, RenderOptions},
    reshape::{self, RegionSeries},
};

/// Everything needed to print one comparison table.
#[derive(Debug, Clone)]
pub struct Report {
    pub today: NaiveDate,
    pub days: u32,
    pub last_updated: Option<DateTime<Local>>,
    /// Today's record is flagged as not yet complete.
    pub provisional: bool,
    pub series: RegionSeries,
}

impl Report {
    /// Extracts today and the `days` preceding days and pivots them per region.
    /// Fails before anything is rendered if any requested day is unusable.
    pub fn build(doc: &RawDocument, days: u32, extractor: &Extractor) -> Result<Self> {
        let today = doc.today()?;
        let today_facts = extractor.extract(&doc.current_day_stats, 0);
        let history_facts = history::walk(doc, today, days, extractor)?;
        let series = reshape::reshape(today_facts, history_facts)?;
        Ok(Self {
            today,
            days,
            last_updated: doc.last_updated(),
            provisional: extract::is_provisional(&doc.current_day_stats, 0),
            series,
        })
    }

    pub fn render(&self, options: RenderOptions) -> Result<String> {
        render::render(&self.series, self.days, self.today, options)
    }
}
