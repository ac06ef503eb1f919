use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The daily statistics document as served by the endpoint.
///
/// Only the fields the report needs are typed; everything else is carried in
/// `other` so that writing the document back out mirrors the upstream response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    // Upstream spelling.
    #[serde(rename = "lasUpdatedOn")]
    pub last_updated_on: i64,
    #[serde(rename = "currentDayStats")]
    pub current_day_stats: DayRecord,
    #[serde(rename = "historicalData", default)]
    pub historical_data: BTreeMap<String, DayRecord>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One day's cumulative infection counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(rename = "numberInfected")]
    pub number_infected: i64,
    #[serde(
        rename = "countyInfectionsNumbers",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub county_infections: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(
        rename = "parsedOnString",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parsed_on: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DayRecord {
    /// Historical records usually omit the flag; they count as complete.
    pub fn is_complete(&self) -> bool {
        self.complete.unwrap_or(true)
    }

    pub fn county_count(&self, code: &str) -> Option<i64> {
        self.county_infections.as_ref()?.get(code).copied()
    }
}

impl RawDocument {
    /// Parses a document, naming `origin` (a URL or path) in the error.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// The document's own notion of "today", taken from the current day record.
    pub fn today(&self) -> Result<NaiveDate> {
        let raw = self
            .current_day_stats
            .parsed_on
            .as_deref()
            .ok_or_else(|| Error::InvalidDate(String::new()))?;
        parse_date(raw)
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp(self.last_updated_on, 0).map(|utc| utc.with_timezone(&Local))
    }

    pub fn historical_day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.historical_data.get(&format_date(date))
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
