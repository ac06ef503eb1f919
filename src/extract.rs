use log::warn;

use crate::document::DayRecord;

/// A single `(day, region, count)` observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub days_ago: u32,
    pub region: String,
    pub infected: i64,
}

/// Region codes included in the report besides the nation-wide total.
///
/// Codes are trimmed and upper-cased; the first occurrence of a code fixes its
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchList {
    codes: Vec<String>,
}

impl WatchList {
    pub fn new<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut normalised: Vec<String> = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref().trim().to_uppercase();
            if !code.is_empty() && !normalised.contains(&code) {
                normalised.push(code);
            }
        }
        Self { codes: normalised }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}

/// Today's record may still be revised upstream when its complete flag is off.
pub fn is_provisional(day: &DayRecord, days_ago: u32) -> bool {
    days_ago == 0 && !day.is_complete()
}

pub struct Extractor {
    nation_label: String,
    watch_list: WatchList,
}

impl Extractor {
    pub fn new(nation_label: impl Into<String>, watch_list: WatchList) -> Self {
        Self {
            nation_label: nation_label.into(),
            watch_list,
        }
    }

    /// Projects one day into facts: the nation first, then every watched
    /// region the day reports, in watch-list order.
    pub fn extract(&self, day: &DayRecord, days_ago: u32) -> Vec<Fact> {
        if is_provisional(day, days_ago) {
            warn!("Complete flag for current day is set to false, numbers may be provisional");
        }

        let mut facts = Vec::with_capacity(self.watch_list.codes().len() + 1);
        facts.push(Fact {
            days_ago,
            region: self.nation_label.clone(),
            infected: day.number_infected,
        });

        for code in self.watch_list.codes() {
            if let Some(infected) = day.county_count(code) {
                facts.push(Fact {
                    days_ago,
                    region: code.clone(),
                    infected,
                });
            }
        }
        facts
    }
}
