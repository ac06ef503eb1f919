use chrono::{Days, NaiveDate};

use crate::{
    document::RawDocument,
    error::{Error, Result},
    extract::{Extractor, Fact},
};

/// The calendar date `days_ago` days before `today`.
pub fn days_before(today: NaiveDate, days_ago: u32) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(u64::from(days_ago)))
        .ok_or_else(|| Error::InvalidDate(format!("{today} minus {days_ago} days")))
}

/// Extracts the `days` days preceding `today`, oldest last.
///
/// Every requested date has to be present in the document's historical data;
/// a gap is reported rather than read as zero infections.
pub fn walk(
    doc: &RawDocument,
    today: NaiveDate,
    days: u32,
    extractor: &Extractor,
) -> Result<Vec<Vec<Fact>>> {
    (1..=days)
        .map(|days_ago| {
            let date = days_before(today, days_ago)?;
            let day = doc
                .historical_day(date)
                .ok_or(Error::MissingHistory { date, days_ago })?;
            Ok(extractor.extract(day, days_ago))
        })
        .collect()
}
