use crate::{
    error::{Error, Result},
    extract::Fact,
};

/// Facts grouped by region, regions in first-seen order, each series ordered
/// from today backwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSeries {
    entries: Vec<(String, Vec<Fact>)>,
}

impl RegionSeries {
    pub fn get(&self, region: &str) -> Option<&[Fact]> {
        self.entries
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, facts)| facts.as_slice())
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Fact])> {
        self.entries
            .iter()
            .map(|(name, facts)| (name.as_str(), facts.as_slice()))
    }

    /// Counts only, today first.
    pub fn counts(&self, region: &str) -> Option<Vec<i64>> {
        self.get(region)
            .map(|facts| facts.iter().map(|f| f.infected).collect())
    }
}

/// Pivots per-day facts into per-region series.
///
/// Today's facts fix the set of regions, each named once. A historical fact
/// for any other region, or a today region absent from a historical day, is an
/// error.
pub fn reshape(today_facts: Vec<Fact>, history_facts: Vec<Vec<Fact>>) -> Result<RegionSeries> {
    let expected_len = history_facts.len() + 1;
    let mut entries: Vec<(String, Vec<Fact>)> = Vec::with_capacity(today_facts.len());
    for fact in today_facts {
        if entries.iter().any(|(name, _)| *name == fact.region) {
            return Err(Error::DuplicateRegion {
                region: fact.region,
            });
        }
        let mut facts = Vec::with_capacity(expected_len);
        let region = fact.region.clone();
        facts.push(fact);
        entries.push((region, facts));
    }

    for (index, day) in history_facts.into_iter().enumerate() {
        for fact in day {
            let Some((_, facts)) = entries.iter_mut().find(|(name, _)| *name == fact.region) else {
                return Err(Error::UnknownRegion {
                    region: fact.region,
                    days_ago: fact.days_ago,
                });
            };
            facts.push(fact);
        }

        let seen = index + 2;
        for (region, facts) in &entries {
            if facts.len() > seen {
                return Err(Error::DuplicateRegion {
                    region: region.clone(),
                });
            }
            if facts.len() < seen {
                return Err(Error::IncompleteSeries {
                    region: region.clone(),
                    days_ago: facts.last().map_or(0, |f| f.days_ago) + 1,
                });
            }
        }
    }

    Ok(RegionSeries { entries })
}
