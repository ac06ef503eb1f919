use chrono::NaiveDate;
use colored::Colorize;

use crate::{
    document::format_date,
    error::Result,
    history::days_before,
    reshape::RegionSeries,
};

const CORNER: &str = "\\";
const OLDEST_MARKER: &str = " (/)";
const TODAY_COLUMN: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Leave the absolute counts out, show only the deltas.
    pub deltas_only: bool,
    /// Skip the rules between data rows.
    pub compact: bool,
    /// Highlight today's column in cyan and the deltas in red. `colored`
    /// still drops the escapes when `NO_COLOR` is set.
    pub color: bool,
}

/// Signed delta suffix, e.g. `" (+20)"`, `" (+0)"`, `" (-3)"`.
pub fn delta_suffix(newer: i64, older: i64) -> String {
    let delta = i128::from(newer) - i128::from(older);
    format!(" ({delta:+})")
}

/// One cell: the count followed by its change versus the next older day,
/// or the oldest-day marker when there is none.
pub fn format_cell(count: i64, older: Option<i64>, deltas_only: bool) -> String {
    Cell::count(count, older, deltas_only).text()
}

/// Cell text split where the styling changes.
struct Cell {
    value: String,
    suffix: String,
    delta: bool,
}

impl Cell {
    fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            suffix: String::new(),
            delta: false,
        }
    }

    fn count(count: i64, older: Option<i64>, deltas_only: bool) -> Self {
        let value = if deltas_only {
            String::new()
        } else {
            count.to_string()
        };
        match older {
            Some(older) => Self {
                value,
                suffix: delta_suffix(count, older),
                delta: true,
            },
            None => Self {
                value,
                suffix: OLDEST_MARKER.to_string(),
                delta: false,
            },
        }
    }

    fn width(&self) -> usize {
        self.value.chars().count() + self.suffix.chars().count()
    }

    fn text(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }

    fn paint(&self, highlight: bool) -> String {
        let value = if highlight {
            self.value.cyan().to_string()
        } else {
            self.value.clone()
        };
        let suffix = if self.delta {
            self.suffix.red().to_string()
        } else if highlight {
            self.suffix.cyan().to_string()
        } else {
            self.suffix.clone()
        };
        value + &suffix
    }
}

fn header(today: NaiveDate, days: u32) -> Result<Vec<Cell>> {
    let mut header = Vec::with_capacity(days as usize + 2);
    header.push(Cell::plain(CORNER));
    header.push(Cell::plain(format_date(today)));
    for days_ago in 1..=days {
        header.push(Cell::plain(format_date(days_before(today, days_ago)?)));
    }
    Ok(header)
}

fn row(region: &str, counts: &[i64], deltas_only: bool) -> Vec<Cell> {
    let mut row = Vec::with_capacity(counts.len() + 1);
    row.push(Cell::plain(region));
    for (index, &count) in counts.iter().enumerate() {
        row.push(Cell::count(count, counts.get(index + 1).copied(), deltas_only));
    }
    row
}

fn rule(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

// Padding comes from the unstyled width so escapes never shift the grid.
fn line(cells: &[Cell], widths: &[usize], color: bool) -> String {
    let mut line = String::from("|");
    for (index, &width) in widths.iter().enumerate() {
        let (text, used) = match cells.get(index) {
            Some(cell) if color => (cell.paint(index == TODAY_COLUMN), cell.width()),
            Some(cell) => (cell.text(), cell.width()),
            None => (String::new(), 0),
        };
        line.push(' ');
        line.push_str(&text);
        line.push_str(&" ".repeat(width.saturating_sub(used)));
        line.push_str(" |");
    }
    line
}

/// Renders the series as a left aligned ASCII grid, one row per region and
/// one column per day starting with `today`.
pub fn render(
    series: &RegionSeries,
    days: u32,
    today: NaiveDate,
    options: RenderOptions,
) -> Result<String> {
    let header = header(today, days)?;
    let rows: Vec<Vec<Cell>> = series
        .iter()
        .map(|(region, facts)| {
            let counts: Vec<i64> = facts.iter().map(|f| f.infected).collect();
            row(region, &counts, options.deltas_only)
        })
        .collect();

    let columns = rows.iter().map(Vec::len).fold(header.len(), usize::max);
    let mut widths = vec![0; columns];
    for cells in std::iter::once(&header).chain(rows.iter()) {
        for (index, cell) in cells.iter().enumerate() {
            widths[index] = widths[index].max(cell.width());
        }
    }

    let separator = rule(&widths);
    let mut out = Vec::with_capacity(rows.len() * 2 + 3);
    out.push(separator.clone());
    out.push(line(&header, &widths, options.color));
    out.push(separator.clone());
    for (index, cells) in rows.iter().enumerate() {
        out.push(line(cells, &widths, options.color));
        if !options.compact || index + 1 == rows.len() {
            out.push(separator.clone());
        }
    }
    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract::Fact, reshape::reshape};

    fn series(rows: &[(&str, Vec<i64>)]) -> RegionSeries {
        let days = rows.first().map_or(0, |(_, counts)| counts.len());
        let per_day = (0..days)
            .map(|days_ago| {
                rows.iter()
                    .map(|(region, counts)| Fact {
                        days_ago: days_ago as u32,
                        region: region.to_string(),
                        infected: counts[days_ago],
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let mut per_day = per_day.into_iter();
        let today = per_day.next().unwrap_or_default();
        reshape(today, per_day.collect()).unwrap()
    }

    fn date(raw: &str) -> NaiveDate {
        crate::document::parse_date(raw).unwrap()
    }

    fn texts(cells: &[Cell]) -> Vec<String> {
        cells.iter().map(Cell::text).collect()
    }

    fn strip_escapes(styled: &str) -> String {
        let mut plain = String::with_capacity(styled.len());
        let mut chars = styled.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                plain.push(c);
            }
        }
        plain
    }

    #[test]
    fn deltas_are_newer_minus_older() {
        let cells = texts(&row("CJ", &[100, 80, 80], false));
        assert_eq!(cells, ["CJ", "100 (+20)", "80 (+0)", "80 (/)"]);
    }

    #[test]
    fn extreme_counts_do_not_overflow() {
        assert_eq!(delta_suffix(i64::MAX, i64::MIN), format!(" (+{})", u64::MAX));
        assert_eq!(delta_suffix(i64::MIN, i64::MAX), format!(" (-{})", u64::MAX));
    }

    #[test]
    fn decreases_keep_their_sign() {
        let cells = texts(&row("CJ", &[80, 100], false));
        assert_eq!(cells[1], "80 (-20)");
        assert!(!cells[1].contains("+-"));
    }

    #[test]
    fn deltas_only_drops_counts() {
        assert_eq!(format_cell(100, Some(80), true), " (+20)");
        assert_eq!(format_cell(80, None, true), " (/)");
    }

    #[test]
    fn renders_full_grid() {
        let series = series(&[("Romania", vec![500, 480]), ("BN", vec![10, 8])]);
        let table = render(&series, 1, date("2020-06-01"), RenderOptions::default()).unwrap();
        let expected = "\
+---------+------------+------------+
| \\       | 2020-06-01 | 2020-05-31 |
+---------+------------+------------+
| Romania | 500 (+20)  | 480 (/)    |
+---------+------------+------------+
| BN      | 10 (+2)    | 8 (/)      |
+---------+------------+------------+";
        assert_eq!(table, expected);
    }

    #[test]
    fn compact_omits_row_rules() {
        let series = series(&[("Romania", vec![500, 480]), ("BN", vec![10, 8]), ("CJ", vec![20, 18])]);
        let options = RenderOptions {
            compact: true,
            ..RenderOptions::default()
        };
        let table = render(&series, 1, date("2020-06-01"), options).unwrap();
        let rules = table.lines().filter(|l| l.starts_with('+')).count();
        assert_eq!(rules, 3);
        assert_eq!(table.lines().count(), 7);
    }

    #[test]
    fn colored_table_keeps_the_plain_layout() {
        colored::control::set_override(true);
        let series = series(&[("Romania", vec![500, 480, 470]), ("BN", vec![10, 8, 8])]);
        let plain = render(&series, 2, date("2020-06-01"), RenderOptions::default()).unwrap();
        let options = RenderOptions {
            color: true,
            ..RenderOptions::default()
        };
        let styled = render(&series, 2, date("2020-06-01"), options).unwrap();
        colored::control::unset_override();

        assert!(styled.contains("\u{1b}[36m2020-06-01"));
        assert!(styled.contains("\u{1b}[36m500"));
        assert!(styled.contains("\u{1b}[31m (+10)"));
        assert!(!styled.contains("\u{1b}[31m (/)"));
        assert_eq!(strip_escapes(&styled), plain);
    }

    #[test]
    fn headers_count_back_from_today() {
        let series = series(&[("Romania", vec![3, 2, 1, 0])]);
        let table = render(&series, 3, date("2021-01-02"), RenderOptions::default()).unwrap();
        let header = table.lines().nth(1).unwrap();
        assert!(header.contains("2021-01-02"));
        assert!(header.contains("2021-01-01"));
        assert!(header.contains("2020-12-31"));
        assert!(header.contains("2020-12-30"));
    }
}
