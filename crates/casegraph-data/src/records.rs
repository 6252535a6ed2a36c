//! Row types for the upstream feed and the per-country daily table.

use serde::{Deserialize, Serialize};

/// One upstream observation for one country on one date, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Country name as keyed in the feed.
    pub country: String,
    /// Date as sent upstream; may be unpadded (`2020-1-22`).
    pub date: String,
    /// Cumulative confirmed cases.
    pub confirmed: i64,
    /// Cumulative deaths.
    pub deaths: i64,
    /// Cumulative recoveries.
    pub recovered: i64,
}

/// One day of a country's series, in output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRow {
    /// Country name.
    pub country: String,
    /// Canonical `YYYY-MM-DD` date.
    pub date: String,
    /// Cumulative confirmed cases.
    pub total: i64,
    /// Cases added since the previous row (`total` for the first row).
    pub new: i64,
    /// Cumulative deaths.
    pub deaths: i64,
    /// Cumulative recoveries.
    pub discharged: i64,
    /// `total - discharged - deaths`.
    pub active: i64,
}

/// Chronological daily rows for exactly one country, addressed by dense 0-based index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySeries {
    country: String,
    rows: Vec<CountryRow>,
}

impl CountrySeries {
    pub(crate) fn new(country: String, rows: Vec<CountryRow>) -> Self {
        Self { country, rows }
    }

    /// Country this series belongs to.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// All rows in order.
    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the series holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Last row, carrying the latest value of each metric.
    pub fn latest(&self) -> Option<&CountryRow> {
        self.rows.last()
    }

    /// Canonical date of the first row.
    pub fn first_date(&self) -> Option<&str> {
        self.rows.first().map(|row| row.date.as_str())
    }

    /// Canonical date of the last row.
    pub fn last_date(&self) -> Option<&str> {
        self.rows.last().map(|row| row.date.as_str())
    }

    /// Row index of an exact canonical date.
    pub fn index_of(&self, date: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.date == date)
    }

    /// `total` column.
    pub fn totals(&self) -> Vec<i64> {
        self.column(|row| row.total)
    }

    /// Extract any integer column.
    pub fn column(&self, pick: impl Fn(&CountryRow) -> i64) -> Vec<i64> {
        self.rows.iter().map(pick).collect()
    }
}
