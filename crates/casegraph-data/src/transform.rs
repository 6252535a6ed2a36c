//! Reshapes the flattened feed into one country's daily table.

use crate::records::{CountryRow, CountrySeries, RawRecord};
use casegraph_common::{format_date, parse_date, CaseGraphError, Result};
use tracing::{debug, info};

/// Normalize a feed date to canonical `YYYY-MM-DD`.
///
/// Canonical input comes back unchanged.
pub fn canonicalize_date(value: &str) -> std::result::Result<String, chrono::ParseError> {
    parse_date(value).map(format_date)
}

/// Filter `records` to `country` and derive the per-day columns.
///
/// Input order is kept. Dates must strictly increase; a duplicate or
/// backwards step aborts with [`CaseGraphError::UnorderedDates`].
pub fn transform(records: &[RawRecord], country: &str) -> Result<CountrySeries> {
    let matching: Vec<&RawRecord> = records.iter().filter(|r| r.country == country).collect();
    if matching.is_empty() {
        return Err(CaseGraphError::unknown_country(country));
    }
    debug!("{} of {} records match {}", matching.len(), records.len(), country);

    let mut rows: Vec<CountryRow> = Vec::with_capacity(matching.len());
    let mut previous: Option<(String, i64)> = None;

    for (row, record) in matching.into_iter().enumerate() {
        let date = canonicalize_date(&record.date).map_err(|e| CaseGraphError::DateParse {
            value: record.date.clone(),
            country: country.to_string(),
            row,
            source: Some(Box::new(e)),
        })?;

        // Canonical dates order lexicographically.
        let previous_total = match previous {
            Some((previous_date, _)) if date <= previous_date => {
                return Err(CaseGraphError::UnorderedDates {
                    country: country.to_string(),
                    row,
                    previous: previous_date,
                    date,
                });
            }
            Some((_, total)) => total,
            None => 0,
        };

        let out_of_range = || {
            CaseGraphError::parse(format!(
                "Counts for {country} at row {row} ({date}) are out of range"
            ))
        };
        let new = record.confirmed.checked_sub(previous_total).ok_or_else(out_of_range)?;
        let active = record
            .confirmed
            .checked_sub(record.recovered)
            .and_then(|rest| rest.checked_sub(record.deaths))
            .ok_or_else(out_of_range)?;

        rows.push(CountryRow {
            country: country.to_string(),
            date: date.clone(),
            total: record.confirmed,
            new,
            deaths: record.deaths,
            discharged: record.recovered,
            active,
        });
        previous = Some((date, record.confirmed));
    }

    let series = CountrySeries::new(country.to_string(), rows);
    info!(
        country,
        rows = series.len(),
        first = series.first_date().unwrap_or_default(),
        last = series.last_date().unwrap_or_default(),
        "Built country series"
    );
    Ok(series)
}
