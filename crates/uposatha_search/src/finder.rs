//! Search for Uposatha days: next/previous occurrence and range scans.
//!
//! All scans step one civil date at a time through [`classify`]; a day
//! matches when it is canonical or optional.

use chrono::NaiveDate;
use tracing::warn;
use uposatha_vedic::{GeoLocation, TithiOracle};

use crate::error::SearchError;
use crate::observance::classify;
use crate::observance_types::ObservanceDay;

/// Default bound for next/previous occurrence scans, in days.
///
/// Six canonical tithis recur within every ~15 days, so 30 is generous.
/// Exhausting the bound returns `None`, not an error.
pub const MAX_FORWARD_SCAN_DAYS: u32 = 30;

/// First Uposatha on or after `start`, within [`MAX_FORWARD_SCAN_DAYS`].
pub fn next_occurrence<O: TithiOracle + ?Sized>(
    oracle: &O,
    start: NaiveDate,
    location: &GeoLocation,
) -> Result<Option<ObservanceDay>, SearchError> {
    next_occurrence_within(oracle, start, location, MAX_FORWARD_SCAN_DAYS)
}

/// First Uposatha on or after `start`, scanning at most `max_days` dates.
pub fn next_occurrence_within<O: TithiOracle + ?Sized>(
    oracle: &O,
    start: NaiveDate,
    location: &GeoLocation,
    max_days: u32,
) -> Result<Option<ObservanceDay>, SearchError> {
    scan(oracle, start, location, max_days, NaiveDate::succ_opt)
}

/// First Uposatha strictly after `date`. Chaining this from a result never
/// returns the same date twice.
pub fn next_occurrence_after<O: TithiOracle + ?Sized>(
    oracle: &O,
    date: NaiveDate,
    location: &GeoLocation,
) -> Result<Option<ObservanceDay>, SearchError> {
    match date.succ_opt() {
        Some(start) => next_occurrence(oracle, start, location),
        None => Ok(None),
    }
}

/// Latest Uposatha on or before `start`, within [`MAX_FORWARD_SCAN_DAYS`].
pub fn prev_occurrence<O: TithiOracle + ?Sized>(
    oracle: &O,
    start: NaiveDate,
    location: &GeoLocation,
) -> Result<Option<ObservanceDay>, SearchError> {
    scan(oracle, start, location, MAX_FORWARD_SCAN_DAYS, NaiveDate::pred_opt)
}

fn scan<O: TithiOracle + ?Sized>(
    oracle: &O,
    start: NaiveDate,
    location: &GeoLocation,
    max_days: u32,
    step: fn(&NaiveDate) -> Option<NaiveDate>,
) -> Result<Option<ObservanceDay>, SearchError> {
    let mut date = Some(start);
    for _ in 0..max_days {
        let Some(d) = date else { break };
        let status = classify(oracle, d, location)?;
        if status.is_uposatha() {
            return Ok(Some(ObservanceDay { date: d, status }));
        }
        date = step(&d);
    }
    warn!(%start, max_days, "no Uposatha found within scan bound");
    Ok(None)
}

/// Lazy scan over `[start, end]` yielding each Uposatha day.
///
/// Finite and restartable: cloning yields an independent iterator from the
/// current position. The first error ends the iteration.
pub struct ObservanceIter<'a, O: ?Sized> {
    oracle: &'a O,
    location: GeoLocation,
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl<O: ?Sized> Clone for ObservanceIter<'_, O> {
    fn clone(&self) -> Self {
        Self {
            oracle: self.oracle,
            location: self.location,
            next: self.next,
            end: self.end,
        }
    }
}

impl<O: TithiOracle + ?Sized> Iterator for ObservanceIter<'_, O> {
    type Item = Result<ObservanceDay, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let date = self.next.filter(|d| *d <= self.end)?;
            self.next = date.succ_opt();
            match classify(self.oracle, date, &self.location) {
                Ok(status) if status.is_uposatha() => {
                    return Some(Ok(ObservanceDay { date, status }));
                }
                Ok(_) => {}
                Err(e) => {
                    self.next = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// All Uposatha days in `[start, end]`, inclusive. Empty when `end < start`.
pub fn occurrences_in_range<'a, O: TithiOracle + ?Sized>(
    oracle: &'a O,
    start: NaiveDate,
    end: NaiveDate,
    location: &GeoLocation,
) -> ObservanceIter<'a, O> {
    ObservanceIter {
        oracle,
        location: *location,
        next: Some(start),
        end,
    }
}

/// Uposatha days of a Gregorian month (`month` 1..=12).
pub fn month_observances<O: TithiOracle + ?Sized>(
    oracle: &O,
    year: i32,
    month: u32,
    location: &GeoLocation,
) -> Result<Vec<ObservanceDay>, SearchError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(SearchError::InvalidRange("invalid year or month"))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_first
        .and_then(|d| d.pred_opt())
        .ok_or(SearchError::InvalidRange("month end out of calendar range"))?;
    occurrences_in_range(oracle, first, last, location).collect()
}

/// Uposatha days of a Gregorian year. Expect about 72-76.
pub fn year_observances<O: TithiOracle + ?Sized>(
    oracle: &O,
    year: i32,
    location: &GeoLocation,
) -> Result<Vec<ObservanceDay>, SearchError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(SearchError::InvalidRange("year out of calendar range"))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or(SearchError::InvalidRange("year out of calendar range"))?;
    occurrences_in_range(oracle, first, last, location).collect()
}
