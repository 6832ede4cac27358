//! Finder results against the almanac oracle for Gaya, Bihar in 2024.

use chrono::{Datelike, NaiveDate};
use uposatha_search::{
    MoonPhase, month_observances, next_occurrence, next_occurrence_after, year_observances,
};
use uposatha_vedic::{AlmanacOracle, GeoLocation};

fn gaya() -> GeoLocation {
    GeoLocation::new(24.7914, 85.0002, 111.0)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// NASA: New Moon 2024-Jan-11, Full Moon 2024-Jan-25.
#[test]
fn january_2024_contains_new_and_full_moon() {
    let days = month_observances(&AlmanacOracle::default(), 2024, 1, &gaya()).unwrap();
    let new = days.iter().find(|d| d.date == date(2024, 1, 11)).unwrap();
    assert_eq!(new.status.moon_phase(), Some(MoonPhase::New));
    let full = days.iter().find(|d| d.date == date(2024, 1, 25)).unwrap();
    assert_eq!(full.status.moon_phase(), Some(MoonPhase::Full));
    assert!((5..=8).contains(&days.len()), "{} days", days.len());
}

#[test]
fn year_2024_count_and_order() {
    let days = year_observances(&AlmanacOracle::default(), 2024, &gaya()).unwrap();
    assert!((68..=82).contains(&days.len()), "{} days", days.len());
    assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    assert!(days.iter().all(|d| d.date.year() == 2024));
    assert!(days.iter().all(|d| d.status.is_uposatha()));
}

#[test]
fn next_occurrence_found_within_bound() {
    let oracle = AlmanacOracle::default();
    let first = next_occurrence(&oracle, date(2024, 1, 12), &gaya())
        .unwrap()
        .unwrap();
    assert!(first.date > date(2024, 1, 12) && first.date <= date(2024, 1, 20));
    let second = next_occurrence_after(&oracle, first.date, &gaya())
        .unwrap()
        .unwrap();
    assert!(second.date > first.date);
}
