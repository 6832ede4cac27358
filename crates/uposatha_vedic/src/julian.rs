//! Julian Date conversions for civil dates and UTC instants.
//!
//! Gregorian calendar only (Meeus, Astronomical Algorithms, ch. 7).
//! The almanac works in UT; the ~70 s TT-UT offset is below its precision.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date for a Gregorian calendar date with fractional day.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day_frac + b
        - 1524.5
}

/// Gregorian calendar date `(year, month, day_frac)` for a Julian Date.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();
    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date at 0h UT of a civil date.
pub fn date_to_jd_midnight(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), date.day() as f64)
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// UTC instant for a Julian Date, rounded to the millisecond.
///
/// `None` when the instant is not finite or falls outside chrono's range.
pub fn jd_to_utc(jd: f64) -> Option<DateTime<Utc>> {
    let millis = ((jd - J2000_JD) * SECONDS_PER_DAY * 1000.0).round();
    if !millis.is_finite() {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    j2000_utc().checked_add_signed(delta)
}

/// Julian Date for a UTC instant.
pub fn utc_to_jd(instant: DateTime<Utc>) -> f64 {
    let delta = instant - j2000_utc();
    J2000_JD + delta.num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

fn j2000_utc() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(946_728_000, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 Oct 4.81 -> JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn calendar_round_trip() {
        let jd = calendar_to_jd(2024, 2, 29.25);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 2));
        assert!((d - 29.25).abs() < 1e-6);
    }

    #[test]
    fn midnight_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let jd = date_to_jd_midnight(date);
        assert!((jd - 2_460_334.5).abs() < 1e-9);
    }

    #[test]
    fn utc_round_trip() {
        let t = DateTime::<Utc>::from_timestamp(1_706_200_000, 0).unwrap();
        let back = jd_to_utc(utc_to_jd(t)).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn j2000_instant() {
        let t = jd_to_utc(J2000_JD).unwrap();
        assert_eq!(t.to_rfc3339(), "2000-01-01T12:00:00+00:00");
    }

    #[test]
    fn out_of_range_instant_is_none() {
        let past_max = date_to_jd_midnight(NaiveDate::MAX) + 2.0;
        assert_eq!(jd_to_utc(past_max), None);
        assert_eq!(jd_to_utc(f64::NAN), None);
        assert_eq!(jd_to_utc(1e300), None);
    }
}
