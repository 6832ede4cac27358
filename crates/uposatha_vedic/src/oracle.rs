//! The tithi oracle: sunrise-anchored lunar day for a civil date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::observer::GeoLocation;
use crate::tithi::{Paksha, Tithi};

/// Tithi prevailing at sunrise on an observer-local civil date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TithiSample {
    /// Udaya tithi (tithi at sunrise).
    pub tithi: Tithi,
    /// 0-based tithi index (0..=29).
    pub tithi_index: u8,
    pub paksha: Paksha,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl TithiSample {
    /// Build a sample, deriving index and paksha from `tithi`.
    pub fn new(tithi: Tithi, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self {
            tithi,
            tithi_index: tithi.index(),
            paksha: tithi.paksha(),
            sunrise,
            sunset,
        }
    }
}

/// Source of sunrise-anchored tithis.
///
/// Implementations must be deterministic for fixed inputs and callable for
/// arbitrary past and future dates.
pub trait TithiOracle {
    /// Tithi at sunrise on `date` for `location`.
    fn panchangam(&self, date: NaiveDate, location: &GeoLocation)
    -> Result<TithiSample, OracleError>;
}

impl<T: TithiOracle + ?Sized> TithiOracle for &T {
    fn panchangam(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
    ) -> Result<TithiSample, OracleError> {
        (**self).panchangam(date, location)
    }
}

impl<T: TithiOracle + ?Sized> TithiOracle for Box<T> {
    fn panchangam(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
    ) -> Result<TithiSample, OracleError> {
        (**self).panchangam(date, location)
    }
}
