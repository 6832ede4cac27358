//! Self-contained tithi oracle built on the low-precision almanac.
//!
//! The civil date is taken as the observer's local mean solar day: sunrise
//! is searched around local mean noon, so no timezone table is needed.

use chrono::NaiveDate;
use tracing::trace;

use crate::error::OracleError;
use crate::julian::{date_to_jd_midnight, jd_to_utc};
use crate::lunisolar::elongation_deg;
use crate::observer::GeoLocation;
use crate::oracle::{TithiOracle, TithiSample};
use crate::sunrise::{Daylight, SunriseDefinition, daylight, local_mean_noon_jd};
use crate::tithi::tithi_from_elongation;

/// Deterministic tithi oracle using analytical Sun/Moon series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlmanacOracle {
    pub sunrise: SunriseDefinition,
}

impl AlmanacOracle {
    pub fn new(sunrise: SunriseDefinition) -> Self {
        Self { sunrise }
    }

    /// Sunrise and sunset (UT JD) for a civil date.
    pub fn sun_events(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
    ) -> Result<(f64, f64), OracleError> {
        location.validate()?;
        let noon = local_mean_noon_jd(date_to_jd_midnight(date), location.longitude_deg);
        match daylight(location, noon, &self.sunrise) {
            Daylight::Day {
                sunrise_jd,
                sunset_jd,
            } => Ok((sunrise_jd, sunset_jd)),
            Daylight::PolarNight => Err(OracleError::AstronomicalIndeterminate(
                "sun never rises on this date",
            )),
            Daylight::MidnightSun => Err(OracleError::AstronomicalIndeterminate(
                "sun never sets on this date",
            )),
        }
    }
}

impl TithiOracle for AlmanacOracle {
    fn panchangam(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
    ) -> Result<TithiSample, OracleError> {
        let (rise_jd, set_jd) = self.sun_events(date, location)?;
        let pos = tithi_from_elongation(elongation_deg(rise_jd));
        trace!(%date, tithi = pos.tithi_index, "almanac tithi at sunrise");
        let instant = |jd| {
            jd_to_utc(jd).ok_or_else(|| {
                OracleError::Unavailable(format!("sun event for {date} outside representable time"))
            })
        };
        Ok(TithiSample::new(pos.tithi, instant(rise_jd)?, instant(set_jd)?))
    }
}
