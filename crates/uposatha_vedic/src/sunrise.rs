//! Sunrise and sunset by the hour-angle method.
//!
//! Starting from local mean noon, the Sun's transit is located and the
//! semi-diurnal arc is re-evaluated at each estimate of the event until the
//! step drops below a tenth of a second (Meeus ch. 15).

use std::f64::consts::{PI, TAU};

use crate::lunisolar::sun_equatorial_ra_dec;
use crate::observer::GeoLocation;
use crate::sidereal::{SIDEREAL_RATE_REV_PER_DAY, gmst_rad, local_sidereal_time_rad};

const REFINE_STEPS: usize = 5;

const TOLERANCE_DAYS: f64 = 1.0e-6;

/// Horizon dip in arcminutes per square root of elevation in metres.
const DIP_ARCMIN_PER_SQRT_M: f64 = 1.76;

/// What counts as sunrise: the solar-centre altitude at the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunriseDefinition {
    /// Centre altitude at rise/set for a sea-level observer, in degrees.
    pub centre_altitude_deg: f64,
    /// Lower the horizon by the dip seen from above sea level.
    pub elevation_dip: bool,
}

impl SunriseDefinition {
    /// Upper limb touching the horizon under standard refraction.
    pub const UPPER_LIMB: Self = Self {
        centre_altitude_deg: -50.0 / 60.0,
        elevation_dip: true,
    };

    /// Disc centre on the geometric horizon, no refraction.
    pub const GEOMETRIC_CENTRE: Self = Self {
        centre_altitude_deg: 0.0,
        elevation_dip: false,
    };

    pub fn target_altitude_deg(&self, elevation_m: f64) -> f64 {
        if self.elevation_dip && elevation_m > 0.0 {
            self.centre_altitude_deg - DIP_ARCMIN_PER_SQRT_M * elevation_m.sqrt() / 60.0
        } else {
            self.centre_altitude_deg
        }
    }
}

impl Default for SunriseDefinition {
    fn default() -> Self {
        Self::UPPER_LIMB
    }
}

/// Outcome of one solar day at a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Daylight {
    /// Sunrise and sunset as UT Julian Dates.
    Day { sunrise_jd: f64, sunset_jd: f64 },
    /// The Sun stays below the target altitude all day.
    PolarNight,
    /// The Sun stays above the target altitude all day.
    MidnightSun,
}

/// UT Julian Date of local mean noon, from 0h UT of the civil date.
pub fn local_mean_noon_jd(jd_midnight: f64, longitude_deg: f64) -> f64 {
    jd_midnight + 0.5 - longitude_deg / 360.0
}

fn wrap_pi(a: f64) -> f64 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Half the time above the target altitude, as an hour angle in radians.
fn semi_diurnal_arc(target_alt: f64, lat: f64, dec: f64) -> Result<f64, Daylight> {
    let cos_arc = (target_alt.sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    if cos_arc > 1.0 {
        Err(Daylight::PolarNight)
    } else if cos_arc < -1.0 {
        Err(Daylight::MidnightSun)
    } else {
        Ok(cos_arc.acos())
    }
}

/// Sun's local hour angle and declination at `jd`.
fn sun_hour_angle(jd: f64, lon: f64) -> (f64, f64) {
    let (ra, dec) = sun_equatorial_ra_dec(jd);
    (wrap_pi(local_sidereal_time_rad(gmst_rad(jd), lon) - ra), dec)
}

fn crossing(
    location: &GeoLocation,
    jd_noon: f64,
    target_alt: f64,
    rising: bool,
) -> Result<f64, Daylight> {
    let lat = location.latitude_deg.to_radians();
    let lon = location.longitude_deg.to_radians();
    let rate = TAU * SIDEREAL_RATE_REV_PER_DAY;
    let side = if rising { -1.0 } else { 1.0 };

    let (ha_noon, dec_noon) = sun_hour_angle(jd_noon, lon);
    let transit = jd_noon - ha_noon / rate;
    let mut jd = transit + side * semi_diurnal_arc(target_alt, lat, dec_noon)? / rate;

    for _ in 0..REFINE_STEPS {
        let (ha, dec) = sun_hour_angle(jd, lon);
        let wanted = side * semi_diurnal_arc(target_alt, lat, dec)?;
        let step = wrap_pi(wanted - ha) / rate;
        jd += step;
        if step.abs() < TOLERANCE_DAYS {
            break;
        }
    }
    Ok(jd)
}

/// Sunrise and sunset around `jd_noon` (see [`local_mean_noon_jd`]).
pub fn daylight(location: &GeoLocation, jd_noon: f64, definition: &SunriseDefinition) -> Daylight {
    let target = definition
        .target_altitude_deg(location.altitude_m)
        .to_radians();
    let events = crossing(location, jd_noon, target, true)
        .and_then(|rise| crossing(location, jd_noon, target, false).map(|set| (rise, set)));
    match events {
        Ok((sunrise_jd, sunset_jd)) => Daylight::Day {
            sunrise_jd,
            sunset_jd,
        },
        Err(polar) => polar,
    }
}
