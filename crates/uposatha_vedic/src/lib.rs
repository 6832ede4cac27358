//! Lunar-day primitives for the Uposatha observance engine.
//!
//! This crate provides:
//! - Tithi and paksha enumeration and elongation-to-tithi mapping
//! - The `TithiOracle` contract (sunrise-anchored tithi per civil date)
//! - Sunrise/sunset via the hour-angle method, with polar detection
//! - `AlmanacOracle`, a self-contained oracle on low-precision Sun/Moon series
//!
//! All implementations derive from public astronomical formulas.

pub mod almanac;
pub mod error;
pub mod julian;
pub mod lunisolar;
pub mod observer;
pub mod oracle;
pub mod sidereal;
pub mod sunrise;
pub mod tithi;

pub use almanac::AlmanacOracle;
pub use error::OracleError;
pub use julian::{
    J2000_JD, calendar_to_jd, date_to_jd_midnight, jd_to_calendar, jd_to_centuries, jd_to_utc,
    utc_to_jd,
};
pub use lunisolar::{elongation_deg, moon_apparent_longitude_deg, sun_apparent_longitude_deg};
pub use observer::GeoLocation;
pub use oracle::{TithiOracle, TithiSample};
pub use sunrise::{Daylight, SunriseDefinition, daylight, local_mean_noon_jd};
pub use tithi::{
    ALL_TITHIS, Paksha, TITHI_COUNT, TITHI_SEGMENT_DEG, Tithi, TithiPosition, forward_distance,
    tithi_from_elongation,
};
