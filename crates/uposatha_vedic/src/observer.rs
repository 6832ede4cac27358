//! The observer: where on Earth sunrise is taken.

use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Geodetic position of the observer. Degrees, east and north positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Elevation above sea level in metres; lowers the visible horizon.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Reject coordinates no oracle can answer for.
    pub fn validate(&self) -> Result<(), OracleError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(OracleError::InvalidLocation("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(OracleError::InvalidLocation(
                "longitude must be within [-180, 180]",
            ));
        }
        if !self.altitude_m.is_finite() {
            return Err(OracleError::InvalidLocation("altitude must be finite"));
        }
        Ok(())
    }
}
