//! Low-precision Sun and Moon positions.
//!
//! Truncated analytical series good to about 0.01 deg for the Sun and
//! 0.05 deg for the Moon over 1900-2100, enough to place tithi boundaries
//! within a few minutes. Apparent longitudes share the nutation term, so it
//! cancels in the elongation.
//!
//! Source: Meeus, Astronomical Algorithms, 2nd ed., ch. 22, 25 and 47.

use crate::julian::jd_to_centuries;

/// Main periodic terms of the Moon's longitude: (D, M, M', F, coeff deg).
const MOON_LON_TERMS: [(f64, f64, f64, f64, f64); 24] = [
    (0.0, 0.0, 1.0, 0.0, 6.288_774),
    (2.0, 0.0, -1.0, 0.0, 1.274_027),
    (2.0, 0.0, 0.0, 0.0, 0.658_314),
    (0.0, 0.0, 2.0, 0.0, 0.213_618),
    (0.0, 1.0, 0.0, 0.0, -0.185_116),
    (0.0, 0.0, 0.0, 2.0, -0.114_332),
    (2.0, 0.0, -2.0, 0.0, 0.058_793),
    (2.0, -1.0, -1.0, 0.0, 0.057_066),
    (2.0, 0.0, 1.0, 0.0, 0.053_322),
    (2.0, -1.0, 0.0, 0.0, 0.045_758),
    (0.0, 1.0, -1.0, 0.0, -0.040_923),
    (1.0, 0.0, 0.0, 0.0, -0.034_720),
    (0.0, 1.0, 1.0, 0.0, -0.030_383),
    (2.0, 0.0, 0.0, -2.0, 0.015_327),
    (0.0, 0.0, 1.0, 2.0, -0.012_528),
    (0.0, 0.0, 1.0, -2.0, 0.010_980),
    (4.0, 0.0, -1.0, 0.0, 0.010_675),
    (0.0, 0.0, 3.0, 0.0, 0.010_034),
    (4.0, 0.0, -2.0, 0.0, 0.008_548),
    (2.0, 1.0, -1.0, 0.0, -0.007_888),
    (2.0, 1.0, 0.0, 0.0, -0.006_766),
    (1.0, 0.0, -1.0, 0.0, -0.005_163),
    (1.0, 1.0, 0.0, 0.0, 0.004_987),
    (2.0, -1.0, 1.0, 0.0, 0.004_036),
];

/// Longitude of the Moon's ascending node, degrees.
fn node_longitude_deg(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Sun's apparent geocentric ecliptic longitude in degrees [0, 360).
pub fn sun_apparent_longitude_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = node_longitude_deg(t).to_radians();
    (l0 + c - 0.005_69 - 0.004_78 * omega.sin()).rem_euclid(360.0)
}

/// Moon's apparent geocentric ecliptic longitude in degrees [0, 360).
pub fn moon_apparent_longitude_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let l_prime = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = 297.850_192_1 + 445_267.111_403_4 * t;
    let m = 357.529_109_2 + 35_999.050_290_9 * t;
    let m_prime = 134.963_396_4 + 477_198.867_505_5 * t;
    let f = 93.272_095_0 + 483_202.017_523_3 * t;
    // Eccentricity of Earth's orbit scales the terms containing M.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let sum: f64 = MOON_LON_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coeff)| {
            let arg = (cd * d + cm * m + cmp * m_prime + cf * f).to_radians();
            coeff * e.powi(cm.abs() as i32) * arg.sin()
        })
        .sum();

    let omega = node_longitude_deg(t).to_radians();
    (l_prime + sum - 0.004_78 * omega.sin()).rem_euclid(360.0)
}

/// Moon-Sun elongation in degrees [0, 360).
pub fn elongation_deg(jd: f64) -> f64 {
    (moon_apparent_longitude_deg(jd) - sun_apparent_longitude_deg(jd)).rem_euclid(360.0)
}

/// Sun's apparent right ascension and declination in radians.
///
/// RA in [0, 2π), Dec in [-π/2, π/2].
pub fn sun_equatorial_ra_dec(jd: f64) -> (f64, f64) {
    let t = jd_to_centuries(jd);
    let omega = node_longitude_deg(t).to_radians();
    let eps0 = 23.439_291 - 0.013_004_2 * t;
    let eps = (eps0 + 0.002_56 * omega.cos()).to_radians();
    let lambda = sun_apparent_longitude_deg(jd).to_radians();
    let ra = (eps.cos() * lambda.sin())
        .atan2(lambda.cos())
        .rem_euclid(std::f64::consts::TAU);
    let dec = (eps.sin() * lambda.sin()).asin();
    (ra, dec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::calendar_to_jd;

    #[test]
    fn meeus_example_25a_sun() {
        // 1992 Oct 13.0 TD: apparent longitude 199.90895 deg
        let jd = calendar_to_jd(1992, 10, 13.0);
        let lon = sun_apparent_longitude_deg(jd);
        assert!((lon - 199.909).abs() < 0.01, "sun lon = {lon}");
    }

    #[test]
    fn meeus_example_25a_declination() {
        // Apparent declination -7.78507 deg
        let jd = calendar_to_jd(1992, 10, 13.0);
        let (_ra, dec) = sun_equatorial_ra_dec(jd);
        assert!((dec.to_degrees() - (-7.785)).abs() < 0.01, "dec = {}", dec.to_degrees());
    }

    #[test]
    fn meeus_example_47a_moon() {
        // 1992 Apr 12.0 TD: apparent longitude 133.167 deg
        let jd = calendar_to_jd(1992, 4, 12.0);
        let lon = moon_apparent_longitude_deg(jd);
        assert!((lon - 133.167).abs() < 0.1, "moon lon = {lon}");
    }

    #[test]
    fn full_moon_jan_2024() {
        // Full moon 2024-01-25 17:54 UTC: elongation 180 deg
        let jd = calendar_to_jd(2024, 1, 25.0 + (17.0 + 54.0 / 60.0) / 24.0);
        let e = elongation_deg(jd);
        assert!((e - 180.0).abs() < 0.5, "elongation = {e}");
    }

    #[test]
    fn new_moon_jan_2024() {
        // New moon 2024-01-11 11:57 UTC: elongation 0 deg
        let jd = calendar_to_jd(2024, 1, 11.0 + (11.0 + 57.0 / 60.0) / 24.0);
        let e = elongation_deg(jd);
        let off = if e > 180.0 { 360.0 - e } else { e };
        assert!(off < 0.5, "elongation = {e}");
    }
}
