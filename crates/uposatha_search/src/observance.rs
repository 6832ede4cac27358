//! Uposatha classification of a civil date.
//!
//! A date is an Uposatha when its udaya tithi (tithi at sunrise) is one of
//! the six canonical tithis. Two anomalies need the neighbouring sunrises:
//!
//! - **Vridhi**: the same canonical tithi prevails at two consecutive
//!   sunrises. The first day is primary, the second optional.
//! - **Kshaya**: a canonical tithi starts and ends between two sunrises and
//!   is never udaya. The sunrise just before the gap carries an optional
//!   restoration of the skipped observance.
//!
//! Each check is a pure function over oracle samples; [`classify`] fetches
//! the neighbours only when the day's tithi can produce an anomaly.

use chrono::NaiveDate;
use tracing::{debug, warn};
use uposatha_vedic::{GeoLocation, Tithi, TithiOracle, TithiSample, forward_distance};

use crate::error::SearchError;
use crate::observance_types::{
    CANONICAL_TITHIS, KSHAYA_NEAR_SET, ObservanceKind, ObservanceStatus, is_canonical_index,
};

/// Second sunrise of a repeated canonical tithi.
///
/// Returns the repeated tithi when `today` is canonical and `yesterday`
/// carried the same tithi.
pub fn detect_vridhi(today: &TithiSample, yesterday: &TithiSample) -> Option<Tithi> {
    (is_canonical_index(today.tithi_index) && today.tithi_index == yesterday.tithi_index)
        .then_some(today.tithi)
}

/// Canonical tithi skipped between the sunrises of `today` and `tomorrow`.
///
/// A target is skipped when it lies strictly between the two udaya tithis
/// in forward (mod 30) order. When several qualify the smallest index wins.
pub fn detect_kshaya(today: &TithiSample, tomorrow: &TithiSample) -> Option<Tithi> {
    let advance = forward_distance(today.tithi_index, tomorrow.tithi_index);
    CANONICAL_TITHIS
        .iter()
        .copied()
        .find(|&target| {
            let d = forward_distance(today.tithi_index, target);
            d > 0 && d < advance
        })
        .and_then(Tithi::from_index)
}

/// Combine the day's sample with its neighbours into a classification.
///
/// Precedence: kshaya restoration, then vridhi extension, then canonical.
/// Missing neighbours (indeterminate or not fetched) disable the
/// corresponding check.
pub fn classify_samples(
    yesterday: Option<&TithiSample>,
    today: &TithiSample,
    tomorrow: Option<&TithiSample>,
) -> ObservanceKind {
    if let Some(skipped) = tomorrow.and_then(|next| detect_kshaya(today, next)) {
        return ObservanceKind::KshayaRestoration(skipped);
    }
    if let Some(repeated) = yesterday.and_then(|prev| detect_vridhi(today, prev)) {
        return ObservanceKind::VridhiExtension(repeated);
    }
    if is_canonical_index(today.tithi_index) {
        return ObservanceKind::Canonical(today.tithi);
    }
    ObservanceKind::None
}

/// Query the oracle, mapping astronomical indeterminacy to `None`.
fn sample_at<O: TithiOracle + ?Sized>(
    oracle: &O,
    date: NaiveDate,
    location: &GeoLocation,
) -> Result<Option<TithiSample>, SearchError> {
    match oracle.panchangam(date, location) {
        Ok(sample) => Ok(Some(sample)),
        Err(e) if e.is_indeterminate() => {
            warn!(%date, error = %e, "no udaya tithi; treating as non-observance");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn neighbour<O: TithiOracle + ?Sized>(
    oracle: &O,
    date: Option<NaiveDate>,
    location: &GeoLocation,
) -> Result<Option<TithiSample>, SearchError> {
    match date {
        Some(d) => sample_at(oracle, d, location),
        None => Ok(None),
    }
}

/// Classify a civil date for an observer.
///
/// An indeterminate day (no sunrise) yields `ObservanceKind::None` with no
/// sample; any other oracle failure is returned as an error.
pub fn classify<O: TithiOracle + ?Sized>(
    oracle: &O,
    date: NaiveDate,
    location: &GeoLocation,
) -> Result<ObservanceStatus, SearchError> {
    let Some(today) = sample_at(oracle, date, location)? else {
        return Ok(ObservanceStatus {
            date,
            kind: ObservanceKind::None,
            sample: None,
        });
    };

    let yesterday = if is_canonical_index(today.tithi_index) {
        neighbour(oracle, date.pred_opt(), location)?
    } else {
        None
    };
    let tomorrow = if KSHAYA_NEAR_SET.contains(&today.tithi_index) {
        neighbour(oracle, date.succ_opt(), location)?
    } else {
        None
    };

    let kind = classify_samples(yesterday.as_ref(), &today, tomorrow.as_ref());
    match kind {
        ObservanceKind::KshayaRestoration(t) => {
            debug!(%date, skipped = t.name(), "kshaya: canonical tithi skipped before next sunrise");
        }
        ObservanceKind::VridhiExtension(t) => {
            debug!(%date, tithi = t.name(), "vridhi: canonical tithi repeated at sunrise");
        }
        _ => {}
    }

    Ok(ObservanceStatus {
        date,
        kind,
        sample: Some(today),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn sample(index: u8) -> TithiSample {
        let t = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        TithiSample::new(Tithi::from_index(index).unwrap(), t, t)
    }

    #[test]
    fn vridhi_requires_canonical_repeat() {
        assert_eq!(detect_vridhi(&sample(14), &sample(14)), Some(Tithi::Purnima));
        assert_eq!(detect_vridhi(&sample(14), &sample(13)), None);
        assert_eq!(detect_vridhi(&sample(10), &sample(10)), None);
    }

    #[test]
    fn kshaya_single_skip() {
        assert_eq!(detect_kshaya(&sample(6), &sample(8)), Some(Tithi::ShuklaAshtami));
        assert_eq!(detect_kshaya(&sample(27), &sample(29)), Some(Tithi::KrishnaChaturdashi));
        assert_eq!(detect_kshaya(&sample(28), &sample(0)), Some(Tithi::Amavasya));
    }

    #[test]
    fn kshaya_ignores_normal_and_non_canonical_steps() {
        assert_eq!(detect_kshaya(&sample(6), &sample(7)), None);
        assert_eq!(detect_kshaya(&sample(14), &sample(14)), None);
        // Skipping 9 is not an Uposatha
        assert_eq!(detect_kshaya(&sample(8), &sample(10)), None);
    }

    #[test]
    fn kshaya_multi_skip_takes_smallest_index() {
        // 13 and 14 both skipped
        assert_eq!(detect_kshaya(&sample(12), &sample(15)), Some(Tithi::ShuklaChaturdashi));
        // 22, 28 and 29 all skipped; 7 lies beyond tomorrow
        assert_eq!(detect_kshaya(&sample(14), &sample(0)), Some(Tithi::KrishnaAshtami));
        assert_eq!(detect_kshaya(&sample(27), &sample(1)), Some(Tithi::KrishnaChaturdashi));
    }

    #[test]
    fn multi_skip_classifies_as_restoration() {
        let kind = classify_samples(Some(&sample(11)), &sample(12), Some(&sample(15)));
        assert_eq!(kind, ObservanceKind::KshayaRestoration(Tithi::ShuklaChaturdashi));
    }

    #[test]
    fn precedence_kshaya_over_canonical() {
        // Today Shukla Chaturdashi, Purnima skipped before the next sunrise
        let kind = classify_samples(Some(&sample(12)), &sample(13), Some(&sample(15)));
        assert_eq!(kind, ObservanceKind::KshayaRestoration(Tithi::Purnima));
    }

    #[test]
    fn precedence_vridhi_over_canonical() {
        let kind = classify_samples(Some(&sample(22)), &sample(22), Some(&sample(23)));
        assert_eq!(kind, ObservanceKind::VridhiExtension(Tithi::KrishnaAshtami));
    }

    #[test]
    fn precedence_kshaya_over_vridhi() {
        let kind = classify_samples(Some(&sample(13)), &sample(13), Some(&sample(15)));
        assert_eq!(kind, ObservanceKind::KshayaRestoration(Tithi::Purnima));
    }

    #[test]
    fn missing_neighbours_fall_back_to_literal_tithi() {
        assert_eq!(
            classify_samples(None, &sample(29), None),
            ObservanceKind::Canonical(Tithi::Amavasya)
        );
        assert_eq!(classify_samples(None, &sample(3), None), ObservanceKind::None);
    }
}
