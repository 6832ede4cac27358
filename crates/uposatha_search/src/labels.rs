//! Display labels for observance results.

use serde::Serialize;
use uposatha_vedic::Tithi;

use crate::observance_types::{ObservanceKind, ObservanceStatus};

/// Pali name of a canonical tithi, `None` for any other tithi.
pub fn pali_label(tithi: Tithi) -> Option<&'static str> {
    match tithi {
        Tithi::ShuklaAshtami => Some("Sukka Aṭṭhamī"),
        Tithi::ShuklaChaturdashi => Some("Sukka Cātuddasī"),
        Tithi::Purnima => Some("Puṇṇamī (Pūrṇimā)"),
        Tithi::KrishnaAshtami => Some("Kanhā Aṭṭhamī"),
        Tithi::KrishnaChaturdashi => Some("Kanhā Cātuddasī"),
        Tithi::Amavasya => Some("Amāvāsī (Amāvasyā)"),
        _ => None,
    }
}

/// Short Uposatha type of a canonical tithi.
pub fn uposatha_type_label(tithi: Tithi) -> Option<&'static str> {
    match tithi {
        Tithi::ShuklaAshtami | Tithi::KrishnaAshtami => Some("8th Day Uposatha"),
        Tithi::ShuklaChaturdashi | Tithi::KrishnaChaturdashi => Some("14th Day Uposatha"),
        Tithi::Purnima => Some("Full Moon Uposatha"),
        Tithi::Amavasya => Some("New Moon Uposatha"),
        _ => None,
    }
}

/// One-line label for a classified day.
///
/// Observance days read `"<type> (<pali>) - Pakkha Uposatha"`, with the
/// anomaly appended for optional days. Other days show the sunrise tithi
/// and paksha. Indeterminate days read `"No sunrise"`.
pub fn display_label(status: &ObservanceStatus) -> String {
    let observed = status
        .active_tithi()
        .and_then(|t| Some((uposatha_type_label(t)?, pali_label(t)?)));
    if let Some((kind, pali)) = observed {
        let base = format!("{kind} ({pali}) - Pakkha Uposatha");
        return match status.kind {
            ObservanceKind::KshayaRestoration(_) => {
                format!("{base} - Kshaya restoration (optional)")
            }
            ObservanceKind::VridhiExtension(_) => {
                format!("{base} - Vridhi second day (optional)")
            }
            _ => base,
        };
    }
    match status.sample {
        Some(s) => format!("{} - {} Paksha", s.tithi.name(), s.paksha.name()),
        None => "No sunrise".to_string(),
    }
}

/// Serializable presentation of an [`ObservanceStatus`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservanceView {
    pub date: chrono::NaiveDate,
    pub is_uposatha: bool,
    pub is_optional: bool,
    pub is_kshaya: bool,
    pub is_vridhi: bool,
    pub is_ashtami: bool,
    pub is_chaturdashi: bool,
    pub is_full_moon: bool,
    pub is_new_moon: bool,
    /// Tithi prevailing at sunrise.
    pub tithi_name: Option<&'static str>,
    pub paksha: Option<&'static str>,
    /// Pali name of the observed tithi, empty on ordinary days.
    pub pali_label: &'static str,
    pub label: String,
    pub sunrise: Option<chrono::DateTime<chrono::Utc>>,
    pub sunset: Option<chrono::DateTime<chrono::Utc>>,
}

impl ObservanceView {
    pub fn from_status(status: &ObservanceStatus) -> Self {
        Self {
            date: status.date,
            is_uposatha: status.is_uposatha(),
            is_optional: status.is_optional(),
            is_kshaya: status.is_kshaya(),
            is_vridhi: status.is_vridhi(),
            is_ashtami: status.is_ashtami(),
            is_chaturdashi: status.is_chaturdashi(),
            is_full_moon: status.is_full_moon(),
            is_new_moon: status.is_new_moon(),
            tithi_name: status.sample.map(|s| s.tithi.name()),
            paksha: status.sample.map(|s| s.paksha.name()),
            pali_label: status.active_tithi().and_then(pali_label).unwrap_or(""),
            label: display_label(status),
            sunrise: status.sample.map(|s| s.sunrise),
            sunset: status.sample.map(|s| s.sunset),
        }
    }
}

impl From<&ObservanceStatus> for ObservanceView {
    fn from(status: &ObservanceStatus) -> Self {
        Self::from_status(status)
    }
}
