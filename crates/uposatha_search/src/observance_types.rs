//! Types for Uposatha observance classification results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uposatha_vedic::{Tithi, TithiSample};

/// Canonical Uposatha tithi indices, ascending:
/// Shukla Ashtami, Shukla Chaturdashi, Purnima, Krishna Ashtami,
/// Krishna Chaturdashi, Amavasya.
pub const CANONICAL_TITHIS: [u8; 6] = [7, 13, 14, 22, 28, 29];

/// Tithi indices from which a canonical tithi can be skipped before the
/// next sunrise. Kshaya detection only looks ahead from these.
pub const KSHAYA_NEAR_SET: [u8; 10] = [6, 7, 12, 13, 14, 21, 22, 27, 28, 29];

/// Whether `index` is one of the six canonical Uposatha tithis.
pub fn is_canonical_index(index: u8) -> bool {
    CANONICAL_TITHIS.contains(&index)
}

/// Moon-phase bucket of an Uposatha day, as recorded in observance history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoonPhase {
    /// Purnima.
    Full,
    /// Amavasya.
    New,
    /// Shukla or Krishna Ashtami.
    Quarter,
    /// Shukla or Krishna Chaturdashi.
    Chaturdashi,
}

/// All buckets in display order.
pub const ALL_MOON_PHASES: [MoonPhase; 4] = [
    MoonPhase::Full,
    MoonPhase::New,
    MoonPhase::Quarter,
    MoonPhase::Chaturdashi,
];

impl MoonPhase {
    /// Bucket for a canonical tithi, `None` for any other tithi.
    pub fn from_tithi(tithi: Tithi) -> Option<Self> {
        match tithi {
            Tithi::Purnima => Some(Self::Full),
            Tithi::Amavasya => Some(Self::New),
            Tithi::ShuklaAshtami | Tithi::KrishnaAshtami => Some(Self::Quarter),
            Tithi::ShuklaChaturdashi | Tithi::KrishnaChaturdashi => Some(Self::Chaturdashi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::New => "new",
            Self::Quarter => "quarter",
            Self::Chaturdashi => "chaturdashi",
        }
    }
}

impl std::str::FromStr for MoonPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "new" => Ok(Self::New),
            "quarter" => Ok(Self::Quarter),
            "chaturdashi" => Ok(Self::Chaturdashi),
            _ => Err(format!("unknown moon phase: {s}")),
        }
    }
}

/// Observance classification of a single sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservanceKind {
    /// Canonical Uposatha on its first (or only) sunrise.
    Canonical(Tithi),
    /// The given canonical tithi began and ended between two sunrises;
    /// this sunrise, the last one before the gap, stands in for it.
    KshayaRestoration(Tithi),
    /// Second consecutive sunrise with the same canonical tithi.
    VridhiExtension(Tithi),
    /// Not an observance day.
    None,
}

impl ObservanceKind {
    /// The tithi the observance refers to, if any.
    pub fn tithi(self) -> Option<Tithi> {
        match self {
            Self::Canonical(t) | Self::KshayaRestoration(t) | Self::VridhiExtension(t) => Some(t),
            Self::None => None,
        }
    }
}

/// Classified status of a civil date. Recomputed on every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservanceStatus {
    pub date: NaiveDate,
    pub kind: ObservanceKind,
    /// Oracle sample for `date`; `None` when the day was astronomically
    /// indeterminate.
    pub sample: Option<TithiSample>,
}

impl ObservanceStatus {
    pub fn is_canonical(&self) -> bool {
        matches!(self.kind, ObservanceKind::Canonical(_))
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self.kind,
            ObservanceKind::KshayaRestoration(_) | ObservanceKind::VridhiExtension(_)
        )
    }

    /// Canonical or optional.
    pub fn is_uposatha(&self) -> bool {
        self.is_canonical() || self.is_optional()
    }

    pub fn is_kshaya(&self) -> bool {
        matches!(self.kind, ObservanceKind::KshayaRestoration(_))
    }

    pub fn is_vridhi(&self) -> bool {
        matches!(self.kind, ObservanceKind::VridhiExtension(_))
    }

    /// Tithi the observance refers to; for a kshaya restoration this is the
    /// skipped tithi, not the one prevailing at sunrise.
    pub fn active_tithi(&self) -> Option<Tithi> {
        self.kind.tithi()
    }

    pub fn is_ashtami(&self) -> bool {
        matches!(
            self.active_tithi(),
            Some(Tithi::ShuklaAshtami | Tithi::KrishnaAshtami)
        )
    }

    pub fn is_chaturdashi(&self) -> bool {
        matches!(
            self.active_tithi(),
            Some(Tithi::ShuklaChaturdashi | Tithi::KrishnaChaturdashi)
        )
    }

    pub fn is_full_moon(&self) -> bool {
        self.active_tithi() == Some(Tithi::Purnima)
    }

    pub fn is_new_moon(&self) -> bool {
        self.active_tithi() == Some(Tithi::Amavasya)
    }

    /// History bucket of the observance, `None` for non-observance days.
    pub fn moon_phase(&self) -> Option<MoonPhase> {
        self.active_tithi().and_then(MoonPhase::from_tithi)
    }
}

/// A date paired with its observance status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservanceDay {
    pub date: NaiveDate,
    pub status: ObservanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(kind: ObservanceKind) -> ObservanceStatus {
        ObservanceStatus {
            date: NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
            kind,
            sample: None,
        }
    }

    #[test]
    fn canonical_set_is_sorted_and_named() {
        assert!(CANONICAL_TITHIS.windows(2).all(|w| w[0] < w[1]));
        for idx in CANONICAL_TITHIS {
            let t = Tithi::from_index(idx).unwrap();
            assert!(MoonPhase::from_tithi(t).is_some(), "{}", t.name());
        }
    }

    #[test]
    fn near_set_covers_canonical_predecessors() {
        for idx in CANONICAL_TITHIS {
            let pred = (idx + 29) % 30;
            assert!(KSHAYA_NEAR_SET.contains(&pred), "missing predecessor {pred}");
        }
    }

    #[test]
    fn flags_are_exclusive() {
        let kinds = [
            ObservanceKind::Canonical(Tithi::Purnima),
            ObservanceKind::KshayaRestoration(Tithi::ShuklaAshtami),
            ObservanceKind::VridhiExtension(Tithi::KrishnaChaturdashi),
            ObservanceKind::None,
        ];
        for kind in kinds {
            let s = status(kind);
            assert!(!(s.is_canonical() && s.is_optional()), "{kind:?}");
        }
        let none = status(ObservanceKind::None);
        assert!(!none.is_canonical() && !none.is_optional() && !none.is_uposatha());
    }

    #[test]
    fn derived_booleans_follow_active_tithi() {
        let s = status(ObservanceKind::KshayaRestoration(Tithi::ShuklaAshtami));
        assert!(s.is_ashtami());
        assert!(s.is_kshaya());
        assert_eq!(s.moon_phase(), Some(MoonPhase::Quarter));

        let s = status(ObservanceKind::VridhiExtension(Tithi::Purnima));
        assert!(s.is_full_moon());
        assert!(s.is_vridhi());
        assert!(!s.is_new_moon());

        let s = status(ObservanceKind::Canonical(Tithi::KrishnaChaturdashi));
        assert!(s.is_chaturdashi());
        assert_eq!(s.moon_phase(), Some(MoonPhase::Chaturdashi));
    }

    #[test]
    fn moon_phase_parse_and_name() {
        for p in ALL_MOON_PHASES {
            assert_eq!(p.name().parse::<MoonPhase>().unwrap(), p);
        }
        assert!("gibbous".parse::<MoonPhase>().is_err());
    }
}
