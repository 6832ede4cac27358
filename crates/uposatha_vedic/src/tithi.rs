//! Tithi (lunar day) and paksha (lunar fortnight) enumeration.
//!
//! A synodic month is divided into 30 tithis of 12 degrees of Moon-Sun
//! elongation each. Indices 0..=14 form the Shukla (waxing) paksha ending
//! at Purnima; 15..=29 form the Krishna (waning) paksha ending at Amavasya.

use serde::{Deserialize, Serialize};

/// Angular width of one tithi in degrees of elongation.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Number of tithis in a synodic month.
pub const TITHI_COUNT: u8 = 30;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    /// Waxing fortnight (new moon to full moon).
    Shukla,
    /// Waning fortnight (full moon to new moon).
    Krishna,
}

impl Paksha {
    pub fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// The 30 tithis of a synodic month, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Tithi {
    ShuklaPratipada,
    ShuklaDwitiya,
    ShuklaTritiya,
    ShuklaChaturthi,
    ShuklaPanchami,
    ShuklaShashthi,
    ShuklaSaptami,
    ShuklaAshtami,
    ShuklaNavami,
    ShuklaDashami,
    ShuklaEkadashi,
    ShuklaDwadashi,
    ShuklaTrayodashi,
    ShuklaChaturdashi,
    Purnima,
    KrishnaPratipada,
    KrishnaDwitiya,
    KrishnaTritiya,
    KrishnaChaturthi,
    KrishnaPanchami,
    KrishnaShashthi,
    KrishnaSaptami,
    KrishnaAshtami,
    KrishnaNavami,
    KrishnaDashami,
    KrishnaEkadashi,
    KrishnaDwadashi,
    KrishnaTrayodashi,
    KrishnaChaturdashi,
    Amavasya,
}

/// All 30 tithis in order (index 0 = Shukla Pratipada).
pub const ALL_TITHIS: [Tithi; 30] = [
    Tithi::ShuklaPratipada,
    Tithi::ShuklaDwitiya,
    Tithi::ShuklaTritiya,
    Tithi::ShuklaChaturthi,
    Tithi::ShuklaPanchami,
    Tithi::ShuklaShashthi,
    Tithi::ShuklaSaptami,
    Tithi::ShuklaAshtami,
    Tithi::ShuklaNavami,
    Tithi::ShuklaDashami,
    Tithi::ShuklaEkadashi,
    Tithi::ShuklaDwadashi,
    Tithi::ShuklaTrayodashi,
    Tithi::ShuklaChaturdashi,
    Tithi::Purnima,
    Tithi::KrishnaPratipada,
    Tithi::KrishnaDwitiya,
    Tithi::KrishnaTritiya,
    Tithi::KrishnaChaturthi,
    Tithi::KrishnaPanchami,
    Tithi::KrishnaShashthi,
    Tithi::KrishnaSaptami,
    Tithi::KrishnaAshtami,
    Tithi::KrishnaNavami,
    Tithi::KrishnaDashami,
    Tithi::KrishnaEkadashi,
    Tithi::KrishnaDwadashi,
    Tithi::KrishnaTrayodashi,
    Tithi::KrishnaChaturdashi,
    Tithi::Amavasya,
];

/// Full names, indexed by tithi index.
const TITHI_NAMES: [&str; 30] = [
    "Shukla Pratipada",
    "Shukla Dwitiya",
    "Shukla Tritiya",
    "Shukla Chaturthi",
    "Shukla Panchami",
    "Shukla Shashthi",
    "Shukla Saptami",
    "Shukla Ashtami",
    "Shukla Navami",
    "Shukla Dashami",
    "Shukla Ekadashi",
    "Shukla Dwadashi",
    "Shukla Trayodashi",
    "Shukla Chaturdashi",
    "Purnima",
    "Krishna Pratipada",
    "Krishna Dwitiya",
    "Krishna Tritiya",
    "Krishna Chaturthi",
    "Krishna Panchami",
    "Krishna Shashthi",
    "Krishna Saptami",
    "Krishna Ashtami",
    "Krishna Navami",
    "Krishna Dashami",
    "Krishna Ekadashi",
    "Krishna Dwadashi",
    "Krishna Trayodashi",
    "Krishna Chaturdashi",
    "Amavasya",
];

/// Day names within a paksha, 1-based position minus one.
const PAKSHA_DAY_NAMES: [&str; 14] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
];

impl Tithi {
    /// Tithi for a 0-based index, or `None` if `index >= 30`.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_TITHIS.get(index as usize).copied()
    }

    /// 0-based index (0..=29).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// 1-based tithi number in the month (1..=30).
    pub fn number(self) -> u8 {
        self.index() + 1
    }

    pub fn paksha(self) -> Paksha {
        if self.index() < 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        }
    }

    /// 1-based position within the paksha (1..=15).
    pub fn tithi_in_paksha(self) -> u8 {
        self.index() % 15 + 1
    }

    /// Tithi `steps` positions later, wrapping at 30.
    pub fn advance(self, steps: u8) -> Self {
        ALL_TITHIS[((self.index() as usize) + steps as usize) % TITHI_COUNT as usize]
    }

    /// Traditional name, e.g. "Shukla Ashtami", "Purnima".
    pub fn name(self) -> &'static str {
        TITHI_NAMES[self.index() as usize]
    }

    /// Name without the paksha prefix, e.g. "Ashtami".
    pub fn day_name(self) -> &'static str {
        match self {
            Self::Purnima => "Purnima",
            Self::Amavasya => "Amavasya",
            t => PAKSHA_DAY_NAMES[(t.tithi_in_paksha() - 1) as usize],
        }
    }
}

/// Tithi position derived from a Moon-Sun elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TithiPosition {
    pub tithi: Tithi,
    /// 0-based tithi index (0..=29).
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based position within the paksha (1..=15).
    pub tithi_in_paksha: u8,
    /// Degrees already elapsed within the current tithi, [0, 12).
    pub degrees_in_tithi: f64,
}

/// Determine the tithi from Moon-Sun elongation in degrees.
///
/// The elongation is normalized to [0, 360) first.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let elong = elongation_deg.rem_euclid(360.0);
    let idx = ((elong / TITHI_SEGMENT_DEG).floor() as u8).min(TITHI_COUNT - 1);
    let tithi = ALL_TITHIS[idx as usize];
    TithiPosition {
        tithi,
        tithi_index: idx,
        paksha: tithi.paksha(),
        tithi_in_paksha: tithi.tithi_in_paksha(),
        degrees_in_tithi: elong - idx as f64 * TITHI_SEGMENT_DEG,
    }
}

/// Forward distance from tithi index `from` to `to`, in [0, 30).
pub fn forward_distance(from: u8, to: u8) -> u8 {
    ((to as i16 - from as i16).rem_euclid(TITHI_COUNT as i16)) as u8
}
