//! Uposatha observance classification and search.
//!
//! Builds on the `TithiOracle` contract from `uposatha_vedic`:
//! - [`classify`] labels a civil date as canonical, optional (kshaya or
//!   vridhi) or ordinary
//! - the finder scans forward, backward and over ranges for observance days
//! - [`ObservanceView`] is the serializable presentation of a result

pub mod error;
pub mod finder;
pub mod labels;
pub mod observance;
pub mod observance_types;

pub use error::SearchError;
pub use finder::{
    MAX_FORWARD_SCAN_DAYS, ObservanceIter, month_observances, next_occurrence,
    next_occurrence_after, next_occurrence_within, occurrences_in_range, prev_occurrence,
    year_observances,
};
pub use labels::{ObservanceView, display_label, pali_label, uposatha_type_label};
pub use observance::{classify, classify_samples, detect_kshaya, detect_vridhi};
pub use observance_types::{
    ALL_MOON_PHASES, CANONICAL_TITHIS, KSHAYA_NEAR_SET, MoonPhase, ObservanceDay, ObservanceKind,
    ObservanceStatus, is_canonical_index,
};
