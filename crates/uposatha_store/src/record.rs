//! Persisted observance records.
//!
//! The JSON layout (camelCase keys, `timestamp` for the recording instant)
//! matches exported histories, so old exports import unchanged.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uposatha_search::MoonPhase;
use uuid::Uuid;

use crate::error::StoreError;

/// Whether the practitioner kept the observance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Observed,
    Skipped,
}

/// Depth of practice on an observed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeLevel {
    Full,
    Partial,
    Minimal,
}

impl PracticeLevel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::Minimal => "minimal",
        }
    }
}

impl FromStr for PracticeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            "minimal" => Ok(Self::Minimal),
            _ => Err(format!("unknown practice level: {s}")),
        }
    }
}

/// Why an observance was skipped. Backfilled days use `Forgot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    Work,
    Travel,
    Health,
    Forgot,
    Other,
}

impl SkipReason {
    pub fn name(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Travel => "travel",
            Self::Health => "health",
            Self::Forgot => "forgot",
            Self::Other => "other",
        }
    }
}

impl FromStr for SkipReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "travel" => Ok(Self::Travel),
            "health" => Ok(Self::Health),
            "forgot" => Ok(Self::Forgot),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown skip reason: {s}")),
        }
    }
}

/// Minutes spent per practice on an observed day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeMinutes {
    pub meditation: u32,
    pub chanting: u32,
    pub study: u32,
}

impl PracticeMinutes {
    /// Sum of all practice minutes, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.meditation
            .saturating_add(self.chanting)
            .saturating_add(self.study)
    }
}

/// Valid range for the self-reported quality score.
pub const QUALITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// One tracked Uposatha day. At most one record exists per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservanceRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub moon_phase: MoonPhase,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<PracticeLevel>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub precepts: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_minutes: Option<PracticeMinutes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_note: Option<String>,
    /// When the record was created or last replaced.
    #[serde(rename = "timestamp", alias = "recordedAt")]
    pub recorded_at: DateTime<Utc>,
}

impl ObservanceRecord {
    fn bare(
        date: NaiveDate,
        moon_phase: MoonPhase,
        status: RecordStatus,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            moon_phase,
            status,
            level: None,
            precepts: BTreeSet::new(),
            practice_minutes: None,
            quality: None,
            reflection: None,
            skip_reason: None,
            skip_note: None,
            recorded_at,
        }
    }

    /// New observed record with a fresh id.
    pub fn observed(date: NaiveDate, moon_phase: MoonPhase, recorded_at: DateTime<Utc>) -> Self {
        Self::bare(date, moon_phase, RecordStatus::Observed, recorded_at)
    }

    /// New skipped record with a fresh id.
    pub fn skipped(
        date: NaiveDate,
        moon_phase: MoonPhase,
        reason: SkipReason,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            skip_reason: Some(reason),
            ..Self::bare(date, moon_phase, RecordStatus::Skipped, recorded_at)
        }
    }

    pub fn with_level(mut self, level: PracticeLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_precepts<I, S>(mut self, precepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precepts = precepts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_practice_minutes(mut self, minutes: PracticeMinutes) -> Self {
        self.practice_minutes = Some(minutes);
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }

    pub fn with_skip_note(mut self, note: impl Into<String>) -> Self {
        self.skip_note = Some(note.into());
        self
    }

    pub fn is_observed(&self) -> bool {
        self.status == RecordStatus::Observed
    }

    /// `YYYY-MM` key used for monthly tallies.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Check field constraints before the record is persisted.
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(q) = self.quality {
            if !QUALITY_RANGE.contains(&q) {
                return Err(StoreError::InvalidRecord(format!(
                    "{}: quality {q} outside 1..=5",
                    self.date
                )));
            }
        }
        Ok(())
    }
}
