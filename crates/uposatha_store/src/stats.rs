//! Statistics over the observance history.
//!
//! Streaks count tracked days only: a day without any record neither
//! breaks nor extends a streak.

use std::collections::BTreeMap;

use serde::Serialize;
use uposatha_search::MoonPhase;

use crate::record::{ObservanceRecord, RecordStatus};

/// Observed and total counts for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseTally {
    pub observed: u32,
    pub total: u32,
}

impl PhaseTally {
    fn add(&mut self, record: &ObservanceRecord) {
        self.total += 1;
        if record.is_observed() {
            self.observed += 1;
        }
    }
}

/// Tallies per moon-phase bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseBreakdown {
    pub full: PhaseTally,
    pub new: PhaseTally,
    pub quarter: PhaseTally,
    pub chaturdashi: PhaseTally,
}

impl PhaseBreakdown {
    pub fn get(&self, phase: MoonPhase) -> PhaseTally {
        match phase {
            MoonPhase::Full => self.full,
            MoonPhase::New => self.new,
            MoonPhase::Quarter => self.quarter,
            MoonPhase::Chaturdashi => self.chaturdashi,
        }
    }

    fn get_mut(&mut self, phase: MoonPhase) -> &mut PhaseTally {
        match phase {
            MoonPhase::Full => &mut self.full,
            MoonPhase::New => &mut self.new,
            MoonPhase::Quarter => &mut self.quarter,
            MoonPhase::Chaturdashi => &mut self.chaturdashi,
        }
    }
}

/// Tally for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTally {
    pub month: String,
    pub observed: u32,
    pub total: u32,
}

/// Aggregate view of a record set. Same input, same output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservanceStats {
    pub total_tracked: u32,
    pub observed: u32,
    pub skipped: u32,
    /// Percentage observed, 0..=100; exactly 0 for an empty history.
    pub rate: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub by_moon_phase: PhaseBreakdown,
    /// Most recent month first.
    #[serde(rename = "monthlyStats")]
    pub monthly: Vec<MonthTally>,
}

fn count_observed(records: &[ObservanceRecord]) -> u32 {
    records.iter().filter(|r| r.is_observed()).count() as u32
}

fn by_date_desc(records: &[ObservanceRecord]) -> Vec<&ObservanceRecord> {
    let mut sorted: Vec<_> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// `observed / total * 100`, or 0 when there are no records.
pub fn observance_rate(records: &[ObservanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    f64::from(count_observed(records)) / records.len() as f64 * 100.0
}

/// Observed records since the most recent skip.
pub fn current_streak(records: &[ObservanceRecord]) -> u32 {
    by_date_desc(records)
        .into_iter()
        .take_while(|r| r.status == RecordStatus::Observed)
        .count() as u32
}

/// Longest run of consecutive observed records.
pub fn longest_streak(records: &[ObservanceRecord]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for record in by_date_desc(records) {
        if record.is_observed() {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 0;
        }
    }
    longest.max(run)
}

pub fn compute_stats(records: &[ObservanceRecord]) -> ObservanceStats {
    let observed = count_observed(records);
    let total = records.len() as u32;

    let mut by_moon_phase = PhaseBreakdown::default();
    let mut months: BTreeMap<String, PhaseTally> = BTreeMap::new();
    for record in records {
        by_moon_phase.get_mut(record.moon_phase).add(record);
        months.entry(record.month_key()).or_default().add(record);
    }
    let monthly = months
        .into_iter()
        .rev()
        .map(|(month, t)| MonthTally {
            month,
            observed: t.observed,
            total: t.total,
        })
        .collect();

    ObservanceStats {
        total_tracked: total,
        observed,
        skipped: total - observed,
        rate: observance_rate(records),
        current_streak: current_streak(records),
        longest_streak: longest_streak(records),
        by_moon_phase,
        monthly,
    }
}
