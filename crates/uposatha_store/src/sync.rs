//! Gap backfill: mark untracked past Uposatha days as forgotten.

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{debug, info};
use uposatha_search::classify;
use uposatha_vedic::{GeoLocation, TithiOracle};

use crate::error::SyncError;
use crate::log::RecordStore;
use crate::record::{ObservanceRecord, SkipReason};

/// Trailing window scanned by [`sync_missed`], in days before `today`.
pub const BACKFILL_WINDOW_DAYS: u32 = 45;

/// Backfill the [`BACKFILL_WINDOW_DAYS`] days before `today`.
pub fn sync_missed<S, O>(
    store: &mut S,
    oracle: &O,
    location: &GeoLocation,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Vec<ObservanceRecord>, SyncError>
where
    S: RecordStore + ?Sized,
    O: TithiOracle + ?Sized,
{
    sync_missed_within(store, oracle, location, today, now, BACKFILL_WINDOW_DAYS)
}

/// Scan `today - 1` back to `today - window_days` and insert a
/// `Skipped`/`Forgot` record for every Uposatha day without a record.
///
/// Existing records are never touched and their days are not classified.
/// All new records are written in a single `put_many`; the inserted
/// records are returned, most recent first.
pub fn sync_missed_within<S, O>(
    store: &mut S,
    oracle: &O,
    location: &GeoLocation,
    today: NaiveDate,
    now: DateTime<Utc>,
    window_days: u32,
) -> Result<Vec<ObservanceRecord>, SyncError>
where
    S: RecordStore + ?Sized,
    O: TithiOracle + ?Sized,
{
    let tracked: HashSet<NaiveDate> = store.get_all()?.into_iter().map(|r| r.date).collect();

    let mut inserted = Vec::new();
    for offset in 1..=u64::from(window_days) {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if tracked.contains(&date) {
            continue;
        }
        let status = classify(oracle, date, location)?;
        let Some(phase) = status.moon_phase().filter(|_| status.is_uposatha()) else {
            continue;
        };
        debug!(%date, phase = phase.name(), "backfilling missed observance");
        inserted.push(ObservanceRecord::skipped(date, phase, SkipReason::Forgot, now));
    }

    if !inserted.is_empty() {
        store.put_many(inserted.clone())?;
    }
    info!(%today, window_days, inserted = inserted.len(), "observance sync complete");
    Ok(inserted)
}
