//! The observance record store.
//!
//! [`ObservanceLog`] keeps the whole record set as one JSON array under a
//! single key, so every mutation is one atomic `set` on the backend.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::record::ObservanceRecord;

/// Backend key holding the serialized record array.
pub const OBSERVANCE_KEY: &str = "uposatha_observance_entries";

/// Read-modify-write access to the observance history.
///
/// Saving a record replaces any existing record for the same date. Last
/// write wins; concurrent writers are not arbitrated.
pub trait RecordStore {
    /// All records in storage order.
    fn get_all(&self) -> Result<Vec<ObservanceRecord>, StoreError>;

    /// Insert or replace the record for `record.date`.
    fn put(&mut self, record: ObservanceRecord) -> Result<(), StoreError>;

    /// Upsert many records in one store mutation.
    fn put_many(&mut self, records: Vec<ObservanceRecord>) -> Result<(), StoreError>;

    /// Delete by id. Returns whether a record was removed.
    fn delete(&mut self, id: Uuid) -> Result<bool, StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;

    /// Replace the whole history. Duplicate dates keep the first record.
    fn replace_all(&mut self, records: Vec<ObservanceRecord>) -> Result<(), StoreError>;

    fn find_by_date(&self, date: NaiveDate) -> Result<Option<ObservanceRecord>, StoreError> {
        Ok(self.get_all()?.into_iter().find(|r| r.date == date))
    }

    /// Records sorted by date, most recent first.
    fn history(&self) -> Result<Vec<ObservanceRecord>, StoreError> {
        let mut records = self.get_all()?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}

/// [`RecordStore`] over any [`KeyValueStore`] backend.
#[derive(Debug, Clone)]
pub struct ObservanceLog<S> {
    kv: S,
}

impl<S: KeyValueStore> ObservanceLog<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Missing key is an empty history; unparsable JSON is an error.
    fn load(&self) -> Result<Vec<ObservanceRecord>, StoreError> {
        match self.kv.get(OBSERVANCE_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[ObservanceRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.kv.set(OBSERVANCE_KEY, &json)
    }
}

impl<S: KeyValueStore> RecordStore for ObservanceLog<S> {
    fn get_all(&self) -> Result<Vec<ObservanceRecord>, StoreError> {
        self.load()
    }

    fn put(&mut self, record: ObservanceRecord) -> Result<(), StoreError> {
        record.validate()?;
        let mut records = self.load()?;
        records.retain(|r| r.date != record.date);
        info!(date = %record.date, status = ?record.status, "saving observance");
        records.insert(0, record);
        self.save(&records)
    }

    fn put_many(&mut self, incoming: Vec<ObservanceRecord>) -> Result<(), StoreError> {
        if incoming.is_empty() {
            return Ok(());
        }
        for record in &incoming {
            record.validate()?;
        }
        let mut records = self.load()?;
        for record in incoming.into_iter().rev() {
            records.retain(|r| r.date != record.date);
            records.insert(0, record);
        }
        info!(total = records.len(), "saving observance batch");
        self.save(&records)
    }

    fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        info!(%id, "deleted observance");
        self.save(&records)?;
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.kv.remove(OBSERVANCE_KEY)?;
        info!("observance history cleared");
        Ok(())
    }

    fn replace_all(&mut self, records: Vec<ObservanceRecord>) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            record.validate()?;
            if seen.insert(record.date) {
                kept.push(record);
            }
        }
        info!(total = kept.len(), "observance history replaced");
        self.save(&kept)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use uposatha_search::MoonPhase;

    use super::*;
    use crate::kv::MemoryKv;
    use crate::record::{RecordStatus, SkipReason};

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_900_000, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn log() -> ObservanceLog<MemoryKv> {
        ObservanceLog::new(MemoryKv::new())
    }

    #[test]
    fn put_replaces_same_date() {
        let mut log = log();
        log.put(ObservanceRecord::observed(day(10), MoonPhase::Quarter, ts()))
            .unwrap();
        log.put(ObservanceRecord::skipped(
            day(10),
            MoonPhase::Quarter,
            SkipReason::Work,
            ts(),
        ))
        .unwrap();
        let all = log.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, RecordStatus::Skipped);
    }

    #[test]
    fn history_is_date_descending() {
        let mut log = log();
        for d in [25, 10, 11] {
            log.put(ObservanceRecord::observed(day(d), MoonPhase::Full, ts()))
                .unwrap();
        }
        let dates: Vec<_> = log.history().unwrap().into_iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(25), day(11), day(10)]);
        assert!(log.find_by_date(day(11)).unwrap().is_some());
        assert!(log.find_by_date(day(12)).unwrap().is_none());
    }

    #[test]
    fn delete_by_id() {
        let mut log = log();
        let rec = ObservanceRecord::observed(day(10), MoonPhase::Quarter, ts());
        let id = rec.id;
        log.put(rec).unwrap();
        assert!(log.delete(id).unwrap());
        assert!(!log.delete(id).unwrap());
        assert!(log.get_all().unwrap().is_empty());
    }

    #[test]
    fn invalid_record_not_saved() {
        let mut log = log();
        let bad = ObservanceRecord::observed(day(10), MoonPhase::Full, ts()).with_quality(9);
        assert!(matches!(log.put(bad), Err(StoreError::InvalidRecord(_))));
        assert!(!log.kv().contains(OBSERVANCE_KEY).unwrap());
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let mut kv = MemoryKv::new();
        kv.set(OBSERVANCE_KEY, "{not json").unwrap();
        let log = ObservanceLog::new(kv);
        assert!(matches!(log.get_all(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn put_many_and_clear() {
        let mut log = log();
        log.put(ObservanceRecord::observed(day(10), MoonPhase::Quarter, ts()))
            .unwrap();
        let batch = vec![
            ObservanceRecord::skipped(day(10), MoonPhase::Quarter, SkipReason::Forgot, ts()),
            ObservanceRecord::skipped(day(11), MoonPhase::New, SkipReason::Forgot, ts()),
        ];
        log.put_many(batch).unwrap();
        let all = log.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.status == RecordStatus::Skipped));
        log.clear().unwrap();
        assert!(log.get_all().unwrap().is_empty());
    }

    #[test]
    fn replace_all_dedupes_dates() {
        let mut log = log();
        let first = ObservanceRecord::observed(day(10), MoonPhase::Quarter, ts());
        let dup = ObservanceRecord::skipped(day(10), MoonPhase::Quarter, SkipReason::Other, ts());
        log.replace_all(vec![first.clone(), dup]).unwrap();
        assert_eq!(log.get_all().unwrap(), vec![first]);
    }
}
