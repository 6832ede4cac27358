//! Observance history: records, persistence, backfill and statistics.
//!
//! - [`ObservanceRecord`] is the persisted, user-owned entry for one date
//! - [`ObservanceLog`] implements [`RecordStore`] over any [`KeyValueStore`]
//! - [`sync_missed`] backfills forgotten Uposatha days in a trailing window
//! - [`compute_stats`] reduces a record set to rate, streaks and breakdowns

pub mod backup;
pub mod error;
pub mod kv;
pub mod log;
pub mod record;
pub mod stats;
pub mod sync;

pub use backup::{
    BACKUP_VERSION, BackupData, BackupPayload, create_backup, restore_backup, validate_backup,
};
pub use error::{StoreError, SyncError};
pub use kv::{FileKv, KeyValueStore, MemoryKv};
pub use log::{OBSERVANCE_KEY, ObservanceLog, RecordStore};
pub use record::{
    ObservanceRecord, PracticeLevel, PracticeMinutes, QUALITY_RANGE, RecordStatus, SkipReason,
};
pub use stats::{
    MonthTally, ObservanceStats, PhaseBreakdown, PhaseTally, compute_stats, current_streak,
    longest_streak, observance_rate,
};
pub use sync::{BACKFILL_WINDOW_DAYS, sync_missed, sync_missed_within};
