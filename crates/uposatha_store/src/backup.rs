//! Versioned export and restore of the observance history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::StoreError;
use crate::log::RecordStore;
use crate::record::ObservanceRecord;

/// Only supported payload version.
pub const BACKUP_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    #[serde(default)]
    pub uposatha_observances: Vec<ObservanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    pub version: u32,
    pub app_version: String,
    pub created_at: DateTime<Utc>,
    pub data: BackupData,
}

/// Snapshot the store into a payload.
pub fn create_backup<S: RecordStore + ?Sized>(
    store: &S,
    app_version: &str,
    now: DateTime<Utc>,
) -> Result<BackupPayload, StoreError> {
    Ok(BackupPayload {
        version: BACKUP_VERSION,
        app_version: app_version.to_string(),
        created_at: now,
        data: BackupData {
            uposatha_observances: store.get_all()?,
        },
    })
}

fn unsupported(msg: impl Into<String>) -> StoreError {
    StoreError::UnsupportedBackup(msg.into())
}

/// Parse and check raw backup JSON.
///
/// Missing `appVersion` reads as `"unknown"`, missing `createdAt` as `now`
/// and a missing observance array as empty. Every record is validated.
pub fn validate_backup(json: &str, now: DateTime<Utc>) -> Result<BackupPayload, StoreError> {
    let parsed: Value =
        serde_json::from_str(json).map_err(|e| unsupported(format!("not valid JSON: {e}")))?;
    let obj = parsed
        .as_object()
        .ok_or_else(|| unsupported("file does not contain a backup object"))?;

    match obj.get("version").and_then(Value::as_u64) {
        Some(v) if v == u64::from(BACKUP_VERSION) => {}
        _ => {
            let found = obj.get("version").cloned().unwrap_or(Value::Null);
            return Err(unsupported(format!(
                "backup version {found} (supported: {BACKUP_VERSION})"
            )));
        }
    }

    let data = obj
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| unsupported("backup is missing its data section"))?;

    let uposatha_observances: Vec<ObservanceRecord> = match data.get("uposathaObservances") {
        Some(arr @ Value::Array(_)) => serde_json::from_value(arr.clone())?,
        _ => Vec::new(),
    };
    for record in &uposatha_observances {
        record.validate()?;
    }

    let app_version = obj
        .get("appVersion")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string();
    let created_at = obj
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or(now, |d| d.with_timezone(&Utc));

    Ok(BackupPayload {
        version: BACKUP_VERSION,
        app_version,
        created_at,
        data: BackupData {
            uposatha_observances,
        },
    })
}

/// Replace the store's history with the payload. Returns the number of
/// records written.
pub fn restore_backup<S: RecordStore + ?Sized>(
    store: &mut S,
    payload: BackupPayload,
) -> Result<usize, StoreError> {
    store.replace_all(payload.data.uposatha_observances)?;
    let restored = store.get_all()?.len();
    info!(restored, from_version = %payload.app_version, "backup restored");
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uposatha_search::MoonPhase;

    use super::*;
    use crate::kv::MemoryKv;
    use crate::log::ObservanceLog;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_710_000_000, 0).unwrap()
    }

    fn err_text(json: &str) -> String {
        match validate_backup(json, now()) {
            Err(StoreError::UnsupportedBackup(msg)) => msg,
            other => panic!("expected UnsupportedBackup, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(err_text("not json").contains("not valid JSON"));
        assert!(err_text("[1,2]").contains("backup object"));
        assert!(err_text(r#"{"version":2,"data":{}}"#).contains("version 2"));
        assert!(err_text(r#"{"data":{}}"#).contains("version null"));
        assert!(err_text(r#"{"version":1}"#).contains("data section"));
    }

    #[test]
    fn defaults_missing_fields() {
        let payload = validate_backup(r#"{"version":1,"data":{"malaEntries":[]}}"#, now()).unwrap();
        assert_eq!(payload.app_version, "unknown");
        assert_eq!(payload.created_at, now());
        assert!(payload.data.uposatha_observances.is_empty());
    }

    #[test]
    fn export_then_restore_into_fresh_store() {
        let mut source = ObservanceLog::new(MemoryKv::new());
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        source
            .put(ObservanceRecord::observed(date, MoonPhase::Full, now()))
            .unwrap();

        let json = serde_json::to_string(&create_backup(&source, "1.4.0", now()).unwrap()).unwrap();
        assert!(json.contains("\"uposathaObservances\""));

        let payload = validate_backup(&json, now()).unwrap();
        assert_eq!(payload.app_version, "1.4.0");

        let mut target = ObservanceLog::new(MemoryKv::new());
        assert_eq!(restore_backup(&mut target, payload).unwrap(), 1);
        assert_eq!(target.get_all().unwrap(), source.get_all().unwrap());
    }

    #[test]
    fn invalid_record_in_backup_rejected() {
        let json = r#"{"version":1,"data":{"uposathaObservances":[{
            "id":"0b6f2f8e-7d2c-4a4e-9d35-2f1c3b7a9e10","date":"2024-01-10",
            "moonPhase":"quarter","status":"observed","quality":7,
            "timestamp":"2024-01-10T18:00:00Z"}]}}"#;
        assert!(matches!(
            validate_backup(json, now()),
            Err(StoreError::InvalidRecord(_))
        ));
    }
}
