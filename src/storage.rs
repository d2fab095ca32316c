use crate::errors::{AppError, StoreError};
use crate::models::UsersStore;
use crate::program::TOTAL_DAYS;
use std::{collections::HashSet, env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/warmup_db.json"))
}

/// Reads the store. Anything missing, unreadable or malformed yields an empty store.
pub async fn load_store(path: &Path) -> UsersStore {
    match fs::read(path).await {
        Ok(bytes) => match parse_store(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("discarding stored users: {err}");
                UsersStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => UsersStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            UsersStore::default()
        }
    }
}

pub fn parse_store(bytes: &[u8]) -> Result<UsersStore, StoreError> {
    let store: UsersStore = serde_json::from_slice(bytes)?;

    for (key, user) in &store.users {
        let invalid = |reason: String| StoreError::InvalidRecord {
            username: key.clone(),
            reason,
        };

        if user.username != *key {
            return Err(invalid(format!("stored under a different name '{}'", user.username)));
        }
        if !(1..=TOTAL_DAYS).contains(&user.current_day) {
            return Err(invalid(format!("current day {} out of range", user.current_day)));
        }
        let mut seen = HashSet::new();
        for &day in &user.completed_days {
            if !(1..=TOTAL_DAYS).contains(&day) {
                return Err(invalid(format!("completed day {day} out of range")));
            }
            if !seen.insert(day) {
                return Err(invalid(format!("completed day {day} listed twice")));
            }
        }
    }

    Ok(store)
}

pub async fn persist_store(path: &Path, store: &UsersStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(StoreError::from)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProgress;
    use chrono::{TimeZone, Utc};

    fn unique_data_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("warmup_store_{tag}_{}_{}.json", std::process::id(), nanos));
        path
    }

    fn sample_store() -> UsersStore {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        let mut store = UsersStore::default();
        let mut dana = UserProgress::new("dana", now);
        dana.completed_days = vec![2, 1];
        dana.current_day = 3;
        store.upsert(dana);
        store.upsert(UserProgress::new("avi", now));
        store
    }

    #[test]
    fn parses_camel_case_layout() {
        let raw = br#"{
            "dana": {
                "username": "dana",
                "completedDays": [1, 2],
                "currentDay": 3,
                "startDate": "2026-01-05T09:30:00.000Z",
                "lastActiveDate": "2026-01-07T18:00:00.000Z"
            }
        }"#;
        let store = parse_store(raw).expect("valid store");
        let dana = store.get("dana").expect("dana");
        assert_eq!(dana.completed_days, vec![1, 2]);
        assert_eq!(dana.current_day, 3);
    }

    #[test]
    fn rejects_garbage_and_bad_records() {
        assert!(matches!(parse_store(b"not json"), Err(StoreError::Malformed(_))));
        assert!(matches!(parse_store(b"[1,2,3]"), Err(StoreError::Malformed(_))));

        let mut store = sample_store();
        store.users.get_mut("dana").unwrap().current_day = 11;
        let bytes = serde_json::to_vec(&store).unwrap();
        assert!(matches!(parse_store(&bytes), Err(StoreError::InvalidRecord { .. })));

        let mut store = sample_store();
        store.users.get_mut("dana").unwrap().completed_days = vec![1, 1];
        let bytes = serde_json::to_vec(&store).unwrap();
        assert!(matches!(parse_store(&bytes), Err(StoreError::InvalidRecord { .. })));

        let mut store = sample_store();
        store.users.get_mut("avi").unwrap().username = "dana".into();
        let bytes = serde_json::to_vec(&store).unwrap();
        assert!(matches!(parse_store(&bytes), Err(StoreError::InvalidRecord { .. })));
    }

    #[tokio::test]
    async fn missing_or_corrupt_file_loads_empty() {
        let path = unique_data_path("missing");
        assert!(load_store(&path).await.is_empty());

        fs::write(&path, b"{ oops").await.unwrap();
        assert!(load_store(&path).await.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn save_load_is_stable() {
        let path = unique_data_path("stable");
        let store = sample_store();
        persist_store(&path, &store).await.unwrap();
        let first = fs::read(&path).await.unwrap();

        for _ in 0..3 {
            let loaded = load_store(&path).await;
            assert_eq!(loaded, store);
            persist_store(&path, &loaded).await.unwrap();
        }

        let last = fs::read(&path).await.unwrap();
        assert_eq!(first, last);
        let _ = fs::remove_file(&path).await;
    }
}
