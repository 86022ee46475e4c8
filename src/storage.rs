use crate::errors::AppError;
use crate::models::AppData;
use crate::store::demo_seed;
use chrono::NaiveDate;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Reads the state file. A missing file starts fresh (optionally with demo
/// rows); an unreadable or corrupt one is logged and replaced by empty state.
pub async fn load_data(path: &Path, seed_demo: bool, today: NaiveDate) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => fresh_data(seed_demo, today),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}

fn fresh_data(seed_demo: bool, today: NaiveDate) -> AppData {
    if !seed_demo {
        return AppData::default();
    }
    match demo_seed(today) {
        Ok(store) => {
            info!(entries = store.len(), "seeded demo entries");
            AppData {
                entries: store.list(),
                ..AppData::default()
            }
        }
        Err(err) => {
            error!("failed to seed demo entries: {err}");
            AppData::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Mood, Session};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "wellness_storage_{name}_{}_{nanos}.json",
            std::process::id()
        ))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn missing_file_seeds_or_starts_empty() {
        let path = temp_path("missing");
        assert_eq!(load_data(&path, true, today()).await.entries.len(), 4);
        assert!(load_data(&path, false, today()).await.entries.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{ not json").await.unwrap();
        let data = load_data(&path, true, today()).await;
        assert!(data.entries.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_state_loads_back() {
        let path = temp_path("roundtrip");
        let data = AppData {
            entries: vec![Entry {
                id: "abc".to_string(),
                date: "2024-01-01".to_string(),
                steps: 6500,
                sleep: 7.0,
                mood: Mood::Happy,
                notes: "Good day".to_string(),
            }],
            dark_mode: true,
            user: Some(Session {
                email: "demo@wellness.com".to_string(),
            }),
        };

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path, true, today()).await;
        assert_eq!(loaded.entries, data.entries);
        assert!(loaded.dark_mode);
        assert_eq!(loaded.user, data.user);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn entries_without_notes_load_with_empty_notes() {
        let path = temp_path("no_notes");
        let raw = r#"{"entries":[{"id":"n","date":"2023-12-31","steps":5200,"sleep":6.5,"mood":"Neutral"}]}"#;
        fs::write(&path, raw).await.unwrap();
        let loaded = load_data(&path, true, today()).await;
        assert_eq!(loaded.entries[0].notes, "");
        assert!(!loaded.dark_mode);
        assert!(loaded.user.is_none());
        let _ = fs::remove_file(&path).await;
    }
}
