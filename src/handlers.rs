use crate::auth;
use crate::codec;
use crate::errors::AppError;
use crate::filter::{filter_entries, DateRange};
use crate::models::{
    ChartPoint, DashboardResponse, Entry, EntryFields, ImportResponse, LoginRequest, Preferences,
    SessionResponse,
};
use crate::state::{AppState, Tracker};
use crate::stats::{build_dashboard, chart_series};
use crate::storage::persist_data;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

const EXPORT_FILENAME: &str = "wellness-entries.csv";

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = auth::login(&payload.email, &payload.password)?;
    let mut tracker = state.tracker.lock().await;
    let previous = tracker.clone();
    tracker.user = Some(session.clone());
    save_or_rollback(&state, &mut tracker, previous).await?;

    info!(email = %session.email, "logged in");
    Ok(Json(SessionResponse {
        user: Some(session),
    }))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut tracker = state.tracker.lock().await;
    let previous = tracker.clone();
    if tracker.user.take().is_some() {
        save_or_rollback(&state, &mut tracker, previous).await?;
        info!("logged out");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let tracker = state.tracker.lock().await;
    Json(SessionResponse {
        user: tracker.user.clone(),
    })
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    let tracker = state.tracker.lock().await;
    Json(Preferences {
        dark_mode: tracker.dark_mode,
    })
}

pub async fn put_preferences(
    State(state): State<AppState>,
    Json(payload): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let previous = tracker.clone();
    tracker.dark_mode = payload.dark_mode;
    save_or_rollback(&state, &mut tracker, previous).await?;
    Ok(Json(payload))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;
    Ok(Json(filter_entries(tracker.store.entries(), &range)))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let mut tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let fields = EntryFields::try_from(body)?;
    let previous = tracker.clone();
    let entry = tracker.store.create(fields)?;
    save_or_rollback(&state, &mut tracker, previous).await?;

    info!(id = %entry.id, date = %entry.date, "entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Entry>, AppError> {
    let mut tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let fields = EntryFields::try_from(body)?;
    let previous = tracker.clone();
    let entry = tracker.store.update(&id, fields)?;
    save_or_rollback(&state, &mut tracker, previous).await?;

    info!(id = %entry.id, date = %entry.date, "entry updated");
    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let previous = tracker.clone();
    if tracker.store.delete(&id) {
        save_or_rollback(&state, &mut tracker, previous).await?;
        info!(id = %id, "entry deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Json<DashboardResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let all = tracker.store.entries();
    let view = filter_entries(all, &range);
    Ok(Json(build_dashboard(all, &view)))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<ChartPoint>>, AppError> {
    let tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let view = filter_entries(tracker.store.entries(), &range);
    Ok(Json(chart_series(&view)))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let csv = codec::encode(tracker.store.entries());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

pub async fn import_csv(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    auth::require_session(tracker.user.as_ref())?;

    let entries = codec::decode(&body)?;
    let previous = tracker.clone();
    let imported = tracker.store.import(entries)?;
    save_or_rollback(&state, &mut tracker, previous).await?;

    info!(imported, "entries imported");
    Ok(Json(ImportResponse {
        imported,
        total: tracker.store.len(),
    }))
}

/// Persists the mutated state. On failure the in-memory state goes back to
/// `previous`, so a refused request changes nothing.
async fn save_or_rollback(
    state: &AppState,
    tracker: &mut Tracker,
    previous: Tracker,
) -> Result<(), AppError> {
    if let Err(err) = persist_data(&state.data_path, &tracker.snapshot()).await {
        error!("failed to persist state, rolling back: {}", err.message);
        *tracker = previous;
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppData, Mood, Session};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "wellness_handlers_{name}_{}_{nanos}.json",
            std::process::id()
        ))
    }

    fn logged_in(entries: Vec<Entry>) -> AppData {
        AppData {
            entries,
            dark_mode: false,
            user: Some(Session {
                email: "demo@wellness.com".to_string(),
            }),
        }
    }

    fn stored_entry() -> Entry {
        Entry {
            id: "kept".to_string(),
            date: "2024-01-01".to_string(),
            steps: 6500,
            sleep: 7.0,
            mood: Mood::Happy,
            notes: String::new(),
        }
    }

    fn body(date: &str, steps: i64) -> serde_json::Value {
        serde_json::json!({ "date": date, "steps": steps, "sleep": 7, "mood": "Neutral" })
    }

    // A directory cannot be written as a file, so every save fails.
    fn unwritable_state(entries: Vec<Entry>) -> AppState {
        AppState::new(std::env::temp_dir(), logged_in(entries))
    }

    #[tokio::test]
    async fn failed_save_rolls_back_create() {
        let state = unwritable_state(Vec::new());

        for _ in 0..2 {
            let err = create_entry(State(state.clone()), Json(body("2024-01-02", 10)))
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        }
        assert!(state.tracker.lock().await.store.is_empty());
    }

    #[tokio::test]
    async fn failed_save_rolls_back_update_delete_and_import() {
        let state = unwritable_state(vec![stored_entry()]);

        let update = update_entry(
            State(state.clone()),
            Path("kept".to_string()),
            Json(body("2024-02-02", 1)),
        )
        .await;
        assert!(update.is_err());

        let delete = delete_entry(State(state.clone()), Path("kept".to_string())).await;
        assert!(delete.is_err());

        let mut incoming = stored_entry();
        incoming.id = "new".to_string();
        let import = import_csv(State(state.clone()), codec::encode(&[incoming])).await;
        assert!(import.is_err());

        let prefs = put_preferences(State(state.clone()), Json(Preferences { dark_mode: true })).await;
        assert!(prefs.is_err());

        let tracker = state.tracker.lock().await;
        assert_eq!(tracker.store.list(), vec![stored_entry()]);
        assert!(!tracker.dark_mode);
    }

    #[tokio::test]
    async fn successful_create_is_persisted() {
        let path = temp_path("create");
        let state = AppState::new(path.clone(), logged_in(Vec::new()));

        let (status, Json(entry)) = create_entry(State(state.clone()), Json(body("2024-01-02", 10)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let saved = crate::storage::load_data(&path, false, chrono::NaiveDate::MIN).await;
        assert_eq!(saved.entries, vec![entry]);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn wrongly_typed_body_is_a_bad_request() {
        let state = AppState::new(temp_path("typed"), logged_in(Vec::new()));

        let err = create_entry(
            State(state.clone()),
            Json(serde_json::json!({ "date": "2024-01-02", "steps": "6500", "sleep": 7, "mood": "Happy" })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(state.tracker.lock().await.store.is_empty());
    }
}
