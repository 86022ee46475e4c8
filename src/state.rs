use crate::models::{AppData, Session};
use crate::store::EntryStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything a request may read or change, guarded by one lock so each
/// mutation and its save complete before the next request runs.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pub store: EntryStore,
    pub dark_mode: bool,
    pub user: Option<Session>,
}

impl Tracker {
    pub fn from_data(data: AppData) -> Self {
        Self {
            store: EntryStore::from_entries(data.entries),
            dark_mode: data.dark_mode,
            user: data.user,
        }
    }

    pub fn snapshot(&self) -> AppData {
        AppData {
            entries: self.store.list(),
            dark_mode: self.dark_mode,
            user: self.user.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            tracker: Arc::new(Mutex::new(Tracker::from_data(data))),
        }
    }
}
