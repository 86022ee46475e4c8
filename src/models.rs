use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Tired,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Neutral, Mood::Tired, Mood::Stressed];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Tired => "Tired",
            Mood::Stressed => "Stressed",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == value)
            .ok_or_else(|| format!("mood must be one of Happy, Neutral, Tired, Stressed (got '{value}')"))
    }
}

/// One day's wellness observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub date: String,
    pub steps: u64,
    pub sleep: f64,
    pub mood: Mood,
    #[serde(default)]
    pub notes: String,
}

/// Caller-supplied fields for create and update. Every field is optional so
/// that a missing value surfaces as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFields {
    pub date: Option<String>,
    pub steps: Option<i64>,
    pub sleep: Option<f64>,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

impl EntryFields {
    pub fn new(date: &str, steps: i64, sleep: f64, mood: Mood) -> Self {
        Self {
            date: Some(date.to_string()),
            steps: Some(steps),
            sleep: Some(sleep),
            mood: Some(mood.as_str().to_string()),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Request bodies arrive as raw JSON so that a wrongly typed field (say
/// `"steps": "6500"`) is refused as a validation error like any other bad
/// value.
impl TryFrom<serde_json::Value> for EntryFields {
    type Error = StoreError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value).map_err(|err| StoreError::Validation(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

/// On-disk layout of the state file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub user: Option<Session>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<Session>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub steps: u64,
    pub sleep: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub latest: Option<Entry>,
    pub steps_7_days: u64,
    pub avg_sleep_7_days: f64,
    pub happy_days: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub total: usize,
}
