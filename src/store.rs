use crate::errors::StoreError;
use crate::models::{Entry, EntryFields, Mood};
use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Owns the canonical entry collection.
///
/// Entries are kept in insertion order. Every id handed out or loaded is
/// remembered, so a deleted id is never reissued by the same instance.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    issued: HashSet<String>,
}

struct ValidFields {
    date: String,
    steps: u64,
    sleep: f64,
    mood: Mood,
    notes: String,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a previously persisted collection. Invalid rows
    /// and later duplicates of an id are dropped.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            if let Err(err) = validate_entry(&entry) {
                warn!(id = %entry.id, "skipping stored entry: {err}");
                continue;
            }
            if store.issued.insert(entry.id.clone()) {
                store.entries.push(entry);
            } else {
                warn!(id = %entry.id, "skipping stored entry with duplicate id");
            }
        }
        store
    }

    pub fn create(&mut self, fields: EntryFields) -> Result<Entry, StoreError> {
        let valid = validate_fields(fields)?;
        let entry = Entry {
            id: self.fresh_id(),
            date: valid.date,
            steps: valid.steps,
            sleep: valid.sleep,
            mood: valid.mood,
            notes: valid.notes,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn update(&mut self, id: &str, fields: EntryFields) -> Result<Entry, StoreError> {
        let position = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let valid = validate_fields(fields)?;

        let entry = &mut self.entries[position];
        entry.date = valid.date;
        entry.steps = valid.steps;
        entry.sleep = valid.sleep;
        entry.mood = valid.mood;
        entry.notes = valid.notes;
        Ok(entry.clone())
    }

    /// Removes the entry if present. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }

    /// Merges decoded entries into the store: known ids are replaced in
    /// place, unknown ids are appended. Nothing changes unless every entry
    /// is valid and no id repeats within `entries`.
    pub fn import(&mut self, entries: Vec<Entry>) -> Result<usize, StoreError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(StoreError::Validation(format!(
                    "id '{}' appears more than once in the import",
                    entry.id
                )));
            }
        }

        let count = entries.len();
        for entry in entries {
            match self.position(&entry.id) {
                Some(position) => self.entries[position] = entry,
                None => {
                    self.issued.insert(entry.id.clone());
                    self.entries.push(entry);
                }
            }
        }
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn list(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// The four demo rows a fresh install starts with, dated back from `today`.
pub fn demo_seed(today: NaiveDate) -> Result<EntryStore, StoreError> {
    let day = |offset: u64| {
        today
            .checked_sub_days(Days::new(offset))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    let mut store = EntryStore::new();
    store.create(EntryFields::new(&day(0), 6500, 7.0, Mood::Happy).with_notes("Good day"))?;
    store.create(EntryFields::new(&day(1), 5200, 6.5, Mood::Neutral))?;
    store.create(EntryFields::new(&day(2), 8000, 7.5, Mood::Happy))?;
    store.create(EntryFields::new(&day(3), 3000, 5.0, Mood::Tired))?;
    Ok(store)
}

fn validate_fields(fields: EntryFields) -> Result<ValidFields, StoreError> {
    let date = fields.date.ok_or_else(|| missing("date"))?;
    check_date(&date)?;

    let steps = fields.steps.ok_or_else(|| missing("steps"))?;
    let steps = u64::try_from(steps)
        .map_err(|_| StoreError::Validation(format!("steps must be >= 0 (got {steps})")))?;

    let sleep = fields.sleep.ok_or_else(|| missing("sleep"))?;
    check_sleep(sleep)?;

    let mood = fields.mood.ok_or_else(|| missing("mood"))?;
    let mood = mood.trim().parse::<Mood>().map_err(StoreError::Validation)?;

    Ok(ValidFields {
        date,
        steps,
        sleep,
        mood,
        notes: fields.notes.unwrap_or_default(),
    })
}

fn validate_entry(entry: &Entry) -> Result<(), StoreError> {
    if entry.id.trim().is_empty() {
        return Err(StoreError::Validation("id must not be empty".to_string()));
    }
    check_date(&entry.date)?;
    check_sleep(entry.sleep)
}

fn missing(field: &str) -> StoreError {
    StoreError::Validation(format!("{field} is required"))
}

/// Accepts only fixed-width, zero-padded `YYYY-MM-DD` naming a real day.
fn check_date(date: &str) -> Result<(), StoreError> {
    let shape_ok = date.len() == 10
        && date.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });

    if shape_ok && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "date must be YYYY-MM-DD (got '{date}')"
        )))
    }
}

fn check_sleep(sleep: f64) -> Result<(), StoreError> {
    if sleep.is_finite() && sleep >= 0.0 {
        Ok(())
    } else {
        Err(StoreError::Validation(format!("sleep must be >= 0 (got {sleep})")))
    }
}
