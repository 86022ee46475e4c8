use crate::models::{ChartPoint, DashboardResponse, Entry, Mood};
use chrono::{Days, Local, NaiveDate};

const DASHBOARD_WINDOW_DAYS: u32 = 7;

pub fn build_dashboard(all: &[Entry], view: &[Entry]) -> DashboardResponse {
    build_dashboard_at(Local::now().date_naive(), all, view)
}

/// `latest` looks at the whole collection; the windowed numbers only at the
/// filtered `view`.
pub fn build_dashboard_at(today: NaiveDate, all: &[Entry], view: &[Entry]) -> DashboardResponse {
    let window = last_n_days(view, DASHBOARD_WINDOW_DAYS, today);

    DashboardResponse {
        latest: latest(all).cloned(),
        steps_7_days: total_steps(&window),
        avg_sleep_7_days: average_sleep(&window),
        happy_days: count_by_mood(view, Mood::Happy),
    }
}

pub fn chart_series(view: &[Entry]) -> Vec<ChartPoint> {
    view.iter()
        .map(|entry| ChartPoint {
            date: entry.date.clone(),
            steps: entry.steps,
            sleep: entry.sleep,
        })
        .collect()
}

/// Entry with the greatest date. Among entries sharing that date the last
/// one in input order wins.
pub fn latest(entries: &[Entry]) -> Option<&Entry> {
    entries.iter().max_by(|a, b| a.date.cmp(&b.date))
}

/// Entries dated within the trailing `n` calendar days ending at `today`.
pub fn last_n_days(entries: &[Entry], n: u32, today: NaiveDate) -> Vec<Entry> {
    let min_date = match n {
        0 => today.succ_opt(),
        _ => today.checked_sub_days(Days::new(u64::from(n) - 1)),
    };

    match min_date {
        Some(min_date) => {
            let min_key = date_key(min_date);
            entries
                .iter()
                .filter(|entry| entry.date >= min_key)
                .cloned()
                .collect()
        }
        None if n == 0 => Vec::new(),
        None => entries.to_vec(),
    }
}

pub fn total_steps(entries: &[Entry]) -> u64 {
    entries
        .iter()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.steps))
}

/// Mean sleep rounded to one decimal, `0.0` for no entries.
pub fn average_sleep(entries: &[Entry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let sum: f64 = entries.iter().map(|entry| entry.sleep).sum();
    let mean = sum / entries.len() as f64;
    (mean * 10.0).round() / 10.0
}

pub fn count_by_mood(entries: &[Entry], mood: Mood) -> usize {
    entries.iter().filter(|entry| entry.mood == mood).count()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
