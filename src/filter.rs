use crate::models::Entry;
use serde::Deserialize;

/// Inclusive date window. Bounds are compared as plain strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    fn from_bound(&self) -> Option<&str> {
        self.from.as_deref().filter(|bound| !bound.is_empty())
    }

    fn to_bound(&self) -> Option<&str> {
        self.to.as_deref().filter(|bound| !bound.is_empty())
    }

    pub fn contains(&self, date: &str) -> bool {
        self.from_bound().is_none_or(|from| date >= from)
            && self.to_bound().is_none_or(|to| date <= to)
    }
}

/// Entries inside `range`, ascending by date. The sort is stable, so entries
/// sharing a date keep the order they were given in.
pub fn filter_entries(entries: &[Entry], range: &DateRange) -> Vec<Entry> {
    let mut view: Vec<Entry> = entries
        .iter()
        .filter(|entry| range.contains(&entry.date))
        .cloned()
        .collect();
    view.sort_by(|a, b| a.date.cmp(&b.date));
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    fn entry(id: &str, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            date: date.to_string(),
            steps: 0,
            sleep: 0.0,
            mood: Mood::Neutral,
            notes: String::new(),
        }
    }

    fn dates(view: &[Entry]) -> Vec<&str> {
        view.iter().map(|e| e.date.as_str()).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("a", "2024-01-01"),
            entry("b", "2023-12-31"),
            entry("c", "2023-12-30"),
            entry("d", "2023-12-29"),
        ]
    }

    #[test]
    fn empty_bounds_return_everything_sorted() {
        let view = filter_entries(&sample(), &DateRange::default());
        assert_eq!(
            dates(&view),
            ["2023-12-29", "2023-12-30", "2023-12-31", "2024-01-01"]
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some("2023-12-30"), Some("2023-12-31"));
        let view = filter_entries(&sample(), &range);
        assert_eq!(dates(&view), ["2023-12-30", "2023-12-31"]);
    }

    #[test]
    fn from_and_to_are_never_violated() {
        let from = DateRange::new(Some("2023-12-31"), None);
        assert!(filter_entries(&sample(), &from)
            .iter()
            .all(|e| e.date.as_str() >= "2023-12-31"));

        let to = DateRange::new(None, Some("2023-12-30"));
        assert!(filter_entries(&sample(), &to)
            .iter()
            .all(|e| e.date.as_str() <= "2023-12-30"));
    }

    #[test]
    fn blank_bounds_count_as_absent() {
        let range = DateRange::new(Some(""), Some(""));
        assert_eq!(filter_entries(&sample(), &range).len(), 4);
    }

    #[test]
    fn inverted_or_malformed_bounds_just_filter_out() {
        let inverted = DateRange::new(Some("2024-01-01"), Some("2023-12-29"));
        assert!(filter_entries(&sample(), &inverted).is_empty());

        let malformed = DateRange::new(Some("zzz"), None);
        assert!(filter_entries(&sample(), &malformed).is_empty());
    }

    #[test]
    fn same_day_entries_keep_input_order() {
        let entries = vec![
            entry("late", "2024-01-02"),
            entry("first", "2024-01-01"),
            entry("second", "2024-01-01"),
        ];
        let view = filter_entries(&entries, &DateRange::default());
        let ids: Vec<&str> = view.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "late"]);
    }

    #[test]
    fn filtering_does_not_touch_input() {
        let entries = sample();
        let before = entries.clone();
        let _ = filter_entries(&entries, &DateRange::new(Some("2024-01-01"), None));
        assert_eq!(entries, before);
    }
}
