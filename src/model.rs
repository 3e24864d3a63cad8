use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type DateKey = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    date: NaiveDate,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityMap {
    notes: BTreeMap<DateKey, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    WeekSeparator {
        label: String,
    },
    Day {
        key: DateKey,
        date: NaiveDate,
        weekday: &'static str,
        date_label: String,
        note: String,
        is_today: bool,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error("not a calendar date (expected YYYY-MM-DD): {0}")]
    InvalidDateKey(String),
    #[error("date {0} is outside the planning range")]
    OutOfRange(String),
}

impl PlanRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        PlanRange { start, end }
    }

    /// The fixed planning window: Mar 09, 2026 through Dec 31, 2026.
    pub fn plan_2026() -> Self {
        PlanRange::new(
            NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid range start"),
            NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid range end"),
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.start
            .iter_days()
            .take_while(|date| *date <= self.end)
            .map(|date| CalendarDay { date })
    }
}

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        CalendarDay { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_key(&self) -> DateKey {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn weekday_name(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn date_label(&self) -> String {
        self.date.format("%b %d, %Y").to_string()
    }

    pub fn is_monday(&self) -> bool {
        self.date.weekday() == Weekday::Mon
    }
}

impl ActivityMap {
    pub fn note(&self, key: &str) -> &str {
        self.notes.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set_note(&mut self, key: DateKey, text: &str) {
        self.notes.insert(key, text.trim().to_string());
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Row {
    pub fn is_day(&self) -> bool {
        matches!(self, Row::Day { .. })
    }

    pub fn is_today(&self) -> bool {
        matches!(self, Row::Day { is_today: true, .. })
    }

    pub fn visible_text(&self) -> String {
        match self {
            Row::WeekSeparator { label } => label.clone(),
            Row::Day {
                weekday,
                date_label,
                note,
                ..
            } => format!("{} {} {}", weekday, date_label, note),
        }
    }
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, PlanError> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidDateKey(key.to_string()))
}

pub fn build_rows(
    range: &PlanRange,
    activities: &ActivityMap,
    group_by_week: bool,
    today: NaiveDate,
) -> Vec<Row> {
    let mut rows = Vec::new();
    for day in range.days() {
        if group_by_week && day.is_monday() {
            rows.push(Row::WeekSeparator {
                label: format!("Week of {}", day.date_label()),
            });
        }
        let key = day.date_key();
        rows.push(Row::Day {
            note: activities.note(&key).to_string(),
            key,
            date: day.date(),
            weekday: day.weekday_name(),
            date_label: day.date_label(),
            is_today: day.date() == today,
        });
    }
    rows
}

pub fn row_visible(row: &Row, query: &str, group_by_week: bool) -> bool {
    match row {
        Row::WeekSeparator { .. } => group_by_week,
        Row::Day { .. } => {
            let query = query.trim().to_lowercase();
            query.is_empty() || row.visible_text().to_lowercase().contains(&query)
        }
    }
}

pub fn today_row_index(rows: &[Row]) -> Option<usize> {
    match rows.iter().position(|row| row.is_today()) {
        Some(idx) => Some(idx),
        None if rows.is_empty() => None,
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn plan_range_covers_every_day_once_in_order() {
        let range = PlanRange::plan_2026();
        let days: Vec<NaiveDate> = range.days().map(|day| day.date()).collect();
        assert_eq!(days.first().copied(), Some(date(2026, 3, 9)));
        assert_eq!(days.last().copied(), Some(date(2026, 12, 31)));
        assert_eq!(days.len(), 298);
        for pair in days.windows(2) {
            assert_eq!(Some(pair[1]), pair[0].succ_opt());
        }
    }

    #[test]
    fn range_is_restartable() {
        let range = PlanRange::plan_2026();
        assert_eq!(range.days().count(), range.days().count());
    }

    #[test]
    fn range_contains_bounds_inclusive() {
        let range = PlanRange::plan_2026();
        assert!(range.contains(date(2026, 3, 9)));
        assert!(range.contains(date(2026, 12, 31)));
        assert!(!range.contains(date(2026, 3, 8)));
        assert!(!range.contains(date(2027, 1, 1)));
    }

    #[test]
    fn day_labels_match_display_format() {
        let day = CalendarDay::new(date(2026, 3, 9));
        assert_eq!(day.date_key(), "2026-03-09");
        assert_eq!(day.weekday_name(), "Monday");
        assert_eq!(day.date_label(), "Mar 09, 2026");
        assert!(day.is_monday());
        assert!(!CalendarDay::new(date(2026, 3, 10)).is_monday());
    }

    #[test]
    fn separator_precedes_monday_when_grouping() {
        let range = PlanRange::new(date(2026, 3, 9), date(2026, 3, 15));
        let rows = build_rows(&range, &ActivityMap::default(), true, date(2025, 1, 1));
        assert_eq!(
            rows[0],
            Row::WeekSeparator {
                label: "Week of Mar 09, 2026".to_string(),
            }
        );
        match &rows[1] {
            Row::Day { key, weekday, .. } => {
                assert_eq!(key, "2026-03-09");
                assert_eq!(*weekday, "Monday");
            }
            other => panic!("expected day row after separator, got {:?}", other),
        }
        assert_eq!(rows.iter().filter(|row| !row.is_day()).count(), 1);
        assert_eq!(rows.len(), 8);
    }

    #[test]
    fn midweek_start_gets_no_leading_separator() {
        let range = PlanRange::new(date(2026, 3, 11), date(2026, 3, 17));
        let rows = build_rows(&range, &ActivityMap::default(), true, date(2025, 1, 1));
        assert!(rows[0].is_day());
        let sep_idx = rows
            .iter()
            .position(|row| !row.is_day())
            .expect("one separator in range");
        assert_eq!(rows[sep_idx].visible_text(), "Week of Mar 16, 2026");
        match &rows[sep_idx + 1] {
            Row::Day { key, .. } => assert_eq!(key, "2026-03-16"),
            other => panic!("expected Monday row after separator, got {:?}", other),
        }
    }

    #[test]
    fn no_separators_when_grouping_disabled() {
        let rows = build_rows(
            &PlanRange::plan_2026(),
            &ActivityMap::default(),
            false,
            date(2026, 6, 15),
        );
        assert!(rows.iter().all(|row| row.is_day()));
        assert_eq!(rows.len(), 298);
    }

    #[test]
    fn exactly_one_row_highlighted_for_today_in_range() {
        let rows = build_rows(
            &PlanRange::plan_2026(),
            &ActivityMap::default(),
            true,
            date(2026, 6, 15),
        );
        let highlighted: Vec<&Row> = rows.iter().filter(|row| row.is_today()).collect();
        assert_eq!(highlighted.len(), 1);
        match highlighted[0] {
            Row::Day { key, .. } => assert_eq!(key, "2026-06-15"),
            other => panic!("expected day row, got {:?}", other),
        }
    }

    #[test]
    fn no_highlight_when_today_outside_range() {
        let rows = build_rows(
            &PlanRange::plan_2026(),
            &ActivityMap::default(),
            false,
            date(2027, 1, 1),
        );
        assert!(rows.iter().all(|row| !row.is_today()));
    }

    #[test]
    fn filter_matches_weekday_date_and_note_case_insensitively() {
        let mut activities = ActivityMap::default();
        activities.set_note("2026-03-10".to_string(), "Dentist at 10:00");
        let range = PlanRange::new(date(2026, 3, 9), date(2026, 3, 15));
        let rows = build_rows(&range, &activities, false, date(2025, 1, 1));
        let visible =
            |query: &str| rows.iter().filter(|row| row_visible(row, query, false)).count();
        assert_eq!(visible(""), 7);
        assert_eq!(visible("   "), 7);
        assert_eq!(visible("DENTIST"), 1);
        assert_eq!(visible("tuesday"), 1);
        assert_eq!(visible("Mar 12, 2026"), 1);
        assert_eq!(visible("zzz"), 0);
        for row in &rows {
            assert_eq!(
                row_visible(row, "dent", false),
                row.visible_text().to_lowercase().contains("dent")
            );
        }
    }

    #[test]
    fn separator_visibility_ignores_query() {
        let sep = Row::WeekSeparator {
            label: "Week of Mar 09, 2026".to_string(),
        };
        assert!(row_visible(&sep, "no such text", true));
        assert!(row_visible(&sep, "", true));
        assert!(!row_visible(&sep, "", false));
        assert!(!row_visible(&sep, "week", false));
    }

    #[test]
    fn set_note_trims_text() {
        let mut activities = ActivityMap::default();
        activities.set_note("2026-03-10".to_string(), "  Dentist  ");
        assert_eq!(activities.note("2026-03-10"), "Dentist");
        assert_eq!(activities.note("2026-03-11"), "");
    }

    #[test]
    fn clear_is_idempotent() {
        let mut activities = ActivityMap::default();
        activities.set_note("2026-03-10".to_string(), "swim practice");
        activities.set_note("2026-03-11".to_string(), "recital");
        activities.clear();
        assert!(activities.is_empty());
        activities.clear();
        assert!(activities.is_empty());
    }

    #[test]
    fn parse_date_key_rejects_garbage() {
        assert!(parse_date_key("2026-03-09").is_ok());
        assert!(matches!(
            parse_date_key("not-a-date"),
            Err(PlanError::InvalidDateKey(_))
        ));
        assert!(matches!(
            parse_date_key("2026-13-40"),
            Err(PlanError::InvalidDateKey(_))
        ));
    }

    #[test]
    fn today_row_index_falls_back_to_first_row() {
        let range = PlanRange::new(date(2026, 3, 9), date(2026, 3, 15));
        let with_today = build_rows(&range, &ActivityMap::default(), false, date(2026, 3, 12));
        assert_eq!(today_row_index(&with_today), Some(3));
        let without_today = build_rows(&range, &ActivityMap::default(), false, date(2027, 1, 1));
        assert_eq!(today_row_index(&without_today), Some(0));
        assert_eq!(today_row_index(&[]), None);
    }
}
