use crate::model::{ActivityMap, CalendarDay, PlanError, PlanRange};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use log::warn;
use std::fs;
use std::path::PathBuf;

const PLAN_FILE: &str = "family-plans-2026.json";

#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub path: PathBuf,
}

pub struct ActivityStore {
    location: StoreLocation,
    range: PlanRange,
    activities: ActivityMap,
}

pub fn resolve_location(file: Option<PathBuf>) -> Result<StoreLocation> {
    let path = match file {
        Some(path) => path,
        None => default_plan_path()?,
    };
    Ok(StoreLocation { path })
}

impl ActivityStore {
    /// Opens the store at `location`. Missing or malformed plan data is
    /// treated as an empty plan; only `set` and `clear` write.
    pub fn open(location: StoreLocation, range: PlanRange) -> Self {
        let activities = load_activities(&location);
        ActivityStore {
            location,
            range,
            activities,
        }
    }

    pub fn activities(&self) -> &ActivityMap {
        &self.activities
    }

    pub fn note(&self, key: &str) -> &str {
        self.activities.note(key)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn range(&self) -> &PlanRange {
        &self.range
    }

    pub fn set(&mut self, date: NaiveDate, text: &str) -> Result<()> {
        if !self.range.contains(date) {
            let key = CalendarDay::new(date).date_key();
            return Err(PlanError::OutOfRange(key).into());
        }
        self.activities.set_note(CalendarDay::new(date).date_key(), text);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.activities.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.location.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
        let serialized =
            serde_json::to_string_pretty(&self.activities).context("serializing plan")?;
        fs::write(&self.location.path, serialized)
            .with_context(|| format!("writing {:?}", self.location.path))?;
        Ok(())
    }
}

fn load_activities(location: &StoreLocation) -> ActivityMap {
    if !location.path.exists() {
        return ActivityMap::default();
    }
    let data = match fs::read_to_string(&location.path) {
        Ok(data) => data,
        Err(err) => {
            warn!("unreadable plan file {:?}: {}", location.path, err);
            return ActivityMap::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(map) => map,
        Err(err) => {
            warn!("malformed plan file {:?}: {}", location.path, err);
            ActivityMap::default()
        }
    }
}

fn default_plan_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "dayplan").context("locating data directory")?;
    Ok(dirs.data_dir().join(PLAN_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn temp_location(dir: &TempDir) -> StoreLocation {
        StoreLocation {
            path: dir.path().join("plan.json"),
        }
    }

    fn open_temp(dir: &TempDir) -> ActivityStore {
        ActivityStore::open(temp_location(dir), PlanRange::plan_2026())
    }

    #[test]
    fn missing_file_opens_empty_without_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_temp(&dir);
        assert!(store.activities().is_empty());
        assert!(!store.location().path.exists());
    }

    #[test]
    fn set_survives_reopen_trimmed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_temp(&dir);
        store
            .set(date(2026, 3, 10), "  Dentist  ")
            .expect("set should persist");
        drop(store);
        let reopened = open_temp(&dir);
        assert_eq!(reopened.note("2026-03-10"), "Dentist");
    }

    #[test]
    fn plan_file_is_a_json_object_keyed_by_date() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_temp(&dir);
        store
            .set(date(2026, 3, 9), "family dinner")
            .expect("set should persist");
        let raw = fs::read_to_string(&store.location().path).expect("plan file exists");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["2026-03-09"], "family dinner");
        assert_eq!(value.as_object().expect("json object").len(), 1);
    }

    #[test]
    fn malformed_file_is_treated_as_empty_and_stays_writable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let location = temp_location(&dir);
        fs::write(&location.path, "not json").expect("seed file");
        let mut store = ActivityStore::open(location, PlanRange::plan_2026());
        assert!(store.activities().is_empty());
        store
            .set(date(2026, 4, 1), "zoo trip")
            .expect("set should persist");
        let reopened = open_temp(&dir);
        assert_eq!(reopened.note("2026-04-01"), "zoo trip");
    }

    #[test]
    fn clear_is_idempotent_across_reloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_temp(&dir);
        store
            .set(date(2026, 5, 4), "recital")
            .expect("set should persist");
        store
            .set(date(2026, 5, 5), "swim meet")
            .expect("set should persist");
        store.clear().expect("clear should persist");
        assert!(store.activities().is_empty());
        store.clear().expect("second clear should persist");
        assert!(store.activities().is_empty());
        let reopened = open_temp(&dir);
        assert!(reopened.activities().is_empty());
    }

    #[test]
    fn set_outside_range_is_rejected_without_side_effects() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_temp(&dir);
        let err = store
            .set(date(2026, 1, 1), "too early")
            .expect_err("date before range start");
        assert!(err.to_string().contains("outside the planning range"));
        assert!(store.activities().is_empty());
        assert!(!store.location().path.exists());
    }

    #[test]
    fn empty_text_is_stored_as_explicit_blank() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_temp(&dir);
        store
            .set(date(2026, 3, 10), "Dentist")
            .expect("set should persist");
        store
            .set(date(2026, 3, 10), "   ")
            .expect("set should persist");
        assert_eq!(store.note("2026-03-10"), "");
        assert_eq!(store.activities().len(), 1);
    }
}
