use crate::model::{build_rows, parse_date_key, row_visible, CalendarDay, PlanRange, Row};
use crate::storage::{resolve_location, ActivityStore};
use crate::ui;
use anyhow::Result;
use chrono::Utc;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn list(file: Option<PathBuf>, filter: Option<String>, weeks: bool) -> Result<()> {
    let store = open_store(file)?;
    let query = filter.unwrap_or_default();
    let today = Utc::now().date_naive();
    let rows = build_rows(store.range(), store.activities(), weeks, today);
    let visible: Vec<&Row> = rows
        .iter()
        .filter(|row| row_visible(row, &query, weeks))
        .collect();
    let days = visible.iter().filter(|row| row.is_day()).count();
    let planned = visible
        .iter()
        .filter(|row| matches!(row, Row::Day { note, .. } if !note.is_empty()))
        .count();
    println!(
        "Plan: {} ({} days, {} planned)",
        store.location().path.display(),
        days,
        planned
    );
    for row in visible {
        match row {
            Row::WeekSeparator { label } => {
                println!();
                println!("{}", label);
            }
            Row::Day {
                weekday,
                date_label,
                note,
                is_today,
                ..
            } => {
                let marker = if *is_today { '>' } else { ' ' };
                if note.is_empty() {
                    println!("{} {:<9}  {}", marker, weekday, date_label);
                } else {
                    println!("{} {:<9}  {}  {}", marker, weekday, date_label, note);
                }
            }
        }
    }
    Ok(())
}

pub fn set(file: Option<PathBuf>, date: String, text: String) -> Result<()> {
    let mut store = open_store(file)?;
    let day = parse_date_key(&date)?;
    store.set(day, &text)?;
    let key = CalendarDay::new(day).date_key();
    if store.note(&key).is_empty() {
        println!("Blanked note for {}", key);
    } else {
        println!("Saved note for {}", key);
    }
    Ok(())
}

pub fn clear(file: Option<PathBuf>, yes: bool) -> Result<()> {
    let mut store = open_store(file)?;
    if store.activities().is_empty() {
        println!("Nothing to clear.");
        return Ok(());
    }
    if !yes && !confirm_clear()? {
        println!("Canceled.");
        return Ok(());
    }
    let removed = store.activities().len();
    store.clear()?;
    info!("cleared {} entries from {:?}", removed, store.location().path);
    println!("Cleared {} entries.", removed);
    Ok(())
}

pub fn tui(file: Option<PathBuf>) -> Result<()> {
    let store = open_store(file)?;
    ui::run(store)
}

fn open_store(file: Option<PathBuf>) -> Result<ActivityStore> {
    let location = resolve_location(file)?;
    Ok(ActivityStore::open(location, PlanRange::plan_2026()))
}

fn confirm_clear() -> Result<bool> {
    print!("Clear all activities for 2026? This cannot be undone. [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
