// src/table/mod.rs

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use clap::ValueEnum;
use serde_json::Value;

use crate::error::DataError;
use crate::fetch::{TimeSlot, VisitorResponse};
use crate::reference::ZoneReference;

pub mod render;

pub use render::{styled_table, write_table};

/// Header of the first column.
pub const TIME_COLUMN: &str = "Время";

/// Which count of a `[time, entries, exits]` triple to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Metric {
    #[default]
    Entries,
    Exits,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Entries => "entries",
            Metric::Exits => "exits",
        }
    }

    pub fn pick(self, slot: &TimeSlot) -> &Value {
        match self {
            Metric::Entries => &slot.entries,
            Metric::Exits => &slot.exits,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub dimmed: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dimmed: false,
        }
    }

    /// Count cells are dimmed when they read exactly `"0"`.
    fn count(text: String) -> Self {
        let dimmed = text == "0";
        Self { text, dimmed }
    }
}

/// Time-indexed pivot of the selected zones. `headers[0]` and each row's
/// first cell hold the time label; the rest follow `selected` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorsTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl VisitorsTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

fn count_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pivot `visitors` into one row per distinct time label (ascending) and one
/// column per selected zone. Zones absent from `reference` keep their GUID as
/// header; missing (time, zone) pairs read `"0"`.
pub fn build_visitors_table(
    reference: &ZoneReference,
    visitors: &VisitorResponse,
    metric: Metric,
) -> Result<VisitorsTable, DataError> {
    let selected = &visitors.selected;
    if selected.is_empty() {
        return Err(DataError::NoSelectedZones);
    }

    let names = reference.names();
    let mut headers = Vec::with_capacity(selected.len() + 1);
    headers.push(TIME_COLUMN.to_string());
    headers.extend(selected.iter().map(|guid| {
        names
            .get(guid.as_str())
            .copied()
            .unwrap_or(guid.as_str())
            .to_string()
    }));

    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let series: HashMap<&str, &[TimeSlot]> = visitors
        .data
        .iter()
        .filter(|zone| wanted.contains(zone.guid.as_str()))
        .map(|zone| (zone.guid.as_str(), zone.slots.as_slice()))
        .collect();

    let times: BTreeSet<&str> = series
        .values()
        .flat_map(|slots| slots.iter().map(|slot| slot.time.as_str()))
        .collect();

    let rows = times
        .into_iter()
        .map(|time| {
            let mut row = Vec::with_capacity(headers.len());
            row.push(Cell::plain(time));
            row.extend(selected.iter().map(|guid| {
                let value = series
                    .get(guid.as_str())
                    .and_then(|slots| slots.iter().find(|slot| slot.time == time))
                    .map(|slot| count_text(metric.pick(slot)))
                    .unwrap_or_else(|| "0".to_string());
                Cell::count(value)
            }));
            row
        })
        .collect();

    Ok(VisitorsTable {
        title: format!("Посещения зон ({}) за {}", metric, visitors.picker_date),
        headers,
        rows,
    })
}

/// Selected GUIDs with no reference entry, in `selected` order, deduplicated.
pub fn missing_zones<'a>(reference: &ZoneReference, visitors: &'a VisitorResponse) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    visitors
        .selected
        .iter()
        .map(String::as_str)
        .filter(|guid| !reference.contains(guid) && seen.insert(*guid))
        .collect()
}
