// src/fetch/types.rs

use std::convert::TryFrom;

use serde::Deserialize;
use serde_json::Value;

/// Body of `/borders/chart-data` as sent; `data` records stay raw until filtered.
#[derive(Debug, Deserialize)]
pub(crate) struct RawVisitorResponse {
    #[serde(default)]
    pub picker_date: String,
    #[serde(default)]
    pub selected: Vec<String>,
    pub data: Vec<Value>,
}

/// Decoded chart data, reduced to the selected zones.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorResponse {
    /// Report date label, display only.
    pub picker_date: String,
    /// Zones to display, in display order.
    pub selected: Vec<String>,
    /// Series of the selected zones, in response order.
    pub data: Vec<ZoneSeries>,
}

/// One `[guid, _, _, slots, ..]` record of the `data` array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Value>")]
pub struct ZoneSeries {
    pub guid: String,
    pub slots: Vec<TimeSlot>,
}

impl TryFrom<Vec<Value>> for ZoneSeries {
    type Error = String;

    fn try_from(mut record: Vec<Value>) -> Result<Self, Self::Error> {
        if record.len() < 4 {
            return Err(format!(
                "zone record has {} elements, expected at least 4",
                record.len()
            ));
        }
        let guid = match &record[0] {
            Value::String(s) => s.clone(),
            other => return Err(format!("zone guid {} is not a string", other)),
        };
        let slots = serde_json::from_value(record.swap_remove(3))
            .map_err(|e| format!("zone {}: {}", guid, e))?;
        Ok(Self { guid, slots })
    }
}

/// A `[time, entries, exits, ..]` triple. Counts are kept as raw JSON values.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Value>")]
pub struct TimeSlot {
    pub time: String,
    pub entries: Value,
    pub exits: Value,
}

impl TryFrom<Vec<Value>> for TimeSlot {
    type Error = String;

    fn try_from(slot: Vec<Value>) -> Result<Self, Self::Error> {
        let mut it = slot.into_iter();
        match (it.next(), it.next(), it.next()) {
            (Some(Value::String(time)), Some(entries), Some(exits)) => Ok(Self {
                time,
                entries,
                exits,
            }),
            _ => Err("time slot must be [time, entries, exits]".to_string()),
        }
    }
}

/// GUID of a raw `data` record, if its first element is a string.
pub(crate) fn record_guid(record: &Value) -> Option<&str> {
    record.get(0).and_then(Value::as_str)
}
