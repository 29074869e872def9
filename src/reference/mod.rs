// src/reference/mod.rs

use std::{collections::HashMap, path::Path};

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{debug, info, instrument, trace};

use crate::error::ReferenceError;

/// Header names of the two reference columns the report relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceColumns {
    pub guid: String,
    pub name: String,
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            guid: "GUID".to_string(),
            name: "Наименование".to_string(),
        }
    }
}

/// One row of the reference sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub guid: String,
    pub name: String,
}

/// Zones in sheet order. GUIDs act as lookup keys; later rows win on duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneReference {
    zones: Vec<Zone>,
}

impl ZoneReference {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// Build from a sheet range whose first row is the header.
    /// Rows with an empty GUID are dropped; an empty name falls back to the GUID.
    pub fn from_range(
        range: &Range<Data>,
        columns: &ReferenceColumns,
    ) -> Result<Self, ReferenceError> {
        let mut rows = range.rows();
        let header = rows.next().ok_or(ReferenceError::Empty)?;

        let position = |wanted: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell) == wanted)
                .ok_or_else(|| ReferenceError::MissingColumn(wanted.to_string()))
        };
        let guid_idx = position(&columns.guid)?;
        let name_idx = position(&columns.name)?;
        trace!(guid_idx, name_idx, "located reference columns");

        let zones = rows
            .filter_map(|row| {
                let guid = row.get(guid_idx).map(cell_text).unwrap_or_default();
                if guid.is_empty() {
                    return None;
                }
                let name = row
                    .get(name_idx)
                    .map(cell_text)
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| guid.clone());
                Some(Zone { guid, name })
            })
            .collect();

        Ok(Self { zones })
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Every GUID in sheet order, as sent to the API.
    pub fn guids(&self) -> Vec<String> {
        self.zones.iter().map(|z| z.guid.clone()).collect()
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.zones.iter().any(|z| z.guid == guid)
    }

    /// GUID → display name.
    pub fn names(&self) -> HashMap<&str, &str> {
        self.zones
            .iter()
            .map(|z| (z.guid.as_str(), z.name.as_str()))
            .collect()
    }
}

fn cell_text(cell: &Data) -> String {
    cell.to_string().trim().to_string()
}

/// Read the first sheet of the workbook at `path` into a `ZoneReference`.
#[instrument(level = "info", skip(path, columns), fields(path = %path.as_ref().display()))]
pub fn load_reference<P: AsRef<Path>>(
    path: P,
    columns: &ReferenceColumns,
) -> Result<ZoneReference, ReferenceError> {
    let path = path.as_ref();
    info!("loading zone reference from {}", path.display());

    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ReferenceError::NoSheets)?;
    debug!(sheet = %sheet, "reading first sheet");

    let range = workbook.worksheet_range(&sheet)?;
    let reference = ZoneReference::from_range(&range, columns)?;
    info!(zones = reference.len(), "zone reference loaded");
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sheet(rows: &[&[Data]]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn reads_guid_and_name_columns_in_any_order() {
        let range = sheet(&[
            &[s("Наименование"), s("Этаж"), s("GUID")],
            &[s("Зона А"), Data::Int(1), s("a-1")],
            &[s("Зона Б"), Data::Int(2), s(" b-2 ")],
        ]);

        let reference = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap();

        assert_eq!(reference.guids(), vec!["a-1", "b-2"]);
        assert_eq!(reference.names().get("b-2"), Some(&"Зона Б"));
    }

    #[test]
    fn drops_rows_without_guid_and_falls_back_to_guid_for_empty_name() {
        let range = sheet(&[
            &[s("GUID"), s("Наименование")],
            &[Data::Empty, s("orphan")],
            &[s("c-3"), Data::Empty],
            &[s("   "), s("blank guid")],
        ]);

        let reference = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap();

        assert_eq!(
            reference.zones(),
            &[Zone {
                guid: "c-3".into(),
                name: "c-3".into()
            }]
        );
    }

    #[test]
    fn whitespace_only_name_falls_back_to_guid() {
        let range = sheet(&[
            &[s("GUID"), s("Наименование")],
            &[s("d-4"), s("   ")],
            &[s("e-5"), s("\t \n")],
        ]);

        let reference = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap();

        assert_eq!(reference.names().get("d-4"), Some(&"d-4"));
        assert_eq!(reference.names().get("e-5"), Some(&"e-5"));
    }

    #[test]
    fn later_duplicate_guid_wins_lookup() {
        let range = sheet(&[
            &[s("GUID"), s("Наименование")],
            &[s("dup"), s("first")],
            &[s("dup"), s("second")],
        ]);

        let reference = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap();

        assert_eq!(reference.len(), 2);
        assert_eq!(reference.names().get("dup"), Some(&"second"));
    }

    #[test]
    fn numeric_guid_cells_are_stringified() {
        let range = sheet(&[
            &[s("GUID"), s("Наименование")],
            &[Data::Float(42.0), s("numeric")],
        ]);

        let reference = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap();

        assert!(reference.contains("42"));
    }

    #[test]
    fn empty_sheet_is_an_error() {
        let range: Range<Data> = Range::empty();

        let err = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap_err();

        assert!(matches!(err, ReferenceError::Empty));
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let range = sheet(&[&[s("GUID"), s("Name")], &[s("a"), s("b")]]);

        let err = ZoneReference::from_range(&range, &ReferenceColumns::default()).unwrap_err();

        assert!(matches!(err, ReferenceError::MissingColumn(ref c) if c == "Наименование"));
    }

    #[test]
    fn custom_column_names_are_honoured() {
        let columns = ReferenceColumns {
            guid: "id".into(),
            name: "title".into(),
        };
        let range = sheet(&[&[s("id"), s("title")], &[s("z"), s("Zed")]]);

        let reference = ZoneReference::from_range(&range, &columns).unwrap();

        assert_eq!(reference.names().get("z"), Some(&"Zed"));
    }

    #[test]
    fn nonexistent_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            load_reference(dir.path().join("missing.xlsx"), &ReferenceColumns::default())
                .unwrap_err();
        assert!(matches!(err, ReferenceError::Open(_)));
    }

    #[test]
    fn garbage_workbook_fails_to_open() {
        let mut tmp = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        tmp.write_all(b"definitely not a zip archive").unwrap();

        let err = load_reference(tmp.path(), &ReferenceColumns::default()).unwrap_err();

        assert!(matches!(err, ReferenceError::Open(_)));
    }
}
