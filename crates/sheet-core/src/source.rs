//! Sheet sources: where sheets are looked up by name
//!
//! [`DirectorySource`] reads JSON sheet documents from a directory tree:
//!
//! ```json
//! {
//!   "columns": [{ "index": 0, "name": "Name", "type": "str" }],
//!   "rows": [{ "key": 1, "values": ["Sword"] }]
//! }
//! ```
//!
//! `values[i]` belongs to `columns[i]`; `null` or a missing trailing entry is a
//! null cell.

use crate::error::{Error, Result};
use crate::manifest::MANIFEST_FILE_NAME;
use crate::sheet::{Column, Header, Row, Sheet};
use crate::value::Value;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Something that can enumerate and resolve sheets by name
pub trait SheetSource {
    /// All sheet names, sorted
    fn available_sheet_names(&self) -> Vec<String>;

    /// Load a sheet by name
    fn get_sheet(&self, name: &str) -> Result<Sheet>;

    /// Whether a sheet with this name exists
    fn contains(&self, name: &str) -> bool {
        self.available_sheet_names().iter().any(|n| n == name)
    }
}

/// Sheets held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: BTreeMap<String, Sheet>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, replacing any sheet with the same name
    pub fn insert(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.name.clone(), sheet);
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert(sheet);
        self
    }
}

impl SheetSource for MemorySource {
    fn available_sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn get_sheet(&self, name: &str) -> Result<Sheet> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }
}

/// JSON sheet documents discovered under a root directory.
///
/// A document at `<root>/bgm/track1.json` is the sheet `bgm/track1`. Export
/// manifests (`manifest.json`) are not sheets. Unreadable entries below the
/// root are skipped with a warning.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    sheets: BTreeMap<String, PathBuf>,
}

impl DirectorySource {
    /// Scan a directory for sheet documents
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let mut sheets = BTreeMap::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_file() || !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }

            // Batch exports may write their manifest inside the source tree
            if entry.file_name() == MANIFEST_FILE_NAME {
                continue;
            }

            match sheet_name_for(root, path) {
                Some(name) => {
                    sheets.insert(name, path.to_path_buf());
                }
                None => warn!(path = %path.display(), "skipping sheet with a non UTF-8 name"),
            }
        }

        debug!(root = %root.display(), sheets = sheets.len(), "scanned sheet directory");

        Ok(Self {
            root: root.to_path_buf(),
            sheets,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of sheets found
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Path of the document backing a sheet
    pub fn sheet_path(&self, name: &str) -> Option<&Path> {
        self.sheets.get(name).map(PathBuf::as_path)
    }
}

impl SheetSource for DirectorySource {
    fn available_sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn get_sheet(&self, name: &str) -> Result<Sheet> {
        let path = self
            .sheets
            .get(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;

        parse_sheet_document(name, &content, path)
    }

    fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }
}

/// Relative path without the extension, joined with `/`
fn sheet_name_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_str()?),
            _ => return None,
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

#[derive(Debug, Deserialize)]
struct SheetDocument {
    columns: Vec<ColumnDocument>,
    #[serde(default)]
    rows: Vec<RowDocument>,
}

#[derive(Debug, Deserialize)]
struct ColumnDocument {
    index: u32,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    value_type: String,
}

#[derive(Debug, Deserialize)]
struct RowDocument {
    key: i32,
    #[serde(default)]
    values: Vec<serde_json::Value>,
}

/// Parse a JSON sheet document. `path` is only used in error messages.
pub fn parse_sheet_document(name: &str, content: &str, path: &Path) -> Result<Sheet> {
    let document: SheetDocument = serde_json::from_str(content)?;

    let invalid = |message: String| Error::InvalidDocument {
        path: path.to_path_buf(),
        message,
    };

    let mut seen_indices = HashSet::new();
    for col in &document.columns {
        if !seen_indices.insert(col.index) {
            return Err(invalid(format!("duplicate column index {}", col.index)));
        }
    }

    let columns: Vec<Column> = document
        .columns
        .into_iter()
        .map(|c| Column::new(c.index, c.name, c.value_type))
        .collect();

    let mut seen_keys = HashSet::new();
    let mut rows = Vec::with_capacity(document.rows.len());

    for doc_row in document.rows {
        if !seen_keys.insert(doc_row.key) {
            return Err(invalid(format!("duplicate row key {}", doc_row.key)));
        }
        if doc_row.values.len() > columns.len() {
            return Err(invalid(format!(
                "row {} has {} values but only {} columns",
                doc_row.key,
                doc_row.values.len(),
                columns.len()
            )));
        }

        let mut row = Row::new(doc_row.key);
        for (col, json) in columns.iter().zip(&doc_row.values) {
            let value = Value::from_json(col.kind(), &col.value_type, json).map_err(|found| {
                Error::ValueType {
                    sheet: name.to_string(),
                    key: doc_row.key,
                    column: col.index,
                    expected: col.value_type.clone(),
                    found,
                }
            })?;
            row.set(col.index, value);
        }
        rows.push(row);
    }

    Ok(Sheet {
        name: name.to_string(),
        header: Header::new(columns),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "columns": [
            { "index": 0, "name": "Name", "type": "str" },
            { "index": 1, "name": "Level", "type": "uint8" },
            { "index": 2, "name": "IsUnique", "type": "bool" }
        ],
        "rows": [
            { "key": 10, "values": ["Sword", 5, true] },
            { "key": 3, "values": [null, 1] }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let sheet = parse_sheet_document("Item", DOC, Path::new("Item.json")).unwrap();

        assert_eq!(sheet.name, "Item");
        assert_eq!(sheet.column_count(), 3);
        assert_eq!(sheet.header.columns[1].value_type, "uint8");

        let row = sheet.find_row(10).unwrap();
        assert_eq!(row.get(0), Some(&Value::Text("Sword".into())));
        assert_eq!(row.get(1), Some(&Value::U8(5)));
        assert_eq!(row.get(2), Some(&Value::Bool(true)));

        let short = sheet.find_row(3).unwrap();
        assert_eq!(short.get(0), None);
        assert_eq!(short.get(2), None);
    }

    #[test]
    fn test_parse_document_type_mismatch() {
        let doc = r#"{"columns":[{"index":0,"type":"int32"}],"rows":[{"key":1,"values":["x"]}]}"#;
        let err = parse_sheet_document("Bad", doc, Path::new("Bad.json")).unwrap_err();
        match err {
            Error::ValueType { key, column, .. } => {
                assert_eq!(key, 1);
                assert_eq!(column, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_document_high_column_index() {
        let doc = r#"{"columns":[{"index":4000000000,"type":"int32"}],"rows":[{"key":1,"values":[5]},{"key":2,"values":[6]}]}"#;
        let sheet = parse_sheet_document("Sparse", doc, Path::new("Sparse.json")).unwrap();
        let row = sheet.find_row(2).unwrap();
        assert_eq!(row.get(4_000_000_000), Some(&Value::I32(6)));
        assert_eq!(row.value_count(), 1);
    }

    #[test]
    fn test_parse_document_duplicate_key() {
        let doc = r#"{"columns":[],"rows":[{"key":1},{"key":1}]}"#;
        let err = parse_sheet_document("Dup", doc, Path::new("Dup.json")).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
    }

    #[test]
    fn test_parse_document_too_many_values() {
        let doc = r#"{"columns":[{"index":0,"type":"str"}],"rows":[{"key":1,"values":["a","b"]}]}"#;
        let err = parse_sheet_document("Wide", doc, Path::new("Wide.json")).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new()
            .with_sheet(Sheet::new("b/Second", Header::default()))
            .with_sheet(Sheet::new("First", Header::default()));

        assert_eq!(source.available_sheet_names(), vec!["First", "b/Second"]);
        assert!(source.contains("b/Second"));
        assert!(source.get_sheet("First").is_ok());
        assert!(matches!(
            source.get_sheet("Missing"),
            Err(Error::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_sheet_name_for_nested_path() {
        let root = Path::new("data");
        let path = root.join("bgm").join("track1.json");
        assert_eq!(sheet_name_for(root, &path), Some("bgm/track1".to_string()));
    }
}
