//! Manifest of a batch export
//!
//! Written next to the exported files so a later run or another tool can see
//! what was exported and when.

use crate::error::{Error, Result};
use crate::export::ExportSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the manifest inside an export directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One exported sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Sheet name
    pub sheet: String,
    /// File path, relative to the export directory when possible
    pub path: PathBuf,
    /// Data rows written
    pub rows: usize,
    /// Columns written, excluding the key
    pub columns: usize,
}

/// Record of one batch export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    /// When the export ran
    pub generated_at: DateTime<Utc>,
    /// Exported sheets, in export order
    pub entries: Vec<ManifestEntry>,
}

impl ExportManifest {
    /// Create an empty manifest stamped with the current time
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    /// Build a manifest from export summaries, relativizing paths to `output_dir`
    pub fn from_summaries(output_dir: &Path, summaries: &[ExportSummary]) -> Self {
        let mut manifest = Self::new();
        for summary in summaries {
            manifest.add_entry(ManifestEntry {
                sheet: summary.sheet.clone(),
                path: summary
                    .path
                    .strip_prefix(output_dir)
                    .unwrap_or(&summary.path)
                    .to_path_buf(),
                rows: summary.rows,
                columns: summary.columns,
            });
        }
        manifest
    }

    pub fn add_entry(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Find the entry for a sheet
    pub fn find_entry(&self, sheet: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.sheet == sheet)
    }

    /// Total data rows across all entries
    pub fn total_rows(&self) -> usize {
        self.entries.iter().map(|e| e.rows).sum()
    }

    /// Load a manifest from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the manifest to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl Default for ExportManifest {
    fn default() -> Self {
        Self::new()
    }
}
