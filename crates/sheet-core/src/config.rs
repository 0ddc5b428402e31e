//! Export configuration files
//!
//! A config describes a repeatable batch export as JSON:
//!
//! ```json
//! {
//!   "source": "data/sheets",
//!   "output_dir": "exports",
//!   "sheets": ["quest/"],
//!   "options": { "line_ending": "crlf" },
//!   "write_manifest": true
//! }
//! ```

use crate::error::{Error, Result};
use crate::options::ExportOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A saved batch export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory of sheet documents
    pub source: PathBuf,
    /// Directory the CSV files are written to
    pub output_dir: PathBuf,
    /// Sheet name prefixes to export; empty exports everything
    #[serde(default)]
    pub sheets: Vec<String>,
    #[serde(default)]
    pub options: ExportOptions,
    #[serde(default = "default_write_manifest")]
    pub write_manifest: bool,
}

fn default_write_manifest() -> bool {
    true
}

impl ExportConfig {
    /// Create a config exporting every sheet with default options
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            sheets: Vec::new(),
            options: ExportOptions::default(),
            write_manifest: default_write_manifest(),
        }
    }

    /// Load a config from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).map_err(|e| Error::FileWrite {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Resolve relative paths against the directory holding the config file
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        if self.source.is_relative() {
            self.source = base.join(&self.source);
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{HeaderQuoting, LineEnding};

    #[test]
    fn test_minimal_config_defaults() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"source":"data","output_dir":"out"}"#).unwrap();
        assert!(config.sheets.is_empty());
        assert!(config.write_manifest);
        assert_eq!(config.options, ExportOptions::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let mut config = ExportConfig::new("data", "out");
        config.sheets.push("quest/".into());
        config.options.line_ending = LineEnding::CrLf;
        config.options.header_quoting = HeaderQuoting::Minimal;
        config.save(&path).unwrap();

        assert_eq!(ExportConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_resolve_relative_to() {
        let config = ExportConfig::new("data", "/abs/out").resolve_relative_to(Path::new("/cfg"));
        assert_eq!(config.source, Path::new("/cfg/data"));
        assert_eq!(config.output_dir, Path::new("/abs/out"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExportConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
