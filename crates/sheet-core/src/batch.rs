//! Export many sheets from a source into a directory

use crate::error::{Error, Result};
use crate::export::{ExportSummary, SheetCsvExporter};
use crate::manifest::{ExportManifest, MANIFEST_FILE_NAME};
use crate::naming::sheet_output_path;
use crate::source::SheetSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a batch export
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Sheets that were written
    pub exported: Vec<ExportSummary>,
    /// Sheets that failed (sheet name, error message)
    pub errors: Vec<(String, String)>,
    /// Manifest file, if one was written
    pub manifest: Option<PathBuf>,
}

impl BatchReport {
    /// Total data rows written
    pub fn total_rows(&self) -> usize {
        self.exported.iter().map(|s| s.rows).sum()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Which sheets a batch covers
///
/// An empty prefix list selects every sheet.
pub fn matches_filter(name: &str, prefixes: &[String]) -> bool {
    prefixes.is_empty() || prefixes.iter().any(|p| name.starts_with(p.as_str()))
}

/// Export every sheet of `source` matching `prefixes` into `output_dir`.
///
/// Each sheet goes to `<output_dir>/<sheet name>.csv`, with `/` in the name
/// becoming subdirectories. A failing sheet is recorded in the report and the
/// batch moves on. Failing to create `output_dir` itself is an error.
pub fn export_all<S: SheetSource + ?Sized, P: AsRef<Path>>(
    source: &S,
    exporter: &SheetCsvExporter,
    output_dir: P,
    prefixes: &[String],
) -> Result<BatchReport> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|e| Error::FileWrite {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut report = BatchReport::default();

    for name in source
        .available_sheet_names()
        .into_iter()
        .filter(|n| matches_filter(n, prefixes))
    {
        match export_one(source, exporter, output_dir, &name) {
            Ok(summary) => report.exported.push(summary),
            Err(e) => {
                warn!(sheet = %name, error = %e, "sheet export failed");
                report.errors.push((name, e.to_string()));
            }
        }
    }

    info!(
        exported = report.exported.len(),
        failed = report.errors.len(),
        rows = report.total_rows(),
        "batch export finished"
    );

    Ok(report)
}

/// [`export_all`], then write a manifest of the exported sheets
pub fn export_all_with_manifest<S: SheetSource + ?Sized, P: AsRef<Path>>(
    source: &S,
    exporter: &SheetCsvExporter,
    output_dir: P,
    prefixes: &[String],
) -> Result<BatchReport> {
    let output_dir = output_dir.as_ref();
    let mut report = export_all(source, exporter, output_dir, prefixes)?;

    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    ExportManifest::from_summaries(output_dir, &report.exported).save(&manifest_path)?;
    report.manifest = Some(manifest_path);

    Ok(report)
}

fn export_one<S: SheetSource + ?Sized>(
    source: &S,
    exporter: &SheetCsvExporter,
    output_dir: &Path,
    name: &str,
) -> Result<ExportSummary> {
    let sheet = source.get_sheet(name)?;
    let path = sheet_output_path(output_dir, name);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    exporter.export(&sheet, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_filter() {
        assert!(matches_filter("anything", &[]));
        let prefixes = vec!["quest/".to_string(), "Item".to_string()];
        assert!(matches_filter("quest/Quest", &prefixes));
        assert!(matches_filter("ItemAction", &prefixes));
        assert!(!matches_filter("bgm/track1", &prefixes));
    }

    #[test]
    fn test_report_totals() {
        let mut report = BatchReport::default();
        assert!(report.is_success());
        report.exported.push(ExportSummary {
            sheet: "A".into(),
            path: PathBuf::from("A.csv"),
            rows: 4,
            columns: 1,
        });
        report.errors.push(("B".into(), "boom".into()));
        assert_eq!(report.total_rows(), 4);
        assert!(!report.is_success());
    }
}
