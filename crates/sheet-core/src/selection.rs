//! The currently selected sheet, resolved lazily and cached by name

use crate::error::Result;
use crate::export::{ExportSummary, SheetCsvExporter};
use crate::naming::default_file_name;
use crate::sheet::Sheet;
use crate::source::SheetSource;
use std::path::Path;
use tracing::warn;

/// A sheet name selection over a source.
///
/// The sheet is loaded on first access and kept until the name changes.
pub struct SheetSelection<'a, S: SheetSource + ?Sized> {
    source: &'a S,
    name: Option<String>,
    cached: Option<Sheet>,
}

impl<'a, S: SheetSource + ?Sized> SheetSelection<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            name: None,
            cached: None,
        }
    }

    /// Select a sheet by name, dropping any cached sheet
    pub fn select(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
        self.cached = None;
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.name = None;
        self.cached = None;
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a sheet is currently held in the cache
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// The selected sheet, or `None` if the name is blank or unknown to the source
    pub fn selected_sheet(&mut self) -> Result<Option<&Sheet>> {
        let name = match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Ok(None),
        };

        if self.cached.is_none() {
            if !self.source.contains(name) {
                return Ok(None);
            }
            self.cached = Some(self.source.get_sheet(name)?);
        }

        Ok(self.cached.as_ref())
    }

    /// Default export file name for the selected sheet
    pub fn default_file_name(&mut self) -> Result<Option<String>> {
        Ok(self.selected_sheet()?.map(|sheet| default_file_name(&sheet.name)))
    }

    /// Export the selected sheet. Does nothing and returns `None` when no
    /// sheet resolves.
    pub fn export_selected<P: AsRef<Path>>(
        &mut self,
        exporter: &SheetCsvExporter,
        path: P,
    ) -> Result<Option<ExportSummary>> {
        let selected = self.name.clone().unwrap_or_default();
        match self.selected_sheet()? {
            Some(sheet) => exporter.export(sheet, path).map(Some),
            None => {
                warn!(sheet = %selected, "no sheet resolves for the selection, nothing exported");
                Ok(None)
            }
        }
    }
}
