//! sheet-core: Core library for exporting relational game-data sheets to CSV
//!
//! This library provides functionality to:
//! - Model sheets as ordered columns and integer-keyed rows of typed values
//! - Export a sheet to a self-describing CSV file with a three-line header
//! - Look sheets up by name from memory or a directory of JSON documents
//! - Track the selected sheet and derive default export file names
//! - Export whole sources in one batch, with a manifest and a JSON config

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod manifest;
pub mod naming;
pub mod options;
pub mod selection;
pub mod sheet;
pub mod source;
pub mod value;

pub use batch::{export_all, export_all_with_manifest, BatchReport};
pub use config::ExportConfig;
pub use error::{Error, Result};
pub use export::{format_field, quote_text, ExportSummary, SheetCsvExporter};
pub use manifest::{ExportManifest, ManifestEntry};
pub use naming::{default_file_name, fix_name, sheet_output_path};
pub use options::{ExportOptions, HeaderQuoting, LineEnding};
pub use selection::SheetSelection;
pub use sheet::{Column, Header, Row, Sheet};
pub use source::{parse_sheet_document, DirectorySource, MemorySource, SheetSource};
pub use value::{classify, Value, ValueClass, ValueKind};
