//! CSV export of a sheet
//!
//! Output layout:
//!
//! ```text
//! key,<index>,<index>,...
//! #,<name>,<name>,...
//! int32,<type>,<type>,...
//! <key>,<field>,<field>,...
//! ```
//!
//! Rows are written in ascending key order. Null cells are empty fields,
//! boolean and numeric cells are bare literals, and everything else is quoted
//! with embedded quotes doubled.

use crate::error::{Error, Result};
use crate::options::{ExportOptions, HeaderQuoting};
use crate::sheet::{Header, Row, Sheet};
use crate::value::{classify, Value, ValueClass};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const BYTE_ORDER_MARK: &str = "\u{feff}";

/// What a single export wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Name of the exported sheet
    pub sheet: String,
    /// File that was written
    pub path: PathBuf,
    /// Number of data rows written
    pub rows: usize,
    /// Number of columns written, excluding the key
    pub columns: usize,
}

/// Writes sheets as CSV
#[derive(Debug, Clone, Default)]
pub struct SheetCsvExporter {
    options: ExportOptions,
}

impl SheetCsvExporter {
    /// Create an exporter with the given options
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a sheet to a file, creating or overwriting it.
    ///
    /// A failure part way through leaves a truncated file behind.
    pub fn export<P: AsRef<Path>>(&self, sheet: &Sheet, path: P) -> Result<ExportSummary> {
        let path = path.as_ref();
        let write_error = |source: io::Error| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        let rows = self.write_to(sheet, &mut writer).map_err(write_error)?;
        writer.flush().map_err(write_error)?;

        debug!(sheet = %sheet.name, path = %path.display(), rows, "exported sheet");

        Ok(ExportSummary {
            sheet: sheet.name.clone(),
            path: path.to_path_buf(),
            rows,
            columns: sheet.column_count(),
        })
    }

    /// Write a sheet to any byte sink, returning the number of data rows written
    pub fn write_to<W: Write>(&self, sheet: &Sheet, mut writer: W) -> io::Result<usize> {
        let newline = self.options.line_ending.as_str();

        if self.options.byte_order_mark {
            writer.write_all(BYTE_ORDER_MARK.as_bytes())?;
        }
        for line in self.lines(sheet) {
            writer.write_all(line.as_bytes())?;
            writer.write_all(newline.as_bytes())?;
        }

        Ok(sheet.row_count())
    }

    /// Render a sheet to a string exactly as [`SheetCsvExporter::write_to`] would write it
    pub fn render(&self, sheet: &Sheet) -> String {
        let newline = self.options.line_ending.as_str();
        let mut out = String::new();

        if self.options.byte_order_mark {
            out.push_str(BYTE_ORDER_MARK);
        }
        for line in self.lines(sheet) {
            out.push_str(&line);
            out.push_str(newline);
        }

        out
    }

    /// Every output line without terminators: three header lines, then rows by key
    fn lines<'a>(&self, sheet: &'a Sheet) -> impl Iterator<Item = String> + 'a {
        let header = &sheet.header;
        self.header_lines(header)
            .into_iter()
            .chain(sheet.rows_by_key().into_iter().map(move |row| row_line(header, row)))
    }

    /// The index, name and type lines
    fn header_lines(&self, header: &Header) -> [String; 3] {
        let mut index_line = String::from("key");
        let mut name_line = String::from("#");
        let mut type_line = String::from("int32");

        for col in &header.columns {
            let _ = write!(index_line, ",{}", col.index);
            name_line.push(',');
            name_line.push_str(&self.header_field(&col.name));
            type_line.push(',');
            type_line.push_str(&self.header_field(&col.value_type));
        }

        [index_line, name_line, type_line]
    }

    fn header_field(&self, field: &str) -> String {
        match self.options.header_quoting {
            HeaderQuoting::Verbatim => field.to_string(),
            HeaderQuoting::Minimal => escape_csv(field),
        }
    }
}

/// One data line: the key followed by a field per header column
fn row_line(header: &Header, row: &Row) -> String {
    let mut line = row.key.to_string();
    for col in &header.columns {
        line.push(',');
        push_field(&mut line, row.get(col.index));
    }
    line
}

fn push_field(line: &mut String, value: Option<&Value>) {
    match (classify(value), value) {
        (ValueClass::Numeric, Some(v)) => {
            let _ = write!(line, "{}", v);
        }
        (ValueClass::Text, Some(v)) => line.push_str(&quote_text(&v.to_string())),
        _ => {}
    }
}

/// Format a single cell as its CSV field
pub fn format_field(value: Option<&Value>) -> String {
    let mut field = String::new();
    push_field(&mut field, value);
    field
}

/// Wrap text in quotes, doubling any embedded quote
pub fn quote_text(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Quote a value only if it contains a delimiter, quote or line break
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        quote_text(s)
    } else {
        s.to_string()
    }
}
