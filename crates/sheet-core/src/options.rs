//! Output options for the CSV exporter

use serde::{Deserialize, Serialize};

/// Line terminator written after each CSV line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Treatment of the column name and value type header lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderQuoting {
    /// Header fields are written as-is, even when they contain a delimiter
    #[default]
    Verbatim,
    /// Header fields containing a comma, quote, CR or LF are quoted
    Minimal,
}

/// Options controlling the bytes an export produces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub line_ending: LineEnding,
    /// Prefix the file with a UTF-8 byte order mark
    pub byte_order_mark: bool,
    pub header_quoting: HeaderQuoting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.line_ending, LineEnding::Lf);
        assert!(!options.byte_order_mark);
        assert_eq!(options.header_quoting, HeaderQuoting::Verbatim);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ExportOptions = serde_json::from_str(r#"{"line_ending":"crlf"}"#).unwrap();
        assert_eq!(options.line_ending, LineEnding::CrLf);
        assert_eq!(options.header_quoting, HeaderQuoting::Verbatim);
    }
}
