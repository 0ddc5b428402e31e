//! Cell values and the quoting classification used by the CSV exporter

use std::fmt;

/// The declared kind of a column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Text,
    /// Any type without a dedicated kind; rendered through its text form
    Other,
}

impl ValueKind {
    /// Kinds whose values are written without surrounding quotes
    pub const UNQUOTED: [ValueKind; 11] = [
        ValueKind::Bool,
        ValueKind::I8,
        ValueKind::I16,
        ValueKind::I32,
        ValueKind::I64,
        ValueKind::U8,
        ValueKind::U16,
        ValueKind::U32,
        ValueKind::U64,
        ValueKind::F32,
        ValueKind::F64,
    ];

    /// Map a column's value type tag (e.g. "int32", "str", "single") to a kind.
    ///
    /// Matching is case-insensitive; unknown tags map to [`ValueKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => ValueKind::Bool,
            "sbyte" | "int8" => ValueKind::I8,
            "int16" => ValueKind::I16,
            "int32" => ValueKind::I32,
            "int64" => ValueKind::I64,
            "byte" | "uint8" => ValueKind::U8,
            "uint16" => ValueKind::U16,
            "uint32" => ValueKind::U32,
            "uint64" => ValueKind::U64,
            "single" | "float" | "float32" => ValueKind::F32,
            "double" | "float64" => ValueKind::F64,
            "str" | "string" => ValueKind::Text,
            _ => ValueKind::Other,
        }
    }

    /// Whether values of this kind are emitted as bare literals
    pub fn is_unquoted(self) -> bool {
        Self::UNQUOTED.contains(&self)
    }
}

/// A single cell value. An absent (null) cell is `Option::None` at the row level.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
    /// A value of some other type, carried as its type name and text rendering
    Other { kind: String, text: String },
}

impl Value {
    /// The kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Text(_) => ValueKind::Text,
            Value::Other { .. } => ValueKind::Other,
        }
    }

    /// Decode a JSON cell into a value of the given kind.
    ///
    /// `null` decodes to `None`. On a mismatch the error holds a short
    /// description of what was found instead.
    pub fn from_json(
        kind: ValueKind,
        type_tag: &str,
        json: &serde_json::Value,
    ) -> std::result::Result<Option<Value>, String> {
        if json.is_null() {
            return Ok(None);
        }

        let mismatch = || describe_json(json);

        let value = match kind {
            ValueKind::Bool => Value::Bool(json.as_bool().ok_or_else(mismatch)?),
            ValueKind::I8 => Value::I8(int_from_json(json).ok_or_else(mismatch)?),
            ValueKind::I16 => Value::I16(int_from_json(json).ok_or_else(mismatch)?),
            ValueKind::I32 => Value::I32(int_from_json(json).ok_or_else(mismatch)?),
            ValueKind::I64 => Value::I64(json.as_i64().ok_or_else(mismatch)?),
            ValueKind::U8 => Value::U8(uint_from_json(json).ok_or_else(mismatch)?),
            ValueKind::U16 => Value::U16(uint_from_json(json).ok_or_else(mismatch)?),
            ValueKind::U32 => Value::U32(uint_from_json(json).ok_or_else(mismatch)?),
            ValueKind::U64 => Value::U64(json.as_u64().ok_or_else(mismatch)?),
            ValueKind::F32 => Value::F32(single_from_json(json).ok_or_else(mismatch)?),
            ValueKind::F64 => Value::F64(float_from_json(json).ok_or_else(mismatch)?),
            ValueKind::Text => Value::Text(text_from_json(json)),
            ValueKind::Other => Value::Other {
                kind: type_tag.to_string(),
                text: text_from_json(json),
            },
        };

        Ok(Some(value))
    }
}

fn int_from_json<T: TryFrom<i64>>(json: &serde_json::Value) -> Option<T> {
    json.as_i64().and_then(|i| T::try_from(i).ok())
}

fn uint_from_json<T: TryFrom<u64>>(json: &serde_json::Value) -> Option<T> {
    json.as_u64().and_then(|u| T::try_from(u).ok())
}

// JSON has no literal for non-finite floats, so those arrive as strings
fn float_from_json(json: &serde_json::Value) -> Option<f64> {
    match json {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

// A finite number too large for f32 would otherwise narrow to infinity
fn single_from_json(json: &serde_json::Value) -> Option<f32> {
    let wide = float_from_json(json)?;
    let narrow = wide as f32;
    if wide.is_finite() && !narrow.is_finite() {
        None
    } else {
        Some(narrow)
    }
}

fn text_from_json(json: &serde_json::Value) -> String {
    match json {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn describe_json(json: &serde_json::Value) -> String {
    match json {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => format!("boolean {}", b),
        serde_json::Value::Number(n) => format!("number {}", n),
        serde_json::Value::String(s) => format!("string {:?}", s),
        serde_json::Value::Array(_) => "array".to_string(),
        serde_json::Value::Object(_) => "object".to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write_float(f, f64::from(*v), || v.to_string()),
            Value::F64(v) => write_float(f, *v, || v.to_string()),
            Value::Text(s) => f.write_str(s),
            Value::Other { text, .. } => f.write_str(text),
        }
    }
}

fn write_float(
    f: &mut fmt::Formatter<'_>,
    widened: f64,
    finite: impl FnOnce() -> String,
) -> fmt::Result {
    if widened.is_nan() {
        f.write_str("NaN")
    } else if widened == f64::INFINITY {
        f.write_str("Infinity")
    } else if widened == f64::NEG_INFINITY {
        f.write_str("-Infinity")
    } else {
        f.write_str(&finite())
    }
}

/// How the exporter writes a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    /// Null cell: empty field
    Absent,
    /// Boolean or numeric literal: written bare
    Numeric,
    /// Everything else: quoted, with embedded quotes doubled
    Text,
}

/// Decide how a cell is written
pub fn classify(value: Option<&Value>) -> ValueClass {
    match value {
        None => ValueClass::Absent,
        Some(v) if v.kind().is_unquoted() => ValueClass::Numeric,
        Some(_) => ValueClass::Text,
    }
}
