/// GridState Cell Values
///
/// A `CellValue` is the datum at one row/column intersection. Every value has
/// a canonical string representation (its `Display` output), which is what the
/// search engine matches against and what the width calculator measures.
///
/// # Ordering
///
/// `CellValue` implements a total order so that rows can be sorted, compared
/// and hashed consistently:
///
/// - Kinds rank `Nil < Bool < numeric < Date < String`.
/// - `Int` and `Float` share the numeric rank and compare by value. When an
///   integer and a float are numerically equal the integer sorts first, so
///   `Int(1)` and `Float(1.0)` are distinct values.
/// - Floats use the IEEE total order (`f64::total_cmp`), which makes `NaN`
///   usable as a key.
///
/// Columns that mix kinds are sorted textually, see [`crate::sort`].
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Broad kind of a cell, used to decide whether a column is homogeneous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    Nil,
    Bool,
    Numeric,
    Date,
    Text,
}

/// Cell value enum to support multiple types
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Int(i64),
    Float(f64),
    Date(NaiveDateTime),
    Bool(bool),
    Nil,
}

impl CellValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, CellValue::Nil)
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Nil => CellKind::Nil,
            CellValue::Bool(_) => CellKind::Bool,
            CellValue::Int(_) | CellValue::Float(_) => CellKind::Numeric,
            CellValue::Date(_) => CellKind::Date,
            CellValue::String(_) => CellKind::Text,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The canonical string representation.
    pub fn string_representation(&self) -> String {
        self.to_string()
    }

    /// Convert a scalar JSON value. Arrays and objects have no cell
    /// representation and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<CellValue> {
        use serde_json::Value;

        match value {
            Value::Null => Some(CellValue::Nil),
            Value::Bool(b) => Some(CellValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(CellValue::Int)
                .or_else(|| n.as_f64().map(CellValue::Float)),
            Value::String(s) => Some(CellValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self.kind() {
            CellKind::Nil => 0,
            CellKind::Bool => 1,
            CellKind::Numeric => 2,
            CellKind::Date => 3,
            CellKind::Text => 4,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(v) => f.write_str(v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Date(v) => {
                if v.time() == NaiveTime::MIN {
                    write!(f, "{}", v.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Nil => Ok(()),
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (CellValue::Float(a), CellValue::Int(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            (CellValue::String(a), CellValue::String(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Nil, CellValue::Nil) => Ordering::Equal,
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(v) => v.hash(state),
            CellValue::Int(v) => v.hash(state),
            CellValue::Float(v) => v.to_bits().hash(state),
            CellValue::Date(v) => v.hash(state),
            CellValue::Bool(v) => v.hash(state),
            CellValue::Nil => {}
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value.and_time(NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Nil)
    }
}
