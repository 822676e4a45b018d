//! Spreadsheet cell values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value written into or read from a single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Blank cell
    #[default]
    Empty,
    /// Text content
    Text(String),
    /// Numeric content
    Number(f64),
}

impl CellValue {
    /// Text content, if this is a text cell
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric content, if this is a number cell
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Check whether the cell is blank
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert_eq!(CellValue::from("Rain").as_text(), Some("Rain"));
        assert_eq!(CellValue::from(12.5).as_number(), Some(12.5));
        assert!(CellValue::default().is_empty());
        assert_eq!(CellValue::Number(3.0).as_text(), None);
    }

    #[test]
    fn display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(92.1).to_string(), "92.1");
        assert_eq!(CellValue::from("Clear").to_string(), "Clear");
    }

    #[test]
    fn serialization_is_tagged() {
        let json = serde_json::to_string(&CellValue::Number(1.5)).unwrap();
        assert_eq!(json, r#"{"type":"number","value":1.5}"#);
        let back: CellValue = serde_json::from_str(r#"{"type":"empty"}"#).unwrap();
        assert_eq!(back, CellValue::Empty);
    }
}
