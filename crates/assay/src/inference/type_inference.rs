//! Column type inference by majority vote over non-missing values.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::input::Value;
use crate::schema::ColumnType;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Date shapes compiled once on first use. Each shape lists the chrono formats
// that may parse it; the regex only gates which formats are attempted.

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const ISO_DATE: &[&str] = &["%Y-%m-%d"];
const SLASH_ISO_DATE: &[&str] = &["%Y/%m/%d"];
const US_DATE: &[&str] = &["%m/%d/%Y"];
const DOTTED_DATE: &[&str] = &["%d.%m.%Y"];
const MONTH_FIRST: &[&str] = &["%B %d, %Y", "%b %d, %Y"];
const DAY_FIRST: &[&str] = &["%d %B %Y", "%d %b %Y"];

static DATE_SHAPES: Lazy<Vec<(Regex, &'static [&'static str])>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}[T ]\d{1,2}:\d{2}").unwrap(), DATETIME_FORMATS),
        (Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap(), ISO_DATE),
        (Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").unwrap(), SLASH_ISO_DATE),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), US_DATE),
        (Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").unwrap(), DOTTED_DATE),
        (Regex::new(r"^[A-Za-z]{3,9} \d{1,2}, \d{4}$").unwrap(), MONTH_FIRST),
        (Regex::new(r"^\d{1,2} [A-Za-z]{3,9} \d{4}$").unwrap(), DAY_FIRST),
    ]
});

/// Parse a raw value as a calendar date or timestamp.
///
/// Only strings are considered. Offsets are normalized to UTC and plain
/// dates read as midnight.
pub fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    let text = value.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    let (_, formats) = DATE_SHAPES.iter().find(|(shape, _)| shape.is_match(text))?;
    for format in formats.iter() {
        if format.contains("%H") {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt);
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Thresholds for the type vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Fraction of numeric values above which a column is numeric.
    pub numeric_threshold: f64,
    /// Fraction of date values above which a column is datetime.
    pub datetime_threshold: f64,
    /// Distinct/total ratio below which a column is categorical.
    pub categorical_ratio: f64,
    /// Extra string tokens treated as missing (e.g. "NA").
    pub null_tokens: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: 0.8,
            datetime_threshold: 0.8,
            categorical_ratio: 0.1,
            null_tokens: Vec::new(),
        }
    }
}

/// Classifies a column from its non-missing values.
#[derive(Debug, Clone, Default)]
pub struct TypeInferrer {
    config: InferenceConfig,
}

impl TypeInferrer {
    /// Create an inferrer with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inferrer with custom thresholds.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Infer the column type. The first matching rule wins:
    /// numeric, then datetime, then categorical, otherwise text.
    pub fn infer(&self, values: &[&Value]) -> ColumnType {
        if values.is_empty() {
            return ColumnType::Text;
        }

        let total = values.len() as f64;

        let numeric = values.iter().filter(|v| v.as_f64().is_some()).count();
        if numeric as f64 / total > self.config.numeric_threshold {
            return ColumnType::Numeric;
        }

        let dates = values.iter().filter(|v| parse_datetime(v).is_some()).count();
        if dates as f64 / total > self.config.datetime_threshold {
            return ColumnType::Datetime;
        }

        let distinct: HashSet<String> = values.iter().map(|v| v.to_string()).collect();
        if (distinct.len() as f64 / total) < self.config.categorical_ratio {
            return ColumnType::Categorical;
        }

        ColumnType::Text
    }
}
