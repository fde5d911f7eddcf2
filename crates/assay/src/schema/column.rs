//! Column profile definition and distributions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::Value;
use super::types::ColumnType;

/// Distribution summary for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of values that parsed as numbers.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Second quartile (50th percentile).
    pub q2: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
}

impl NumericSummary {
    /// Summary for a column without any usable numbers.
    pub fn empty() -> Self {
        Self {
            count: 0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            q1: 0.0,
            q2: 0.0,
            q3: 0.0,
        }
    }

    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper Tukey fences for the given multiplier.
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }

    /// Check if a value is an outlier using the IQR method.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.fences(multiplier);
        value < lower || value > upper
    }
}

/// Type-dependent distribution payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    Numeric(NumericSummary),
    /// Occurrence count per stringified value, in first-seen order.
    Categorical { counts: IndexMap<String, usize> },
    /// Leading raw values plus the distinct count (text and datetime).
    Sample {
        sample: Vec<Value>,
        unique_count: usize,
    },
}

impl Distribution {
    /// Numeric summary, if this is a numeric distribution.
    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            Distribution::Numeric(summary) => Some(summary),
            _ => None,
        }
    }

    /// Category counts, if this is a categorical distribution.
    pub fn as_categorical(&self) -> Option<&IndexMap<String, usize>> {
        match self {
            Distribution::Categorical { counts } => Some(counts),
            _ => None,
        }
    }
}

/// Profile for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Inferred column type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Number of non-missing values.
    pub non_missing_count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// Missing values as a percentage of all rows.
    pub missing_percentage: f64,
    pub distribution: Distribution,
    /// Advisory descriptive tags.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Tukey outliers in row order (numeric columns only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub outliers: Option<Vec<f64>>,
}

impl ColumnProfile {
    /// Total rows this profile was computed over.
    pub fn row_count(&self) -> usize {
        self.missing_count + self.non_missing_count
    }

    pub fn outlier_count(&self) -> usize {
        self.outliers.as_ref().map_or(0, Vec::len)
    }

    pub fn has_pattern(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }
}

/// Names of the columns with the given type, in column order.
pub fn names_of_type(columns: &[ColumnProfile], column_type: ColumnType) -> Vec<&str> {
    columns
        .iter()
        .filter(|c| c.column_type == column_type)
        .map(|c| c.name.as_str())
        .collect()
}
