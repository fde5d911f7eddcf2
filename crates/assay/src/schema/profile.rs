//! Table-level profile: correlations, trends, anomalies and insights.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::{names_of_type, ColumnProfile};
use super::types::{ColumnType, TrendDirection};

/// Pearson correlations keyed by pairs of numeric column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix(IndexMap<String, IndexMap<String, f64>>);

impl CorrelationMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Record the coefficient for an ordered pair.
    pub fn insert(&mut self, a: impl Into<String>, b: impl Into<String>, r: f64) {
        self.0.entry(a.into()).or_default().insert(b.into(), r);
    }

    /// Coefficient for the ordered pair `(a, b)`.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.0.get(a).and_then(|row| row.get(b)).copied()
    }

    /// Column names covered by the matrix.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unordered off-diagonal pairs with `|r| >= threshold`.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<(&str, &str, f64)> {
        let names: Vec<&str> = self.columns().collect();
        let mut pairs = Vec::new();
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                if let Some(r) = self.get(a, b) {
                    if r.abs() >= threshold {
                        pairs.push((*a, *b, r));
                    }
                }
            }
        }
        pairs
    }
}

/// A simple temporal trend between a datetime and a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Datetime column used for ordering.
    pub date_column: String,
    /// Numeric column whose values were compared.
    pub value_column: String,
    pub direction: TrendDirection,
    /// Relative change, capped at 1.
    pub strength: f64,
    /// Chronologically first value.
    pub start_value: f64,
    /// Chronologically last value.
    pub end_value: f64,
    /// Rows that had both a date and a number.
    pub points: usize,
}

/// A data anomaly worth surfacing to the reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anomaly {
    /// Tukey outliers found in a numeric column.
    StatisticalOutlier {
        column: String,
        count: usize,
        /// Leading outlier values.
        sample: Vec<f64>,
    },
    /// A column with too many missing values.
    HighMissingData {
        column: String,
        missing_percentage: f64,
    },
}

impl Anomaly {
    /// Column the anomaly refers to.
    pub fn column(&self) -> &str {
        match self {
            Anomaly::StatisticalOutlier { column, .. } => column,
            Anomaly::HighMissingData { column, .. } => column,
        }
    }
}

/// Aggregate counts for downstream reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    pub total_records: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub datetime_columns: usize,
    pub text_columns: usize,
    /// Off-diagonal column pairs with a strong linear correlation.
    pub strong_correlations: usize,
    /// Outliers across every numeric column.
    pub total_outliers: usize,
}

/// Aggregate quality assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    /// Heuristic score in `[0, 100]`.
    pub data_quality: f64,
    /// Non-missing cells as a percentage of all cells.
    pub completeness: f64,
    /// Fixed-template summary lines.
    pub patterns: Vec<String>,
    pub metrics: ProfileMetrics,
}

/// Complete profile of a row table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataProfile {
    /// Label of the originating file, carried through untouched.
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub correlations: CorrelationMatrix,
    #[serde(default)]
    pub trends: Vec<Trend>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    pub insights: Insights,
    /// When the profile was produced.
    pub profiled_at: DateTime<Utc>,
}

impl DataProfile {
    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of numeric columns.
    pub fn numeric_columns(&self) -> Vec<&str> {
        names_of_type(&self.columns, ColumnType::Numeric)
    }

    /// Names of datetime columns.
    pub fn datetime_columns(&self) -> Vec<&str> {
        names_of_type(&self.columns, ColumnType::Datetime)
    }
}
