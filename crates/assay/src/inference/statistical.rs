//! Per-column statistical analysis: distribution, missingness, patterns and
//! outliers.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{RowTable, Value};
use crate::schema::{ColumnProfile, ColumnType, Distribution, NumericSummary};
use crate::stats;
use super::type_inference::{InferenceConfig, TypeInferrer};

/// Pattern tags attached to column profiles.
pub mod patterns {
    pub const ALL_POSITIVE: &str = "all positive values";
    pub const INTEGER_ONLY: &str = "integer values only";
    pub const WIDE_RANGE: &str = "wide value range";
    pub const LOW_CARDINALITY: &str = "low cardinality";
    pub const HIGH_CARDINALITY: &str = "high cardinality";
    pub const LONG_TEXT: &str = "long text content";
    pub const SHORT_TEXT: &str = "short text content";
}

/// Settings for distribution summaries and outlier detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Tukey fence multiplier.
    pub iqr_multiplier: f64,
    /// Raw values kept in text/datetime samples.
    pub sample_size: usize,
    /// Range above which a numeric column is "wide".
    pub wide_range: f64,
    /// Distinct counts below this are "low cardinality".
    pub low_cardinality: usize,
    /// Distinct counts above this are "high cardinality".
    pub high_cardinality: usize,
    /// Average length above which text is "long".
    pub long_text_length: f64,
    /// Average length below which text is "short".
    pub short_text_length: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            sample_size: 10,
            wide_range: 1000.0,
            low_cardinality: 10,
            high_cardinality: 100,
            long_text_length: 100.0,
            short_text_length: 10.0,
        }
    }
}

/// Performs type inference and statistical analysis on table columns.
#[derive(Debug, Clone)]
pub struct StatisticalAnalyzer {
    inferrer: TypeInferrer,
    null_tokens: Vec<String>,
    config: StatisticsConfig,
}

impl StatisticalAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default(), StatisticsConfig::default())
    }

    /// Create an analyzer with custom settings.
    pub fn with_config(inference: InferenceConfig, config: StatisticsConfig) -> Self {
        Self {
            null_tokens: inference.null_tokens.clone(),
            inferrer: TypeInferrer::with_config(inference),
            config,
        }
    }

    /// Profile one column of the table.
    pub fn analyze_column(&self, table: &RowTable, name: &str) -> ColumnProfile {
        let total_count = table.row_count();
        let present: Vec<&Value> = table
            .column_values(name)
            .filter(|v| !v.is_missing(&self.null_tokens))
            .collect();

        let non_missing_count = present.len();
        let missing_count = total_count - non_missing_count;
        let missing_percentage = if total_count == 0 {
            0.0
        } else {
            missing_count as f64 / total_count as f64 * 100.0
        };

        let distinct: IndexSet<String> = present.iter().map(|v| v.to_string()).collect();
        let unique_count = distinct.len();

        let column_type = self.inferrer.infer(&present);

        let (distribution, patterns, outliers) = match column_type {
            ColumnType::Numeric => {
                let numbers: Vec<f64> = present.iter().filter_map(|v| v.as_f64()).collect();
                let summary = self.numeric_summary(&numbers);
                let patterns = self.numeric_patterns(&numbers, &summary);
                let outliers = self.detect_outliers(&numbers, &summary);
                (Distribution::Numeric(summary), patterns, Some(outliers))
            }
            ColumnType::Categorical => {
                let mut counts: IndexMap<String, usize> = IndexMap::new();
                for value in &present {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
                let patterns = self.categorical_patterns(counts.len());
                (Distribution::Categorical { counts }, patterns, None)
            }
            ColumnType::Datetime | ColumnType::Text => {
                let patterns = if column_type == ColumnType::Text {
                    self.text_patterns(&present)
                } else {
                    Vec::new()
                };
                let sample = present
                    .iter()
                    .take(self.config.sample_size)
                    .map(|v| (*v).clone())
                    .collect();
                (
                    Distribution::Sample {
                        sample,
                        unique_count,
                    },
                    patterns,
                    None,
                )
            }
        };

        debug!(
            column = name,
            column_type = %column_type,
            missing = missing_count,
            unique = unique_count,
            "analyzed column"
        );

        ColumnProfile {
            name: name.to_string(),
            column_type,
            unique_count,
            non_missing_count,
            missing_count,
            missing_percentage,
            distribution,
            patterns,
            outliers,
        }
    }

    /// Summarize numeric values. Fewer than two values give a zero spread.
    fn numeric_summary(&self, values: &[f64]) -> NumericSummary {
        if values.is_empty() {
            return NumericSummary::empty();
        }

        let mut sorted = values.to_vec();
        stats::sort_ascending(&mut sorted);

        NumericSummary {
            count: values.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: stats::mean(values),
            median: stats::median(&sorted),
            std_dev: stats::std_dev(values),
            q1: stats::percentile(&sorted, 25.0),
            q2: stats::percentile(&sorted, 50.0),
            q3: stats::percentile(&sorted, 75.0),
        }
    }

    /// Values outside the Tukey fences, in row order.
    fn detect_outliers(&self, values: &[f64], summary: &NumericSummary) -> Vec<f64> {
        values
            .iter()
            .copied()
            .filter(|&v| summary.is_outlier_iqr(v, self.config.iqr_multiplier))
            .collect()
    }

    fn numeric_patterns(&self, values: &[f64], summary: &NumericSummary) -> Vec<String> {
        let mut tags = Vec::new();
        if values.is_empty() {
            return tags;
        }

        if summary.min >= 0.0 {
            tags.push(patterns::ALL_POSITIVE.to_string());
        }
        if values.iter().all(|v| v.fract() == 0.0) {
            tags.push(patterns::INTEGER_ONLY.to_string());
        }
        if summary.max - summary.min > self.config.wide_range {
            tags.push(patterns::WIDE_RANGE.to_string());
        }

        tags
    }

    fn categorical_patterns(&self, distinct: usize) -> Vec<String> {
        let mut tags = Vec::new();
        if distinct < self.config.low_cardinality {
            tags.push(patterns::LOW_CARDINALITY.to_string());
        }
        if distinct > self.config.high_cardinality {
            tags.push(patterns::HIGH_CARDINALITY.to_string());
        }
        tags
    }

    fn text_patterns(&self, values: &[&Value]) -> Vec<String> {
        let mut tags = Vec::new();
        if values.is_empty() {
            return tags;
        }

        let total_length: usize = values.iter().map(|v| v.to_string().chars().count()).sum();
        let avg_length = total_length as f64 / values.len() as f64;

        if avg_length > self.config.long_text_length {
            tags.push(patterns::LONG_TEXT.to_string());
        }
        if avg_length < self.config.short_text_length {
            tags.push(patterns::SHORT_TEXT.to_string());
        }

        tags
    }
}

impl Default for StatisticalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
