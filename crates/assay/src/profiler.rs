//! Main Profiler struct and public API.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AssayError, Result};
use crate::inference::{
    correlation_matrix, detect_trend, InferenceConfig, InsightSynthesizer, QualityConfig,
    StatisticalAnalyzer, StatisticsConfig,
};
use crate::input::RowTable;
use crate::schema::{names_of_type, ColumnType, DataProfile};

/// Configuration for profiling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Type inference thresholds and null tokens.
    pub inference: InferenceConfig,
    /// Distribution and outlier settings.
    pub statistics: StatisticsConfig,
    /// Quality scoring weights.
    pub quality: QualityConfig,
}

impl ProfilerConfig {
    /// Load configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AssayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are in range.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("inference.numeric_threshold", self.inference.numeric_threshold),
            ("inference.datetime_threshold", self.inference.datetime_threshold),
            ("inference.categorical_ratio", self.inference.categorical_ratio),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(AssayError::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        let multiplier = self.statistics.iqr_multiplier;
        if multiplier.is_nan() || multiplier < 0.0 {
            return Err(AssayError::Config(format!(
                "statistics.iqr_multiplier must be non-negative, got {}",
                self.statistics.iqr_multiplier
            )));
        }

        if !(0.0..=100.0).contains(&self.quality.missing_threshold) {
            return Err(AssayError::Config(format!(
                "quality.missing_threshold must be a percentage, got {}",
                self.quality.missing_threshold
            )));
        }

        Ok(())
    }
}

/// The profiling engine.
///
/// Holds configuration only; every call to [`Profiler::profile`] is
/// independent, so one profiler can be shared across threads.
#[derive(Debug, Clone)]
pub struct Profiler {
    config: ProfilerConfig,
    analyzer: StatisticalAnalyzer,
    synthesizer: InsightSynthesizer,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        let analyzer =
            StatisticalAnalyzer::with_config(config.inference.clone(), config.statistics.clone());
        let synthesizer = InsightSynthesizer::with_config(config.quality.clone());

        Self {
            config,
            analyzer,
            synthesizer,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile a decoded row table.
    ///
    /// `file_name` is an opaque label copied into the result. Fails only
    /// when the table has no rows.
    pub fn profile(&self, table: &RowTable, file_name: &str) -> Result<DataProfile> {
        if table.is_empty() {
            return Err(AssayError::EmptyData(format!(
                "'{}' contains no rows to analyze",
                file_name
            )));
        }

        let row_count = table.row_count();
        debug!(file = file_name, rows = row_count, columns = table.column_count(), "profiling table");

        // Stages 1 and 2: per-column inference and statistics, in column order
        let columns: Vec<_> = table
            .column_names()
            .iter()
            .map(|name| self.analyzer.analyze_column(table, name))
            .collect();

        // Stage 3: cross-column analysis
        let numeric = names_of_type(&columns, ColumnType::Numeric);
        let datetime = names_of_type(&columns, ColumnType::Datetime);

        let correlations = correlation_matrix(table, &numeric);
        let trends: Vec<_> = detect_trend(table, &datetime, &numeric).into_iter().collect();

        // Stage 4: insight synthesis
        let anomalies = self.synthesizer.detect_anomalies(&columns);
        let insights = self
            .synthesizer
            .synthesize(row_count, &columns, &correlations, &anomalies);

        info!(
            file = file_name,
            rows = row_count,
            columns = columns.len(),
            anomalies = anomalies.len(),
            quality = insights.data_quality,
            "profiled dataset"
        );

        Ok(DataProfile {
            file_name: file_name.to_string(),
            row_count,
            column_count: columns.len(),
            columns,
            correlations,
            trends,
            anomalies,
            insights,
            profiled_at: Utc::now(),
        })
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Profile a table with the default configuration.
pub fn profile(table: &RowTable, file_name: &str) -> Result<DataProfile> {
    Profiler::new().profile(table, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_profile_simple_rows() {
        let table = RowTable::from_json_str(
            r#"[
                {"id": "S001", "age": 25, "diagnosis": "CD"},
                {"id": "S002", "age": 30, "diagnosis": "UC"},
                {"id": "S003", "age": 28, "diagnosis": "CD"}
            ]"#,
        )
        .unwrap();

        let result = Profiler::new().profile(&table, "samples.json").unwrap();

        assert_eq!(result.file_name, "samples.json");
        assert_eq!(result.row_count, 3);
        assert_eq!(result.column_count, 3);
        assert_eq!(result.column("age").unwrap().column_type, ColumnType::Numeric);
        assert_eq!(result.insights.patterns.len(), 4);
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = Profiler::new().profile(&RowTable::default(), "empty.csv").unwrap_err();
        assert!(matches!(err, AssayError::EmptyData(_)));
    }

    #[test]
    fn test_config_from_partial_json() {
        let file = create_test_file(r#"{"quality": {"missing_threshold": 35.0}}"#);
        let config = ProfilerConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.quality.missing_threshold, 35.0);
        assert_eq!(config.quality.anomaly_penalty, 2.0);
        assert_eq!(config.inference.numeric_threshold, 0.8);
    }

    #[test]
    fn test_config_validation() {
        let file = create_test_file(r#"{"inference": {"numeric_threshold": 1.5}}"#);
        let err = ProfilerConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, AssayError::Config(_)));

        let err = ProfilerConfig::from_json_file("/nonexistent/assay.json").unwrap_err();
        assert!(matches!(err, AssayError::Io { .. }));
    }

    #[test]
    fn test_custom_missing_threshold() {
        let table = RowTable::from_json_str(
            r#"[{"a": 1, "b": null}, {"a": 2, "b": "x"}, {"a": 3, "b": "y"}, {"a": 4, "b": "z"}]"#,
        )
        .unwrap();

        let default_profile = Profiler::new().profile(&table, "t").unwrap();
        assert_eq!(default_profile.anomalies.len(), 1);

        let mut config = ProfilerConfig::default();
        config.quality.missing_threshold = 30.0;
        let relaxed = Profiler::with_config(config).profile(&table, "t").unwrap();
        assert!(relaxed.anomalies.is_empty());
    }
}
