//! Aggregate insight synthesis: anomalies, completeness and quality score.

use serde::{Deserialize, Serialize};

use crate::schema::{
    Anomaly, ColumnProfile, ColumnType, CorrelationMatrix, Insights, ProfileMetrics,
};

/// Weights and thresholds for the quality assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Missing percentage above which a column is flagged.
    pub missing_threshold: f64,
    /// Penalty per point of average missing percentage.
    pub missing_weight: f64,
    /// Flat penalty per anomaly.
    pub anomaly_penalty: f64,
    /// Bonus when at least one numeric column exists.
    pub numeric_bonus: f64,
    /// Outlier values kept in each outlier anomaly.
    pub anomaly_sample_size: usize,
    /// Minimum |r| counted as a strong correlation.
    pub strong_correlation: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            missing_threshold: 20.0,
            missing_weight: 0.5,
            anomaly_penalty: 2.0,
            numeric_bonus: 5.0,
            anomaly_sample_size: 5,
            strong_correlation: 0.7,
        }
    }
}

/// Builds anomalies and the quality summary from column profiles.
#[derive(Debug, Clone, Default)]
pub struct InsightSynthesizer {
    config: QualityConfig,
}

impl InsightSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Anomalies in column order; a column's outlier anomaly comes before
    /// its missing-data anomaly.
    pub fn detect_anomalies(&self, columns: &[ColumnProfile]) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        for column in columns {
            if let Some(outliers) = column.outliers.as_ref().filter(|o| !o.is_empty()) {
                anomalies.push(Anomaly::StatisticalOutlier {
                    column: column.name.clone(),
                    count: outliers.len(),
                    sample: outliers
                        .iter()
                        .take(self.config.anomaly_sample_size)
                        .copied()
                        .collect(),
                });
            }

            if column.missing_percentage > self.config.missing_threshold {
                anomalies.push(Anomaly::HighMissingData {
                    column: column.name.clone(),
                    missing_percentage: column.missing_percentage,
                });
            }
        }

        anomalies
    }

    /// Combine profiles, correlations and anomalies into the insight summary.
    pub fn synthesize(
        &self,
        row_count: usize,
        columns: &[ColumnProfile],
        correlations: &CorrelationMatrix,
        anomalies: &[Anomaly],
    ) -> Insights {
        let completeness = completeness(row_count, columns);
        let metrics = self.metrics(row_count, columns, correlations);
        let data_quality = self.quality_score(columns, anomalies.len(), metrics.numeric_columns > 0);

        let patterns = vec![
            format!(
                "Dataset contains {} rows and {} columns",
                row_count,
                columns.len()
            ),
            format!(
                "Found {} numeric columns suitable for statistical analysis",
                metrics.numeric_columns
            ),
            format!(
                "Found {} categorical columns suitable for segmentation",
                metrics.categorical_columns
            ),
            format!("Data completeness: {:.1}%", round_half_up(completeness, 1)),
        ];

        Insights {
            data_quality,
            completeness,
            patterns,
            metrics,
        }
    }

    /// Heuristic score: 100, minus missingness and anomaly penalties, plus a
    /// numeric bonus, clamped to `[0, 100]`.
    fn quality_score(&self, columns: &[ColumnProfile], anomaly_count: usize, has_numeric: bool) -> f64 {
        let avg_missing = if columns.is_empty() {
            0.0
        } else {
            columns.iter().map(|c| c.missing_percentage).sum::<f64>() / columns.len() as f64
        };

        let mut score = 100.0;
        score -= self.config.missing_weight * avg_missing;
        score -= self.config.anomaly_penalty * anomaly_count as f64;
        if has_numeric {
            score += self.config.numeric_bonus;
        }

        score.clamp(0.0, 100.0)
    }

    fn metrics(
        &self,
        row_count: usize,
        columns: &[ColumnProfile],
        correlations: &CorrelationMatrix,
    ) -> ProfileMetrics {
        let count_of = |t: ColumnType| columns.iter().filter(|c| c.column_type == t).count();

        ProfileMetrics {
            total_records: row_count,
            numeric_columns: count_of(ColumnType::Numeric),
            categorical_columns: count_of(ColumnType::Categorical),
            datetime_columns: count_of(ColumnType::Datetime),
            text_columns: count_of(ColumnType::Text),
            strong_correlations: correlations
                .strong_pairs(self.config.strong_correlation)
                .len(),
            total_outliers: columns.iter().map(ColumnProfile::outlier_count).sum(),
        }
    }
}

/// Non-missing cells as a percentage of all cells; 100 for a table without
/// cells.
pub fn completeness(row_count: usize, columns: &[ColumnProfile]) -> f64 {
    let total_cells = row_count * columns.len();
    if total_cells == 0 {
        return 100.0;
    }
    let missing_cells: usize = columns.iter().map(|c| c.missing_count).sum();
    (total_cells - missing_cells) as f64 / total_cells as f64 * 100.0
}

/// Round halves away from zero; `{:.1}` alone rounds exact halves to even.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Distribution, NumericSummary};

    fn column(name: &str, column_type: ColumnType, missing: usize, rows: usize, outliers: Option<Vec<f64>>) -> ColumnProfile {
        ColumnProfile {
            name: name.to_string(),
            column_type,
            unique_count: 0,
            non_missing_count: rows - missing,
            missing_count: missing,
            missing_percentage: missing as f64 / rows as f64 * 100.0,
            distribution: Distribution::Numeric(NumericSummary::empty()),
            patterns: Vec::new(),
            outliers,
        }
    }

    #[test]
    fn test_anomalies_both_kinds_per_column() {
        let columns = vec![
            column("a", ColumnType::Numeric, 5, 10, Some(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])),
            column("b", ColumnType::Text, 2, 10, None),
            column("c", ColumnType::Numeric, 0, 10, Some(vec![])),
        ];
        let anomalies = InsightSynthesizer::new().detect_anomalies(&columns);

        assert_eq!(anomalies.len(), 2);
        assert_eq!(
            anomalies[0],
            Anomaly::StatisticalOutlier {
                column: "a".to_string(),
                count: 6,
                sample: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            }
        );
        assert_eq!(
            anomalies[1],
            Anomaly::HighMissingData {
                column: "a".to_string(),
                missing_percentage: 50.0,
            }
        );
    }

    #[test]
    fn test_missing_threshold_is_exclusive() {
        let columns = vec![column("a", ColumnType::Text, 2, 10, None)];
        assert!(InsightSynthesizer::new().detect_anomalies(&columns).is_empty());
    }

    #[test]
    fn test_quality_score_formula() {
        let columns = vec![
            column("a", ColumnType::Numeric, 2, 10, None),
            column("b", ColumnType::Text, 0, 10, None),
        ];
        let anomalies = vec![Anomaly::HighMissingData {
            column: "x".to_string(),
            missing_percentage: 30.0,
        }];
        let insights = InsightSynthesizer::new().synthesize(
            10,
            &columns,
            &CorrelationMatrix::new(),
            &anomalies,
        );

        // 100 - 0.5 * 10 - 2 * 1 + 5 = 98
        assert!((insights.data_quality - 98.0).abs() < 1e-9);
        assert!((insights.completeness - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_quality_score_clamped() {
        let clean = vec![column("a", ColumnType::Numeric, 0, 10, None)];
        let insights = InsightSynthesizer::new().synthesize(10, &clean, &CorrelationMatrix::new(), &[]);
        assert_eq!(insights.data_quality, 100.0);

        let empty = vec![column("a", ColumnType::Text, 10, 10, None)];
        let anomalies: Vec<Anomaly> = (0..60)
            .map(|i| Anomaly::HighMissingData {
                column: format!("c{}", i),
                missing_percentage: 100.0,
            })
            .collect();
        let insights = InsightSynthesizer::new().synthesize(10, &empty, &CorrelationMatrix::new(), &anomalies);
        assert_eq!(insights.data_quality, 0.0);
    }

    #[test]
    fn test_pattern_narrative() {
        let columns = vec![
            column("a", ColumnType::Numeric, 0, 4, None),
            column("b", ColumnType::Categorical, 1, 4, None),
        ];
        let insights = InsightSynthesizer::new().synthesize(4, &columns, &CorrelationMatrix::new(), &[]);

        assert_eq!(
            insights.patterns,
            vec![
                "Dataset contains 4 rows and 2 columns",
                "Found 1 numeric columns suitable for statistical analysis",
                "Found 1 categorical columns suitable for segmentation",
                "Data completeness: 87.5%",
            ]
        );
        assert_eq!(insights.metrics.numeric_columns, 1);
        assert_eq!(insights.metrics.categorical_columns, 1);
    }

    #[test]
    fn test_completeness_line_rounds_half_up() {
        let columns = vec![column("a", ColumnType::Text, 3, 400, None)];
        let insights = InsightSynthesizer::new().synthesize(400, &columns, &CorrelationMatrix::new(), &[]);

        assert_eq!(insights.completeness, 99.25);
        assert_eq!(insights.patterns[3], "Data completeness: 99.3%");
    }

    #[test]
    fn test_completeness_without_cells() {
        assert_eq!(completeness(5, &[]), 100.0);
    }
}
