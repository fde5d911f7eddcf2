//! Profiling stages: type inference, column statistics, cross-column
//! analysis and insight synthesis.

mod cross_column;
mod insights;
mod statistical;
mod type_inference;

pub use cross_column::{correlation_matrix, detect_trend};
pub use insights::{completeness, InsightSynthesizer, QualityConfig};
pub use statistical::{patterns, StatisticalAnalyzer, StatisticsConfig};
pub use type_inference::{parse_datetime, InferenceConfig, TypeInferrer};
