//! Profile types produced by the engine.

mod column;
mod profile;
mod types;

pub use column::{names_of_type, ColumnProfile, Distribution, NumericSummary};
pub use profile::{
    Anomaly, CorrelationMatrix, DataProfile, Insights, ProfileMetrics, Trend,
};
pub use types::{ColumnType, TrendDirection};
