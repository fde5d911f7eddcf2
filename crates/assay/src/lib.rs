//! Assay: profiling engine for decoded tabular datasets.
//!
//! Assay turns a table of row records into a structural and statistical
//! profile that downstream report builders can read.
//!
//! # Pipeline
//!
//! - **Type inference**: each column becomes numeric, categorical, datetime
//!   or text by majority vote over its non-missing values
//! - **Column statistics**: distributions, missingness, cardinality,
//!   pattern tags and Tukey outliers
//! - **Cross-column analysis**: pairwise Pearson correlation and a simple
//!   temporal trend
//! - **Insights**: anomalies, completeness and a 0-100 quality score
//!
//! The engine is a pure in-memory transform. It keeps no state between
//! calls and never fails on a malformed column; only an empty table is an
//! error.
//!
//! # Example
//!
//! ```
//! use assay::{Profiler, RowTable};
//!
//! let table = RowTable::from_json_str(
//!     r#"[{"price": 10, "region": "north"}, {"price": 12, "region": "south"}]"#,
//! ).unwrap();
//!
//! let profile = Profiler::new().profile(&table, "sales.csv").unwrap();
//!
//! println!("Columns: {}", profile.column_count);
//! println!("Quality: {:.0}", profile.insights.data_quality);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod schema;
pub mod stats;

mod profiler;

pub use crate::profiler::{profile, Profiler, ProfilerConfig};
pub use error::{AssayError, Result};
pub use inference::{InferenceConfig, QualityConfig, StatisticsConfig};
pub use input::{Row, RowTable, Value};
pub use schema::{
    Anomaly, ColumnProfile, ColumnType, CorrelationMatrix, DataProfile, Distribution, Insights,
    NumericSummary, ProfileMetrics, Trend, TrendDirection,
};
