//! Cross-column analysis: pairwise correlation and temporal trends.

use tracing::debug;

use crate::input::RowTable;
use crate::schema::{CorrelationMatrix, Trend, TrendDirection};
use crate::stats;
use super::type_inference::parse_datetime;

/// Minimum dated rows before a trend is reported.
const MIN_TREND_POINTS: usize = 3;

/// Pearson correlation for every ordered pair of numeric columns.
///
/// Each pair uses only rows where both cells are numeric, so different pairs
/// may see different row counts. Self-pairs are 1 by definition.
pub fn correlation_matrix(table: &RowTable, numeric_columns: &[&str]) -> CorrelationMatrix {
    let mut matrix = CorrelationMatrix::new();

    for &a in numeric_columns {
        for &b in numeric_columns {
            if a == b {
                matrix.insert(a, b, 1.0);
                continue;
            }

            let (xs, ys): (Vec<f64>, Vec<f64>) = table
                .column_values(a)
                .zip(table.column_values(b))
                .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
                .unzip();

            matrix.insert(a, b, stats::pearson(&xs, &ys));
        }
    }

    debug!(columns = numeric_columns.len(), "computed correlation matrix");
    matrix
}

/// Simple trend between the first datetime and the first numeric column.
///
/// Rows lacking a parseable date or number are dropped, the rest are ordered
/// by date and the first and last values compared. Returns `None` when
/// either list is empty or fewer than three rows qualify.
pub fn detect_trend(
    table: &RowTable,
    datetime_columns: &[&str],
    numeric_columns: &[&str],
) -> Option<Trend> {
    let date_column = *datetime_columns.first()?;
    let value_column = *numeric_columns.first()?;

    let mut points: Vec<_> = table
        .column_values(date_column)
        .zip(table.column_values(value_column))
        .filter_map(|(d, v)| Some((parse_datetime(d)?, v.as_f64()?)))
        .collect();

    if points.len() < MIN_TREND_POINTS {
        debug!(
            date_column,
            value_column,
            points = points.len(),
            "not enough dated rows for a trend"
        );
        return None;
    }

    // Stable sort keeps row order among equal timestamps
    points.sort_by_key(|(date, _)| *date);

    let start_value = points[0].1;
    let end_value = points[points.len() - 1].1;

    let direction = if end_value > start_value {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    Some(Trend {
        date_column: date_column.to_string(),
        value_column: value_column.to_string(),
        direction,
        strength: trend_strength(start_value, end_value),
        start_value,
        end_value,
        points: points.len(),
    })
}

/// Relative change `|end - start| / |start|`, capped at 1.
fn trend_strength(start: f64, end: f64) -> f64 {
    let change = (end - start).abs();
    if start == 0.0 {
        return if change == 0.0 { 0.0 } else { 1.0 };
    }
    (change / start.abs()).min(1.0)
}
