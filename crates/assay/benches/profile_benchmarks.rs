//! Full profiling pipeline benchmarks.
//!
//! Measures end-to-end profiling of in-memory tables, from type inference
//! through insight synthesis.

use assay::{Profiler, Row, RowTable, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a realistic sales table with mixed column types.
fn generate_sales_table(rows: usize) -> RowTable {
    let mut rng = StdRng::seed_from_u64(42);
    let regions = ["north", "south", "east", "west"];
    let products = ["widget", "gadget", "gizmo"];

    let rows = (0..rows)
        .map(|i| {
            let mut row = Row::new();
            row.insert(
                "order_date".to_string(),
                Value::from(format!("2024-{:02}-{:02}", (i % 12) + 1, (i % 28) + 1)),
            );
            row.insert("region".to_string(), Value::from(regions[i % regions.len()]));
            row.insert("product".to_string(), Value::from(products[i % products.len()]));

            let quantity: i64 = rng.gen_range(1..50);
            row.insert("quantity".to_string(), Value::from(quantity));

            // Occasional outliers and gaps
            let price: f64 = if i % 97 == 0 {
                rng.gen_range(5_000.0..10_000.0)
            } else {
                rng.gen_range(5.0..50.0)
            };
            row.insert("price".to_string(), Value::from(price));
            row.insert(
                "discount".to_string(),
                if i % 5 == 0 { Value::Null } else { Value::from(rng.gen_range(0.0..0.3f64)) },
            );
            row.insert("notes".to_string(), Value::from(format!("order {} for customer {}", i, i % 173)));
            row
        })
        .collect();

    RowTable::new(rows)
}

/// Generate a wide numeric table to stress the correlation matrix.
fn generate_numeric_table(rows: usize, columns: usize) -> RowTable {
    let mut rng = StdRng::seed_from_u64(7);
    let rows = (0..rows)
        .map(|_| {
            (0..columns)
                .map(|c| (format!("m{}", c), Value::from(rng.gen_range(-100.0..100.0f64))))
                .collect::<Row>()
        })
        .collect();
    RowTable::new(rows)
}

fn bench_full_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_profile");
    let profiler = Profiler::new();

    for rows in [100, 1_000, 10_000].iter() {
        let table = generate_sales_table(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("sales_rows", rows), &table, |b, table| {
            b.iter(|| profiler.profile(black_box(table), "sales.csv").unwrap())
        });
    }

    group.finish();
}

fn bench_correlation_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_width");
    let profiler = Profiler::new();

    for columns in [2, 8, 16].iter() {
        let table = generate_numeric_table(1_000, *columns);
        group.bench_with_input(BenchmarkId::new("numeric_columns", columns), &table, |b, table| {
            b.iter(|| profiler.profile(black_box(table), "metrics.csv").unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_profile, bench_correlation_width);
criterion_main!(benches);
