//! Profile command - profile decoded rows and report the result.

use std::path::{Path, PathBuf};

use assay::{Anomaly, ColumnType, DataProfile, Profiler, ProfilerConfig, RowTable};
use colored::Colorize;
use tracing::info;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json_output: bool,
    config: Option<PathBuf>,
    name: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load_and_profile(&file, config.as_deref(), name)?;

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&profile)?)?;
        info!(path = %path.display(), "profile written");
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    print_summary(&profile, verbose);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

/// Read decoded rows from `file` and profile them.
fn load_and_profile(
    file: &Path,
    config: Option<&Path>,
    name: Option<String>,
) -> Result<DataProfile, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = match config {
        Some(path) => ProfilerConfig::from_json_file(path)?,
        None => ProfilerConfig::default(),
    };

    let content = std::fs::read_to_string(file)?;
    let table = RowTable::from_json_str(&content)?;

    let label = name.unwrap_or_else(|| {
        file.file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    Ok(Profiler::with_config(config).profile(&table, &label)?)
}

fn print_summary(profile: &DataProfile, verbose: bool) {
    println!(
        "{} {}",
        "Profiled".cyan().bold(),
        profile.file_name.white()
    );
    println!(
        "{} rows, {} columns",
        profile.row_count.to_string().white().bold(),
        profile.column_count.to_string().white().bold()
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for col in &profile.columns {
        let kind = match col.column_type {
            ColumnType::Numeric => col.column_type.to_string().blue(),
            ColumnType::Categorical => col.column_type.to_string().magenta(),
            ColumnType::Datetime => col.column_type.to_string().cyan(),
            ColumnType::Text => col.column_type.to_string().normal(),
        };
        println!(
            "  {:20} {:12} {:>6} unique {:>6.1}% missing",
            col.name, kind, col.unique_count, col.missing_percentage
        );
        if verbose && !col.patterns.is_empty() {
            println!("  {:20} {}", "", col.patterns.join(", ").dimmed());
        }
    }

    if verbose && !profile.correlations.is_empty() {
        let pairs = profile.correlations.strong_pairs(0.7);
        if !pairs.is_empty() {
            println!();
            println!("{}", "Strong correlations:".yellow().bold());
            for (a, b, r) in pairs {
                println!("  {} ~ {} ({:+.2})", a, b, r);
            }
        }
    }

    for trend in &profile.trends {
        println!();
        println!(
            "{} {} is {} over {} (strength {:.2})",
            "Trend:".yellow().bold(),
            trend.value_column,
            trend.direction,
            trend.date_column,
            trend.strength
        );
    }

    if !profile.anomalies.is_empty() {
        println!();
        println!("{}", "Anomalies:".yellow().bold());
        for anomaly in &profile.anomalies {
            match anomaly {
                Anomaly::StatisticalOutlier { column, count, sample } => println!(
                    "  {} {} outliers (e.g. {:?})",
                    column.red(),
                    count,
                    sample
                ),
                Anomaly::HighMissingData {
                    column,
                    missing_percentage,
                } => println!(
                    "  {} {:.1}% missing",
                    column.red(),
                    missing_percentage
                ),
            }
        }
    }

    println!();
    for line in &profile.insights.patterns {
        println!("{}", line);
    }
    let score = profile.insights.data_quality;
    let rendered = format!("{:.0}/100", score);
    let rendered = if score >= 90.0 {
        rendered.green()
    } else if score >= 70.0 {
        rendered.yellow()
    } else {
        rendered.red()
    };
    println!("Data quality score: {}", rendered.bold());
}
