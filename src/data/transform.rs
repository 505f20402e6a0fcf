//! Table Transform Module
//! Filtering and aggregation over the athlete events table using Polars.
//!
//! Every function here is a direct lazy filter/group-by/aggregate pipeline;
//! the callers assemble charts from the resulting frames.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Rows whose team name contains `pattern`, case-insensitively.
pub fn filter_team_contains(df: &DataFrame, pattern: &str) -> Result<DataFrame, TransformError> {
    let regex = format!("(?i){}", pattern);
    let filtered = df
        .clone()
        .lazy()
        .filter(col("Team").str().contains(lit(regex), false))
        .collect()?;
    Ok(filtered)
}

/// Rows for a specific National Olympic Committee code.
pub fn filter_noc(df: &DataFrame, noc: &str) -> Result<DataFrame, TransformError> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col("NOC").eq(lit(noc)))
        .collect()?;
    Ok(filtered)
}

/// Rows where a medal was awarded.
pub fn medal_rows(df: &DataFrame) -> Result<DataFrame, TransformError> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col("Medal").is_not_null())
        .collect()?;
    Ok(filtered)
}

/// Rows for one Olympic season ("Summer" or "Winter").
pub fn filter_season(df: &DataFrame, season: &str) -> Result<DataFrame, TransformError> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col("Season").eq(lit(season)))
        .collect()?;
    Ok(filtered)
}

/// Rows with `start <= Year <= end`.
pub fn filter_year_range(
    df: &DataFrame,
    start: i32,
    end: i32,
) -> Result<DataFrame, TransformError> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col("Year").gt_eq(lit(start)).and(col("Year").lt_eq(lit(end))))
        .collect()?;
    Ok(filtered)
}

/// Rows whose sport is one of `sports`.
pub fn filter_sports(df: &DataFrame, sports: &[&str]) -> Result<DataFrame, TransformError> {
    let members = Series::new("sports".into(), sports);
    let filtered = df
        .clone()
        .lazy()
        .filter(col("Sport").is_in(lit(members)))
        .collect()?;
    Ok(filtered)
}

/// Rows for individual events (event name does not mention "team").
pub fn individual_events(df: &DataFrame) -> Result<DataFrame, TransformError> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col("Event").str().contains(lit("(?i)team"), false).not())
        .collect()?;
    Ok(filtered)
}

/// Drop rows of one sport whose event name matches any of `patterns`.
pub fn exclude_event_contains(
    df: &DataFrame,
    sport: &str,
    patterns: &[&str],
) -> Result<DataFrame, TransformError> {
    let regex = format!("(?i)({})", patterns.join("|"));
    let mask = col("Sport")
        .eq(lit(sport))
        .and(col("Event").str().contains(lit(regex), false));
    let filtered = df.clone().lazy().filter(mask.not()).collect()?;
    Ok(filtered)
}

/// Rows where `column` is not null.
pub fn drop_null_rows(df: &DataFrame, column: &str) -> Result<DataFrame, TransformError> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .collect()?;
    Ok(filtered)
}

/// Add a "Group" column splitting rows into medalists and non-medalists.
pub fn with_medalist_flag(df: &DataFrame) -> Result<DataFrame, TransformError> {
    let flagged = df
        .clone()
        .lazy()
        .with_column(
            when(col("Medal").is_not_null())
                .then(lit("Medalist"))
                .otherwise(lit("Non-Medalist"))
                .alias("Group"),
        )
        .collect()?;
    Ok(flagged)
}

/// Occurrence counts per distinct value of `column`, most frequent first.
///
/// Output columns: [`column`, "count"]. Ties are broken by the value itself
/// so the ordering is deterministic.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<DataFrame, TransformError> {
    let counts = df
        .clone()
        .lazy()
        .group_by([col(column)])
        .agg([len().alias("count")])
        .sort(
            ["count", column],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;
    Ok(counts)
}

/// The `n` most frequent values of `column` with their counts.
pub fn top_value_counts(
    df: &DataFrame,
    column: &str,
    n: u32,
) -> Result<DataFrame, TransformError> {
    let counts = value_counts(df, column)?;
    let top = counts.lazy().limit(n).collect()?;
    Ok(top)
}

/// Row counts per year, sorted by year ascending.
pub fn counts_by_year(df: &DataFrame) -> Result<DataFrame, TransformError> {
    let counts = df
        .clone()
        .lazy()
        .group_by([col("Year")])
        .agg([len().alias("count")])
        .sort(["Year"], Default::default())
        .collect()?;
    Ok(counts)
}

/// Row counts per combination of `columns`, sorted by those columns.
pub fn counts_by(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, TransformError> {
    let keys: Vec<Expr> = columns.iter().map(|c| col(*c)).collect();
    let counts = df
        .clone()
        .lazy()
        .group_by(keys)
        .agg([len().alias("count")])
        .sort(columns.to_vec(), Default::default())
        .collect()?;
    Ok(counts)
}

/// Mean of each value column per distinct `group` value, sorted by group.
/// Groups where every value column is null are dropped.
pub fn mean_by(
    df: &DataFrame,
    group: &str,
    values: &[&str],
) -> Result<DataFrame, TransformError> {
    let aggs: Vec<Expr> = values.iter().map(|v| col(*v).mean().alias(*v)).collect();
    let means = df
        .clone()
        .lazy()
        .group_by([col(group)])
        .agg(aggs)
        .drop_nulls(None)
        .sort([group], Default::default())
        .collect()?;
    Ok(means)
}

/// Extract a column as strings, preserving row order and nulls.
pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, TransformError> {
    let column = df.column(name)?;
    let mut out = Vec::with_capacity(column.len());
    for i in 0..column.len() {
        let value = column.get(i)?;
        if value.is_null() {
            out.push(None);
        } else {
            out.push(Some(value.to_string().trim_matches('"').to_string()));
        }
    }
    Ok(out)
}

/// Extract a column as f64, preserving row order and nulls.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, TransformError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let ca = column.f64()?;
    Ok(ca.into_iter().collect())
}
