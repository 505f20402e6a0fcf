//! Chart Builder Module
//! Reusable builder functions turning a table plus named options into a
//! standalone chart.
//!
//! Builders are plain functions with one shared signature so the subplot
//! compositor can invoke any of them. Missing rows (nulls in the involved
//! columns) are skipped; an empty result is a valid, empty chart.

use std::collections::BTreeMap;

use polars::prelude::*;
use thiserror::Error;

use crate::charts::model::{BarMode, Chart, Orientation, Trace};
use crate::data::transform::{self, TransformError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("builder option '{0}' is required")]
    MissingOption(&'static str),
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Named options forwarded to a chart builder.
///
/// The subplot compositor swaps `x`/`y` on a local copy of this value when
/// horizontal orientation is requested; a caller's options are never
/// mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuilderOptions {
    /// X data column.
    pub x: Option<String>,
    /// Y data column.
    pub y: Option<String>,
    /// Column whose values split the data into one trace per group.
    pub color: Option<String>,
    /// Explicit bar orientation; inferred from column dtypes when unset.
    pub orientation: Option<Orientation>,
    /// Bin count for histograms and heatmaps.
    pub nbins: Option<usize>,
    /// Chart title.
    pub title: Option<String>,
    /// Discrete color sequence.
    pub colors: Vec<String>,
    /// Draw markers on line traces.
    pub markers: bool,
    /// How bar and histogram traces share the category axis.
    pub bar_mode: Option<BarMode>,
}

impl BuilderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    pub fn color(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn nbins(mut self, nbins: usize) -> Self {
        self.nbins = Some(nbins);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    pub fn bar_mode(mut self, mode: BarMode) -> Self {
        self.bar_mode = Some(mode);
        self
    }
}

/// Default number of histogram bins when the options leave it unset.
const DEFAULT_NBINS: usize = 10;
/// Default per-axis bin count for density heatmaps.
const DEFAULT_HEATMAP_NBINS: usize = 20;

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Infer bar orientation from column dtypes: a numeric x against a
/// non-numeric y means the bars run horizontally.
fn infer_orientation(df: &DataFrame, x: &str, y: &str) -> Result<Orientation, BuildError> {
    let x_numeric = is_numeric(df.column(x)?.dtype());
    let y_numeric = is_numeric(df.column(y)?.dtype());
    if x_numeric && !y_numeric {
        Ok(Orientation::Horizontal)
    } else {
        Ok(Orientation::Vertical)
    }
}

fn base_chart(options: &BuilderOptions) -> Chart {
    let mut chart = Chart::new().with_colors(options.colors.clone());
    if let Some(title) = &options.title {
        chart = chart.with_title(title.clone());
    }
    if let Some(mode) = options.bar_mode {
        chart = chart.with_bar_mode(mode);
    }
    chart
}

/// Build a bar chart: one category column against one value column.
///
/// With a `color` column the rows are split into one trace per group,
/// ordered by group name so trace order is deterministic.
pub fn bar_chart(df: &DataFrame, options: &BuilderOptions) -> Result<Chart, BuildError> {
    let x = options.x.as_deref().ok_or(BuildError::MissingOption("x"))?;
    let y = options.y.as_deref().ok_or(BuildError::MissingOption("y"))?;

    let orientation = match options.orientation {
        Some(orientation) => orientation,
        None => infer_orientation(df, x, y)?,
    };
    let (cat_col, val_col) = match orientation {
        Orientation::Vertical => (x, y),
        Orientation::Horizontal => (y, x),
    };

    let cats = transform::string_column(df, cat_col)?;
    let vals = transform::float_column(df, val_col)?;

    let mut chart = base_chart(options).with_axis_titles(x, y);

    match &options.color {
        None => {
            let (categories, values): (Vec<String>, Vec<f64>) = cats
                .into_iter()
                .zip(vals)
                .filter_map(|(cat, val)| Some((cat?, val?)))
                .unzip();
            chart = chart.with_trace(Trace::Bar {
                name: None,
                categories,
                values,
                orientation,
            });
        }
        Some(color_col) => {
            let groups = transform::string_column(df, color_col)?;
            let mut split: BTreeMap<String, (Vec<String>, Vec<f64>)> = BTreeMap::new();
            for ((cat, val), group) in cats.into_iter().zip(vals).zip(groups) {
                let (Some(cat), Some(val), Some(group)) = (cat, val, group) else {
                    continue;
                };
                let series = split.entry(group).or_default();
                series.0.push(cat);
                series.1.push(val);
            }
            for (name, (categories, values)) in split {
                chart = chart.with_trace(Trace::Bar {
                    name: Some(name),
                    categories,
                    values,
                    orientation,
                });
            }
        }
    }

    Ok(chart)
}

/// Build a line chart from two numeric columns.
pub fn line_chart(df: &DataFrame, options: &BuilderOptions) -> Result<Chart, BuildError> {
    let x = options.x.as_deref().ok_or(BuildError::MissingOption("x"))?;
    let y = options.y.as_deref().ok_or(BuildError::MissingOption("y"))?;

    let (xs, ys): (Vec<f64>, Vec<f64>) = transform::float_column(df, x)?
        .into_iter()
        .zip(transform::float_column(df, y)?)
        .filter_map(|(xv, yv)| Some((xv?, yv?)))
        .unzip();

    let chart = base_chart(options)
        .with_axis_titles(x, y)
        .with_trace(Trace::Line {
            name: None,
            x: xs,
            y: ys,
            markers: options.markers,
        });
    Ok(chart)
}

/// Build a scatter plot from two numeric columns, optionally split into one
/// trace per `color` group (ordered by group name).
pub fn scatter_plot(df: &DataFrame, options: &BuilderOptions) -> Result<Chart, BuildError> {
    let x = options.x.as_deref().ok_or(BuildError::MissingOption("x"))?;
    let y = options.y.as_deref().ok_or(BuildError::MissingOption("y"))?;

    let xs = transform::float_column(df, x)?;
    let ys = transform::float_column(df, y)?;

    let mut chart = base_chart(options).with_axis_titles(x, y);

    match &options.color {
        None => {
            let (px, py): (Vec<f64>, Vec<f64>) = xs
                .into_iter()
                .zip(ys)
                .filter_map(|(xv, yv)| Some((xv?, yv?)))
                .unzip();
            chart = chart.with_trace(Trace::Scatter {
                name: None,
                x: px,
                y: py,
            });
        }
        Some(color_col) => {
            let groups = transform::string_column(df, color_col)?;
            let mut split: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
            for ((xv, yv), group) in xs.into_iter().zip(ys).zip(groups) {
                let (Some(xv), Some(yv), Some(group)) = (xv, yv, group) else {
                    continue;
                };
                let series = split.entry(group).or_default();
                series.0.push(xv);
                series.1.push(yv);
            }
            for (name, (px, py)) in split {
                chart = chart.with_trace(Trace::Scatter {
                    name: Some(name),
                    x: px,
                    y: py,
                });
            }
        }
    }

    Ok(chart)
}

/// Build a histogram over one numeric column, optionally overlaid per
/// `color` group (ordered by group name).
pub fn histogram(df: &DataFrame, options: &BuilderOptions) -> Result<Chart, BuildError> {
    let x = options.x.as_deref().ok_or(BuildError::MissingOption("x"))?;
    let nbins = options.nbins.unwrap_or(DEFAULT_NBINS);

    let values = transform::float_column(df, x)?;
    let mut chart = base_chart(options).with_axis_titles(x, "count");

    match &options.color {
        None => {
            chart = chart.with_trace(Trace::Histogram {
                name: None,
                values: values.into_iter().flatten().collect(),
                nbins,
            });
        }
        Some(color_col) => {
            let groups = transform::string_column(df, color_col)?;
            let mut split: BTreeMap<String, Vec<f64>> = BTreeMap::new();
            for (value, group) in values.into_iter().zip(groups) {
                let (Some(value), Some(group)) = (value, group) else {
                    continue;
                };
                split.entry(group).or_default().push(value);
            }
            for (name, group_values) in split {
                chart = chart.with_trace(Trace::Histogram {
                    name: Some(name),
                    values: group_values,
                    nbins,
                });
            }
        }
    }

    Ok(chart)
}

/// Build a 2D density heatmap from two numeric columns.
///
/// Bins are uniform over the observed range of each axis; counts are laid
/// out row-major with one row per y bin.
pub fn density_heatmap(df: &DataFrame, options: &BuilderOptions) -> Result<Chart, BuildError> {
    let x = options.x.as_deref().ok_or(BuildError::MissingOption("x"))?;
    let y = options.y.as_deref().ok_or(BuildError::MissingOption("y"))?;
    let nbins = options.nbins.unwrap_or(DEFAULT_HEATMAP_NBINS).max(1);

    let pairs: Vec<(f64, f64)> = transform::float_column(df, x)?
        .into_iter()
        .zip(transform::float_column(df, y)?)
        .filter_map(|(xv, yv)| Some((xv?, yv?)))
        .collect();

    let chart = base_chart(options).with_axis_titles(x, y);
    if pairs.is_empty() {
        return Ok(chart.with_trace(Trace::Heatmap {
            x_edges: Vec::new(),
            y_edges: Vec::new(),
            counts: Vec::new(),
        }));
    }

    let (x_min, x_max) = spread(pairs.iter().map(|p| p.0));
    let (y_min, y_max) = spread(pairs.iter().map(|p| p.1));

    let x_edges = edges(x_min, x_max, nbins);
    let y_edges = edges(y_min, y_max, nbins);

    let mut counts = vec![vec![0u32; nbins]; nbins];
    for (xv, yv) in &pairs {
        let xi = bin_index(*xv, x_min, x_max, nbins);
        let yi = bin_index(*yv, y_min, y_max, nbins);
        counts[yi][xi] += 1;
    }

    Ok(chart.with_trace(Trace::Heatmap {
        x_edges,
        y_edges,
        counts,
    }))
}

/// Observed min/max, widened when the column is constant so binning still
/// has a non-zero range.
fn spread(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

fn edges(min: f64, max: f64, nbins: usize) -> Vec<f64> {
    let step = (max - min) / nbins as f64;
    (0..=nbins).map(|i| min + i as f64 * step).collect()
}

fn bin_index(value: f64, min: f64, max: f64, nbins: usize) -> usize {
    let ratio = (value - min) / (max - min);
    ((ratio * nbins as f64) as usize).min(nbins - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Sport".into(), &["Judo", "Swimming"]),
            Column::new("count".into(), &[2.0f64, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn bar_chart_defaults_to_vertical() {
        let chart = bar_chart(&counts_df(), &BuilderOptions::new().x("Sport").y("count")).unwrap();

        assert_eq!(chart.len(), 1);
        match &chart.traces()[0] {
            Trace::Bar {
                categories,
                values,
                orientation,
                ..
            } => {
                assert_eq!(categories, &["Judo".to_string(), "Swimming".to_string()]);
                assert_eq!(values, &[2.0, 1.0]);
                assert_eq!(*orientation, Orientation::Vertical);
            }
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn bar_chart_infers_horizontal_from_dtypes() {
        // Numeric x against categorical y flips the orientation without an
        // explicit option, matching the swapped call the compositor makes.
        let chart = bar_chart(&counts_df(), &BuilderOptions::new().x("count").y("Sport")).unwrap();

        match &chart.traces()[0] {
            Trace::Bar {
                categories,
                values,
                orientation,
                ..
            } => {
                assert_eq!(categories, &["Judo".to_string(), "Swimming".to_string()]);
                assert_eq!(values, &[2.0, 1.0]);
                assert_eq!(*orientation, Orientation::Horizontal);
            }
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn bar_chart_splits_by_color_in_name_order() {
        let df = DataFrame::new(vec![
            Column::new("Sport".into(), &["Judo", "Judo", "Swimming"]),
            Column::new("Sex".into(), &["M", "F", "F"]),
            Column::new("count".into(), &[3.0f64, 1.0, 2.0]),
        ])
        .unwrap();

        let chart = bar_chart(
            &df,
            &BuilderOptions::new().x("Sport").y("count").color("Sex"),
        )
        .unwrap();

        assert_eq!(chart.len(), 2);
        assert_eq!(chart.traces()[0].name(), Some("F"));
        assert_eq!(chart.traces()[1].name(), Some("M"));
    }

    #[test]
    fn missing_option_is_reported() {
        let err = bar_chart(&counts_df(), &BuilderOptions::new().x("Sport")).unwrap_err();
        assert!(matches!(err, BuildError::MissingOption("y")));
    }

    #[test]
    fn line_chart_skips_null_rows() {
        let df = DataFrame::new(vec![
            Column::new("Year".into(), &[Some(2000.0f64), Some(2004.0), None]),
            Column::new("count".into(), &[Some(1.0f64), None, Some(3.0)]),
        ])
        .unwrap();

        let chart = line_chart(
            &df,
            &BuilderOptions::new().x("Year").y("count").markers(true),
        )
        .unwrap();

        match &chart.traces()[0] {
            Trace::Line { x, y, markers, .. } => {
                assert_eq!(x, &[2000.0]);
                assert_eq!(y, &[1.0]);
                assert!(markers);
            }
            other => panic!("expected line trace, got {other:?}"),
        }
    }

    #[test]
    fn histogram_overlays_groups_sorted_by_name() {
        let df = DataFrame::new(vec![
            Column::new(
                "Height".into(),
                &[Some(170.0f64), Some(175.0), Some(180.0), None],
            ),
            Column::new(
                "Group".into(),
                &["Non-Medalist", "Medalist", "Medalist", "Medalist"],
            ),
        ])
        .unwrap();

        let chart = histogram(
            &df,
            &BuilderOptions::new()
                .x("Height")
                .color("Group")
                .nbins(5)
                .bar_mode(BarMode::Overlay),
        )
        .unwrap();

        assert_eq!(chart.layout().bar_mode, Some(BarMode::Overlay));
        assert_eq!(chart.len(), 2);
        match &chart.traces()[0] {
            Trace::Histogram { name, values, nbins } => {
                assert_eq!(name.as_deref(), Some("Medalist"));
                assert_eq!(values, &[175.0, 180.0]);
                assert_eq!(*nbins, 5);
            }
            other => panic!("expected histogram trace, got {other:?}"),
        }
        assert_eq!(chart.traces()[1].name(), Some("Non-Medalist"));
    }

    #[test]
    fn heatmap_counts_cover_every_pair() {
        let df = DataFrame::new(vec![
            Column::new("Height".into(), &[160.0f64, 170.0, 180.0, 180.0]),
            Column::new("Weight".into(), &[55.0f64, 65.0, 80.0, 81.0]),
        ])
        .unwrap();

        let chart = density_heatmap(
            &df,
            &BuilderOptions::new().x("Height").y("Weight").nbins(4),
        )
        .unwrap();

        match &chart.traces()[0] {
            Trace::Heatmap {
                x_edges,
                y_edges,
                counts,
            } => {
                assert_eq!(x_edges.len(), 5);
                assert_eq!(y_edges.len(), 5);
                let total: u32 = counts.iter().flatten().sum();
                assert_eq!(total, 4);
            }
            other => panic!("expected heatmap trace, got {other:?}"),
        }
    }

    #[test]
    fn heatmap_of_empty_table_is_empty() {
        let df = DataFrame::new(vec![
            Column::new("Height".into(), Vec::<f64>::new()),
            Column::new("Weight".into(), Vec::<f64>::new()),
        ])
        .unwrap();

        let chart =
            density_heatmap(&df, &BuilderOptions::new().x("Height").y("Weight")).unwrap();

        match &chart.traces()[0] {
            Trace::Heatmap { counts, .. } => assert!(counts.is_empty()),
            other => panic!("expected heatmap trace, got {other:?}"),
        }
    }
}
