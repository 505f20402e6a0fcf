//! Medal Overview Page
//! Japan's Olympic medal record: top sports, medals over the years, athlete
//! demographics and a per-sport medal-class breakdown.

use polars::prelude::DataFrame;
use tracing::info;

use crate::charts::builders::{self, BuilderOptions};
use crate::charts::model::{Chart, Trace};
use crate::charts::subplot::{CellKind, SubplotGrid};
use crate::data::transform;
use crate::pages::registry::{ChartRegistry, RenderPayload};
use crate::pages::PageError;

/// The four sports highlighted in the per-sport breakdowns.
const FOCUS_SPORTS: [&str; 4] = ["Gymnastics", "Swimming", "Ski Jumping", "Speed Skating"];

/// Gold, silver and bronze wedge colors.
const MEDAL_COLORS: [&str; 3] = ["#FFD700", "#C0C0C0", "#CD7F32"];

/// Build the medal overview registry. Every chart is computed eagerly; the
/// first key inserted is the page's default selection.
pub fn build_registry(df: &DataFrame) -> Result<ChartRegistry, PageError> {
    let mut registry = ChartRegistry::new();

    let japan = transform::filter_team_contains(df, "japan")?;
    let japan_medals = transform::medal_rows(&japan)?;

    // Japan's best three sports by medal count.
    let top3 = transform::top_value_counts(&japan_medals, "Sport", 3)?;
    let chart = builders::bar_chart(
        &top3,
        &BuilderOptions::new()
            .x("Sport")
            .y("count")
            .title("Top 3 Sports")
            .colors(["#FF0000"]),
    )?;
    registry.insert("top3", RenderPayload::Single(chart));

    // Medal counts per year, one chart per season.
    for (key, season, color, title) in [
        ("summer", "Summer", "#FFD700", "Japan Medals per Year (Summer)"),
        ("winter", "Winter", "#0066FF", "Japan Medals per Year (Winter)"),
    ] {
        let season_medals = transform::filter_season(&japan_medals, season)?;
        let per_year = transform::counts_by_year(&season_medals)?;
        let chart = builders::line_chart(
            &per_year,
            &BuilderOptions::new()
                .x("Year")
                .y("count")
                .markers(true)
                .title(title)
                .colors([color]),
        )?;
        registry.insert(key, RenderPayload::Single(chart));
    }

    // Age distribution across every Japanese athlete with a recorded age.
    let ages = transform::drop_null_rows(&japan, "Age")?;
    let chart = builders::histogram(
        &ages,
        &BuilderOptions::new()
            .x("Age")
            .nbins(20)
            .title("Age Distribution of Japanese Athletes")
            .colors(["#FF00FF"]),
    )?;
    registry.insert("age", RenderPayload::Single(chart));

    // Medal-class distribution per focus sport as a row of pies.
    let sport_medals = transform::filter_sports(&japan_medals, &FOCUS_SPORTS)?;
    let mut grid = SubplotGrid::new(1, FOCUS_SPORTS.len())
        .with_uniform_kind(CellKind::Pie)
        .with_cell_titles(&FOCUS_SPORTS)
        .with_title("Japan Medal Distribution by Sport");
    for (i, sport) in FOCUS_SPORTS.into_iter().enumerate() {
        let rows = transform::filter_sports(&sport_medals, &[sport])?;
        let counts = transform::value_counts(&rows, "Medal")?;
        let (labels, values): (Vec<String>, Vec<f64>) =
            transform::string_column(&counts, "Medal")?
                .into_iter()
                .zip(transform::float_column(&counts, "count")?)
                .filter_map(|(label, value)| Some((label?, value?)))
                .unzip();
        grid.add_trace(
            1,
            i + 1,
            Trace::Pie {
                name: Some(sport.to_string()),
                labels,
                values,
                colors: MEDAL_COLORS.iter().map(|c| (*c).to_string()).collect(),
            },
        )?;
    }
    registry.insert("medals_sport", RenderPayload::Single(grid.into_chart()));

    // Medal counts split by sport and sex.
    let by_sex = transform::counts_by(&sport_medals, &["Sport", "Sex"])?;
    let chart = builders::bar_chart(
        &by_sex,
        &BuilderOptions::new()
            .x("Sport")
            .y("count")
            .color("Sex")
            .title("Japan Medal Breakdown by Sport and Gender")
            .colors(["#FF00FF", "#0066FF"]),
    )?
    .with_axis_titles("Sport", "Total Medal Count")
    .with_legend_title("Gender");
    registry.insert("medals_gender", RenderPayload::Single(chart));

    // Height against weight for Japanese athletes in the focus sports.
    let four_sports = transform::filter_sports(&japan, &FOCUS_SPORTS)?;
    let chart = builders::density_heatmap(
        &four_sports,
        &BuilderOptions::new()
            .x("Height")
            .y("Weight")
            .title("Weight vs Height in Japanese Athletes (Top 4 Sports)")
            .colors(["#150048", "#8C008C", "#FF8000", "#FF0000"]),
    )?;
    registry.insert("weight_height", RenderPayload::Single(chart));

    // Mean height and weight per year, two lines on one chart.
    let by_year = transform::mean_by(&japan, "Year", &["Height", "Weight"])?;
    let years = transform::float_column(&by_year, "Year")?;
    let heights = transform::float_column(&by_year, "Height")?;
    let weights = transform::float_column(&by_year, "Weight")?;
    let mut chart = Chart::new()
        .with_title("Japanese Athletes Physique Over Time")
        .with_axis_titles("Year", "Measurement (cm/kg)")
        .with_legend_title("Measurement Type")
        .with_colors(["#a56814", "#311906"]);
    for (name, series) in [("Height", &heights), ("Weight", &weights)] {
        let (xs, ys): (Vec<f64>, Vec<f64>) = years
            .iter()
            .zip(series.iter())
            .filter_map(|(year, value)| Some(((*year)?, (*value)?)))
            .unzip();
        chart = chart.with_trace(Trace::Line {
            name: Some(name.to_string()),
            x: xs,
            y: ys,
            markers: false,
        });
    }
    registry.insert("physique", RenderPayload::Single(chart));

    // Age against height for medalists in the focus sports.
    let four_sport_medalists = transform::medal_rows(&four_sports)?;
    let chart = builders::scatter_plot(
        &four_sport_medalists,
        &BuilderOptions::new()
            .x("Age")
            .y("Height")
            .color("Sport")
            .title("Age vs Medals Won for Japanese Athletes (Top 4 Sports)")
            .colors(["#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3"]),
    )?;
    registry.insert("age_medals", RenderPayload::Single(chart));

    info!(charts = registry.len(), "medal overview registry built");
    Ok(registry)
}
